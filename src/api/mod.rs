// ==========================================
// 家庭物品管理系统 - API 层
// ==========================================
// 职责: 面向调用方的导入/导出/维护入口
// ==========================================

pub mod error;
pub mod item_io_api;

pub use error::{ApiError, ApiResult};
pub use item_io_api::{ImportApiResponse, ItemIoApi, MaintenanceResponse, RowViolationDto};
