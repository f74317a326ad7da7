// ==========================================
// 家庭物品管理系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与值类型
// 红线: 不含数据访问逻辑,不含导入导出逻辑
// ==========================================

pub mod asset_id;
pub mod item;
pub mod label;
pub mod location;

// 重导出核心类型
pub use asset_id::AssetId;
pub use item::{Item, ItemDetails, ItemDraft, ItemField, ItemSummary};
pub use label::{Label, LabelCreate, LabelList};
pub use location::{Location, LocationCreate, LocationPath};
