// ==========================================
// 家庭物品管理系统 - 批量导入导出核心库
// ==========================================
// 技术栈: Rust + SQLite
// 定位: 物品表格 (CSV/TSV) 导入导出引擎
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与值类型
pub mod domain;

// 数据仓储层 - 协作者接口与 SQLite 实现
pub mod repository;

// 导入导出层 - 表格编解码与对账
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 调用入口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{AssetId, Item, Label, LabelList, Location, LocationPath};

// 导入导出
pub use importer::{
    BatchAborted, ImportError, ImportReport, ItemExporter, ItemImporter, RowRecord, Sheet,
};

// API
pub use api::{ApiError, ItemIoApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
