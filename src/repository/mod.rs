// ==========================================
// 家庭物品管理系统 - 数据仓储层
// ==========================================
// 职责: 数据访问,不含业务逻辑
// 存储: SQLite (rusqlite)
// ==========================================

pub mod error;
pub mod inventory_store;
pub mod item_repo;
pub mod label_repo;
pub mod location_repo;

// 重导出
pub use error::{RepositoryError, RepositoryResult};
pub use inventory_store::{ItemStore, LabelStore, LocationStore};
pub use item_repo::ItemRepository;
pub use label_repo::LabelRepository;
pub use location_repo::LocationRepository;
