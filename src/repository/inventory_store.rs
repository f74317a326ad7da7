// ==========================================
// 家庭物品管理系统 - 导入导出协作者 Trait
// ==========================================
// 职责: 定义导入/导出引擎依赖的数据访问接口（不包含实现）
// 红线: Repository 不含业务规则，只做数据 CRUD
// 说明: 所有调用均以 group_id（租户）限定范围
// ==========================================

use crate::domain::{
    AssetId, Item, ItemDetails, ItemDraft, ItemSummary, Label, LabelCreate, Location,
    LocationCreate,
};
use crate::repository::error::RepositoryResult;

// ==========================================
// LocationStore Trait
// ==========================================
// 实现者: LocationRepository（rusqlite）
pub trait LocationStore {
    /// 读取组内全部位置
    fn get_all(&self, group_id: &str) -> RepositoryResult<Vec<Location>>;

    /// 创建位置，返回新位置
    fn create(&self, group_id: &str, data: LocationCreate) -> RepositoryResult<Location>;

    /// 从根到指定位置的完整层级（含自身）
    fn path_for(&self, group_id: &str, location_id: &str) -> RepositoryResult<Vec<Location>>;
}

// ==========================================
// LabelStore Trait
// ==========================================
// 实现者: LabelRepository（rusqlite）
pub trait LabelStore {
    fn get_all(&self, group_id: &str) -> RepositoryResult<Vec<Label>>;

    fn create(&self, group_id: &str, data: LabelCreate) -> RepositoryResult<Label>;
}

// ==========================================
// ItemStore Trait
// ==========================================
// 实现者: ItemRepository（rusqlite）
pub trait ItemStore {
    /// 组内是否已存在该导入引用
    fn check_ref(&self, group_id: &str, import_ref: &str) -> RepositoryResult<bool>;

    /// 第一步写入: 建立物品身份与关联，返回新物品 id
    fn create_draft(&self, group_id: &str, draft: ItemDraft) -> RepositoryResult<String>;

    /// 第二步写入: 回填其余明细（覆盖写自定义字段）
    fn finalize_details(
        &self,
        group_id: &str,
        item_id: &str,
        details: ItemDetails,
    ) -> RepositoryResult<Item>;

    /// 组内最大资产编号（无物品时为 0）
    fn get_highest_asset_id(&self, group_id: &str) -> RepositoryResult<AssetId>;

    /// 组内资产编号为 0 的物品（按创建时间升序）
    fn get_all_zero_asset_id(&self, group_id: &str) -> RepositoryResult<Vec<ItemSummary>>;

    fn set_asset_id(&self, group_id: &str, item_id: &str, asset_id: AssetId)
        -> RepositoryResult<()>;

    /// 组内全部物品（按创建时间升序）
    fn get_all(&self, group_id: &str) -> RepositoryResult<Vec<Item>>;

    /// 组内没有导入引用的物品 id（按创建时间升序）
    fn get_all_zero_import_ref(&self, group_id: &str) -> RepositoryResult<Vec<String>>;

    fn set_import_ref(&self, group_id: &str, item_id: &str, import_ref: &str)
        -> RepositoryResult<()>;
}
