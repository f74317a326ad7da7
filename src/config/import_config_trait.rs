// ==========================================
// 家庭物品管理系统 - 导入导出配置读取 Trait
// ==========================================
// 职责: 定义导入/导出所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use std::error::Error;

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
pub trait ImportConfigReader: Send + Sync {
    /// 导入时是否自动递增资产编号
    ///
    /// # 默认值
    /// - true
    fn auto_increment_asset_id(&self) -> Result<bool, Box<dyn Error>>;

    /// 导出分隔符
    ///
    /// # 返回
    /// - b'\t' 或 b','
    ///
    /// # 默认值
    /// - 制表符
    fn export_separator(&self) -> Result<u8, Box<dyn Error>>;
}
