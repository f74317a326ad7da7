use serde::Serialize;

/// 行校验问题（仅提示，不阻断写入）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowViolation {
    /// 数据行号（从 1 开始，不含表头）
    pub row: usize,
    pub field: String,
    pub message: String,
}

// ==========================================
// ImportReport - 导入结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// 新建物品数
    pub created: usize,
    /// 因导入引用已存在而跳过的行数
    pub skipped: usize,
    pub violations: Vec<RowViolation>,
}

impl ImportReport {
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }
}
