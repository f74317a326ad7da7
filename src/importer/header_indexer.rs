// ==========================================
// 家庭物品管理系统 - 表头索引
// ==========================================
// HB.*        → 可识别列（列名 → 列号）
// HB.field.*  → 自定义字段列（保持原顺序，后缀为字段显示名）
// 其余列忽略
// 校验顺序: 先校验必需表头，再校验是否存在可识别表头
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use std::collections::HashMap;

/// 可识别列前缀
pub const HB_PREFIX: &str = "HB.";

/// 自定义字段列前缀
pub const HB_FIELD_PREFIX: &str = "HB.field.";

/// 必需表头
pub const REQUIRED_HEADERS: [&str; 2] = ["HB.location", "HB.name"];

/// 自定义字段列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomColumn {
    pub index: usize,
    pub name: String,
}

// ==========================================
// HeaderIndex - 表头索引结果
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    columns: HashMap<String, usize>,
    custom: Vec<CustomColumn>,
}

impl HeaderIndex {
    /// 解析表头行
    ///
    /// # 返回
    /// - Ok(HeaderIndex): 校验通过
    /// - Err(MissingRequiredHeaders): 缺少 HB.location 或 HB.name
    /// - Err(NoRecognizedHeaders): 无任何 HB.* 列
    pub fn parse(headers: &[String]) -> ImportResult<Self> {
        let mut columns = HashMap::new();
        let mut custom = Vec::new();

        for (col, header) in headers.iter().enumerate() {
            if let Some(name) = header.strip_prefix(HB_FIELD_PREFIX) {
                custom.push(CustomColumn {
                    index: col,
                    name: name.to_string(),
                });
            }

            if header.starts_with(HB_PREFIX) {
                columns.insert(header.clone(), col);
            }
        }

        if REQUIRED_HEADERS.iter().any(|h| !columns.contains_key(*h)) {
            return Err(ImportError::MissingRequiredHeaders);
        }

        // 必需表头检查在前，此分支实际只在必需表头集合为空时可达
        if columns.is_empty() {
            return Err(ImportError::NoRecognizedHeaders);
        }

        Ok(Self { columns, custom })
    }

    /// 按列名查找列号
    pub fn column(&self, header: &str) -> Option<usize> {
        self.columns.get(header).copied()
    }

    pub fn custom_columns(&self) -> &[CustomColumn] {
        &self.custom
    }
}
