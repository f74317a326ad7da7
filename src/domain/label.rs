// ==========================================
// 家庭物品管理系统 - 标签领域模型
// ==========================================

use crate::domain::location::split_separated;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 标签列表分隔符
pub const LABEL_LIST_DELIMITER: &str = ";";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    pub name: String,
}

/// 新建标签请求
#[derive(Debug, Clone, Default)]
pub struct LabelCreate {
    pub name: String,
    pub description: String,
}

// ==========================================
// LabelList - 标签名称列表
// ==========================================
// 例: "Important; Work" => ["Important", "Work"]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabelList(Vec<String>);

impl LabelList {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn parse(s: &str) -> Self {
        Self(split_separated(s, LABEL_LIST_DELIMITER))
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LabelList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("; "))
    }
}

impl From<Vec<&str>> for LabelList {
    fn from(names: Vec<&str>) -> Self {
        Self(names.into_iter().map(|s| s.to_string()).collect())
    }
}
