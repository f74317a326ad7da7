// ==========================================
// 家庭物品管理系统 - 位置领域模型
// ==========================================
// 位置为树形结构（parent_id 指向上级）
// LocationPath 仅用于展示/导入完整层级，不作为身份标识
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 路径分隔符（解析）
pub const LOCATION_PATH_DELIMITER: &str = "/";

/// 路径分隔符（输出）
const LOCATION_PATH_JOINER: &str = " / ";

// ==========================================
// Location - 位置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
}

/// 新建位置请求
#[derive(Debug, Clone, Default)]
pub struct LocationCreate {
    pub name: String,
    pub description: String,
    pub parent_id: Option<String>,
}

// ==========================================
// LocationPath - 从根到叶的位置层级
// ==========================================
// 例: "Home / Bedroom / Desk" => ["Home", "Bedroom", "Desk"]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocationPath(Vec<String>);

impl LocationPath {
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// 解析路径字符串（按 `/` 切分，去空白，丢弃空段）
    pub fn parse(s: &str) -> Self {
        Self(split_separated(s, LOCATION_PATH_DELIMITER))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 身份键（各段以 `/` 连接，不带空格）
    ///
    /// 导入时用作 名称→id 缓存的键。
    pub fn key(&self) -> String {
        self.0.join(LOCATION_PATH_DELIMITER)
    }

    /// 前 n 段的身份键
    pub fn prefix_key(&self, n: usize) -> String {
        self.0[..n.min(self.0.len())].join(LOCATION_PATH_DELIMITER)
    }
}

impl fmt::Display for LocationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(LOCATION_PATH_JOINER))
    }
}

impl From<Vec<&str>> for LocationPath {
    fn from(segments: Vec<&str>) -> Self {
        Self(segments.into_iter().map(|s| s.to_string()).collect())
    }
}

/// 按分隔符切分，去除两侧空白并丢弃空项
pub fn split_separated(s: &str, sep: &str) -> Vec<String> {
    s.split(sep)
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_string())
        .collect()
}
