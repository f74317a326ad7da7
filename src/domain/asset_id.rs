// ==========================================
// 家庭物品管理系统 - 资产编号 (AssetId)
// ==========================================
// 规范形式: 6 位补零，第 3 位后插入短横线 (000-123)
// 空值: 任意 <= 0 的整数，规范化为空字符串
// 解析: 去掉所有 `"` 与 `-` 后按整数解析
// ==========================================

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ==========================================
// AssetId - 组内递增的资产编号
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AssetId(i64);

impl AssetId {
    /// 空值哨兵（解析空字符串时返回）
    pub const NIL: AssetId = AssetId(-1);

    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// 是否为空值（<= 0）
    pub fn is_nil(&self) -> bool {
        self.0 <= 0
    }

    /// 下一个编号，已达 i64 上限时返回 None
    pub fn checked_next(&self) -> Option<AssetId> {
        self.0.checked_add(1).map(AssetId)
    }

    /// 严格解析
    ///
    /// # 返回
    /// - Some(AssetId): 解析成功
    /// - None: 去除引号/短横线后不是整数（包括空字符串）
    pub fn parse(s: &str) -> Option<AssetId> {
        Self::parse_bytes(s.as_bytes())
    }

    /// 严格解析（字节输入）
    pub fn parse_bytes(data: &[u8]) -> Option<AssetId> {
        let stripped = strip_decorations(data);
        stripped.parse::<i64>().ok().map(AssetId)
    }

    /// 宽松解析（反序列化/表格单元格路径）
    ///
    /// 空输入返回 `AssetId::NIL` 而不是错误。
    pub fn parse_lenient(s: &str) -> Result<AssetId, std::num::ParseIntError> {
        let stripped = strip_decorations(s.as_bytes());
        if stripped.is_empty() {
            return Ok(AssetId::NIL);
        }
        stripped.parse::<i64>().map(AssetId)
    }
}

fn strip_decorations(data: &[u8]) -> String {
    data.iter()
        .filter(|b| **b != b'"' && **b != b'-')
        .map(|b| *b as char)
        .collect()
}

impl From<i64> for AssetId {
    fn from(value: i64) -> Self {
        AssetId(value)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            return Ok(());
        }
        // 超过 6 位时前段变长，不截断
        let padded = format!("{:06}", self.0);
        let (head, tail) = padded.split_at(3);
        write!(f, "{}-{}", head, tail)
    }
}

impl Serialize for AssetId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct AssetIdVisitor;

impl<'de> Visitor<'de> for AssetIdVisitor {
    type Value = AssetId;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("资产编号字符串 (如 \"000-123\") 或整数")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<AssetId, E> {
        Ok(AssetId(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<AssetId, E> {
        i64::try_from(v)
            .map(AssetId)
            .map_err(|_| E::custom(format!("资产编号超出范围: {}", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<AssetId, E> {
        AssetId::parse_lenient(v).map_err(|_| E::custom(format!("无效的资产编号: {}", v)))
    }

    fn visit_unit<E: de::Error>(self) -> Result<AssetId, E> {
        Ok(AssetId::NIL)
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<AssetId, D::Error> {
        deserializer.deserialize_any(AssetIdVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_canonical_form() {
        assert_eq!(AssetId::new(123).to_string(), "000-123");
        assert_eq!(AssetId::new(1).to_string(), "000-001");
        assert_eq!(AssetId::new(123456).to_string(), "123-456");
        assert_eq!(AssetId::new(123456789).to_string(), "123-456789");
    }

    #[test]
    fn test_display_nil_is_empty() {
        assert_eq!(AssetId::new(0).to_string(), "");
        assert_eq!(AssetId::NIL.to_string(), "");
        assert!(AssetId::new(0).is_nil());
        assert!(AssetId::new(-42).is_nil());
        assert!(!AssetId::new(1).is_nil());
    }

    #[test]
    fn test_parse() {
        assert_eq!(AssetId::parse("000-123"), Some(AssetId::new(123)));
        assert_eq!(AssetId::parse("\"000-123\""), Some(AssetId::new(123)));
        assert_eq!(AssetId::parse("123-456789"), Some(AssetId::new(123456789)));
        assert_eq!(AssetId::parse_bytes(b"001-000"), Some(AssetId::new(1000)));
        assert_eq!(AssetId::parse("abc"), None);
        // 严格解析对空串返回失败
        assert_eq!(AssetId::parse(""), None);
    }

    #[test]
    fn test_parse_lenient_empty_is_nil() {
        assert_eq!(AssetId::parse_lenient("").unwrap(), AssetId::NIL);
        assert_eq!(AssetId::parse_lenient("\"\"").unwrap(), AssetId::NIL);
        assert_eq!(AssetId::parse_lenient("000-007").unwrap(), AssetId::new(7));
        assert!(AssetId::parse_lenient("x-1").is_err());
    }

    #[test]
    fn test_checked_next() {
        assert_eq!(AssetId::new(0).checked_next(), Some(AssetId::new(1)));
        assert_eq!(AssetId::new(41).checked_next(), Some(AssetId::new(42)));
        assert_eq!(AssetId::new(i64::MAX).checked_next(), None);
    }

    #[test]
    fn test_json_round_trip() {
        let json = serde_json::to_string(&AssetId::new(123)).unwrap();
        assert_eq!(json, "\"000-123\"");

        let back: AssetId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AssetId::new(123));

        let from_int: AssetId = serde_json::from_str("42").unwrap();
        assert_eq!(from_int, AssetId::new(42));

        let from_empty: AssetId = serde_json::from_str("\"\"").unwrap();
        assert!(from_empty.is_nil());

        assert!(serde_json::from_str::<AssetId>("\"nope\"").is_err());
    }
}
