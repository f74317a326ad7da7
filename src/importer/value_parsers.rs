// ==========================================
// 家庭物品管理系统 - 单元格值解析/格式化
// ==========================================
// 整数/浮点/布尔: 宽松解析，失败取零值，本身不报错
// 日期: 空串 → 零日期；支持多种常见格式，均失败时取零日期
// ==========================================

use chrono::{DateTime, NaiveDate};

/// 日期输出格式
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const DATE_INPUT_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// 64 位整数解析
pub fn parse_int(s: &str) -> i64 {
    s.parse::<i64>().unwrap_or(0)
}

pub fn parse_float(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }
    s.parse::<f64>().unwrap_or(0.0)
}

/// 布尔解析，可接受: 1 t T TRUE true True / 0 f F FALSE false False
pub fn parse_bool(s: &str) -> bool {
    matches!(s, "1" | "t" | "T" | "TRUE" | "true" | "True")
}

/// 日期解析（只保留日期部分）
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }

    for format in DATE_INPUT_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
}

pub fn format_bool(value: bool) -> String {
    if value { "true" } else { "false" }.to_string()
}

/// 浮点格式化: 最短可往返的十进制表示，不使用科学计数法
pub fn format_float(value: f64) -> String {
    format!("{}", value)
}

/// 零日期输出为空串
pub fn format_date(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_defaults_to_zero() {
        assert_eq!(parse_int("42"), 42);
        assert_eq!(parse_int("-3"), -3);
        assert_eq!(parse_int(""), 0);
        assert_eq!(parse_int("4.5"), 0);
        assert_eq!(parse_int("abc"), 0);
    }

    #[test]
    fn test_parse_int_is_64_bit() {
        assert_eq!(parse_int("3000000000"), 3_000_000_000);
        assert_eq!(parse_int("9223372036854775807"), i64::MAX);
        assert_eq!(parse_int("9223372036854775808"), 0);
    }

    #[test]
    fn test_parse_float_defaults_to_zero() {
        assert_eq!(parse_float("12.5"), 12.5);
        assert_eq!(parse_float(""), 0.0);
        assert_eq!(parse_float("twelve"), 0.0);
    }

    #[test]
    fn test_parse_bool() {
        for v in ["1", "t", "T", "TRUE", "true", "True"] {
            assert!(parse_bool(v), "{} 应解析为 true", v);
        }
        for v in ["0", "f", "false", "", "yes", "tRuE"] {
            assert!(!parse_bool(v), "{} 应解析为 false", v);
        }
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2021, 3, 14);
        assert_eq!(parse_date("2021-03-14"), expected);
        assert_eq!(parse_date("03/14/2021"), expected);
        assert_eq!(parse_date("2021/03/14"), expected);
        assert_eq!(parse_date("2021-03-14T21:10:30+01:00"), expected);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("not a date"), None);
    }

    #[test]
    fn test_format_values() {
        assert_eq!(format_bool(true), "true");
        assert_eq!(format_bool(false), "false");
        assert_eq!(format_float(12.5), "12.5");
        assert_eq!(format_float(3.0), "3");
        assert_eq!(format_float(0.1), "0.1");
        assert_eq!(format_date(None), "");
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2020, 1, 2)), "2020-01-02");
    }
}
