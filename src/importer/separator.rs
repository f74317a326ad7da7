// ==========================================
// 家庭物品管理系统 - 分隔符检测与分词
// ==========================================
// 支持: 逗号 (,) 与制表符 (\t)
// 规则: 只看首行（第一个 \n 之前）
//   - 两者都不存在 → 错误
//   - 制表符位置 > 逗号位置 → 制表符
//   - 其余情况（含无制表符）→ 逗号
// 注意: 按位置而非按出现与否判定，首行中带引号字段内的逗号可能导致误判
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use tracing::debug;

/// 检测分隔符
pub fn detect_separator(data: &[u8]) -> ImportResult<u8> {
    let first_row = data.split(|b| *b == b'\n').next().unwrap_or(&[]);

    let comma = first_row.iter().position(|b| *b == b',');
    let tab = first_row.iter().position(|b| *b == b'\t');

    // 缺失记为 -1，与位置直接比较
    let comma_idx = comma.map(|i| i as isize).unwrap_or(-1);
    let tab_idx = tab.map(|i| i as isize).unwrap_or(-1);

    match (comma, tab) {
        (None, None) => Err(ImportError::SeparatorUndetermined),
        _ if tab_idx > comma_idx => Ok(b'\t'),
        _ => Ok(b','),
    }
}

/// 读取原始表格为二维字符串数组（自动检测分隔符）
///
/// 行宽不做校验，由 Sheet 解码阶段给出带行号的错误。
pub fn read_raw_records(data: &[u8]) -> ImportResult<Vec<Vec<String>>> {
    let separator = detect_separator(data)?;
    debug!(separator = %(separator as char).escape_default(), "分隔符检测完成");

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(separator)
        .flexible(true)
        .from_reader(data);

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push(record.iter().map(|v| v.to_string()).collect());
    }

    Ok(records)
}
