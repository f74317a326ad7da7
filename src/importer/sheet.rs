// ==========================================
// 家庭物品管理系统 - 表格模型 (Sheet)
// ==========================================
// 导入: 原始字节 → 分隔符检测 → 分词 → 表头索引 → 逐行解码
// 导出: 行记录 → 表头（固定列 + 排序后的自定义列）→ 二维数组 → 字节
// 约定:
// - 第一行为表头，至少 1 行数据
// - 所有行列数必须与表头一致
// - 自定义字段取值为空时不进入 RowRecord.fields
// ==========================================

use crate::domain::{AssetId, LabelList, LocationPath};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::header_indexer::{HeaderIndex, HB_FIELD_PREFIX};
use crate::importer::row_schema::{
    fixed_headers, row_schema, ColumnAccess, ColumnSpec, RowField, RowRecord,
};
use crate::importer::separator::read_raw_records;
use crate::importer::value_parsers::{
    format_bool, format_date, format_float, parse_bool, parse_date, parse_float, parse_int,
};
use csv::WriterBuilder;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

// ==========================================
// Sheet
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    headers: Vec<String>,
    pub rows: Vec<RowRecord>,
}

impl Sheet {
    /// 从原始字节读取（自动检测分隔符）
    pub fn read(data: &[u8]) -> ImportResult<Self> {
        let records = read_raw_records(data)?;
        Self::decode(records)
    }

    /// 从分词结果解码
    pub fn decode(records: Vec<Vec<String>>) -> ImportResult<Self> {
        if records.len() < 2 {
            return Err(ImportError::NotEnoughRows(records.len()));
        }

        let mut records = records.into_iter();
        let headers = records.next().unwrap_or_default();
        let index = HeaderIndex::parse(&headers)?;

        let mut rows = Vec::with_capacity(records.len());
        for (i, cells) in records.enumerate() {
            // 行号从 1 开始（不含表头）
            let row_number = i + 1;
            if cells.len() != headers.len() {
                return Err(ImportError::RowWidthMismatch {
                    row: row_number,
                    found: cells.len(),
                    expected: headers.len(),
                });
            }
            rows.push(decode_row(&index, &cells)?);
        }

        debug!(rows = rows.len(), headers = headers.len(), "表格解码完成");
        Ok(Self { headers, rows })
    }

    /// 由行记录构造导出表格
    ///
    /// 表头 = 固定列（模式顺序）+ `HB.field.<name>`（名称字典序）
    pub fn from_rows(rows: Vec<RowRecord>) -> Self {
        let custom_names: BTreeSet<&str> = rows
            .iter()
            .flat_map(|row| row.fields.iter().map(|f| f.name.as_str()))
            .collect();

        let mut headers: Vec<String> = fixed_headers().map(|h| h.to_string()).collect();
        headers.extend(
            custom_names
                .iter()
                .map(|name| format!("{}{}", HB_FIELD_PREFIX, name)),
        );

        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// 编码为二维字符串数组（首行为表头）
    pub fn to_records(&self) -> Vec<Vec<String>> {
        let positions: HashMap<&str, usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.as_str(), i))
            .collect();

        let mut records = Vec::with_capacity(self.rows.len() + 1);
        records.push(self.headers.clone());

        for row in &self.rows {
            let mut cells = vec![String::new(); self.headers.len()];

            for spec in row_schema() {
                if let Some(&col) = positions.get(spec.header) {
                    cells[col] = encode_cell(spec, row);
                }
            }

            for field in &row.fields {
                let header = format!("{}{}", HB_FIELD_PREFIX, field.name);
                if let Some(&col) = positions.get(header.as_str()) {
                    cells[col] = field.value.clone();
                }
            }

            records.push(cells);
        }

        records
    }

    /// 序列化为字节（指定分隔符）
    pub fn write(&self, separator: u8) -> ImportResult<Vec<u8>> {
        let mut writer = WriterBuilder::new()
            .delimiter(separator)
            .from_writer(Vec::new());

        for record in self.to_records() {
            writer
                .write_record(&record)
                .map_err(|e| ImportError::CsvWriteError(e.to_string()))?;
        }

        writer
            .into_inner()
            .map_err(|e| ImportError::CsvWriteError(e.to_string()))
    }
}

/// 解码单行
fn decode_row(index: &HeaderIndex, cells: &[String]) -> ImportResult<RowRecord> {
    let mut row = RowRecord::default();

    for spec in row_schema() {
        // 缺少的固定列保持零值
        let Some(col) = index.column(spec.header) else {
            continue;
        };
        let raw = cells[col].as_str();
        decode_cell(spec, raw, &mut row)?;
    }

    for custom in index.custom_columns() {
        let value = &cells[custom.index];
        if value.is_empty() {
            continue;
        }
        row.fields.push(RowField {
            name: custom.name.clone(),
            value: value.clone(),
        });
    }

    Ok(row)
}

/// 按列类型解析单元格并写入行记录
fn decode_cell(spec: &ColumnSpec, raw: &str, row: &mut RowRecord) -> ImportResult<()> {
    match spec.access {
        ColumnAccess::Text(_, set) => set(row, raw.to_string()),
        ColumnAccess::Int(_, set) => set(row, parse_int(raw)),
        ColumnAccess::Bool(_, set) => set(row, parse_bool(raw)),
        ColumnAccess::Float(_, set) => set(row, parse_float(raw)),
        ColumnAccess::Date(_, set) => set(row, parse_date(raw)),
        ColumnAccess::AssetId(_, set) => {
            let asset_id =
                AssetId::parse_lenient(raw).map_err(|_| ImportError::ValueConversion {
                    value: raw.to_string(),
                    target: spec.kind().to_string(),
                })?;
            set(row, asset_id)
        }
        ColumnAccess::LocationPath(_, set) => set(row, LocationPath::parse(raw)),
        ColumnAccess::LabelList(_, set) => set(row, LabelList::parse(raw)),
    }

    debug!(header = spec.header, kind = %spec.kind(), raw = raw, "单元格解析完成");
    Ok(())
}

/// 按列类型格式化单元格
fn encode_cell(spec: &ColumnSpec, row: &RowRecord) -> String {
    match spec.access {
        ColumnAccess::Text(get, _) => get(row).to_string(),
        ColumnAccess::Int(get, _) => get(row).to_string(),
        ColumnAccess::Bool(get, _) => format_bool(get(row)),
        ColumnAccess::Float(get, _) => format_float(get(row)),
        ColumnAccess::Date(get, _) => format_date(get(row)),
        ColumnAccess::AssetId(get, _) => get(row).to_string(),
        ColumnAccess::LocationPath(get, _) => get(row).to_string(),
        ColumnAccess::LabelList(get, _) => get(row).to_string(),
    }
}
