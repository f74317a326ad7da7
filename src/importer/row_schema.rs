// ==========================================
// 家庭物品管理系统 - 行记录与固定列模式
// ==========================================
// 固定列模式为声明式列表: {表头, 类型, 读取器, 写入器}
// 编码与解码共用同一份列表，列表顺序即导出列顺序
// ==========================================

use crate::domain::{AssetId, LabelList, LocationPath};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

// ==========================================
// RowField - 自定义字段
// ==========================================
// 空值字段不会出现在 RowRecord.fields 中
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowField {
    pub name: String,
    pub value: String,
}

// ==========================================
// RowRecord - 表格中的一行物品
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RowRecord {
    pub import_ref: String,
    pub location: LocationPath,
    pub labels: LabelList,
    pub asset_id: AssetId,
    pub archived: bool,

    pub name: String,
    pub quantity: i64,
    pub description: String,
    pub insured: bool,
    pub notes: String,

    pub purchase_price: f64,
    pub purchase_from: String,
    pub purchase_time: Option<NaiveDate>,

    pub manufacturer: String,
    pub model_number: String,
    pub serial_number: String,

    pub lifetime_warranty: bool,
    pub warranty_expires: Option<NaiveDate>,
    pub warranty_details: String,

    pub sold_to: String,
    pub sold_price: f64,
    pub sold_time: Option<NaiveDate>,
    pub sold_notes: String,

    pub fields: Vec<RowField>,
}

impl RowRecord {
    /// 按名称查找自定义字段值
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

// ==========================================
// ColumnKind - 列类型标记
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Int,
    Bool,
    Float,
    Date,
    AssetId,
    LocationPath,
    LabelList,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Text => "string",
            ColumnKind::Int => "int",
            ColumnKind::Bool => "bool",
            ColumnKind::Float => "float",
            ColumnKind::Date => "date",
            ColumnKind::AssetId => "asset_id",
            ColumnKind::LocationPath => "location_path",
            ColumnKind::LabelList => "label_list",
        };
        f.write_str(name)
    }
}

// ==========================================
// ColumnAccess - 按类型区分的读写器
// ==========================================
#[derive(Clone, Copy)]
pub enum ColumnAccess {
    Text(fn(&RowRecord) -> &str, fn(&mut RowRecord, String)),
    Int(fn(&RowRecord) -> i64, fn(&mut RowRecord, i64)),
    Bool(fn(&RowRecord) -> bool, fn(&mut RowRecord, bool)),
    Float(fn(&RowRecord) -> f64, fn(&mut RowRecord, f64)),
    Date(
        fn(&RowRecord) -> Option<NaiveDate>,
        fn(&mut RowRecord, Option<NaiveDate>),
    ),
    AssetId(fn(&RowRecord) -> AssetId, fn(&mut RowRecord, AssetId)),
    LocationPath(fn(&RowRecord) -> &LocationPath, fn(&mut RowRecord, LocationPath)),
    LabelList(fn(&RowRecord) -> &LabelList, fn(&mut RowRecord, LabelList)),
}

impl ColumnAccess {
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnAccess::Text(..) => ColumnKind::Text,
            ColumnAccess::Int(..) => ColumnKind::Int,
            ColumnAccess::Bool(..) => ColumnKind::Bool,
            ColumnAccess::Float(..) => ColumnKind::Float,
            ColumnAccess::Date(..) => ColumnKind::Date,
            ColumnAccess::AssetId(..) => ColumnKind::AssetId,
            ColumnAccess::LocationPath(..) => ColumnKind::LocationPath,
            ColumnAccess::LabelList(..) => ColumnKind::LabelList,
        }
    }
}

/// 固定列描述
#[derive(Clone, Copy)]
pub struct ColumnSpec {
    pub header: &'static str,
    pub access: ColumnAccess,
}

impl ColumnSpec {
    pub fn kind(&self) -> ColumnKind {
        self.access.kind()
    }
}

impl fmt::Debug for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("header", &self.header)
            .field("kind", &self.kind())
            .finish()
    }
}

static ROW_SCHEMA: OnceLock<Vec<ColumnSpec>> = OnceLock::new();

/// 固定列模式（顺序即规范导出顺序）
pub fn row_schema() -> &'static [ColumnSpec] {
    ROW_SCHEMA.get_or_init(build_row_schema)
}

/// 固定列表头（按模式顺序）
pub fn fixed_headers() -> impl Iterator<Item = &'static str> {
    row_schema().iter().map(|spec| spec.header)
}

fn text(
    header: &'static str,
    get: fn(&RowRecord) -> &str,
    set: fn(&mut RowRecord, String),
) -> ColumnSpec {
    ColumnSpec {
        header,
        access: ColumnAccess::Text(get, set),
    }
}

fn int(
    header: &'static str,
    get: fn(&RowRecord) -> i64,
    set: fn(&mut RowRecord, i64),
) -> ColumnSpec {
    ColumnSpec {
        header,
        access: ColumnAccess::Int(get, set),
    }
}

fn boolean(
    header: &'static str,
    get: fn(&RowRecord) -> bool,
    set: fn(&mut RowRecord, bool),
) -> ColumnSpec {
    ColumnSpec {
        header,
        access: ColumnAccess::Bool(get, set),
    }
}

fn float(
    header: &'static str,
    get: fn(&RowRecord) -> f64,
    set: fn(&mut RowRecord, f64),
) -> ColumnSpec {
    ColumnSpec {
        header,
        access: ColumnAccess::Float(get, set),
    }
}

fn date(
    header: &'static str,
    get: fn(&RowRecord) -> Option<NaiveDate>,
    set: fn(&mut RowRecord, Option<NaiveDate>),
) -> ColumnSpec {
    ColumnSpec {
        header,
        access: ColumnAccess::Date(get, set),
    }
}

fn build_row_schema() -> Vec<ColumnSpec> {
    vec![
        text("HB.import_ref", |r| r.import_ref.as_str(), |r, v| r.import_ref = v),
        ColumnSpec {
            header: "HB.location",
            access: ColumnAccess::LocationPath(|r| &r.location, |r, v| r.location = v),
        },
        ColumnSpec {
            header: "HB.labels",
            access: ColumnAccess::LabelList(|r| &r.labels, |r, v| r.labels = v),
        },
        ColumnSpec {
            header: "HB.asset_id",
            access: ColumnAccess::AssetId(|r| r.asset_id, |r, v| r.asset_id = v),
        },
        boolean("HB.archived", |r| r.archived, |r, v| r.archived = v),
        // ===== 基本信息 =====
        text("HB.name", |r| r.name.as_str(), |r, v| r.name = v),
        int("HB.quantity", |r| r.quantity, |r, v| r.quantity = v),
        text("HB.description", |r| r.description.as_str(), |r, v| r.description = v),
        boolean("HB.insured", |r| r.insured, |r, v| r.insured = v),
        text("HB.notes", |r| r.notes.as_str(), |r, v| r.notes = v),
        // ===== 购买 =====
        float("HB.purchase_price", |r| r.purchase_price, |r, v| r.purchase_price = v),
        text("HB.purchase_from", |r| r.purchase_from.as_str(), |r, v| r.purchase_from = v),
        date("HB.purchase_time", |r| r.purchase_time, |r, v| r.purchase_time = v),
        // ===== 识别信息 =====
        text("HB.manufacturer", |r| r.manufacturer.as_str(), |r, v| r.manufacturer = v),
        text("HB.model_number", |r| r.model_number.as_str(), |r, v| r.model_number = v),
        text("HB.serial_number", |r| r.serial_number.as_str(), |r, v| r.serial_number = v),
        // ===== 保修 =====
        boolean(
            "HB.lifetime_warranty",
            |r| r.lifetime_warranty,
            |r, v| r.lifetime_warranty = v,
        ),
        date("HB.warranty_expires", |r| r.warranty_expires, |r, v| r.warranty_expires = v),
        text(
            "HB.warranty_details",
            |r| r.warranty_details.as_str(),
            |r, v| r.warranty_details = v,
        ),
        // ===== 出售 =====
        text("HB.sold_to", |r| r.sold_to.as_str(), |r, v| r.sold_to = v),
        float("HB.sold_price", |r| r.sold_price, |r, v| r.sold_price = v),
        date("HB.sold_time", |r| r.sold_time, |r, v| r.sold_time = v),
        text("HB.sold_notes", |r| r.sold_notes.as_str(), |r, v| r.sold_notes = v),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_order_is_canonical() {
        let headers: Vec<&str> = fixed_headers().collect();
        assert_eq!(
            headers,
            vec![
                "HB.import_ref",
                "HB.location",
                "HB.labels",
                "HB.asset_id",
                "HB.archived",
                "HB.name",
                "HB.quantity",
                "HB.description",
                "HB.insured",
                "HB.notes",
                "HB.purchase_price",
                "HB.purchase_from",
                "HB.purchase_time",
                "HB.manufacturer",
                "HB.model_number",
                "HB.serial_number",
                "HB.lifetime_warranty",
                "HB.warranty_expires",
                "HB.warranty_details",
                "HB.sold_to",
                "HB.sold_price",
                "HB.sold_time",
                "HB.sold_notes",
            ]
        );
    }

    #[test]
    fn test_schema_kinds() {
        let kind_of = |header: &str| {
            row_schema()
                .iter()
                .find(|spec| spec.header == header)
                .map(|spec| spec.kind())
        };
        assert_eq!(kind_of("HB.asset_id"), Some(ColumnKind::AssetId));
        assert_eq!(kind_of("HB.quantity"), Some(ColumnKind::Int));
        assert_eq!(kind_of("HB.sold_time"), Some(ColumnKind::Date));
        assert_eq!(kind_of("HB.labels"), Some(ColumnKind::LabelList));
        assert_eq!(kind_of("HB.field.Color"), None);
    }

    #[test]
    fn test_accessors_write_and_read_back() {
        let mut row = RowRecord::default();
        for spec in row_schema() {
            if let ColumnAccess::Text(get, set) = spec.access {
                set(&mut row, spec.header.to_string());
                assert_eq!(get(&row), spec.header);
            }
        }
        assert_eq!(row.name, "HB.name");
        assert_eq!(row.sold_notes, "HB.sold_notes");
    }
}
