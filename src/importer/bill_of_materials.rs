// ==========================================
// 家庭物品管理系统 - 物料清单 (BOM) 导出
// ==========================================
// 输出: TSV，每个物品一行
// 合计: Total Price = Price × Quantity
// ==========================================

use crate::domain::Item;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::value_parsers::format_float;
use crate::repository::ItemStore;
use chrono::NaiveDate;
use csv::WriterBuilder;
use serde::{Serialize, Serializer};
use tracing::{info, instrument};

/// 物料清单行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillOfMaterialsEntry {
    #[serde(rename = "Purchase Date")]
    pub purchase_date: Option<NaiveDate>,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Manufacturer")]
    pub manufacturer: String,
    #[serde(rename = "Serial Number")]
    pub serial_number: String,
    #[serde(rename = "Model Number")]
    pub model_number: String,
    #[serde(rename = "Quantity")]
    pub quantity: i64,
    #[serde(rename = "Price", serialize_with = "serialize_float")]
    pub price: f64,
    #[serde(rename = "Total Price", serialize_with = "serialize_float")]
    pub total_price: f64,
}

impl From<&Item> for BillOfMaterialsEntry {
    fn from(item: &Item) -> Self {
        Self {
            purchase_date: item.purchase_time,
            name: item.name.clone(),
            description: item.description.clone(),
            manufacturer: item.manufacturer.clone(),
            serial_number: item.serial_number.clone(),
            model_number: item.model_number.clone(),
            quantity: item.quantity,
            price: item.purchase_price,
            total_price: item.purchase_price * item.quantity as f64,
        }
    }
}

fn serialize_float<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_float(*value))
}

/// 生成组内物品的物料清单（TSV 字节）
#[instrument(skip(store), fields(group_id = %group_id))]
pub fn bill_of_materials_tsv<I: ItemStore + ?Sized>(
    store: &I,
    group_id: &str,
) -> ImportResult<Vec<u8>> {
    let items = store.get_all(group_id)?;
    let entries: Vec<BillOfMaterialsEntry> = items.iter().map(BillOfMaterialsEntry::from).collect();

    let bytes = write_entries(&entries)?;
    info!(entries = entries.len(), "物料清单生成完成");
    Ok(bytes)
}

/// 序列化物料清单行（空列表只输出表头）
pub fn write_entries(entries: &[BillOfMaterialsEntry]) -> ImportResult<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record(BOM_HEADERS)
        .map_err(|e| ImportError::CsvWriteError(e.to_string()))?;
    for entry in entries {
        writer
            .serialize(entry)
            .map_err(|e| ImportError::CsvWriteError(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| ImportError::CsvWriteError(e.to_string()))
}

/// 表头（与 BillOfMaterialsEntry 字段顺序一致）
pub const BOM_HEADERS: [&str; 9] = [
    "Purchase Date",
    "Name",
    "Description",
    "Manufacturer",
    "Serial Number",
    "Model Number",
    "Quantity",
    "Price",
    "Total Price",
];
