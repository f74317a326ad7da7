// ==========================================
// 家庭物品管理系统 - 物品导出
// ==========================================
// 流程: 读取组内全部物品 → 解析位置层级/标签名/自定义字段 → Sheet
// 顺序: 物品按创建时间升序，标签按协作者返回顺序
// ==========================================

use crate::domain::{Item, LabelList, LocationPath};
use crate::importer::error::ImportResult;
use crate::importer::row_schema::{RowField, RowRecord};
use crate::importer::sheet::Sheet;
use crate::repository::{ItemStore, LocationStore};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

// ==========================================
// ItemExporter - 物品导出器
// ==========================================
pub struct ItemExporter<L, I>
where
    L: LocationStore,
    I: ItemStore,
{
    locations: Arc<L>,
    items: Arc<I>,
}

impl<L, I> ItemExporter<L, I>
where
    L: LocationStore,
    I: ItemStore,
{
    pub fn new(locations: Arc<L>, items: Arc<I>) -> Self {
        Self { locations, items }
    }

    /// 导出组内物品为行记录
    #[instrument(skip(self), fields(group_id = %group_id))]
    pub fn export_rows(&self, group_id: &str) -> ImportResult<Vec<RowRecord>> {
        let items = self.items.get_all(group_id)?;

        // 同一位置只解析一次
        let mut paths: HashMap<String, LocationPath> = HashMap::new();
        let mut rows = Vec::with_capacity(items.len());

        for item in items {
            let location = match item.location_id.as_deref() {
                Some(location_id) => {
                    if !paths.contains_key(location_id) {
                        let chain = self.locations.path_for(group_id, location_id)?;
                        let path = LocationPath::new(chain.into_iter().map(|l| l.name).collect());
                        paths.insert(location_id.to_string(), path);
                    }
                    paths.get(location_id).cloned().unwrap_or_default()
                }
                None => LocationPath::default(),
            };
            rows.push(row_from_item(item, location));
        }

        info!(rows = rows.len(), "物品导出完成");
        Ok(rows)
    }

    /// 导出组内物品为表格
    pub fn export_sheet(&self, group_id: &str) -> ImportResult<Sheet> {
        Ok(Sheet::from_rows(self.export_rows(group_id)?))
    }
}

fn row_from_item(item: Item, location: LocationPath) -> RowRecord {
    RowRecord {
        import_ref: item.import_ref,
        location,
        labels: LabelList::new(item.labels.into_iter().map(|l| l.name).collect()),
        asset_id: item.asset_id,
        archived: item.archived,
        name: item.name,
        quantity: item.quantity,
        description: item.description,
        insured: item.insured,
        notes: item.notes,
        purchase_price: item.purchase_price,
        purchase_from: item.purchase_from,
        purchase_time: item.purchase_time,
        manufacturer: item.manufacturer,
        model_number: item.model_number,
        serial_number: item.serial_number,
        lifetime_warranty: item.lifetime_warranty,
        warranty_expires: item.warranty_expires,
        warranty_details: item.warranty_details,
        sold_to: item.sold_to,
        sold_price: item.sold_price,
        sold_time: item.sold_time,
        sold_notes: item.sold_notes,
        fields: item
            .fields
            .into_iter()
            .map(|f| RowField {
                name: f.name,
                value: f.text_value,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AssetId;
    use crate::importer::reconciler::ItemImporter;
    use crate::importer::test_support::MemoryInventory;

    const GROUP: &str = "group-1";

    fn sample_rows() -> Vec<RowRecord> {
        vec![
            RowRecord {
                import_ref: "r1".to_string(),
                location: LocationPath::parse("Home / Garage"),
                labels: LabelList::parse("Tools; Power"),
                name: "Drill".to_string(),
                quantity: 1,
                fields: vec![RowField {
                    name: "Voltage".to_string(),
                    value: "18V".to_string(),
                }],
                ..Default::default()
            },
            RowRecord {
                import_ref: "r2".to_string(),
                location: LocationPath::parse("Home"),
                name: "Lamp".to_string(),
                quantity: 2,
                fields: vec![RowField {
                    name: "Color".to_string(),
                    value: "White".to_string(),
                }],
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_export_resolves_location_path_and_labels() {
        let inventory = Arc::new(MemoryInventory::new());
        ItemImporter::new(inventory.clone(), inventory.clone(), inventory.clone(), true)
            .import(GROUP, &sample_rows())
            .unwrap();

        let rows = ItemExporter::new(inventory.clone(), inventory.clone())
            .export_rows(GROUP)
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].location.to_string(), "Home / Garage");
        assert_eq!(rows[0].labels.to_string(), "Tools; Power");
        assert_eq!(rows[0].asset_id, AssetId::new(1));
        assert_eq!(rows[1].location.to_string(), "Home");
        assert_eq!(rows[1].field("Color"), Some("White"));
    }

    #[test]
    fn test_export_sheet_headers_include_sorted_custom_fields() {
        let inventory = Arc::new(MemoryInventory::new());
        ItemImporter::new(inventory.clone(), inventory.clone(), inventory.clone(), true)
            .import(GROUP, &sample_rows())
            .unwrap();

        let sheet = ItemExporter::new(inventory.clone(), inventory.clone())
            .export_sheet(GROUP)
            .unwrap();

        let headers = sheet.headers();
        assert_eq!(&headers[headers.len() - 2..], &["HB.field.Color", "HB.field.Voltage"]);
    }

    #[test]
    fn test_export_then_import_into_new_group() {
        let inventory = Arc::new(MemoryInventory::new());
        let importer =
            ItemImporter::new(inventory.clone(), inventory.clone(), inventory.clone(), false);
        importer.import(GROUP, &sample_rows()).unwrap();

        let exporter = ItemExporter::new(inventory.clone(), inventory.clone());
        let bytes = exporter.export_sheet(GROUP).unwrap().write(b'\t').unwrap();
        let decoded = Sheet::read(&bytes).unwrap();

        importer.import("group-2", &decoded.rows).unwrap();
        let copied = exporter.export_rows("group-2").unwrap();
        let original = exporter.export_rows(GROUP).unwrap();

        assert_eq!(copied, original);
    }

    #[test]
    fn test_export_empty_group() {
        let inventory = Arc::new(MemoryInventory::new());
        let sheet = ItemExporter::new(inventory.clone(), inventory.clone())
            .export_sheet(GROUP)
            .unwrap();
        assert!(sheet.rows.is_empty());
        assert_eq!(sheet.to_records().len(), 1);
    }
}
