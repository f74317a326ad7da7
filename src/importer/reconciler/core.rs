// ==========================================
// 家庭物品管理系统 - 导入对账引擎
// ==========================================
// 对账上下文（位置/标签缓存、资产编号计数器）每次调用新建
// 不跨组、不跨调用共享
// ==========================================

use crate::domain::{
    AssetId, ItemDetails, ItemDraft, ItemField, LabelCreate, Location, LocationCreate,
    LocationPath,
};
use crate::importer::error::{BatchAborted, ImportError, ImportResult};
use crate::importer::row_schema::RowRecord;
use crate::repository::{ItemStore, LabelStore, LocationStore};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use super::report::{ImportReport, RowViolation};

/// 单次导入的对账上下文
#[derive(Debug, Default)]
struct ReconcileContext {
    /// 位置路径键 → 位置 id
    location_ids: HashMap<String, String>,
    /// 标签名 → 标签 id
    label_ids: HashMap<String, String>,
    /// 最近一次分配的资产编号
    last_asset_id: AssetId,
}

/// 单行处理结果
enum RowOutcome {
    Created(String),
    Skipped,
}

// ==========================================
// ItemImporter - 导入对账引擎
// ==========================================
pub struct ItemImporter<L, B, I>
where
    L: LocationStore,
    B: LabelStore,
    I: ItemStore,
{
    locations: Arc<L>,
    labels: Arc<B>,
    items: Arc<I>,
    auto_increment_asset_id: bool,
}

impl<L, B, I> ItemImporter<L, B, I>
where
    L: LocationStore,
    B: LabelStore,
    I: ItemStore,
{
    /// 构造函数
    ///
    /// # 参数
    /// - `auto_increment_asset_id`: 开启后每个新建物品从组内最大编号顺延，覆盖行内编号
    pub fn new(
        locations: Arc<L>,
        labels: Arc<B>,
        items: Arc<I>,
        auto_increment_asset_id: bool,
    ) -> Self {
        Self {
            locations,
            labels,
            items,
            auto_increment_asset_id,
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 导入行记录
    ///
    /// # 返回
    /// - Ok(ImportReport): 全部行处理完成
    /// - Err(BatchAborted): 协作者调用失败，`completed` 为失败前已新建的物品数
    ///   （明细回填失败的那一行草稿已落库，但不计入）
    #[instrument(skip(self, rows), fields(group_id = %group_id, rows = rows.len()))]
    pub fn import(
        &self,
        group_id: &str,
        rows: &[RowRecord],
    ) -> Result<ImportReport, BatchAborted> {
        let violations = validate_rows(rows);
        for v in &violations {
            warn!(row = v.row, field = %v.field, "行校验未通过: {}", v.message);
        }

        let mut ctx = ReconcileContext::default();
        let mut report = ImportReport {
            violations,
            ..Default::default()
        };

        self.bootstrap(group_id, rows, &mut ctx).map_err(|e| {
            error!("引导阶段失败: {}", e);
            BatchAborted::new(0, e)
        })?;

        for (i, row) in rows.iter().enumerate() {
            match self.import_row(group_id, row, &mut ctx) {
                Ok(RowOutcome::Created(item_id)) => {
                    debug!(row = i + 1, item_id = %item_id, "物品已创建");
                    report.created += 1;
                }
                Ok(RowOutcome::Skipped) => {
                    debug!(row = i + 1, import_ref = %row.import_ref, "导入引用已存在，跳过");
                    report.skipped += 1;
                }
                Err(e) => {
                    error!(row = i + 1, created = report.created, "写入失败，终止剩余行: {}", e);
                    return Err(BatchAborted::new(report.created, e));
                }
            }
        }

        info!(
            created = report.created,
            skipped = report.skipped,
            violations = report.violations.len(),
            "导入完成"
        );
        Ok(report)
    }

    // ==========================================
    // 引导阶段
    // ==========================================

    fn bootstrap(
        &self,
        group_id: &str,
        rows: &[RowRecord],
        ctx: &mut ReconcileContext,
    ) -> ImportResult<()> {
        // 位置先于标签
        let existing = self.locations.get_all(group_id)?;
        ctx.location_ids = existing_location_keys(&existing);

        let mut created_locations = 0;
        for row in rows {
            created_locations += self.ensure_location_path(group_id, &row.location, ctx)?;
        }

        for label in self.labels.get_all(group_id)? {
            ctx.label_ids.entry(label.name).or_insert(label.id);
        }

        let mut created_labels = 0;
        for row in rows {
            for name in row.labels.names() {
                if ctx.label_ids.contains_key(name) {
                    continue;
                }
                let label = self.labels.create(
                    group_id,
                    LabelCreate {
                        name: name.clone(),
                        description: String::new(),
                    },
                )?;
                ctx.label_ids.insert(name.clone(), label.id);
                created_labels += 1;
            }
        }

        if self.auto_increment_asset_id {
            ctx.last_asset_id = self.items.get_highest_asset_id(group_id)?;
        }

        info!(
            created_locations,
            created_labels,
            asset_id_seed = ctx.last_asset_id.value(),
            "引导完成"
        );
        Ok(())
    }

    /// 按层级补建路径上缺失的位置（父级优先）
    ///
    /// # 返回
    /// 新建的位置数
    fn ensure_location_path(
        &self,
        group_id: &str,
        path: &LocationPath,
        ctx: &mut ReconcileContext,
    ) -> ImportResult<usize> {
        let mut created = 0;
        let mut parent_id: Option<String> = None;

        for (depth, segment) in path.segments().iter().enumerate() {
            let key = path.prefix_key(depth + 1);

            if let Some(id) = ctx.location_ids.get(&key) {
                parent_id = Some(id.clone());
                continue;
            }

            let location = self.locations.create(
                group_id,
                LocationCreate {
                    name: segment.clone(),
                    description: String::new(),
                    parent_id: parent_id.clone(),
                },
            )?;
            debug!(path = %key, location_id = %location.id, "位置已创建");

            ctx.location_ids.insert(key, location.id.clone());
            parent_id = Some(location.id);
            created += 1;
        }

        Ok(created)
    }

    // ==========================================
    // 逐行写入
    // ==========================================

    fn import_row(
        &self,
        group_id: &str,
        row: &RowRecord,
        ctx: &mut ReconcileContext,
    ) -> ImportResult<RowOutcome> {
        if !row.import_ref.is_empty() && self.items.check_ref(group_id, &row.import_ref)? {
            return Ok(RowOutcome::Skipped);
        }

        let location_id = if row.location.is_empty() {
            None
        } else {
            ctx.location_ids.get(&row.location.key()).cloned()
        };

        let label_ids = row
            .labels
            .names()
            .iter()
            .filter_map(|name| ctx.label_ids.get(name).cloned())
            .collect();

        let asset_id = if self.auto_increment_asset_id {
            let next = ctx
                .last_asset_id
                .checked_next()
                .ok_or(ImportError::AssetIdExhausted {
                    last: ctx.last_asset_id.value(),
                })?;
            ctx.last_asset_id = next;
            next
        } else if row.asset_id.is_nil() {
            AssetId::default()
        } else {
            row.asset_id
        };

        // 第一步: 建立身份与关联
        let draft = ItemDraft {
            import_ref: row.import_ref.clone(),
            name: row.name.clone(),
            description: row.description.clone(),
            location_id,
            label_ids,
            asset_id,
        };
        let item_id = self.items.create_draft(group_id, draft)?;

        // 第二步: 回填明细，不可与第一步合并
        self.items
            .finalize_details(group_id, &item_id, details_from_row(row))?;

        Ok(RowOutcome::Created(item_id))
    }
}

/// 行校验: 位置与名称不能为空
fn validate_rows(rows: &[RowRecord]) -> Vec<RowViolation> {
    let mut violations = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        if row.location.is_empty() {
            violations.push(RowViolation {
                row: i + 1,
                field: "HB.location".to_string(),
                message: "位置为空".to_string(),
            });
        }
        if row.name.trim().is_empty() {
            violations.push(RowViolation {
                row: i + 1,
                field: "HB.name".to_string(),
                message: "名称为空".to_string(),
            });
        }
    }

    violations
}

/// 已有位置的路径键 → id（同键先到先得）
fn existing_location_keys(locations: &[Location]) -> HashMap<String, String> {
    let by_id: HashMap<&str, &Location> =
        locations.iter().map(|l| (l.id.as_str(), l)).collect();

    let mut keys = HashMap::new();
    for location in locations {
        let mut segments = vec![location.name.trim().to_string()];
        let mut visited = HashSet::from([location.id.as_str()]);
        let mut parent = location.parent_id.as_deref();

        while let Some(parent_id) = parent {
            if !visited.insert(parent_id) {
                break;
            }
            let Some(p) = by_id.get(parent_id) else {
                break;
            };
            segments.push(p.name.trim().to_string());
            parent = p.parent_id.as_deref();
        }

        segments.reverse();
        keys.entry(LocationPath::new(segments).key())
            .or_insert_with(|| location.id.clone());
    }

    keys
}

fn details_from_row(row: &RowRecord) -> ItemDetails {
    ItemDetails {
        archived: row.archived,
        quantity: row.quantity,
        insured: row.insured,
        notes: row.notes.clone(),
        purchase_price: row.purchase_price,
        purchase_from: row.purchase_from.clone(),
        purchase_time: row.purchase_time,
        manufacturer: row.manufacturer.clone(),
        model_number: row.model_number.clone(),
        serial_number: row.serial_number.clone(),
        lifetime_warranty: row.lifetime_warranty,
        warranty_expires: row.warranty_expires,
        warranty_details: row.warranty_details.clone(),
        sold_to: row.sold_to.clone(),
        sold_price: row.sold_price,
        sold_time: row.sold_time,
        sold_notes: row.sold_notes.clone(),
        fields: row
            .fields
            .iter()
            .map(|f| ItemField {
                name: f.name.clone(),
                text_value: f.value.clone(),
            })
            .collect(),
    }
}
