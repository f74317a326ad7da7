// ==========================================
// 测试辅助: 内存版协作者（支持故障注入）
// ==========================================

use crate::domain::{
    AssetId, Item, ItemDetails, ItemDraft, ItemSummary, Label, LabelCreate, Location,
    LocationCreate,
};
use crate::repository::{
    ItemStore, LabelStore, LocationStore, RepositoryError, RepositoryResult,
};
use chrono::{Duration, TimeZone, Utc};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct MemoryState {
    pub locations: Vec<(String, Location)>,
    pub labels: Vec<(String, Label)>,
    pub items: Vec<Item>,

    pub location_creates: usize,
    pub label_creates: usize,
    pub check_ref_calls: usize,
    pub draft_calls: usize,
    pub finalize_calls: usize,
    pub set_asset_id_calls: usize,
    pub set_import_ref_calls: usize,

    /// 第 n 次 check_ref 调用失败（从 0 开始）
    pub fail_check_ref_at: Option<usize>,
    /// 第 n 次 create_draft 调用失败
    pub fail_draft_at: Option<usize>,
    /// 第 n 次 finalize_details 调用失败（草稿已落库）
    pub fail_finalize_at: Option<usize>,
    /// 第 n 次 set_asset_id 调用失败
    pub fail_set_asset_id_at: Option<usize>,
    /// 第 n 次 set_import_ref 调用失败
    pub fail_set_import_ref_at: Option<usize>,
    pub fail_location_create: bool,
    pub fail_label_create: bool,

    next_id: usize,
}

impl MemoryState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }
}

#[derive(Debug, Default)]
pub struct MemoryInventory {
    state: Mutex<MemoryState>,
}

impl MemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap()
    }

    /// 预置一个已有物品（不经过导入流程）
    pub fn seed_item(&self, group_id: &str, name: &str, asset_id: i64, import_ref: &str) -> String {
        let mut state = self.state();
        let id = state.next_id("item");
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
            + Duration::seconds(state.items.len() as i64);
        let mut item = blank_item(&id, group_id, created_at);
        item.name = name.to_string();
        item.asset_id = AssetId::new(asset_id);
        item.import_ref = import_ref.to_string();
        state.items.push(item);
        id
    }

    pub fn location_names(&self, group_id: &str) -> Vec<String> {
        self.state()
            .locations
            .iter()
            .filter(|(g, _)| g == group_id)
            .map(|(_, l)| l.name.clone())
            .collect()
    }

    pub fn items_in(&self, group_id: &str) -> Vec<Item> {
        self.state()
            .items
            .iter()
            .filter(|i| i.group_id == group_id)
            .cloned()
            .collect()
    }
}

fn blank_item(id: &str, group_id: &str, created_at: chrono::DateTime<Utc>) -> Item {
    Item {
        id: id.to_string(),
        group_id: group_id.to_string(),
        import_ref: String::new(),
        location_id: None,
        labels: Vec::new(),
        asset_id: AssetId::default(),
        archived: false,
        name: String::new(),
        quantity: 0,
        description: String::new(),
        insured: false,
        notes: String::new(),
        purchase_price: 0.0,
        purchase_from: String::new(),
        purchase_time: None,
        manufacturer: String::new(),
        model_number: String::new(),
        serial_number: String::new(),
        lifetime_warranty: false,
        warranty_expires: None,
        warranty_details: String::new(),
        sold_to: String::new(),
        sold_price: 0.0,
        sold_time: None,
        sold_notes: String::new(),
        fields: Vec::new(),
        created_at,
        updated_at: created_at,
    }
}

fn injected(operation: &str) -> RepositoryError {
    RepositoryError::DatabaseQueryError(format!("注入故障: {}", operation))
}

impl LocationStore for MemoryInventory {
    fn get_all(&self, group_id: &str) -> RepositoryResult<Vec<Location>> {
        Ok(self
            .state()
            .locations
            .iter()
            .filter(|(g, _)| g == group_id)
            .map(|(_, l)| l.clone())
            .collect())
    }

    fn create(&self, group_id: &str, data: LocationCreate) -> RepositoryResult<Location> {
        let mut state = self.state();
        if state.fail_location_create {
            return Err(injected("location create"));
        }
        let location = Location {
            id: state.next_id("loc"),
            name: data.name,
            parent_id: data.parent_id,
        };
        state.location_creates += 1;
        state.locations.push((group_id.to_string(), location.clone()));
        Ok(location)
    }

    fn path_for(&self, group_id: &str, location_id: &str) -> RepositoryResult<Vec<Location>> {
        let all = LocationStore::get_all(self, group_id)?;
        let mut path = Vec::new();
        let mut current = Some(location_id.to_string());
        while let Some(id) = current {
            let location = all
                .iter()
                .find(|l| l.id == id)
                .cloned()
                .ok_or_else(|| RepositoryError::NotFound {
                    entity: "Location".to_string(),
                    id: id.clone(),
                })?;
            current = location.parent_id.clone();
            path.push(location);
        }
        path.reverse();
        Ok(path)
    }
}

impl LabelStore for MemoryInventory {
    fn get_all(&self, group_id: &str) -> RepositoryResult<Vec<Label>> {
        Ok(self
            .state()
            .labels
            .iter()
            .filter(|(g, _)| g == group_id)
            .map(|(_, l)| l.clone())
            .collect())
    }

    fn create(&self, group_id: &str, data: LabelCreate) -> RepositoryResult<Label> {
        let mut state = self.state();
        if state.fail_label_create {
            return Err(injected("label create"));
        }
        let label = Label {
            id: state.next_id("label"),
            name: data.name,
        };
        state.label_creates += 1;
        state.labels.push((group_id.to_string(), label.clone()));
        Ok(label)
    }
}

impl ItemStore for MemoryInventory {
    fn check_ref(&self, group_id: &str, import_ref: &str) -> RepositoryResult<bool> {
        let mut state = self.state();
        let call = state.check_ref_calls;
        state.check_ref_calls += 1;
        if state.fail_check_ref_at == Some(call) {
            return Err(injected("check_ref"));
        }
        Ok(state
            .items
            .iter()
            .any(|i| i.group_id == group_id && i.import_ref == import_ref))
    }

    fn create_draft(&self, group_id: &str, draft: ItemDraft) -> RepositoryResult<String> {
        let mut state = self.state();
        let call = state.draft_calls;
        state.draft_calls += 1;
        if state.fail_draft_at == Some(call) {
            return Err(injected("create_draft"));
        }

        let id = state.next_id("item");
        let created_at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
            + Duration::seconds(state.items.len() as i64);
        let labels = draft
            .label_ids
            .iter()
            .filter_map(|label_id| {
                state
                    .labels
                    .iter()
                    .find(|(_, l)| &l.id == label_id)
                    .map(|(_, l)| l.clone())
            })
            .collect();

        let mut item = blank_item(&id, group_id, created_at);
        item.import_ref = draft.import_ref;
        item.name = draft.name;
        item.description = draft.description;
        item.location_id = draft.location_id;
        item.labels = labels;
        item.asset_id = draft.asset_id;
        state.items.push(item);
        Ok(id)
    }

    fn finalize_details(
        &self,
        group_id: &str,
        item_id: &str,
        details: ItemDetails,
    ) -> RepositoryResult<Item> {
        let mut state = self.state();
        let call = state.finalize_calls;
        state.finalize_calls += 1;
        if state.fail_finalize_at == Some(call) {
            return Err(injected("finalize_details"));
        }
        let item = state
            .items
            .iter_mut()
            .find(|i| i.group_id == group_id && i.id == item_id)
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "Item".to_string(),
                id: item_id.to_string(),
            })?;

        item.archived = details.archived;
        item.quantity = details.quantity;
        item.insured = details.insured;
        item.notes = details.notes;
        item.purchase_price = details.purchase_price;
        item.purchase_from = details.purchase_from;
        item.purchase_time = details.purchase_time;
        item.manufacturer = details.manufacturer;
        item.model_number = details.model_number;
        item.serial_number = details.serial_number;
        item.lifetime_warranty = details.lifetime_warranty;
        item.warranty_expires = details.warranty_expires;
        item.warranty_details = details.warranty_details;
        item.sold_to = details.sold_to;
        item.sold_price = details.sold_price;
        item.sold_time = details.sold_time;
        item.sold_notes = details.sold_notes;
        item.fields = details.fields;
        Ok(item.clone())
    }

    fn get_highest_asset_id(&self, group_id: &str) -> RepositoryResult<AssetId> {
        Ok(self
            .state()
            .items
            .iter()
            .filter(|i| i.group_id == group_id)
            .map(|i| i.asset_id)
            .max()
            .unwrap_or_default())
    }

    fn get_all_zero_asset_id(&self, group_id: &str) -> RepositoryResult<Vec<ItemSummary>> {
        let mut items: Vec<ItemSummary> = self
            .state()
            .items
            .iter()
            .filter(|i| i.group_id == group_id && i.asset_id.value() == 0)
            .map(|i| ItemSummary {
                id: i.id.clone(),
                name: i.name.clone(),
                asset_id: i.asset_id,
                created_at: i.created_at,
            })
            .collect();
        items.sort_by_key(|i| i.created_at);
        Ok(items)
    }

    fn set_asset_id(
        &self,
        group_id: &str,
        item_id: &str,
        asset_id: AssetId,
    ) -> RepositoryResult<()> {
        let mut state = self.state();
        let call = state.set_asset_id_calls;
        state.set_asset_id_calls += 1;
        if state.fail_set_asset_id_at == Some(call) {
            return Err(injected("set_asset_id"));
        }
        if let Some(item) = state
            .items
            .iter_mut()
            .find(|i| i.group_id == group_id && i.id == item_id)
        {
            item.asset_id = asset_id;
        }
        Ok(())
    }

    fn get_all(&self, group_id: &str) -> RepositoryResult<Vec<Item>> {
        let mut items = self.items_in(group_id);
        items.sort_by_key(|i| i.created_at);
        Ok(items)
    }

    fn get_all_zero_import_ref(&self, group_id: &str) -> RepositoryResult<Vec<String>> {
        Ok(self
            .state()
            .items
            .iter()
            .filter(|i| i.group_id == group_id && i.import_ref.is_empty())
            .map(|i| i.id.clone())
            .collect())
    }

    fn set_import_ref(
        &self,
        group_id: &str,
        item_id: &str,
        import_ref: &str,
    ) -> RepositoryResult<()> {
        let mut state = self.state();
        let call = state.set_import_ref_calls;
        state.set_import_ref_calls += 1;
        if state.fail_set_import_ref_at == Some(call) {
            return Err(injected("set_import_ref"));
        }
        if let Some(item) = state
            .items
            .iter_mut()
            .find(|i| i.group_id == group_id && i.id == item_id)
        {
            item.import_ref = import_ref.to_string();
        }
        Ok(())
    }
}
