// ==========================================
// 家庭物品管理系统 - 数据维护操作
// ==========================================
// ensure_asset_ids:   为资产编号为 0 的物品补齐编号（按创建时间升序）
// ensure_import_refs: 为缺少导入引用的物品生成 8 位随机引用
// 红线: 非事务，首个写入失败即终止，返回已完成数
// 红线: 与同组导入并发时资产编号可能重复，由调用方串行化
// ==========================================

use crate::importer::error::{BatchAborted, ImportError};
use crate::repository::ItemStore;
use tracing::{error, info, instrument};
use uuid::Uuid;

/// 导入引用长度
pub const IMPORT_REF_LEN: usize = 8;

/// 补齐资产编号
///
/// # 返回
/// - Ok(usize): 补齐的物品数
/// - Err(BatchAborted): 写入失败，`completed` 为已补齐数
#[instrument(skip(store), fields(group_id = %group_id))]
pub fn ensure_asset_ids<I: ItemStore + ?Sized>(
    store: &I,
    group_id: &str,
) -> Result<usize, BatchAborted> {
    let items = store
        .get_all_zero_asset_id(group_id)
        .map_err(|e| BatchAborted::new(0, e))?;
    let mut highest = store
        .get_highest_asset_id(group_id)
        .map_err(|e| BatchAborted::new(0, e))?;

    let mut fixed = 0;
    for item in &items {
        highest = match highest.checked_next() {
            Some(next) => next,
            None => {
                error!(item_id = %item.id, fixed, "资产编号已达上限");
                return Err(BatchAborted::new(
                    fixed,
                    ImportError::AssetIdExhausted {
                        last: highest.value(),
                    },
                ));
            }
        };
        if let Err(e) = store.set_asset_id(group_id, &item.id, highest) {
            error!(item_id = %item.id, fixed, "资产编号写入失败: {}", e);
            return Err(BatchAborted::new(fixed, e));
        }
        fixed += 1;
    }

    info!(fixed, "资产编号补齐完成");
    Ok(fixed)
}

/// 补齐导入引用
#[instrument(skip(store), fields(group_id = %group_id))]
pub fn ensure_import_refs<I: ItemStore + ?Sized>(
    store: &I,
    group_id: &str,
) -> Result<usize, BatchAborted> {
    let item_ids = store
        .get_all_zero_import_ref(group_id)
        .map_err(|e| BatchAborted::new(0, e))?;

    let mut fixed = 0;
    for item_id in &item_ids {
        let import_ref = new_import_ref();
        if let Err(e) = store.set_import_ref(group_id, item_id, &import_ref) {
            error!(item_id = %item_id, fixed, "导入引用写入失败: {}", e);
            return Err(BatchAborted::new(fixed, e));
        }
        fixed += 1;
    }

    info!(fixed, "导入引用补齐完成");
    Ok(fixed)
}

fn new_import_ref() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(IMPORT_REF_LEN);
    id
}
