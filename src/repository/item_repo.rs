// ==========================================
// 家庭物品管理系统 - 物品数据仓储
// ==========================================
// 职责: items / item_labels / item_fields 表的 CRUD
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::{AssetId, Item, ItemDetails, ItemDraft, ItemField, ItemSummary, Label};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::inventory_store::ItemStore;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

const ITEM_COLUMNS: &str = r#"
    id, group_id, import_ref, location_id, asset_id, archived,
    name, quantity, description, insured, notes,
    purchase_price, purchase_from, purchase_time,
    manufacturer, model_number, serial_number,
    lifetime_warranty, warranty_expires, warranty_details,
    sold_to, sold_price, sold_time, sold_notes,
    created_at, updated_at
"#;

// ==========================================
// ItemRepository
// ==========================================
pub struct ItemRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ItemRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 映射 items 行（不含标签与自定义字段）
    fn map_item_row(row: &Row) -> rusqlite::Result<Item> {
        Ok(Item {
            id: row.get(0)?,
            group_id: row.get(1)?,
            import_ref: row.get(2)?,
            location_id: row.get(3)?,
            asset_id: AssetId::new(row.get(4)?),
            archived: row.get(5)?,
            name: row.get(6)?,
            quantity: row.get(7)?,
            description: row.get(8)?,
            insured: row.get(9)?,
            notes: row.get(10)?,
            purchase_price: row.get(11)?,
            purchase_from: row.get(12)?,
            purchase_time: row.get(13)?,
            manufacturer: row.get(14)?,
            model_number: row.get(15)?,
            serial_number: row.get(16)?,
            lifetime_warranty: row.get(17)?,
            warranty_expires: row.get(18)?,
            warranty_details: row.get(19)?,
            sold_to: row.get(20)?,
            sold_price: row.get(21)?,
            sold_time: row.get(22)?,
            sold_notes: row.get(23)?,
            fields: Vec::new(),
            labels: Vec::new(),
            created_at: row.get(24)?,
            updated_at: row.get(25)?,
        })
    }

    fn load_labels(conn: &Connection, item_id: &str) -> RepositoryResult<Vec<Label>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT l.id, l.name
            FROM item_labels il
            JOIN labels l ON l.id = il.label_id
            WHERE il.item_id = ?1
            ORDER BY il.position ASC
            "#,
        )?;
        let rows = stmt.query_map(params![item_id], |row| {
            Ok(Label {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;

        let mut labels = Vec::new();
        for row in rows {
            labels.push(row?);
        }
        Ok(labels)
    }

    fn load_fields(conn: &Connection, item_id: &str) -> RepositoryResult<Vec<ItemField>> {
        let mut stmt = conn.prepare(
            "SELECT name, text_value FROM item_fields WHERE item_id = ?1 ORDER BY position ASC",
        )?;
        let rows = stmt.query_map(params![item_id], |row| {
            Ok(ItemField {
                name: row.get(0)?,
                text_value: row.get(1)?,
            })
        })?;

        let mut fields = Vec::new();
        for row in rows {
            fields.push(row?);
        }
        Ok(fields)
    }

    fn find_by_id(conn: &Connection, group_id: &str, item_id: &str) -> RepositoryResult<Item> {
        let sql = format!(
            "SELECT {} FROM items WHERE group_id = ?1 AND id = ?2",
            ITEM_COLUMNS
        );
        let item = conn
            .query_row(&sql, params![group_id, item_id], Self::map_item_row)
            .optional()?;

        let mut item = item.ok_or_else(|| RepositoryError::NotFound {
            entity: "Item".to_string(),
            id: item_id.to_string(),
        })?;
        item.labels = Self::load_labels(conn, &item.id)?;
        item.fields = Self::load_fields(conn, &item.id)?;
        Ok(item)
    }
}

impl ItemStore for ItemRepository {
    fn check_ref(&self, group_id: &str, import_ref: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let exists = conn
            .query_row(
                "SELECT 1 FROM items WHERE group_id = ?1 AND import_ref = ?2 LIMIT 1",
                params![group_id, import_ref],
                |_row| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        Ok(exists)
    }

    fn create_draft(&self, group_id: &str, draft: ItemDraft) -> RepositoryResult<String> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        tx.execute(
            r#"
            INSERT INTO items (
                id, group_id, import_ref, location_id, asset_id,
                name, description, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                id,
                group_id,
                draft.import_ref,
                draft.location_id,
                draft.asset_id.value(),
                draft.name,
                draft.description,
                now,
                now,
            ],
        )?;

        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO item_labels (item_id, label_id, position) VALUES (?1, ?2, ?3)",
            )?;
            for (position, label_id) in draft.label_ids.iter().enumerate() {
                stmt.execute(params![id, label_id, position as i64])?;
            }
        }

        tx.commit()?;
        Ok(id)
    }

    fn finalize_details(
        &self,
        group_id: &str,
        item_id: &str,
        details: ItemDetails,
    ) -> RepositoryResult<Item> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let affected = tx.execute(
            r#"
            UPDATE items SET
                archived = ?3, quantity = ?4, insured = ?5, notes = ?6,
                purchase_price = ?7, purchase_from = ?8, purchase_time = ?9,
                manufacturer = ?10, model_number = ?11, serial_number = ?12,
                lifetime_warranty = ?13, warranty_expires = ?14, warranty_details = ?15,
                sold_to = ?16, sold_price = ?17, sold_time = ?18, sold_notes = ?19,
                updated_at = ?20
            WHERE group_id = ?1 AND id = ?2
            "#,
            params![
                group_id,
                item_id,
                details.archived,
                details.quantity,
                details.insured,
                details.notes,
                details.purchase_price,
                details.purchase_from,
                details.purchase_time,
                details.manufacturer,
                details.model_number,
                details.serial_number,
                details.lifetime_warranty,
                details.warranty_expires,
                details.warranty_details,
                details.sold_to,
                details.sold_price,
                details.sold_time,
                details.sold_notes,
                Utc::now(),
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Item".to_string(),
                id: item_id.to_string(),
            });
        }

        // 自定义字段整体覆盖
        tx.execute("DELETE FROM item_fields WHERE item_id = ?1", params![item_id])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO item_fields (item_id, position, name, text_value) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for (position, field) in details.fields.iter().enumerate() {
                stmt.execute(params![item_id, position as i64, field.name, field.text_value])?;
            }
        }

        tx.commit()?;
        Self::find_by_id(&conn, group_id, item_id)
    }

    fn get_highest_asset_id(&self, group_id: &str) -> RepositoryResult<AssetId> {
        let conn = self.get_conn()?;
        let highest: Option<i64> = conn.query_row(
            "SELECT MAX(asset_id) FROM items WHERE group_id = ?1",
            params![group_id],
            |row| row.get(0),
        )?;
        Ok(AssetId::new(highest.unwrap_or(0)))
    }

    fn get_all_zero_asset_id(&self, group_id: &str) -> RepositoryResult<Vec<ItemSummary>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, asset_id, created_at
            FROM items
            WHERE group_id = ?1 AND asset_id = 0
            ORDER BY created_at ASC, rowid ASC
            "#,
        )?;
        let rows = stmt.query_map(params![group_id], |row| {
            Ok(ItemSummary {
                id: row.get(0)?,
                name: row.get(1)?,
                asset_id: AssetId::new(row.get(2)?),
                created_at: row.get(3)?,
            })
        })?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row?);
        }
        Ok(items)
    }

    fn set_asset_id(
        &self,
        group_id: &str,
        item_id: &str,
        asset_id: AssetId,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "UPDATE items SET asset_id = ?3, updated_at = ?4 WHERE group_id = ?1 AND id = ?2",
            params![group_id, item_id, asset_id.value(), Utc::now()],
        )?;
        Ok(())
    }

    fn get_all(&self, group_id: &str) -> RepositoryResult<Vec<Item>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM items WHERE group_id = ?1 ORDER BY created_at ASC, rowid ASC",
            ITEM_COLUMNS
        );

        let mut items = Vec::new();
        {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![group_id], Self::map_item_row)?;
            for row in rows {
                items.push(row?);
            }
        }

        for item in &mut items {
            item.labels = Self::load_labels(&conn, &item.id)?;
            item.fields = Self::load_fields(&conn, &item.id)?;
        }
        Ok(items)
    }

    fn get_all_zero_import_ref(&self, group_id: &str) -> RepositoryResult<Vec<String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id FROM items
            WHERE group_id = ?1 AND import_ref = ''
            ORDER BY created_at ASC, rowid ASC
            "#,
        )?;
        let rows = stmt.query_map(params![group_id], |row| row.get::<_, String>(0))?;

        let mut ids = Vec::new();
        for row in rows {
            ids.push(row?);
        }
        Ok(ids)
    }

    fn set_import_ref(
        &self,
        group_id: &str,
        item_id: &str,
        import_ref: &str,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "UPDATE items SET import_ref = ?3, updated_at = ?4 WHERE group_id = ?1 AND id = ?2",
            params![group_id, item_id, import_ref, Utc::now()],
        )?;
        Ok(())
    }
}
