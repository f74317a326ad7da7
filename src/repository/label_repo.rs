// ==========================================
// 家庭物品管理系统 - 标签数据仓储
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::{Label, LabelCreate};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::inventory_store::LabelStore;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// 标签仓储
/// 职责: 管理 labels 表的 CRUD 操作
pub struct LabelRepository {
    conn: Arc<Mutex<Connection>>,
}

impl LabelRepository {
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
}

impl LabelStore for LabelRepository {
    fn get_all(&self, group_id: &str) -> RepositoryResult<Vec<Label>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name FROM labels WHERE group_id = ?1 ORDER BY created_at ASC, rowid ASC",
        )?;

        let rows = stmt.query_map(params![group_id], |row| {
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

    fn create(&self, group_id: &str, data: LabelCreate) -> RepositoryResult<Label> {
        let conn = self.get_conn()?;
        let id = Uuid::new_v4().to_string();

        conn.execute(
            r#"
            INSERT INTO labels (id, group_id, name, description, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![id, group_id, data.name, data.description, Utc::now()],
        )?;

        Ok(Label {
            id,
            name: data.name,
        })
    }
}
