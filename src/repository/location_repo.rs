// ==========================================
// 家庭物品管理系统 - 位置数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::{Location, LocationCreate};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::inventory_store::LocationStore;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// 位置仓储
/// 职责: 管理 locations 表的 CRUD 操作
pub struct LocationRepository {
    conn: Arc<Mutex<Connection>>,
}

impl LocationRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn find_by_id(
        conn: &Connection,
        group_id: &str,
        location_id: &str,
    ) -> RepositoryResult<Option<Location>> {
        let location = conn
            .query_row(
                "SELECT id, name, parent_id FROM locations WHERE group_id = ?1 AND id = ?2",
                params![group_id, location_id],
                |row| {
                    Ok(Location {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        parent_id: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(location)
    }
}

impl LocationStore for LocationRepository {
    fn get_all(&self, group_id: &str) -> RepositoryResult<Vec<Location>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, parent_id
            FROM locations
            WHERE group_id = ?1
            ORDER BY created_at ASC, rowid ASC
            "#,
        )?;

        let rows = stmt.query_map(params![group_id], |row| {
            Ok(Location {
                id: row.get(0)?,
                name: row.get(1)?,
                parent_id: row.get(2)?,
            })
        })?;

        let mut locations = Vec::new();
        for row in rows {
            locations.push(row?);
        }
        Ok(locations)
    }

    fn create(&self, group_id: &str, data: LocationCreate) -> RepositoryResult<Location> {
        let conn = self.get_conn()?;
        let id = Uuid::new_v4().to_string();

        conn.execute(
            r#"
            INSERT INTO locations (id, group_id, name, description, parent_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                id,
                group_id,
                data.name,
                data.description,
                data.parent_id,
                Utc::now(),
            ],
        )?;

        Ok(Location {
            id,
            name: data.name,
            parent_id: data.parent_id,
        })
    }

    fn path_for(&self, group_id: &str, location_id: &str) -> RepositoryResult<Vec<Location>> {
        let conn = self.get_conn()?;

        let mut path = Vec::new();
        let mut visited = HashSet::new();
        let mut current = Some(location_id.to_string());

        while let Some(id) = current {
            // 环形引用检测
            if !visited.insert(id.clone()) {
                return Err(RepositoryError::LocationCycle {
                    group_id: group_id.to_string(),
                    location_id: id,
                });
            }

            let location =
                Self::find_by_id(&conn, group_id, &id)?.ok_or_else(|| RepositoryError::NotFound {
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
