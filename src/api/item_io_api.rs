// ==========================================
// 家庭物品管理系统 - 物品导入导出API
// ==========================================
// 职责: 组装 SQLite 仓储 + 配置 + 导入导出引擎
// 并发: 同一组的导入与维护操作持组锁串行执行
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, ImportConfigReader};
use crate::db::{ensure_schema, open_sqlite_connection};
use crate::importer::{
    bill_of_materials_tsv, ensure_asset_ids, ensure_import_refs, ImportReport, ItemExporter,
    ItemImporter, RowViolation, Sheet,
};
use crate::repository::{ItemRepository, LabelRepository, LocationRepository};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tracing::{info, instrument};

/// 导入API响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportApiResponse {
    /// 新建物品数
    pub created: usize,
    /// 导入引用已存在而跳过的行数
    pub skipped: usize,
    /// 行校验提示（不影响写入）
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub violations: Vec<RowViolationDto>,
    /// 导入耗时（毫秒）
    pub elapsed_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowViolationDto {
    pub row: usize,
    pub field: String,
    pub message: String,
}

impl From<RowViolation> for RowViolationDto {
    fn from(v: RowViolation) -> Self {
        Self {
            row: v.row,
            field: v.field,
            message: v.message,
        }
    }
}

impl ImportApiResponse {
    fn from_report(report: ImportReport, elapsed_ms: i64) -> Self {
        Self {
            created: report.created,
            skipped: report.skipped,
            violations: report.violations.into_iter().map(Into::into).collect(),
            elapsed_ms,
        }
    }
}

/// 维护操作响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceResponse {
    /// 补齐的物品数
    pub fixed: usize,
    pub elapsed_ms: i64,
}

// ==========================================
// ItemIoApi
// ==========================================
pub struct ItemIoApi {
    location_repo: Arc<LocationRepository>,
    label_repo: Arc<LabelRepository>,
    item_repo: Arc<ItemRepository>,
    config: ConfigManager,
    /// group_id → 组锁
    group_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ItemIoApi {
    /// 打开数据库并确保表结构存在
    pub fn new(db_path: &str) -> ApiResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| ApiError::DatabaseConnectionError(e.to_string()))?;
        ensure_schema(&conn)?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 基于已有连接创建（调用方负责建表）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ApiResult<Self> {
        let config = ConfigManager::from_connection(conn.clone())
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;

        Ok(Self {
            location_repo: Arc::new(LocationRepository::from_connection(conn.clone())),
            label_repo: Arc::new(LabelRepository::from_connection(conn.clone())),
            item_repo: Arc::new(ItemRepository::from_connection(conn)),
            config,
            group_locks: Mutex::new(HashMap::new()),
        })
    }

    pub fn config(&self) -> &ConfigManager {
        &self.config
    }

    /// 组锁只做串行化，不保护数据，中毒后照常使用
    fn group_lock(&self, group_id: &str) -> ApiResult<Arc<Mutex<()>>> {
        let mut locks = self
            .group_locks
            .lock()
            .map_err(|e| ApiError::InternalError(format!("组锁表获取失败: {}", e)))?;
        Ok(locks
            .entry(group_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone())
    }

    fn validate_group(group_id: &str) -> ApiResult<()> {
        if group_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("group_id 不能为空".to_string()));
        }
        Ok(())
    }

    // ==========================================
    // 导入
    // ==========================================

    /// 导入表格字节（CSV/TSV 自动识别）
    ///
    /// # 返回
    /// - Ok(ImportApiResponse): 全部行处理完成
    /// - Err(ApiError::ImportFormat): 格式/类型错误，无任何写入
    /// - Err(ApiError::ImportAborted): 中途失败，`created` 为已写入数
    #[instrument(skip(self, data), fields(group_id = %group_id, bytes = data.len()))]
    pub fn import_items(&self, group_id: &str, data: &[u8]) -> ApiResult<ImportApiResponse> {
        Self::validate_group(group_id)?;
        let start = Instant::now();

        // 解码在加锁前完成
        let sheet = Sheet::read(data)?;

        let auto_increment = self
            .config
            .auto_increment_asset_id()
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;

        let lock = self.group_lock(group_id)?;
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let importer = ItemImporter::new(
            self.location_repo.clone(),
            self.label_repo.clone(),
            self.item_repo.clone(),
            auto_increment,
        );
        let report = importer.import(group_id, &sheet.rows)?;

        let elapsed_ms = start.elapsed().as_millis() as i64;
        info!(created = report.created, skipped = report.skipped, elapsed_ms, "导入完成");
        Ok(ImportApiResponse::from_report(report, elapsed_ms))
    }

    /// 从文件导入
    pub fn import_file(&self, group_id: &str, path: &Path) -> ApiResult<ImportApiResponse> {
        let data = std::fs::read(path).map_err(|e| {
            ApiError::InvalidInput(format!("读取文件失败 {}: {}", path.display(), e))
        })?;
        self.import_items(group_id, &data)
    }

    // ==========================================
    // 导出
    // ==========================================

    /// 导出为二维字符串数组（首行为表头）
    pub fn export_records(&self, group_id: &str) -> ApiResult<Vec<Vec<String>>> {
        Self::validate_group(group_id)?;
        let sheet = self.exporter().export_sheet(group_id)?;
        Ok(sheet.to_records())
    }

    /// 导出为字节（分隔符取自配置，默认制表符）
    #[instrument(skip(self), fields(group_id = %group_id))]
    pub fn export_items(&self, group_id: &str) -> ApiResult<Vec<u8>> {
        Self::validate_group(group_id)?;
        let separator = self
            .config
            .export_separator()
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;

        let sheet = self.exporter().export_sheet(group_id)?;
        Ok(sheet.write(separator)?)
    }

    /// 物料清单（TSV）
    pub fn export_bill_of_materials(&self, group_id: &str) -> ApiResult<Vec<u8>> {
        Self::validate_group(group_id)?;
        Ok(bill_of_materials_tsv(self.item_repo.as_ref(), group_id)?)
    }

    fn exporter(&self) -> ItemExporter<LocationRepository, ItemRepository> {
        ItemExporter::new(self.location_repo.clone(), self.item_repo.clone())
    }

    // ==========================================
    // 维护
    // ==========================================

    /// 补齐资产编号
    pub fn ensure_asset_ids(&self, group_id: &str) -> ApiResult<MaintenanceResponse> {
        Self::validate_group(group_id)?;
        let start = Instant::now();

        let lock = self.group_lock(group_id)?;
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let fixed = ensure_asset_ids(self.item_repo.as_ref(), group_id)?;
        Ok(MaintenanceResponse {
            fixed,
            elapsed_ms: start.elapsed().as_millis() as i64,
        })
    }

    /// 补齐导入引用
    pub fn ensure_import_refs(&self, group_id: &str) -> ApiResult<MaintenanceResponse> {
        Self::validate_group(group_id)?;
        let start = Instant::now();

        let lock = self.group_lock(group_id)?;
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let fixed = ensure_import_refs(self.item_repo.as_ref(), group_id)?;
        Ok(MaintenanceResponse {
            fixed,
            elapsed_ms: start.elapsed().as_millis() as i64,
        })
    }
}
