// ==========================================
// 家庭物品管理系统 - API层错误类型
// ==========================================
// 职责: 汇总导入/仓储/配置错误，转换为面向调用方的错误消息
// ==========================================

use crate::importer::error::{BatchAborted, ImportError};
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入与格式错误（无任何写入）
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("表格格式错误: {0}")]
    ImportFormat(String),

    // ==========================================
    // 批处理中途失败（已写入部分不回滚）
    // ==========================================
    #[error("批处理中止 (已完成 {created} 条): {message}")]
    ImportAborted { created: usize, message: String },

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("配置读取失败: {0}")]
    ConfigError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 失败前已写入的条数（仅批处理中止时非 0）
    pub fn completed(&self) -> usize {
        match self {
            ApiError::ImportAborted { created, .. } => *created,
            _ => 0,
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::DatabaseError(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::DatabaseError(format!("外键约束违反: {}", msg))
            }
            err @ RepositoryError::LocationCycle { .. } => ApiError::DatabaseError(err.to_string()),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        if err.is_format_error() {
            return ApiError::ImportFormat(err.to_string());
        }
        match err {
            ImportError::Store(e) => e.into(),
            ImportError::Other(e) => ApiError::Other(e),
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl From<BatchAborted> for ApiError {
    fn from(err: BatchAborted) -> Self {
        ApiError::ImportAborted {
            created: err.completed,
            message: err.source.to_string(),
        }
    }
}

impl From<rusqlite::Error> for ApiError {
    fn from(err: rusqlite::Error) -> Self {
        RepositoryError::from(err).into()
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_errors_map_to_import_format() {
        let err: ApiError = ImportError::MissingRequiredHeaders.into();
        assert!(matches!(err, ApiError::ImportFormat(_)));

        let err: ApiError = ImportError::ValueConversion {
            value: "x".to_string(),
            target: "asset_id".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::ImportFormat(_)));
    }

    #[test]
    fn test_store_error_unwraps_to_repository_mapping() {
        let err: ApiError = ImportError::Store(RepositoryError::NotFound {
            entity: "Item".to_string(),
            id: "1".to_string(),
        })
        .into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_batch_aborted_keeps_partial_count() {
        let aborted = BatchAborted::new(
            3,
            RepositoryError::DatabaseQueryError("disk I/O error".to_string()),
        );
        let err: ApiError = aborted.into();
        assert_eq!(err.completed(), 3);
        assert!(err.to_string().contains("disk I/O error"));
    }
}
