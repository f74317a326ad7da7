// ==========================================
// 家庭物品管理系统 - 导入导出模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类:
// - 格式错误: 分隔符/表头/行宽，写入前检出
// - 类型转换错误: 单元格无法转换为声明类型，写入前检出
// - 存储错误: 协作者调用失败，终止剩余行（不回滚）
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 格式错误 =====
    #[error("无法确定分隔符: 首行既无逗号也无制表符")]
    SeparatorUndetermined,

    #[error("表格至少需要 1 行数据 (表头 + 1)，实际共 {0} 行")]
    NotEnoughRows(usize),

    #[error("未找到可识别的表头 (HB.*)")]
    NoRecognizedHeaders,

    #[error("缺少必需表头 `HB.location` 或 `HB.name`")]
    MissingRequiredHeaders,

    #[error("行宽不一致 (行 {row}): 实际 {found} 列，期望 {expected} 列")]
    RowWidthMismatch {
        row: usize,
        found: usize,
        expected: usize,
    },

    // ===== 类型转换错误 =====
    #[error("无法将 {value:?} 转换为 {target}")]
    ValueConversion { value: String, target: String },

    // ===== 文件读写错误 =====
    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("CSV 写出失败: {0}")]
    CsvWriteError(String),

    // ===== 存储错误 =====
    #[error("存储调用失败: {0}")]
    Store(#[from] RepositoryError),

    // ===== 编号分配错误 =====
    #[error("资产编号已达上限 ({last})，无法继续分配")]
    AssetIdExhausted { last: i64 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// 是否为写入前检出的格式/转换错误
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            ImportError::SeparatorUndetermined
                | ImportError::NotEnoughRows(_)
                | ImportError::NoRecognizedHeaders
                | ImportError::MissingRequiredHeaders
                | ImportError::RowWidthMismatch { .. }
                | ImportError::ValueConversion { .. }
                | ImportError::CsvParseError(_)
        )
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::CsvWriteError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

// ==========================================
// BatchAborted - 批处理中途失败
// ==========================================
// 非事务: completed 为失败前已真实落库的行数
#[derive(Error, Debug)]
#[error("批处理中止 (已完成 {completed} 条): {source}")]
pub struct BatchAborted {
    pub completed: usize,
    #[source]
    pub source: ImportError,
}

impl BatchAborted {
    pub fn new(completed: usize, source: impl Into<ImportError>) -> Self {
        Self {
            completed,
            source: source.into(),
        }
    }
}
