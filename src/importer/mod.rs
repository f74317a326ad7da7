// ==========================================
// 家庭物品管理系统 - 批量导入导出层
// ==========================================
// 职责: 表格 (CSV/TSV) ⇄ 物品数据
// 导入: 分隔符检测 → 表头索引 → Sheet 解码 → 对账写入
// 导出: 物品读取 → Sheet 编码 → 字节
// ==========================================

// 模块声明
pub mod bill_of_materials;
pub mod error;
pub mod exporter;
pub mod header_indexer;
pub mod maintenance;
pub mod reconciler;
pub mod row_schema;
pub mod separator;
pub mod sheet;
pub mod value_parsers;

#[cfg(test)]
pub(crate) mod test_support;

// 重导出核心类型
pub use bill_of_materials::{bill_of_materials_tsv, BillOfMaterialsEntry, BOM_HEADERS};
pub use error::{BatchAborted, ImportError, ImportResult};
pub use exporter::ItemExporter;
pub use header_indexer::HeaderIndex;
pub use maintenance::{ensure_asset_ids, ensure_import_refs};
pub use reconciler::{ImportReport, ItemImporter, RowViolation};
pub use row_schema::{RowField, RowRecord};
pub use separator::detect_separator;
pub use sheet::Sheet;
