// ==========================================
// 家庭物品管理系统 - 导入对账引擎
// ==========================================
// 职责: 将解码后的行记录写入某个组（租户）
// 流程:
//   1. 行校验（仅告警，不阻断）
//   2. 引导: 先补建位置（按完整路径），再补建标签
//   3. 资产编号种子（自动递增开启时读取一次）
//   4. 逐行写入: 导入引用去重 → CreateDraft → FinalizeDetails
// 红线: 非事务。任一协作者调用失败即终止剩余行，已写入的行不回滚
// 红线: 同组并发导入需由调用方串行化（资产编号分配非原子）
// ==========================================

mod core;
mod report;


pub use core::ItemImporter;
pub use report::{ImportReport, RowViolation};
