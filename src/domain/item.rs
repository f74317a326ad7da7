// ==========================================
// 家庭物品管理系统 - 物品领域模型
// ==========================================
// 物品写入分两步:
//   1. ItemDraft   - 建立身份与关联（位置/标签/资产编号/导入引用）
//   2. ItemDetails - 回填其余标量明细与自定义字段
// ==========================================

use crate::domain::asset_id::AssetId;
use crate::domain::label::Label;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ItemField - 自定义字段（文本类型）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemField {
    pub name: String,
    pub text_value: String,
}

// ==========================================
// Item - 物品（读模型）
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub group_id: String,
    pub import_ref: String,
    pub location_id: Option<String>,
    pub labels: Vec<Label>,
    pub asset_id: AssetId,
    pub archived: bool,

    pub name: String,
    pub quantity: i64,
    pub description: String,
    pub insured: bool,
    pub notes: String,

    // ===== 购买信息 =====
    pub purchase_price: f64,
    pub purchase_from: String,
    pub purchase_time: Option<NaiveDate>,

    // ===== 识别信息 =====
    pub manufacturer: String,
    pub model_number: String,
    pub serial_number: String,

    // ===== 保修 =====
    pub lifetime_warranty: bool,
    pub warranty_expires: Option<NaiveDate>,
    pub warranty_details: String,

    // ===== 出售 =====
    pub sold_to: String,
    pub sold_price: f64,
    pub sold_time: Option<NaiveDate>,
    pub sold_notes: String,

    pub fields: Vec<ItemField>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 物品创建草稿（最小字段集）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    pub import_ref: String,
    pub name: String,
    pub description: String,
    pub location_id: Option<String>,
    pub label_ids: Vec<String>,
    pub asset_id: AssetId,
}

/// 物品明细（创建后的第二次写入）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDetails {
    pub archived: bool,
    pub quantity: i64,
    pub insured: bool,
    pub notes: String,

    pub purchase_price: f64,
    pub purchase_from: String,
    pub purchase_time: Option<NaiveDate>,

    pub manufacturer: String,
    pub model_number: String,
    pub serial_number: String,

    pub lifetime_warranty: bool,
    pub warranty_expires: Option<NaiveDate>,
    pub warranty_details: String,

    pub sold_to: String,
    pub sold_price: f64,
    pub sold_time: Option<NaiveDate>,
    pub sold_notes: String,

    pub fields: Vec<ItemField>,
}

/// 资产编号维护用的物品摘要
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSummary {
    pub id: String,
    pub name: String,
    pub asset_id: AssetId,
    pub created_at: DateTime<Utc>,
}
