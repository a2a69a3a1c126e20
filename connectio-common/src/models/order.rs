// connectio-common/src/models/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Persisted order document for the food-delivery providers. Zomato stores
/// the sanitized raw response; Swiggy stores the normalized delivered-only
/// view plus retrieval counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    pub orders: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_orders: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_orders: Option<usize>,
    pub fetched_at: DateTime<Utc>,
    pub sanitized: bool,
}

/// Normalized view of one delivered Swiggy order. Carries no internal order
/// or hash identifier; those are on the sanitizer's deny list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveredOrder {
    pub restaurant_name: String,
    pub order_total: f64,
    pub order_date: Option<String>,
    pub updated_at: Option<String>,
    pub delivery_status: String,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub name: String,
    pub final_price: f64,
    pub quantity: f64,
    pub is_veg: bool,
}
