//! Swiggy provider.
//!
//! Pages through the order endpoint using the last order's id as the next
//! cursor, keeps only delivered orders, and persists a sanitized normalized
//! view. A page under 10 orders is treated as the last one.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use connectio_common::models::{
    DeliveredOrder, OrderItem, OrderSnapshot, Provider, ProviderSnapshot, SessionCookie,
};
use connectio_common::traits::SessionCookieRepository;

use crate::http::HttpClient;
use crate::pagination::{paginate, Page, PageConfig};
use crate::providers::{cookie_header, ProviderSync, SyncParams};
use crate::sanitize::sanitize_value;
use crate::Error;

const DEFAULT_ORDERS_URL: &str = "https://www.swiggy.com/dapi/order/all";
const DELIVERED: &str = "delivered";

pub struct SwiggyProvider {
    client: Arc<dyn HttpClient>,
    sessions: Arc<dyn SessionCookieRepository>,
    orders_url: String,
    pages: PageConfig,
}

impl SwiggyProvider {
    pub fn new(client: Arc<dyn HttpClient>, sessions: Arc<dyn SessionCookieRepository>) -> Self {
        Self {
            client,
            sessions,
            orders_url: DEFAULT_ORDERS_URL.to_string(),
            pages: PageConfig::swiggy(),
        }
    }

    pub fn with_orders_url(mut self, orders_url: impl Into<String>) -> Self {
        self.orders_url = orders_url.into();
        self
    }

    pub fn with_pages(mut self, pages: PageConfig) -> Self {
        self.pages = pages;
        self
    }

    fn page_url(&self, cursor: Option<&str>) -> Result<String, Error> {
        let mut url = Url::parse(&self.orders_url).map_err(|e| Error::Parse(e.to_string()))?;
        if let Some(order_id) = cursor {
            url.query_pairs_mut().append_pair("order_id", order_id);
        }
        Ok(url.into())
    }

    fn headers(jar: &[SessionCookie]) -> HashMap<String, String> {
        let mut headers = HashMap::from([("accept".to_string(), "*/*".to_string())]);
        let cookie = cookie_header(jar);
        if !cookie.is_empty() {
            headers.insert("cookie".to_string(), cookie);
        }
        headers
    }

    async fn fetch_all_orders(&self, jar: &[SessionCookie]) -> Result<Vec<Value>, Error> {
        paginate(&self.pages, |_page_index, cursor| {
            let url = self.page_url(cursor.as_deref());
            let headers = Self::headers(jar);
            async move {
                let response = self.client.get(url?, headers).await?;

                match response.status {
                    status if (200..300).contains(&status) => {}
                    401 | 403 => {
                        return Err(Error::Auth(
                            "Swiggy session missing or expired; sign in and re-import cookies"
                                .into(),
                        ))
                    }
                    status => {
                        return Err(Error::Status {
                            status,
                            context: "Swiggy order history".into(),
                        })
                    }
                }

                let envelope: Value = serde_json::from_str(&response.body)?;
                let items: Vec<Value> = envelope
                    .pointer("/data/orders")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default();

                let next_cursor = items.last().and_then(order_id_of);
                Ok(Page { items, next_cursor })
            }
        })
        .await
    }
}

/// Cursor for the next page: the last order's id, which the API returns as
/// either a number or a string.
fn order_id_of(order: &Value) -> Option<String> {
    match order.get("order_id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn str_of(order: &Value, key: &str) -> Option<String> {
    order.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Numeric fields arrive as numbers or numeric strings.
fn f64_of(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn is_veg_of(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) => s == "1",
        Some(Value::Number(n)) => n.as_u64() == Some(1),
        Some(Value::Bool(b)) => *b,
        _ => false,
    }
}

fn normalize_order(order: &Value) -> DeliveredOrder {
    let items = order
        .get("order_items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| OrderItem {
                    name: str_of(item, "name").unwrap_or_default(),
                    final_price: f64_of(item.get("final_price")),
                    quantity: f64_of(item.get("quantity")),
                    is_veg: is_veg_of(item.get("is_veg")),
                })
                .collect()
        })
        .unwrap_or_default();

    DeliveredOrder {
        restaurant_name: str_of(order, "restaurant_name").unwrap_or_default(),
        order_total: f64_of(order.get("order_total")),
        order_date: str_of(order, "order_time"),
        updated_at: str_of(order, "updated_at"),
        delivery_status: DELIVERED.to_string(),
        items,
    }
}

#[async_trait]
impl ProviderSync for SwiggyProvider {
    fn provider(&self) -> Provider {
        Provider::Swiggy
    }

    async fn sync(&self, _params: &SyncParams) -> Result<ProviderSnapshot, Error> {
        info!("syncing Swiggy order history");

        let jar = self.sessions.cookies(Provider::Swiggy).await?;
        let all_orders = self.fetch_all_orders(&jar).await?;
        let total_orders = all_orders.len();

        let delivered: Vec<DeliveredOrder> = all_orders
            .iter()
            .filter(|order| {
                order
                    .get("order_delivery_status")
                    .and_then(Value::as_str)
                    .map(|status| status == DELIVERED)
                    .unwrap_or(false)
            })
            .map(normalize_order)
            .collect();

        info!(
            delivered = delivered.len(),
            total = total_orders,
            "processed Swiggy orders"
        );

        let mut orders = serde_json::to_value(&delivered)?;
        let removed = sanitize_value(&mut orders);
        debug!(removed, "sanitized Swiggy order payload");

        let snapshot = OrderSnapshot {
            orders,
            total_orders: Some(total_orders),
            delivered_orders: Some(delivered.len()),
            fetched_at: Utc::now(),
            sanitized: true,
        };

        Ok(ProviderSnapshot::new(
            Provider::Swiggy,
            serde_json::to_value(snapshot)?,
        ))
    }
}
