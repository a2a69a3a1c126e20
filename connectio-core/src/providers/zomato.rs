//! Zomato provider.
//!
//! Single request to the order-history web route, authenticated by the
//! stored session cookies. The raw response is sanitized recursively and
//! persisted as-is; there is no normalization step for Zomato.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use connectio_common::models::{OrderSnapshot, Provider, ProviderSnapshot};
use connectio_common::traits::SessionCookieRepository;

use crate::http::HttpClient;
use crate::providers::{cookie_header, ProviderSync, SyncParams};
use crate::sanitize::sanitize_value;
use crate::Error;

const DEFAULT_ORDERS_URL: &str = "https://www.zomato.com/webroutes/user/orders";

pub struct ZomatoProvider {
    client: Arc<dyn HttpClient>,
    sessions: Arc<dyn SessionCookieRepository>,
    orders_url: String,
}

impl ZomatoProvider {
    pub fn new(client: Arc<dyn HttpClient>, sessions: Arc<dyn SessionCookieRepository>) -> Self {
        Self {
            client,
            sessions,
            orders_url: DEFAULT_ORDERS_URL.to_string(),
        }
    }

    pub fn with_orders_url(mut self, orders_url: impl Into<String>) -> Self {
        self.orders_url = orders_url.into();
        self
    }
}

#[async_trait]
impl ProviderSync for ZomatoProvider {
    fn provider(&self) -> Provider {
        Provider::Zomato
    }

    async fn sync(&self, _params: &SyncParams) -> Result<ProviderSnapshot, Error> {
        info!("syncing Zomato order history");

        let jar = self.sessions.cookies(Provider::Zomato).await?;
        let mut headers = HashMap::from([("accept".to_string(), "*/*".to_string())]);
        let cookie = cookie_header(&jar);
        if !cookie.is_empty() {
            headers.insert("cookie".to_string(), cookie);
        }

        let response = self.client.get(self.orders_url.clone(), headers).await?;

        match response.status {
            status if (200..300).contains(&status) => {}
            401 | 403 => {
                return Err(Error::Auth(
                    "Zomato session missing or expired; sign in and re-import cookies".into(),
                ))
            }
            status => {
                return Err(Error::Status {
                    status,
                    context: "Zomato order history".into(),
                })
            }
        }

        let mut orders: serde_json::Value = serde_json::from_str(&response.body)?;
        let removed = sanitize_value(&mut orders);
        debug!(removed, "sanitized Zomato order payload");

        let snapshot = OrderSnapshot {
            orders,
            total_orders: None,
            delivered_orders: None,
            fetched_at: Utc::now(),
            sanitized: true,
        };

        Ok(ProviderSnapshot::new(
            Provider::Zomato,
            serde_json::to_value(snapshot)?,
        ))
    }
}
