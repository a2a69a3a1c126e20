// connectio-common/src/models/snapshot.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::provider::Provider;

/// The single persisted document for one provider. Writing a new snapshot
/// fully replaces the previous one for that provider key; there is no
/// history and no merge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderSnapshot {
    pub provider: Provider,
    pub payload: Value,
    pub fetched_at: DateTime<Utc>,
}

impl ProviderSnapshot {
    pub fn new(provider: Provider, payload: Value) -> Self {
        Self {
            provider,
            payload,
            fetched_at: Utc::now(),
        }
    }
}
