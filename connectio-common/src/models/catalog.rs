// connectio-common/src/models/catalog.rs

use serde::{Deserialize, Serialize};

/// One entry of the static provider catalog (name, logo, description,
/// availability flag). Consumed read-only by the front end.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMeta {
    pub id: String,
    pub name: String,
    pub description: String,
    pub logo: String,
    #[serde(default)]
    pub coming_soon: bool,
}

/// On-disk shape of the catalog document: `{ "apps": [ ... ] }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogDocument {
    pub apps: Vec<ProviderMeta>,
}
