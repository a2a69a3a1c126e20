// connectio-core/src/catalog.rs

use std::path::Path;

use connectio_common::models::{CatalogDocument, ProviderMeta};

use crate::Error;

const BUILTIN_CATALOG: &str = include_str!("../data/providers.json");

/// The static provider catalog (name, logo, description, availability).
/// Read-only; the default document is compiled in, and a deployment can
/// override it with a JSON file of the same shape.
#[derive(Debug, Clone)]
pub struct ProviderCatalog {
    apps: Vec<ProviderMeta>,
}

impl ProviderCatalog {
    pub fn load_default() -> Result<Self, Error> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, Error> {
        let document: CatalogDocument = serde_json::from_str(text)?;
        Ok(Self {
            apps: document.apps,
        })
    }

    pub fn providers(&self) -> &[ProviderMeta] {
        &self.apps
    }

    pub fn get(&self, id: &str) -> Option<&ProviderMeta> {
        self.apps.iter().find(|app| app.id == id)
    }

    /// Providers that can be connected today.
    pub fn available(&self) -> impl Iterator<Item = &ProviderMeta> {
        self.apps.iter().filter(|app| !app.coming_soon)
    }

    /// Providers listed but not yet wired up.
    pub fn coming_soon(&self) -> impl Iterator<Item = &ProviderMeta> {
        self.apps.iter().filter(|app| app.coming_soon)
    }
}
