// connectio-common/src/traits/repository_traits.rs

use async_trait::async_trait;

use crate::error::Error;
use crate::models::provider::Provider;
use crate::models::session::SessionCookie;
use crate::models::snapshot::ProviderSnapshot;

/// Keyed snapshot store: one row per provider, last writer wins.
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Insert or fully replace the snapshot for `snapshot.provider`.
    async fn upsert(&self, snapshot: &ProviderSnapshot) -> Result<(), Error>;

    async fn get(&self, provider: Provider) -> Result<Option<ProviderSnapshot>, Error>;

    async fn delete(&self, provider: Provider) -> Result<(), Error>;

    /// Every stored snapshot, for the data-viewer surface.
    async fn list(&self) -> Result<Vec<ProviderSnapshot>, Error>;
}

/// The set of providers the user has toggled on. A UI-state cache only;
/// whether data exists is answered by the snapshot store.
#[async_trait]
pub trait ConnectedAppsRepository: Send + Sync {
    async fn set_connected(&self, provider: Provider, connected: bool) -> Result<(), Error>;

    async fn is_connected(&self, provider: Provider) -> Result<bool, Error>;

    async fn connected(&self) -> Result<Vec<Provider>, Error>;
}

/// Session cookies captured per provider, replacing the browser cookie jar.
#[async_trait]
pub trait SessionCookieRepository: Send + Sync {
    /// Replace the stored jar for `provider` with `cookies`.
    async fn store_cookies(&self, provider: Provider, cookies: &[SessionCookie])
        -> Result<(), Error>;

    async fn cookies(&self, provider: Provider) -> Result<Vec<SessionCookie>, Error>;

    async fn clear(&self, provider: Provider) -> Result<(), Error>;
}
