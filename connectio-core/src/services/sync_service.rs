//! Orchestrates provider syncs against the local store.
//!
//! Per provider the observable state machine is
//! `Disconnected → Connecting → Connected`, back to `Disconnected` on
//! failure or explicit clear. A snapshot is written only after a provider
//! strategy returns success, so a failed run never overwrites a previously
//! good snapshot, and the connected flag advances only with the write.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::time::timeout;
use tracing::{error, info};

use connectio_common::models::{Provider, ProviderMeta, ProviderSnapshot};
use connectio_common::traits::{ConnectedAppsRepository, SnapshotRepository};

use crate::catalog::ProviderCatalog;
use crate::providers::{ConnectionStatus, ProviderSync, SyncParams};
use crate::Error;

const DEFAULT_SYNC_TIMEOUT: Duration = Duration::from_secs(10);

pub struct SyncService {
    snapshots: Arc<dyn SnapshotRepository>,
    connected: Arc<dyn ConnectedAppsRepository>,
    catalog: ProviderCatalog,
    strategies: HashMap<Provider, Arc<dyn ProviderSync>>,
    in_flight: DashMap<Provider, ()>,
    sync_timeout: Duration,
}

impl SyncService {
    pub fn new(
        snapshots: Arc<dyn SnapshotRepository>,
        connected: Arc<dyn ConnectedAppsRepository>,
        catalog: ProviderCatalog,
    ) -> Self {
        Self {
            snapshots,
            connected,
            catalog,
            strategies: HashMap::new(),
            in_flight: DashMap::new(),
            sync_timeout: DEFAULT_SYNC_TIMEOUT,
        }
    }

    pub fn with_sync_timeout(mut self, sync_timeout: Duration) -> Self {
        self.sync_timeout = sync_timeout;
        self
    }

    /// Register a provider strategy. The last registration for a provider
    /// wins.
    pub fn register(&mut self, strategy: Arc<dyn ProviderSync>) {
        self.strategies.insert(strategy.provider(), strategy);
    }

    /// Run one sync for `provider` to completion and persist the result.
    /// Rejects a second call for the same provider while one is in flight.
    pub async fn sync(
        &self,
        provider: Provider,
        params: SyncParams,
    ) -> Result<ProviderSnapshot, Error> {
        let strategy = self
            .strategies
            .get(&provider)
            .ok_or_else(|| Error::Provider(format!("no strategy registered for {provider}")))?
            .clone();

        match self.in_flight.entry(provider) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                return Err(Error::SyncInProgress(provider.to_string()));
            }
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(());
            }
        }

        info!(%provider, "sync started");
        let outcome = timeout(self.sync_timeout, strategy.sync(&params)).await;
        self.in_flight.remove(&provider);

        let snapshot = match outcome {
            Err(elapsed) => {
                error!(%provider, "sync timed out");
                return Err(elapsed.into());
            }
            Ok(Err(e)) => {
                error!(%provider, error = %e, "sync failed, keeping previous snapshot");
                return Err(e);
            }
            Ok(Ok(snapshot)) => snapshot,
        };

        self.snapshots.upsert(&snapshot).await?;
        self.connected.set_connected(provider, true).await?;
        info!(%provider, "snapshot stored, provider connected");

        Ok(snapshot)
    }

    /// Drop the stored snapshot and disconnect the provider.
    pub async fn clear(&self, provider: Provider) -> Result<(), Error> {
        self.snapshots.delete(provider).await?;
        self.connected.set_connected(provider, false).await?;
        info!(%provider, "snapshot cleared, provider disconnected");
        Ok(())
    }

    pub async fn snapshot(&self, provider: Provider) -> Result<Option<ProviderSnapshot>, Error> {
        self.snapshots.get(provider).await
    }

    pub async fn snapshots(&self) -> Result<Vec<ProviderSnapshot>, Error> {
        self.snapshots.list().await
    }

    pub async fn status(&self, provider: Provider) -> Result<ConnectionStatus, Error> {
        if self.in_flight.contains_key(&provider) {
            return Ok(ConnectionStatus::Connecting);
        }
        if self.connected.is_connected(provider).await? {
            Ok(ConnectionStatus::Connected)
        } else {
            Ok(ConnectionStatus::Disconnected)
        }
    }

    pub fn list_providers(&self) -> &[ProviderMeta] {
        self.catalog.providers()
    }

    pub fn catalog(&self) -> &ProviderCatalog {
        &self.catalog
    }
}
