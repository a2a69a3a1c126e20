// connectio-core/tests/common/mod.rs

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use connectio_common::models::{Provider, ProviderSnapshot, SessionCookie};
use connectio_common::traits::{
    ConnectedAppsRepository, SessionCookieRepository, SnapshotRepository,
};
use connectio_core::http::{HttpClient, HttpResponse};
use connectio_core::Error;

/// Canned-response HTTP client. Routes are checked in insertion order and
/// matched by substring, so register the most specific pattern first.
#[derive(Default)]
pub struct StubHttpClient {
    routes: Vec<(String, u16, String)>,
    pub requests: AtomicUsize,
}

impl StubHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, pattern: &str, status: u16, body: &str) -> Self {
        self.routes
            .push((pattern.to_string(), status, body.to_string()));
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpClient for StubHttpClient {
    async fn get(
        &self,
        url: String,
        _headers: HashMap<String, String>,
    ) -> Result<HttpResponse, Error> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        for (pattern, status, body) in &self.routes {
            if url.contains(pattern.as_str()) {
                return Ok(HttpResponse {
                    status: *status,
                    body: body.clone(),
                });
            }
        }
        Ok(HttpResponse {
            status: 404,
            body: String::new(),
        })
    }
}

/// In-memory snapshot store.
#[derive(Default)]
pub struct MemorySnapshotRepository {
    pub data: Mutex<HashMap<Provider, ProviderSnapshot>>,
}

#[async_trait]
impl SnapshotRepository for MemorySnapshotRepository {
    async fn upsert(&self, snapshot: &ProviderSnapshot) -> Result<(), Error> {
        self.data
            .lock()
            .unwrap()
            .insert(snapshot.provider, snapshot.clone());
        Ok(())
    }

    async fn get(&self, provider: Provider) -> Result<Option<ProviderSnapshot>, Error> {
        Ok(self.data.lock().unwrap().get(&provider).cloned())
    }

    async fn delete(&self, provider: Provider) -> Result<(), Error> {
        self.data.lock().unwrap().remove(&provider);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ProviderSnapshot>, Error> {
        Ok(self.data.lock().unwrap().values().cloned().collect())
    }
}

/// In-memory connected-apps set.
#[derive(Default)]
pub struct MemoryConnectedAppsRepository {
    pub data: Mutex<HashSet<Provider>>,
}

#[async_trait]
impl ConnectedAppsRepository for MemoryConnectedAppsRepository {
    async fn set_connected(&self, provider: Provider, connected: bool) -> Result<(), Error> {
        let mut set = self.data.lock().unwrap();
        if connected {
            set.insert(provider);
        } else {
            set.remove(&provider);
        }
        Ok(())
    }

    async fn is_connected(&self, provider: Provider) -> Result<bool, Error> {
        Ok(self.data.lock().unwrap().contains(&provider))
    }

    async fn connected(&self) -> Result<Vec<Provider>, Error> {
        Ok(self.data.lock().unwrap().iter().copied().collect())
    }
}

/// In-memory cookie jar.
#[derive(Default)]
pub struct MemorySessionCookieRepository {
    pub data: Mutex<HashMap<Provider, Vec<SessionCookie>>>,
}

#[async_trait]
impl SessionCookieRepository for MemorySessionCookieRepository {
    async fn store_cookies(
        &self,
        provider: Provider,
        cookies: &[SessionCookie],
    ) -> Result<(), Error> {
        self.data
            .lock()
            .unwrap()
            .insert(provider, cookies.to_vec());
        Ok(())
    }

    async fn cookies(&self, provider: Provider) -> Result<Vec<SessionCookie>, Error> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .get(&provider)
            .cloned()
            .unwrap_or_default())
    }

    async fn clear(&self, provider: Provider) -> Result<(), Error> {
        self.data.lock().unwrap().remove(&provider);
        Ok(())
    }
}
