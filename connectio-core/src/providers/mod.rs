// connectio-core/src/providers/mod.rs

use async_trait::async_trait;

use connectio_common::models::{Provider, ProviderSnapshot, SessionCookie};

use crate::Error;

/// Connection state for one provider, as the front end observes it.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionStatus {
    Connected,
    Connecting,
    Disconnected,
}

/// Per-action input. GitHub requires `username`; the order providers
/// ignore it.
#[derive(Debug, Clone, Default)]
pub struct SyncParams {
    pub username: Option<String>,
}

impl SyncParams {
    pub fn for_username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
        }
    }
}

/// One provider's fetch-paginate-sanitize strategy. Implementations return
/// a finished snapshot or an error; persistence is the sync service's job,
/// so a failed run can never clobber a previously good snapshot.
#[async_trait]
pub trait ProviderSync: Send + Sync {
    fn provider(&self) -> Provider;

    async fn sync(&self, params: &SyncParams) -> Result<ProviderSnapshot, Error>;
}

/// Serialize a cookie jar into a `Cookie` header value. An empty jar yields
/// an empty string; absence of cookies is not an upfront error, the provider
/// endpoint rejects the request instead.
pub fn cookie_header(cookies: &[SessionCookie]) -> String {
    cookies
        .iter()
        .map(|c| format!("{}={}", c.name, c.value))
        .collect::<Vec<_>>()
        .join("; ")
}

pub mod github;
pub mod swiggy;
pub mod zomato;

pub use github::{GithubProvider, GithubProfileScraper};
pub use swiggy::SwiggyProvider;
pub use zomato::ZomatoProvider;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_header_joins_pairs() {
        let jar = vec![
            SessionCookie::new("sid", "abc"),
            SessionCookie::new("token", "xyz"),
        ];
        assert_eq!(cookie_header(&jar), "sid=abc; token=xyz");
    }

    #[test]
    fn cookie_header_empty_jar() {
        assert_eq!(cookie_header(&[]), "");
    }
}
