//! Legacy GitHub strategy: extract profile fields from the rendered profile
//! page instead of calling the API.
//!
//! Kept behind the same `ProviderSync` interface as the API-backed provider
//! but not registered by default. Markup extraction is brittle against
//! GitHub layout changes; fields that fail to match come back empty, and
//! only the pinned repositories are read. Prefer `GithubProvider`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use connectio_common::models::{
    GithubAccountData, GithubProfile, GithubSnapshot, GithubStats, Provider, ProviderSnapshot,
    RepoSummary, RepositoryTotals,
};

use crate::http::HttpClient;
use crate::providers::{ProviderSync, SyncParams};
use crate::Error;

const DEFAULT_BASE_URL: &str = "https://github.com";
const MAX_PINNED_REPOS: usize = 10;

static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<span[^>]*class="[^"]*p-name[^"]*"[^>]*>([^<]*)</span>"#).expect("name regex")
});
static NICKNAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<span[^>]*class="[^"]*p-nickname[^"]*"[^>]*>([^<]*)</span>"#)
        .expect("nickname regex")
});
static BIO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<div[^>]*class="[^"]*p-note[^"]*"[^>]*>(.*?)</div>"#).expect("bio regex")
});
static LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)itemprop="homeLocation"[^>]*>(.*?)</li>"#).expect("location regex")
});
static COMPANY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)itemprop="worksFor"[^>]*>(.*?)</li>"#).expect("company regex")
});
static AVATAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<img[^>]*class="[^"]*avatar-user[^"]*"[^>]*src="([^"]+)""#)
        .expect("avatar regex")
});
static FOLLOWERS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<span[^>]*class="[^"]*text-bold[^"]*"[^>]*>([^<]+)</span>\s*followers"#)
        .expect("followers regex")
});
static FOLLOWING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<span[^>]*class="[^"]*text-bold[^"]*"[^>]*>([^<]+)</span>\s*following"#)
        .expect("following regex")
});
static REPO_COUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)tab=repositories[^>]*>.*?<span[^>]*class="Counter"[^>]*>([^<]*)</span>"#)
        .expect("repo count regex")
});
static PINNED_REPO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<span[^>]*class="repo"[^>]*>([^<]+)</span>"#).expect("pinned repo regex")
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag regex"));

pub struct GithubProfileScraper {
    client: Arc<dyn HttpClient>,
    base_url: String,
}

impl GithubProfileScraper {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn capture(re: &Regex, html: &str) -> Option<String> {
        re.captures(html).map(|c| inner_text(&c[1]))
    }
}

fn inner_text(fragment: &str) -> String {
    TAG_RE.replace_all(fragment, "").trim().to_string()
}

/// Parse a rendered counter like "42", "1.2k" or "3m" into a number.
fn parse_counter(text: &str) -> u64 {
    let trimmed = text.trim().replace(',', "");
    if let Some(stripped) = trimmed.strip_suffix(['k', 'K']) {
        return (stripped.parse::<f64>().unwrap_or(0.0) * 1_000.0) as u64;
    }
    if let Some(stripped) = trimmed.strip_suffix(['m', 'M']) {
        return (stripped.parse::<f64>().unwrap_or(0.0) * 1_000_000.0) as u64;
    }
    trimmed.parse().unwrap_or(0)
}

#[async_trait]
impl ProviderSync for GithubProfileScraper {
    fn provider(&self) -> Provider {
        Provider::Github
    }

    async fn sync(&self, params: &SyncParams) -> Result<ProviderSnapshot, Error> {
        let username = params
            .username
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| Error::InvalidInput("GitHub username must not be empty".into()))?;

        info!(username, "scraping GitHub profile page (legacy path)");

        let url = format!("{}/{}", self.base_url, urlencoding::encode(username));
        let response = self.client.get(url, HashMap::new()).await?;

        if response.status == 404 {
            return Err(Error::NotFound(format!("GitHub user '{username}'")));
        }
        if !response.is_success() {
            return Err(Error::Status {
                status: response.status,
                context: format!("GitHub profile page for '{username}'"),
            });
        }

        let html = response.body;

        let repositories: Vec<RepoSummary> = PINNED_REPO_RE
            .captures_iter(&html)
            .take(MAX_PINNED_REPOS)
            .map(|c| RepoSummary {
                name: inner_text(&c[1]),
                ..RepoSummary::default()
            })
            .filter(|r| !r.name.is_empty())
            .collect();

        if repositories.is_empty() {
            warn!(username, "no pinned repositories matched in profile markup");
        }

        let login = Self::capture(&NICKNAME_RE, &html)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| username.to_string());

        let data = GithubAccountData {
            profile: GithubProfile {
                full_name: Self::capture(&NAME_RE, &html).filter(|s| !s.is_empty()),
                username: login.clone(),
                bio: Self::capture(&BIO_RE, &html).filter(|s| !s.is_empty()),
                location: Self::capture(&LOCATION_RE, &html).filter(|s| !s.is_empty()),
                company: Self::capture(&COMPANY_RE, &html).filter(|s| !s.is_empty()),
                avatar_url: AVATAR_RE
                    .captures(&html)
                    .map(|c| c[1].to_string()),
                profile_url: Some(format!("{}/{}", self.base_url, login)),
                ..GithubProfile::default()
            },
            stats: GithubStats {
                followers: Self::capture(&FOLLOWERS_RE, &html)
                    .map(|s| parse_counter(&s))
                    .unwrap_or(0),
                following: Self::capture(&FOLLOWING_RE, &html)
                    .map(|s| parse_counter(&s))
                    .unwrap_or(0),
                repositories: Self::capture(&REPO_COUNT_RE, &html)
                    .map(|s| parse_counter(&s))
                    .unwrap_or(0),
                public_gists: 0,
            },
            repository_totals: RepositoryTotals::from_repos(&repositories),
            repositories,
            fetched_at: Utc::now(),
        };

        let snapshot = GithubSnapshot::single(login, data);
        Ok(ProviderSnapshot::new(
            Provider::Github,
            serde_json::to_value(snapshot)?,
        ))
    }
}
