//! GitHub provider, API-backed path.
//!
//! Fetches the user profile, then paginates the repository listing until an
//! empty page or the page ceiling. 404 and 403 from the profile endpoint are
//! mapped to distinguished not-found and rate-limit errors.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};

use connectio_common::models::{
    GithubAccountData, GithubProfile, GithubSnapshot, GithubStats, Provider, ProviderSnapshot,
    RateLimitInfo, RepoSummary, RepositoryTotals,
};

use crate::http::HttpClient;
use crate::pagination::{paginate, Page, PageConfig};
use crate::providers::{ProviderSync, SyncParams};
use crate::Error;

pub mod scrape;
pub use scrape::GithubProfileScraper;

const DEFAULT_API_URL: &str = "https://api.github.com";
const PER_PAGE: usize = 100;

pub struct GithubProvider {
    client: Arc<dyn HttpClient>,
    api_url: String,
    pages: PageConfig,
}

impl GithubProvider {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self {
            client,
            api_url: DEFAULT_API_URL.to_string(),
            pages: PageConfig::github(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_pages(mut self, pages: PageConfig) -> Self {
        self.pages = pages;
        self
    }

    fn headers(&self) -> HashMap<String, String> {
        HashMap::from([(
            "Accept".to_string(),
            "application/vnd.github.v3+json".to_string(),
        )])
    }

    fn error_for_status(&self, status: u16, entity: &str) -> Error {
        match status {
            404 => Error::NotFound(entity.to_string()),
            403 => Error::RateLimited("GitHub API".to_string()),
            _ => Error::Status {
                status,
                context: entity.to_string(),
            },
        }
    }

    async fn fetch_profile(&self, username: &str) -> Result<GithubUserJson, Error> {
        let url = format!(
            "{}/users/{}",
            self.api_url,
            urlencoding::encode(username)
        );
        let response = self.client.get(url, self.headers()).await?;

        if !response.is_success() {
            return Err(self.error_for_status(
                response.status,
                &format!("GitHub user '{username}'"),
            ));
        }

        Ok(serde_json::from_str(&response.body)?)
    }

    async fn fetch_repos(&self, username: &str) -> Result<Vec<GithubRepoJson>, Error> {
        let encoded = urlencoding::encode(username).into_owned();

        paginate(&self.pages, |page_index, _cursor| {
            let url = format!(
                "{}/users/{}/repos?per_page={}&page={}&sort=updated&direction=desc",
                self.api_url,
                encoded,
                PER_PAGE,
                page_index + 1
            );
            async move {
                let response = self.client.get(url, self.headers()).await?;
                if !response.is_success() {
                    return Err(self.error_for_status(
                        response.status,
                        &format!("GitHub repositories for '{username}'"),
                    ));
                }
                let items: Vec<GithubRepoJson> = serde_json::from_str(&response.body)?;
                Ok(Page {
                    items,
                    next_cursor: None,
                })
            }
        })
        .await
    }

    /// Current API quota, useful before a large sync on the key-less API.
    pub async fn rate_limit(&self) -> Result<RateLimitInfo, Error> {
        let url = format!("{}/rate_limit", self.api_url);
        let response = self.client.get(url, self.headers()).await?;

        if !response.is_success() {
            return Err(self.error_for_status(response.status, "GitHub rate limit"));
        }

        let envelope: RateLimitJson = serde_json::from_str(&response.body)?;
        Ok(envelope.rate)
    }
}

#[async_trait]
impl ProviderSync for GithubProvider {
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

        info!(username, "syncing GitHub account data");

        let user = self.fetch_profile(username).await?;
        let repos = self.fetch_repos(username).await?;
        debug!(username, repos = repos.len(), "GitHub retrieval complete");

        let repositories: Vec<RepoSummary> = repos.into_iter().map(RepoSummary::from).collect();
        let data = GithubAccountData {
            profile: GithubProfile {
                full_name: user.name,
                username: user.login.clone(),
                bio: user.bio,
                location: user.location,
                company: user.company,
                avatar_url: user.avatar_url,
                profile_url: user.html_url,
                blog: user.blog,
                email: user.email,
                twitter_username: user.twitter_username,
                hireable: user.hireable,
                created_at: user.created_at,
                updated_at: user.updated_at,
            },
            stats: GithubStats {
                followers: user.followers,
                following: user.following,
                repositories: user.public_repos,
                public_gists: user.public_gists,
            },
            repository_totals: RepositoryTotals::from_repos(&repositories),
            repositories,
            fetched_at: Utc::now(),
        };

        let snapshot = GithubSnapshot::single(user.login, data);
        Ok(ProviderSnapshot::new(
            Provider::Github,
            serde_json::to_value(snapshot)?,
        ))
    }
}

// --- API response types ---

#[derive(Debug, Deserialize)]
struct GithubUserJson {
    login: String,
    name: Option<String>,
    bio: Option<String>,
    location: Option<String>,
    company: Option<String>,
    avatar_url: Option<String>,
    html_url: Option<String>,
    blog: Option<String>,
    email: Option<String>,
    twitter_username: Option<String>,
    hireable: Option<bool>,
    created_at: Option<String>,
    updated_at: Option<String>,
    #[serde(default)]
    followers: u64,
    #[serde(default)]
    following: u64,
    #[serde(default)]
    public_repos: u64,
    #[serde(default)]
    public_gists: u64,
}

#[derive(Debug, Deserialize)]
struct GithubRepoJson {
    name: String,
    full_name: Option<String>,
    description: Option<String>,
    language: Option<String>,
    html_url: Option<String>,
    #[serde(default)]
    private: bool,
    #[serde(default)]
    fork: bool,
    #[serde(default)]
    archived: bool,
    #[serde(default)]
    disabled: bool,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    watchers_count: u64,
    #[serde(default)]
    forks_count: u64,
    #[serde(default)]
    open_issues_count: u64,
    #[serde(default)]
    size: u64,
    default_branch: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
    pushed_at: Option<String>,
    #[serde(default)]
    topics: Vec<String>,
    license: Option<LicenseJson>,
    homepage: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LicenseJson {
    name: Option<String>,
}

impl From<GithubRepoJson> for RepoSummary {
    fn from(repo: GithubRepoJson) -> Self {
        RepoSummary {
            name: repo.name,
            full_name: repo.full_name,
            description: repo.description,
            language: repo.language,
            url: repo.html_url,
            private: repo.private,
            fork: repo.fork,
            archived: repo.archived,
            disabled: repo.disabled,
            star_count: repo.stargazers_count,
            watchers_count: repo.watchers_count,
            fork_count: repo.forks_count,
            open_issues_count: repo.open_issues_count,
            size: repo.size,
            default_branch: repo.default_branch,
            created_at: repo.created_at,
            updated_at: repo.updated_at,
            pushed_at: repo.pushed_at,
            topics: repo.topics,
            license: repo.license.and_then(|l| l.name),
            homepage: repo.homepage,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RateLimitJson {
    rate: RateLimitInfo,
}
