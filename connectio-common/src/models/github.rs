// connectio-common/src/models/github.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted GitHub document: keyed by username, at most one username's data
/// retained at a time. Connecting a new username discards the previous one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct GithubSnapshot(pub BTreeMap<String, GithubAccountData>);

impl GithubSnapshot {
    pub fn single(username: impl Into<String>, data: GithubAccountData) -> Self {
        let mut map = BTreeMap::new();
        map.insert(username.into(), data);
        Self(map)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GithubAccountData {
    pub profile: GithubProfile,
    pub repositories: Vec<RepoSummary>,
    pub stats: GithubStats,
    pub repository_totals: RepositoryTotals,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GithubProfile {
    pub full_name: Option<String>,
    pub username: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub avatar_url: Option<String>,
    pub profile_url: Option<String>,
    pub blog: Option<String>,
    pub email: Option<String>,
    pub twitter_username: Option<String>,
    pub hireable: Option<bool>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// One repository, reduced to the fields the viewer shows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RepoSummary {
    pub name: String,
    pub full_name: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub url: Option<String>,
    pub private: bool,
    pub fork: bool,
    pub archived: bool,
    pub disabled: bool,
    pub star_count: u64,
    pub watchers_count: u64,
    pub fork_count: u64,
    pub open_issues_count: u64,
    pub size: u64,
    pub default_branch: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub pushed_at: Option<String>,
    pub topics: Vec<String>,
    pub license: Option<String>,
    pub homepage: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GithubStats {
    pub followers: u64,
    pub following: u64,
    pub repositories: u64,
    pub public_gists: u64,
}

/// Counts computed over the retrieved repository list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryTotals {
    pub total: u64,
    pub public: u64,
    pub private: u64,
    pub forks: u64,
    pub archived: u64,
}

impl RepositoryTotals {
    pub fn from_repos(repos: &[RepoSummary]) -> Self {
        Self {
            total: repos.len() as u64,
            public: repos.iter().filter(|r| !r.private).count() as u64,
            private: repos.iter().filter(|r| r.private).count() as u64,
            forks: repos.iter().filter(|r| r.fork).count() as u64,
            archived: repos.iter().filter(|r| r.archived).count() as u64,
        }
    }
}

/// Current API quota as reported by the rate-limit endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateLimitInfo {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}
