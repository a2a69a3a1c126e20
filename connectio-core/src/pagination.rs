//! Shared pagination loop for providers that fetch in pages.
//!
//! Termination rules, in order: a page with zero items, a provider-specific
//! short-page heuristic, or the hard page ceiling. The ceiling is the
//! circuit breaker against a misbehaving or changed remote API. A fixed
//! delay separates page requests to stay inside informal rate limits.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::Error;

#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Hard upper bound on the number of page requests.
    pub max_pages: usize,
    /// Stop after a page that returned fewer items than this.
    pub short_page_under: Option<usize>,
    /// Fixed delay between page requests.
    pub page_delay: Duration,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            max_pages: 100,
            short_page_under: None,
            page_delay: Duration::from_millis(500),
        }
    }
}

impl PageConfig {
    /// GitHub repo listing: stop only on an empty page or the ceiling.
    pub fn github() -> Self {
        Self {
            page_delay: Duration::from_millis(100),
            ..Self::default()
        }
    }

    /// Swiggy order listing: a page under 10 orders is the last one.
    pub fn swiggy() -> Self {
        Self {
            short_page_under: Some(10),
            ..Self::default()
        }
    }

    /// Zero-delay variant for tests.
    pub fn without_delay(mut self) -> Self {
        self.page_delay = Duration::ZERO;
        self
    }
}

/// Outcome of one page request: the items plus the cursor for the next page,
/// if the provider paginates by cursor rather than page number.
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

/// Drive `fetch_page(page_index, cursor)` until exhaustion and return the
/// concatenated items in retrieval order. No de-duplication is performed;
/// a provider that hands back a repeated cursor reproduces repeated items.
pub async fn paginate<T, F, Fut>(config: &PageConfig, mut fetch_page: F) -> Result<Vec<T>, Error>
where
    F: FnMut(usize, Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, Error>>,
{
    let mut collected = Vec::new();
    let mut cursor: Option<String> = None;

    for page_index in 0..config.max_pages {
        let page = fetch_page(page_index, cursor.take()).await?;
        let count = page.items.len();

        if count == 0 {
            debug!(page = page_index, "empty page, stopping pagination");
            break;
        }

        collected.extend(page.items);
        debug!(page = page_index, total = collected.len(), "fetched page");

        if let Some(threshold) = config.short_page_under {
            if count < threshold {
                debug!(page = page_index, count, "short page, stopping pagination");
                break;
            }
        }

        cursor = page.next_cursor;

        if page_index + 1 == config.max_pages {
            warn!(
                max_pages = config.max_pages,
                "page ceiling reached, stopping pagination"
            );
            break;
        }

        if !config.page_delay.is_zero() {
            sleep(config.page_delay).await;
        }
    }

    Ok(collected)
}
