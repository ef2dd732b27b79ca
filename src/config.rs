use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::types::HeaderSet;

pub const DEFAULT_QUERY: &str = "laptop";
pub const DEFAULT_NUM_PAGES: u32 = 5;

/// Run configuration, built once and threaded into the fetcher and scraper.
/// No ambient/global state.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub base_url: Url,
    pub headers: HeaderSet,
    pub output_file: PathBuf,
    /// Total attempt budget for one detail-page fetch.
    pub max_attempts: u32,
    /// First retry delay; doubles after each transient failure.
    pub base_backoff: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("https://www.flipkart.com/").expect("valid base url"),
            headers: HeaderSet::empty()
                .with("Accept", "*/*")
                .with("Accept-Encoding", "gzip, deflate, br")
                .with("Accept-Language", "en-US,en;q=0.9,en-IN;q=0.8"),
            output_file: PathBuf::from("products.ndjson"),
            max_attempts: 5,
            base_backoff: Duration::from_secs(3),
        }
    }
}

#[cfg(test)]
impl CrawlConfig {
    /// Test config: production values minus the real backoff sleeps.
    pub(crate) fn for_tests() -> Self {
        Self {
            base_backoff: Duration::ZERO,
            ..Self::default()
        }
    }
}
