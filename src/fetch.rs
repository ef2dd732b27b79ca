use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;

use crate::error::{Result, ScrapeError};
use crate::types::HeaderSet;

/// Raw outcome of a GET. Transport failures are `Err`; what a non-success
/// status means is left to the caller, because the two call sites disagree:
/// the search page parses whatever body came back, the detail page treats it
/// as a transient failure.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: StatusCode,
    pub body: String,
}

impl FetchResponse {
    /// Consume the response, failing with `HttpStatus` unless 2xx.
    pub fn ensure_success(self, url: &str) -> Result<String> {
        if self.status.is_success() {
            Ok(self.body)
        } else {
            Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: self.status,
            })
        }
    }
}

pub trait Fetcher: Send + Sync {
    fn name(&self) -> &'static str;
    fn get(&self, url: &str, headers: &HeaderSet) -> Result<FetchResponse>;
}

/// Blocking reqwest-backed fetcher. One client for the whole run.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(ScrapeError::ClientBuild)?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn name(&self) -> &'static str {
        "reqwest-blocking"
    }

    fn get(&self, url: &str, headers: &HeaderSet) -> Result<FetchResponse> {
        let resp = self
            .client
            .get(url)
            .headers(to_headermap(headers)?)
            .send()
            .map_err(|e| ScrapeError::Transport {
                url: url.to_string(),
                source: Box::new(e),
            })?;
        let status = resp.status();
        let body = resp.text().map_err(|e| ScrapeError::Transport {
            url: url.to_string(),
            source: Box::new(e),
        })?;
        Ok(FetchResponse { status, body })
    }
}

fn to_headermap(hs: &HeaderSet) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (k, v) in &hs.0 {
        let kn = HeaderName::from_bytes(k.as_bytes()).map_err(|e| ScrapeError::InvalidHeader {
            name: k.clone(),
            detail: e.to_string(),
        })?;
        let vv = HeaderValue::from_str(v).map_err(|e| ScrapeError::InvalidHeader {
            name: k.clone(),
            detail: e.to_string(),
        })?;
        headers.insert(kn, vv);
    }
    Ok(headers)
}
