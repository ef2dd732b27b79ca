use std::thread;

use scraper::Html;
use serde_json::Value;
use url::Url;

use crate::config::CrawlConfig;
use crate::error::{Result, ScrapeError};
use crate::fetch::Fetcher;
use crate::retry::Backoff;
use crate::selectors::{JSONLD_SELECTOR, RESULT_LINK_SELECTOR};
use crate::types::ProductRecord;

/// Search-page listing and detail-page extraction against one site.
pub struct Scraper<'a> {
    config: &'a CrawlConfig,
    fetcher: &'a dyn Fetcher,
}

impl<'a> Scraper<'a> {
    pub fn new(config: &'a CrawlConfig, fetcher: &'a dyn Fetcher) -> Self {
        Self { config, fetcher }
    }

    /// List result-item links for one (query, page) pair, in document order.
    ///
    /// No retry here: a transport error on the search page ends the run. A
    /// non-success status is not an error either; its body simply yields no
    /// matching anchors.
    pub fn product_links(&self, query: &str, page_number: u32) -> Result<Vec<String>> {
        let url = self.search_url(query, page_number)?;
        let response = self.fetcher.get(url.as_str(), &self.config.headers)?;
        let doc = Html::parse_document(&response.body);
        Ok(doc
            .select(&RESULT_LINK_SELECTOR)
            .filter_map(|a| a.value().attr("href"))
            .map(str::to_string)
            .collect())
    }

    /// Extract one product's JSON-LD record.
    ///
    /// Transport errors and bad statuses are retried on a doubling backoff
    /// up to the attempt budget, then degrade to `Ok(None)`. Structural
    /// failures in the payload are not retried and propagate.
    pub fn product_info(&self, product_url: &str) -> Result<Option<ProductRecord>> {
        let url = self
            .config
            .base_url
            .join(product_url)
            .map_err(|_| ScrapeError::InvalidUrl(product_url.to_string()))?;

        let mut backoff = Backoff::new(self.config.base_backoff);
        for attempt in 1..=self.config.max_attempts {
            match self
                .fetcher
                .get(url.as_str(), &self.config.headers)
                .and_then(|r| r.ensure_success(url.as_str()))
            {
                Ok(html) => return self.parse_product(url.as_str(), &html),
                Err(e) if e.is_transient() => {
                    if attempt < self.config.max_attempts {
                        let delay = backoff.next().unwrap_or_default();
                        eprintln!("Error: {e}. Retrying in {} seconds...", delay.as_secs());
                        thread::sleep(delay);
                    } else {
                        eprintln!("Error: {e}. Skipping product.");
                        return Ok(None);
                    }
                }
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }

    fn parse_product(&self, url: &str, html: &str) -> Result<Option<ProductRecord>> {
        let doc = Html::parse_document(html);
        let block = doc
            .select(&JSONLD_SELECTOR)
            .next()
            .map(|s| s.text().collect::<String>())
            .ok_or_else(|| ScrapeError::MissingJsonLd(url.to_string()))?;

        let payload: Value =
            serde_json::from_str(block.trim()).map_err(|e| ScrapeError::MalformedJsonLd {
                url: url.to_string(),
                detail: e.to_string(),
            })?;
        // The payload is an array; its first element describes the page.
        let first = payload
            .as_array()
            .and_then(|a| a.first())
            .ok_or_else(|| ScrapeError::MalformedJsonLd {
                url: url.to_string(),
                detail: "expected a non-empty JSON array".to_string(),
            })?;

        // An absent `@type` is structural, like any other missing field; a
        // present non-Product type just means this page yields no record.
        let declared = first
            .get("@type")
            .ok_or_else(|| ScrapeError::MissingField {
                url: url.to_string(),
                field: "@type",
            })?;
        if declared.as_str() != Some("Product") {
            return Ok(None);
        }
        ProductRecord::from_jsonld(url, first).map(Some)
    }

    fn search_url(&self, query: &str, page_number: u32) -> Result<Url> {
        let mut url = self
            .config
            .base_url
            .join("search")
            .map_err(|_| ScrapeError::InvalidUrl(query.to_string()))?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("page", &page_number.to_string());
        Ok(url)
    }
}
