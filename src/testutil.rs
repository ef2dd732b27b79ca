//! Scripted fetchers and HTML fixtures shared across module tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use reqwest::StatusCode;

use crate::error::{Result, ScrapeError};
use crate::fetch::{FetchResponse, Fetcher};
use crate::types::HeaderSet;

pub const SEARCH_HTML: &str = r#"
<html><body>
  <a class="CGtC98" href="/acme-monitor/p/itm1">Acme 24in Monitor</a>
  <a class="other" href="/not-a-result">ad</a>
  <a class="CGtC98" href="/zeta-monitor/p/itm2">Zeta 27in Monitor</a>
</body></html>
"#;

pub const EMPTY_SEARCH_HTML: &str = "<html><body><p>No results.</p></body></html>";

pub const PRODUCT_HTML: &str = r#"
<html><body>
<script id="jsonLD" type="application/ld+json">
[{"@type":"Product","name":"Acme 24in Monitor","brand":{"name":"Acme"},
"aggregateRating":{"ratingValue":4.3,"reviewCount":128},
"offers":{"price":"10999","priceCurrency":"INR"}}]
</script>
</body></html>
"#;

pub const NON_PRODUCT_HTML: &str = r#"
<html><body>
<script id="jsonLD" type="application/ld+json">
[{"@type":"BreadcrumbList","itemListElement":[]}]
</script>
</body></html>
"#;

#[derive(Debug, Clone, Copy)]
pub enum Step {
    Body(StatusCode, &'static str),
    ConnectionFailed,
}

/// In-memory `Fetcher` with a per-URL script. The final step of a script is
/// re-served on repeat requests; an unscripted URL fails the test.
#[derive(Default)]
pub struct ScriptedFetcher {
    steps: Mutex<HashMap<String, VecDeque<Step>>>,
    hits: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(self, url: &str, steps: Vec<Step>) -> Self {
        self.steps
            .lock()
            .unwrap()
            .insert(url.to_string(), steps.into());
        self
    }

    /// Shorthand for a URL that always answers 200 with `body`.
    pub fn serve(self, url: &str, body: &'static str) -> Self {
        self.script(url, vec![Step::Body(StatusCode::OK, body)])
    }

    pub fn hit_count(&self, url: &str) -> usize {
        self.hits
            .lock()
            .unwrap()
            .iter()
            .filter(|u| *u == url)
            .count()
    }
}

impl Fetcher for ScriptedFetcher {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn get(&self, url: &str, _headers: &HeaderSet) -> Result<FetchResponse> {
        self.hits.lock().unwrap().push(url.to_string());
        let mut steps = self.steps.lock().unwrap();
        let queue = steps
            .get_mut(url)
            .unwrap_or_else(|| panic!("unscripted request for {url}"));
        let step = if queue.len() > 1 {
            queue.pop_front().expect("non-empty queue")
        } else {
            *queue.front().expect("empty script")
        };
        match step {
            Step::Body(status, body) => Ok(FetchResponse {
                status,
                body: body.to_string(),
            }),
            Step::ConnectionFailed => Err(ScrapeError::Transport {
                url: url.to_string(),
                source: "connection refused".into(),
            }),
        }
    }
}
