//! Shared Selectors

use once_cell::sync::Lazy;
use scraper::Selector;

/// Anchor marker identifying result-item links on a search page.
pub static RESULT_LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.CGtC98").expect("valid result link selector"));

/// Script block carrying the page's JSON-LD payload.
pub static JSONLD_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script#jsonLD").expect("valid jsonld selector"));
