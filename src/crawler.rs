use std::io::Write;

use crate::config::CrawlConfig;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::log::ActivityLogger;
use crate::scrape::Scraper;
use crate::sink::NdjsonWriter;

/// One run of the crawl: the page loop, per-product extraction, and NDJSON
/// streaming. Borrows its components; owns only the sink.
pub struct Crawler<'a, W: Write> {
    scraper: Scraper<'a>,
    sink: NdjsonWriter<W>,
    logger: Option<&'a ActivityLogger>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Result pages whose products were processed.
    pub pages: u32,
    pub products_seen: usize,
    pub records_written: usize,
}

impl<'a, W: Write> Crawler<'a, W> {
    pub fn new(
        config: &'a CrawlConfig,
        fetcher: &'a dyn Fetcher,
        sink: NdjsonWriter<W>,
        logger: Option<&'a ActivityLogger>,
    ) -> Self {
        Self {
            scraper: Scraper::new(config, fetcher),
            sink,
            logger,
        }
    }

    /// Crawl up to `num_pages` result pages for `query`, streaming each
    /// extracted record to the sink the moment it parses.
    ///
    /// The loop stops on the first page with no matching result links, or
    /// once the page number passes `num_pages`.
    pub fn run(&mut self, query: &str, num_pages: u32) -> Result<CrawlSummary> {
        let mut summary = CrawlSummary::default();
        let mut page_number = 1u32;

        loop {
            eprintln!("Scraping page {page_number}");
            if let Some(log) = self.logger {
                let _ = log.info("scraping page", Some(&page_number.to_string()));
            }

            let links = self.scraper.product_links(query, page_number)?;

            if links.is_empty() || page_number > num_pages {
                eprintln!("No more products found. Exiting...");
                break;
            }

            for (i, link) in links.iter().enumerate() {
                eprintln!("Scraping product {} of {}", i + 1, links.len());
                if let Some(record) = self.scraper.product_info(link)? {
                    self.sink.write(&record)?;
                    summary.records_written += 1;
                }
                summary.products_seen += 1;
            }

            summary.pages = page_number;
            page_number += 1;
        }

        if let Some(log) = self.logger {
            let _ = log.info(
                "crawl finished",
                Some(&format!(
                    "query={} pages={} records={}",
                    query, summary.pages, summary.records_written
                )),
            );
        }
        Ok(summary)
    }

    pub fn into_sink(self) -> NdjsonWriter<W> {
        self.sink
    }
}
