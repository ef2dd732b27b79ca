use clap::Parser;

use crate::config::{CrawlConfig, DEFAULT_NUM_PAGES, DEFAULT_QUERY};
use crate::crawler::Crawler;
use crate::fetch::HttpFetcher;
use crate::log::ActivityLogger;
use crate::sink::NdjsonWriter;

#[derive(Parser)]
#[command(
    name = "kartcrawl",
    version,
    about = "Scrape Flipkart search results to newline-delimited JSON"
)]
pub struct Cli {
    /// Search query
    #[arg(short, long, default_value = DEFAULT_QUERY)]
    query: String,

    /// Number of result pages to scrape
    #[arg(short = 'n', long = "num-pages", default_value_t = DEFAULT_NUM_PAGES)]
    num_pages: u32,
}

pub fn run() -> crate::Result<()> {
    let cli = Cli::parse();
    let config = CrawlConfig::default();

    eprintln!("Scraping {} pages for query: {}", cli.num_pages, cli.query);

    // The activity log is best effort; a missing home dir is not fatal.
    let logger = ActivityLogger::new().ok();
    let fetcher = HttpFetcher::new()?;
    let sink = NdjsonWriter::create(&config.output_file)?;

    let mut crawler = Crawler::new(&config, &fetcher, sink, logger.as_ref());
    match crawler.run(&cli.query, cli.num_pages) {
        Ok(summary) => {
            eprintln!(
                "Wrote {} records to {}",
                summary.records_written,
                config.output_file.display()
            );
            Ok(())
        }
        Err(e) => {
            if let Some(log) = &logger {
                let _ = log.error("crawl failed", Some(&e.to_string()));
            }
            Err(e)
        }
    }
}
