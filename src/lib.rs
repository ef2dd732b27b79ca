#![doc = include_str!("../README.md")]

pub mod cli;
pub mod config;
pub mod crawler;
pub mod error;
pub mod fetch;
pub mod log;
pub mod retry;
pub mod scrape;
pub mod selectors;
pub mod sink;
pub mod types;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::*;
pub use crawler::*;
pub use error::*;
pub use fetch::*;
pub use scrape::*;
pub use sink::*;
pub use types::*;
