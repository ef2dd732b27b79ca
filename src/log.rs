use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::Utc;

use crate::error::Result;

#[derive(Debug, Clone, Copy)]
pub enum LogLevel {
    Info,
    Error,
}

/// Appends run events to `~/.kartcrawl/activity.log`.
///
/// Best effort only: callers hold an `Option<&ActivityLogger>` and ignore
/// write failures, so a missing home directory never blocks a crawl.
pub struct ActivityLogger {
    log_path: PathBuf,
}

impl ActivityLogger {
    pub fn new() -> Result<Self> {
        let user_dirs = directories::UserDirs::new().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "could not determine home directory",
            )
        })?;
        let dir = user_dirs.home_dir().join(".kartcrawl");
        fs::create_dir_all(&dir)?;

        Ok(Self {
            log_path: dir.join("activity.log"),
        })
    }

    pub fn log(&self, level: LogLevel, event: &str, details: Option<&str>) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        let level_str = match level {
            LogLevel::Info => "🟢",
            LogLevel::Error => "🔴",
        };

        writeln!(
            file,
            "{} {} {} {}",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
            level_str,
            event,
            details.unwrap_or("")
        )?;

        Ok(())
    }

    pub fn info(&self, event: &str, details: Option<&str>) -> Result<()> {
        self.log(LogLevel::Info, event, details)
    }

    pub fn error(&self, event: &str, details: Option<&str>) -> Result<()> {
        self.log(LogLevel::Error, event, details)
    }
}
