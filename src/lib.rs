//! Profile-Scraper: a resilient multi-worker career-history extractor
//!
//! This crate drives one browser session per worker across a partition of
//! public profile pages, extracting employment, education, skills and contact
//! details into a tabular export. Anti-automation challenges are handled by an
//! explicit recovery state machine; failures are isolated per field, per list
//! item and per entry so that a run always produces an export.

pub mod browser;
pub mod cache;
pub mod config;
pub mod export;
pub mod extract;
pub mod input;
pub mod model;
pub mod notify;
pub mod orchestrator;
pub mod recovery;
pub mod worker;

use thiserror::Error;

/// Main error type for Profile-Scraper operations
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Browser driver error: {0}")]
    Driver(#[from] DriverError),

    #[error("Invalid recovery transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: recovery::RecoveryState,
        to: recovery::RecoveryState,
    },

    #[error("Malformed entry: {0}")]
    Entry(#[from] input::EntryParseError),

    #[error("Worker #{worker} failed to join: {message}")]
    WorkerJoin { worker: usize, message: String },

    #[error("Export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors surfaced by the browser automation seam
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Driver command '{command}' failed: {message}")]
    Command {
        command: &'static str,
        message: String,
    },

    #[error("No such element: {0}")]
    NoSuchElement(String),

    #[error("Session error: {0}")]
    Session(String),
}

impl DriverError {
    /// Wraps any displayable driver failure for the named command
    pub fn command(command: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Command {
            command,
            message: err.to_string(),
        }
    }
}

/// Result type alias for Profile-Scraper operations
pub type Result<T> = std::result::Result<T, ScraperError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for browser driver operations
pub type DriverResult<T> = std::result::Result<T, DriverError>;

// Re-export commonly used types
pub use config::Config;
pub use model::{Education, Job, Profile, ScrapingResult};
pub use orchestrator::{run_scrape, RunReport};
pub use worker::Worker;
