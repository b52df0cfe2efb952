//! Fiscrawl: a municipal-finance link scout
//!
//! This crate discovers hyperlinks on government/institutional web pages,
//! scores each one with a trained relevance classifier, expands the crawl
//! one level through the high scorers, and persists the merged ranked
//! result set.

pub mod config;
pub mod crawler;
pub mod features;
pub mod model;
pub mod ranking;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for fiscrawl operations
#[derive(Debug, Error)]
pub enum FiscrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No links found at {url}")]
    NoLinksFound { url: String },

    #[error("Model error: {0}")]
    Model(#[from] model::ModelError),

    #[error("Embedding table error: {0}")]
    Embedding(#[from] features::EmbeddingError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

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
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Unscoreable link: {0}")]
    InvalidLink(String),
}

/// Result type alias for fiscrawl operations
pub type Result<T> = std::result::Result<T, FiscrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlExpansion, PageFetcher, RankedLink, RankedResultSet};
pub use features::{FeatureExtractor, FeatureVector, KeywordConfig, LinkCandidate};
pub use model::RelevanceClassifier;
pub use ranking::{rank, ScoredLink};
pub use url::{extract_domain, is_file_link, is_valid_link, normalize_link};
