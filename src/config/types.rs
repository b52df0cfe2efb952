use crate::config::keywords::{DEFAULT_NON_PRIORITY_KEYWORDS, DEFAULT_PRIORITY_KEYWORDS};
use serde::Deserialize;

/// Main configuration structure for fiscrawl
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub model: ModelConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub keywords: KeywordsConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Per-request fetch timeout (milliseconds)
    #[serde(rename = "fetch-timeout-ms", default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// First-pass score above which a link is re-fetched for expansion
    #[serde(rename = "high-score-threshold", default = "default_high_score_threshold")]
    pub high_score_threshold: f64,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Classifier model configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Path to the persisted classifier blob
    #[serde(rename = "model-path")]
    pub model_path: String,

    /// Path to a GloVe-style word-embedding table (optional; the semantic
    /// signal is 0 for every candidate when absent)
    #[serde(rename = "embeddings-path", default)]
    pub embeddings_path: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}

/// Keyword lists and scoring knobs
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordsConfig {
    /// High-value terms; matches are reinforced
    #[serde(default = "default_priority_keywords")]
    pub priority: Vec<String>,

    /// Low-value terms; matches are penalized
    #[serde(rename = "non-priority", default = "default_non_priority_keywords")]
    pub non_priority: Vec<String>,

    /// Reinforcement factor applied to the best priority match
    #[serde(rename = "priority-multiplier", default = "default_priority_multiplier")]
    pub priority_multiplier: f64,

    /// Penalty factor applied to the best non-priority match
    #[serde(
        rename = "non-priority-multiplier",
        default = "default_non_priority_multiplier"
    )]
    pub non_priority_multiplier: f64,
}

impl Default for KeywordsConfig {
    fn default() -> Self {
        Self {
            priority: default_priority_keywords(),
            non_priority: default_non_priority_keywords(),
            priority_multiplier: default_priority_multiplier(),
            non_priority_multiplier: default_non_priority_multiplier(),
        }
    }
}

fn default_fetch_timeout_ms() -> u64 {
    10_000
}

fn default_high_score_threshold() -> f64 {
    0.90
}

fn default_priority_multiplier() -> f64 {
    1.2
}

fn default_non_priority_multiplier() -> f64 {
    0.95
}

fn default_priority_keywords() -> Vec<String> {
    DEFAULT_PRIORITY_KEYWORDS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_non_priority_keywords() -> Vec<String> {
    DEFAULT_NON_PRIORITY_KEYWORDS
        .iter()
        .map(|s| s.to_string())
        .collect()
}
