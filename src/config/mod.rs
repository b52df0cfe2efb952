//! Configuration loading, validation, and built-in keyword vocabulary

pub mod keywords;
mod parser;
mod types;
mod validation;

pub use keywords::{DEFAULT_NON_PRIORITY_KEYWORDS, DEFAULT_PRIORITY_KEYWORDS};
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{
    Config, CrawlerConfig, KeywordsConfig, ModelConfig, OutputConfig, UserAgentConfig,
};
pub use validation::validate;
