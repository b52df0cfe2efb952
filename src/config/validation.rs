use crate::config::types::Config;
use crate::ConfigError;

/// Validates a parsed configuration
///
/// # Rules
///
/// - `fetch-timeout-ms` must be positive
/// - `high-score-threshold` must lie strictly between 0 and 1
/// - both keyword multipliers must be positive and finite
/// - the priority keyword list must not be empty
/// - model and database paths must not be empty
/// - the contact email must look like an email address
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.crawler.fetch_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "fetch-timeout-ms must be greater than 0".to_string(),
        ));
    }

    let threshold = config.crawler.high_score_threshold;
    if !threshold.is_finite() || threshold <= 0.0 || threshold >= 1.0 {
        return Err(ConfigError::Validation(format!(
            "high-score-threshold must lie strictly between 0 and 1, got {}",
            threshold
        )));
    }

    let pm = config.keywords.priority_multiplier;
    if !pm.is_finite() || pm <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "priority-multiplier must be positive, got {}",
            pm
        )));
    }

    let npm = config.keywords.non_priority_multiplier;
    if !npm.is_finite() || npm <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "non-priority-multiplier must be positive, got {}",
            npm
        )));
    }

    if config.keywords.priority.is_empty() {
        return Err(ConfigError::Validation(
            "keywords.priority must not be empty".to_string(),
        ));
    }

    if config.model.model_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "model-path must not be empty".to_string(),
        ));
    }

    if config.output.database_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "database-path must not be empty".to_string(),
        ));
    }

    if !config.user_agent.contact_email.contains('@') {
        return Err(ConfigError::Validation(format!(
            "contact-email does not look like an email address: {}",
            config.user_agent.contact_email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{
        CrawlerConfig, KeywordsConfig, ModelConfig, OutputConfig, UserAgentConfig,
    };

    fn valid_config() -> Config {
        Config {
            crawler: CrawlerConfig {
                fetch_timeout_ms: 10_000,
                high_score_threshold: 0.90,
            },
            user_agent: UserAgentConfig {
                crawler_name: "TestCrawler".to_string(),
                crawler_version: "1.0".to_string(),
                contact_url: "https://example.com/about".to_string(),
                contact_email: "admin@example.com".to_string(),
            },
            model: ModelConfig {
                model_path: "./model.json".to_string(),
                embeddings_path: None,
            },
            output: OutputConfig {
                database_path: "./fiscrawl.db".to_string(),
            },
            keywords: KeywordsConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = valid_config();
        config.crawler.fetch_timeout_ms = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let mut config = valid_config();
        config.crawler.high_score_threshold = 1.0;
        assert!(validate(&config).is_err());

        config.crawler.high_score_threshold = 0.0;
        assert!(validate(&config).is_err());

        config.crawler.high_score_threshold = -0.5;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_negative_multiplier_rejected() {
        let mut config = valid_config();
        config.keywords.priority_multiplier = -1.2;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_priority_list_rejected() {
        let mut config = valid_config();
        config.keywords.priority.clear();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_model_path_rejected() {
        let mut config = valid_config();
        config.model.model_path = "  ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_contact_email_rejected() {
        let mut config = valid_config();
        config.user_agent.contact_email = "not-an-email".to_string();
        assert!(validate(&config).is_err());
    }
}
