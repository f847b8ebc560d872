use crate::config::types::{AnalyzerConfig, Config, FetchConfig, OutputConfig, ProxyConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_proxy_config(&config.proxy)?;
    validate_fetch_config(&config.fetch)?;
    validate_analyzer_config(&config.analyzer)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the proxy configuration
fn validate_proxy_config(config: &ProxyConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid proxy base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "proxy base-url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::Validation(
            "proxy base-url must have a host".to_string(),
        ));
    }

    Ok(())
}

/// Validates the fetch gateway configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.requests_per_second < 1 || config.requests_per_second > 1000 {
        return Err(ConfigError::Validation(format!(
            "requests-per-second must be between 1 and 1000, got {}",
            config.requests_per_second
        )));
    }

    if config.retries > 10 {
        return Err(ConfigError::Validation(format!(
            "retries must be at most 10, got {}",
            config.retries
        )));
    }

    Ok(())
}

/// Validates the batch analyzer configuration
fn validate_analyzer_config(config: &AnalyzerConfig) -> Result<(), ConfigError> {
    if config.batch_size < 1 || config.batch_size > 100 {
        return Err(ConfigError::Validation(format!(
            "batch-size must be between 1 and 100, got {}",
            config.batch_size
        )));
    }

    if config.batch_pause_ms > 60_000 {
        return Err(ConfigError::Validation(format!(
            "batch-pause-ms must be at most 60000, got {}",
            config.batch_pause_ms
        )));
    }

    Ok(())
}

/// Validates the output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.history_path.is_empty() {
        return Err(ConfigError::Validation(
            "history-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_invalid_proxy_url() {
        let mut config = Config::default();
        config.proxy.base_url = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_proxy_url_bad_scheme() {
        let mut config = Config::default();
        config.proxy.base_url = "ftp://example.com".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_requests_per_second_zero() {
        let mut config = Config::default();
        config.fetch.requests_per_second = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_requests_per_second_too_high() {
        let mut config = Config::default();
        config.fetch.requests_per_second = 5000;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_retries_too_high() {
        let mut config = Config::default();
        config.fetch.retries = 11;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_batch_size_zero() {
        let mut config = Config::default();
        config.analyzer.batch_size = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_batch_size_too_large() {
        let mut config = Config::default();
        config.analyzer.batch_size = 101;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_history_path() {
        let mut config = Config::default();
        config.output.history_path = String::new();
        assert!(validate(&config).is_err());
    }
}
