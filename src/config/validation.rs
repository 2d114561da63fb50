use crate::config::types::{AnalysisConfig, Config, UserAgentConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_analysis_config(&config.analysis)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates analysis limits and timeouts
fn validate_analysis_config(config: &AnalysisConfig) -> Result<(), ConfigError> {
    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.link_check_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "link_check_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.link_check_timeout_secs > config.request_timeout_secs {
        return Err(ConfigError::Validation(format!(
            "link_check_timeout_secs ({}) cannot exceed request_timeout_secs ({})",
            config.link_check_timeout_secs, config.request_timeout_secs
        )));
    }

    if config.max_concurrent_link_checks < 1 || config.max_concurrent_link_checks > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_link_checks must be between 1 and 100, got {}",
            config.max_concurrent_link_checks
        )));
    }

    if let Some(0) = config.max_links_to_check {
        return Err(ConfigError::Validation(
            "max_links_to_check must be >= 1 when set".to_string(),
        ));
    }

    if config.max_html_depth < 1 {
        return Err(ConfigError::Validation(
            "max_html_depth must be >= 1".to_string(),
        ));
    }

    if config.max_url_length < 16 {
        return Err(ConfigError::Validation(format!(
            "max_url_length must be >= 16, got {}",
            config.max_url_length
        )));
    }

    if config.max_content_size < 1024 {
        return Err(ConfigError::Validation(format!(
            "max_content_size must be >= 1024 bytes, got {}",
            config.max_content_size
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent name cannot be empty".to_string(),
        ));
    }

    // Name must be a valid product token: alphanumeric + hyphens only
    if !config.name.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Err(ConfigError::Validation(format!(
            "user-agent name must contain only alphanumeric characters and hyphens, got '{}'",
            config.name
        )));
    }

    if config.version.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "user-agent version cannot contain whitespace, got '{}'",
            config.version
        )));
    }

    Ok(())
}
