use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use webpage_analyzer::config::load_config;
///
/// let config = load_config(Path::new("analyzer.toml")).unwrap();
/// println!("Max depth: {}", config.analysis.max_html_depth);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[analysis]
request-timeout-secs = 20
link-check-timeout-secs = 5
max-links-to-check = 50
max-concurrent-link-checks = 4
max-html-depth = 64
max-url-length = 1024
max-content-size = 2097152

[user-agent]
name = "TestAnalyzer"
version = "2.0"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.analysis.request_timeout_secs, 20);
        assert_eq!(config.analysis.link_check_timeout_secs, 5);
        assert_eq!(config.analysis.max_links_to_check, Some(50));
        assert_eq!(config.analysis.max_concurrent_link_checks, 4);
        assert_eq!(config.analysis.max_html_depth, 64);
        assert_eq!(config.user_agent.header_value(), "TestAnalyzer/2.0");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.analysis, crate::config::AnalysisConfig::default());
        assert_eq!(config.user_agent.header_value(), "WebPageAnalyzer/1.0");
        assert_eq!(config.analysis.max_links_to_check, None);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = parse_config("[analysis]\nmax-concurrent-link-checks = 3\n").unwrap();
        assert_eq!(config.analysis.max_concurrent_link_checks, 3);
        assert_eq!(config.analysis.request_timeout_secs, 30);
        assert_eq!(config.analysis.max_content_size, 10 * 1024 * 1024);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/analyzer.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let file = create_temp_config("[analysis]\nmax-concurrent-link-checks = 0\n");
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }
}
