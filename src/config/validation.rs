use crate::config::types::{Config, DriverConfig, SessionConfig};
use crate::url::PageUrl;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_session_config(&config.session)?;
    validate_driver_config(&config.driver)?;

    if config.storage.path.is_empty() {
        return Err(ConfigError::Validation(
            "storage path cannot be empty".to_string(),
        ));
    }

    // Ignore rules must compile; the runtime forms are rebuilt by the
    // controller, this pass only surfaces errors before the session starts.
    for rule in &config.ignore {
        rule.compile()?;
    }

    Ok(())
}

/// Validates crawl session configuration
fn validate_session_config(config: &SessionConfig) -> Result<(), ConfigError> {
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "session name cannot be empty".to_string(),
        ));
    }

    if config.start_urls.is_empty() {
        return Err(ConfigError::MissingStartUrl);
    }

    for raw in &config.start_urls {
        PageUrl::parse(raw)
            .map_err(|e| ConfigError::InvalidUrl(format!("start url '{}': {}", raw, e)))?;
    }

    if let Some((min, max)) = config.wait_time_range {
        if min >= max {
            return Err(ConfigError::Validation(format!(
                "wait-time-range must satisfy min < max, got [{}, {}]",
                min, max
            )));
        }
    }

    if config.page_ready_timeout == 0 {
        return Err(ConfigError::Validation(
            "page-ready-timeout must be at least 1 second".to_string(),
        ));
    }

    Ok(())
}

/// Validates driver identification
fn validate_driver_config(config: &DriverConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact-email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
