use crate::config::types::{
    AccountConfig, BrowserConfig, Config, NotifyConfig, OutputConfig, ScraperConfig, SiteConfig,
};
use crate::ConfigError;
use url::Url;

/// Upper bound on parallel browser sessions
const MAX_WORKERS: u32 = 32;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_account_config(&config.account)?;
    validate_site_config(&config.site)?;
    validate_browser_config(&config.browser)?;
    validate_scraper_config(&config.scraper)?;
    validate_output_config(&config.output)?;
    validate_notify_config(&config.notify)?;
    Ok(())
}

fn validate_account_config(config: &AccountConfig) -> Result<(), ConfigError> {
    if config.username.trim().is_empty() {
        return Err(ConfigError::Validation(
            "username cannot be empty".to_string(),
        ));
    }

    if config.password.is_empty() {
        return Err(ConfigError::Validation(
            "password cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_url("login-url", &config.login_url)?;
    validate_url("logout-url", &config.logout_url)?;
    validate_url("landing-url", &config.landing_url)?;
    validate_url("unavailable-url", &config.unavailable_url)?;
    Ok(())
}

fn validate_browser_config(config: &BrowserConfig) -> Result<(), ConfigError> {
    validate_url("webdriver-url", &config.webdriver_url)?;

    if let Some(path) = &config.chrome_path {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "chrome-path cannot be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    if config.workers < 1 || config.workers > MAX_WORKERS {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and {}, got {}",
            MAX_WORKERS, config.workers
        )));
    }

    if config.delimiter.is_empty() {
        return Err(ConfigError::Validation(
            "delimiter cannot be empty".to_string(),
        ));
    }

    // Addresses contain '/' and ':' so neither can serve as a delimiter on its own
    if config.delimiter == "/" || config.delimiter == ":" {
        return Err(ConfigError::Validation(format!(
            "delimiter '{}' collides with URL syntax",
            config.delimiter
        )));
    }

    if config.manual_check_poll_secs < 1 {
        return Err(ConfigError::Validation(
            "manual-check-poll-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.input_file.is_empty() {
        return Err(ConfigError::Validation(
            "input-file cannot be empty".to_string(),
        ));
    }

    if config.output_file.is_empty() {
        return Err(ConfigError::Validation(
            "output-file cannot be empty".to_string(),
        ));
    }

    if config.error_log.is_empty() {
        return Err(ConfigError::Validation(
            "error-log cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_notify_config(config: &NotifyConfig) -> Result<(), ConfigError> {
    if config.speak && config.speech_command.trim().is_empty() {
        return Err(ConfigError::Validation(
            "speech-command cannot be empty when speak is enabled".to_string(),
        ));
    }

    Ok(())
}

/// Checks that a configured address parses as an absolute URL
fn validate_url(key: &str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", key, value, e)))
}
