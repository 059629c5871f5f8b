use std::str::FromStr;

use serde::Deserialize;

use crate::error::AppError;

/// Default listen port, shared with the web frontend's dev proxy.
const DEFAULT_PORT: u16 = 3001;

/// Default base URL of the Resend email API.
const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";

/// Default upper bound on one notification batch, in seconds.
const DEFAULT_NOTIFY_TIMEOUT_SECS: u64 = 60;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listen port (default: 3001)
    pub port: u16,

    /// Resend API key for email delivery
    pub resend_api_key: Option<String>,

    /// Email sender address
    pub email_from: Option<String>,

    /// Base URL of the Resend API
    pub resend_api_url: String,

    /// Upper bound on one notification batch, in seconds (default: 60, never 0)
    pub notify_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            port: parse_var("PORT", std::env::var("PORT").ok(), DEFAULT_PORT)?,
            resend_api_key: non_empty_var("RESEND_API_KEY"),
            email_from: non_empty_var("EMAIL_FROM"),
            resend_api_url: std::env::var("RESEND_API_URL")
                .unwrap_or_else(|_| DEFAULT_RESEND_API_URL.to_string()),
            notify_timeout_secs: parse_notify_timeout(std::env::var("NOTIFY_TIMEOUT_SECS").ok())?,
        })
    }

    /// Whether both email credentials are present.
    ///
    /// When this is false the notifier runs in degraded mode and only logs pairings.
    pub fn email_configured(&self) -> bool {
        self.resend_api_key.is_some() && self.email_from.is_some()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            resend_api_key: None,
            email_from: None,
            resend_api_url: DEFAULT_RESEND_API_URL.to_string(),
            notify_timeout_secs: DEFAULT_NOTIFY_TIMEOUT_SECS,
        }
    }
}

/// Parse an optional raw value, falling back to `default` when unset.
fn parse_var<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T, AppError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| {
            AppError::Config(format!(
                "{} must be a valid {}",
                key,
                std::any::type_name::<T>()
            ))
        }),
    }
}

fn parse_notify_timeout(raw: Option<String>) -> Result<u64, AppError> {
    let secs = parse_var("NOTIFY_TIMEOUT_SECS", raw, DEFAULT_NOTIFY_TIMEOUT_SECS)?;
    if secs == 0 {
        return Err(AppError::Config(
            "NOTIFY_TIMEOUT_SECS must be greater than 0".to_string(),
        ));
    }
    Ok(secs)
}

/// Read an env var, treating blank values the same as unset ones.
fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_message(err: AppError) -> String {
        match err {
            AppError::Config(msg) => msg,
            other => panic!("expected Config, got {:?}", other),
        }
    }

    #[test]
    fn test_email_configured_requires_both_credentials() {
        let mut config = AppConfig::default();
        assert!(!config.email_configured());

        config.resend_api_key = Some("re_test".to_string());
        assert!(!config.email_configured());

        config.email_from = Some("santa@example.com".to_string());
        assert!(config.email_configured());
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.resend_api_url, "https://api.resend.com");
        assert_eq!(config.notify_timeout_secs, 60);
    }

    #[test]
    fn test_parse_var() {
        assert_eq!(parse_var("PORT", None, 3001u16).unwrap(), 3001);
        assert_eq!(parse_var("PORT", Some(" 8080 ".to_string()), 3001u16).unwrap(), 8080);

        let err = parse_var("PORT", Some("eighty".to_string()), 3001u16).unwrap_err();
        assert_eq!(config_message(err), "PORT must be a valid u16");
    }

    #[test]
    fn test_notify_timeout_rejects_zero() {
        assert_eq!(parse_notify_timeout(None).unwrap(), 60);
        assert_eq!(parse_notify_timeout(Some("5".to_string())).unwrap(), 5);

        let err = parse_notify_timeout(Some("0".to_string())).unwrap_err();
        assert_eq!(
            config_message(err),
            "NOTIFY_TIMEOUT_SECS must be greater than 0"
        );
    }
}
