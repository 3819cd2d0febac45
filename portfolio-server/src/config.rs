//! Configuration
//!
//! Every setting has a default and an environment override. Relay
//! credentials have no default: a relay without them is skipped.

use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

/// Default contact recipient.
pub const DEFAULT_TO_EMAIL: &str = "ufoundashwin@gmail.com";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Bind address did not parse.
    #[error("Invalid bind address {0:?}")]
    InvalidBindAddr(String),

    /// Refresh interval was not a positive integer.
    #[error("Invalid refresh interval {0:?}")]
    InvalidRefreshInterval(String),
}

/// Email relay credentials.
#[derive(Clone, Debug)]
pub struct RelayConfig {
    /// EmailJS endpoint
    pub emailjs_endpoint: String,
    /// EmailJS service id
    pub emailjs_service_id: Option<String>,
    /// EmailJS template id
    pub emailjs_template_id: Option<String>,
    /// EmailJS public key
    pub emailjs_user_id: Option<String>,
    /// Formspree base URL (form id is appended)
    pub formspree_endpoint: String,
    /// Formspree form id
    pub formspree_form_id: Option<String>,
    /// Where contact mail is addressed
    pub to_email: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            emailjs_endpoint: "https://api.emailjs.com/api/v1.0/email/send".to_string(),
            emailjs_service_id: None,
            emailjs_template_id: None,
            emailjs_user_id: None,
            formspree_endpoint: "https://formspree.io/f".to_string(),
            formspree_form_id: None,
            to_email: DEFAULT_TO_EMAIL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl RelayConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            emailjs_service_id: non_empty_var("EMAILJS_SERVICE_ID"),
            emailjs_template_id: non_empty_var("EMAILJS_TEMPLATE_ID"),
            emailjs_user_id: non_empty_var("EMAILJS_USER_ID"),
            formspree_form_id: non_empty_var("FORMSPREE_FORM_ID"),
            to_email: non_empty_var("CONTACT_TO_EMAIL").unwrap_or(defaults.to_email.clone()),
            ..defaults
        }
    }
}

/// GitHub activity feed settings.
#[derive(Clone, Debug)]
pub struct GithubConfig {
    /// Account whose activity is shown
    pub username: String,
    /// API base URL
    pub api_base: String,
    /// Background refresh period
    pub refresh_interval: Duration,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            username: "Itaxh1".to_string(),
            api_base: "https://api.github.com".to_string(),
            refresh_interval: Duration::from_secs(5 * 60),
            timeout: Duration::from_secs(10),
        }
    }
}

impl GithubConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let refresh_interval = match non_empty_var("GITHUB_REFRESH_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidRefreshInterval(raw)),
            },
            None => defaults.refresh_interval,
        };

        Ok(Self {
            username: non_empty_var("GITHUB_USERNAME").unwrap_or(defaults.username.clone()),
            api_base: non_empty_var("GITHUB_API_BASE").unwrap_or(defaults.api_base.clone()),
            refresh_interval,
            ..defaults
        })
    }
}

/// HTTP server settings.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Bind address
    pub bind_addr: SocketAddr,
    /// Relay credentials
    pub relay: RelayConfig,
    /// GitHub feed
    pub github: GithubConfig,
    /// Server version string
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            relay: RelayConfig::default(),
            github: GithubConfig::default(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl ServerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = match non_empty_var("PORTFOLIO_BIND") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidBindAddr(raw))?,
            None => Self::default().bind_addr,
        };

        Ok(Self {
            bind_addr,
            relay: RelayConfig::from_env(),
            github: GithubConfig::from_env()?,
            ..Self::default()
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.github.refresh_interval, Duration::from_secs(300));
        assert_eq!(config.relay.to_email, DEFAULT_TO_EMAIL);
        assert!(config.relay.emailjs_service_id.is_none());
        assert!(config.relay.formspree_form_id.is_none());
    }

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::InvalidBindAddr("nope".into());
        assert_eq!(err.to_string(), "Invalid bind address \"nope\"");
    }
}
