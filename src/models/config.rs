//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

/// Deployment profile. Only `development` exposes internal error details.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

#[derive(Clone, Debug, Deserialize)]
/// Outbound mail settings used by the inquiry notifier.
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    pub from_email: String,
    pub to_email: String,
    /// Per-connection timeout applied by the transport.
    pub timeout_secs: u64,
}

impl SmtpConfig {
    /// Username and password, when both are present and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().filter(|u| !u.trim().is_empty())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some((username, password))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    #[serde(default)]
    pub environment: Environment,
    pub templates_dir: String,
    /// Built client bundle served at `/`, if any.
    #[serde(default)]
    pub static_dir: Option<String>,
    /// Upper bound on a single notification attempt.
    pub notification_timeout_secs: u64,
    pub smtp: SmtpConfig,
}

impl ServerConfig {
    pub fn notification_timeout(&self) -> Duration {
        Duration::from_secs(self.notification_timeout_secs)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smtp(username: Option<&str>, password: Option<&str>) -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: username.map(str::to_string),
            password: password.map(str::to_string),
            from_email: "site@example.com".to_string(),
            to_email: "bookings@example.com".to_string(),
            timeout_secs: 20,
        }
    }

    #[test]
    fn credentials_require_both_parts() {
        assert_eq!(
            smtp(Some("user"), Some("secret")).credentials(),
            Some(("user", "secret"))
        );
        assert_eq!(smtp(Some("user"), None).credentials(), None);
        assert_eq!(smtp(Some(" "), Some("secret")).credentials(), None);
        assert_eq!(smtp(None, Some("secret")).credentials(), None);
    }

    #[test]
    fn environment_defaults_to_production() {
        let config: ServerConfig = serde_json::from_value(serde_json::json!({
            "address": "127.0.0.1",
            "port": 5000,
            "templates_dir": "templates/**/*",
            "notification_timeout_secs": 25,
            "smtp": {
                "host": "smtp.example.com",
                "port": 587,
                "from_email": "site@example.com",
                "to_email": "bookings@example.com",
                "timeout_secs": 20
            }
        }))
        .unwrap();

        assert!(!config.is_development());
        assert_eq!(config.notification_timeout(), Duration::from_secs(25));
        assert!(config.static_dir.is_none());
        assert!(config.smtp.credentials().is_none());
    }
}
