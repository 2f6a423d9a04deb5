use std::fmt;

use thiserror::Error;

use crate::llm_client::DEFAULT_MODEL;

const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Required environment variables are not set: {}", .0.join(", "))]
    Missing(Vec<String>),

    #[error("Environment variable '{key}' has an invalid value: {value}")]
    Invalid { key: String, value: String },
}

/// Application configuration loaded from environment variables.
/// Validated once at startup; the process exits if anything is missing.
#[derive(Clone)]
pub struct Config {
    pub genai_api_key: String,
    pub genai_model: String,
    pub sender_email: String,
    pub sender_password: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Every missing required key is
    /// collected before failing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut missing = Vec::new();
        let mut require = |key: &str| {
            get(key).unwrap_or_else(|| {
                missing.push(key.to_string());
                String::new()
            })
        };

        let genai_api_key = require("GENAI_API_KEY");
        let sender_email = require("SENDER_EMAIL");
        let sender_password = require("SENDER_PASSWORD");

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        Ok(Config {
            genai_api_key,
            genai_model: get("GENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            sender_email,
            sender_password,
            smtp_host: get("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            smtp_port: parse_port(get("SMTP_PORT"), "SMTP_PORT", DEFAULT_SMTP_PORT)?,
            port: parse_port(get("PORT"), "PORT", DEFAULT_PORT)?,
        })
    }
}

fn parse_port(value: Option<String>, key: &str, default: u16) -> Result<u16, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value: v,
        }),
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("genai_api_key", &"<redacted>")
            .field("genai_model", &self.genai_model)
            .field("sender_email", &self.sender_email)
            .field("sender_password", &"<redacted>")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("port", &self.port)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("GENAI_API_KEY", "key-123"),
        ("SENDER_EMAIL", "sender@example.com"),
        ("SENDER_PASSWORD", "hunter2"),
    ];

    #[test]
    fn test_defaults_apply() {
        let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();
        assert_eq!(config.genai_model, DEFAULT_MODEL);
        assert_eq!(config.smtp_host, "smtp.gmail.com");
        assert_eq!(config.smtp_port, 587);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_all_missing_keys_reported_together() {
        let err = Config::from_lookup(lookup(&[("SENDER_EMAIL", "sender@example.com")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Missing(vec![
                "GENAI_API_KEY".to_string(),
                "SENDER_PASSWORD".to_string()
            ])
        );
        assert!(err.to_string().contains("GENAI_API_KEY, SENDER_PASSWORD"));
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let mut pairs = REQUIRED.to_vec();
        pairs[0] = ("GENAI_API_KEY", "  ");
        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert_eq!(err, ConfigError::Missing(vec!["GENAI_API_KEY".to_string()]));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("SMTP_PORT", "not-a-port"));
        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "SMTP_PORT"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("key-123"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("sender@example.com"));
    }
}
