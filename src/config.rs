use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::info;

use crate::plunk::DEFAULT_API_URL;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub plunk_api_url: String,
    pub plunk_timeout: Duration,
    pub cors_origin: Option<String>,
    pub body_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let timeout_secs: u64 = parse_or(&lookup, "PLUNK_TIMEOUT_SECS", 30)?;

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
            data_dir: lookup("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            plunk_api_url: lookup("PLUNK_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            plunk_timeout: Duration::from_secs(timeout_secs),
            cors_origin: lookup("CORS_ORIGIN").filter(|o| !o.trim().is_empty()),
            body_limit: parse_or(&lookup, "BODY_LIMIT_BYTES", 1024 * 1024)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn accounts_path(&self) -> PathBuf {
        self.data_dir.join("accounts.json")
    }

    pub fn subscribers_path(&self) -> PathBuf {
        self.data_dir.join("subscribers.json")
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            message: e.to_string(),
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.accounts_path(), PathBuf::from("data/accounts.json"));
        assert_eq!(config.plunk_api_url, DEFAULT_API_URL);
        assert_eq!(config.plunk_timeout, Duration::from_secs(30));
        assert!(config.cors_origin.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("DATA_DIR", "/var/lib/mailboard"),
            ("CORS_ORIGIN", "https://dash.example.com"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(
            config.subscribers_path(),
            PathBuf::from("/var/lib/mailboard/subscribers.json")
        );
        assert_eq!(config.cors_origin.as_deref(), Some("https://dash.example.com"));
    }

    #[test]
    fn rejects_unparsable_port() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().starts_with("invalid value for PORT"));
    }
}
