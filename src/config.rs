use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use tracing::Level;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    /// MySQL URL; records are kept in memory when unset.
    pub database_url: Option<String>,

    // Logging
    pub log_dir: String,
    pub log_level: Level,

    pub seed_on_start: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            server_addr: lookup("SERVER_ADDR").unwrap_or_else(|| "127.0.0.1:5000".to_string()),
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            log_dir: lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
            log_level: parse_or(&lookup, "LOG_LEVEL", Level::DEBUG)?,
            seed_on_start: parse_or(&lookup, "SEED_ON_START", true)?,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.server_addr, "127.0.0.1:5000");
        assert!(cfg.database_url.is_none());
        assert_eq!(cfg.log_dir, "logs");
        assert_eq!(cfg.log_level, Level::DEBUG);
        assert!(cfg.seed_on_start);
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("DATABASE_URL", "mysql://hr:hr@localhost/hr"),
            ("LOG_LEVEL", "warn"),
            ("SEED_ON_START", "false"),
        ])
        .unwrap();
        assert_eq!(cfg.database_url.as_deref(), Some("mysql://hr:hr@localhost/hr"));
        assert_eq!(cfg.log_level, Level::WARN);
        assert!(!cfg.seed_on_start);
    }

    #[test]
    fn test_blank_database_url_means_memory() {
        let cfg = config(&[("DATABASE_URL", "  ")]).unwrap();
        assert!(cfg.database_url.is_none());
    }

    #[test]
    fn test_invalid_value_is_reported() {
        let err = config(&[("SEED_ON_START", "maybe")]).unwrap_err();
        assert!(err.to_string().contains("SEED_ON_START"));
    }
}
