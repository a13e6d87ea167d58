use std::net::SocketAddr;

use anyhow::{Context, Result};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
/// The store is volatile by default; point DATABASE_URL at a file to keep it.
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

/// Runtime settings sourced from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            std::env::var("BIND_ADDR").ok(),
            std::env::var("DATABASE_URL").ok(),
        )
    }

    fn from_vars(bind_addr: Option<String>, database_url: Option<String>) -> Result<Self> {
        let bind_addr = bind_addr.unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse()
            .with_context(|| format!("invalid BIND_ADDR `{bind_addr}`"))?;
        let database_url = database_url.unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        Ok(Self { bind_addr, database_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_vars(None, None).unwrap();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = Config::from_vars(
            Some("0.0.0.0:8080".into()),
            Some("sqlite://todos.db".into()),
        )
        .unwrap();
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.database_url, "sqlite://todos.db");
    }

    #[test]
    fn unparseable_bind_addr_is_an_error() {
        assert!(Config::from_vars(Some("not-an-addr".into()), None).is_err());
    }
}
