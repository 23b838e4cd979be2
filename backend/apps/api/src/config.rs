//! Process configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::env;
use std::net::SocketAddr;

use anyhow::{Context, bail};
use auth::{AuthConfig, MAX_TOKEN_TTL_HOURS};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_TOKEN_TTL_HOURS: u64 = 168;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
    pub frontend_origins: Vec<String>,
    pub token_ttl_hours: u64,
    pub password_pepper: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a socket address such as 0.0.0.0:5000")?;

        let db_max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(v) => v
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        if db_max_connections == 0 {
            bail!("DB_MAX_CONNECTIONS must be a positive integer");
        }

        let token_ttl_hours = match get("TOKEN_TTL_HOURS") {
            Some(v) => v
                .parse::<u64>()
                .context("TOKEN_TTL_HOURS must be a whole number of hours")?,
            None => DEFAULT_TOKEN_TTL_HOURS,
        };
        if token_ttl_hours == 0 || token_ttl_hours > MAX_TOKEN_TTL_HOURS {
            bail!("TOKEN_TTL_HOURS must be between 1 and {MAX_TOKEN_TTL_HOURS}");
        }

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_owned())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            database_url,
            bind_addr,
            db_max_connections,
            frontend_origins,
            token_ttl_hours,
            password_pepper: get("PASSWORD_PEPPER"),
        })
    }

    pub fn auth_config(&self) -> AuthConfig {
        let config = AuthConfig::default().with_token_ttl_hours(self.token_ttl_hours);
        match &self.password_pepper {
            Some(pepper) => config.with_pepper(pepper.as_bytes()),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            AppConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/nascon")]))
                .unwrap();

        assert_eq!(config.bind_addr.port(), 5000);
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.token_ttl_hours, 168);
        assert_eq!(config.frontend_origins.len(), 2);
        assert!(config.password_pepper.is_none());
        assert!(config.auth_config().pepper().is_none());
    }

    #[test]
    fn test_database_url_required() {
        assert!(AppConfig::from_lookup(lookup(&[])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("DATABASE_URL", "  ")])).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/nascon"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("DB_MAX_CONNECTIONS", "20"),
            ("FRONTEND_ORIGINS", "https://nascon.pk, ,https://admin.nascon.pk"),
            ("TOKEN_TTL_HOURS", "2"),
            ("PASSWORD_PEPPER", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.db_max_connections, 20);
        assert_eq!(
            config.frontend_origins,
            vec!["https://nascon.pk", "https://admin.nascon.pk"]
        );
        let auth = config.auth_config();
        assert_eq!(auth.token_ttl.as_secs(), 2 * 3600);
        assert_eq!(auth.pepper(), Some(b"s3cret".as_slice()));
    }

    #[test]
    fn test_rejects_bad_numbers() {
        for (key, value) in [
            ("DB_MAX_CONNECTIONS", "0"),
            ("DB_MAX_CONNECTIONS", "many"),
            ("TOKEN_TTL_HOURS", "-1"),
            ("TOKEN_TTL_HOURS", "0"),
            ("TOKEN_TTL_HOURS", "8761"),
            ("TOKEN_TTL_HOURS", "18446744073709551615"),
            ("BIND_ADDR", "localhost"),
        ] {
            let result =
                AppConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://db"), (key, value)]));
            assert!(result.is_err(), "{key}={value} should be rejected");
        }
    }
}
