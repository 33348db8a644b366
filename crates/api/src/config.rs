use std::str::FromStr;

/// Deployment mode, read from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::Invalid {
                var: "APP_ENV",
                value: s.to_string(),
            }),
        }
    }
}

/// Which backing store the process should use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// A persistent database that must already be provisioned.
    Persistent { url: String },
    /// A private in-memory database, provisioned and seeded at startup.
    Ephemeral,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {var}")]
    Invalid { var: &'static str, value: String },

    #[error("Running in production without DATABASE_URL")]
    MissingDatabaseUrl,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Deployment mode (default: development).
    pub environment: Environment,
    /// Connection string for a persistent store, if configured.
    pub database_url: Option<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default       |
    /// |------------------------|---------------|
    /// | `HOST`                 | `0.0.0.0`     |
    /// | `PORT`                 | `3000`        |
    /// | `APP_ENV`              | `development` |
    /// | `DATABASE_URL`         | unset         |
    /// | `REQUEST_TIMEOUT_SECS` | `30`          |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_var(&lookup, "PORT", 3000)?;
        let environment = match lookup("APP_ENV") {
            Some(value) => value.parse()?,
            None => Environment::Development,
        };
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let request_timeout_secs = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;

        Ok(Self {
            host,
            port,
            environment,
            database_url,
            request_timeout_secs,
        })
    }

    /// Resolve the backing store.
    ///
    /// Without `DATABASE_URL` an in-memory store is used, except in
    /// production where that is a configuration error.
    pub fn store(&self) -> Result<StoreConfig, ConfigError> {
        match (&self.database_url, self.environment) {
            (Some(url), _) => Ok(StoreConfig::Persistent { url: url.clone() }),
            (None, Environment::Production) => Err(ConfigError::MissingDatabaseUrl),
            (None, _) => Ok(StoreConfig::Ephemeral),
        }
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.database_url, None);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn overrides() {
        let config = load(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("APP_ENV", "Production"),
            ("DATABASE_URL", "sqlite://wiki.db"),
            ("REQUEST_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.database_url.as_deref(), Some("sqlite://wiki.db"));
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert_matches!(
            load(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { var: "PORT", .. })
        );
    }

    #[test]
    fn unknown_environment_is_rejected() {
        assert_matches!(
            load(&[("APP_ENV", "staging")]),
            Err(ConfigError::Invalid { var: "APP_ENV", .. })
        );
    }

    #[test]
    fn development_without_url_uses_memory() {
        let config = load(&[]).unwrap();
        assert_eq!(config.store().unwrap(), StoreConfig::Ephemeral);
    }

    #[test]
    fn blank_url_counts_as_unset() {
        let config = load(&[("DATABASE_URL", "  ")]).unwrap();
        assert_eq!(config.store().unwrap(), StoreConfig::Ephemeral);
    }

    #[test]
    fn production_without_url_is_fatal() {
        let config = load(&[("APP_ENV", "production")]).unwrap();
        assert_matches!(config.store(), Err(ConfigError::MissingDatabaseUrl));
    }

    #[test]
    fn url_selects_persistent_store_in_any_mode() {
        let config = load(&[("DATABASE_URL", "sqlite://wiki.db")]).unwrap();
        assert_eq!(
            config.store().unwrap(),
            StoreConfig::Persistent {
                url: "sqlite://wiki.db".into()
            }
        );
    }
}
