//! Configuration loading
//!
//! Values are resolved in this order, later sources winning:
//! 1. Built-in defaults (`127.0.0.1:8000`, `postgres@localhost:5432/political3`)
//! 2. TOML file (`--config`, or `~/.pulseboard/config.toml` when present)
//! 3. Environment (`DATABASE_URL`, `PULSEBOARD_BIND`, `PULSEBOARD_DB_*`)
//!
//! CLI flags are layered on top by the binary.

use std::fmt;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgConnectOptions;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },

    #[error("invalid database url: {0}")]
    InvalidUrl(#[source] sqlx::Error),
}

/// Top-level configuration file layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseboardConfig {
    pub server: ServerSection,
    pub database: DatabaseConfig,
}

/// `[server]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Address to bind to
    pub bind: SocketAddr,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
        }
    }
}

/// `[database]` table
///
/// When `url` is set it takes precedence over the individual fields.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            name: "political3".to_string(),
            user: "postgres".to_string(),
            password: None,
        }
    }
}

// Manual impl so credentials never reach the logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl DatabaseConfig {
    /// Build sqlx connect options from this config.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.url {
            return url.parse::<PgConnectOptions>().map_err(ConfigError::InvalidUrl);
        }

        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user);

        if let Some(password) = &self.password {
            options = options.password(password);
        }

        Ok(options)
    }

    /// Human-readable target for log lines (no credentials).
    pub fn describe(&self) -> String {
        match &self.url {
            Some(_) => "DATABASE_URL".to_string(),
            None => format!("{}@{}:{}/{}", self.user, self.host, self.port, self.name),
        }
    }
}

impl PulseboardConfig {
    /// Default config file path: ~/.pulseboard/config.toml
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".pulseboard")
            .join("config.toml")
    }

    /// Load configuration from an explicit file, the default file, or defaults,
    /// then apply environment overrides.
    ///
    /// An explicit path that does not exist is an error; a missing default file
    /// is not.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::default_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env_from(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("PULSEBOARD_BIND") {
            self.server.bind = bind.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PULSEBOARD_BIND",
                value: bind,
            })?;
        }

        let db = &mut self.database;
        if let Some(url) = lookup("DATABASE_URL") {
            db.url = Some(url);
        }
        if let Some(host) = lookup("PULSEBOARD_DB_HOST") {
            db.host = host;
        }
        if let Some(port) = lookup("PULSEBOARD_DB_PORT") {
            db.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PULSEBOARD_DB_PORT",
                value: port,
            })?;
        }
        if let Some(name) = lookup("PULSEBOARD_DB_NAME") {
            db.name = name;
        }
        if let Some(user) = lookup("PULSEBOARD_DB_USER") {
            db.user = user;
        }
        if let Some(password) = lookup("PULSEBOARD_DB_PASSWORD") {
            db.password = Some(password);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_dashboard_client() {
        let config = PulseboardConfig::default();
        assert_eq!(config.server.bind.port(), 8000);
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.name, "political3");
        assert_eq!(config.database.user, "postgres");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[database]
name = "metrics"
password = "secret"
"#
        )
        .unwrap();

        let config = PulseboardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.database.name, "metrics");
        assert_eq!(config.database.password.as_deref(), Some("secret"));
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.server.bind.port(), 8000);
    }

    #[test]
    fn invalid_toml_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[database\nname = ").unwrap();

        let err = PulseboardConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let err = PulseboardConfig::load(Some(Path::new("/nonexistent/pulseboard.toml")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = PulseboardConfig::default();
        config
            .apply_env_from(env(&[
                ("PULSEBOARD_BIND", "0.0.0.0:9000"),
                ("PULSEBOARD_DB_HOST", "db.internal"),
                ("PULSEBOARD_DB_PORT", "6543"),
                ("PULSEBOARD_DB_USER", "reader"),
            ]))
            .unwrap();

        assert_eq!(config.server.bind.port(), 9000);
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 6543);
        assert_eq!(config.database.user, "reader");
        assert_eq!(config.database.name, "political3");
    }

    #[test]
    fn bad_port_is_rejected() {
        let mut config = PulseboardConfig::default();
        let err = config
            .apply_env_from(env(&[("PULSEBOARD_DB_PORT", "not-a-port")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "PULSEBOARD_DB_PORT",
                ..
            }
        ));
    }

    #[test]
    fn url_takes_precedence() {
        let db = DatabaseConfig {
            url: Some("postgres://reader:pw@example.com:6000/metrics".to_string()),
            ..DatabaseConfig::default()
        };
        let options = db.connect_options().unwrap();
        assert_eq!(options.get_host(), "example.com");
        assert_eq!(options.get_port(), 6000);
        assert_eq!(options.get_database(), Some("metrics"));
        assert_eq!(db.describe(), "DATABASE_URL");
    }

    #[test]
    fn fields_build_connect_options() {
        let db = DatabaseConfig::default();
        let options = db.connect_options().unwrap();
        assert_eq!(options.get_host(), "localhost");
        assert_eq!(options.get_port(), 5432);
        assert_eq!(options.get_username(), "postgres");
        assert_eq!(db.describe(), "postgres@localhost:5432/political3");
    }

    #[test]
    fn debug_redacts_password() {
        let db = DatabaseConfig {
            password: Some("hunter2".to_string()),
            ..DatabaseConfig::default()
        };
        let rendered = format!("{:?}", db);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
