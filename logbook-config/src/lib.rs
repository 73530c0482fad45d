//! Environment-keyed configuration for the logbook backend.
//!
//! Each deployment environment has a dedicated YAML document (`local.yml`,
//! `test.yml`, `acc.yml`, `prod.yml`) holding the database coordinates.
//! The document is loaded exactly once at process start, before any
//! connection attempt, and never mutated afterwards.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;
use thiserror::Error;

/// Named deployment environment. Selects which config document is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    /// Local development overrides
    Local,
    /// Test environment
    Test,
    /// Acceptance environment
    Acc,
    /// Production environment
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Test => "test",
            Self::Acc => "acc",
            Self::Prod => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration load error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {path} not found")]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode config file {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Top-level configuration document.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
}

/// Database coordinates for one environment.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(rename = "ssl-mode")]
    pub ssl_mode: String,
    pub name: String,
    pub port: u16,
}

impl Config {
    /// Load the config document for `env` from the working directory.
    pub fn load(env: Environment) -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."), env)
    }

    /// Load the config document for `env` from `dir`.
    ///
    /// A missing file is reported as [`ConfigError::NotFound`], malformed
    /// YAML as [`ConfigError::Decode`].
    pub fn load_from(dir: &Path, env: Environment) -> Result<Self, ConfigError> {
        let path = dir.join(format!("{env}.yml"));

        let raw = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.clone(),
                    source,
                }
            } else {
                ConfigError::Read {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Decode { path, source })
    }

    /// Connection string in libpq keyword/value form:
    /// `host=<host> port=<port> sslmode=<mode> dbname=<name>`, with
    /// ` user=<user>` and ` password=<password>` appended only when set.
    ///
    /// Pool creation maps the same fields onto connect options directly;
    /// this form is for maintenance tooling that speaks libpq.
    pub fn conn_string(&self) -> String {
        self.conn_string_with_db(&self.database.name)
    }

    /// Same as [`Config::conn_string`] but against another database name.
    pub fn conn_string_with_db(&self, name: &str) -> String {
        let db = &self.database;
        let mut conn = format!(
            "host={} port={} sslmode={} dbname={}",
            db.host, db.port, db.ssl_mode, name
        );

        if !db.user.is_empty() {
            conn.push_str(&format!(" user={}", db.user));
        }

        if !db.password.is_empty() {
            conn.push_str(&format!(" password={}", db.password));
        }

        conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(user: &str, password: &str) -> Config {
        Config {
            database: DatabaseConfig {
                host: "db.internal".into(),
                user: user.into(),
                password: password.into(),
                ssl_mode: "require".into(),
                name: "logbook".into(),
                port: 5432,
            },
        }
    }

    #[test]
    fn conn_string_with_credentials() {
        let config = config_with("app", "hunter2");
        assert_eq!(
            config.conn_string(),
            "host=db.internal port=5432 sslmode=require dbname=logbook user=app password=hunter2"
        );
    }

    #[test]
    fn conn_string_omits_empty_user_and_password() {
        let config = config_with("", "");
        assert_eq!(
            config.conn_string(),
            "host=db.internal port=5432 sslmode=require dbname=logbook"
        );
    }

    #[test]
    fn conn_string_omits_only_password() {
        let config = config_with("app", "");
        assert_eq!(
            config.conn_string(),
            "host=db.internal port=5432 sslmode=require dbname=logbook user=app"
        );
    }

    #[test]
    fn conn_string_against_other_database() {
        let config = config_with("", "");
        assert!(config.conn_string_with_db("postgres").ends_with("dbname=postgres"));
    }

    #[test]
    fn load_reads_environment_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("local.yml"),
            r#"
database:
  host: localhost
  user: logbook
  password: "1"
  ssl-mode: disable
  name: logbook
  port: 5432
"#,
        )
        .unwrap();

        let config = Config::load_from(dir.path(), Environment::Local).unwrap();
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.ssl_mode, "disable");
    }

    #[test]
    fn missing_document_is_not_found() {
        let dir = tempfile::tempdir().unwrap();

        let err = Config::load_from(dir.path(), Environment::Acc).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn malformed_document_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("test.yml"), "database: [not, a, mapping]").unwrap();

        let err = Config::load_from(dir.path(), Environment::Test).unwrap_err();
        assert!(matches!(err, ConfigError::Decode { .. }));
    }

    #[test]
    fn environment_names() {
        assert_eq!(Environment::Local.to_string(), "local");
        assert_eq!(Environment::Acc.to_string(), "acc");
        assert_eq!(Environment::Prod.as_str(), "prod");
    }
}
