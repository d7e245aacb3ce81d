//! Runtime configuration.
//!
//! Values come from `CLAIMS_*` environment variables, layered over an
//! optional YAML file named by `CLAIMS_CONFIG`. Environment wins.

use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_BIND: &str = "127.0.0.1:3000";
const DATA_DIR_NAME: &str = "Claim Tracker";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
    #[error("Could not read config file {path}: {message}")]
    File { path: String, message: String },
    #[error("Could not determine a data directory; set CLAIMS_DATA_DIR")]
    NoDataDirectory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Yaml,
    Sqlite,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yaml" => Ok(StorageBackend::Yaml),
            "sqlite" => Ok(StorageBackend::Sqlite),
            _ => Err("expected 'yaml' or 'sqlite'".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind: SocketAddr,
    pub data_dir: PathBuf,
    pub storage: StorageBackend,
    pub database_url: String,
    pub cors_origin: Option<String>,
    pub admin_hash_cost: u32,
    pub log_json: bool,
}

/// Shape of the optional YAML config file. Keys mirror the variable names
/// without the `CLAIMS_` prefix, in snake case.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    bind: Option<String>,
    data_dir: Option<PathBuf>,
    storage: Option<StorageBackend>,
    database_url: Option<String>,
    cors_origin: Option<String>,
    admin_hash_cost: Option<u32>,
    log_json: Option<bool>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve the configuration through `lookup` instead of the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let file = match var("CLAIMS_CONFIG") {
            Some(path) => load_file_config(&path)?,
            None => FileConfig::default(),
        };

        let bind_text = var("CLAIMS_BIND")
            .or(file.bind)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_text
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| invalid("CLAIMS_BIND", &bind_text, e))?;

        let data_dir = match var("CLAIMS_DATA_DIR").map(PathBuf::from).or(file.data_dir) {
            Some(dir) => dir,
            None => default_data_dir()?,
        };

        let storage = match var("CLAIMS_STORAGE") {
            Some(text) => text
                .parse::<StorageBackend>()
                .map_err(|e| invalid("CLAIMS_STORAGE", &text, e))?,
            None => file.storage.unwrap_or(StorageBackend::Yaml),
        };

        let database_url = var("CLAIMS_DATABASE_URL")
            .or(file.database_url)
            .unwrap_or_else(|| format!("sqlite:{}", data_dir.join("claims.db").display()));

        let cors_origin = var("CLAIMS_CORS_ORIGIN").or(file.cors_origin);

        let admin_hash_cost = match var("CLAIMS_ADMIN_HASH_COST") {
            Some(text) => text
                .trim()
                .parse::<u32>()
                .map_err(|e| invalid("CLAIMS_ADMIN_HASH_COST", &text, e))?,
            None => file.admin_hash_cost.unwrap_or(bcrypt::DEFAULT_COST),
        };
        if !(4..=31).contains(&admin_hash_cost) {
            return Err(invalid(
                "CLAIMS_ADMIN_HASH_COST",
                &admin_hash_cost.to_string(),
                "bcrypt cost must be between 4 and 31",
            ));
        }

        let log_json = match var("CLAIMS_LOG_JSON") {
            Some(text) => parse_bool(&text).ok_or_else(|| {
                invalid("CLAIMS_LOG_JSON", &text, "expected true/false, yes/no or 1/0")
            })?,
            None => file.log_json.unwrap_or(false),
        };

        Ok(AppConfig {
            bind,
            data_dir,
            storage,
            database_url,
            cors_origin,
            admin_hash_cost,
            log_json,
        })
    }
}

fn invalid(var: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn load_file_config(path: &str) -> Result<FileConfig, ConfigError> {
    let file_error = |message: String| ConfigError::File {
        path: path.to_string(),
        message,
    };
    let contents = fs::read_to_string(path).map_err(|e| file_error(e.to_string()))?;
    serde_yaml::from_str(&contents).map_err(|e| file_error(e.to_string()))
}

/// `<Documents>/Claim Tracker`, falling back to the home directory.
pub fn default_data_dir() -> Result<PathBuf, ConfigError> {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .map(|dir| dir.join(DATA_DIR_NAME))
        .ok_or(ConfigError::NoDataDirectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn resolve(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = resolve(&[("CLAIMS_DATA_DIR", "/srv/claims")]).unwrap();

        assert_eq!(config.bind, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.data_dir, PathBuf::from("/srv/claims"));
        assert_eq!(config.storage, StorageBackend::Yaml);
        assert_eq!(config.database_url, "sqlite:/srv/claims/claims.db");
        assert_eq!(config.cors_origin, None);
        assert_eq!(config.admin_hash_cost, bcrypt::DEFAULT_COST);
        assert!(!config.log_json);
    }

    #[test]
    fn test_environment_values() {
        let config = resolve(&[
            ("CLAIMS_DATA_DIR", "/srv/claims"),
            ("CLAIMS_BIND", "0.0.0.0:8080"),
            ("CLAIMS_STORAGE", "SQLite"),
            ("CLAIMS_DATABASE_URL", "sqlite:/tmp/other.db"),
            ("CLAIMS_CORS_ORIGIN", "http://localhost:5173"),
            ("CLAIMS_ADMIN_HASH_COST", "10"),
            ("CLAIMS_LOG_JSON", "yes"),
        ])
        .unwrap();

        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.storage, StorageBackend::Sqlite);
        assert_eq!(config.database_url, "sqlite:/tmp/other.db");
        assert_eq!(config.cors_origin.as_deref(), Some("http://localhost:5173"));
        assert_eq!(config.admin_hash_cost, 10);
        assert!(config.log_json);
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let cases = [
            ("CLAIMS_BIND", "not-an-address"),
            ("CLAIMS_STORAGE", "postgres"),
            ("CLAIMS_ADMIN_HASH_COST", "cheap"),
            ("CLAIMS_ADMIN_HASH_COST", "40"),
            ("CLAIMS_LOG_JSON", "maybe"),
        ];

        for (name, value) in cases {
            let error = resolve(&[("CLAIMS_DATA_DIR", "/srv/claims"), (name, value)]).unwrap_err();
            match error {
                ConfigError::Invalid { var, .. } => assert_eq!(var, name),
                other => panic!("unexpected error for {name}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_file_config_under_environment() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("claims.yaml");
        fs::write(
            &path,
            "bind: 127.0.0.1:4000\nstorage: sqlite\ndata_dir: /var/lib/claims\nlog_json: true\n",
        )
        .unwrap();
        let path = path.to_string_lossy().to_string();

        let config = resolve(&[("CLAIMS_CONFIG", path.as_str()), ("CLAIMS_BIND", "127.0.0.1:5000")]).unwrap();

        assert_eq!(config.bind.port(), 5000);
        assert_eq!(config.storage, StorageBackend::Sqlite);
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/claims"));
        assert!(config.log_json);
    }

    #[test]
    fn test_missing_config_file() {
        let error = resolve(&[("CLAIMS_CONFIG", "/definitely/not/here.yaml")]).unwrap_err();
        assert!(matches!(error, ConfigError::File { .. }));
    }
}
