use std::env;
use std::path::{Path, PathBuf};

use super::model::MonitorConfig;
use crate::error::ConfigError;

pub const TOKEN_VAR: &str = "TOKEN";
pub const CHAT_ID_VAR: &str = "CHAT_ID";
pub const TELEGRAM_API_VAR: &str = "TELEGRAM_API_URL";
pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";

#[derive(Debug)]
pub struct AppConfig {
    pub monitor: MonitorConfig,
    pub credentials: Credentials,
    pub telegram_api: String,
}

/// Bot token and destination chat for the Telegram notifier.
/// These never live in the config file.
#[derive(Clone)]
pub struct Credentials {
    pub token: String,
    pub chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl Credentials {
    /// Read the credentials with the given lookup, usually the process environment.
    /// Blank values are treated as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingCredential(name))
        };

        Ok(Credentials {
            token: required(TOKEN_VAR)?,
            chat_id: required(CHAT_ID_VAR)?,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }
}

/// Read and validate the monitor configuration file.
pub fn read_monitor_config(path: &Path) -> Result<MonitorConfig, ConfigError> {
    let config_str = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config: MonitorConfig =
        serde_yaml::from_str(&config_str).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    config.validate()
}

/// Load the application configuration from the config file and the environment.
/// An explicit env file must exist, otherwise a `.env` in the working directory is used when present.
pub fn load_config(config_path: &Path, env_file: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match env_file {
        Some(path) => {
            dotenvy::from_path(path).map_err(|source| ConfigError::EnvFile {
                path: PathBuf::from(path),
                source,
            })?;
        }
        None => {
            if let Ok(path) = dotenvy::dotenv() {
                log::debug!("Loaded environment from {}", path.display());
            }
        }
    }

    build_app_config(config_path, |name| env::var(name).ok())
}

fn build_app_config<F>(config_path: &Path, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let monitor = read_monitor_config(config_path)?;
    let credentials = Credentials::from_lookup(&lookup)?;

    let telegram_api = lookup(TELEGRAM_API_VAR)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_TELEGRAM_API.to_string());

    log::info!(
        "Loaded {} target(s) from {}, checking every {}s",
        monitor.urls.len(),
        config_path.display(),
        monitor.interval
    );

    Ok(AppConfig {
        monitor,
        credentials,
        telegram_api,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn test_read_monitor_config() {
        let file = write_config(r#"{"urls": ["https://a.test"], "interval": 5}"#);
        let config = read_monitor_config(file.path()).expect("valid config");
        assert_eq!(config.urls, vec!["https://a.test"]);
        assert_eq!(config.interval, 5);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = read_monitor_config(&dir.path().join("config.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_malformed_file() {
        let file = write_config("urls: [\"https://a.test\"\ninterval: five");
        let err = read_monitor_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_empty_urls_is_startup_error() {
        let file = write_config(r#"{"urls": [], "interval": 5}"#);
        let err = read_monitor_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NoTargets));
    }

    #[test]
    fn test_credentials_present() {
        let vars = HashMap::from([("TOKEN", " 123:abc "), ("CHAT_ID", "-10042")]);
        let creds = Credentials::from_lookup(|k| vars.get(k).map(|v| v.to_string()))
            .expect("credentials");
        assert_eq!(creds.token, "123:abc");
        assert_eq!(creds.chat_id, "-10042");
        assert!(!format!("{creds:?}").contains("123:abc"));
    }

    #[test]
    fn test_credentials_missing_or_blank() {
        let vars = HashMap::from([("TOKEN", "123:abc")]);
        let err = Credentials::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential("CHAT_ID")));

        let vars = HashMap::from([("TOKEN", "  "), ("CHAT_ID", "-10042")]);
        let err = Credentials::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential("TOKEN")));
    }

    #[test]
    fn test_telegram_api_default_and_override() {
        let file = write_config(r#"{"urls": ["https://a.test"], "interval": 5}"#);

        let vars = HashMap::from([("TOKEN", "123:abc"), ("CHAT_ID", "-10042")]);
        let app = build_app_config(file.path(), |k| vars.get(k).map(|v| v.to_string()))
            .expect("valid config");
        assert_eq!(app.telegram_api, DEFAULT_TELEGRAM_API);
        assert_eq!(app.telegram_api, "https://api.telegram.org");
        assert_eq!(app.credentials.token, "123:abc");
        assert_eq!(app.credentials.chat_id, "-10042");
        assert_eq!(app.monitor.urls, vec!["https://a.test"]);

        let vars = HashMap::from([
            ("TOKEN", "123:abc"),
            ("CHAT_ID", "-10042"),
            ("TELEGRAM_API_URL", "http://127.0.0.1:8081"),
        ]);
        let app = build_app_config(file.path(), |k| vars.get(k).map(|v| v.to_string()))
            .expect("valid config");
        assert_eq!(app.telegram_api, "http://127.0.0.1:8081");

        let vars = HashMap::from([
            ("TOKEN", "123:abc"),
            ("CHAT_ID", "-10042"),
            ("TELEGRAM_API_URL", "   "),
        ]);
        let app = build_app_config(file.path(), |k| vars.get(k).map(|v| v.to_string()))
            .expect("valid config");
        assert_eq!(app.telegram_api, DEFAULT_TELEGRAM_API);
    }

    #[test]
    fn test_load_config_reads_credentials_from_env_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = dir.path().join("config.json");
        std::fs::write(&config, r#"{"urls": ["https://a.test"], "interval": 5}"#)
            .expect("write config");
        let env_file = dir.path().join("secrets.env");
        std::fs::write(&env_file, "TOKEN=123:abc\nCHAT_ID=-10042\n").expect("write env");

        let app = load_config(&config, Some(&env_file)).expect("valid config");

        assert_eq!(app.credentials.token, "123:abc");
        assert_eq!(app.credentials.chat_id, "-10042");
        assert_eq!(app.monitor.urls, vec!["https://a.test"]);
        assert_eq!(app.monitor.interval, 5);
        assert!(!app.telegram_api.is_empty());
    }

    #[test]
    fn test_missing_env_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = dir.path().join("config.json");
        std::fs::write(&config, r#"{"urls": ["https://a.test"], "interval": 5}"#)
            .expect("write config");
        let missing = dir.path().join("nope.env");

        let err = load_config(&config, Some(&missing)).unwrap_err();
        match err {
            ConfigError::EnvFile { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
