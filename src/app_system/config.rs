//! Runtime settings: built-in defaults, then an optional `canteen.toml`, then
//! `CANTEEN__*` environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs, io};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::TransitionPolicy;

pub const DEFAULT_CONFIG_FILE: &str = "canteen.toml";
pub const CONFIG_PATH_ENV: &str = "CANTEEN_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub channel_buffer: usize,
    pub request_timeout: Duration,
    pub transition_policy: TransitionPolicy,
    pub log_filter: String,
    pub seed_demo_data: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            channel_buffer: 32,
            request_timeout: Duration::from_millis(2000),
            transition_policy: TransitionPolicy::Permissive,
            log_filter: "info".into(),
            seed_demo_data: true,
        }
    }
}

/// Every key is optional; absent keys keep whatever was there before.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    channel_buffer: Option<usize>,
    request_timeout_ms: Option<u64>,
    transition_policy: Option<TransitionPolicy>,
    log_filter: Option<String>,
    seed_demo_data: Option<bool>,
}

impl Settings {
    /// Applies the keys present in a TOML document on top of `self`.
    pub fn merge_toml(mut self, raw: &str, path: &Path) -> Result<Self, ConfigError> {
        let file: FileSettings = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(v) = file.channel_buffer {
            self.channel_buffer = v;
        }
        if let Some(v) = file.request_timeout_ms {
            self.request_timeout = Duration::from_millis(v);
        }
        if let Some(v) = file.transition_policy {
            self.transition_policy = v;
        }
        if let Some(v) = file.log_filter {
            self.log_filter = v;
        }
        if let Some(v) = file.seed_demo_data {
            self.seed_demo_data = v;
        }
        Ok(self)
    }

    /// Applies overrides from `lookup` (normally the process environment).
    pub fn merge_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(v) = lookup("CANTEEN__CHANNEL_BUFFER") {
            self.channel_buffer = parse_value("CANTEEN__CHANNEL_BUFFER", &v)?;
        }
        if let Some(v) = lookup("CANTEEN__REQUEST_TIMEOUT_MS") {
            self.request_timeout = Duration::from_millis(parse_value("CANTEEN__REQUEST_TIMEOUT_MS", &v)?);
        }
        if let Some(v) = lookup("CANTEEN__TRANSITION_POLICY") {
            self.transition_policy = parse_value("CANTEEN__TRANSITION_POLICY", &v)?;
        }
        if let Some(v) = lookup("CANTEEN__LOG_FILTER") {
            self.log_filter = v;
        }
        if let Some(v) = lookup("CANTEEN__SEED_DEMO_DATA") {
            self.seed_demo_data = parse_value("CANTEEN__SEED_DEMO_DATA", &v)?;
        }
        Ok(self)
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}

/// Loads settings from `CANTEEN_CONFIG` (or `./canteen.toml`) and the environment.
///
/// A missing default file is fine; a missing file named by `CANTEEN_CONFIG` is not.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let explicit = env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
    let path = explicit
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    let mut settings = Settings::default();
    match fs::read_to_string(&path) {
        Ok(raw) => settings = settings.merge_toml(&raw, &path)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound && explicit.is_none() => {}
        Err(source) => return Err(ConfigError::Read { path, source }),
    }

    settings.merge_env(|key| env::var(key).ok())
}
