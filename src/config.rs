// src/config.rs

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::locale::Locale;

pub const CONFIG_FILE_NAME: &str = "capstone.toml";
pub const DEFAULT_SHEET_BASE_NAME: &str = "All_Submissions";
pub const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

pub const ENV_CONFIG: &str = "CAPSTONE_CONFIG";
pub const ENV_SPREADSHEET_ID: &str = "CAPSTONE_SPREADSHEET_ID";
pub const ENV_SERVICE_ACCOUNT_KEY: &str = "CAPSTONE_SERVICE_ACCOUNT_KEY";
pub const ENV_ACCESS_TOKEN: &str = "CAPSTONE_ACCESS_TOKEN";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub default_locale: Locale,
    /// Alternative JSON5 form schema; the embedded one is used when unset.
    pub schema_path: Option<PathBuf>,
    pub sink: SinkConfig,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SinkKind {
    #[default]
    GoogleSheets,
    Memory,
    None,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SinkConfig {
    pub kind: SinkKind,
    pub spreadsheet_id: Option<String>,
    /// Path to a service-account JSON key.
    pub service_account_key: Option<PathBuf>,
    /// Pre-issued bearer token; takes precedence over the service account.
    pub access_token: Option<String>,
    pub sheet_base_name: String,
    pub versioned_sheet_names: bool,
    pub api_base: String,
    /// Overrides the key file's token endpoint.
    pub token_uri: Option<String>,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            kind: SinkKind::default(),
            spreadsheet_id: None,
            service_account_key: None,
            access_token: None,
            sheet_base_name: DEFAULT_SHEET_BASE_NAME.to_string(),
            versioned_sheet_names: true,
            api_base: DEFAULT_SHEETS_API_BASE.to_string(),
            token_uri: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// A missing file yields defaults; an unreadable or malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(s) => Self::from_toml_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Environment wins over the file. Empty values are ignored.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_SPREADSHEET_ID) {
            self.sink.spreadsheet_id = Some(v);
        }
        if let Some(v) = get(ENV_SERVICE_ACCOUNT_KEY) {
            self.sink.service_account_key = Some(PathBuf::from(v));
        }
        if let Some(v) = get(ENV_ACCESS_TOKEN) {
            self.sink.access_token = Some(v);
        }
    }

    pub fn with_process_env(mut self) -> Self {
        self.apply_env_overrides(|k| std::env::var(k).ok());
        self
    }
}

/// `$CAPSTONE_CONFIG` if set, else `<app_data_dir>/capstone.toml`.
pub fn config_path(app_data_dir: &Path) -> PathBuf {
    std::env::var_os(ENV_CONFIG)
        .map(PathBuf::from)
        .unwrap_or_else(|| app_data_dir.join(CONFIG_FILE_NAME))
}
