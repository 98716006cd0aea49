// src/context.rs

use std::path::PathBuf;

use crate::config::config_path;

pub const APP_QUALIFIER: &str = "org";
pub const APP_ORG: &str = "capstone";
pub const APP_ID: &str = "capstone-meeting-tracker";

pub const ENV_DATA_DIR: &str = "CAPSTONE_DATA_DIR";
pub const ENV_DEBUG: &str = "CAPSTONE_DEBUG";

#[derive(Debug, Clone)]
pub struct AppCtx {
    pub app_data_dir: PathBuf,
    pub debug_ui: bool,
}

impl AppCtx {
    pub fn new(app_data_dir: PathBuf) -> Self {
        let debug_ui = std::env::var(ENV_DEBUG)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            app_data_dir,
            debug_ui,
        }
    }

    /// `$CAPSTONE_DATA_DIR`, else `fallback`.
    pub fn resolve(fallback: PathBuf) -> Self {
        let dir = std::env::var_os(ENV_DATA_DIR)
            .map(PathBuf::from)
            .unwrap_or(fallback);
        Self::new(dir)
    }

    /// <app_data>/capstone.toml unless overridden.
    pub fn config_path(&self) -> PathBuf {
        config_path(&self.app_data_dir)
    }
}
