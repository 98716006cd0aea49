// src/main.rs

// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod ui;

use capstone_meeting_tracker_lib::config::AppConfig;
use capstone_meeting_tracker_lib::context::{AppCtx, APP_ID, APP_ORG, APP_QUALIFIER};
use directories::ProjectDirs;
use std::path::PathBuf;
use std::sync::Arc;

fn main() -> eframe::Result<()> {
    // RUST_LOG overrides the default level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let default_dir = ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_ID)
        .map(|p| p.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    let ctx = AppCtx::resolve(default_dir);

    if let Err(e) = std::fs::create_dir_all(&ctx.app_data_dir) {
        log::warn!("could not create {}: {e}", ctx.app_data_dir.display());
    }

    let config_path = ctx.config_path();
    let config = match AppConfig::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("config: {e}; using defaults");
            AppConfig::default()
        }
    }
    .with_process_env();

    let state = match capstone_meeting_tracker_lib::init_state(&config) {
        Ok(s) => s,
        Err(e) => {
            log::error!("startup failed: {e}");
            std::process::exit(1);
        }
    };

    let title = state.schema.ui(config.default_locale).app_title.clone();
    let state = Arc::new(state);
    let ctx = Arc::new(ctx);

    log::info!(
        "starting (data dir {}, debug ui {})",
        ctx.app_data_dir.display(),
        ctx.debug_ui
    );

    eframe::run_native(
        &title,
        eframe::NativeOptions::default(),
        Box::new(move |cc| Ok(Box::new(ui::UiApp::new(cc, state.clone(), ctx.clone())))),
    )
}
