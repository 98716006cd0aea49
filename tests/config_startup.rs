// tests/config_startup.rs

mod common;

use capstone_meeting_tracker_lib::{
    command,
    config::{AppConfig, SinkKind, ENV_SPREADSHEET_ID},
    init_sink, init_state,
    locale::Locale,
};

use crate::common::{at, fill_required};

#[test]
fn memory_config_starts_and_accepts_submissions() {
    let td = tempfile::tempdir().expect("tempdir");
    let path = td.path().join("capstone.toml");
    std::fs::write(
        &path,
        "default_locale = \"ja\"\n\n[sink]\nkind = \"memory\"\nsheet_base_name = \"Dry_Run\"\n",
    )
    .expect("write");

    let cfg = AppConfig::load(&path).expect("config");
    assert_eq!(cfg.sink.kind, SinkKind::Memory);

    let state = init_state(&cfg).expect("state");
    assert_eq!(command::current_locale(&state).expect("locale"), Locale::Ja);

    fill_required(&state);
    let out = command::submit_day(&state, "day_1", at(10, 0, 0)).expect("submit");
    assert!(out.receipt.sheet.starts_with("Dry_Run_"));
}

#[test]
fn disabled_sink_is_unconfigured() {
    let cfg = AppConfig::from_toml_str("[sink]\nkind = \"none\"\n").expect("config");
    let sink = init_sink(&cfg);
    assert!(sink.describe().starts_with("unconfigured"));
}

#[test]
fn incomplete_google_config_falls_back_to_unconfigured() {
    let mut cfg = AppConfig::default();
    cfg.apply_env_overrides(|k| (k == ENV_SPREADSHEET_ID).then(|| "sheet-123".to_string()));
    assert_eq!(cfg.sink.spreadsheet_id.as_deref(), Some("sheet-123"));

    // no token and no key file
    let sink = init_sink(&cfg);
    assert!(sink.describe().contains("access_token"));
}

#[test]
fn missing_service_account_file_falls_back_to_unconfigured() {
    let td = tempfile::tempdir().expect("tempdir");
    let cfg = AppConfig::from_toml_str(&format!(
        "[sink]\nspreadsheet_id = \"s\"\nservice_account_key = \"{}\"\n",
        td.path().join("missing.json").display()
    ))
    .expect("config");

    let sink = init_sink(&cfg);
    assert!(sink.describe().starts_with("unconfigured"));
}
