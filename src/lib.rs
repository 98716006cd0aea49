// src/lib.rs

pub mod command;
pub mod command_state;
pub mod config;
pub mod context;
pub mod error;
pub mod locale;
pub mod session;
pub mod sink;
pub mod template;
pub mod types;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::session::SessionStore;
use crate::sink::{build_sink, BoxedSink, UnconfiguredSink};
use crate::template::FormSchema;
use crate::types::AppState;
use chrono::{Local, NaiveDate};
use std::sync::{Arc, Mutex};

pub fn load_schema(config: &AppConfig) -> AppResult<FormSchema> {
    let schema = match &config.schema_path {
        Some(p) => {
            log::info!("schema: loading {}", p.display());
            FormSchema::from_path(p)?
        }
        None => FormSchema::builtin()?,
    };
    log::debug!(
        "schema: '{}' with {} day fields",
        schema.schema_id(),
        schema.day_field_ids().len()
    );
    Ok(schema)
}

/// A sink that cannot be built is replaced by one that reports why on
/// every submission, so the form stays usable.
pub fn init_sink(config: &AppConfig) -> BoxedSink {
    match build_sink(&config.sink) {
        Ok(s) => {
            log::info!("sink: {}", s.describe());
            s
        }
        Err(e) => {
            log::warn!("sink: unavailable: {e}");
            Box::new(UnconfiguredSink::new(e.to_string()))
        }
    }
}

pub fn init_state(config: &AppConfig) -> AppResult<AppState> {
    let schema = load_schema(config)?;
    let sink = init_sink(config);
    Ok(AppState::new(schema, config, sink, Local::now().date_naive()))
}

impl AppState {
    pub fn new(schema: FormSchema, config: &AppConfig, sink: BoxedSink, today: NaiveDate) -> Self {
        let session = SessionStore::new(&schema, config.default_locale, today);
        Self {
            schema: Arc::new(schema),
            session: Mutex::new(session),
            sink: Mutex::new(sink),
        }
    }

    /// Built-in schema, default locale, caller-supplied sink.
    pub fn new_for_tests(sink: BoxedSink, today: NaiveDate) -> AppResult<Self> {
        Ok(Self::new(
            FormSchema::builtin()?,
            &AppConfig::default(),
            sink,
            today,
        ))
    }
}
