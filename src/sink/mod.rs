// src/sink/mod.rs

pub mod auth;
pub mod memory;
pub mod naming;
pub mod sheets;
pub mod sheets_http;
#[cfg(test)]
pub mod test_support;

use crate::command::record::SubmissionRow;
use crate::config::{SinkConfig, SinkKind};

pub use memory::{MemorySheets, MemorySink, SheetsCall};
pub use naming::{header_fingerprint, sheet_title};
pub use sheets::{SheetsApi, SheetsSink};
pub use sheets_http::HttpSheetsApi;

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("not configured: {0}")]
    NotConfigured(String),
    #[error("credentials: {0}")]
    Credentials(String),
    #[error("authorization failed: {0}")]
    Auth(String),
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("transport: {0}")]
    Transport(String),
    #[error("sheet '{sheet}' header does not match ({} expected columns, {} found)", .expected.len(), .found.len())]
    HeaderMismatch {
        sheet: String,
        expected: Vec<String>,
        found: Vec<String>,
    },
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for SinkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            SinkError::InvalidResponse(e.to_string())
        } else {
            SinkError::Transport(e.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendReceipt {
    pub sheet: String,
    pub created_sheet: bool,
    pub wrote_header: bool,
}

/// Destination for submission rows. One call per submission; no retries.
pub trait RowSink {
    /// Short human description for logs.
    fn describe(&self) -> String;

    fn append(&mut self, row: &SubmissionRow) -> Result<AppendReceipt, SinkError>;
}

pub type BoxedSink = Box<dyn RowSink + Send>;

/// Stands in when no usable sink is configured; every append fails.
#[derive(Debug, Clone)]
pub struct UnconfiguredSink {
    reason: String,
}

impl UnconfiguredSink {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl RowSink for UnconfiguredSink {
    fn describe(&self) -> String {
        format!("unconfigured ({})", self.reason)
    }

    fn append(&mut self, _row: &SubmissionRow) -> Result<AppendReceipt, SinkError> {
        Err(SinkError::NotConfigured(self.reason.clone()))
    }
}

pub fn build_sink(cfg: &SinkConfig) -> Result<BoxedSink, SinkError> {
    match cfg.kind {
        SinkKind::None => Ok(Box::new(UnconfiguredSink::new(
            "submissions are disabled in config",
        ))),
        SinkKind::Memory => Ok(Box::new(SheetsSink::new(
            MemorySheets::default(),
            &cfg.sheet_base_name,
            cfg.versioned_sheet_names,
        ))),
        SinkKind::GoogleSheets => {
            let api = HttpSheetsApi::from_config(cfg)?;
            Ok(Box::new(SheetsSink::new(
                api,
                &cfg.sheet_base_name,
                cfg.versioned_sheet_names,
            )))
        }
    }
}
