// src/error.rs

use crate::config::ConfigError;
use crate::session::MetaField;
use crate::sink::SinkError;
use crate::template::{TemplateLoadError, UiStrings};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserMsgKind {
    Success,
    Warn,
    Error,
}

#[derive(Clone, Debug)]
pub struct UserMsg {
    pub kind: UserMsgKind,
    pub short: String,
    pub detail: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // --------------------------------------------------
    // generic / plumbing
    // --------------------------------------------------
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("state lock poisoned")]
    StateLockPoisoned,

    // --------------------------------------------------
    // form input / session
    // --------------------------------------------------
    #[error("missing required fields: {}", join_meta_ids(.0))]
    MissingRequired(Vec<MetaField>),
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("field '{id}' does not hold {expected} values")]
    FieldKindMismatch { id: String, expected: &'static str },
    #[error("unknown day: {0}")]
    UnknownDay(String),
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    // --------------------------------------------------
    // schema / config
    // --------------------------------------------------
    #[error(transparent)]
    Schema(#[from] TemplateLoadError),
    #[error(transparent)]
    Config(#[from] ConfigError),

    // --------------------------------------------------
    // remote sink
    // --------------------------------------------------
    #[error("remote sink: {0}")]
    Sink(#[from] SinkError),
}

fn join_meta_ids(fields: &[MetaField]) -> String {
    fields
        .iter()
        .map(|f| f.id())
        .collect::<Vec<_>>()
        .join(", ")
}

impl AppError {
    /// Local validation failures are recoverable in place; nothing was sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::MissingRequired(_) | AppError::InvalidDate(_)
        )
    }

    /// Headline in the active UI language; the error's own text is kept as
    /// detail for debug mode.
    pub fn user_msg(&self, ui: &UiStrings) -> UserMsg {
        use AppError::*;

        let mut kind = UserMsgKind::Error;
        let detail = Some(self.to_string());

        let short = match self {
            Io(_) => ui.error_file.clone(),

            MissingRequired(fields) => {
                kind = UserMsgKind::Warn;
                let names = fields
                    .iter()
                    .map(|f| f.label(ui))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{} {} {names}", ui.submission_error, ui.missing_fields)
            }
            InvalidDate(_) => {
                kind = UserMsgKind::Warn;
                ui.error_invalid_date.clone()
            }

            Sink(SinkError::NotConfigured(_)) => ui.error_sink_not_configured.clone(),
            Sink(SinkError::HeaderMismatch { .. }) => ui.error_sheet_columns.clone(),
            Sink(_) => ui.submission_sink_error.clone(),

            StateLockPoisoned
            | UnknownField(_)
            | FieldKindMismatch { .. }
            | UnknownDay(_)
            | Schema(_)
            | Config(_) => ui.error_internal.clone(),
        };

        UserMsg {
            kind,
            short,
            detail,
        }
    }
}
