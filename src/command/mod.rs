// src/command/mod.rs

pub mod document;
pub mod record;
pub mod render;
pub mod submit;

// --- Public façade ---

use crate::command_state::lock_session;
use crate::error::AppResult;
use crate::locale::Locale;
use crate::session::MetaField;
use crate::types::AppState;

pub use document::{build_download, document_file_name, render_document, DownloadDoc};
pub use record::{assemble_row, flatten_row, row_header, validate_required, SubmissionRow};
pub use render::{render_day, FormBackend};
pub use submit::{submit_day, submit_with_sink, SubmitOutcome};

pub fn set_locale(state: &AppState, locale: Locale) -> AppResult<()> {
    lock_session(state)?.set_locale(locale);
    Ok(())
}

pub fn current_locale(state: &AppState) -> AppResult<Locale> {
    Ok(lock_session(state)?.locale())
}

pub fn set_meta(state: &AppState, field: MetaField, value: impl Into<String>) -> AppResult<()> {
    lock_session(state)?.set_meta_text(field, value)
}

pub fn set_field_text(state: &AppState, id: &str, value: impl Into<String>) -> AppResult<()> {
    lock_session(state)?.set_text(id, value)
}

pub fn set_field_flag(state: &AppState, id: &str, value: bool) -> AppResult<()> {
    lock_session(state)?.set_flag(id, value)
}

/// File name the current session would download for `day_id`.
pub fn preview_file_name(state: &AppState, day_id: &str) -> AppResult<String> {
    let session = lock_session(state)?;
    let number = state
        .schema
        .day(session.locale(), day_id)
        .map(|d| d.number)
        .ok_or_else(|| crate::error::AppError::UnknownDay(day_id.to_string()))?;
    Ok(document_file_name(
        &session.info().group_number,
        number,
        &session.meta_text(MetaField::Date),
    ))
}
