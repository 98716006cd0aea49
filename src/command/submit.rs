// src/command/submit.rs

use chrono::NaiveDateTime;

use super::document::{build_download, DownloadDoc};
use super::record::{assemble_row, SubmissionRow};
use crate::command_state::{lock_session, lock_sink};
use crate::error::AppResult;
use crate::session::SessionStore;
use crate::sink::{AppendReceipt, RowSink};
use crate::template::FormSchema;
use crate::types::AppState;

#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub row: SubmissionRow,
    pub receipt: AppendReceipt,
    pub download: DownloadDoc,
}

/// Validate, assemble, append, then render. The document is only produced
/// once the sink has accepted the row; on any error the session is untouched.
pub fn submit_with_sink(
    schema: &FormSchema,
    session: &SessionStore,
    sink: &mut dyn RowSink,
    day_id: &str,
    now: NaiveDateTime,
) -> AppResult<SubmitOutcome> {
    let row = assemble_row(schema, session, day_id, now)?;

    let receipt = sink.append(&row).map_err(|e| {
        log::warn!("submit: {} rejected {day_id}: {e}", sink.describe());
        e
    })?;

    log::info!(
        "submit: appended {day_id} for group '{}' to '{}' (new sheet: {}, header written: {})",
        session.info().group_number.trim(),
        receipt.sheet,
        receipt.created_sheet,
        receipt.wrote_header
    );

    let download = build_download(schema, session, day_id)?;

    Ok(SubmitOutcome {
        row,
        receipt,
        download,
    })
}

pub fn submit_day(state: &AppState, day_id: &str, now: NaiveDateTime) -> AppResult<SubmitOutcome> {
    // Snapshot so the sink call does not hold the session lock.
    let session = lock_session(state)?.clone();

    let outcome = {
        let mut sink = lock_sink(state)?;
        submit_with_sink(&state.schema, &session, &mut **sink, day_id, now)
    };

    if let Err(e) = &outcome {
        if e.is_validation() {
            log::debug!("submit: validation failed for {day_id}: {e}");
        }
    }

    outcome
}
