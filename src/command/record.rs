// src/command/record.rs

use chrono::NaiveDateTime;

use crate::error::{AppError, AppResult};
use crate::session::{MetaField, SessionStore};
use crate::template::FormSchema;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const COL_TIMESTAMP: &str = "Timestamp";
pub const COL_LANGUAGE: &str = "Language";
pub const COL_GROUP_NUMBER: &str = "GroupNumber";
pub const COL_TIME_SLOT: &str = "MeetingTimeSlot";
pub const COL_DATE: &str = "MeetingDate";
pub const COL_PROJECT_TITLE: &str = "ProjectTitle";
pub const COL_RESEARCH_QUESTION: &str = "CurrentResearchQuestion";
pub const COL_NOTE_TAKER: &str = "NoteTaker";
pub const COL_DAY_FOCUS: &str = "MeetingDayFocus";

/// Fixed leading columns. Day field ids follow in schema order.
pub const META_COLUMNS: [&str; 9] = [
    COL_TIMESTAMP,
    COL_LANGUAGE,
    COL_GROUP_NUMBER,
    COL_TIME_SLOT,
    COL_DATE,
    COL_PROJECT_TITLE,
    COL_RESEARCH_QUESTION,
    COL_NOTE_TAKER,
    COL_DAY_FOCUS,
];

/// One flattened submission: ordered (column, value) pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRow {
    cells: Vec<(String, String)>,
}

impl SubmissionRow {
    pub fn from_cells(cells: Vec<(String, String)>) -> Self {
        Self { cells }
    }

    pub fn header(&self) -> Vec<String> {
        self.cells.iter().map(|(c, _)| c.clone()).collect()
    }

    pub fn values(&self) -> Vec<String> {
        self.cells.iter().map(|(_, v)| v.clone()).collect()
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Full column list for `schema`, independent of any session.
pub fn row_header(schema: &FormSchema) -> Vec<String> {
    META_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(schema.day_field_ids().iter().cloned())
        .collect()
}

pub fn validate_required(session: &SessionStore) -> AppResult<()> {
    let missing = session.missing_required();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::MissingRequired(missing))
    }
}

/// Flattens without validating. Every schema field gets a cell, including
/// fields of days other than `day_id`.
pub fn flatten_row(
    schema: &FormSchema,
    session: &SessionStore,
    day_id: &str,
    timestamp: NaiveDateTime,
) -> SubmissionRow {
    let meta = |f: MetaField| session.meta_text(f);

    let mut cells: Vec<(String, String)> = vec![
        (COL_TIMESTAMP.into(), timestamp.format(TIMESTAMP_FORMAT).to_string()),
        (COL_LANGUAGE.into(), session.locale().code().to_string()),
        (COL_GROUP_NUMBER.into(), meta(MetaField::GroupNumber)),
        (COL_TIME_SLOT.into(), meta(MetaField::TimeSlot)),
        (COL_DATE.into(), meta(MetaField::Date)),
        (COL_PROJECT_TITLE.into(), meta(MetaField::ProjectTitle)),
        (COL_RESEARCH_QUESTION.into(), meta(MetaField::ResearchQuestion)),
        (COL_NOTE_TAKER.into(), meta(MetaField::NoteTaker)),
        (COL_DAY_FOCUS.into(), day_id.to_string()),
    ];

    cells.extend(schema.day_field_ids().iter().map(|id| {
        let v = session.value(id).map(|v| v.to_cell()).unwrap_or_default();
        (id.clone(), v)
    }));

    SubmissionRow { cells }
}

/// Validation, then flattening. Nothing is produced for an invalid session.
pub fn assemble_row(
    schema: &FormSchema,
    session: &SessionStore,
    day_id: &str,
    timestamp: NaiveDateTime,
) -> AppResult<SubmissionRow> {
    if schema.day(session.locale(), day_id).is_none() {
        return Err(AppError::UnknownDay(day_id.to_string()));
    }
    validate_required(session)?;
    Ok(flatten_row(schema, session, day_id, timestamp))
}
