// src/sink/sheets.rs

use super::{naming::sheet_title, AppendReceipt, RowSink, SinkError};
use crate::command::record::SubmissionRow;

/// Low-level spreadsheet operations. `SheetsSink` layers the
/// create/header/append policy on top.
pub trait SheetsApi {
    fn describe(&self) -> String;

    fn sheet_titles(&mut self) -> Result<Vec<String>, SinkError>;

    fn add_sheet(&mut self, title: &str) -> Result<(), SinkError>;

    /// First row of `title`; empty if the sheet has no data.
    fn header_row(&mut self, title: &str) -> Result<Vec<String>, SinkError>;

    fn write_header(&mut self, title: &str, header: &[String]) -> Result<(), SinkError>;

    /// Values are interpreted as if typed by a user.
    fn append_row(&mut self, title: &str, values: &[String]) -> Result<(), SinkError>;
}

pub struct SheetsSink<A> {
    api: A,
    base_name: String,
    versioned: bool,
}

impl<A: SheetsApi> SheetsSink<A> {
    pub fn new(api: A, base_name: &str, versioned: bool) -> Self {
        Self {
            api,
            base_name: base_name.to_string(),
            versioned,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn target_title(&self, row: &SubmissionRow) -> String {
        sheet_title(&self.base_name, &row.header(), self.versioned)
    }
}

impl<A: SheetsApi> RowSink for SheetsSink<A> {
    fn describe(&self) -> String {
        format!("{} (sheet base '{}')", self.api.describe(), self.base_name)
    }

    fn append(&mut self, row: &SubmissionRow) -> Result<AppendReceipt, SinkError> {
        let header = row.header();
        let title = self.target_title(row);

        let mut created_sheet = false;
        let mut wrote_header = false;

        let exists = self.api.sheet_titles()?.iter().any(|t| t == &title);
        if !exists {
            match self.api.add_sheet(&title) {
                Ok(()) => created_sheet = true,
                // another client created it after our listing
                Err(e) if is_already_exists(&e) => {
                    log::info!("sink: sheet '{title}' appeared concurrently, reusing it");
                }
                Err(e) => return Err(e),
            }
        }

        let found = if created_sheet {
            Vec::new()
        } else {
            trim_trailing_empty(self.api.header_row(&title)?)
        };

        if found.is_empty() {
            self.api.write_header(&title, &header)?;
            wrote_header = true;
        } else if found != header {
            return Err(SinkError::HeaderMismatch {
                sheet: title,
                expected: header,
                found,
            });
        }

        self.api.append_row(&title, &row.values())?;

        Ok(AppendReceipt {
            sheet: title,
            created_sheet,
            wrote_header,
        })
    }
}

// Sheets answers a duplicate addSheet with 400 "... already exists ...".
fn is_already_exists(e: &SinkError) -> bool {
    matches!(e, SinkError::Http { status: 400, body } if body.contains("already exists"))
}

// Sheets omits trailing empty cells, but a hand-edited sheet may not.
fn trim_trailing_empty(mut row: Vec<String>) -> Vec<String> {
    while row.last().is_some_and(|c| c.trim().is_empty()) {
        row.pop();
    }
    row
}
