// tests/common/mod.rs

#![allow(dead_code)]

use capstone_meeting_tracker_lib::{
    command::SubmissionRow,
    command_state::lock_session,
    session::MetaField,
    sink::{AppendReceipt, MemorySheets, RowSink, SheetsSink, SinkError},
    types::AppState,
};
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

pub const BASE_SHEET: &str = "All_Submissions";

pub fn meeting_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).expect("date")
}

pub fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    meeting_date().and_hms_opt(h, m, s).expect("time")
}

pub struct TestEnv {
    pub state: AppState,
    // shares storage with the sink inside `state`
    pub book: MemorySheets,
}

/// Fresh state backed by an in-memory spreadsheet.
pub fn setup_memory() -> TestEnv {
    let book = MemorySheets::default();
    let sink = SheetsSink::new(book.clone(), BASE_SHEET, true);
    let state = AppState::new_for_tests(Box::new(sink), meeting_date()).expect("state");
    TestEnv { state, book }
}

pub fn setup_with_sink(sink: impl RowSink + Send + 'static) -> AppState {
    AppState::new_for_tests(Box::new(sink), meeting_date()).expect("state")
}

/// group "3", time "10:30", title "EV Study", note taker "Alex"
pub fn fill_required(state: &AppState) {
    let mut s = lock_session(state).expect("session");
    s.set_meta_text(MetaField::GroupNumber, "3").expect("group");
    s.set_meta_text(MetaField::TimeSlot, "10:30").expect("time");
    s.set_meta_text(MetaField::ProjectTitle, "EV Study").expect("title");
    s.set_meta_text(MetaField::NoteTaker, "Alex").expect("taker");
}

/// Counts append calls; optionally fails every one.
#[derive(Clone, Default)]
pub struct CountingSink {
    calls: Arc<AtomicUsize>,
    fail_with_status: Option<u16>,
}

impl CountingSink {
    pub fn failing(status: u16) -> Self {
        Self {
            fail_with_status: Some(status),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RowSink for CountingSink {
    fn describe(&self) -> String {
        "counting".to_string()
    }

    fn append(&mut self, _row: &SubmissionRow) -> Result<AppendReceipt, SinkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_with_status {
            Some(status) => Err(SinkError::Http {
                status,
                body: "backend unavailable".to_string(),
            }),
            None => Ok(AppendReceipt {
                sheet: "counting".to_string(),
                created_sheet: false,
                wrote_header: false,
            }),
        }
    }
}
