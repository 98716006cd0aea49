// src/sink/memory.rs

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{sheets::SheetsSink, SheetsApi, SinkError};

/// Recorded `SheetsApi` invocation, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetsCall {
    SheetTitles,
    AddSheet(String),
    HeaderRow(String),
    WriteHeader(String),
    AppendRow(String),
}

#[derive(Debug, Default)]
struct Book {
    sheets: BTreeMap<String, Vec<Vec<String>>>,
    calls: Vec<SheetsCall>,
}

/// In-process spreadsheet. Clones share the same book, so a handle kept by
/// the caller observes appends made through a boxed sink.
#[derive(Debug, Clone, Default)]
pub struct MemorySheets {
    book: Arc<Mutex<Book>>,
}

pub type MemorySink = SheetsSink<MemorySheets>;

impl MemorySheets {
    fn lock(&self) -> Result<MutexGuard<'_, Book>, SinkError> {
        self.book
            .lock()
            .map_err(|_| SinkError::Transport("memory sheet lock poisoned".into()))
    }

    pub fn insert_sheet(&self, title: &str, rows: Vec<Vec<String>>) {
        if let Ok(mut b) = self.lock() {
            b.sheets.insert(title.to_string(), rows);
        }
    }

    pub fn titles(&self) -> Vec<String> {
        self.lock()
            .map(|b| b.sheets.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn rows(&self, title: &str) -> Vec<Vec<String>> {
        self.lock()
            .ok()
            .and_then(|b| b.sheets.get(title).cloned())
            .unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<SheetsCall> {
        self.lock().map(|b| b.calls.clone()).unwrap_or_default()
    }
}

impl SheetsApi for MemorySheets {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn sheet_titles(&mut self) -> Result<Vec<String>, SinkError> {
        let mut b = self.lock()?;
        b.calls.push(SheetsCall::SheetTitles);
        Ok(b.sheets.keys().cloned().collect())
    }

    fn add_sheet(&mut self, title: &str) -> Result<(), SinkError> {
        let mut b = self.lock()?;
        b.calls.push(SheetsCall::AddSheet(title.to_string()));
        if b.sheets.contains_key(title) {
            return Err(SinkError::Http {
                status: 400,
                body: format!("sheet '{title}' already exists"),
            });
        }
        b.sheets.insert(title.to_string(), Vec::new());
        Ok(())
    }

    fn header_row(&mut self, title: &str) -> Result<Vec<String>, SinkError> {
        let mut b = self.lock()?;
        b.calls.push(SheetsCall::HeaderRow(title.to_string()));
        let rows = b.sheets.get(title).ok_or_else(|| missing(title))?;
        Ok(rows.first().cloned().unwrap_or_default())
    }

    fn write_header(&mut self, title: &str, header: &[String]) -> Result<(), SinkError> {
        let mut b = self.lock()?;
        b.calls.push(SheetsCall::WriteHeader(title.to_string()));
        let rows = b.sheets.get_mut(title).ok_or_else(|| missing(title))?;
        match rows.first_mut() {
            Some(first) => *first = header.to_vec(),
            None => rows.push(header.to_vec()),
        }
        Ok(())
    }

    fn append_row(&mut self, title: &str, values: &[String]) -> Result<(), SinkError> {
        let mut b = self.lock()?;
        b.calls.push(SheetsCall::AppendRow(title.to_string()));
        let rows = b.sheets.get_mut(title).ok_or_else(|| missing(title))?;
        rows.push(values.to_vec());
        Ok(())
    }
}

fn missing(title: &str) -> SinkError {
    SinkError::Http {
        status: 400,
        body: format!("Unable to parse range: {title}"),
    }
}
