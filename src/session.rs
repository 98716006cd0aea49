// src/session.rs

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::error::{AppError, AppResult};
use crate::locale::Locale;
use crate::template::{FieldKind, FormSchema, UiStrings};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
}

impl FieldValue {
    pub fn default_for(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text | FieldKind::MultilineText => FieldValue::Text(String::new()),
            FieldKind::Boolean => FieldValue::Bool(false),
        }
    }

    /// Spreadsheet cell text, interpreted as if typed by a user.
    pub fn to_cell(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Bool(true) => "TRUE".to_string(),
            FieldValue::Bool(false) => "FALSE".to_string(),
        }
    }
}

/// Meeting metadata shown in the side panel and shared by every day tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetaField {
    GroupNumber,
    TimeSlot,
    Date,
    ProjectTitle,
    NoteTaker,
    ResearchQuestion,
}

impl MetaField {
    pub const ALL: [MetaField; 6] = [
        MetaField::GroupNumber,
        MetaField::TimeSlot,
        MetaField::Date,
        MetaField::ProjectTitle,
        MetaField::NoteTaker,
        MetaField::ResearchQuestion,
    ];

    /// Must be non-empty before a submission is sent.
    pub const REQUIRED: [MetaField; 4] = [
        MetaField::GroupNumber,
        MetaField::TimeSlot,
        MetaField::ProjectTitle,
        MetaField::NoteTaker,
    ];

    pub fn id(self) -> &'static str {
        match self {
            MetaField::GroupNumber => "group_number",
            MetaField::TimeSlot => "time_slot",
            MetaField::Date => "date",
            MetaField::ProjectTitle => "project_title",
            MetaField::NoteTaker => "note_taker",
            MetaField::ResearchQuestion => "current_research_question",
        }
    }

    pub fn label(self, ui: &UiStrings) -> &str {
        match self {
            MetaField::GroupNumber => &ui.group_number,
            MetaField::TimeSlot => &ui.time_slot,
            MetaField::Date => &ui.date,
            MetaField::ProjectTitle => &ui.project_title,
            MetaField::NoteTaker => &ui.note_taker,
            MetaField::ResearchQuestion => &ui.research_question,
        }
    }

    pub fn help(self, ui: &UiStrings) -> &str {
        match self {
            MetaField::GroupNumber => &ui.group_number_help,
            MetaField::TimeSlot => &ui.time_slot_help,
            MetaField::Date => &ui.date_help,
            MetaField::ProjectTitle => &ui.project_title_help,
            MetaField::NoteTaker => &ui.note_taker_help,
            MetaField::ResearchQuestion => &ui.research_question_help,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeetingInfo {
    pub group_number: String,
    pub time_slot: String,
    pub date: NaiveDate,
    pub project_title: String,
    pub note_taker: String,
    pub research_question: String,
}

impl MeetingInfo {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            group_number: String::new(),
            time_slot: String::new(),
            date,
            project_title: String::new(),
            note_taker: String::new(),
            research_question: String::new(),
        }
    }
}

/// Per-user form state. One instance per running session; nothing here is
/// persisted except through a submission.
#[derive(Clone, Debug)]
pub struct SessionStore {
    locale: Locale,
    info: MeetingInfo,
    values: BTreeMap<String, FieldValue>,
}

impl SessionStore {
    /// Seeds every day field of `schema` with its kind's default.
    pub fn new(schema: &FormSchema, locale: Locale, today: NaiveDate) -> Self {
        let values = schema
            .day_field_ids()
            .iter()
            .filter_map(|id| {
                schema
                    .field_kind(id)
                    .map(|k| (id.clone(), FieldValue::default_for(k)))
            })
            .collect();

        Self {
            locale,
            info: MeetingInfo::new(today),
            values,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Presentation only; stored values are untouched.
    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    pub fn info(&self) -> &MeetingInfo {
        &self.info
    }

    pub fn info_mut(&mut self) -> &mut MeetingInfo {
        &mut self.info
    }

    pub fn value(&self, id: &str) -> Option<&FieldValue> {
        self.values.get(id)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        match self.values.get(id) {
            Some(FieldValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn flag(&self, id: &str) -> Option<bool> {
        match self.values.get(id) {
            Some(FieldValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn set_text(&mut self, id: &str, value: impl Into<String>) -> AppResult<()> {
        match self.values.get_mut(id) {
            Some(FieldValue::Text(s)) => {
                *s = value.into();
                Ok(())
            }
            Some(FieldValue::Bool(_)) => Err(AppError::FieldKindMismatch {
                id: id.to_string(),
                expected: "text",
            }),
            None => Err(AppError::UnknownField(id.to_string())),
        }
    }

    pub fn set_flag(&mut self, id: &str, value: bool) -> AppResult<()> {
        match self.values.get_mut(id) {
            Some(FieldValue::Bool(b)) => {
                *b = value;
                Ok(())
            }
            Some(FieldValue::Text(_)) => Err(AppError::FieldKindMismatch {
                id: id.to_string(),
                expected: "boolean",
            }),
            None => Err(AppError::UnknownField(id.to_string())),
        }
    }

    pub fn meta_text(&self, field: MetaField) -> String {
        let i = &self.info;
        match field {
            MetaField::GroupNumber => i.group_number.clone(),
            MetaField::TimeSlot => i.time_slot.clone(),
            MetaField::Date => i.date.format(DATE_FORMAT).to_string(),
            MetaField::ProjectTitle => i.project_title.clone(),
            MetaField::NoteTaker => i.note_taker.clone(),
            MetaField::ResearchQuestion => i.research_question.clone(),
        }
    }

    pub fn set_meta_text(&mut self, field: MetaField, value: impl Into<String>) -> AppResult<()> {
        let value = value.into();
        let i = &mut self.info;
        match field {
            MetaField::GroupNumber => i.group_number = value,
            MetaField::TimeSlot => i.time_slot = value,
            MetaField::Date => {
                i.date = NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
                    .map_err(|_| AppError::InvalidDate(value))?;
            }
            MetaField::ProjectTitle => i.project_title = value,
            MetaField::NoteTaker => i.note_taker = value,
            MetaField::ResearchQuestion => i.research_question = value,
        }
        Ok(())
    }

    /// Required metadata that is empty after trimming, in `MetaField::REQUIRED` order.
    pub fn missing_required(&self) -> Vec<MetaField> {
        MetaField::REQUIRED
            .into_iter()
            .filter(|f| self.meta_text(*f).trim().is_empty())
            .collect()
    }
}
