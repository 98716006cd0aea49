// src/template/form_schema.rs

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::locale::Locale;
use crate::session::MetaField;

/// Schema shipped with the app.
pub const BUILTIN_FORM_SCHEMA: &str = include_str!("../../assets/form_schema.json5");

/// Top-level JSON5 form schema.
#[derive(Debug, Clone, Deserialize)]
pub struct FormTemplate {
    pub schema_id: String,
    pub locales: Vec<String>,
    pub ui: BTreeMap<String, UiStrings>,
    pub days: Vec<DayTemplate>,
}

/// Localized chrome around the day fields (sidebar, buttons, messages).
#[derive(Debug, Clone, Deserialize)]
pub struct UiStrings {
    pub app_title: String,
    pub language_select: String,
    pub sidebar_title: String,
    pub group_number: String,
    pub group_number_help: String,
    pub time_slot: String,
    pub time_slot_help: String,
    pub date: String,
    pub date_help: String,
    pub project_title: String,
    pub project_title_help: String,
    pub research_question: String,
    pub research_question_help: String,
    pub note_taker: String,
    pub note_taker_help: String,
    pub download_copy: String,
    pub submit_and_download: String,
    pub submission_success: String,
    pub submission_sink_error: String,
    pub submission_error: String,
    pub missing_fields: String,
    pub error_file: String,
    pub error_invalid_date: String,
    pub error_sink_not_configured: String,
    pub error_sheet_columns: String,
    pub error_internal: String,
    pub file_will_be_named: String,
    pub hint_visibility: String,
    pub important_label: String,
    pub footer_reminder: String,
    pub yes: String,
    pub no: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DayTemplate {
    pub id: String,
    pub number: u8,
    pub title: BTreeMap<String, String>,
    pub fields: Vec<FieldTemplate>,
    pub checklist: Option<ChecklistTemplate>,
}

/// A titled group of checkboxes. The title is presentation only.
#[derive(Debug, Clone, Deserialize)]
pub struct ChecklistTemplate {
    pub id: String,
    pub title: BTreeMap<String, FieldText>,
    pub items: Vec<FieldTemplate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldTemplate {
    pub id: String,
    pub kind: FieldKind,
    pub text: BTreeMap<String, FieldText>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldText {
    pub label: String,
    #[serde(default)]
    pub help: String,
    #[serde(default)]
    pub placeholder: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    MultilineText,
    Boolean,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::MultilineText => "multiline_text",
            FieldKind::Boolean => "boolean",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateLoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Form schema parse error: {0}")]
    Parse(#[from] json5::Error),
    #[error("Form schema validation error: {0}")]
    Validation(String),
}

/// Parse a JSON5 form schema string.
pub fn parse_template_str(s: &str) -> Result<FormTemplate, TemplateLoadError> {
    let tpl: FormTemplate = json5::from_str(s)?;
    validate_template(&tpl)?;
    Ok(tpl)
}

/// Load a JSON5 form schema from disk.
pub fn load_template_path(path: impl AsRef<Path>) -> Result<FormTemplate, TemplateLoadError> {
    let s = fs::read_to_string(path)?;
    parse_template_str(&s)
}

fn invalid(msg: String) -> TemplateLoadError {
    TemplateLoadError::Validation(msg)
}

/// Structural validation: locale coverage, id uniqueness, day prefixes, kinds.
pub fn validate_template(tpl: &FormTemplate) -> Result<(), TemplateLoadError> {
    if tpl.schema_id.trim().is_empty() {
        return Err(invalid("schema_id must be non-empty".to_string()));
    }

    let locales: BTreeSet<&str> = tpl.locales.iter().map(|s| s.as_str()).collect();
    if locales.len() != tpl.locales.len() {
        return Err(invalid("locales must not repeat".to_string()));
    }
    for code in &locales {
        if Locale::from_code(code).is_none() {
            return Err(invalid(format!("unsupported locale '{code}'")));
        }
    }
    for l in Locale::ALL {
        if !locales.contains(l.code()) {
            return Err(invalid(format!("locale '{}' is missing", l.code())));
        }
    }

    check_locale_keys("ui", tpl.ui.keys(), &locales)?;

    if tpl.days.is_empty() {
        return Err(invalid("schema must contain at least one day".to_string()));
    }

    let reserved: BTreeSet<&str> = MetaField::ALL.iter().map(|m| m.id()).collect();
    let mut day_ids = BTreeSet::new();
    let mut day_numbers = BTreeSet::new();
    let mut field_ids = BTreeSet::new();

    for (i, d) in tpl.days.iter().enumerate() {
        if d.id.trim().is_empty() {
            return Err(invalid(format!("days[{i}].id must be non-empty")));
        }
        if !day_ids.insert(d.id.as_str()) {
            return Err(invalid(format!("days[{i}].id '{}' is duplicated", d.id)));
        }
        if d.number == 0 || !day_numbers.insert(d.number) {
            return Err(invalid(format!(
                "days[{i}].number must be unique and positive; got {}",
                d.number
            )));
        }
        check_locale_keys(&format!("days[{i}].title"), d.title.keys(), &locales)?;

        if d.fields.is_empty() {
            return Err(invalid(format!("days[{i}] must contain at least one field")));
        }

        let prefix = format!("{}_", d.id);
        let mut check_field = |path: String, f: &FieldTemplate| -> Result<(), TemplateLoadError> {
            if !f.id.starts_with(&prefix) || f.id.len() == prefix.len() {
                return Err(invalid(format!(
                    "{path}.id '{}' must start with '{prefix}'",
                    f.id
                )));
            }
            if reserved.contains(f.id.as_str()) {
                return Err(invalid(format!("{path}.id '{}' is reserved", f.id)));
            }
            if !field_ids.insert(f.id.clone()) {
                return Err(invalid(format!("{path}.id '{}' is duplicated", f.id)));
            }
            check_locale_keys(&format!("{path}.text"), f.text.keys(), &locales)?;
            for (code, t) in &f.text {
                if t.label.trim().is_empty() {
                    return Err(invalid(format!("{path}.text.{code}.label must be non-empty")));
                }
            }
            Ok(())
        };

        for (j, f) in d.fields.iter().enumerate() {
            check_field(format!("days[{i}].fields[{j}]"), f)?;
        }

        if let Some(c) = &d.checklist {
            if c.id.trim().is_empty() {
                return Err(invalid(format!("days[{i}].checklist.id must be non-empty")));
            }
            check_locale_keys(&format!("days[{i}].checklist.title"), c.title.keys(), &locales)?;
            if c.items.is_empty() {
                return Err(invalid(format!(
                    "days[{i}].checklist must contain at least one item"
                )));
            }
            for (j, f) in c.items.iter().enumerate() {
                let path = format!("days[{i}].checklist.items[{j}]");
                if f.kind != FieldKind::Boolean {
                    return Err(invalid(format!(
                        "{path} must be kind={}, got {}",
                        FieldKind::Boolean.as_str(),
                        f.kind.as_str()
                    )));
                }
                check_field(path, f)?;
            }
        }
    }

    Ok(())
}

fn check_locale_keys<'a>(
    path: &str,
    keys: impl Iterator<Item = &'a String>,
    locales: &BTreeSet<&str>,
) -> Result<(), TemplateLoadError> {
    let got: BTreeSet<&str> = keys.map(|k| k.as_str()).collect();
    if let Some(missing) = locales.iter().find(|l| !got.contains(*l)) {
        return Err(invalid(format!("{path} is missing locale '{missing}'")));
    }
    if let Some(extra) = got.iter().find(|k| !locales.contains(*k)) {
        return Err(invalid(format!("{path} has undeclared locale '{extra}'")));
    }
    Ok(())
}
