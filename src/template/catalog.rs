// src/template/catalog.rs

use std::collections::BTreeMap;
use std::path::Path;

use super::form_schema::{
    load_template_path, parse_template_str, FieldKind, FieldTemplate, FormTemplate,
    TemplateLoadError, UiStrings, BUILTIN_FORM_SCHEMA,
};
use crate::locale::Locale;

/// One rendered input, resolved for a single locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub id: String,
    pub label: String,
    pub help: String,
    pub placeholder: String,
    pub kind: FieldKind,
}

#[derive(Debug, Clone)]
pub struct ChecklistDef {
    pub id: String,
    pub label: String,
    pub help: String,
    pub items: Vec<FieldDef>,
}

#[derive(Debug, Clone)]
pub struct DaySchema {
    pub id: String,
    pub number: u8,
    pub title: String,
    pub fields: Vec<FieldDef>,
    pub checklist: Option<ChecklistDef>,
}

impl DaySchema {
    /// Plain fields first, then checklist items, in schema order.
    pub fn all_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields
            .iter()
            .chain(self.checklist.iter().flat_map(|c| c.items.iter()))
    }

    pub fn field_ids(&self) -> Vec<&str> {
        self.all_fields().map(|f| f.id.as_str()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct LocaleCatalog {
    pub locale: Locale,
    pub ui: UiStrings,
    pub days: Vec<DaySchema>,
}

/// Form schema resolved once per locale. Field lists are ordered and never
/// recomputed after load.
#[derive(Debug, Clone)]
pub struct FormSchema {
    schema_id: String,
    // indexed by Locale::index()
    catalogs: Vec<LocaleCatalog>,
    day_field_ids: Vec<String>,
    kinds: BTreeMap<String, FieldKind>,
}

impl FormSchema {
    pub fn builtin() -> Result<Self, TemplateLoadError> {
        Self::from_json5(BUILTIN_FORM_SCHEMA)
    }

    pub fn from_json5(s: &str) -> Result<Self, TemplateLoadError> {
        let tpl = parse_template_str(s)?;
        Self::from_template(&tpl)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TemplateLoadError> {
        let tpl = load_template_path(path)?;
        Self::from_template(&tpl)
    }

    /// `tpl` must already have passed `validate_template`.
    fn from_template(tpl: &FormTemplate) -> Result<Self, TemplateLoadError> {
        let catalogs = Locale::ALL
            .into_iter()
            .map(|locale| build_catalog(tpl, locale))
            .collect::<Result<Vec<_>, _>>()?;

        let mut day_field_ids = Vec::new();
        let mut kinds = BTreeMap::new();
        for d in &tpl.days {
            let items = d.checklist.iter().flat_map(|c| c.items.iter());
            for f in d.fields.iter().chain(items) {
                day_field_ids.push(f.id.clone());
                kinds.insert(f.id.clone(), f.kind);
            }
        }

        Ok(Self {
            schema_id: tpl.schema_id.clone(),
            catalogs,
            day_field_ids,
            kinds,
        })
    }

    pub fn schema_id(&self) -> &str {
        &self.schema_id
    }

    pub fn catalog(&self, locale: Locale) -> &LocaleCatalog {
        &self.catalogs[locale.index()]
    }

    pub fn ui(&self, locale: Locale) -> &UiStrings {
        &self.catalog(locale).ui
    }

    pub fn days(&self, locale: Locale) -> &[DaySchema] {
        &self.catalog(locale).days
    }

    pub fn day(&self, locale: Locale, day_id: &str) -> Option<&DaySchema> {
        self.days(locale).iter().find(|d| d.id == day_id)
    }

    pub fn day_ids(&self) -> Vec<&str> {
        self.days(Locale::default())
            .iter()
            .map(|d| d.id.as_str())
            .collect()
    }

    /// Every day field id across all days, in schema order.
    pub fn day_field_ids(&self) -> &[String] {
        &self.day_field_ids
    }

    pub fn field_kind(&self, id: &str) -> Option<FieldKind> {
        self.kinds.get(id).copied()
    }
}

fn build_catalog(tpl: &FormTemplate, locale: Locale) -> Result<LocaleCatalog, TemplateLoadError> {
    let code = locale.code();

    let days = tpl
        .days
        .iter()
        .map(|d| DaySchema {
            id: d.id.clone(),
            number: d.number,
            title: d.title.get(code).cloned().unwrap_or_default(),
            fields: d.fields.iter().map(|f| field_def(f, code)).collect(),
            checklist: d.checklist.as_ref().map(|c| {
                let title = c.title.get(code).cloned().unwrap_or_default();
                ChecklistDef {
                    id: c.id.clone(),
                    label: title.label,
                    help: title.help,
                    items: c.items.iter().map(|f| field_def(f, code)).collect(),
                }
            }),
        })
        .collect();

    let ui = tpl.ui.get(code).cloned().ok_or_else(|| {
        TemplateLoadError::Validation(format!("ui is missing locale '{code}'"))
    })?;

    Ok(LocaleCatalog { locale, ui, days })
}

fn field_def(f: &FieldTemplate, code: &str) -> FieldDef {
    let text = f.text.get(code).cloned().unwrap_or_default();
    FieldDef {
        id: f.id.clone(),
        label: text.label,
        help: text.help,
        placeholder: text.placeholder,
        kind: f.kind,
    }
}
