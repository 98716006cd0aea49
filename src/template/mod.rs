// src/template/mod.rs

pub mod catalog;
pub mod form_schema;

pub use catalog::{ChecklistDef, DaySchema, FieldDef, FormSchema, LocaleCatalog};
pub use form_schema::{FieldKind, TemplateLoadError, UiStrings};
