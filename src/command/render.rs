// src/command/render.rs

use crate::error::{AppError, AppResult};
use crate::session::SessionStore;
use crate::template::{ChecklistDef, FieldDef, FieldKind, FormSchema};

/// Widget toolkit seam. Each input method shows one control seeded with
/// `value` and returns true if the user changed it this frame.
pub trait FormBackend {
    fn checklist_heading(&mut self, checklist: &ChecklistDef);

    fn text_input(&mut self, field: &FieldDef, value: &mut String) -> bool;

    fn multiline_input(&mut self, field: &FieldDef, value: &mut String) -> bool;

    fn checkbox(&mut self, field: &FieldDef, value: &mut bool) -> bool;
}

/// Renders every field of `day_id` in the session's locale and writes edits
/// straight back into `session`. Returns the ids rendered, in order.
pub fn render_day(
    schema: &FormSchema,
    session: &mut SessionStore,
    day_id: &str,
    backend: &mut dyn FormBackend,
) -> AppResult<Vec<String>> {
    let day = schema
        .day(session.locale(), day_id)
        .ok_or_else(|| AppError::UnknownDay(day_id.to_string()))?;

    let mut rendered = Vec::with_capacity(day.fields.len());

    for f in &day.fields {
        render_field(f, session, backend)?;
        rendered.push(f.id.clone());
    }

    if let Some(c) = &day.checklist {
        backend.checklist_heading(c);
        for f in &c.items {
            render_field(f, session, backend)?;
            rendered.push(f.id.clone());
        }
    }

    Ok(rendered)
}

fn render_field(
    f: &FieldDef,
    session: &mut SessionStore,
    backend: &mut dyn FormBackend,
) -> AppResult<()> {
    match f.kind {
        FieldKind::Text | FieldKind::MultilineText => {
            let mut v = session.text(&f.id).unwrap_or_default().to_string();
            let changed = if f.kind == FieldKind::Text {
                backend.text_input(f, &mut v)
            } else {
                backend.multiline_input(f, &mut v)
            };
            if changed {
                session.set_text(&f.id, v)?;
            }
        }
        FieldKind::Boolean => {
            let mut v = session.flag(&f.id).unwrap_or(false);
            if backend.checkbox(f, &mut v) {
                session.set_flag(&f.id, v)?;
            }
        }
    }
    Ok(())
}
