// src/command/document.rs

use crate::error::{AppError, AppResult};
use crate::session::{FieldValue, MetaField, SessionStore};
use crate::template::FormSchema;

/// Metadata listed in the document header, in display order.
const DOC_META: [MetaField; 5] = [
    MetaField::GroupNumber,
    MetaField::TimeSlot,
    MetaField::Date,
    MetaField::ProjectTitle,
    MetaField::NoteTaker,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadDoc {
    pub file_name: String,
    pub content: String,
}

/// Markdown summary of one day in the session's locale.
pub fn render_document(
    schema: &FormSchema,
    session: &SessionStore,
    day_id: &str,
) -> AppResult<String> {
    let locale = session.locale();
    let ui = schema.ui(locale);
    let day = schema
        .day(locale, day_id)
        .ok_or_else(|| AppError::UnknownDay(day_id.to_string()))?;

    let mut lines: Vec<String> = vec![format!("# {}", ui.app_title), String::new()];

    lines.push(format!("## {}", ui.sidebar_title));
    for f in DOC_META {
        lines.push(format!("- **{}**: {}", f.label(ui), session.meta_text(f)));
    }
    lines.push(String::new());

    lines.push(format!("## {}", day.title));
    for f in day.all_fields() {
        let value = match session.value(&f.id) {
            Some(FieldValue::Bool(true)) => ui.yes.clone(),
            Some(FieldValue::Bool(false)) => ui.no.clone(),
            Some(FieldValue::Text(s)) => s.clone(),
            None => String::new(),
        };
        lines.push(format!("### {}", f.label));
        lines.push(value);
        lines.push(String::new());
    }

    lines.push(format!("## {}", ui.research_question));
    lines.push(session.meta_text(MetaField::ResearchQuestion));

    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}

/// `Capstone_Notes_Group<group>_Day<n>_<date>.md`
pub fn document_file_name(group: &str, day_number: u8, date: &str) -> String {
    format!(
        "Capstone_Notes_Group{}_Day{day_number}_{}.md",
        sanitize_file_component(group),
        sanitize_file_component(date)
    )
}

/// Replaces path separators, reserved and control characters with `_`.
pub fn sanitize_file_component(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() || c.is_whitespace() => '_',
            c => c,
        })
        .collect()
}

pub fn build_download(
    schema: &FormSchema,
    session: &SessionStore,
    day_id: &str,
) -> AppResult<DownloadDoc> {
    let day = schema
        .day(session.locale(), day_id)
        .ok_or_else(|| AppError::UnknownDay(day_id.to_string()))?;

    Ok(DownloadDoc {
        file_name: document_file_name(
            &session.info().group_number,
            day.number,
            &session.meta_text(MetaField::Date),
        ),
        content: render_document(schema, session, day_id)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use chrono::NaiveDate;

    fn setup(locale: Locale) -> (FormSchema, SessionStore) {
        let schema = FormSchema::builtin().unwrap();
        let session = SessionStore::new(
            &schema,
            locale,
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        );
        (schema, session)
    }

    #[test]
    fn layout_starts_with_title_and_meeting_info() {
        let (schema, mut s) = setup(Locale::En);
        s.set_meta_text(MetaField::GroupNumber, "3").unwrap();
        s.set_text("day_1_value_prop", "X").unwrap();

        let doc = render_document(&schema, &s, "day_1").unwrap();
        let lines: Vec<&str> = doc.lines().collect();

        assert_eq!(lines[0], "# Capstone Meeting Tracker");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "## Meeting Information");
        assert_eq!(lines[3], "- **Group Number**: 3");
        assert_eq!(lines[5], "- **Date**: 2024-05-01");
        assert!(lines[9].starts_with("## "));
        assert_eq!(lines[10], "### Value Proposition");
        assert_eq!(lines[11], "X");
        assert!(doc.ends_with("## Current Research Question(s)\n\n"));
    }

    #[test]
    fn checklist_items_render_without_heading() {
        let (schema, mut s) = setup(Locale::En);
        s.set_flag("day_4_readme_final_schema", true).unwrap();

        let doc = render_document(&schema, &s, "day_4").unwrap();
        let checklist = schema.day(Locale::En, "day_4").unwrap().checklist.clone().unwrap();

        assert!(!doc.contains(&format!("### {}\n", checklist.label)));
        for item in &checklist.items {
            assert!(doc.contains(&format!("### {}\n", item.label)));
        }
        assert_eq!(doc.matches("\nYes\n").count(), 1);
    }

    #[test]
    fn japanese_booleans() {
        let (schema, mut s) = setup(Locale::Ja);
        s.set_flag("day_4_feature_status", true).unwrap();

        let doc = render_document(&schema, &s, "day_4").unwrap();
        assert_eq!(doc.matches("\nはい\n").count(), 1);
        assert!(doc.contains("\nいいえ\n"));
        assert!(doc.starts_with("# キャップストーン会議トラッカー\n"));
    }

    #[test]
    fn file_name_replaces_unsafe_characters() {
        assert_eq!(
            document_file_name("3", 1, "2024-05-01"),
            "Capstone_Notes_Group3_Day1_2024-05-01.md"
        );
        assert_eq!(
            document_file_name("../a b\\c", 2, "2024-05-01"),
            "Capstone_Notes_Group.._a_b_c_Day2_2024-05-01.md"
        );
    }

    #[test]
    fn download_uses_day_number() {
        let (schema, mut s) = setup(Locale::En);
        s.set_meta_text(MetaField::GroupNumber, "7").unwrap();

        let d = build_download(&schema, &s, "day_3").unwrap();
        assert_eq!(d.file_name, "Capstone_Notes_Group7_Day3_2024-05-01.md");
        assert!(d.content.contains("## Current Research Question(s)"));
    }
}
