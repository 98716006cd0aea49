// tests/submission_flow.rs

mod common;

use capstone_meeting_tracker_lib::{
    command::{self, record::META_COLUMNS},
    command_state::lock_session,
    error::AppError,
    locale::Locale,
    session::MetaField,
    sink::{header_fingerprint, SheetsCall, SinkError},
    template::FieldKind,
};

use crate::common::{at, fill_required, setup_memory, setup_with_sink, CountingSink, BASE_SHEET};

#[test]
fn first_submission_creates_sheet_with_header_then_row() {
    let env = setup_memory();
    fill_required(&env.state);
    command::set_field_text(&env.state, "day_1_value_prop", "X").expect("set");

    let out = command::submit_day(&env.state, "day_1", at(10, 31, 0)).expect("submit");

    let header = command::row_header(&env.state.schema);
    let sheet = format!("{BASE_SHEET}_{}", header_fingerprint(&header));
    assert_eq!(out.receipt.sheet, sheet);
    assert!(out.receipt.created_sheet);
    assert!(out.receipt.wrote_header);

    let rows = env.book.rows(&sheet);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], header);
    assert_eq!(rows[1], out.row.values());

    assert_eq!(out.row.get("GroupNumber"), Some("3"));
    assert_eq!(out.row.get("MeetingTimeSlot"), Some("10:30"));
    assert_eq!(out.row.get("MeetingDate"), Some("2024-05-01"));
    assert_eq!(out.row.get("ProjectTitle"), Some("EV Study"));
    assert_eq!(out.row.get("NoteTaker"), Some("Alex"));
    assert_eq!(out.row.get("MeetingDayFocus"), Some("day_1"));
    assert_eq!(out.row.get("day_1_value_prop"), Some("X"));
    assert_eq!(out.row.get("Timestamp"), Some("2024-05-01 10:31:00"));

    let writes: Vec<_> = env
        .book
        .calls()
        .into_iter()
        .filter(|c| matches!(c, SheetsCall::WriteHeader(_) | SheetsCall::AppendRow(_)))
        .collect();
    assert_eq!(
        writes,
        vec![
            SheetsCall::WriteHeader(sheet.clone()),
            SheetsCall::AppendRow(sheet)
        ]
    );

    assert_eq!(
        out.download.file_name,
        "Capstone_Notes_Group3_Day1_2024-05-01.md"
    );
}

#[test]
fn untouched_day_fields_are_blank_text_or_false_checkbox() {
    let env = setup_memory();
    fill_required(&env.state);
    command::set_field_text(&env.state, "day_1_value_prop", "X").expect("set");

    let out = command::submit_day(&env.state, "day_1", at(10, 31, 0)).expect("submit");

    let schema = &env.state.schema;
    let mut unchecked = Vec::new();
    for id in schema.day_field_ids() {
        let cell = out.row.get(id).expect("every day field has a column");
        if id == "day_1_value_prop" {
            assert_eq!(cell, "X");
            continue;
        }
        match schema.field_kind(id).expect("kind") {
            FieldKind::Boolean => {
                assert_eq!(cell, "FALSE", "{id}");
                unchecked.push(id.as_str());
            }
            FieldKind::Text | FieldKind::MultilineText => assert_eq!(cell, "", "{id}"),
        }
    }

    assert_eq!(
        unchecked,
        vec![
            "day_4_feature_status",
            "day_4_readme_theme_summary",
            "day_4_readme_setup_instructions",
            "day_4_readme_final_schema",
            "day_4_readme_sql_queries_explanation",
            "day_4_readme_summary_findings",
        ]
    );

    let sheet_row = env.book.rows(&out.receipt.sheet).pop().expect("appended row");
    assert_eq!(sheet_row, out.row.values());
}

#[test]
fn second_submission_reuses_sheet() {
    let env = setup_memory();
    fill_required(&env.state);

    let a = command::submit_day(&env.state, "day_1", at(10, 0, 0)).expect("first");
    let b = command::submit_day(&env.state, "day_2", at(11, 0, 0)).expect("second");

    assert_eq!(a.receipt.sheet, b.receipt.sheet);
    assert!(!b.receipt.created_sheet);
    assert!(!b.receipt.wrote_header);
    assert_eq!(env.book.rows(&b.receipt.sheet).len(), 3);
    assert_eq!(env.book.titles().len(), 1);
}

#[test]
fn empty_group_number_aborts_before_sink() {
    let sink = CountingSink::default();
    let state = setup_with_sink(sink.clone());
    fill_required(&state);
    command::set_meta(&state, MetaField::GroupNumber, "   ").expect("set");

    match command::submit_day(&state, "day_1", at(10, 0, 0)) {
        Err(AppError::MissingRequired(m)) => assert_eq!(m, vec![MetaField::GroupNumber]),
        other => panic!("expected MissingRequired, got {other:?}"),
    }
    assert_eq!(sink.calls(), 0);
}

#[test]
fn sink_failure_keeps_session_and_offers_no_document() {
    let sink = CountingSink::failing(503);
    let state = setup_with_sink(sink.clone());
    fill_required(&state);
    command::set_field_text(&state, "day_2_blockers_idle", "waiting on data").expect("set");

    let err = command::submit_day(&state, "day_2", at(10, 0, 0)).expect_err("should fail");

    assert!(matches!(
        err,
        AppError::Sink(SinkError::Http { status: 503, .. })
    ));
    assert!(!err.is_validation());
    assert_eq!(sink.calls(), 1);

    let s = lock_session(&state).expect("session");
    assert_eq!(s.text("day_2_blockers_idle"), Some("waiting on data"));
    assert_eq!(s.info().group_number, "3");
}

#[test]
fn assembling_twice_differs_only_in_timestamp() {
    let env = setup_memory();
    fill_required(&env.state);
    command::set_field_flag(&env.state, "day_4_feature_status", true).expect("flag");

    let s = lock_session(&env.state).expect("session");
    let a = command::assemble_row(&env.state.schema, &s, "day_4", at(9, 0, 0)).expect("a");
    let b = command::assemble_row(&env.state.schema, &s, "day_4", at(17, 30, 5)).expect("b");

    assert_eq!(a.header(), b.header());
    let diffs: Vec<&str> = a
        .iter()
        .zip(b.iter())
        .filter(|(x, y)| x.1 != y.1)
        .map(|(x, _)| x.0)
        .collect();
    assert_eq!(diffs, vec!["Timestamp"]);
    assert_eq!(a.get("day_4_feature_status"), Some("TRUE"));
}

#[test]
fn every_schema_field_has_a_column_even_for_other_days() {
    let env = setup_memory();
    fill_required(&env.state);

    let out = command::submit_day(&env.state, "day_3", at(10, 0, 0)).expect("submit");

    assert_eq!(
        out.row.len(),
        META_COLUMNS.len() + env.state.schema.day_field_ids().len()
    );
    assert_eq!(out.row.get("day_1_value_prop"), Some(""));
    assert_eq!(out.row.get("day_4_readme_summary_findings"), Some("FALSE"));
}

#[test]
fn locale_switch_keeps_values_and_changes_language_column() {
    let env = setup_memory();
    fill_required(&env.state);
    command::set_field_text(&env.state, "day_1_team_roles", "PM: Alex").expect("set");

    command::set_locale(&env.state, Locale::Ja).expect("locale");
    let out = command::submit_day(&env.state, "day_1", at(10, 0, 0)).expect("submit");

    assert_eq!(out.row.get("Language"), Some("ja"));
    assert_eq!(out.row.get("day_1_team_roles"), Some("PM: Alex"));
    assert!(out.download.content.starts_with("# キャップストーン会議トラッカー"));
}

#[test]
fn unconfigured_sink_reports_not_configured() {
    let state = setup_with_sink(capstone_meeting_tracker_lib::sink::UnconfiguredSink::new(
        "spreadsheet_id is not set",
    ));
    fill_required(&state);

    let err = command::submit_day(&state, "day_1", at(10, 0, 0)).expect_err("fails");
    let en = state.schema.ui(Locale::En);
    assert_eq!(err.user_msg(en).short, en.error_sink_not_configured);
}

#[test]
fn sink_failure_headline_follows_active_language() {
    let state = setup_with_sink(CountingSink::failing(503));
    fill_required(&state);
    command::set_locale(&state, Locale::Ja).expect("locale");

    let err = command::submit_day(&state, "day_1", at(10, 0, 0)).expect_err("fails");
    let locale = command::current_locale(&state).expect("locale");
    let msg = err.user_msg(state.schema.ui(locale));

    assert_eq!(msg.short, state.schema.ui(Locale::Ja).submission_sink_error);
    assert!(msg.detail.expect("detail").contains("503"));
}
