// src/ui/panel_day.rs

use chrono::Local;
use eframe::egui;
use capstone_meeting_tracker_lib::{
    command::{self, DownloadDoc},
    command_state::lock_session,
    context::AppCtx,
    error::AppError,
    session::MetaField,
    template::UiStrings,
    types::AppState,
};

use super::message::PanelMsgState;
use super::widgets::{self, EguiFormBackend};

pub struct DayPanel {
    msg: PanelMsgState,
    download: Option<DownloadDoc>,
}

impl DayPanel {
    pub fn new() -> Self {
        Self {
            msg: PanelMsgState::default(),
            download: None,
        }
    }

    /// Called when the active day changes.
    pub fn reset(&mut self) {
        self.msg.clear();
        self.download = None;
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, state: &AppState, app: &AppCtx, day_id: &str) {
        let locale = command::current_locale(state).unwrap_or_default();
        let strings = state.schema.ui(locale);

        let Some(day) = state.schema.day(locale, day_id) else {
            self.msg
                .from_app_error(&AppError::UnknownDay(day_id.to_string()), strings);
            self.msg.show(ui, app.debug_ui);
            return;
        };

        ui.heading(&day.title);
        ui.add_space(6.0);
        widgets::ui_notice(ui, "", &strings.hint_visibility);
        ui.add_space(10.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                self.fields(ui, state, day_id, strings);

                ui.add_space(10.0);
                self.actions(ui, state, app, day_id, strings);

                ui.add_space(16.0);
                ui.separator();
                ui.label(egui::RichText::new(&strings.important_label).strong());
                ui.label(&strings.footer_reminder);
            });
    }

    fn fields(&mut self, ui: &mut egui::Ui, state: &AppState, day_id: &str, strings: &UiStrings) {
        let mut session = match lock_session(state) {
            Ok(g) => g,
            Err(e) => {
                self.msg.from_app_error(&e, strings);
                return;
            }
        };

        let mut backend = EguiFormBackend { ui: &mut *ui };
        if let Err(e) = command::render_day(&state.schema, &mut session, day_id, &mut backend) {
            self.msg.from_app_error(&e, strings);
        }

        ui.add_space(10.0);
        ui.separator();

        let f = MetaField::ResearchQuestion;
        ui.label(f.label(strings)).on_hover_text(f.help(strings));
        let mut rq = session.meta_text(f);
        if ui
            .add(
                egui::TextEdit::multiline(&mut rq)
                    .desired_rows(3)
                    .desired_width(f32::INFINITY),
            )
            .changed()
        {
            if let Err(e) = session.set_meta_text(f, rq) {
                self.msg.from_app_error(&e, strings);
            }
        }
    }

    fn actions(
        &mut self,
        ui: &mut egui::Ui,
        state: &AppState,
        app: &AppCtx,
        day_id: &str,
        strings: &UiStrings,
    ) {
        if let Ok(name) = command::preview_file_name(state, day_id) {
            ui.small(format!("{} {name}", strings.file_will_be_named));
        }
        ui.add_space(6.0);

        if ui.button(&strings.submit_and_download).clicked() {
            self.download = None;
            self.submit(state, day_id, strings);
        }

        ui.add_space(6.0);
        self.msg.show(ui, app.debug_ui);

        if let Some(doc) = self.download.as_ref() {
            ui.add_space(6.0);
            if ui.button(&strings.download_copy).clicked() {
                if let Some(err) = save_copy(doc) {
                    self.msg.from_app_error(&err, strings);
                }
            }
        }
    }

    fn submit(&mut self, state: &AppState, day_id: &str, strings: &UiStrings) {
        match command::submit_day(state, day_id, Local::now().naive_local()) {
            Ok(out) => {
                self.msg.set_success(&strings.submission_success);
                self.download = Some(out.download);
            }
            Err(e) => self.msg.from_app_error(&e, strings),
        }
    }
}

/// Native save dialog. Returns an error only if writing failed; a cancelled
/// dialog is not an error.
fn save_copy(doc: &DownloadDoc) -> Option<AppError> {
    let path = rfd::FileDialog::new()
        .set_file_name(&doc.file_name)
        .add_filter("Markdown", &["md"])
        .save_file()?;

    match std::fs::write(&path, &doc.content) {
        Ok(()) => {
            log::info!("download: saved {}", path.display());
            None
        }
        Err(e) => Some(AppError::Io(e)),
    }
}
