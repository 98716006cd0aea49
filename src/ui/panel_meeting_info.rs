// src/ui/panel_meeting_info.rs

use eframe::egui;
use capstone_meeting_tracker_lib::{
    command, command_state::lock_session, context::AppCtx, locale::Locale, session::MetaField,
    types::AppState,
};

use super::message::PanelMsgState;
use super::widgets::labeled_line;

const TEXT_META: [MetaField; 4] = [
    MetaField::GroupNumber,
    MetaField::TimeSlot,
    MetaField::ProjectTitle,
    MetaField::NoteTaker,
];

pub struct MeetingInfoPanel {
    msg: PanelMsgState,
}

impl MeetingInfoPanel {
    pub fn new() -> Self {
        Self {
            msg: PanelMsgState::default(),
        }
    }

    pub fn ui(&mut self, ctx: &egui::Context, state: &AppState, app: &AppCtx) {
        egui::SidePanel::left("meeting_info")
            .resizable(true)
            .min_width(220.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .show(ui, |ui| self.body(ui, state, app));
            });
    }

    fn body(&mut self, ui: &mut egui::Ui, state: &AppState, app: &AppCtx) {
        let locale = command::current_locale(state).unwrap_or_default();
        let strings = state.schema.ui(locale);

        // ---- Language
        ui.add_space(6.0);
        ui.label(&strings.language_select);
        let mut choice = locale;
        egui::ComboBox::from_id_salt("language_select")
            .selected_text(choice.display_name())
            .show_ui(ui, |ui| {
                for l in Locale::ALL {
                    ui.selectable_value(&mut choice, l, l.display_name());
                }
            });
        if choice != locale {
            if let Err(e) = command::set_locale(state, choice) {
                self.msg.from_app_error(&e, strings);
            }
            // labels switch next frame
            ui.ctx().request_repaint();
        }

        ui.separator();
        ui.heading(&strings.sidebar_title);
        ui.add_space(6.0);

        let mut session = match lock_session(state) {
            Ok(g) => g,
            Err(e) => {
                self.msg.from_app_error(&e, strings);
                self.msg.show(ui, app.debug_ui);
                return;
            }
        };

        for f in TEXT_META {
            let label = format!("{} *", f.label(strings));
            let mut v = session.meta_text(f);
            if labeled_line(ui, &label, f.help(strings), &mut v) {
                if let Err(e) = session.set_meta_text(f, v) {
                    self.msg.from_app_error(&e, strings);
                }
            }
            ui.add_space(6.0);

            // date sits between time slot and project title
            if f == MetaField::TimeSlot {
                ui.label(&strings.date).on_hover_text(&strings.date_help);
                ui.add(
                    egui_extras::DatePickerButton::new(&mut session.info_mut().date)
                        .id_salt("meeting_date"),
                );
                ui.add_space(6.0);
            }
        }

        self.msg.show(ui, app.debug_ui);
    }
}
