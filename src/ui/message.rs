// src/ui/message.rs

use capstone_meeting_tracker_lib::{
    error::{AppError, UserMsgKind},
    template::UiStrings,
};

use super::egui;
use super::egui::{Color32, Ui};

#[derive(Clone, Debug, Default)]
pub struct PanelMsgState {
    kind: Option<UserMsgKind>,
    short: Option<String>,
    detail: Option<String>,
}

impl PanelMsgState {
    pub fn clear(&mut self) {
        self.kind = None;
        self.short = None;
        self.detail = None;
    }

    fn set(&mut self, kind: UserMsgKind, short: impl Into<String>, detail: Option<String>) {
        self.kind = Some(kind);
        self.short = Some(short.into());
        self.detail = detail;
    }

    pub fn set_success(&mut self, short: impl Into<String>) {
        self.set(UserMsgKind::Success, short, None);
    }

    pub fn from_app_error(&mut self, err: &AppError, ui: &UiStrings) {
        let m = err.user_msg(ui);
        self.set(m.kind, m.short, m.detail);
    }

    pub fn show(&self, ui: &mut Ui, debug_ui: bool) {
        let (Some(kind), Some(short)) = (self.kind, self.short.as_deref()) else {
            return;
        };

        let (stroke, fill) = match kind {
            UserMsgKind::Success => (
                Color32::from_rgb(0, 220, 90), // neon green stroke
                Color32::from_rgb(0, 80, 40),  // dark green fill
            ),
            UserMsgKind::Warn => (
                Color32::from_rgb(255, 170, 0),
                Color32::from_rgb(90, 60, 0),
            ),
            UserMsgKind::Error => (
                Color32::from_rgb(255, 60, 60),
                Color32::from_rgb(90, 0, 0),
            ),
        };

        egui::Frame::NONE
            .fill(fill)
            .stroke(egui::Stroke::new(1.0, stroke))
            .corner_radius(egui::CornerRadius::same(8u8))
            .inner_margin(egui::Margin::same(8))
            .show(ui, |ui| {
                ui.colored_label(stroke, short);
                if debug_ui {
                    if let Some(d) = self.detail.as_deref() {
                        ui.small(d);
                    }
                }
            });
    }
}
