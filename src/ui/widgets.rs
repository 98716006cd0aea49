// src/ui/widgets.rs

use eframe::egui;
use capstone_meeting_tracker_lib::command::FormBackend;
use capstone_meeting_tracker_lib::template::{ChecklistDef, FieldDef};

pub fn ui_notice(ui: &mut egui::Ui, title: &str, body: &str) {
    // Bright "attention" yellow; readable in dark and light mode.
    let accent = egui::Color32::from_rgb(255, 215, 90);

    let stroke = egui::Stroke::new(1.5, accent);
    let fill = egui::Color32::from_rgba_unmultiplied(accent.r(), accent.g(), accent.b(), 48);

    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(12))
        .stroke(stroke)
        .fill(fill)
        .corner_radius(egui::CornerRadius::same(8))
        .show(ui, |ui| {
            if !title.is_empty() {
                ui.label(egui::RichText::new(title).size(18.0).strong().color(accent));
                ui.add_space(4.0);
            }
            ui.label(body);
        });
}

fn with_help(resp: egui::Response, help: &str) -> egui::Response {
    if help.is_empty() {
        resp
    } else {
        resp.on_hover_text(help)
    }
}

/// Labeled single-line input with hover help. Returns true when edited.
pub fn labeled_line(ui: &mut egui::Ui, label: &str, help: &str, value: &mut String) -> bool {
    with_help(ui.label(label), help);
    let resp = ui.add(egui::TextEdit::singleline(value).desired_width(f32::INFINITY));
    with_help(resp, help).changed()
}

/// `FormBackend` over an egui `Ui`.
pub struct EguiFormBackend<'a> {
    pub ui: &'a mut egui::Ui,
}

impl FormBackend for EguiFormBackend<'_> {
    fn checklist_heading(&mut self, checklist: &ChecklistDef) {
        self.ui.add_space(8.0);
        let resp = self.ui.label(egui::RichText::new(&checklist.label).strong());
        with_help(resp, &checklist.help);
    }

    fn text_input(&mut self, field: &FieldDef, value: &mut String) -> bool {
        with_help(self.ui.label(&field.label), &field.help);
        let resp = self.ui.add(
            egui::TextEdit::singleline(value)
                .hint_text(&field.placeholder)
                .desired_width(f32::INFINITY),
        );
        self.ui.add_space(6.0);
        with_help(resp, &field.help).changed()
    }

    fn multiline_input(&mut self, field: &FieldDef, value: &mut String) -> bool {
        with_help(self.ui.label(&field.label), &field.help);
        let resp = self.ui.add(
            egui::TextEdit::multiline(value)
                .hint_text(&field.placeholder)
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );
        self.ui.add_space(6.0);
        with_help(resp, &field.help).changed()
    }

    fn checkbox(&mut self, field: &FieldDef, value: &mut bool) -> bool {
        let resp = self.ui.checkbox(value, &field.label);
        with_help(resp, &field.help).changed()
    }
}
