// src/ui/nav.rs

use eframe::egui;

/// One tab per meeting day (derived by ui/mod.rs each frame)
pub struct DayTab {
    pub id: String,
    pub title: String,
}

pub struct DayTabs;

impl DayTabs {
    pub fn new() -> Self {
        Self
    }

    /// Pure view: renders tabs and mutates the active day on click
    pub fn ui(&mut self, ctx: &egui::Context, tabs: &[DayTab], active: &mut String) {
        egui::TopBottomPanel::top("day_tabs").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal_wrapped(|ui| {
                for t in tabs {
                    tab_btn(ui, active, &t.id, &t.title);
                }
            });
            ui.add_space(4.0);
        });
    }
}

fn tab_btn(ui: &mut egui::Ui, active: &mut String, target: &str, label: &str) {
    let selected = active.as_str() == target;
    if ui.selectable_label(selected, label).clicked() && !selected {
        *active = target.to_string();
    }
}
