// src/ui/mod.rs

pub mod fonts;
pub mod message;
pub mod nav;
pub mod panel_day;
pub mod panel_meeting_info;
pub mod widgets;

use eframe::egui;
use std::sync::Arc;

use capstone_meeting_tracker_lib::command;
use capstone_meeting_tracker_lib::context::AppCtx;
use capstone_meeting_tracker_lib::types::AppState;

use nav::{DayTab, DayTabs};
use panel_day::DayPanel;
use panel_meeting_info::MeetingInfoPanel;

pub struct UiApp {
    state: Arc<AppState>,
    ctx: Arc<AppCtx>,

    active_day: String,
    prev_day: String,

    tabs: DayTabs,
    meeting: MeetingInfoPanel,
    day: DayPanel,
}

impl UiApp {
    pub fn new(cc: &eframe::CreationContext<'_>, state: Arc<AppState>, ctx: Arc<AppCtx>) -> Self {
        fonts::install_cjk_fallback(&cc.egui_ctx);

        let first = state
            .schema
            .day_ids()
            .first()
            .map(|s| s.to_string())
            .unwrap_or_default();

        Self {
            state,
            ctx,
            active_day: first.clone(),
            prev_day: first,
            tabs: DayTabs::new(),
            meeting: MeetingInfoPanel::new(),
            day: DayPanel::new(),
        }
    }

    /// Tab titles in the active locale
    fn derive_tabs(&self) -> Vec<DayTab> {
        let locale = command::current_locale(&self.state).unwrap_or_default();
        self.state
            .schema
            .days(locale)
            .iter()
            .map(|d| DayTab {
                id: d.id.clone(),
                title: d.title.clone(),
            })
            .collect()
    }
}

impl eframe::App for UiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let tabs = self.derive_tabs();

        // Side panel first so the central panel gets the remaining width.
        self.meeting.ui(ctx, &self.state, &self.ctx);
        self.tabs.ui(ctx, &tabs, &mut self.active_day);

        if self.active_day != self.prev_day {
            self.day.reset();
            self.prev_day = self.active_day.clone();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.day.ui(ui, &self.state, &self.ctx, &self.active_day);
        });
    }
}
