//! Control Panel Widget
//! Left side panel with the data source, analysis options and progress.

use crate::config::Settings;
use crate::data::DropPolicy;
use egui::{Color32, RichText};

/// Left side control panel with source selection and analysis options.
pub struct ControlPanel {
    pub settings: Settings,
    pub progress: f32,
    pub status: String,
    pub export_enabled: bool,
}

impl ControlPanel {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            progress: 0.0,
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Balanço")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Expenses vs Income")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new("Spreadsheet export URL:").size(12.0));
                ui.add(
                    egui::TextEdit::singleline(&mut self.settings.source_url)
                        .desired_width(f32::INFINITY),
                );

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button("⬇ Fetch").clicked() {
                        action = ControlPanelAction::FetchRemote;
                    }
                    if ui.button("📂 Browse local CSV").clicked() {
                        action = ControlPanelAction::BrowseCsv;
                    }
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Analysis Options Section =====
        ui.label(RichText::new("⚙ Analysis Options").size(14.0).strong());
        ui.add_space(5.0);

        ui.label(RichText::new("Rows missing a date or category:").size(12.0));
        let mut changed = false;
        ui.horizontal(|ui| {
            changed |= ui
                .radio_value(
                    &mut self.settings.drop_policy,
                    DropPolicy::DropIncomplete,
                    "Drop",
                )
                .changed();
            changed |= ui
                .radio_value(&mut self.settings.drop_policy, DropPolicy::KeepAll, "Keep")
                .changed();
        });

        ui.add_space(8.0);
        changed |= ui
            .add(egui::Slider::new(&mut self.settings.top_n, 1..=10).text("Top categories"))
            .changed();
        if changed {
            action = ControlPanelAction::OptionsChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                    .min_size(egui::vec2(170.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Progress Section =====
        ui.label(RichText::new("📊 Progress").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Complete") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    FetchRemote,
    BrowseCsv,
    OptionsChanged,
    ExportPng,
}
