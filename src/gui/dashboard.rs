//! Dashboard Widget
//! Central scrollable panel: financial summary, top categories and the
//! bar / line / scatter charts.

use crate::charts::{ChartPlotter, EXPENSE_COLOR, INCOME_COLOR};
use crate::format::format_brl;
use crate::pipeline::DashboardData;
use crate::stats::CategoryTotal;
use egui::{Color32, RichText, ScrollArea};

const SECTION_SPACING: f32 = 15.0;
const CHART_HEIGHT: f32 = 280.0;

/// Scrollable dashboard area fed by one analysis run.
pub struct Dashboard {
    data: Option<DashboardData>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self { data: None }
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.data = None;
    }

    pub fn set_data(&mut self, data: DashboardData) {
        self.data = Some(data);
    }

    pub fn data(&self) -> Option<&DashboardData> {
        self.data.as_ref()
    }

    /// Draw the dashboard sections in presentation order.
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(data) = &self.data else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No data loaded — fetch the spreadsheet to begin").size(18.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                Self::summary_section(ui, data);
                ui.add_space(SECTION_SPACING);
                Self::top_categories_section(ui, data);
                ui.add_space(SECTION_SPACING);
                Self::totals_section(ui, data);
                ui.add_space(SECTION_SPACING);
                Self::timeline_section(ui, data);
                ui.add_space(SECTION_SPACING);
                Self::scatter_section(ui, data);
                ui.add_space(SECTION_SPACING);
            });
    }

    fn summary_section(ui: &mut egui::Ui, data: &DashboardData) {
        let summary = &data.summary;
        Self::card(ui, "📊 Financial Summary", |ui| {
            ui.label(
                RichText::new(format!(
                    "🔴 Total expenses: {}",
                    format_brl(summary.total_expenses)
                ))
                .size(15.0)
                .color(EXPENSE_COLOR),
            );
            ui.label(
                RichText::new(format!(
                    "🟢 Total income: {}",
                    format_brl(summary.total_income)
                ))
                .size(15.0)
                .color(INCOME_COLOR),
            );
            let balance_color = if summary.balance >= 0.0 {
                INCOME_COLOR
            } else {
                EXPENSE_COLOR
            };
            ui.label(
                RichText::new(format!("💰 Net balance: {}", format_brl(summary.balance)))
                    .size(15.0)
                    .strong()
                    .color(balance_color),
            );

            if data.clean_report.unparseable > 0 {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!(
                        "⚠ {} amount cell(s) could not be parsed and were counted as zero",
                        data.clean_report.unparseable
                    ))
                    .size(11.0)
                    .color(Color32::GRAY),
                );
            }
        });
    }

    fn top_categories_section(ui: &mut egui::Ui, data: &DashboardData) {
        ui.columns(2, |columns| {
            Self::card(&mut columns[0], "🔎 Top Expense Categories", |ui| {
                Self::category_list(ui, &data.summary.top_expenses);
            });
            Self::card(&mut columns[1], "📈 Top Income Sources", |ui| {
                Self::category_list(ui, &data.summary.top_income);
            });
        });
    }

    fn category_list(ui: &mut egui::Ui, categories: &[CategoryTotal]) {
        if categories.is_empty() {
            ui.label(RichText::new("—").color(Color32::GRAY));
            return;
        }
        for entry in categories {
            ui.label(format!("• {}: {}", entry.category, format_brl(entry.total)));
        }
    }

    fn totals_section(ui: &mut egui::Ui, data: &DashboardData) {
        Self::card(ui, "📊 Expenses vs Income", |ui| {
            ChartPlotter::draw_totals_bar(ui, &data.summary, CHART_HEIGHT);
        });
    }

    fn timeline_section(ui: &mut egui::Ui, data: &DashboardData) {
        ui.columns(2, |columns| {
            Self::card(&mut columns[0], "📉 Expenses over Time", |ui| {
                if data.expense_timeline.is_empty() {
                    ui.label(RichText::new("No dated records").color(Color32::GRAY));
                } else {
                    ChartPlotter::draw_timeline(
                        ui,
                        "expenses",
                        &data.expense_timeline,
                        EXPENSE_COLOR,
                        CHART_HEIGHT,
                    );
                }
            });
            Self::card(&mut columns[1], "📈 Income over Time", |ui| {
                if data.income_timeline.is_empty() {
                    ui.label(RichText::new("No dated records").color(Color32::GRAY));
                } else {
                    ChartPlotter::draw_timeline(
                        ui,
                        "income",
                        &data.income_timeline,
                        INCOME_COLOR,
                        CHART_HEIGHT,
                    );
                }
            });
        });
    }

    fn scatter_section(ui: &mut egui::Ui, data: &DashboardData) {
        let expense_labels: Vec<String> = data
            .expense_timeline
            .iter()
            .map(|p| p.label.clone())
            .collect();
        let income_labels: Vec<String> = data
            .income_timeline
            .iter()
            .map(|p| p.label.clone())
            .collect();

        ui.columns(2, |columns| {
            Self::card(&mut columns[0], "🔴 Expenses by Category and Date", |ui| {
                ChartPlotter::draw_scatter(ui, &data.expenses, &expense_labels, CHART_HEIGHT);
            });
            Self::card(&mut columns[1], "🟢 Income by Category and Date", |ui| {
                ChartPlotter::draw_scatter(ui, &data.income, &income_labels, CHART_HEIGHT);
            });
        });
    }

    fn card(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(
                1.0,
                ui.visuals().widgets.noninteractive.bg_stroke.color,
            ))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new(title).size(16.0).strong());
                ui.add_space(8.0);
                add_contents(ui);
            });
    }
}
