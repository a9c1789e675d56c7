//! Chart Plotter Module
//! Creates the interactive dashboard charts using egui_plot.

use crate::data::{LedgerTable, Side};
use crate::format::format_brl;
use crate::stats::{LedgerSummary, TimelinePoint};
use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};
use std::collections::HashMap;

pub const EXPENSE_COLOR: Color32 = Color32::from_rgb(255, 99, 71); // Tomato
pub const INCOME_COLOR: Color32 = Color32::from_rgb(50, 205, 50); // Lime green

/// Color palette for categories
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(255, 87, 34),  // Deep Orange
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

/// Creates the dashboard visualizations using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn category_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Grouped totals bar chart: one bar per ledger side.
    pub fn draw_totals_bar(ui: &mut egui::Ui, summary: &LedgerSummary, height: f32) {
        let bars = vec![
            Bar::new(0.0, summary.total_expenses)
                .width(0.6)
                .name(Side::Expense.label())
                .fill(EXPENSE_COLOR),
            Bar::new(1.0, summary.total_income)
                .width(0.6)
                .name(Side::Income.label())
                .fill(INCOME_COLOR),
        ];

        let x_labels = vec![
            Side::Expense.label().to_string(),
            Side::Income.label().to_string(),
        ];

        Plot::new("totals_bar")
            .height(height)
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| {
                if mark.value < -0.05 {
                    return String::new();
                }
                let idx = mark.value.round() as usize;
                if (mark.value - mark.value.round()).abs() < 0.05 && idx < x_labels.len() {
                    x_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .y_axis_formatter(|mark, _range| format_brl(mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }

    /// Per-date totals for one side as a line with point markers.
    pub fn draw_timeline(
        ui: &mut egui::Ui,
        id: &str,
        points: &[TimelinePoint],
        color: Color32,
        height: f32,
    ) {
        let x_labels: Vec<String> = points.iter().map(|p| p.label.clone()).collect();
        let series: Vec<[f64; 2]> = points
            .iter()
            .enumerate()
            .map(|(i, p)| [i as f64, p.total])
            .collect();

        Plot::new(format!("timeline_{id}"))
            .height(height)
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| {
                if mark.value < -0.05 {
                    return String::new();
                }
                let idx = mark.value.round() as usize;
                if (mark.value - mark.value.round()).abs() < 0.05 && idx < x_labels.len() {
                    x_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .y_axis_formatter(|mark, _range| format_brl(mark.value))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(series.iter().copied()))
                        .color(color)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(series.iter().copied()))
                        .radius(3.5)
                        .color(color),
                );
            });
    }

    /// Amount vs date, one point per record, colored by category. The x axis
    /// follows the timeline label order.
    pub fn draw_scatter(
        ui: &mut egui::Ui,
        table: &LedgerTable,
        timeline_labels: &[String],
        height: f32,
    ) {
        let label_index: HashMap<&str, usize> = timeline_labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.as_str(), i))
            .collect();

        // Bucket records per category, keeping first-encounter order so the
        // palette assignment is stable between frames.
        let mut categories: Vec<(String, Vec<[f64; 2]>)> = Vec::new();
        let mut category_index: HashMap<String, usize> = HashMap::new();
        for record in &table.records {
            let Some(&x) = label_index.get(record.date.as_str()) else {
                continue;
            };
            let idx = match category_index.get(&record.category) {
                Some(&i) => i,
                None => {
                    category_index.insert(record.category.clone(), categories.len());
                    categories.push((record.category.clone(), Vec::new()));
                    categories.len() - 1
                }
            };
            categories[idx].1.push([x as f64, record.amount]);
        }

        let x_labels: Vec<String> = timeline_labels.to_vec();

        Plot::new(format!("scatter_{}", table.side.label()))
            .height(height)
            .allow_scroll(false)
            .legend(Legend::default())
            .x_axis_formatter(move |mark, _range| {
                if mark.value < -0.05 {
                    return String::new();
                }
                let idx = mark.value.round() as usize;
                if (mark.value - mark.value.round()).abs() < 0.05 && idx < x_labels.len() {
                    x_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .y_axis_formatter(|mark, _range| format_brl(mark.value))
            .show(ui, |plot_ui| {
                for (i, (category, pts)) in categories.iter().enumerate() {
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(pts.iter().copied()))
                            .radius(4.0)
                            .color(Self::category_color(i))
                            .name(category),
                    );
                }
            });
    }
}
