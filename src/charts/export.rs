//! Static Chart Export Module
//! Renders the summary charts (totals bar + side timelines) to a PNG file.

use crate::format::format_brl;
use crate::pipeline::DashboardData;
use crate::stats::TimelinePoint;
use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

const IMAGE_WIDTH: u32 = 1200;
const IMAGE_HEIGHT: u32 = 900;

const EXPENSE_RGB: RGBColor = RGBColor(255, 99, 71);
const INCOME_RGB: RGBColor = RGBColor(50, 205, 50);

/// Render the totals bar chart and both timelines into `path` as PNG.
pub fn export_summary_png(data: &DashboardData, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (IMAGE_WIDTH, IMAGE_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).context("failed to clear image")?;

    let (top, bottom) = root.split_vertically((IMAGE_HEIGHT / 2) as i32);
    draw_totals(&top, data).context("failed to draw totals chart")?;

    let halves = bottom.split_evenly((1, 2));
    draw_timeline(
        &halves[0],
        "Expenses over Time",
        EXPENSE_RGB,
        &data.expense_timeline,
    )
    .context("failed to draw expense timeline")?;
    draw_timeline(
        &halves[1],
        "Income over Time",
        INCOME_RGB,
        &data.income_timeline,
    )
    .context("failed to draw income timeline")?;

    root.present()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn draw_totals(area: &DrawingArea<BitMapBackend, Shift>, data: &DashboardData) -> Result<()> {
    let summary = &data.summary;
    let y_max = summary.total_expenses.max(summary.total_income).max(1.0) * 1.15;

    let mut chart = ChartBuilder::on(area)
        .caption("Expenses vs Income", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(120)
        .build_cartesian_2d(0.0f64..2.0, 0.0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(3)
        .x_label_formatter(&|x| {
            if (*x - 0.5).abs() < 0.25 {
                "Expenses".to_string()
            } else if (*x - 1.5).abs() < 0.25 {
                "Income".to_string()
            } else {
                String::new()
            }
        })
        .y_label_formatter(&|v| format_brl(*v))
        .draw()?;

    chart.draw_series([
        Rectangle::new(
            [(0.2, 0.0), (0.8, summary.total_expenses)],
            EXPENSE_RGB.mix(0.85).filled(),
        ),
        Rectangle::new(
            [(1.2, 0.0), (1.8, summary.total_income)],
            INCOME_RGB.mix(0.85).filled(),
        ),
    ])?;

    chart.draw_series([
        Text::new(
            format_brl(summary.total_expenses),
            (0.35, summary.total_expenses + y_max * 0.02),
            ("sans-serif", 18),
        ),
        Text::new(
            format_brl(summary.total_income),
            (1.35, summary.total_income + y_max * 0.02),
            ("sans-serif", 18),
        ),
    ])?;

    Ok(())
}

fn draw_timeline(
    area: &DrawingArea<BitMapBackend, Shift>,
    title: &str,
    color: RGBColor,
    points: &[TimelinePoint],
) -> Result<()> {
    if points.is_empty() {
        return Ok(());
    }

    let y_max = points.iter().map(|p| p.total).fold(0.0, f64::max).max(1.0) * 1.15;
    let n = points.len();
    let x_max = n.saturating_sub(1).max(1) as f64;

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(55)
        .y_label_area_size(110)
        .build_cartesian_2d(-0.5f64..x_max + 0.5, 0.0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n.min(12))
        .x_label_formatter(&|x| {
            let idx = x.round();
            if (x - idx).abs() < 0.05 && idx >= 0.0 && (idx as usize) < n {
                points[idx as usize].label.clone()
            } else {
                String::new()
            }
        })
        .y_label_formatter(&|v| format_brl(*v))
        .draw()?;

    chart.draw_series(LineSeries::new(
        points.iter().enumerate().map(|(i, p)| (i as f64, p.total)),
        color.stroke_width(2),
    ))?;

    chart.draw_series(
        points
            .iter()
            .enumerate()
            .map(|(i, p)| Circle::new((i as f64, p.total), 4, color.filled())),
    )?;

    Ok(())
}
