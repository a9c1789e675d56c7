//! Timeline Module
//! Per-date sums feeding the chronological charts.

use crate::data::Record;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Synthetic year for month-only labels so they order against each other.
const MONTH_ONLY_YEAR: i32 = 2000;

/// One date label and the summed amount recorded under it.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelinePoint {
    pub label: String,
    pub total: f64,
}

/// Group records by date label, summing amounts. Labels keep first-encounter
/// order unless every label parses as a date, in which case the points are
/// ordered chronologically.
pub fn timeline(records: &[Record]) -> Vec<TimelinePoint> {
    let mut points: Vec<TimelinePoint> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        match index.get(record.date.as_str()) {
            Some(&i) => points[i].total += record.amount,
            None => {
                index.insert(record.date.as_str(), points.len());
                points.push(TimelinePoint {
                    label: record.date.clone(),
                    total: record.amount,
                });
            }
        }
    }

    if points.iter().all(|p| parse_date_label(&p.label).is_some()) {
        points.sort_by_key(|p| parse_date_label(&p.label));
    }

    points
}

/// Dates in the sheet are free-form text. Recognized shapes: dd/mm/yyyy,
/// dd/mm/yy, yyyy-mm-dd, dd-mm-yyyy, mm/yyyy, a bare month number 1-12, and
/// Portuguese month names or their 3-letter abbreviations.
pub fn parse_date_label(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in ["%d/%m/%Y", "%d/%m/%y", "%Y-%m-%d", "%d-%m-%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }

    if let Some((month, year)) = trimmed.split_once('/') {
        if let (Ok(month), Ok(year)) = (month.trim().parse::<u32>(), year.trim().parse::<i32>()) {
            if (1..=12).contains(&month) && year >= 1000 {
                return NaiveDate::from_ymd_opt(year, month, 1);
            }
        }
    }

    if let Ok(month) = trimmed.parse::<u32>() {
        if (1..=12).contains(&month) {
            return NaiveDate::from_ymd_opt(MONTH_ONLY_YEAR, month, 1);
        }
    }

    month_name_pt(trimmed).and_then(|m| NaiveDate::from_ymd_opt(MONTH_ONLY_YEAR, m, 1))
}

fn month_name_pt(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    let key = lower.get(..3)?;
    let month = match key {
        "jan" => 1,
        "fev" => 2,
        "mar" => 3,
        "abr" => 4,
        "mai" => 5,
        "jun" => 6,
        "jul" => 7,
        "ago" => 8,
        "set" => 9,
        "out" => 10,
        "nov" => 11,
        "dez" => 12,
        _ => return None,
    };
    Some(month)
}
