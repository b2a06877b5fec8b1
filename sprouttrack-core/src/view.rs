//! Derived views: enriched, sorted, filtered measurement rows and
//! display-unit formatting. Everything here is plain data for a
//! rendering surface to consume.

use chrono::{Months, NaiveDate};
use serde::Serialize;
use std::str::FromStr;

use crate::age::age_label;
use crate::models::{Child, Units};
use crate::units::{bmi, cm_to_in, kg_to_lb};

/// A measurement row augmented with computed age and BMI labels.
/// Values stay metric; [`display_value`] converts for presentation.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementView {
    pub id: String,
    pub date: NaiveDate,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub head_cm: Option<f64>,
    pub notes: String,
    pub age: String,
    pub bmi: String,
}

/// Returns the child's measurements sorted ascending by date (stable,
/// ties keep original order), each with age and BMI computed.
pub fn enrich(child: &Child) -> Vec<MeasurementView> {
    let mut sorted: Vec<_> = child.measurements.iter().collect();
    sorted.sort_by_key(|m| m.date);
    sorted
        .into_iter()
        .map(|m| MeasurementView {
            id: m.id.clone(),
            date: m.date,
            weight_kg: m.weight_kg,
            height_cm: m.height_cm,
            head_cm: m.head_cm,
            notes: m.notes.clone(),
            age: age_label(child.birthdate, m.date),
            bmi: bmi(m.weight_kg, m.height_cm).unwrap_or_default(),
        })
        .collect()
}

/// Time window for the measurement table and charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeWindow {
    SixMonths,
    TwelveMonths,
    All,
}

impl FromStr for RangeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "6m" => Ok(RangeWindow::SixMonths),
            "12m" => Ok(RangeWindow::TwelveMonths),
            "all" => Ok(RangeWindow::All),
            _ => Err(format!(
                "Invalid range '{}'. Valid options: 6m, 12m, all",
                s
            )),
        }
    }
}

/// Keeps rows dated within `[today - N months, today]` inclusive;
/// `All` returns the input unchanged.
pub fn apply_range_filter(
    rows: Vec<MeasurementView>,
    window: RangeWindow,
    today: NaiveDate,
) -> Vec<MeasurementView> {
    let months = match window {
        RangeWindow::All => return rows,
        RangeWindow::SixMonths => 6,
        RangeWindow::TwelveMonths => 12,
    };
    let start = today
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN);
    rows.into_iter()
        .filter(|m| m.date >= start && m.date <= today)
        .collect()
}

/// Which conversion a stored metric value needs for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Weight,
    Length,
}

/// Formats a stored metric value for the given display units to two
/// decimal places; an absent value formats as the empty string.
pub fn display_value(kind: ValueKind, value: Option<f64>, units: Units) -> String {
    let v = match value {
        Some(v) => v,
        None => return String::new(),
    };
    let shown = match (kind, units) {
        (ValueKind::Weight, Units::Imperial) => kg_to_lb(v),
        (ValueKind::Length, Units::Imperial) => cm_to_in(v),
        _ => v,
    };
    format!("{:.2}", shown)
}

/// Unit labels as (weight, length).
pub fn unit_labels(units: Units) -> (&'static str, &'static str) {
    match units {
        Units::Metric => ("kg", "cm"),
        Units::Imperial => ("lb", "in"),
    }
}

/// Which metric a chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Weight,
    Height,
    Head,
}

/// Extracts the present samples for one metric, in row order.
pub fn series(rows: &[MeasurementView], kind: SeriesKind) -> Vec<f64> {
    rows.iter()
        .filter_map(|m| match kind {
            SeriesKind::Weight => m.weight_kg,
            SeriesKind::Height => m.height_cm,
            SeriesKind::Head => m.head_cm,
        })
        .collect()
}
