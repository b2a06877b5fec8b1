use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ident::uid;

/// Maximum stored length for free-text notes, in characters.
pub const NOTES_MAX: usize = 120;

/// A dated sample of weight, height, and head circumference.
///
/// Values are always stored in metric units regardless of the display
/// unit; conversion happens at input and presentation boundaries only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub id: String,
    pub date: NaiveDate,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub head_cm: Option<f64>,
    #[serde(default)]
    pub notes: String,
}

impl Measurement {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: uid("m"),
            date,
            weight_kg: None,
            height_cm: None,
            head_cm: None,
            notes: String::new(),
        }
    }

    pub fn with_weight_kg(mut self, kg: f64) -> Self {
        self.weight_kg = Some(kg);
        self
    }

    pub fn with_height_cm(mut self, cm: f64) -> Self {
        self.height_cm = Some(cm);
        self
    }

    pub fn with_head_cm(mut self, cm: f64) -> Self {
        self.head_cm = Some(cm);
        self
    }

    pub fn with_notes(mut self, notes: impl AsRef<str>) -> Self {
        self.notes = truncate_notes(notes.as_ref());
        self
    }

    /// Returns true when no value was recorded for any metric.
    pub fn is_empty(&self) -> bool {
        self.weight_kg.is_none() && self.height_cm.is_none() && self.head_cm.is_none()
    }
}

/// Trims and caps notes at [`NOTES_MAX`] characters.
pub(crate) fn truncate_notes(raw: &str) -> String {
    raw.trim().chars().take(NOTES_MAX).collect()
}
