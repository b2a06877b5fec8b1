use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::child::Child;
use super::measurement::Measurement;

/// Version written into every persisted or exported document.
pub const DOCUMENT_VERSION: u32 = 1;

/// Display units. Stored values stay metric either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Metric,
    Imperial,
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Units::Metric => write!(f, "metric"),
            Units::Imperial => write!(f, "imperial"),
        }
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(format!(
                "Invalid units '{}'. Valid options: metric, imperial",
                s
            )),
        }
    }
}

/// The full persisted application state: units, children, selection.
///
/// Invariant: `selected_child_id` is either `None` or the id of some
/// child in `children`. Every mutation below re-establishes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub version: u32,
    pub units: Units,
    pub children: Vec<Child>,
    pub selected_child_id: Option<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            units: Units::Metric,
            children: Vec::new(),
            selected_child_id: None,
        }
    }
}

impl Document {
    /// The document seeded on first run: one sample child with five
    /// chronological measurements spanning roughly the past year.
    pub fn demo(today: NaiveDate) -> Self {
        let birthdate = today
            .checked_sub_months(Months::new(12))
            .unwrap_or(today);
        let mut child = Child::new("Avery", birthdate);
        let sample = |offset_days: u64, weight: f64, height: f64, head: f64, notes: &str| {
            let date = today
                .checked_sub_days(Days::new(offset_days))
                .unwrap_or(today);
            Measurement::new(date)
                .with_weight_kg(weight)
                .with_height_cm(height)
                .with_head_cm(head)
                .with_notes(notes)
        };
        child.measurements = vec![
            sample(300, 6.2, 60.0, 40.0, "First visit"),
            sample(220, 7.4, 66.2, 42.0, ""),
            sample(150, 8.3, 70.1, 43.2, "Sleeping better"),
            sample(90, 9.1, 73.3, 44.3, ""),
            sample(30, 9.8, 76.8, 45.0, "Lots of crawling"),
        ];
        let selected = Some(child.id.clone());
        Self {
            children: vec![child],
            selected_child_id: selected,
            ..Self::default()
        }
    }

    pub fn selected_child(&self) -> Option<&Child> {
        let id = self.selected_child_id.as_deref()?;
        self.children.iter().find(|c| c.id == id)
    }

    pub fn selected_child_mut(&mut self) -> Option<&mut Child> {
        let id = self.selected_child_id.clone()?;
        self.children.iter_mut().find(|c| c.id == id)
    }

    /// Looks up a child by id, falling back to a case-insensitive name
    /// match.
    pub fn find_child(&self, identifier: &str) -> Option<&Child> {
        self.children
            .iter()
            .find(|c| c.id == identifier)
            .or_else(|| {
                self.children
                    .iter()
                    .find(|c| c.name.eq_ignore_ascii_case(identifier))
            })
    }

    pub fn find_child_mut(&mut self, identifier: &str) -> Option<&mut Child> {
        if self.children.iter().any(|c| c.id == identifier) {
            return self.children.iter_mut().find(|c| c.id == identifier);
        }
        self.children
            .iter_mut()
            .find(|c| c.name.eq_ignore_ascii_case(identifier))
    }

    /// Adds a child, or replaces an existing one with the same id while
    /// preserving its measurement history. A newly added child becomes
    /// the selection.
    pub fn upsert_child(&mut self, mut child: Child) {
        match self.children.iter_mut().find(|c| c.id == child.id) {
            Some(existing) => {
                child.measurements = std::mem::take(&mut existing.measurements);
                *existing = child;
            }
            None => {
                self.selected_child_id = Some(child.id.clone());
                self.children.push(child);
            }
        }
    }

    /// Removes a child and all of its measurements. If it was selected,
    /// selection falls back to the first remaining child, or to none.
    pub fn delete_child(&mut self, id: &str) -> bool {
        let before = self.children.len();
        self.children.retain(|c| c.id != id);
        if self.children.len() == before {
            return false;
        }
        if self.selected_child_id.as_deref() == Some(id) {
            self.selected_child_id = self.children.first().map(|c| c.id.clone());
        }
        true
    }

    /// Selects the child with the given id. Returns false (leaving the
    /// selection unchanged) when no such child exists.
    pub fn select_child(&mut self, id: &str) -> bool {
        if self.children.iter().any(|c| c.id == id) {
            self.selected_child_id = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn set_units(&mut self, units: Units) {
        self.units = units;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn doc_with_two_children() -> Document {
        let mut doc = Document::default();
        doc.upsert_child(Child::new("Avery", d(2024, 8, 23)));
        doc.upsert_child(Child::new("Blair", d(2023, 2, 10)));
        doc
    }

    #[test]
    fn test_default_document() {
        let doc = Document::default();
        assert_eq!(doc.version, DOCUMENT_VERSION);
        assert_eq!(doc.units, Units::Metric);
        assert!(doc.children.is_empty());
        assert!(doc.selected_child_id.is_none());
    }

    #[test]
    fn test_demo_document() {
        let doc = Document::demo(d(2025, 8, 23));
        assert_eq!(doc.children.len(), 1);
        let child = &doc.children[0];
        assert_eq!(child.name, "Avery");
        assert_eq!(child.birthdate, d(2024, 8, 23));
        assert_eq!(child.measurements.len(), 5);
        assert_eq!(doc.selected_child_id, Some(child.id.clone()));
        // chronological, most recent 30 days back
        assert_eq!(child.measurements[4].date, d(2025, 7, 24));
        assert_eq!(child.measurements[4].weight_kg, Some(9.8));
    }

    #[test]
    fn test_new_child_becomes_selected() {
        let doc = doc_with_two_children();
        let blair = doc.find_child("Blair").unwrap();
        assert_eq!(doc.selected_child_id, Some(blair.id.clone()));
        assert_eq!(doc.selected_child().unwrap().name, "Blair");
    }

    #[test]
    fn test_upsert_child_preserves_measurements() {
        let mut doc = Document::default();
        doc.upsert_child(Child::new("Avery", d(2024, 8, 23)));
        doc.find_child_mut("Avery")
            .unwrap()
            .upsert_measurement(Measurement::new(d(2025, 3, 1)).with_weight_kg(9.1));

        let mut edited = doc.find_child("Avery").unwrap().clone();
        edited.name = "Avery R.".to_string();
        edited.measurements = Vec::new();
        doc.upsert_child(edited);

        let child = doc.find_child("Avery R.").unwrap();
        assert_eq!(child.measurements.len(), 1);
        assert_eq!(doc.children.len(), 1);
    }

    #[test]
    fn test_delete_selected_child_falls_back_to_first() {
        let mut doc = doc_with_two_children();
        let blair_id = doc.find_child("Blair").unwrap().id.clone();
        let avery_id = doc.find_child("Avery").unwrap().id.clone();

        assert!(doc.delete_child(&blair_id));
        assert_eq!(doc.children.len(), 1);
        assert_eq!(doc.selected_child_id, Some(avery_id.clone()));

        assert!(doc.delete_child(&avery_id));
        assert!(doc.children.is_empty());
        assert!(doc.selected_child_id.is_none());
    }

    #[test]
    fn test_delete_unselected_child_keeps_selection() {
        let mut doc = doc_with_two_children();
        let avery_id = doc.find_child("Avery").unwrap().id.clone();
        let blair_id = doc.find_child("Blair").unwrap().id.clone();

        assert!(doc.delete_child(&avery_id));
        assert_eq!(doc.selected_child_id, Some(blair_id));
    }

    #[test]
    fn test_delete_unknown_child() {
        let mut doc = doc_with_two_children();
        assert!(!doc.delete_child("child_missing"));
        assert_eq!(doc.children.len(), 2);
    }

    #[test]
    fn test_select_child() {
        let mut doc = doc_with_two_children();
        let avery_id = doc.find_child("Avery").unwrap().id.clone();
        assert!(doc.select_child(&avery_id));
        assert_eq!(doc.selected_child().unwrap().name, "Avery");
        assert!(!doc.select_child("child_missing"));
        assert_eq!(doc.selected_child().unwrap().name, "Avery");
    }

    #[test]
    fn test_find_child_by_name_is_case_insensitive() {
        let doc = doc_with_two_children();
        assert!(doc.find_child("avery").is_some());
        assert!(doc.find_child("BLAIR").is_some());
        assert!(doc.find_child("casey").is_none());
    }

    #[test]
    fn test_document_json_field_names() {
        let doc = Document::demo(d(2025, 8, 23));
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"selectedChildId\""));
        assert!(json.contains("\"units\":\"metric\""));
        assert!(json.contains("\"version\":1"));
    }
}
