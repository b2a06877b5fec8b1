//! JSON import/export for the full document.
//!
//! Export is a straight pretty-printed serialization. Import is lenient:
//! it accepts the historical blob shape, rejects anything without a
//! `children` array outright (no partial import), and rebuilds a
//! canonical document with generated ids, normalized dates, and defaulted
//! fields. Non-finite or uncoercible numeric fields are treated as
//! absent, matching [`sanitize_number`] at the input boundary.

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

use crate::ident::uid;
use crate::models::{
    truncate_notes, Child, Document, Measurement, Sex, Units, DEFAULT_COLOR, DOCUMENT_VERSION,
};
use crate::units::sanitize_number;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid backup file: expected an object with a \"children\" array")]
    InvalidShape,
}

/// Serializes the full document to indented JSON.
pub fn export_json(doc: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(doc)
}

/// Parses and canonicalizes a backup payload into a fresh document.
///
/// `today` is the fallback birthdate for children whose birthdate is
/// missing or unparseable. The rebuilt document always satisfies the
/// one-measurement-per-date and selection invariants.
pub fn import_json(raw: &str, today: NaiveDate) -> Result<Document, ImportError> {
    let root: Value = serde_json::from_str(raw)?;
    let entries = root
        .get("children")
        .and_then(Value::as_array)
        .ok_or(ImportError::InvalidShape)?;

    let units = match root.get("units").and_then(Value::as_str) {
        Some("imperial") => Units::Imperial,
        _ => Units::Metric,
    };

    let children: Vec<Child> = entries.iter().map(|e| import_child(e, today)).collect();

    let selected_child_id = root
        .get("selectedChildId")
        .and_then(Value::as_str)
        .filter(|id| children.iter().any(|c| c.id == *id))
        .map(String::from)
        .or_else(|| children.first().map(|c| c.id.clone()));

    Ok(Document {
        version: DOCUMENT_VERSION,
        units,
        children,
        selected_child_id,
    })
}

fn import_child(value: &Value, today: NaiveDate) -> Child {
    let id = value
        .get("id")
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| uid("child"));
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .and_then(Child::normalize_name)
        .unwrap_or_else(|| "Child".to_string());
    let birthdate = value
        .get("birthdate")
        .and_then(Value::as_str)
        .and_then(parse_date)
        .unwrap_or(today);
    let sex = value
        .get("sex")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or(Sex::Unspecified);
    let color = value
        .get("color")
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_COLOR)
        .to_string();

    let mut child = Child {
        id,
        name,
        birthdate,
        sex,
        color,
        measurements: Vec::new(),
    };
    if let Some(items) = value.get("measurements").and_then(Value::as_array) {
        for item in items {
            if let Some(m) = import_measurement(item) {
                // replay through the upsert so duplicate dates merge
                child.upsert_measurement(m);
            }
        }
    }
    child
}

/// Returns `None` for an entry whose date is missing or unparseable;
/// such a record has no valid key and is dropped. Scalar notes are
/// coerced to their text form; anything else becomes empty.
fn import_measurement(value: &Value) -> Option<Measurement> {
    let date = value.get("date").and_then(Value::as_str).and_then(parse_date)?;
    let id = value
        .get("id")
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| uid("m"));
    let notes = match value.get("notes") {
        Some(Value::String(s)) => truncate_notes(s),
        Some(Value::Number(n)) => truncate_notes(&n.to_string()),
        Some(Value::Bool(b)) => truncate_notes(&b.to_string()),
        _ => String::new(),
    };
    Some(Measurement {
        id,
        date,
        weight_kg: import_number(value.get("weightKg")),
        height_cm: import_number(value.get("heightCm")),
        head_cm: import_number(value.get("headCm")),
        notes,
    })
}

/// Coerces a JSON number or numeric string; anything else, including
/// non-finite values, is treated as absent.
fn import_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => sanitize_number(s),
        _ => None,
    }
}

/// Accepts plain ISO dates and full RFC 3339 timestamps.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    chrono::DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 23).unwrap()
    }

    #[test]
    fn test_import_rejects_missing_children() {
        assert!(matches!(
            import_json("{}", today()),
            Err(ImportError::InvalidShape)
        ));
        assert!(matches!(
            import_json(r#"{"children": 5}"#, today()),
            Err(ImportError::InvalidShape)
        ));
        assert!(matches!(
            import_json("[1,2,3]", today()),
            Err(ImportError::InvalidShape)
        ));
        assert!(matches!(
            import_json("not json", today()),
            Err(ImportError::Json(_))
        ));
    }

    #[test]
    fn test_export_import_round_trip() {
        let doc = Document::demo(today());
        let json = export_json(&doc).unwrap();
        let restored = import_json(&json, today()).unwrap();

        assert_eq!(restored.units, doc.units);
        assert_eq!(restored.selected_child_id, doc.selected_child_id);
        assert_eq!(restored.children, doc.children);
    }

    #[test]
    fn test_import_defaults_missing_fields() {
        let raw = r#"{"children": [{"measurements": [{"date": "2025-03-01"}]}]}"#;
        let doc = import_json(raw, today()).unwrap();

        assert_eq!(doc.version, DOCUMENT_VERSION);
        assert_eq!(doc.units, Units::Metric);
        let child = &doc.children[0];
        assert!(child.id.starts_with("child_"));
        assert_eq!(child.name, "Child");
        assert_eq!(child.birthdate, today());
        assert_eq!(child.sex, Sex::Unspecified);
        assert_eq!(child.color, DEFAULT_COLOR);
        assert_eq!(child.measurements.len(), 1);
        assert!(child.measurements[0].is_empty());
        // first child becomes the selection
        assert_eq!(doc.selected_child_id, Some(child.id.clone()));
    }

    #[test]
    fn test_import_units_default_unless_exactly_imperial() {
        let imperial = r#"{"units": "imperial", "children": []}"#;
        assert_eq!(
            import_json(imperial, today()).unwrap().units,
            Units::Imperial
        );
        let odd = r#"{"units": "IMPERIAL", "children": []}"#;
        assert_eq!(import_json(odd, today()).unwrap().units, Units::Metric);
    }

    #[test]
    fn test_import_coerces_numeric_strings() {
        let raw = r#"{"children": [{"name": "A", "birthdate": "2024-08-23",
            "measurements": [{"date": "2025-03-01", "weightKg": "9.1", "heightCm": 73.3,
                              "headCm": "junk", "notes": 7}]}]}"#;
        let doc = import_json(raw, today()).unwrap();
        let m = &doc.children[0].measurements[0];
        assert_eq!(m.weight_kg, Some(9.1));
        assert_eq!(m.height_cm, Some(73.3));
        assert_eq!(m.head_cm, None);
        assert_eq!(m.notes, "7");
    }

    #[test]
    fn test_import_coerces_scalar_notes_to_text() {
        let raw = r#"{"children": [{"name": "A", "birthdate": "2024-08-23",
            "measurements": [{"date": "2025-03-01", "weightKg": 9.1, "notes": 7},
                             {"date": "2025-03-02", "weightKg": 9.2, "notes": true},
                             {"date": "2025-03-03", "weightKg": 9.3, "notes": null},
                             {"date": "2025-03-04", "weightKg": 9.4, "notes": ["x"]}]}]}"#;
        let doc = import_json(raw, today()).unwrap();
        let notes: Vec<_> = doc.children[0]
            .measurements
            .iter()
            .map(|m| m.notes.as_str())
            .collect();
        assert_eq!(notes, vec!["7", "true", "", ""]);
    }

    #[test]
    fn test_import_merges_duplicate_dates() {
        let raw = r#"{"children": [{"name": "A", "birthdate": "2024-08-23",
            "measurements": [{"date": "2025-03-01", "weightKg": 9.1},
                             {"date": "2025-03-01", "heightCm": 73.3}]}]}"#;
        let doc = import_json(raw, today()).unwrap();
        let child = &doc.children[0];
        assert_eq!(child.measurements.len(), 1);
        assert_eq!(child.measurements[0].weight_kg, Some(9.1));
        assert_eq!(child.measurements[0].height_cm, Some(73.3));
    }

    #[test]
    fn test_import_drops_undateable_measurement() {
        let raw = r#"{"children": [{"name": "A", "birthdate": "2024-08-23",
            "measurements": [{"weightKg": 9.1}, {"date": "nope", "weightKg": 9.2},
                             {"date": "2025-03-01", "weightKg": 9.3}]}]}"#;
        let doc = import_json(raw, today()).unwrap();
        assert_eq!(doc.children[0].measurements.len(), 1);
    }

    #[test]
    fn test_import_validates_selection() {
        let raw = r#"{"children": [{"id": "child_a", "name": "A", "birthdate": "2024-08-23"}],
                      "selectedChildId": "child_missing"}"#;
        let doc = import_json(raw, today()).unwrap();
        assert_eq!(doc.selected_child_id, Some("child_a".to_string()));

        let kept = r#"{"children": [{"id": "child_a", "name": "A", "birthdate": "2024-08-23"},
                                    {"id": "child_b", "name": "B", "birthdate": "2023-01-01"}],
                       "selectedChildId": "child_b"}"#;
        let doc = import_json(kept, today()).unwrap();
        assert_eq!(doc.selected_child_id, Some("child_b".to_string()));
    }

    #[test]
    fn test_import_accepts_timestamp_dates() {
        let raw = r#"{"children": [{"name": "A", "birthdate": "2024-08-23T10:30:00Z"}]}"#;
        let doc = import_json(raw, today()).unwrap();
        assert_eq!(
            doc.children[0].birthdate,
            NaiveDate::from_ymd_opt(2024, 8, 23).unwrap()
        );
    }

    #[test]
    fn test_import_empty_children_has_no_selection() {
        let doc = import_json(r#"{"children": []}"#, today()).unwrap();
        assert!(doc.children.is_empty());
        assert!(doc.selected_child_id.is_none());
    }

    #[test]
    fn test_export_is_indented() {
        let json = export_json(&Document::default()).unwrap();
        assert!(json.contains("\n  \"version\": 1"));
    }
}
