use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::measurement::Measurement;
use crate::ident::uid;

/// Maximum stored length for a child's name, in characters.
pub const NAME_MAX: usize = 40;

/// Avatar color assigned when none is chosen.
pub const DEFAULT_COLOR: &str = "#fb923c";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Unspecified,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "male"),
            Sex::Female => write!(f, "female"),
            Sex::Unspecified => write!(f, "unspecified"),
        }
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            "unspecified" => Ok(Sex::Unspecified),
            _ => Err(format!(
                "Invalid sex '{}'. Valid options: male, female, unspecified",
                s
            )),
        }
    }
}

/// A tracked individual with identity, birthdate, and a measurement history.
///
/// Owned exclusively by the [`Document`](super::Document); deleting a child
/// removes its measurements with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub id: String,
    pub name: String,
    pub birthdate: NaiveDate,
    pub sex: Sex,
    pub color: String,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
}

impl Child {
    pub fn new(name: impl AsRef<str>, birthdate: NaiveDate) -> Self {
        Self {
            id: uid("child"),
            name: Self::normalize_name(name.as_ref()).unwrap_or_else(|| "Unnamed".to_string()),
            birthdate,
            sex: Sex::Unspecified,
            color: DEFAULT_COLOR.to_string(),
            measurements: Vec::new(),
        }
    }

    pub fn with_sex(mut self, sex: Sex) -> Self {
        self.sex = sex;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Trims and caps a name at [`NAME_MAX`] characters; blank input
    /// yields `None` so callers can pick their default.
    pub fn normalize_name(raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(trimmed.chars().take(NAME_MAX).collect())
    }

    pub fn find_measurement(&self, id: &str) -> Option<&Measurement> {
        self.measurements.iter().find(|m| m.id == id)
    }

    /// Inserts a measurement, or merges into the existing entry when one
    /// already carries the same date. On merge, absent incoming values and
    /// empty incoming notes keep what was already recorded. At most one
    /// measurement per date survives every call.
    pub fn upsert_measurement(&mut self, incoming: Measurement) {
        match self.measurements.iter_mut().find(|m| m.date == incoming.date) {
            Some(existing) => {
                if incoming.weight_kg.is_some() {
                    existing.weight_kg = incoming.weight_kg;
                }
                if incoming.height_cm.is_some() {
                    existing.height_cm = incoming.height_cm;
                }
                if incoming.head_cm.is_some() {
                    existing.head_cm = incoming.head_cm;
                }
                if !incoming.notes.is_empty() {
                    existing.notes = incoming.notes;
                }
            }
            None => self.measurements.push(incoming),
        }
    }

    /// Removes the measurement with the given id. Returns false when no
    /// such entry exists.
    pub fn delete_measurement(&mut self, id: &str) -> bool {
        let before = self.measurements.len();
        self.measurements.retain(|m| m.id != id);
        self.measurements.len() != before
    }

    pub fn clear_measurements(&mut self) {
        self.measurements.clear();
    }
}

impl fmt::Display for Child {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.len()))?;
        writeln!(f, "Born: {}", self.birthdate)?;
        writeln!(f, "Sex: {}", self.sex)?;
        writeln!(f, "Color: {}", self.color)?;
        writeln!(f, "Measurements: {}", self.measurements.len())?;
        Ok(())
    }
}
