//! SproutTrack Core Library
//!
//! Shared models and logic for tracking child growth measurements:
//! the persisted document, unit and age utilities, sparkline mapping,
//! derived table views, and the JSON import/export codec.

pub mod age;
pub mod codec;
pub mod ident;
pub mod models;
pub mod sparkline;
pub mod storage;
pub mod store;
pub mod units;
pub mod view;

pub use age::age_label;
pub use codec::{export_json, import_json, ImportError};
pub use ident::uid;
pub use models::{
    Child, Document, Measurement, Sex, Units, DEFAULT_COLOR, DOCUMENT_VERSION, NAME_MAX, NOTES_MAX,
};
pub use sparkline::{map_to_sparkline, svg_document, svg_path, Point};
pub use storage::{StateStore, StorageError};
pub use store::Store;
pub use units::{bmi, cm_to_in, in_to_cm, kg_to_lb, lb_to_kg, sanitize_number};
pub use view::{
    apply_range_filter, display_value, enrich, series, unit_labels, MeasurementView, RangeWindow,
    SeriesKind, ValueKind,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
