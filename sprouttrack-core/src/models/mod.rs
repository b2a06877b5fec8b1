mod child;
mod document;
mod measurement;

pub use child::{Child, Sex, DEFAULT_COLOR, NAME_MAX};
pub use document::{Document, Units, DOCUMENT_VERSION};
pub use measurement::{Measurement, NOTES_MAX};

pub(crate) use measurement::truncate_notes;
