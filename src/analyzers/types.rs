//! Data types produced by the route analysis pipeline.

use serde::{Deserialize, Serialize};

/// Number of positional columns mapped onto a [`Record`].
pub const RECORD_FIELD_COUNT: usize = 18;

/// A single delivery stop read from one data line of a route export.
///
/// Every field is kept as the raw string from the file. `note` is never
/// empty for a record produced by the analyzer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub stop_number: String,
    pub stop_id: String,
    pub date: String,
    pub visit_after: String,
    pub visit_before: String,
    pub name: String,
    pub street: String,
    pub house_number: String,
    pub postal_code: String,
    pub city: String,
    pub note: String,
    pub stored_address: String,
    pub route: String,
    pub email: String,
    pub phone: String,
    pub planned_distance: String,
    pub planned_duration: String,
    pub eta: String,
}

impl Record {
    /// Builds a record from parsed fields by fixed position.
    ///
    /// Positions past the end of `fields` become empty strings. The value at
    /// position 10 is replaced by the already cleaned `note`.
    pub fn from_fields(fields: &[String], note: String) -> Self {
        let at = |i: usize| fields.get(i).cloned().unwrap_or_default();

        Record {
            stop_number: at(0),
            stop_id: at(1),
            date: at(2),
            visit_after: at(3),
            visit_before: at(4),
            name: at(5),
            street: at(6),
            house_number: at(7),
            postal_code: at(8),
            city: at(9),
            note,
            stored_address: at(11),
            route: at(12),
            email: at(13),
            phone: at(14),
            planned_distance: at(15),
            planned_duration: at(16),
            eta: at(17),
        }
    }
}

/// How many records carry a given note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteFrequency {
    pub note: String,
    pub count: usize,
}

impl NoteFrequency {
    pub fn new(note: impl Into<String>, count: usize) -> Self {
        Self {
            note: note.into(),
            count,
        }
    }
}

/// Result of analyzing one route file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteAnalysis {
    pub records: Vec<Record>,
    pub note_frequencies: Vec<NoteFrequency>,
}

impl RouteAnalysis {
    pub fn total_record_count(&self) -> usize {
        self.records.len()
    }

    pub fn unique_note_count(&self) -> usize {
        self.note_frequencies.len()
    }
}

/// Values submitted for splitting a route between the original driver and a helper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentRequest {
    pub original_driver: String,
    pub helper_name: String,
    pub papers_to_take: usize,
}

/// Outcome of a route split.
///
/// The original driver stops after `split_stop_number` records; the helper
/// delivers the remaining `papers_to_take`, broken down per note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentResult {
    pub original_driver: String,
    pub helper_name: String,
    pub papers_to_take: usize,
    pub split_stop_number: usize,
    pub helper_note_frequencies: Vec<NoteFrequency>,
}
