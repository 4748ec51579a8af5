//! Types exchanged with the conflict checker and returned by validation

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Candidate booking window, Unix seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(rename = "starttime")]
    pub start: i64,
    #[serde(rename = "endtime")]
    pub end: i64,
}

impl DateRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }
}

/// Another host already holding the entity during an overlapping window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub name: String,
    pub link: String,
    #[serde(rename = "starttime")]
    pub start: i64,
    #[serde(rename = "endtime")]
    pub end: i64,
}

/// Answer of the conflict checker for one candidate entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConflictReport {
    #[serde(default)]
    pub conflicts: Vec<Conflict>,
    #[serde(rename = "openinghours", default)]
    pub outside_opening_hours: bool,
}

impl ConflictReport {
    pub fn is_clear(&self) -> bool {
        self.conflicts.is_empty() && !self.outside_opening_hours
    }
}

/// Field-keyed soft errors collected during validation.
///
/// Keys are form row indices; values are human-readable messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    pub errors: BTreeMap<usize, String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_for(&self, index: usize) -> Option<&str> {
        self.errors.get(&index).map(String::as_str)
    }

    pub(crate) fn push(&mut self, index: usize, message: &str) {
        self.errors.entry(index).or_default().push_str(message);
    }
}
