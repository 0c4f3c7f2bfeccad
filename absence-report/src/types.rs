//! Core types for the absence report library
//!
//! This module defines the records the library builds while reading an
//! absence log. Every record lives only for a single report run; nothing is
//! persisted between runs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Number of absences at which a student is listed in the threshold section.
pub const ABSENCE_THRESHOLD: usize = 3;

/// Width of the dashed separator lines in the text report.
pub const SEPARATOR_WIDTH: usize = 54;

/// Errors that can occur while building or writing a report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed line {line}: {content:?}")]
    MalformedLine { line: usize, content: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One parsed line of the absence log
///
/// The marker is usually a date, but any string works: it is only ever
/// compared and printed, never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsenceEvent {
    /// 1-based line number in the input
    pub line_number: usize,
    /// Period marker (first field of the line)
    pub marker: String,
    /// Names of the students absent on this marker, in input order
    pub names: Vec<String>,
}

impl AbsenceEvent {
    /// True if the line carried a marker but no names
    pub fn is_marker_only(&self) -> bool {
        self.names.is_empty()
    }
}

/// A student and every marker on which they were recorded absent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Student name, matched exactly and case-sensitively
    pub name: String,
    /// Absence markers in the order they appeared in the input
    pub absences: Vec<String>,
}

impl Participant {
    /// Create a participant with no absences yet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            absences: Vec::new(),
        }
    }

    /// Append an absence marker. The sequence is never reordered.
    pub fn add_absence(&mut self, marker: impl Into<String>) {
        self.absences.push(marker.into());
    }

    pub fn absence_count(&self) -> usize {
        self.absences.len()
    }

    /// Marker of the absence that brought the student to the threshold
    pub fn threshold_marker(&self) -> Option<&str> {
        self.absences.get(ABSENCE_THRESHOLD - 1).map(String::as_str)
    }

    pub fn reached_threshold(&self) -> bool {
        self.absence_count() >= ABSENCE_THRESHOLD
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {}",
            self.name,
            self.absence_count(),
            self.absences.join(", ")
        )
    }
}

/// Students whose threshold absence fell on the same marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdGroup {
    /// Marker of the threshold absence shared by every member
    pub marker: String,
    /// Member names, in severity order
    pub members: Vec<String>,
}

impl ThresholdGroup {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            members: Vec::new(),
        }
    }

    /// Heading line printed above the group's members
    pub fn heading(&self) -> String {
        format!(
            "Students who reached {} or more absences as of {}:",
            ABSENCE_THRESHOLD, self.marker
        )
    }
}
