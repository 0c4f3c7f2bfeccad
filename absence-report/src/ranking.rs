//! Severity ordering of students
//!
//! Students with more absences come first; equal counts fall back to the
//! name. Names are unique within a history, so the order is total.

use crate::history::AbsenceHistory;
use crate::types::Participant;
use std::cmp::Ordering;

/// Compare two students by absence count (descending), then name (ascending)
pub fn compare_severity(a: &Participant, b: &Participant) -> Ordering {
    b.absence_count()
        .cmp(&a.absence_count())
        .then_with(|| a.name.cmp(&b.name))
}

/// All students of a history, most absent first
pub fn rank(history: &AbsenceHistory) -> Vec<&Participant> {
    let mut ranked: Vec<&Participant> = history.participants().iter().collect();
    ranked.sort_by(|a, b| compare_severity(a, b));
    ranked
}
