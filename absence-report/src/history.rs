//! Per-student absence histories
//!
//! Collects every absence event into one [`Participant`] per distinct name.
//! Participants are kept in first-seen order with a name index on the side,
//! so nothing visible ever depends on hash map iteration order.

use crate::types::{AbsenceEvent, Participant};
use std::collections::HashMap;

/// Summary counts about a history
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryStats {
    /// Distinct student names
    pub students: usize,
    /// Sum of all recorded absences
    pub total_absences: usize,
    /// Lines processed (marker-only lines included)
    pub events: usize,
}

/// All students seen in one input, with their absence markers
#[derive(Debug, Clone, Default)]
pub struct AbsenceHistory {
    /// Participants in first-seen order
    participants: Vec<Participant>,

    /// Name lookup
    /// Key: student name, Value: index into `participants`
    index: HashMap<String, usize>,

    /// Number of events recorded
    events: usize,
}

impl AbsenceHistory {
    /// Create a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a history from already parsed events
    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = AbsenceEvent>,
    {
        let mut history = Self::new();
        for event in events {
            history.record(&event);
        }
        history
    }

    /// Record one line of the log
    ///
    /// Names are processed left to right. A name repeated on the same line
    /// gets the marker appended once per occurrence.
    pub fn record(&mut self, event: &AbsenceEvent) {
        self.events += 1;

        for name in &event.names {
            let idx = match self.index.get(name) {
                Some(&idx) => idx,
                None => {
                    log::trace!("New student {:?} on line {}", name, event.line_number);
                    self.participants.push(Participant::new(name.clone()));
                    self.index.insert(name.clone(), self.participants.len() - 1);
                    self.participants.len() - 1
                }
            };

            self.participants[idx].add_absence(event.marker.clone());
        }
    }

    /// Look up a student by exact name
    pub fn get(&self, name: &str) -> Option<&Participant> {
        self.index.get(name).map(|&idx| &self.participants[idx])
    }

    /// Participants in first-seen order
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn total_absences(&self) -> usize {
        self.participants.iter().map(Participant::absence_count).sum()
    }

    pub fn stats(&self) -> HistoryStats {
        HistoryStats {
            students: self.len(),
            total_absences: self.total_absences(),
            events: self.events,
        }
    }
}
