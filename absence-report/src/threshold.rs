//! Threshold grouping
//!
//! Every student with at least [`ABSENCE_THRESHOLD`] absences belongs to
//! exactly one group: the one keyed by the marker of their threshold
//! absence, counted in input order. Later absences never create further
//! memberships.

use crate::types::{Participant, ThresholdGroup, ABSENCE_THRESHOLD};
use std::collections::BTreeMap;

/// Group students by the marker on which they reached the threshold
///
/// `ranked` must already be in severity order; members are appended in the
/// order given, which is what makes the member lists reproducible. Groups
/// come back sorted by marker as plain strings, so `"10-01"` precedes
/// `"9-30"`.
pub fn group_by_threshold(ranked: &[&Participant]) -> Vec<ThresholdGroup> {
    let mut groups: BTreeMap<&str, Vec<String>> = BTreeMap::new();

    for participant in ranked {
        if let Some(marker) = participant.threshold_marker() {
            groups
                .entry(marker)
                .or_default()
                .push(participant.name.clone());
        }
    }

    log::debug!(
        "{} student group(s) at {} or more absences",
        groups.len(),
        ABSENCE_THRESHOLD
    );

    groups
        .into_iter()
        .map(|(marker, members)| ThresholdGroup {
            marker: marker.to_string(),
            members,
        })
        .collect()
}
