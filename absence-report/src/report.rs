//! Report assembly and rendering
//!
//! An [`AbsenceReport`] is derived from a finished [`AbsenceHistory`] and can
//! be written as the plain-text report, as JSON, or as a CSV summary table.

use crate::history::AbsenceHistory;
use crate::ranking::rank;
use crate::threshold::group_by_threshold;
use crate::types::{Participant, Result, ThresholdGroup, ABSENCE_THRESHOLD, SEPARATOR_WIDTH};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

/// Output encodings supported by [`AbsenceReport::write`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// The line-oriented text report
    #[default]
    Txt,
    /// Pretty-printed JSON document
    Json,
    /// One row per student
    Csv,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Txt => write!(f, "txt"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Csv => write!(f, "csv"),
        }
    }
}

/// One student's line in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentSummary {
    pub name: String,
    pub absence_count: usize,
    /// Markers in input order
    pub absences: Vec<String>,
    /// Marker of the threshold absence, if reached
    pub threshold_marker: Option<String>,
}

impl From<&Participant> for StudentSummary {
    fn from(participant: &Participant) -> Self {
        Self {
            name: participant.name.clone(),
            absence_count: participant.absence_count(),
            absences: participant.absences.clone(),
            threshold_marker: participant.threshold_marker().map(str::to_string),
        }
    }
}

impl fmt::Display for StudentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {}",
            self.name,
            self.absence_count,
            self.absences.join(", ")
        )
    }
}

/// Counts logged after a report is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportStats {
    pub students: usize,
    pub total_absences: usize,
    pub students_at_threshold: usize,
    pub groups: usize,
}

/// Complete absence report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbsenceReport {
    /// Students in severity order
    pub students: Vec<StudentSummary>,
    /// Threshold groups in marker order
    pub threshold_groups: Vec<ThresholdGroup>,
}

/// CSV row layout
#[derive(Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    absences: usize,
    threshold_marker: &'a str,
    markers: String,
}

impl AbsenceReport {
    /// Derive both report sections from a history
    ///
    /// Groups are built by walking the ranked student list, so members of a
    /// group appear in the same order as in the first section.
    pub fn from_history(history: &AbsenceHistory) -> Self {
        let ranked = rank(history);
        let threshold_groups = group_by_threshold(&ranked);
        let students = ranked.into_iter().map(StudentSummary::from).collect();

        Self {
            students,
            threshold_groups,
        }
    }

    pub fn stats(&self) -> ReportStats {
        ReportStats {
            students: self.students.len(),
            total_absences: self.students.iter().map(|s| s.absence_count).sum(),
            students_at_threshold: self
                .students
                .iter()
                .filter(|s| s.absence_count >= ABSENCE_THRESHOLD)
                .count(),
            groups: self.threshold_groups.len(),
        }
    }

    /// Render the text report, one entry per output line
    ///
    /// Layout: one line per student, a blank line, then for each group a
    /// separator, the group heading and one line per member, and finally a
    /// closing separator (always present, even without groups).
    pub fn render_lines(&self) -> Vec<String> {
        let separator = "-".repeat(SEPARATOR_WIDTH);
        let mut lines: Vec<String> = self.students.iter().map(|s| s.to_string()).collect();

        lines.push(String::new());
        for group in &self.threshold_groups {
            lines.push(separator.clone());
            lines.push(group.heading());
            lines.extend(group.members.iter().cloned());
        }
        lines.push(separator);

        lines
    }

    /// Write in the requested format
    pub fn write<W: Write>(&self, format: ReportFormat, writer: W) -> Result<()> {
        match format {
            ReportFormat::Txt => self.write_text(writer),
            ReportFormat::Json => self.write_json(writer),
            ReportFormat::Csv => self.write_csv(writer),
        }
    }

    pub fn write_text<W: Write>(&self, mut writer: W) -> Result<()> {
        for line in self.render_lines() {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the CSV summary: `name,absences,threshold_marker,markers`
    ///
    /// Markers are joined with `"; "` in the last column. Students below the
    /// threshold get an empty `threshold_marker`.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for student in &self.students {
            csv_writer.serialize(CsvRow {
                name: &student.name,
                absences: student.absence_count,
                threshold_marker: student.threshold_marker.as_deref().unwrap_or(""),
                markers: student.absences.join("; "),
            })?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
