//! Main report API
//!
//! [`AbsenceReporter`] is the entry point of the library: it reads an absence
//! log from lines, a reader or a file, builds the per-student histories and
//! derives the report from them. The whole input is read before the report
//! is built.

use crate::config::ReportConfig;
use crate::history::AbsenceHistory;
use crate::lines::LogLines;
use crate::parser::EventParser;
use crate::report::AbsenceReport;
use crate::types::Result;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Builds absence reports from absence logs
#[derive(Debug, Clone, Default)]
pub struct AbsenceReporter {
    config: ReportConfig,
}

impl AbsenceReporter {
    /// Create a new reporter
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Read every line into an [`AbsenceHistory`]
    ///
    /// Stops at the first read error, or the first malformed line in strict
    /// mode.
    pub fn read_history<I>(&self, lines: I) -> Result<AbsenceHistory>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        let mut history = AbsenceHistory::new();
        let mut parser = EventParser::new(lines, self.config.clone());

        for event in parser.by_ref() {
            history.record(&event?);
        }

        let stats = history.stats();
        log::debug!(
            "Read {} line(s): {} event(s), {} student(s), {} absence(s)",
            parser.lines_read(),
            stats.events,
            stats.students,
            stats.total_absences
        );

        Ok(history)
    }

    /// Build a report from in-memory lines
    ///
    /// # Example
    /// ```
    /// use absence_report::AbsenceReporter;
    ///
    /// let reporter = AbsenceReporter::default();
    /// let report = reporter
    ///     .build_from_lines(["2024-01-05,Alice,Bob", "2024-01-06,Alice"])
    ///     .unwrap();
    ///
    /// assert_eq!(report.render_lines()[0], "Alice (2): 2024-01-05, 2024-01-06");
    /// ```
    pub fn build_from_lines<I, S>(&self, lines: I) -> Result<AbsenceReport>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = lines.into_iter().map(|line| Ok(line.into()));
        let history = self.read_history(lines)?;
        Ok(self.build(&history))
    }

    /// Build a report from any buffered reader
    ///
    /// Lines may end in `\n`, `\r\n` or a lone `\r`. Bytes that are not
    /// valid UTF-8 are replaced rather than rejected; see [`LogLines`].
    pub fn build_from_reader<R: BufRead>(&self, reader: R) -> Result<AbsenceReport> {
        let history = self.read_history(LogLines::new(reader))?;
        Ok(self.build(&history))
    }

    /// Build a report from a file on disk
    ///
    /// The file is closed before this returns, on success and on error.
    pub fn build_from_file(&self, path: &Path) -> Result<AbsenceReport> {
        log::info!("Reading absence log: {:?}", path);

        let file = File::open(path)?;
        self.build_from_reader(BufReader::new(file))
    }

    /// Derive the report from a finished history
    pub fn build(&self, history: &AbsenceHistory) -> AbsenceReport {
        let report = AbsenceReport::from_history(history);
        let stats = report.stats();
        log::info!(
            "Report built: {} student(s), {} at threshold, {} group(s)",
            stats.students,
            stats.students_at_threshold,
            stats.groups
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReportError;

    #[test]
    fn test_reporter_creation() {
        let reporter = AbsenceReporter::default();
        assert!(!reporter.config().is_strict());
    }

    #[test]
    fn test_build_from_reader() {
        let input = "d1,Ann\nd2,Ann\r\nd3,Ann\n";
        let report = AbsenceReporter::default()
            .build_from_reader(input.as_bytes())
            .unwrap();

        assert_eq!(report.students[0].absences, vec!["d1", "d2", "d3"]);
        assert_eq!(report.threshold_groups.len(), 1);
    }

    #[test]
    fn test_build_from_reader_with_carriage_return_endings() {
        let report = AbsenceReporter::default()
            .build_from_reader(&b"d1,Ann\rd2,Ann\rd3,Ann\r"[..])
            .unwrap();

        assert_eq!(report.render_lines()[0], "Ann (3): d1, d2, d3");
        assert_eq!(report.threshold_groups.len(), 1);
        assert_eq!(report.threshold_groups[0].marker, "d3");
        assert_eq!(report.threshold_groups[0].members, vec!["Ann"]);
    }

    #[test]
    fn test_build_from_reader_with_invalid_utf8() {
        let report = AbsenceReporter::default()
            .build_from_reader(&b"d1,Ann\nd2,Jos\xe9\nd3,Ann\n"[..])
            .unwrap();

        let lines = report.render_lines();
        assert_eq!(lines[0], "Ann (2): d1, d3");
        assert_eq!(lines[1], "Jos\u{FFFD} (1): d2");
    }

    #[test]
    fn test_strict_reporter_fails_on_blank_line() {
        let reporter = AbsenceReporter::new(ReportConfig::new().strict());
        let result = reporter.build_from_lines(["d1,Ann", "", "d2,Ann"]);
        assert!(matches!(result, Err(ReportError::MalformedLine { line: 2, .. })));
    }

    #[test]
    fn test_missing_file() {
        let reporter = AbsenceReporter::default();
        let result = reporter.build_from_file(Path::new("does/not/exist.csv"));
        assert!(matches!(result, Err(ReportError::Io(_))));
    }
}
