//! Absence Report Library
//!
//! Turns a per-date absence log into a report of how often, and when, each
//! student was absent.
//!
//! # Input
//!
//! One line per period (usually a date), followed by the students absent in
//! that period:
//!
//! ```text
//! 2024-01-05,Alice,Bob
//! 2024-01-06,Alice
//! ```
//!
//! Lines may end in `\n`, `\r\n` or a lone `\r`. Input that is not valid
//! UTF-8 is still read: offending bytes become U+FFFD and a warning is
//! logged with the line number.
//!
//! # Output
//!
//! The text report lists every student with their absence count and dates,
//! most absent first (ties broken by name). Below it, for every date on
//! which some student reached their third absence, the students who reached
//! it that day:
//!
//! ```text
//! Alice (3): 2024-01-05, 2024-01-06, 2024-01-07
//! Bob (3): 2024-01-05, 2024-01-07, 2024-01-08
//!
//! ------------------------------------------------------
//! Students who reached 3 or more absences as of 2024-01-07:
//! Alice
//! Bob
//! ------------------------------------------------------
//! ```
//!
//! The library does not touch fixed file names, environment variables or
//! logging setup; those belong to the application layer
//! (absence-report-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use absence_report::{AbsenceReporter, ReportConfig, ReportFormat};
//! use std::path::Path;
//!
//! let reporter = AbsenceReporter::new(ReportConfig::new().strict());
//! let report = reporter.build_from_file(Path::new("absences.csv")).unwrap();
//!
//! report.write(ReportFormat::Txt, std::io::stdout().lock()).unwrap();
//! ```

// Public modules
pub mod config;
pub mod history;
pub mod lines;
pub mod parser;
pub mod ranking;
pub mod report;
pub mod reporter;
pub mod threshold;
pub mod types;

// Re-export main types for convenience
pub use config::{LinePolicy, ReportConfig};
pub use history::{AbsenceHistory, HistoryStats};
pub use lines::LogLines;
pub use report::{AbsenceReport, ReportFormat, ReportStats, StudentSummary};
pub use reporter::AbsenceReporter;
pub use types::{
    AbsenceEvent, Participant, ReportError, Result, ThresholdGroup, ABSENCE_THRESHOLD,
    SEPARATOR_WIDTH,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
