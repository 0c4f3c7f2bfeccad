//! Report generation for one CLI run
//!
//! Opens the input and output named by the resolved [`Settings`], builds the
//! report and writes it. Every handle is scoped to this module's functions,
//! so files are closed on all exit paths.

use crate::config::Settings;
use absence_report::{AbsenceReport, AbsenceReporter, ReportStats};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Build the report from the configured input
pub fn build_report(settings: &Settings) -> Result<AbsenceReport> {
    let reporter = AbsenceReporter::new(settings.report.clone());

    if settings.reads_stdin() {
        log::info!("Reading absence log from stdin");
        reporter
            .build_from_reader(io::stdin().lock())
            .context("Failed to read absence log from stdin")
    } else {
        reporter
            .build_from_file(&settings.input)
            .with_context(|| format!("Failed to read absence log: {:?}", settings.input))
    }
}

/// Write the report to the configured output
pub fn write_report(settings: &Settings, report: &AbsenceReport) -> Result<()> {
    if settings.writes_stdout() {
        return report
            .write(settings.format, io::stdout().lock())
            .context("Failed to write report to stdout");
    }

    log::info!("Writing {} report to {:?}", settings.format, settings.output);
    let file = File::create(&settings.output)
        .with_context(|| format!("Failed to create output file: {:?}", settings.output))?;
    let mut writer = BufWriter::new(file);

    report
        .write(settings.format, &mut writer)
        .with_context(|| format!("Failed to write report: {:?}", settings.output))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write report: {:?}", settings.output))?;

    Ok(())
}

/// Build and write in one go
pub fn run(settings: &Settings) -> Result<ReportStats> {
    let report = build_report(settings)?;
    write_report(settings, &report)?;
    Ok(report.stats())
}
