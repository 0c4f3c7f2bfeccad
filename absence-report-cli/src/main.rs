//! Absence Report CLI Application
//!
//! This is the command-line interface for the absence report library.
//! It uses the absence-report library and adds:
//! - Input/output file handling (stdin/stdout via `-`)
//! - TOML configuration files
//! - Logging setup

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

mod config;
mod report;

use absence_report::ReportFormat;
use config::Overrides;

/// Absence Report - Summarize per-date absence logs
#[derive(Parser, Debug)]
#[command(name = "absence-report-cli")]
#[command(about = "Build a per-student absence report from a CSV absence log", long_about = None)]
#[command(version)]
struct Args {
    /// Absence log to read, one `DATE,NAME,NAME,...` line per date
    /// (default: absences.csv, `-` for stdin)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Report file to write (default: absences_report.txt, `-` for stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Report format (default: txt)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Fail on blank lines and lines without fields instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Ignore lines starting with `#`
    #[arg(long)]
    skip_comments: bool,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Txt,
    Json,
    Csv,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Txt => ReportFormat::Txt,
            FormatArg::Json => ReportFormat::Json,
            FormatArg::Csv => ReportFormat::Csv,
        }
    }
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            input: self.input.clone(),
            output: self.output.clone(),
            format: self.format.map(ReportFormat::from),
            strict: self.strict,
            skip_comments: self.skip_comments,
        }
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Absence Report CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using report library v{}", absence_report::VERSION);

    let app_config = match &args.config {
        Some(config_path) => {
            log::info!("Loading configuration from: {:?}", config_path);
            config::load_config(config_path)?
        }
        None => config::AppConfig::default(),
    };

    let settings = app_config.resolve(&args.overrides());
    log::debug!("Resolved settings: {:?}", settings);
    settings.validate()?;

    let stats = report::run(&settings)?;
    log::info!(
        "Done: {} student(s), {} absence(s), {} reached the threshold",
        stats.students,
        stats.total_absences,
        stats.students_at_threshold
    );

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_args_to_overrides() {
        let args = Args::parse_from([
            "absence-report-cli",
            "-i",
            "term.csv",
            "--format",
            "json",
            "--strict",
        ]);
        let overrides = args.overrides();

        assert_eq!(overrides.input, Some(PathBuf::from("term.csv")));
        assert_eq!(overrides.output, None);
        assert_eq!(overrides.format, Some(ReportFormat::Json));
        assert!(overrides.strict);
        assert!(!overrides.skip_comments);
    }
}
