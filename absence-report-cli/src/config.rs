//! Configuration loading and resolution
//!
//! Settings come from three layers: command-line flags, an optional TOML
//! file, and built-in defaults, in that order of precedence.

use absence_report::{LinePolicy, ReportConfig, ReportFormat};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Input file used when neither flag nor config names one
pub const DEFAULT_INPUT: &str = "absences.csv";

/// Output file used when neither flag nor config names one
pub const DEFAULT_OUTPUT: &str = "absences_report.txt";

/// Path value meaning stdin (for input) or stdout (for output)
pub const STDIO_PATH: &str = "-";

/// Application configuration (loaded from a TOML file)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub parsing: ParsingConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InputConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    pub path: Option<PathBuf>,
    pub format: Option<ReportFormat>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ParsingConfig {
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub skip_comments: bool,
}

/// Values given on the command line; `None`/`false` means "not given"
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub format: Option<ReportFormat>,
    pub strict: bool,
    pub skip_comments: bool,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: ReportFormat,
    pub report: ReportConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Input and output both point to {0:?}; refusing to overwrite the absence log")]
    SameFile(PathBuf),
}

impl Settings {
    pub fn reads_stdin(&self) -> bool {
        self.input == Path::new(STDIO_PATH)
    }

    pub fn writes_stdout(&self) -> bool {
        self.output == Path::new(STDIO_PATH)
    }

    /// Reject settings that would destroy the input
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !self.reads_stdin() && self.input == self.output {
            return Err(ConfigError::SameFile(self.input.clone()));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Merge command-line overrides on top of this config
    pub fn resolve(&self, overrides: &Overrides) -> Settings {
        let input = overrides
            .input
            .clone()
            .or_else(|| self.input.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
        let output = overrides
            .output
            .clone()
            .or_else(|| self.output.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
        let format = overrides.format.or(self.output.format).unwrap_or_default();

        let line_policy = if overrides.strict || self.parsing.strict {
            LinePolicy::Strict
        } else {
            LinePolicy::Lenient
        };
        let report = ReportConfig::new()
            .with_line_policy(line_policy)
            .with_comment_skipping(overrides.skip_comments || self.parsing.skip_comments);

        Settings {
            input,
            output,
            format,
            report,
        }
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}
