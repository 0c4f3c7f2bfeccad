//! Report configuration types
//!
//! This module defines the few knobs the report library exposes. The
//! absence threshold is deliberately absent: it is fixed at
//! [`crate::ABSENCE_THRESHOLD`].

use serde::{Deserialize, Serialize};

/// How lines that split into nothing useful are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinePolicy {
    /// Blank lines count as marker-only lines; lines with no fields at all
    /// (such as a lone comma) are skipped with a warning
    #[default]
    Lenient,
    /// Blank lines and lines with no fields fail the run
    Strict,
}

/// Configuration for the report library
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Handling of blank and field-less lines
    #[serde(default)]
    pub line_policy: LinePolicy,

    /// Ignore lines starting with `#` (after leading whitespace)
    #[serde(default)]
    pub skip_comments: bool,
}

impl ReportConfig {
    /// Create a new report configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the line policy
    pub fn with_line_policy(mut self, policy: LinePolicy) -> Self {
        self.line_policy = policy;
        self
    }

    /// Builder method: shorthand for `LinePolicy::Strict`
    pub fn strict(self) -> Self {
        self.with_line_policy(LinePolicy::Strict)
    }

    /// Builder method: enable or disable comment skipping
    pub fn with_comment_skipping(mut self, enabled: bool) -> Self {
        self.skip_comments = enabled;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.line_policy == LinePolicy::Strict
    }

    /// Check if a raw line is a comment that should be ignored
    pub fn is_comment(&self, line: &str) -> bool {
        self.skip_comments && line.trim_start().starts_with('#')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_config_builder() {
        let config = ReportConfig::new().strict().with_comment_skipping(true);

        assert!(config.is_strict());
        assert!(config.skip_comments);
    }

    #[test]
    fn test_defaults_are_permissive() {
        let config = ReportConfig::new();

        assert_eq!(config.line_policy, LinePolicy::Lenient);
        assert!(!config.is_comment("# not a comment unless enabled"));
    }

    #[test]
    fn test_comment_detection() {
        let config = ReportConfig::new().with_comment_skipping(true);

        assert!(config.is_comment("# header"));
        assert!(config.is_comment("   #indented"));
        assert!(!config.is_comment("2024-01-05,#hash"));
    }

    #[test]
    fn test_line_policy_deserialization() {
        let config: ReportConfig = serde_json::from_str(r#"{"line_policy": "strict"}"#).unwrap();
        assert!(config.is_strict());
        assert!(!config.skip_comments);
    }
}
