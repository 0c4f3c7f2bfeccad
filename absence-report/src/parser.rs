//! Absence log line parser
//!
//! Each input line has the form `MARKER,NAME_1,NAME_2,...,NAME_N`. Fields are
//! separated by a comma with optional whitespace on either side; that
//! whitespace is not part of any field.

use crate::config::ReportConfig;
use crate::types::{AbsenceEvent, ReportError, Result};
use std::io;

/// Whitespace that may surround a field separator
fn is_separator_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Split a line into its fields
///
/// Whitespace next to a comma is dropped, while leading whitespace of the
/// first field and trailing whitespace of the last field are kept. Empty
/// fields at the end of the line are discarded, so `"a,b,,"` yields
/// `["a", "b"]` and `","` yields nothing at all. A line without any comma is
/// returned whole, which makes an empty line a single empty field.
pub fn split_fields(line: &str) -> Vec<&str> {
    if !line.contains(',') {
        return vec![line];
    }

    let parts: Vec<&str> = line.split(',').collect();
    let last = parts.len() - 1;

    let mut fields: Vec<&str> = parts
        .into_iter()
        .enumerate()
        .map(|(i, part)| {
            let part = if i > 0 {
                part.trim_start_matches(is_separator_space)
            } else {
                part
            };
            if i < last {
                part.trim_end_matches(is_separator_space)
            } else {
                part
            }
        })
        .collect();

    while fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }

    fields
}

/// Parse one line into an [`AbsenceEvent`]
///
/// Returns `None` when the line has no fields left after splitting.
/// Names are taken verbatim: no deduplication, no validation of the marker.
pub fn parse_line(line_number: usize, line: &str) -> Option<AbsenceEvent> {
    let mut fields = split_fields(line).into_iter();
    let marker = fields.next()?;

    Some(AbsenceEvent {
        line_number,
        marker: marker.to_string(),
        names: fields.map(str::to_string).collect(),
    })
}

/// Iterator that turns raw lines into absence events
///
/// Wraps any source of lines (a [`LogLines`] reader, or plain strings
/// mapped to `Ok`) and applies the configured [`LinePolicy`]
/// and comment handling.
///
/// [`LinePolicy`]: crate::config::LinePolicy
/// [`LogLines`]: crate::lines::LogLines
pub struct EventParser<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    lines: I,
    config: ReportConfig,
    line_number: usize,
}

impl<I> EventParser<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub fn new(lines: I, config: ReportConfig) -> Self {
        Self {
            lines,
            config,
            line_number: 0,
        }
    }

    /// Number of lines consumed so far (including skipped ones)
    pub fn lines_read(&self) -> usize {
        self.line_number
    }

    fn malformed(&self, line: String) -> ReportError {
        ReportError::MalformedLine {
            line: self.line_number,
            content: line,
        }
    }
}

impl<I> Iterator for EventParser<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = Result<AbsenceEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_number += 1;

            if self.config.is_comment(&line) {
                log::trace!("Skipping comment on line {}", self.line_number);
                continue;
            }

            if self.config.is_strict() && line.trim().is_empty() {
                return Some(Err(self.malformed(line)));
            }

            match parse_line(self.line_number, &line) {
                Some(event) => {
                    log::trace!(
                        "Line {}: marker {:?} with {} name(s)",
                        event.line_number,
                        event.marker,
                        event.names.len()
                    );
                    return Some(Ok(event));
                }
                None if self.config.is_strict() => return Some(Err(self.malformed(line))),
                None => {
                    log::warn!(
                        "Skipping line {} with no fields: {:?}",
                        self.line_number,
                        line
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_lines(lines: &[&str]) -> impl Iterator<Item = io::Result<String>> {
        lines
            .iter()
            .map(|line| Ok(line.to_string()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_split_simple_line() {
        assert_eq!(
            split_fields("2024-01-05,Alice,Bob"),
            vec!["2024-01-05", "Alice", "Bob"]
        );
    }

    #[test]
    fn test_split_trims_whitespace_around_commas() {
        assert_eq!(
            split_fields("2024-01-05 ,  Alice\t,Bob"),
            vec!["2024-01-05", "Alice", "Bob"]
        );
    }

    #[test]
    fn test_split_keeps_outer_whitespace() {
        assert_eq!(
            split_fields(" 2024-01-05, Alice "),
            vec![" 2024-01-05", "Alice "]
        );
    }

    #[test]
    fn test_split_drops_trailing_empty_fields() {
        assert_eq!(split_fields("d1,Alice,,"), vec!["d1", "Alice"]);
        assert_eq!(split_fields("d1,Alice , "), vec!["d1", "Alice"]);
    }

    #[test]
    fn test_split_keeps_inner_empty_fields() {
        assert_eq!(split_fields("d1,,Bob"), vec!["d1", "", "Bob"]);
        assert_eq!(split_fields(",Alice"), vec!["", "Alice"]);
    }

    #[test]
    fn test_split_degenerate_lines() {
        assert_eq!(split_fields(""), vec![""]);
        assert_eq!(split_fields("   "), vec!["   "]);
        assert!(split_fields(",").is_empty());
        assert!(split_fields(" , ,").is_empty());
    }

    #[test]
    fn test_parse_line() {
        let event = parse_line(7, "2024-01-05, Alice, Bob").unwrap();
        assert_eq!(event.line_number, 7);
        assert_eq!(event.marker, "2024-01-05");
        assert_eq!(event.names, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_parse_marker_only_line() {
        let event = parse_line(1, "2024-01-05").unwrap();
        assert!(event.is_marker_only());
        assert!(parse_line(2, ",,").is_none());
    }

    #[test]
    fn test_parse_keeps_duplicate_names() {
        let event = parse_line(1, "d1,Alice,Alice").unwrap();
        assert_eq!(event.names, vec!["Alice", "Alice"]);
    }

    #[test]
    fn test_event_parser_lenient_skips_fieldless_lines() {
        let parser = EventParser::new(
            ok_lines(&["d1,Alice", ",", "", "d2,Bob"]),
            ReportConfig::new(),
        );
        let events: Vec<AbsenceEvent> = parser.map(|e| e.unwrap()).collect();

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].line_number, 1);
        assert!(events[1].is_marker_only());
        assert_eq!(events[1].line_number, 3);
        assert_eq!(events[2].line_number, 4);
        assert_eq!(events[2].names, vec!["Bob"]);
    }

    #[test]
    fn test_event_parser_strict_rejects_blank_line() {
        let mut parser = EventParser::new(
            ok_lines(&["d1,Alice", "  "]),
            ReportConfig::new().strict(),
        );

        assert!(parser.next().unwrap().is_ok());
        match parser.next().unwrap() {
            Err(ReportError::MalformedLine { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected malformed line error, got {:?}", other),
        }
    }

    #[test]
    fn test_event_parser_strict_rejects_fieldless_line() {
        let mut parser = EventParser::new(ok_lines(&[","]), ReportConfig::new().strict());
        assert!(matches!(
            parser.next(),
            Some(Err(ReportError::MalformedLine { line: 1, .. }))
        ));
    }

    #[test]
    fn test_event_parser_skips_comments_when_enabled() {
        let config = ReportConfig::new().with_comment_skipping(true);
        let mut parser = EventParser::new(ok_lines(&["# date,names", "d1,Alice"]), config);

        let event = parser.next().unwrap().unwrap();
        assert_eq!(event.marker, "d1");
        assert_eq!(event.line_number, 2);
        assert!(parser.next().is_none());
        assert_eq!(parser.lines_read(), 2);
    }

    #[test]
    fn test_event_parser_propagates_read_errors() {
        let lines = vec![
            Ok("d1,Alice".to_string()),
            Err(io::Error::new(io::ErrorKind::InvalidData, "bad utf-8")),
        ];
        let parser = EventParser::new(lines.into_iter(), ReportConfig::new());
        let results: Vec<_> = parser.collect();

        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(ReportError::Io(_))));
    }
}
