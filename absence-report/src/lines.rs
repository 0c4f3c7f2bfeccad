//! Line reader for absence logs
//!
//! A line ends at `\n`, `\r\n` or a lone `\r`, so logs saved with old Mac
//! line endings read the same as Unix and Windows ones. Lines are decoded as
//! UTF-8; invalid bytes become U+FFFD and the line is reported with a
//! warning instead of failing the run.

use std::borrow::Cow;
use std::collections::VecDeque;
use std::io::{self, BufRead};

/// Iterator over the lines of a buffered reader
pub struct LogLines<R> {
    reader: R,
    /// Lines split out of the last chunk but not yet returned
    pending: VecDeque<String>,
    line_number: usize,
    done: bool,
}

impl<R: BufRead> LogLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            line_number: 0,
            done: false,
        }
    }

    fn decode(&mut self, bytes: &[u8]) -> String {
        self.line_number += 1;

        match String::from_utf8_lossy(bytes) {
            Cow::Borrowed(line) => line.to_string(),
            Cow::Owned(line) => {
                log::warn!(
                    "Line {} is not valid UTF-8, invalid bytes replaced: {:?}",
                    self.line_number,
                    line
                );
                line
            }
        }
    }

    /// Read up to the next `\n` and queue every line found in that chunk
    fn fill(&mut self) -> io::Result<()> {
        let mut chunk = Vec::new();
        if self.reader.read_until(b'\n', &mut chunk)? == 0 {
            self.done = true;
            return Ok(());
        }

        if chunk.last() == Some(&b'\n') {
            chunk.pop();
        }
        // Either the `\r` of a `\r\n` pair or a lone `\r` ending the input
        if chunk.last() == Some(&b'\r') {
            chunk.pop();
        }

        for segment in chunk.split(|&b| b == b'\r') {
            let line = self.decode(segment);
            self.pending.push_back(line);
        }

        Ok(())
    }
}

impl<R: BufRead> Iterator for LogLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pending.is_empty() {
            if self.done {
                return None;
            }
            if let Err(e) = self.fill() {
                self.done = true;
                return Some(Err(e));
            }
        }

        self.pending.pop_front().map(Ok)
    }
}
