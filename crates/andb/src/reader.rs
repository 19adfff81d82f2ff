// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Statement reader
//!
//! Feeds the driver `;`-terminated statements from interactive input or a
//! batch file:
//!
//! - leading whitespace, carriage returns and newlines are stripped;
//! - lines starting with `#` or `--` are comments and skipped;
//! - `quit` (case-insensitive) ends the stream;
//! - a statement longer than the line buffer ends batch mode.

use std::io::{BufRead, Write};

/// Statement buffer size; longer input ends the stream.
pub const LINE_SIZE: usize = 8192;

/// Prompt shown in interactive mode.
pub const PROMPT: &str = "ASQL> ";

/// Pulls `;`-terminated statements out of a buffered source.
pub struct StatementReader<R> {
    src: R,
    interactive: bool,
}

impl<R: BufRead> StatementReader<R> {
    pub fn new(src: R, interactive: bool) -> Self {
        Self { src, interactive }
    }

    /// The next statement text (terminator stripped), or `None` when the
    /// input is exhausted, over-long, or the user quit.
    pub fn next_statement(&mut self) -> Option<String> {
        loop {
            if self.interactive {
                print!("{PROMPT}");
                let _ = std::io::stdout().flush();
            }

            let mut chunk: Vec<u8> = vec![];
            let n = self.src.read_until(b';', &mut chunk).ok()?;
            if n == 0 {
                return None; // end of input
            }
            if chunk.len() >= LINE_SIZE {
                return None; // over-long statement ends the stream
            }

            let chunk = String::from_utf8_lossy(&chunk);
            let text = chunk.as_ref();
            let text = text.strip_suffix(';').unwrap_or(text);

            // drop comment lines, normalize the rest into one line
            let statement = text
                .lines()
                .map(str::trim_start)
                .filter(|line| !line.starts_with('#') && !line.starts_with("--"))
                .collect::<Vec<_>>()
                .join(" ");
            let statement = statement.trim().to_string();

            if statement.is_empty() {
                continue;
            }
            if statement.eq_ignore_ascii_case("quit") {
                return None;
            }
            return Some(statement);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(input: &str) -> StatementReader<Cursor<&str>> {
        StatementReader::new(Cursor::new(input), false)
    }

    #[test]
    fn test_splits_on_semicolon() {
        let mut r = reader("select a1 from a; select a2 from a;");
        assert_eq!(r.next_statement().unwrap(), "select a1 from a");
        assert_eq!(r.next_statement().unwrap(), "select a2 from a");
        assert!(r.next_statement().is_none());
    }

    #[test]
    fn test_strips_leading_whitespace_and_newlines() {
        let mut r = reader("\r\n   select a1\n   from a;");
        assert_eq!(r.next_statement().unwrap(), "select a1 from a");
    }

    #[test]
    fn test_comment_lines_skipped() {
        let mut r = reader("# a comment\nselect a1 from a;\n-- another\nselect a2 from a;");
        assert_eq!(r.next_statement().unwrap(), "select a1 from a");
        assert_eq!(r.next_statement().unwrap(), "select a2 from a");
        assert!(r.next_statement().is_none());
    }

    #[test]
    fn test_quit_is_case_insensitive() {
        let mut r = reader("QUIT;");
        assert!(r.next_statement().is_none());

        let mut r = reader("  quit  ;");
        assert!(r.next_statement().is_none());
    }

    #[test]
    fn test_empty_statements_skipped() {
        let mut r = reader(";;  ;select a1 from a;");
        assert_eq!(r.next_statement().unwrap(), "select a1 from a");
    }

    #[test]
    fn test_overlong_statement_ends_stream() {
        let long = format!("select a1 from a where a1 = {};", "9".repeat(LINE_SIZE));
        let mut r = reader(&long);
        assert!(r.next_statement().is_none());
    }
}
