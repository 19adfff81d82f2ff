// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for lexing and parsing

use std::fmt;

use thiserror::Error;

/// Result type alias for parser operations
pub type ParserResult<T> = Result<T, ParserError>;

/// Line/column position in the statement text, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl Default for Location {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Errors that can occur while scanning or parsing a statement
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParserError {
    /// The scanner hit a character no token starts with
    #[error("unexpected character '{ch}'")]
    UnexpectedChar { ch: char, location: Location },

    /// A string literal was not closed before end of input
    #[error("unterminated string literal")]
    UnterminatedString { location: Location },

    /// A numeric literal does not fit any supported type
    #[error("invalid number literal '{literal}'")]
    InvalidNumber { literal: String, location: Location },

    /// The parser found a token it cannot use here
    #[error("unexpected token '{found}'{}", expected_clause(.expected))]
    UnexpectedToken {
        found: String,
        expected: Option<&'static str>,
        location: Location,
    },

    /// The statement ended where more input was required
    #[error("unexpected end of statement")]
    UnexpectedEof { location: Location },
}

fn expected_clause(expected: &Option<&'static str>) -> String {
    match expected {
        Some(e) => format!(", expected {e}"),
        None => String::new(),
    }
}

impl ParserError {
    /// Where the error was raised.
    pub fn location(&self) -> Location {
        match self {
            ParserError::UnexpectedChar { location, .. }
            | ParserError::UnterminatedString { location }
            | ParserError::InvalidNumber { location, .. }
            | ParserError::UnexpectedToken { location, .. }
            | ParserError::UnexpectedEof { location } => *location,
        }
    }
}
