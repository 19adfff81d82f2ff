// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # andb - SQL front end
//!
//! A hand-written lexer and recursive-descent parser for the SELECT subset
//! the engine executes: a projection list (expressions, `*`, `alias.*`,
//! optional aliases), a FROM list with optional aliases, and a WHERE
//! predicate over the twelve binary operators.
//!
//! Unquoted identifiers and keywords fold to ASCII lower case, so queries
//! differing only in identifier case parse to identical trees. Errors carry
//! the line and column where scanning or parsing stopped.

pub mod error;
pub mod lexer;
pub mod parser;

// Re-exports
pub use error::{Location, ParserError, ParserResult};
pub use lexer::{Keyword, Lexer, Symbol, Token};
pub use parser::{Parser, parse_select, parse_statement};
