// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # andb - Statement driver
//!
//! The glue between the front end and the engine: a [`Session`] takes one
//! statement's text through parse → bind → plan → optimize →
//! open/exec/close and hands back deep-copied result rows, and a
//! [`StatementReader`] feeds it `;`-terminated statements from a terminal
//! or a batch file.
//!
//! Every statement runs inside its own error boundary; a failure aborts
//! that statement only and the driver moves on to the next one.

pub mod import;
pub mod options;
pub mod reader;
pub mod session;

// Re-exports
pub use options::Options;
pub use reader::StatementReader;
pub use session::{Session, SessionError, SessionOptions, StatementOutput};
