// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for execution

use thiserror::Error;

/// Result type alias for runtime operations
pub type ExecResult<T> = Result<T, ExecError>;

/// Errors that can occur while opening or executing a physical plan
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecError {
    /// A scan's table vanished between planning and execution
    #[error("table {0} not found")]
    TableNotFound(String),

    /// The evaluator was opened over an expression with unbound pieces
    #[error("expression is not bound for evaluation")]
    UnboundExpr,

    /// Exec or Close was called without a matching Open
    #[error("physical node was not opened")]
    NotOpened,
}
