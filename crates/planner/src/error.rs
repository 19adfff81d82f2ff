// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for planning

use thiserror::Error;

/// Result type alias for planning operations
pub type PlanResult<T> = Result<T, PlanError>;

/// Errors that can occur while building a logical plan
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// A statement shape the grammar accepts but the planner refuses
    #[error("{0}")]
    NotImplemented(String),
}
