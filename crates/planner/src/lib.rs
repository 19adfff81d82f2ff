// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # andb - Logical Planner
//!
//! Builds the logical plan tree from a bound statement:
//!
//! - [`LogicNode`] / [`LogicKind`]: scan (with pushed-down filter), join,
//!   aggregate
//! - [`create_plan`]: FROM-clause transformation plus WHERE push-down
//!
//! The SQL path only ever produces single-scan plans today — the binder
//! refuses multi-table FROM — but the join construction is kept for plans
//! built directly by tests and tools.

pub mod error;
pub mod logic;
pub mod plan;

// Re-exports
pub use error::{PlanError, PlanResult};
pub use logic::{LogicKind, LogicNode};
pub use plan::create_plan;
