// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # andb - Runtime Layer
//!
//! Everything that executes:
//!
//! - [`ExprEval`]: the slot-based expression evaluator — open once, execute
//!   per row with no heap work, close once
//! - [`PhysicNode`]: physical plan nodes (scan, hash join, aggregate) with
//!   the Open/Exec/Close discipline and the callback row producer
//! - [`optimizer`]: the direct logical-to-physical lowering
//!
//! Execution is single-threaded and synchronous: rows are produced inside
//! `exec` and handed to the caller through a sink callback; a `None` row
//! from the scan signals end of stream.

pub mod error;
pub mod eval;
pub mod optimizer;
pub mod physic;

// Re-exports
pub use error::{ExecError, ExecResult};
pub use eval::ExprEval;
pub use optimizer::{OptimizeOption, optimize};
pub use physic::{ExecContext, PhysicKind, PhysicNode};
