// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # andb - Semantic Layer
//!
//! Semantic analysis of a parsed statement against the catalog:
//!
//! - [`Binder`]: scope-based table and column resolution, `*` expansion,
//!   expression typing, WHERE type checking
//! - [`Scope`] / [`TableSymbol`]: what a FROM clause brings into scope
//! - [`dispatch`]: the closed `(operator, left type, right type)` table that
//!   picks the scalar kernel and result type for every binary expression
//!
//! Binding rewrites the statement in place: `*` entries become column
//! references, column references gain ordinals and types, binary operators
//! gain their kernel. The first error aborts the statement.

pub mod binder;
pub mod dispatch;
pub mod error;
pub mod scope;

// Re-exports
pub use binder::{Binder, storage_type};
pub use error::{SemanticError, SemanticResult};
pub use scope::{Scope, TableSymbol};
