// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for semantic analysis

use andb_catalog::{CatalogError, DataType};
use thiserror::Error;

/// Result type alias for semantic operations
pub type SemanticResult<T> = Result<T, SemanticError>;

/// Errors that can occur during semantic analysis
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SemanticError {
    /// Table not found in any scope or in the catalog
    #[error("table {0} not found")]
    TableNotFound(String),

    /// Column not found in any table in scope
    #[error("column {0} not found")]
    ColumnNotFound(String),

    /// Duplicate table alias in the same FROM clause
    #[error("Duplicate table alias: {0}")]
    DuplicateAlias(String),

    /// WHERE expression did not type-check to Bool
    #[error("WHERE clause must be a boolean predicate, got {0}")]
    NotBoolean(DataType),

    /// A column's declared SQL type has no runtime representation
    #[error("unsupported column type: {0}")]
    UnsupportedType(&'static str),

    /// Operator dispatch found no implementation for the typed operands
    #[error("no operator implementation for {op} over ({left}, {right})")]
    NoOperator {
        op: &'static str,
        left: DataType,
        right: DataType,
    },

    /// A VALUES tuple does not match the table's column count
    #[error("table {table} has {expected} columns but {found} values were given")]
    ColumnCountMismatch {
        table: String,
        expected: usize,
        found: usize,
    },

    /// A VALUES literal does not match the column's type
    #[error("value for column {column} must be {expected}, got {found}")]
    TypeMismatch {
        column: String,
        expected: DataType,
        found: DataType,
    },

    /// INSERT values must be literal constants
    #[error("only literal values can be inserted into {0}")]
    NonConstantValue(String),

    /// Structural feature accepted by the grammar but refused by the core
    #[error("{0}")]
    NotImplemented(String),

    /// Catalog-level failure surfaced during binding
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
