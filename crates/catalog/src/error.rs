// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for catalog operations

use thiserror::Error;

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while creating or looking up catalog objects
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A table with the same case-insensitive name already exists
    #[error("Duplicate table: {0}")]
    DuplicateTable(String),

    /// A table declares the same case-insensitive column name twice
    #[error("Duplicate Column Definition: {0} in table {1}")]
    DuplicateColumn(String, String),

    /// Requested table was not found
    #[error("table {0} not found")]
    TableNotFound(String),
}
