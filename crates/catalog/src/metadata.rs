// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Schema metadata
//!
//! This module defines the types used to represent table schema metadata:
//! SQL types, columns, tables and their row storage.
//!
//! Column and table names are unique under case-insensitive comparison;
//! declared spellings are preserved. A table's rows live in its
//! [`Distribution`]s — exactly one for `NonDistributed` tables, which is all
//! the current engine creates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};
use crate::normalize_name;
use crate::row::Row;

/// SQL column types (the declared type, distinct from the runtime
/// [`DataType`](crate::DataType) tag).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqlType {
    Integer,
    Long,
    /// Simulated with a double for now.
    Numeric,
    Double,
    Bool,
    DateTime,
    Varchar,
    Char,
}

impl SqlType {
    /// Fixed byte length used for row-size estimation; `None` means the
    /// length is unknown (character types).
    pub fn byte_len(&self) -> Option<usize> {
        match self {
            SqlType::Integer => Some(4),
            SqlType::Long => Some(8),
            SqlType::Numeric => Some(8),
            SqlType::Double => Some(8),
            SqlType::Bool => Some(1),
            SqlType::DateTime => Some(8),
            SqlType::Varchar | SqlType::Char => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SqlType::Integer => "integer",
            SqlType::Long => "long",
            SqlType::Numeric => "numeric",
            SqlType::Double => "double",
            SqlType::Bool => "boolean",
            SqlType::DateTime => "datetime",
            SqlType::Varchar => "varchar",
            SqlType::Char => "char",
        }
    }
}

/// Where a table's rows come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TableSource {
    #[default]
    Table,
    Stream,
}

/// How a table's rows are spread over distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistributionMethod {
    #[default]
    NonDistributed,
    Distributed,
    Replicated,
    RoundRobin,
}

/// One shard of a table's row storage.
///
/// `NonDistributed` tables expose a single distribution at index 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Distribution {
    pub heap: Vec<Row>,
}

/// Definition of a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Declared name; lookup is case-insensitive.
    pub name: String,
    /// Declared SQL type.
    pub sql_type: SqlType,
    /// 0-based position in the table's declaration order.
    pub ordinal: usize,
    pub nullable: bool,
    /// Engine-assigned id; -1 when unassigned.
    pub column_id: i32,
    /// Reserved for case-sensitive identifiers; always false today.
    pub quoted: bool,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, sql_type: SqlType, ordinal: usize) -> Self {
        Self {
            name: name.into(),
            sql_type,
            ordinal,
            nullable: true,
            column_id: -1,
            quoted: false,
        }
    }

    /// Builder method: set nullable.
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }
}

/// Definition of a table: schema plus row storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDef {
    /// Declared name; lookup is case-insensitive.
    pub name: String,
    /// Columns keyed by normalized name.
    columns: BTreeMap<String, ColumnDef>,
    /// Engine-assigned id; -1 when unassigned.
    pub table_id: i32,
    pub source: TableSource,
    pub dist_method: DistributionMethod,
    /// Row storage; length 1 for `NonDistributed`.
    pub distributions: Vec<Distribution>,
}

impl TableDef {
    /// Builds a table definition, rejecting duplicate column names under
    /// case-insensitive comparison.
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDef>) -> CatalogResult<Self> {
        let name = name.into();
        let mut map = BTreeMap::new();
        for col in columns {
            let key = normalize_name(&col.name);
            if map.insert(key, col.clone()).is_some() {
                return Err(CatalogError::DuplicateColumn(col.name, name));
            }
        }
        Ok(Self {
            name,
            columns: map,
            table_id: -1,
            source: TableSource::Table,
            dist_method: DistributionMethod::NonDistributed,
            distributions: vec![Distribution::default()],
        })
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column lookup by case-insensitive name.
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.get(&normalize_name(name))
    }

    /// Columns sorted ascending by ordinal — declaration order.
    pub fn columns_in_order(&self) -> Vec<&ColumnDef> {
        let mut cols: Vec<&ColumnDef> = self.columns.values().collect();
        cols.sort_by_key(|c| c.ordinal);
        cols
    }

    /// Estimated row size: the sum of the known per-column byte lengths.
    /// Unknown-length columns contribute 0.
    pub fn est_row_size(&self) -> usize {
        self.columns
            .values()
            .map(|c| c.sql_type.byte_len().unwrap_or(0))
            .sum()
    }

    /// Appends deep copies of the given rows to distribution 0.
    pub fn insert_rows(&mut self, rows: &[Row]) {
        let heap = &mut self.distributions[0].heap;
        for r in rows {
            heap.push(r.clone());
        }
    }
}
