// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # System catalog
//!
//! [`SysTable`] maps case-insensitive table names to [`TableDef`]s;
//! [`SysStats`] is a placeholder for future statistics. [`Catalog`] is the
//! facade the rest of the engine talks to: it is built once at startup,
//! handed around by reference, and torn down at shutdown. Tests build and
//! drop their own instance.
//!
//! None of the operations here are safe under concurrent mutation; the
//! catalog is single-writer.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{CatalogError, CatalogResult};
use crate::fixtures;
use crate::metadata::{ColumnDef, TableDef};
use crate::normalize_name;
use crate::row::Row;

/// Case-insensitive table name → definition map.
#[derive(Debug, Default)]
pub struct SysTable {
    records: BTreeMap<String, TableDef>,
}

impl SysTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table from the given columns. Fails when a table with the
    /// same case-insensitive name is already present.
    pub fn create_table(
        &mut self,
        name: &str,
        columns: Vec<ColumnDef>,
        _dist_by: Option<&str>,
    ) -> CatalogResult<()> {
        let key = normalize_name(name);
        if self.records.contains_key(&key) {
            return Err(CatalogError::DuplicateTable(name.to_string()));
        }
        let tdef = TableDef::new(name, columns)?;
        debug!(table = %name, columns = tdef.column_count(), "created table");
        self.records.insert(key, tdef);
        Ok(())
    }

    /// Table lookup by case-insensitive name.
    pub fn try_table(&self, name: &str) -> Option<&TableDef> {
        self.records.get(&normalize_name(name))
    }

    pub fn try_table_mut(&mut self, name: &str) -> Option<&mut TableDef> {
        self.records.get_mut(&normalize_name(name))
    }

    /// Column lookup by case-insensitive column and table name.
    pub fn column(&self, col_name: &str, tbl_name: &str) -> Option<&ColumnDef> {
        self.try_table(tbl_name).and_then(|t| t.column(col_name))
    }

    /// Removes one table. Fails when it does not exist.
    pub fn drop_table(&mut self, name: &str) -> CatalogResult<()> {
        match self.records.remove(&normalize_name(name)) {
            Some(_) => {
                debug!(table = %name, "dropped table");
                Ok(())
            }
            None => Err(CatalogError::TableNotFound(name.to_string())),
        }
    }

    /// Removes and releases every table definition.
    pub fn drop_all_tables(&mut self) {
        debug!(count = self.records.len(), "dropping all tables");
        self.records.clear();
    }

    pub fn table_count(&self) -> usize {
        self.records.len()
    }

    /// Declared table names, sorted by their normalized form.
    pub fn table_names(&self) -> Vec<&str> {
        self.records.values().map(|t| t.name.as_str()).collect()
    }
}

/// Placeholder for table/column statistics.
#[derive(Debug, Default)]
pub struct SysStats {}

/// The system catalog: schema plus row storage for the whole process.
#[derive(Debug, Default)]
pub struct Catalog {
    pub systable: SysTable,
    pub sysstats: SysStats,
}

impl Catalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Populates the deterministic test schema: optimizer tables `t0..t29`
    /// and the built-in tables `a`, `b`, `c`, `d` with their fixed rows.
    pub fn init(&mut self) {
        fixtures::create_optimizer_test_tables(self);
        fixtures::create_builtin_test_tables(self);
        fixtures::populate_builtin_test_tables(self);
    }

    /// Drops every table. Dropping the value itself releases the rest.
    pub fn deinit(&mut self) {
        self.systable.drop_all_tables();
    }

    /// See [`SysTable::create_table`].
    pub fn create_table(
        &mut self,
        name: &str,
        columns: Vec<ColumnDef>,
        dist_by: Option<&str>,
    ) -> CatalogResult<()> {
        self.systable.create_table(name, columns, dist_by)
    }

    /// See [`SysTable::try_table`].
    pub fn try_table(&self, name: &str) -> Option<&TableDef> {
        self.systable.try_table(name)
    }

    /// See [`SysTable::column`].
    pub fn column(&self, col_name: &str, tbl_name: &str) -> Option<&ColumnDef> {
        self.systable.column(col_name, tbl_name)
    }

    /// Appends deep copies of `rows` to the table's distribution 0, if the
    /// table exists.
    pub fn populate_table(&mut self, name: &str, rows: &[Row]) {
        if let Some(tdef) = self.systable.try_table_mut(name) {
            tdef.insert_rows(rows);
        }
    }

    /// [`Catalog::populate_table`] for callers that must know the table is
    /// there.
    pub fn insert_rows(&mut self, name: &str, rows: &[Row]) -> CatalogResult<()> {
        match self.systable.try_table_mut(name) {
            Some(tdef) => {
                tdef.insert_rows(rows);
                Ok(())
            }
            None => Err(CatalogError::TableNotFound(name.to_string())),
        }
    }

    /// See [`SysTable::drop_table`].
    pub fn drop_table(&mut self, name: &str) -> CatalogResult<()> {
        self.systable.drop_table(name)
    }

    /// See [`SysTable::table_names`].
    pub fn table_names(&self) -> Vec<&str> {
        self.systable.table_names()
    }
}
