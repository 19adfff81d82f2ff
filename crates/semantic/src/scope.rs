// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Scope management for binding
//!
//! A [`Scope`] holds the tables a FROM clause brings into visibility, in
//! FROM order — the order matters for unqualified `*` expansion and for
//! first-match column resolution. Aliases match case-insensitively and must
//! be unique within one scope.
//!
//! The binder keeps a stack of scopes so subqueries can chain outward; the
//! current engine only ever exercises one.

use andb_catalog::{ColumnDef, normalize_name};

use crate::error::{SemanticError, SemanticResult};

/// A table visible in a scope: its catalog name, the alias it binds under,
/// and its columns in declaration order.
#[derive(Debug, Clone)]
pub struct TableSymbol {
    pub table_name: String,
    pub alias: String,
    pub columns: Vec<ColumnDef>,
}

impl TableSymbol {
    pub fn new(
        table_name: impl Into<String>,
        alias: impl Into<String>,
        columns: Vec<ColumnDef>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            alias: alias.into(),
            columns,
        }
    }

    /// Case-insensitive match against the binding alias.
    pub fn matches(&self, name: &str) -> bool {
        normalize_name(&self.alias) == normalize_name(name)
    }

    /// Case-insensitive column lookup.
    pub fn find_column(&self, name: &str) -> Option<&ColumnDef> {
        let key = normalize_name(name);
        self.columns.iter().find(|c| normalize_name(&c.name) == key)
    }
}

/// One lexical scope: the tables of a single FROM clause.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    tables: Vec<TableSymbol>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a table by alias in this scope only.
    pub fn find_table(&self, name: &str) -> Option<&TableSymbol> {
        self.tables.iter().find(|t| t.matches(name))
    }

    /// Add a table; fails when its alias is already taken.
    pub fn add_table(&mut self, table: TableSymbol) -> SemanticResult<()> {
        if self.find_table(&table.alias).is_some() {
            return Err(SemanticError::DuplicateAlias(table.alias));
        }
        self.tables.push(table);
        Ok(())
    }

    /// Tables in FROM order.
    pub fn tables(&self) -> &[TableSymbol] {
        &self.tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use andb_catalog::SqlType;

    fn users_symbol() -> TableSymbol {
        TableSymbol::new(
            "users",
            "u",
            vec![
                ColumnDef::new("id", SqlType::Integer, 0),
                ColumnDef::new("name", SqlType::Char, 1),
            ],
        )
    }

    #[test]
    fn test_alias_match_is_case_insensitive() {
        let t = users_symbol();
        assert!(t.matches("u"));
        assert!(t.matches("U"));
        assert!(!t.matches("users"));
    }

    #[test]
    fn test_find_column() {
        let t = users_symbol();
        assert_eq!(t.find_column("ID").unwrap().ordinal, 0);
        assert!(t.find_column("missing").is_none());
    }

    #[test]
    fn test_duplicate_alias_rejected() {
        let mut scope = Scope::new();
        scope.add_table(users_symbol()).unwrap();
        let err = scope.add_table(users_symbol()).unwrap_err();
        assert!(matches!(err, SemanticError::DuplicateAlias(_)));
    }

    #[test]
    fn test_tables_keep_from_order() {
        let mut scope = Scope::new();
        scope
            .add_table(TableSymbol::new("b", "b", vec![]))
            .unwrap();
        scope
            .add_table(TableSymbol::new("a", "a", vec![]))
            .unwrap();
        let names: Vec<&str> = scope.tables().iter().map(|t| t.alias.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
