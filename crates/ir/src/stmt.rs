// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Statement AST
//!
//! [`Statement`] is what the parser produces and the binder annotates. The
//! interesting one is [`SelectStmt`] — a FROM list of [`TableRef`]s, a
//! projection list (post-`*`-expansion) and an optional WHERE expression —
//! which is the only statement that grows a plan. The DDL/DML shapes
//! (create, insert, drop, show, import) execute directly against the
//! catalog.
//!
//! [`TableRef::Query`] (derived tables) is accepted as a shape so the front
//! end can hand it over, but the planner refuses it — only base tables
//! execute today.

use andb_catalog::{ColumnDef, SqlType};

use crate::expr::Expr;

/// One parsed SQL statement.
#[derive(Debug, Clone)]
pub enum Statement {
    Select(SelectStmt),
    CreateTable(CreateTableStmt),
    Insert(InsertStmt),
    DropTable(DropTableStmt),
    Show(ShowStmt),
    Import(ImportStmt),
}

impl Statement {
    /// Statement-kind name, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Statement::Select(_) => "SELECT",
            Statement::CreateTable(_) => "CREATE TABLE",
            Statement::Insert(_) => "INSERT",
            Statement::DropTable(_) => "DROP TABLE",
            Statement::Show(_) => "SHOW",
            Statement::Import(_) => "IMPORT",
        }
    }
}

/// A SELECT statement.
#[derive(Debug, Clone, Default)]
pub struct SelectStmt {
    /// FROM clause, in declaration order.
    pub from: Vec<TableRef>,
    /// Projection list; `*` entries are replaced during binding.
    pub selection: Vec<Expr>,
    /// Optional WHERE predicate.
    pub where_clause: Option<Expr>,
}

impl SelectStmt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the statement as one line of SQL text:
    /// `select e[, e]* FROM t[, t]*[ WHERE e]`.
    pub fn sql_text(&self) -> String {
        let mut out = String::from("select ");
        for (i, e) in self.selection.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&e.to_sql());
        }
        out.push_str(" FROM ");
        for (i, t) in self.from.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&t.sql_text());
        }
        if let Some(w) = &self.where_clause {
            out.push_str(" WHERE ");
            out.push_str(&w.to_sql());
        }
        out
    }
}

/// A table reference in a FROM clause.
#[derive(Debug, Clone)]
pub enum TableRef {
    Base(BaseTableRef),
    Query(QueryRef),
}

impl TableRef {
    /// The name this reference binds under: the alias when present,
    /// otherwise the table name.
    pub fn alias(&self) -> &str {
        match self {
            TableRef::Base(b) => b.alias(),
            TableRef::Query(q) => q.alias.as_deref().unwrap_or(""),
        }
    }

    fn sql_text(&self) -> String {
        match self {
            TableRef::Base(b) => match &b.alias {
                Some(alias) => format!("{} {}", b.tab_name, alias),
                None => b.tab_name.clone(),
            },
            TableRef::Query(q) => {
                let alias = q.alias.as_deref().unwrap_or("");
                format!("({}) {}", q.query.sql_text(), alias)
            }
        }
    }
}

/// A base-table reference.
///
/// Binding caches the table's column definitions and one `ColExpr` per
/// column; star expansion and column resolution read the cache.
#[derive(Debug, Clone)]
pub struct BaseTableRef {
    pub tab_name: String,
    pub alias: Option<String>,
    /// Bound column definitions, declaration order; empty until bound.
    pub columns: Vec<ColumnDef>,
    /// Cached column references, one per column; empty until bound.
    pub col_refs: Vec<Expr>,
}

impl BaseTableRef {
    pub fn new(tab_name: impl Into<String>) -> Self {
        Self {
            tab_name: tab_name.into(),
            alias: None,
            columns: vec![],
            col_refs: vec![],
        }
    }

    /// Builder method: set the alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// The alias, defaulting to the table name.
    pub fn alias(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.tab_name)
    }

    pub fn is_bound(&self) -> bool {
        !self.columns.is_empty()
    }
}

/// A derived-table reference — shape only, reserved for subqueries.
#[derive(Debug, Clone)]
pub struct QueryRef {
    pub query: Box<SelectStmt>,
    pub alias: Option<String>,
    pub col_output_names: Vec<String>,
}

/// A column as declared in `CREATE TABLE` — name, type, nullability.
/// Ordinals are assigned when the catalog builds the table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: String,
    pub sql_type: SqlType,
    pub nullable: bool,
}

/// `CREATE TABLE [IF NOT EXISTS] name (col type [NOT NULL], ...)`
#[derive(Debug, Clone)]
pub struct CreateTableStmt {
    pub table_name: String,
    pub columns: Vec<ColumnDefinition>,
    pub if_not_exists: bool,
}

/// `INSERT INTO name VALUES (...), (...)` — literal tuples only.
#[derive(Debug, Clone)]
pub struct InsertStmt {
    pub table_name: String,
    /// One expression list per VALUES tuple.
    pub rows: Vec<Vec<Expr>>,
}

/// `DROP TABLE [IF EXISTS] name`
#[derive(Debug, Clone)]
pub struct DropTableStmt {
    pub table_name: String,
    pub if_exists: bool,
}

/// What a SHOW statement lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowKind {
    /// `SHOW TABLES`
    Tables,
    /// `SHOW COLUMNS name` / `DESCRIBE name`
    Columns,
}

/// `SHOW TABLES`, `SHOW COLUMNS name`, `DESCRIBE name`
#[derive(Debug, Clone)]
pub struct ShowStmt {
    pub kind: ShowKind,
    pub name: Option<String>,
}

/// On-disk layout of an imported file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportFormat {
    Csv,
    /// Pipe-separated table dumps.
    Tbl,
    /// Decide from the file extension.
    #[default]
    Auto,
}

/// `IMPORT INTO name FROM 'path'`
#[derive(Debug, Clone)]
pub struct ImportStmt {
    pub table_name: String,
    pub file_path: String,
    pub format: ImportFormat,
}
