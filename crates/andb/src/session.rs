// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Session
//!
//! One statement's journey through the engine. The session exclusively
//! borrows the process catalog — it is the single writer — runs the
//! pipeline, and deep-copies result rows into its output buffer; plans only
//! ever borrow catalog rows.
//!
//! SELECT goes parse → bind → plan → optimize → open/exec/close. The scan
//! produces whole source rows; the session applies the bound selection list
//! as a projection, one evaluator per selection expression, so
//! `select a1 from a` really does yield one-column rows. The catalog-facing
//! statements (create/insert/drop/show/import) execute directly after
//! binding.

use std::fs;

use andb_catalog::{Catalog, CatalogError, ColumnDef, Datum, Row};
use andb_ir::{
    CreateTableStmt, DropTableStmt, ExprKind, ImportStmt, InsertStmt, SelectStmt, ShowKind,
    ShowStmt, Statement,
};
use andb_parser::{ParserError, parse_statement};
use andb_planner::{PlanError, create_plan};
use andb_runtime::{ExecContext, ExecError, ExprEval, OptimizeOption, optimize};
use andb_semantic::{Binder, SemanticError};
use thiserror::Error;
use tracing::debug;

use crate::import;

/// Errors from any stage of statement processing.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Parse(#[from] ParserError),

    #[error(transparent)]
    Semantic(#[from] SemanticError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("import failed: {0}")]
    Import(String),
}

/// Per-session switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Produce EXPLAIN text for each statement.
    pub explain: bool,
}

/// Result of one statement.
#[derive(Debug, Default)]
pub struct StatementOutput {
    /// Deep-copied result rows, in emission order.
    pub rows: Vec<Row>,
    /// EXPLAIN text, when the session was asked for it.
    pub explain: Option<String>,
}

/// Statement driver over the process catalog.
pub struct Session<'a> {
    catalog: &'a mut Catalog,
    options: SessionOptions,
}

impl<'a> Session<'a> {
    pub fn new(catalog: &'a mut Catalog, options: SessionOptions) -> Self {
        Self { catalog, options }
    }

    /// Runs one statement end to end.
    pub fn run(&mut self, sql: &str) -> Result<StatementOutput, SessionError> {
        let mut stmt = parse_statement(sql)?;
        Binder::new(self.catalog).bind_statement(&mut stmt)?;

        match stmt {
            Statement::Select(select) => self.run_select(&select),
            Statement::CreateTable(create) => self.run_create_table(create),
            Statement::Insert(insert) => self.run_insert(&insert),
            Statement::DropTable(drop) => self.run_drop_table(&drop),
            Statement::Show(show) => self.run_show(&show),
            Statement::Import(import) => self.run_import(&import),
        }
    }

    fn run_select(&mut self, stmt: &SelectStmt) -> Result<StatementOutput, SessionError> {
        let catalog: &Catalog = self.catalog;

        let Some(logic) = create_plan(stmt)? else {
            // nothing to scan; EXPLAIN still shows the statement
            debug!("statement has no plan");
            return Ok(StatementOutput {
                rows: vec![],
                explain: self
                    .options
                    .explain
                    .then(|| format!("{}\n", stmt.sql_text())),
            });
        };
        let mut physic = optimize(&logic, OptimizeOption::O2);

        let explain = self
            .options
            .explain
            .then(|| format!("{}\nPhysical Plan\n{}", stmt.sql_text(), physic.explain()));

        // projection evaluators over the bound selection list
        let mut projections: Vec<ExprEval> = Vec::with_capacity(stmt.selection.len());
        for expr in &stmt.selection {
            let mut eval = ExprEval::new();
            eval.open(expr)?;
            projections.push(eval);
        }

        let ctx = ExecContext::new(catalog);
        physic.open(&ctx)?;
        let mut rows: Vec<Row> = vec![];
        let exec_result = physic.exec(&ctx, &mut |row| {
            if let Some(source) = row {
                let projected: Row = projections
                    .iter_mut()
                    .map(|eval| eval.exec(Some(source)))
                    .collect();
                rows.push(projected);
            }
        });
        // close on every path; evaluators release through Drop as well
        physic.close();
        for mut eval in projections {
            eval.close();
        }
        exec_result?;

        debug!(rows = rows.len(), "statement executed");
        Ok(StatementOutput { rows, explain })
    }

    fn run_create_table(&mut self, stmt: CreateTableStmt) -> Result<StatementOutput, SessionError> {
        if stmt.if_not_exists && self.catalog.try_table(&stmt.table_name).is_some() {
            return Ok(StatementOutput::default());
        }
        let columns: Vec<ColumnDef> = stmt
            .columns
            .into_iter()
            .enumerate()
            .map(|(ordinal, col)| {
                ColumnDef::new(col.name, col.sql_type, ordinal).with_nullable(col.nullable)
            })
            .collect();
        self.catalog.create_table(&stmt.table_name, columns, None)?;
        Ok(StatementOutput::default())
    }

    fn run_insert(&mut self, stmt: &InsertStmt) -> Result<StatementOutput, SessionError> {
        // binding reduced every value to a typed literal
        let rows: Vec<Row> = stmt
            .rows
            .iter()
            .map(|tuple| {
                tuple
                    .iter()
                    .map(|expr| match &expr.kind {
                        ExprKind::Const { value } => value.clone(),
                        _ => Datum::Null,
                    })
                    .collect()
            })
            .collect();
        self.catalog.insert_rows(&stmt.table_name, &rows)?;
        debug!(table = %stmt.table_name, rows = rows.len(), "rows inserted");
        Ok(StatementOutput::default())
    }

    fn run_drop_table(&mut self, stmt: &DropTableStmt) -> Result<StatementOutput, SessionError> {
        if stmt.if_exists && self.catalog.try_table(&stmt.table_name).is_none() {
            return Ok(StatementOutput::default());
        }
        self.catalog.drop_table(&stmt.table_name)?;
        Ok(StatementOutput::default())
    }

    fn run_show(&mut self, stmt: &ShowStmt) -> Result<StatementOutput, SessionError> {
        let rows = match stmt.kind {
            ShowKind::Tables => self
                .catalog
                .table_names()
                .into_iter()
                .map(|name| Row::from_values(vec![Datum::String(name.to_string())]))
                .collect(),
            ShowKind::Columns => {
                let name = stmt.name.as_deref().unwrap_or_default();
                let table = self
                    .catalog
                    .try_table(name)
                    .ok_or_else(|| SemanticError::TableNotFound(name.to_string()))?;
                table
                    .columns_in_order()
                    .into_iter()
                    .map(|col| {
                        Row::from_values(vec![
                            Datum::String(col.name.clone()),
                            Datum::String(col.sql_type.name().to_string()),
                            Datum::Bool(col.nullable),
                        ])
                    })
                    .collect()
            }
        };
        Ok(StatementOutput {
            rows,
            explain: None,
        })
    }

    fn run_import(&mut self, stmt: &ImportStmt) -> Result<StatementOutput, SessionError> {
        let contents = fs::read_to_string(&stmt.file_path)
            .map_err(|err| SessionError::Import(format!("{}: {err}", stmt.file_path)))?;
        let table = self
            .catalog
            .try_table(&stmt.table_name)
            .ok_or_else(|| SemanticError::TableNotFound(stmt.table_name.clone()))?;

        let delimiter = import::delimiter_for(&stmt.file_path, stmt.format);
        let rows = import::parse_rows(table, &contents, delimiter)
            .map_err(|err| SessionError::Import(err.to_string()))?;

        self.catalog.insert_rows(&stmt.table_name, &rows)?;
        debug!(
            table = %stmt.table_name,
            rows = rows.len(),
            file = %stmt.file_path,
            "file imported"
        );
        Ok(StatementOutput::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.init();
        catalog
    }

    #[test]
    fn test_rows_are_deep_copies() {
        let mut catalog = fixture_catalog();
        let output = {
            let mut session = Session::new(&mut catalog, SessionOptions::default());
            session.run("select a1 from a;").unwrap()
        };
        // rows remain valid and the catalog is untouched
        assert_eq!(output.rows.len(), 3);
        assert_eq!(catalog.try_table("a").unwrap().distributions[0].heap.len(), 3);
    }

    #[test]
    fn test_explain_off_by_default() {
        let mut catalog = fixture_catalog();
        let mut session = Session::new(&mut catalog, SessionOptions::default());
        let output = session.run("select a1 from a;").unwrap();
        assert!(output.explain.is_none());
    }

    #[test]
    fn test_explain_text_shape() {
        let mut catalog = fixture_catalog();
        let mut session = Session::new(&mut catalog, SessionOptions { explain: true });
        let output = session.run("select a1 from a where a1 <= 1;").unwrap();
        let explain = output.explain.unwrap();
        assert_eq!(
            explain,
            "select a1 FROM a WHERE a1 <= 1\nPhysical Plan\nPhysicScan\n"
        );
    }
}
