// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Binder
//!
//! Semantic analysis of a [`SelectStmt`] against the catalog. Binding runs
//! FROM first, then the selection list, then WHERE, and stops at the first
//! error:
//!
//! - FROM: duplicate-alias detection, table resolution (scope chain first,
//!   then the catalog), JOIN refusal
//! - selection: `*` / `alias.*` expansion into cached column references,
//!   then post-order expression binding
//! - WHERE: expression binding plus the Bool type check
//!
//! Expression binding resolves column names to ordinals and types and picks
//! the kernel for every binary operator from the dispatch table.

use andb_catalog::{Catalog, ColumnDef, DataType, Datum, SqlType, normalize_name};
use andb_ir::{
    BaseTableRef, CreateTableStmt, Expr, ExprKind, InsertStmt, SelectStmt, Statement, TableRef,
    TreeNode,
};
use tracing::debug;

use crate::dispatch;
use crate::error::{SemanticError, SemanticResult};
use crate::scope::{Scope, TableSymbol};

/// Maps a declared SQL type to its runtime representation for evaluation.
/// Character varying and date/time columns are declared-only today.
fn runtime_type(sql_type: SqlType) -> SemanticResult<DataType> {
    match sql_type {
        SqlType::Integer => Ok(DataType::Int32),
        SqlType::Long => Ok(DataType::Int64),
        SqlType::Bool => Ok(DataType::Bool),
        SqlType::Double => Ok(DataType::Double),
        SqlType::Char => Ok(DataType::String),
        other => Err(SemanticError::UnsupportedType(other.name())),
    }
}

/// Maps a declared SQL type to the datum stored for it. Total: every
/// declared type stores something (numerics as doubles, datetimes as Int64
/// ticks), even the ones the evaluator cannot operate on yet.
pub fn storage_type(sql_type: SqlType) -> DataType {
    match sql_type {
        SqlType::Integer => DataType::Int32,
        SqlType::Long => DataType::Int64,
        SqlType::Numeric => DataType::Double,
        SqlType::Double => DataType::Double,
        SqlType::Bool => DataType::Bool,
        SqlType::DateTime => DataType::Int64,
        SqlType::Varchar | SqlType::Char => DataType::String,
    }
}

/// Widens an inserted literal to the column's storage type where the
/// widening is lossless. `None` means no conversion applies.
fn widen_literal(value: &Datum, target: DataType) -> Option<Datum> {
    match (value, target) {
        (Datum::Int32(v), DataType::Int64) => Some(Datum::Int64(i64::from(*v))),
        (Datum::Int32(v), DataType::Double) => Some(Datum::Double(f64::from(*v))),
        (Datum::Int64(v), DataType::Double) => Some(Datum::Double(*v as f64)),
        _ => None,
    }
}

/// Scope-chained binder over a catalog.
pub struct Binder<'a> {
    catalog: &'a Catalog,
    /// Scope chain, innermost last. One scope is exercised today; the chain
    /// exists for subqueries.
    scopes: Vec<Scope>,
    /// Reserved: numbering for derived tables.
    subquery_counter: u32,
    /// Post-binding expression ids, assigned in binding order.
    value_id_counter: i32,
}

impl<'a> Binder<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            scopes: vec![Scope::new()],
            subquery_counter: 0,
            value_id_counter: 1,
        }
    }

    /// Binds any statement in place. SELECT gets the full treatment; the
    /// catalog-facing statements get their names and values checked so the
    /// driver can execute them without re-validating.
    pub fn bind_statement(&mut self, stmt: &mut Statement) -> SemanticResult<()> {
        match stmt {
            Statement::Select(select) => self.bind(select),
            Statement::CreateTable(create) => self.bind_create_table(create),
            Statement::Insert(insert) => self.bind_insert(insert),
            Statement::DropTable(drop) => {
                if !drop.if_exists && self.catalog.try_table(&drop.table_name).is_none() {
                    return Err(SemanticError::TableNotFound(drop.table_name.clone()));
                }
                Ok(())
            }
            Statement::Show(show) => {
                if let Some(name) = &show.name
                    && self.catalog.try_table(name).is_none()
                {
                    return Err(SemanticError::TableNotFound(name.clone()));
                }
                Ok(())
            }
            Statement::Import(import) => {
                if self.catalog.try_table(&import.table_name).is_none() {
                    return Err(SemanticError::TableNotFound(import.table_name.clone()));
                }
                Ok(())
            }
        }
    }

    fn bind_create_table(&mut self, create: &mut CreateTableStmt) -> SemanticResult<()> {
        if !create.if_not_exists && self.catalog.try_table(&create.table_name).is_some() {
            return Err(SemanticError::Catalog(
                andb_catalog::CatalogError::DuplicateTable(create.table_name.clone()),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for column in &create.columns {
            if !seen.insert(normalize_name(&column.name)) {
                return Err(SemanticError::Catalog(
                    andb_catalog::CatalogError::DuplicateColumn(
                        column.name.clone(),
                        create.table_name.clone(),
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Checks each VALUES tuple against the table's columns: arity, literal
    /// shape, and type — widening integer literals into wider columns.
    fn bind_insert(&mut self, insert: &mut InsertStmt) -> SemanticResult<()> {
        let table = self
            .catalog
            .try_table(&insert.table_name)
            .ok_or_else(|| SemanticError::TableNotFound(insert.table_name.clone()))?;
        let columns: Vec<ColumnDef> = table.columns_in_order().into_iter().cloned().collect();

        for tuple in &mut insert.rows {
            if tuple.len() != columns.len() {
                return Err(SemanticError::ColumnCountMismatch {
                    table: insert.table_name.clone(),
                    expected: columns.len(),
                    found: tuple.len(),
                });
            }
            for (expr, column) in tuple.iter_mut().zip(&columns) {
                let ExprKind::Const { value } = &mut expr.kind else {
                    return Err(SemanticError::NonConstantValue(column.name.clone()));
                };
                let expected = storage_type(column.sql_type);
                if value.is_null() || value.data_type() == expected {
                    expr.ty = value.data_type();
                    continue;
                }
                match widen_literal(value, expected) {
                    Some(widened) => {
                        *value = widened;
                        expr.ty = expected;
                    }
                    None => {
                        return Err(SemanticError::TypeMismatch {
                            column: column.name.clone(),
                            expected,
                            found: value.data_type(),
                        });
                    }
                }
            }
        }
        debug!(
            table = %insert.table_name,
            rows = insert.rows.len(),
            "insert bound"
        );
        Ok(())
    }

    /// Binds a statement in place.
    pub fn bind(&mut self, stmt: &mut SelectStmt) -> SemanticResult<()> {
        self.bind_from(stmt)?;
        self.bind_selections(stmt)?;
        self.bind_where(stmt)?;
        debug!(
            tables = stmt.from.len(),
            selections = stmt.selection.len(),
            "statement bound"
        );
        Ok(())
    }

    fn current_scope(&self) -> &Scope {
        self.scopes.last().expect("binder always has a scope")
    }

    fn current_scope_mut(&mut self) -> &mut Scope {
        self.scopes.last_mut().expect("binder always has a scope")
    }

    /// Resolves a table name against the scope chain, falling back to the
    /// catalog. A catalog hit not yet in scope is entered into the current
    /// scope under the given alias.
    pub fn resolve_table(&mut self, name: &str, alias: &str) -> SemanticResult<&TableSymbol> {
        let mut found_in_scope = None;
        for (depth, scope) in self.scopes.iter().enumerate().rev() {
            if scope.find_table(alias).is_some() {
                found_in_scope = Some(depth);
                break;
            }
        }
        if let Some(depth) = found_in_scope {
            // re-borrow immutably for the return value
            return Ok(self.scopes[depth]
                .find_table(alias)
                .expect("just found in this scope"));
        }

        let tdef = self
            .catalog
            .try_table(name)
            .ok_or_else(|| SemanticError::TableNotFound(name.to_string()))?;
        let columns: Vec<ColumnDef> = tdef
            .columns_in_order()
            .into_iter()
            .cloned()
            .collect();
        let symbol = TableSymbol::new(&tdef.name, alias, columns);
        self.current_scope_mut().add_table(symbol)?;
        Ok(self
            .current_scope()
            .find_table(alias)
            .expect("just inserted"))
    }

    /// The table bound under `alias` in the current scope, if any.
    pub fn get_table_ref(&self, alias: &str) -> Option<&TableSymbol> {
        self.current_scope().find_table(alias)
    }

    /// Column lookup in the current scope. A qualified name searches only
    /// that table; an unqualified name returns the first match in FROM
    /// order.
    pub fn get_column_ref(
        &self,
        col_name: &str,
        tab_name: Option<&str>,
    ) -> Option<(&TableSymbol, &ColumnDef)> {
        self.column_in_scope(self.current_scope(), col_name, tab_name)
    }

    /// [`Self::get_column_ref`], walking the scope chain outward.
    pub fn resolve_column(
        &self,
        col_name: &str,
        tab_name: Option<&str>,
    ) -> Option<(&TableSymbol, &ColumnDef)> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| self.column_in_scope(scope, col_name, tab_name))
    }

    fn column_in_scope<'s>(
        &self,
        scope: &'s Scope,
        col_name: &str,
        tab_name: Option<&str>,
    ) -> Option<(&'s TableSymbol, &'s ColumnDef)> {
        match tab_name {
            Some(tab) => {
                let table = scope.find_table(tab)?;
                let col = table.find_column(col_name)?;
                Some((table, col))
            }
            None => scope
                .tables()
                .iter()
                .find_map(|t| t.find_column(col_name).map(|c| (t, c))),
        }
    }

    /// Fresh column references for every column of the given table, in
    /// declaration order.
    pub fn get_table_columns(&self, tab_alias: &str) -> SemanticResult<Vec<Expr>> {
        let table = self
            .get_table_ref(tab_alias)
            .ok_or_else(|| SemanticError::TableNotFound(tab_alias.to_string()))?;
        Ok(table
            .columns
            .iter()
            .map(|c| col_ref_for(table, c))
            .collect())
    }

    /// Column references for every table in scope, in FROM order.
    pub fn get_all_table_columns(&self) -> Vec<Expr> {
        self.current_scope()
            .tables()
            .iter()
            .flat_map(|t| t.columns.iter().map(|c| col_ref_for(t, c)))
            .collect()
    }

    // -- statement pieces -------------------------------------------------

    fn bind_from(&mut self, stmt: &mut SelectStmt) -> SemanticResult<()> {
        // duplicate aliases first, so `from a x, b x` reports the collision
        let mut seen = Scope::new();
        for tref in &stmt.from {
            seen.add_table(TableSymbol::new("", tref.alias(), vec![]))
                .map_err(|_| SemanticError::DuplicateAlias(tref.alias().to_string()))?;
        }

        for tref in &mut stmt.from {
            match tref {
                TableRef::Base(base) => {
                    let name = base.tab_name.clone();
                    let alias = base.alias().to_string();
                    let symbol = self.resolve_table(&name, &alias)?;
                    Self::bind_base_table(symbol, base)?;
                }
                TableRef::Query(_) => {
                    return Err(SemanticError::NotImplemented(
                        "subqueries in FROM not supported".to_string(),
                    ));
                }
            }
        }

        if stmt.from.len() > 1 {
            return Err(SemanticError::NotImplemented(
                "JOIN not supported".to_string(),
            ));
        }
        Ok(())
    }

    /// Fills a base table reference's bound caches from its symbol.
    fn bind_base_table(symbol: &TableSymbol, base: &mut BaseTableRef) -> SemanticResult<()> {
        base.columns = symbol.columns.clone();
        base.col_refs = symbol.columns.iter().map(|c| col_ref_for(symbol, c)).collect();
        Ok(())
    }

    fn bind_selections(&mut self, stmt: &mut SelectStmt) -> SemanticResult<()> {
        let mut bound = Vec::with_capacity(stmt.selection.len());
        for expr in stmt.selection.drain(..) {
            match &expr.kind {
                ExprKind::Star { tab_alias: None } => {
                    bound.extend(self.get_all_table_columns());
                }
                ExprKind::Star {
                    tab_alias: Some(alias),
                } => {
                    bound.extend(self.get_table_columns(alias)?);
                }
                _ => bound.push(expr),
            }
        }
        for expr in &mut bound {
            self.bind_expr(expr)?;
        }
        stmt.selection = bound;
        Ok(())
    }

    fn bind_where(&mut self, stmt: &mut SelectStmt) -> SemanticResult<()> {
        if let Some(predicate) = &mut stmt.where_clause {
            self.bind_expr_in_place(predicate)?;
            if predicate.ty != DataType::Bool {
                return Err(SemanticError::NotBoolean(predicate.ty));
            }
        }
        Ok(())
    }

    // -- expressions ------------------------------------------------------

    /// Binds one expression tree in place, children first.
    pub fn bind_expr(&mut self, expr: &mut Expr) -> SemanticResult<()> {
        self.bind_expr_in_place(expr)
    }

    fn bind_expr_in_place(&mut self, expr: &mut Expr) -> SemanticResult<()> {
        for child in expr.children_mut() {
            self.bind_expr_in_place(child)?;
        }
        let child_types: Vec<DataType> = expr.children().iter().map(|c| c.ty).collect();

        match &mut expr.kind {
            ExprKind::Const { value } => {
                expr.ty = value.data_type();
            }
            ExprKind::Col {
                ordinal,
                colname,
                tabname,
                column,
                ..
            } => match colname {
                Some(name) => {
                    let (symbol, coldef) = self
                        .resolve_column(name, tabname.as_deref())
                        .ok_or_else(|| SemanticError::ColumnNotFound(name.clone()))?;
                    *ordinal = coldef.ordinal as u16;
                    *colname = Some(coldef.name.clone());
                    *tabname = Some(symbol.alias.clone());
                    *column = Some(coldef.clone());
                    expr.ty = runtime_type(coldef.sql_type)?;
                }
                // ordinal-built references (tests, internal plans) carry
                // the engine's default integer type
                None => {
                    expr.ty = DataType::Int32;
                }
            },
            ExprKind::Bin { op, func } => {
                let (lty, rty) = (child_types[0], child_types[1]);
                let entry = dispatch::lookup(*op, lty, rty).ok_or(SemanticError::NoOperator {
                    op: op.symbol(),
                    left: lty,
                    right: rty,
                })?;
                *func = Some(entry.func);
                expr.ty = entry.result;
            }
            ExprKind::Star { .. } => {
                return Err(SemanticError::NotImplemented(
                    "* outside a selection list".to_string(),
                ));
            }
        }

        expr.value_id = self.value_id_counter;
        self.value_id_counter += 1;
        Ok(())
    }

    /// Reserved: numbering for derived tables in nested scopes.
    pub fn next_subquery_id(&mut self) -> u32 {
        self.subquery_counter += 1;
        self.subquery_counter
    }
}

/// A bound column reference for `column` of `table`.
fn col_ref_for(table: &TableSymbol, column: &ColumnDef) -> Expr {
    let mut expr = Expr::col_named(column.name.clone(), Some(table.alias.clone()));
    if let ExprKind::Col {
        ordinal,
        column: col_slot,
        ..
    } = &mut expr.kind
    {
        *ordinal = column.ordinal as u16;
        *col_slot = Some(column.clone());
    }
    expr
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_type_mapping() {
        assert_eq!(runtime_type(SqlType::Integer).unwrap(), DataType::Int32);
        assert_eq!(runtime_type(SqlType::Long).unwrap(), DataType::Int64);
        assert_eq!(runtime_type(SqlType::Bool).unwrap(), DataType::Bool);
        assert_eq!(runtime_type(SqlType::Double).unwrap(), DataType::Double);
        assert_eq!(runtime_type(SqlType::Char).unwrap(), DataType::String);
        assert!(matches!(
            runtime_type(SqlType::Varchar),
            Err(SemanticError::UnsupportedType("varchar"))
        ));
        assert!(matches!(
            runtime_type(SqlType::DateTime),
            Err(SemanticError::UnsupportedType("datetime"))
        ));
    }

    #[test]
    fn test_widen_literal() {
        assert_eq!(
            widen_literal(&Datum::Int32(7), DataType::Int64),
            Some(Datum::Int64(7))
        );
        assert_eq!(
            widen_literal(&Datum::Int32(7), DataType::Double),
            Some(Datum::Double(7.0))
        );
        assert_eq!(
            widen_literal(&Datum::Int64(7), DataType::Double),
            Some(Datum::Double(7.0))
        );
        // narrowing and cross-kind conversions never apply
        assert_eq!(widen_literal(&Datum::Double(7.5), DataType::Int32), None);
        assert_eq!(
            widen_literal(&Datum::String("7".into()), DataType::Int32),
            None
        );
    }

    #[test]
    fn test_col_ref_for_carries_ordinal_and_definition() {
        let symbol = TableSymbol::new(
            "t",
            "alias",
            vec![ColumnDef::new("c", SqlType::Integer, 3)],
        );
        let expr = col_ref_for(&symbol, &symbol.columns[0]);
        match &expr.kind {
            ExprKind::Col {
                ordinal,
                colname,
                tabname,
                column,
                ..
            } => {
                assert_eq!(*ordinal, 3);
                assert_eq!(colname.as_deref(), Some("c"));
                assert_eq!(tabname.as_deref(), Some("alias"));
                assert!(column.is_some());
            }
            other => panic!("expected a column reference, got {other:?}"),
        }
    }
}
