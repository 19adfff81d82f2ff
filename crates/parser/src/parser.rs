// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQL parser
//!
//! Recursive-descent parser over the lexer's token stream, producing a
//! [`Statement`]. Besides SELECT it covers the catalog-facing statements:
//! `CREATE TABLE`, `INSERT INTO ... VALUES`, `DROP TABLE`, `SHOW TABLES`,
//! `SHOW COLUMNS` / `DESCRIBE`, and `IMPORT INTO ... FROM 'file'`.
//!
//! Operator precedence, loosest first: `OR`, `AND`, comparisons, `+ -`,
//! `* /`, primary.

use andb_catalog::{Datum, SqlType};
use andb_ir::{
    BaseTableRef, BinOp, ColumnDefinition, CreateTableStmt, DropTableStmt, Expr, ImportFormat,
    ImportStmt, InsertStmt, SelectStmt, ShowKind, ShowStmt, Statement, TableRef,
};

use crate::error::{Location, ParserError, ParserResult};
use crate::lexer::{Keyword, Lexer, Symbol, Token};

/// Parses one `;`-terminated (or bare) statement.
pub fn parse_statement(sql: &str) -> ParserResult<Statement> {
    let tokens = Lexer::new(sql).tokenize()?;
    Parser::new(tokens).parse_one_statement()
}

/// [`parse_statement`], insisting on a SELECT.
pub fn parse_select(sql: &str) -> ParserResult<SelectStmt> {
    let tokens = Lexer::new(sql).tokenize()?;
    let mut parser = Parser::new(tokens);
    parser.expect_keyword(Keyword::Select)?;
    let stmt = parser.parse_select_statement()?;
    parser.expect_end()?;
    Ok(stmt)
}

/// Token-stream parser.
pub struct Parser {
    tokens: Vec<(Token, Location)>,
    index: usize,
}

impl Parser {
    pub fn new(tokens: Vec<(Token, Location)>) -> Self {
        Self { tokens, index: 0 }
    }

    /// Dispatches on the statement's leading keyword.
    pub fn parse_one_statement(&mut self) -> ParserResult<Statement> {
        let stmt = match self.peek_token(0) {
            Some(Token::Keyword(Keyword::Select)) => {
                self.advance(1);
                Statement::Select(self.parse_select_statement()?)
            }
            Some(Token::Keyword(Keyword::Create)) => {
                self.advance(1);
                Statement::CreateTable(self.parse_create_table()?)
            }
            Some(Token::Keyword(Keyword::Insert)) => {
                self.advance(1);
                Statement::Insert(self.parse_insert()?)
            }
            Some(Token::Keyword(Keyword::Drop)) => {
                self.advance(1);
                Statement::DropTable(self.parse_drop_table()?)
            }
            Some(Token::Keyword(Keyword::Show)) => {
                self.advance(1);
                Statement::Show(self.parse_show()?)
            }
            Some(Token::Keyword(Keyword::Describe)) => {
                self.advance(1);
                let name = self.expect_ident()?;
                Statement::Show(ShowStmt {
                    kind: ShowKind::Columns,
                    name: Some(name),
                })
            }
            Some(Token::Keyword(Keyword::Import)) => {
                self.advance(1);
                Statement::Import(self.parse_import()?)
            }
            _ => return self.unexpected("a statement"),
        };
        self.expect_end()?;
        Ok(stmt)
    }

    /// `SELECT selection [FROM from] [WHERE predicate]`
    /// (the SELECT keyword is already consumed)
    pub fn parse_select_statement(&mut self) -> ParserResult<SelectStmt> {
        let mut stmt = SelectStmt::new();
        stmt.selection = self.parse_selection_list()?;

        if self.next_if_keyword(Keyword::From) {
            stmt.from = self.parse_from_list()?;
        }
        if self.next_if_keyword(Keyword::Where) {
            stmt.where_clause = Some(self.parse_expr()?);
        }
        Ok(stmt)
    }

    /// `TABLE [IF NOT EXISTS] name (col type [NOT NULL | NULL], ...)`
    fn parse_create_table(&mut self) -> ParserResult<CreateTableStmt> {
        self.expect_keyword(Keyword::Table)?;
        let if_not_exists = if self.next_if_keyword(Keyword::If) {
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
            true
        } else {
            false
        };
        let table_name = self.expect_ident()?;

        self.expect_symbol(Symbol::LParen)?;
        let mut columns = vec![self.parse_column_definition()?];
        while self.next_if_symbol(Symbol::Comma) {
            columns.push(self.parse_column_definition()?);
        }
        self.expect_symbol(Symbol::RParen)?;

        Ok(CreateTableStmt {
            table_name,
            columns,
            if_not_exists,
        })
    }

    fn parse_column_definition(&mut self) -> ParserResult<ColumnDefinition> {
        let name = self.expect_ident()?;
        let sql_type = self.parse_type_name()?;
        let nullable = if self.next_if_keyword(Keyword::Not) {
            self.expect_keyword(Keyword::Null)?;
            false
        } else {
            self.next_if_keyword(Keyword::Null);
            true
        };
        Ok(ColumnDefinition {
            name,
            sql_type,
            nullable,
        })
    }

    /// Type names are ordinary identifiers; the closed set maps here.
    fn parse_type_name(&mut self) -> ParserResult<SqlType> {
        let Some(Token::Ident(name)) = self.peek_token(0) else {
            return self.unexpected("a type name");
        };
        let sql_type = match name.as_str() {
            "integer" | "int" => SqlType::Integer,
            "long" | "bigint" => SqlType::Long,
            "numeric" => SqlType::Numeric,
            "double" => SqlType::Double,
            "bool" | "boolean" => SqlType::Bool,
            "datetime" => SqlType::DateTime,
            "varchar" => SqlType::Varchar,
            "char" => SqlType::Char,
            _ => return self.unexpected("a type name"),
        };
        self.advance(1);
        Ok(sql_type)
    }

    /// `INTO name VALUES (expr, ...) [, (expr, ...)]*`
    fn parse_insert(&mut self) -> ParserResult<InsertStmt> {
        self.expect_keyword(Keyword::Into)?;
        let table_name = self.expect_ident()?;
        self.expect_keyword(Keyword::Values)?;

        let mut rows = vec![self.parse_values_tuple()?];
        while self.next_if_symbol(Symbol::Comma) {
            rows.push(self.parse_values_tuple()?);
        }
        Ok(InsertStmt { table_name, rows })
    }

    fn parse_values_tuple(&mut self) -> ParserResult<Vec<Expr>> {
        self.expect_symbol(Symbol::LParen)?;
        let mut values = vec![self.parse_expr()?];
        while self.next_if_symbol(Symbol::Comma) {
            values.push(self.parse_expr()?);
        }
        self.expect_symbol(Symbol::RParen)?;
        Ok(values)
    }

    /// `TABLE [IF EXISTS] name`
    fn parse_drop_table(&mut self) -> ParserResult<DropTableStmt> {
        self.expect_keyword(Keyword::Table)?;
        let if_exists = if self.next_if_keyword(Keyword::If) {
            self.expect_keyword(Keyword::Exists)?;
            true
        } else {
            false
        };
        let table_name = self.expect_ident()?;
        Ok(DropTableStmt {
            table_name,
            if_exists,
        })
    }

    /// `TABLES` or `COLUMNS name`
    fn parse_show(&mut self) -> ParserResult<ShowStmt> {
        if self.next_if_keyword(Keyword::Tables) {
            return Ok(ShowStmt {
                kind: ShowKind::Tables,
                name: None,
            });
        }
        if self.next_if_keyword(Keyword::Columns) {
            let name = self.expect_ident()?;
            return Ok(ShowStmt {
                kind: ShowKind::Columns,
                name: Some(name),
            });
        }
        self.unexpected("TABLES or COLUMNS")
    }

    /// `INTO name FROM 'path'`
    fn parse_import(&mut self) -> ParserResult<ImportStmt> {
        self.expect_keyword(Keyword::Into)?;
        let table_name = self.expect_ident()?;
        self.expect_keyword(Keyword::From)?;
        match self.peek_token(0) {
            Some(Token::StringLit(path)) => {
                let file_path = path.clone();
                self.advance(1);
                Ok(ImportStmt {
                    table_name,
                    file_path,
                    format: ImportFormat::Auto,
                })
            }
            _ => self.unexpected("a quoted file path"),
        }
    }

    /// Consumes an optional trailing `;` and requires end of input.
    fn expect_end(&mut self) -> ParserResult<()> {
        self.next_if_symbol(Symbol::Semicolon);
        match self.peek() {
            None => Ok(()),
            Some((token, location)) => Err(ParserError::UnexpectedToken {
                found: token.to_string(),
                expected: Some("end of statement"),
                location: *location,
            }),
        }
    }

    fn parse_selection_list(&mut self) -> ParserResult<Vec<Expr>> {
        let mut items = vec![self.parse_selection_item()?];
        while self.next_if_symbol(Symbol::Comma) {
            items.push(self.parse_selection_item()?);
        }
        Ok(items)
    }

    /// `*`, `alias.*`, or an expression with an optional alias.
    fn parse_selection_item(&mut self) -> ParserResult<Expr> {
        if self.next_if_symbol(Symbol::Star) {
            return Ok(Expr::star(None));
        }
        // alias.* needs two tokens of lookahead before expression parsing
        if let (Some(Token::Ident(alias)), Some(Token::Symbol(Symbol::Period))) =
            (self.peek_token(0), self.peek_token(1))
            && self.peek_token(2) == Some(&Token::Symbol(Symbol::Star))
        {
            let alias = alias.clone();
            self.advance(3);
            return Ok(Expr::star(Some(alias)));
        }

        let expr = self.parse_expr()?;
        if self.next_if_keyword(Keyword::As) {
            let alias = self.expect_ident()?;
            return Ok(expr.with_alias(alias));
        }
        // bare alias: `select a1 x from a`
        if let Some(Token::Ident(alias)) = self.peek_token(0) {
            let alias = alias.clone();
            self.advance(1);
            return Ok(expr.with_alias(alias));
        }
        Ok(expr)
    }

    fn parse_from_list(&mut self) -> ParserResult<Vec<TableRef>> {
        let mut tables = vec![self.parse_table_ref()?];
        while self.next_if_symbol(Symbol::Comma) {
            tables.push(self.parse_table_ref()?);
        }
        Ok(tables)
    }

    /// `table [AS? alias]`
    fn parse_table_ref(&mut self) -> ParserResult<TableRef> {
        let name = self.expect_ident()?;
        let mut tref = BaseTableRef::new(name);
        if self.next_if_keyword(Keyword::As) {
            tref = tref.with_alias(self.expect_ident()?);
        } else if let Some(Token::Ident(alias)) = self.peek_token(0) {
            let alias = alias.clone();
            self.advance(1);
            tref = tref.with_alias(alias);
        }
        Ok(TableRef::Base(tref))
    }

    pub fn parse_expr(&mut self) -> ParserResult<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> ParserResult<Expr> {
        let mut left = self.parse_and()?;
        while self.next_if_keyword(Keyword::Or) {
            let right = self.parse_and()?;
            left = Expr::binary(BinOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> ParserResult<Expr> {
        let mut left = self.parse_comparison()?;
        while self.next_if_keyword(Keyword::And) {
            let right = self.parse_comparison()?;
            left = Expr::binary(BinOp::And, left, right);
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> ParserResult<Expr> {
        let left = self.parse_additive()?;
        let op = match self.peek_token(0) {
            Some(Token::Symbol(Symbol::Eq)) => BinOp::Equal,
            Some(Token::Symbol(Symbol::Neq)) => BinOp::Neq,
            Some(Token::Symbol(Symbol::Lt)) => BinOp::Less,
            Some(Token::Symbol(Symbol::LtEq)) => BinOp::Leq,
            Some(Token::Symbol(Symbol::Gt)) => BinOp::Great,
            Some(Token::Symbol(Symbol::GtEq)) => BinOp::Geq,
            _ => return Ok(left),
        };
        self.advance(1);
        let right = self.parse_additive()?;
        Ok(Expr::binary(op, left, right))
    }

    fn parse_additive(&mut self) -> ParserResult<Expr> {
        let mut left = self.parse_term()?;
        loop {
            let op = if self.next_if_symbol(Symbol::Plus) {
                BinOp::Add
            } else if self.next_if_symbol(Symbol::Minus) {
                BinOp::Sub
            } else {
                return Ok(left);
            };
            let right = self.parse_term()?;
            left = Expr::binary(op, left, right);
        }
    }

    fn parse_term(&mut self) -> ParserResult<Expr> {
        let mut left = self.parse_primary()?;
        loop {
            let op = if self.next_if_symbol(Symbol::Star) {
                BinOp::Mul
            } else if self.next_if_symbol(Symbol::Slash) {
                BinOp::Div
            } else {
                return Ok(left);
            };
            let right = self.parse_primary()?;
            left = Expr::binary(op, left, right);
        }
    }

    fn parse_primary(&mut self) -> ParserResult<Expr> {
        let Some((token, location)) = self.peek() else {
            return Err(ParserError::UnexpectedEof {
                location: self.eof_location(),
            });
        };
        let location = *location;
        match token.clone() {
            Token::Number(text) => {
                self.advance(1);
                Ok(Expr::constant(parse_number(&text, location)?))
            }
            Token::StringLit(text) => {
                self.advance(1);
                Ok(Expr::constant(Datum::String(text)))
            }
            Token::Keyword(Keyword::True) => {
                self.advance(1);
                Ok(Expr::constant(Datum::Bool(true)))
            }
            Token::Keyword(Keyword::False) => {
                self.advance(1);
                Ok(Expr::constant(Datum::Bool(false)))
            }
            Token::Keyword(Keyword::Null) => {
                self.advance(1);
                Ok(Expr::constant(Datum::Null))
            }
            Token::Symbol(Symbol::LParen) => {
                self.advance(1);
                let inner = self.parse_expr()?;
                self.expect_symbol(Symbol::RParen)?;
                Ok(inner)
            }
            // negative literal
            Token::Symbol(Symbol::Minus) => {
                self.advance(1);
                match self.peek() {
                    Some((Token::Number(text), location)) => {
                        let negated = format!("-{text}");
                        let location = *location;
                        self.advance(1);
                        Ok(Expr::constant(parse_number(&negated, location)?))
                    }
                    _ => self.unexpected("a number after '-'"),
                }
            }
            Token::Ident(name) => {
                self.advance(1);
                if self.next_if_symbol(Symbol::Period) {
                    let col = self.expect_ident()?;
                    Ok(Expr::col_named(col, Some(name)))
                } else {
                    Ok(Expr::col_named(name, None))
                }
            }
            other => Err(ParserError::UnexpectedToken {
                found: other.to_string(),
                expected: Some("an expression"),
                location,
            }),
        }
    }

    // -- token-stream plumbing --------------------------------------------

    fn peek(&self) -> Option<&(Token, Location)> {
        self.tokens.get(self.index)
    }

    fn peek_token(&self, lookahead: usize) -> Option<&Token> {
        self.tokens.get(self.index + lookahead).map(|(t, _)| t)
    }

    fn advance(&mut self, n: usize) {
        self.index += n;
    }

    fn eof_location(&self) -> Location {
        self.tokens
            .last()
            .map(|(_, loc)| *loc)
            .unwrap_or_default()
    }

    fn next_if_symbol(&mut self, symbol: Symbol) -> bool {
        if self.peek_token(0) == Some(&Token::Symbol(symbol)) {
            self.advance(1);
            true
        } else {
            false
        }
    }

    fn next_if_keyword(&mut self, keyword: Keyword) -> bool {
        if self.peek_token(0) == Some(&Token::Keyword(keyword)) {
            self.advance(1);
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> ParserResult<()> {
        if self.next_if_keyword(keyword) {
            return Ok(());
        }
        self.unexpected("a keyword")
    }

    fn expect_symbol(&mut self, symbol: Symbol) -> ParserResult<()> {
        if self.next_if_symbol(symbol) {
            return Ok(());
        }
        self.unexpected(symbol.text())
    }

    fn expect_ident(&mut self) -> ParserResult<String> {
        if let Some(Token::Ident(name)) = self.peek_token(0) {
            let name = name.clone();
            self.advance(1);
            return Ok(name);
        }
        self.unexpected("an identifier")
    }

    fn unexpected<T>(&self, expected: &'static str) -> ParserResult<T> {
        match self.peek() {
            Some((token, location)) => Err(ParserError::UnexpectedToken {
                found: token.to_string(),
                expected: Some(expected),
                location: *location,
            }),
            None => Err(ParserError::UnexpectedEof {
                location: self.eof_location(),
            }),
        }
    }
}

fn parse_number(text: &str, location: Location) -> ParserResult<Datum> {
    if text.contains('.') {
        return text
            .parse::<f64>()
            .map(Datum::Double)
            .map_err(|_| ParserError::InvalidNumber {
                literal: text.to_string(),
                location,
            });
    }
    if let Ok(v) = text.parse::<i32>() {
        return Ok(Datum::Int32(v));
    }
    text.parse::<i64>()
        .map(Datum::Int64)
        .map_err(|_| ParserError::InvalidNumber {
            literal: text.to_string(),
            location,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use andb_ir::ExprKind;

    #[test]
    fn test_basic_select() {
        let stmt = parse_select("select a1 from a where a1 <= 1;").unwrap();
        assert_eq!(stmt.selection.len(), 1);
        assert_eq!(stmt.from.len(), 1);
        assert!(stmt.where_clause.is_some());
        assert_eq!(stmt.sql_text(), "select a1 FROM a WHERE a1 <= 1");
    }

    #[test]
    fn test_statement_dispatch() {
        assert!(matches!(
            parse_statement("select 1 from a;").unwrap(),
            Statement::Select(_)
        ));
        assert!(matches!(
            parse_statement("show tables;").unwrap(),
            Statement::Show(_)
        ));
    }

    #[test]
    fn test_case_and_whitespace_insensitive_text() {
        let a = parse_select("select a1 from a where a1 <= 1;").unwrap();
        let b = parse_select("SELECT  A1\nFROM  A  WHERE  A1  <=  1 ;").unwrap();
        assert_eq!(a.sql_text(), b.sql_text());
    }

    #[test]
    fn test_star_and_qualified_star() {
        let stmt = parse_select("select *, t.* from a t").unwrap();
        assert!(matches!(
            stmt.selection[0].kind,
            ExprKind::Star { tab_alias: None }
        ));
        match &stmt.selection[1].kind {
            ExprKind::Star {
                tab_alias: Some(alias),
            } => assert_eq!(alias, "t"),
            other => panic!("expected qualified star, got {other:?}"),
        }
        match &stmt.from[0] {
            TableRef::Base(b) => assert_eq!(b.alias(), "t"),
            other => panic!("expected base table, got {other:?}"),
        }
    }

    #[test]
    fn test_precedence() {
        let stmt = parse_select("select 1 + 2 * 3 from a").unwrap();
        let e = &stmt.selection[0];
        match &e.kind {
            ExprKind::Bin { op: BinOp::Add, .. } => {}
            other => panic!("expected Add at root, got {other:?}"),
        }
        match &e.right().kind {
            ExprKind::Bin { op: BinOp::Mul, .. } => {}
            other => panic!("expected Mul on the right, got {other:?}"),
        }
    }

    #[test]
    fn test_logical_precedence() {
        let stmt = parse_select("select a1 from a where a1 = 1 or a2 = 2 and a3 = 3").unwrap();
        match &stmt.where_clause.as_ref().unwrap().kind {
            ExprKind::Bin { op: BinOp::Or, .. } => {}
            other => panic!("expected Or at root, got {other:?}"),
        }
    }

    #[test]
    fn test_parenthesized() {
        let stmt = parse_select("select (1 + 2) * 3 from a").unwrap();
        match &stmt.selection[0].kind {
            ExprKind::Bin { op: BinOp::Mul, .. } => {}
            other => panic!("expected Mul at root, got {other:?}"),
        }
    }

    #[test]
    fn test_qualified_column_and_aliases() {
        let stmt = parse_select("select t.a1 as x from a as t").unwrap();
        let e = &stmt.selection[0];
        assert_eq!(e.alias.as_deref(), Some("x"));
        match &e.kind {
            ExprKind::Col {
                colname, tabname, ..
            } => {
                assert_eq!(colname.as_deref(), Some("a1"));
                assert_eq!(tabname.as_deref(), Some("t"));
            }
            other => panic!("expected column, got {other:?}"),
        }
    }

    #[test]
    fn test_literals() {
        let stmt =
            parse_select("select 1, 9999999999, 1.5, 'x', true, false, null from a").unwrap();
        let values: Vec<&Datum> = stmt
            .selection
            .iter()
            .map(|e| match &e.kind {
                ExprKind::Const { value } => value,
                other => panic!("expected constant, got {other:?}"),
            })
            .collect();
        assert_eq!(values[0], &Datum::Int32(1));
        assert_eq!(values[1], &Datum::Int64(9_999_999_999));
        assert_eq!(values[2], &Datum::Double(1.5));
        assert_eq!(values[3], &Datum::String("x".into()));
        assert_eq!(values[4], &Datum::Bool(true));
        assert_eq!(values[5], &Datum::Bool(false));
        assert_eq!(values[6], &Datum::Null);
    }

    #[test]
    fn test_multi_table_from_parses() {
        // the binder refuses this later; the grammar accepts it
        let stmt = parse_select("select a1 from a, b").unwrap();
        assert_eq!(stmt.from.len(), 2);
    }

    #[test]
    fn test_error_carries_location() {
        let err = parse_select("select a1 from").unwrap_err();
        assert!(matches!(err, ParserError::UnexpectedEof { .. }));

        let err = parse_select("select from a").unwrap_err();
        let loc = err.location();
        assert_eq!(loc.line, 1);
        assert_eq!(loc.column, 8);
    }

    #[test]
    fn test_garbage_after_statement_rejected() {
        let err = parse_select("select a1 from a extra garbage").unwrap_err();
        assert!(matches!(err, ParserError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_create_table() {
        let stmt =
            parse_statement("create table t (id integer not null, v double, s char null);")
                .unwrap();
        let Statement::CreateTable(create) = stmt else {
            panic!("expected CREATE TABLE");
        };
        assert_eq!(create.table_name, "t");
        assert!(!create.if_not_exists);
        assert_eq!(
            create.columns,
            vec![
                ColumnDefinition {
                    name: "id".into(),
                    sql_type: SqlType::Integer,
                    nullable: false,
                },
                ColumnDefinition {
                    name: "v".into(),
                    sql_type: SqlType::Double,
                    nullable: true,
                },
                ColumnDefinition {
                    name: "s".into(),
                    sql_type: SqlType::Char,
                    nullable: true,
                },
            ]
        );
    }

    #[test]
    fn test_create_table_if_not_exists() {
        let stmt = parse_statement("create table if not exists t (i int);").unwrap();
        let Statement::CreateTable(create) = stmt else {
            panic!("expected CREATE TABLE");
        };
        assert!(create.if_not_exists);
        assert_eq!(create.columns[0].sql_type, SqlType::Integer);
    }

    #[test]
    fn test_create_table_bad_type_name() {
        let err = parse_statement("create table t (x blob);").unwrap_err();
        assert!(matches!(
            err,
            ParserError::UnexpectedToken {
                expected: Some("a type name"),
                ..
            }
        ));
    }

    #[test]
    fn test_insert_values() {
        let stmt = parse_statement("insert into t values (1, 'x'), (-2, null);").unwrap();
        let Statement::Insert(insert) = stmt else {
            panic!("expected INSERT");
        };
        assert_eq!(insert.table_name, "t");
        assert_eq!(insert.rows.len(), 2);
        match &insert.rows[1][0].kind {
            ExprKind::Const { value } => assert_eq!(value, &Datum::Int32(-2)),
            other => panic!("expected constant, got {other:?}"),
        }
    }

    #[test]
    fn test_drop_table_forms() {
        let Statement::DropTable(drop) = parse_statement("drop table t;").unwrap() else {
            panic!("expected DROP TABLE");
        };
        assert!(!drop.if_exists);

        let Statement::DropTable(drop) = parse_statement("drop table if exists t;").unwrap()
        else {
            panic!("expected DROP TABLE");
        };
        assert!(drop.if_exists);
    }

    #[test]
    fn test_show_and_describe() {
        let Statement::Show(show) = parse_statement("show tables;").unwrap() else {
            panic!("expected SHOW");
        };
        assert_eq!(show.kind, ShowKind::Tables);
        assert!(show.name.is_none());

        let Statement::Show(show) = parse_statement("show columns T;").unwrap() else {
            panic!("expected SHOW");
        };
        assert_eq!(show.kind, ShowKind::Columns);
        assert_eq!(show.name.as_deref(), Some("t"));

        let Statement::Show(show) = parse_statement("describe t;").unwrap() else {
            panic!("expected SHOW");
        };
        assert_eq!(show.kind, ShowKind::Columns);
    }

    #[test]
    fn test_import() {
        let Statement::Import(import) =
            parse_statement("import into t from '/data/t.tbl';").unwrap()
        else {
            panic!("expected IMPORT");
        };
        assert_eq!(import.table_name, "t");
        assert_eq!(import.file_path, "/data/t.tbl");
        assert_eq!(import.format, ImportFormat::Auto);
    }

    #[test]
    fn test_negative_literal_min_value() {
        let stmt = parse_select("select -2147483648 from a").unwrap();
        match &stmt.selection[0].kind {
            ExprKind::Const { value } => assert_eq!(value, &Datum::Int32(i32::MIN)),
            other => panic!("expected constant, got {other:?}"),
        }
    }

    #[test]
    fn test_minus_binds_as_subtraction_after_a_primary() {
        let stmt = parse_select("select a1 - 1 from a").unwrap();
        match &stmt.selection[0].kind {
            ExprKind::Bin { op: BinOp::Sub, .. } => {}
            other => panic!("expected subtraction, got {other:?}"),
        }
    }
}
