// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Expressions
//!
//! Scalar expression trees. Each [`Expr`] carries a kind (constant, column
//! reference, binary operation, select-star), an output [`DataType`], an
//! optional alias, a reserved post-binding value id, and its children.
//!
//! Binding fills in what the parser cannot know: column ordinals and types,
//! and for binary operations the concrete [`BinFn`] kernel picked from the
//! operator dispatch table. Evaluation slots are assigned when an evaluator
//! opens over the tree; they live in the evaluator, not here, so a bound
//! tree can be shared and re-evaluated freely.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;

use andb_catalog::{ColumnDef, DataType, Datum};

use crate::node::{Arity, TreeNode};

/// A bound binary-operator kernel: pure function of two datums.
pub type BinFn = fn(&Datum, &Datum) -> Datum;

/// Ordinal value of a column reference not yet resolved by name.
pub const UNRESOLVED_ORDINAL: u16 = u16::MAX;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Equal,
    Neq,
    Less,
    Leq,
    Great,
    Geq,
    And,
    Or,
}

impl BinOp {
    /// Rendering symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Equal => "=",
            BinOp::Neq => "<>",
            BinOp::Less => "<",
            BinOp::Leq => "<=",
            BinOp::Great => ">",
            BinOp::Geq => ">=",
            BinOp::And => "AND",
            BinOp::Or => "OR",
        }
    }

    /// Operators rendered inside parentheses.
    pub fn needs_parens(&self) -> bool {
        matches!(self, BinOp::Add | BinOp::Sub | BinOp::Or)
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The shape of an expression node.
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// Literal value.
    Const { value: Datum },

    /// Column reference. Name-built references start with
    /// [`UNRESOLVED_ORDINAL`]; binding resolves the ordinal, the canonical
    /// names and the column definition.
    Col {
        ordinal: u16,
        colname: Option<String>,
        tabname: Option<String>,
        schname: Option<String>,
        column: Option<ColumnDef>,
    },

    /// Binary operation; `func` is bound from the dispatch table.
    Bin { op: BinOp, func: Option<BinFn> },

    /// `*` or `alias.*`; replaced by column references during binding.
    Star { tab_alias: Option<String> },
}

impl ExprKind {
    /// Class-tag name, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            ExprKind::Const { .. } => "ConstExpr",
            ExprKind::Col { .. } => "ColExpr",
            ExprKind::Bin { .. } => "BinExpr",
            ExprKind::Star { .. } => "SelStar",
        }
    }

    /// Declared arity of this kind.
    pub fn arity(&self) -> Arity {
        match self {
            ExprKind::Const { .. } | ExprKind::Col { .. } | ExprKind::Star { .. } => Arity::N0,
            ExprKind::Bin { .. } => Arity::N2,
        }
    }
}

/// One node of a scalar expression tree.
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    /// Output type; `DataType::Null` until bound for non-constants.
    pub ty: DataType,
    pub alias: Option<String>,
    /// Reserved post-binding identifier; -1 when unassigned.
    pub value_id: i32,
    children: Vec<Expr>,
}

impl Expr {
    fn with_kind(kind: ExprKind, ty: DataType, children: Vec<Expr>) -> Self {
        debug_assert!(kind.arity().admits(children.len()));
        Self {
            kind,
            ty,
            alias: None,
            value_id: -1,
            children,
        }
    }

    /// A literal; typed immediately from the datum tag.
    pub fn constant(value: Datum) -> Self {
        let ty = value.data_type();
        Self::with_kind(ExprKind::Const { value }, ty, vec![])
    }

    /// A column reference by ordinal (no name to resolve).
    pub fn col_ordinal(ordinal: u16) -> Self {
        Self::with_kind(
            ExprKind::Col {
                ordinal,
                colname: None,
                tabname: None,
                schname: None,
                column: None,
            },
            DataType::Null,
            vec![],
        )
    }

    /// A column reference by name, optionally table-qualified.
    pub fn col_named(colname: impl Into<String>, tabname: Option<String>) -> Self {
        Self::with_kind(
            ExprKind::Col {
                ordinal: UNRESOLVED_ORDINAL,
                colname: Some(colname.into()),
                tabname,
                schname: None,
                column: None,
            },
            DataType::Null,
            vec![],
        )
    }

    /// A binary operation over two children.
    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Self::with_kind(
            ExprKind::Bin { op, func: None },
            DataType::Null,
            vec![left, right],
        )
    }

    /// `*` or `alias.*`.
    pub fn star(tab_alias: Option<String>) -> Self {
        Self::with_kind(ExprKind::Star { tab_alias }, DataType::Null, vec![])
    }

    /// Builder method: set the projection alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Left child of a binary node.
    pub fn left(&self) -> &Expr {
        &self.children[0]
    }

    /// Right child of a binary node.
    pub fn right(&self) -> &Expr {
        &self.children[1]
    }

    pub fn is_star(&self) -> bool {
        matches!(self.kind, ExprKind::Star { .. })
    }

    /// Renders the expression as SQL text.
    ///
    /// Literals use the datum rendering, column references
    /// `[schema.][table.]name`, binary operations `l op r` — parenthesized
    /// for the operators whose precedence reads ambiguously in context.
    pub fn to_sql(&self) -> String {
        match &self.kind {
            ExprKind::Const { value } => value.to_string(),
            ExprKind::Col {
                ordinal,
                colname,
                tabname,
                schname,
                ..
            } => {
                let mut s = String::new();
                if let Some(sch) = schname {
                    s.push_str(sch);
                    s.push('.');
                }
                if let Some(tab) = tabname {
                    s.push_str(tab);
                    s.push('.');
                }
                match colname {
                    Some(name) => s.push_str(name),
                    None => s.push_str(&format!("${ordinal}")),
                }
                s
            }
            ExprKind::Bin { op, .. } => {
                let body = format!("{} {} {}", self.left().to_sql(), op, self.right().to_sql());
                if op.needs_parens() {
                    format!("({body})")
                } else {
                    body
                }
            }
            ExprKind::Star { tab_alias } => match tab_alias {
                Some(alias) => format!("{alias}.*"),
                None => "*".to_string(),
            },
        }
    }
}

impl TreeNode for Expr {
    fn children(&self) -> &[Self] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Self] {
        &mut self.children
    }

    fn local_eq(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (ExprKind::Const { value: a }, ExprKind::Const { value: b }) => a == b,
            (
                ExprKind::Col {
                    ordinal: ao,
                    colname: an,
                    tabname: at,
                    ..
                },
                ExprKind::Col {
                    ordinal: bo,
                    colname: bn,
                    tabname: bt,
                    ..
                },
            ) => ao == bo && an == bn && at == bt,
            // the bound kernel follows from (op, child types); op decides
            (ExprKind::Bin { op: a, .. }, ExprKind::Bin { op: b, .. }) => a == b,
            (ExprKind::Star { tab_alias: a }, ExprKind::Star { tab_alias: b }) => a == b,
            _ => false,
        }
    }

    fn local_hash(&self) -> u64 {
        let mut h = std::collections::hash_map::DefaultHasher::new();
        mem::discriminant(&self.kind).hash(&mut h);
        match &self.kind {
            ExprKind::Const { value } => value.hash(&mut h),
            ExprKind::Col {
                ordinal,
                colname,
                tabname,
                ..
            } => {
                ordinal.hash(&mut h);
                colname.hash(&mut h);
                tabname.hash(&mut h);
            }
            ExprKind::Bin { op, .. } => op.hash(&mut h),
            ExprKind::Star { tab_alias } => tab_alias.hash(&mut h),
        }
        h.finish()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arith() -> Expr {
        // (6 - 7) + (6 * 7)
        Expr::binary(
            BinOp::Add,
            Expr::binary(
                BinOp::Sub,
                Expr::constant(Datum::Int32(6)),
                Expr::constant(Datum::Int32(7)),
            ),
            Expr::binary(
                BinOp::Mul,
                Expr::constant(Datum::Int32(6)),
                Expr::constant(Datum::Int32(7)),
            ),
        )
    }

    #[test]
    fn test_clone_equals_and_hash_law() {
        let e = arith();
        let c = e.clone();
        assert!(e.structural_eq(&c));
        assert_eq!(e.structural_hash(), c.structural_hash());
    }

    #[test]
    fn test_structural_eq_distinguishes_payload() {
        let a = Expr::constant(Datum::Int32(1));
        let b = Expr::constant(Datum::Int32(2));
        assert!(!a.structural_eq(&b));

        let lt = Expr::binary(BinOp::Less, a.clone(), b.clone());
        let le = Expr::binary(BinOp::Leq, a, b);
        assert!(!lt.structural_eq(&le));
    }

    #[test]
    fn test_rendering() {
        assert_eq!(arith().to_sql(), "((6 - 7) + (6 * 7))");

        let cmp = Expr::binary(
            BinOp::Leq,
            Expr::col_named("a1", None),
            Expr::constant(Datum::Int32(1)),
        );
        assert_eq!(cmp.to_sql(), "a1 <= 1");

        let qualified = Expr::col_named("a1", Some("a".to_string()));
        assert_eq!(qualified.to_sql(), "a.a1");

        assert_eq!(Expr::star(None).to_sql(), "*");
        assert_eq!(Expr::star(Some("t".into())).to_sql(), "t.*");
        assert_eq!(Expr::constant(Datum::Null).to_sql(), "<null>");
    }

    #[test]
    fn test_constant_is_typed_immediately() {
        assert_eq!(Expr::constant(Datum::Int32(5)).ty, DataType::Int32);
        assert_eq!(Expr::constant(Datum::Bool(true)).ty, DataType::Bool);
        assert_eq!(Expr::constant(Datum::Null).ty, DataType::Null);
    }

    #[test]
    fn test_post_order_visits_children_first() {
        let mut names = vec![];
        arith().visit_post(&mut |e: &Expr| names.push(e.kind.name()));
        assert_eq!(
            names,
            vec![
                "ConstExpr",
                "ConstExpr",
                "BinExpr",
                "ConstExpr",
                "ConstExpr",
                "BinExpr",
                "BinExpr"
            ]
        );
    }

    #[test]
    fn test_col_ordinal_starts_unbound() {
        let c = Expr::col_ordinal(2);
        match &c.kind {
            ExprKind::Col {
                ordinal, colname, ..
            } => {
                assert_eq!(*ordinal, 2);
                assert!(colname.is_none());
            }
            _ => panic!("expected ColExpr"),
        }
        assert_eq!(c.ty, DataType::Null);
    }
}
