// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Logical plan nodes
//!
//! Three node kinds: a leaf scan over one base table (optionally carrying a
//! pushed-down filter), a binary join, and a unary single-output aggregate.

use andb_ir::{BaseTableRef, Expr, TreeNode};

/// The shape of a logical node.
#[derive(Debug, Clone)]
pub enum LogicKind {
    /// Leaf scan over a base table.
    Scan {
        tableref: BaseTableRef,
        /// Reserved for costing; the SQL path records the selection arity.
        targetcnt: i32,
        /// WHERE predicate pushed onto the scan.
        filter: Option<Expr>,
    },
    /// Binary join; built directly by tests, never from SQL today.
    Join,
    /// Single-output aggregate (sum over the leading column).
    Agg,
}

impl LogicKind {
    /// Class-tag name, for diagnostics and plan rendering.
    pub fn name(&self) -> &'static str {
        match self {
            LogicKind::Scan { .. } => "LogicScan",
            LogicKind::Join => "LogicJoin",
            LogicKind::Agg => "LogicAgg",
        }
    }
}

/// One node of a logical plan tree.
#[derive(Debug, Clone)]
pub struct LogicNode {
    pub kind: LogicKind,
    children: Vec<LogicNode>,
}

impl LogicNode {
    /// A leaf scan over `tableref`.
    pub fn scan(tableref: BaseTableRef, targetcnt: i32) -> Self {
        Self {
            kind: LogicKind::Scan {
                tableref,
                targetcnt,
                filter: None,
            },
            children: vec![],
        }
    }

    /// A join of two subplans.
    pub fn join(left: LogicNode, right: LogicNode) -> Self {
        Self {
            kind: LogicKind::Join,
            children: vec![left, right],
        }
    }

    /// An aggregate over one subplan.
    pub fn agg(child: LogicNode) -> Self {
        Self {
            kind: LogicKind::Agg,
            children: vec![child],
        }
    }

    /// Attaches a WHERE predicate to a scan. No-op for other kinds.
    pub fn add_filter(&mut self, expr: Expr) {
        if let LogicKind::Scan { filter, .. } = &mut self.kind {
            *filter = Some(expr);
        }
    }

    pub fn is_scan(&self) -> bool {
        matches!(self.kind, LogicKind::Scan { .. })
    }

    /// Depth of the tree rooted here (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(LogicNode::depth)
            .max()
            .unwrap_or(0)
    }
}

impl TreeNode for LogicNode {
    fn children(&self) -> &[Self] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Self] {
        &mut self.children
    }

    fn local_eq(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (
                LogicKind::Scan {
                    tableref: a,
                    filter: fa,
                    ..
                },
                LogicKind::Scan {
                    tableref: b,
                    filter: fb,
                    ..
                },
            ) => {
                a.tab_name == b.tab_name
                    && a.alias() == b.alias()
                    && match (fa, fb) {
                        (Some(x), Some(y)) => x.structural_eq(y),
                        (None, None) => true,
                        _ => false,
                    }
            }
            (LogicKind::Join, LogicKind::Join) => true,
            (LogicKind::Agg, LogicKind::Agg) => true,
            _ => false,
        }
    }

    fn local_hash(&self) -> u64 {
        match &self.kind {
            LogicKind::Scan {
                tableref, filter, ..
            } => {
                let mut h = 0x5ca;
                for b in tableref.tab_name.bytes() {
                    h = (h << 5) ^ u64::from(b) ^ h;
                }
                if let Some(f) = filter {
                    h ^= f.structural_hash();
                }
                h
            }
            LogicKind::Join => 0x101,
            LogicKind::Agg => 0xa99,
        }
    }
}
