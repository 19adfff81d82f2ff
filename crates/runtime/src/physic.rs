// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Physical plan and executor
//!
//! Each physical node mirrors a logical one and exposes the Open/Exec/Close
//! discipline:
//!
//! - `open` recurses to children first, then prepares local state (a scan
//!   opens the evaluator over its filter);
//! - `exec` produces rows by invoking the caller's sink; the scan emits a
//!   final `None` to signal end of stream;
//! - `close` tears down local state, then children in reverse order, and
//!   requires a matching `open`.
//!
//! The hash join is a one-pass equi-join on the leading column: the build
//! side (left child) is buffered into a map keyed by `row[0]` as Int32 —
//! that column carrying the join key is the operator's contract — and the
//! probe side emits matching build rows in probe order. The aggregate
//! consumes its child and emits exactly one row holding the wrapping Int32
//! sum of the leading column.

use std::collections::HashMap;

use andb_catalog::{Catalog, Datum, Row};
use andb_ir::{Expr, TreeNode};
use tracing::debug;

use crate::error::{ExecError, ExecResult};
use crate::eval::ExprEval;

/// Shared execution state, created before the plan opens and borrowed by
/// every node in the tree.
pub struct ExecContext<'a> {
    pub catalog: &'a Catalog,
}

impl<'a> ExecContext<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }
}

/// The shape of a physical node.
#[derive(Debug)]
pub enum PhysicKind {
    /// Heap scan with an optional filter; the evaluator exists between
    /// Open and Close.
    Scan {
        table: String,
        filter: Option<Expr>,
        eval: Option<ExprEval>,
    },
    /// Leading-column equi-hash-join; build side is child 0.
    HashJoin,
    /// Single-row sum over the leading column.
    Agg,
}

/// One node of an executable plan tree.
#[derive(Debug)]
pub struct PhysicNode {
    pub kind: PhysicKind,
    children: Vec<PhysicNode>,
    opened: bool,
}

impl PhysicNode {
    pub fn scan(table: impl Into<String>, filter: Option<Expr>) -> Self {
        Self {
            kind: PhysicKind::Scan {
                table: table.into(),
                filter,
                eval: None,
            },
            children: vec![],
            opened: false,
        }
    }

    pub fn hash_join(left: PhysicNode, right: PhysicNode) -> Self {
        Self {
            kind: PhysicKind::HashJoin,
            children: vec![left, right],
            opened: false,
        }
    }

    pub fn agg(child: PhysicNode) -> Self {
        Self {
            kind: PhysicKind::Agg,
            children: vec![child],
            opened: false,
        }
    }

    /// Dispatch-table name of this node.
    pub fn name(&self) -> &'static str {
        match self.kind {
            PhysicKind::Scan { .. } => "PhysicScan",
            PhysicKind::HashJoin => "PhysicHashJoin",
            PhysicKind::Agg => "PhysicAgg",
        }
    }

    /// Depth of the tree rooted here (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(PhysicNode::depth)
            .max()
            .unwrap_or(0)
    }

    /// Opens children first, then local state.
    pub fn open(&mut self, ctx: &ExecContext<'_>) -> ExecResult<()> {
        for child in &mut self.children {
            child.open(ctx)?;
        }
        if let PhysicKind::Scan {
            table,
            filter,
            eval,
        } = &mut self.kind
        {
            // the table must still be there when rows are pulled
            ctx.catalog
                .try_table(table)
                .ok_or_else(|| ExecError::TableNotFound(table.clone()))?;
            if let Some(predicate) = filter {
                let mut filter_eval = ExprEval::new();
                filter_eval.open(predicate)?;
                *eval = Some(filter_eval);
            }
        }
        self.opened = true;
        Ok(())
    }

    /// Produces rows into `sink`; borrowed rows are valid for the duration
    /// of the callback only.
    pub fn exec(
        &mut self,
        ctx: &ExecContext<'_>,
        sink: &mut dyn FnMut(Option<&Row>),
    ) -> ExecResult<()> {
        if !self.opened {
            return Err(ExecError::NotOpened);
        }
        let Self { kind, children, .. } = self;
        match kind {
            PhysicKind::Scan { table, eval, .. } => {
                let tdef = ctx
                    .catalog
                    .try_table(table)
                    .ok_or_else(|| ExecError::TableNotFound(table.clone()))?;
                let heap = &tdef.distributions[0].heap;
                for row in heap {
                    if let Some(filter_eval) = eval
                        && !filter_eval.exec_ref(Some(row)).is_true()
                    {
                        continue;
                    }
                    sink(Some(row));
                }
                sink(None); // EOF
            }

            PhysicKind::HashJoin => {
                let mut map: HashMap<i32, Vec<Row>> = HashMap::new();

                // build stage: the join owns its build rows until Close
                let (build, probe) = children.split_at_mut(1);
                build[0].exec(ctx, &mut |row| {
                    if let Some(r) = row
                        && !r.is_empty()
                        && let Some(key) = r[0].as_i32()
                    {
                        map.entry(key).or_default().push(r.clone());
                    }
                })?;
                debug!(buckets = map.len(), "hash join build side buffered");

                // probe stage: emit matching build rows in probe order
                probe[0].exec(ctx, &mut |row| {
                    if let Some(r) = row
                        && !r.is_empty()
                        && let Some(key) = r[0].as_i32()
                        && let Some(bucket) = map.get(&key)
                    {
                        for build_row in bucket {
                            sink(Some(build_row));
                        }
                    }
                })?;
            }

            PhysicKind::Agg => {
                let mut sum: i32 = 0;
                children[0].exec(ctx, &mut |row| {
                    if let Some(r) = row
                        && !r.is_empty()
                        && let Some(v) = r[0].as_i32()
                    {
                        sum = sum.wrapping_add(v);
                    }
                })?;
                let mut out = Row::with_arity(1);
                out[0] = Datum::Int32(sum);
                sink(Some(&out));
            }
        }
        Ok(())
    }

    /// Releases local state, then children in reverse order.
    pub fn close(&mut self) {
        debug_assert!(self.opened, "close without open");
        if let PhysicKind::Scan { eval, .. } = &mut self.kind {
            if let Some(mut filter_eval) = eval.take() {
                filter_eval.close();
            }
        }
        for child in self.children.iter_mut().rev() {
            child.close();
        }
        self.opened = false;
    }

    /// One line per node, indented two spaces per depth level.
    pub fn explain(&self) -> String {
        let mut out = String::new();
        self.visit_parent_child(&mut |_parent, depth, _nth, node: &PhysicNode| {
            out.push_str(&" ".repeat(depth * 2));
            out.push_str(node.name());
            out.push('\n');
        });
        out
    }
}

impl TreeNode for PhysicNode {
    fn children(&self) -> &[Self] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Self] {
        &mut self.children
    }

    fn local_eq(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (PhysicKind::Scan { table: a, .. }, PhysicKind::Scan { table: b, .. }) => a == b,
            (PhysicKind::HashJoin, PhysicKind::HashJoin) => true,
            (PhysicKind::Agg, PhysicKind::Agg) => true,
            _ => false,
        }
    }

    fn local_hash(&self) -> u64 {
        match &self.kind {
            PhysicKind::Scan { table, .. } => {
                let mut h = 0x5ca;
                for b in table.bytes() {
                    h = (h << 5) ^ u64::from(b) ^ h;
                }
                h
            }
            PhysicKind::HashJoin => 0x101,
            PhysicKind::Agg => 0xa99,
        }
    }
}
