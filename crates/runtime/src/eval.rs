// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Expression evaluator
//!
//! [`ExprEval`] runs a bound expression tree against rows with no per-row
//! heap work. `open` compiles the tree once; `exec` may then run any number
//! of times; `close` releases the scratch state (and `Drop` backstops it).
//!
//! ## How evaluation works
//!
//! Slot assignment follows the tree shape: the root writes slot 0 and a
//! node's nth child uses `parent_slot + nth`. Sibling subtrees therefore
//! never clobber each other's pending results, and a parent's own slot
//! aliases its left child's — safe, because the parent reads both operands
//! before it writes. The compiled program is the post-order FIFO of the
//! tree, so by the time an operator runs its operands are already in their
//! slots.
//!
//! The scratch state is a board of result datums plus one source tag per
//! slot standing in for a pointer: a slot is served from the board, from a
//! constant embedded in the program, or straight from the input row.
//! Constants and columns are never copied.

use andb_catalog::{Datum, Row};
use andb_ir::{BinFn, Expr, ExprKind};

use crate::error::{ExecError, ExecResult};

static NULL_DATUM: Datum = Datum::Null;

/// One step of the compiled program.
#[derive(Debug, Clone)]
enum EvalOp {
    Const {
        slot: usize,
        value: Datum,
    },
    Col {
        slot: usize,
        ordinal: usize,
    },
    Bin {
        slot: usize,
        lslot: usize,
        rslot: usize,
        func: BinFn,
    },
}

/// Where a slot's current value lives.
#[derive(Debug, Clone, Copy)]
enum SlotSource {
    /// Materialized in `board[slot]`.
    Board,
    /// The constant embedded in program step `i`.
    Const(usize),
    /// The input row at this ordinal.
    Row(usize),
}

/// Reusable evaluator for one bound expression.
#[derive(Debug, Default)]
pub struct ExprEval {
    ops: Vec<EvalOp>,
    board: Vec<Datum>,
    source: Vec<SlotSource>,
    opened: bool,
}

impl ExprEval {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles the expression: assigns slots, sizes the scratch arrays and
    /// lays out the post-order program. The expression must be bound — a
    /// binary node without its kernel refuses to open.
    pub fn open(&mut self, expr: &Expr) -> ExecResult<()> {
        self.close();

        let mut max_slot = 0;
        compile(expr, 0, &mut self.ops, &mut max_slot)?;
        self.board = vec![Datum::Null; max_slot + 1];
        self.source = vec![SlotSource::Board; max_slot + 1];
        self.opened = true;
        Ok(())
    }

    /// Runs the program against `row` and returns the root value.
    /// Leaf expressions need no row; column references do.
    pub fn exec(&mut self, row: Option<&Row>) -> Datum {
        self.exec_ref(row).clone()
    }

    /// [`Self::exec`] without the final copy; the reference is valid until
    /// the next call.
    pub fn exec_ref<'a>(&'a mut self, row: Option<&'a Row>) -> &'a Datum {
        debug_assert!(self.opened, "exec before open");

        let ops = &self.ops;
        let board = &mut self.board;
        let source = &mut self.source;

        for (i, op) in ops.iter().enumerate() {
            match op {
                EvalOp::Bin {
                    slot,
                    lslot,
                    rslot,
                    func,
                } => {
                    let l = resolve(ops, board, source, row, *lslot);
                    let r = resolve(ops, board, source, row, *rslot);
                    let value = func(l, r);
                    board[*slot] = value;
                    source[*slot] = SlotSource::Board;
                }
                EvalOp::Const { slot, .. } => source[*slot] = SlotSource::Const(i),
                EvalOp::Col { slot, ordinal } => source[*slot] = SlotSource::Row(*ordinal),
            }
        }

        resolve(&self.ops, &self.board, &self.source, row, 0)
    }

    /// Releases the compiled program and scratch arrays.
    pub fn close(&mut self) {
        self.ops.clear();
        self.board.clear();
        self.source.clear();
        self.opened = false;
    }

    /// Number of program steps — one per sub-expression.
    pub fn op_count(&self) -> usize {
        self.ops.len()
    }

    /// Number of scratch slots allocated by `open`.
    pub fn slot_count(&self) -> usize {
        self.board.len()
    }
}

impl Drop for ExprEval {
    fn drop(&mut self) {
        self.close();
    }
}

/// Post-order compilation with the pre-order slot rule: this node writes
/// `slot`, its nth child `slot + n`.
fn compile(
    expr: &Expr,
    slot: usize,
    ops: &mut Vec<EvalOp>,
    max_slot: &mut usize,
) -> ExecResult<()> {
    *max_slot = (*max_slot).max(slot);
    match &expr.kind {
        ExprKind::Bin { func, .. } => {
            let func = (*func).ok_or(ExecError::UnboundExpr)?;
            let (lslot, rslot) = (slot, slot + 1);
            compile(expr.left(), lslot, ops, max_slot)?;
            compile(expr.right(), rslot, ops, max_slot)?;
            ops.push(EvalOp::Bin {
                slot,
                lslot,
                rslot,
                func,
            });
        }
        ExprKind::Const { value } => ops.push(EvalOp::Const {
            slot,
            value: value.clone(),
        }),
        ExprKind::Col { ordinal, .. } => ops.push(EvalOp::Col {
            slot,
            ordinal: *ordinal as usize,
        }),
        // stars are expanded away during binding
        ExprKind::Star { .. } => return Err(ExecError::UnboundExpr),
    }
    Ok(())
}

fn resolve<'a>(
    ops: &'a [EvalOp],
    board: &'a [Datum],
    source: &'a [SlotSource],
    row: Option<&'a Row>,
    slot: usize,
) -> &'a Datum {
    match source[slot] {
        SlotSource::Board => &board[slot],
        SlotSource::Const(i) => match &ops[i] {
            EvalOp::Const { value, .. } => value,
            _ => &NULL_DATUM,
        },
        SlotSource::Row(ordinal) => row.and_then(|r| r.get(ordinal)).unwrap_or(&NULL_DATUM),
    }
}
