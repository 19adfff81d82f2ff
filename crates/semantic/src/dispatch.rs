// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Binary operator dispatch
//!
//! A closed, immutable table mapping `(operator, left type, right type)` to
//! the result type and the scalar kernel that computes it. Built once on
//! first use; widening the engine to new type combinations means adding
//! entries here and nothing else.
//!
//! Kernels are total over datums: a Null operand propagates Null (a typed
//! column may still hold Null at run time), integer arithmetic wraps on
//! overflow, and integer division by zero yields Null.

use std::collections::HashMap;
use std::sync::OnceLock;

use andb_catalog::{DataType, Datum};
use andb_ir::{BinFn, BinOp};

/// Result type and kernel for one `(op, left, right)` signature.
#[derive(Debug, Clone, Copy)]
pub struct BinOpImpl {
    pub result: DataType,
    pub func: BinFn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct OpSig(BinOp, DataType, DataType);

macro_rules! int_arith_kernel {
    ($name:ident, $variant:ident, $method:ident) => {
        fn $name(l: &Datum, r: &Datum) -> Datum {
            match (l, r) {
                (Datum::$variant(a), Datum::$variant(b)) => Datum::$variant(a.$method(*b)),
                _ => Datum::Null,
            }
        }
    };
}

macro_rules! int_div_kernel {
    ($name:ident, $variant:ident) => {
        fn $name(l: &Datum, r: &Datum) -> Datum {
            match (l, r) {
                (Datum::$variant(_), Datum::$variant(0)) => Datum::Null,
                (Datum::$variant(a), Datum::$variant(b)) => Datum::$variant(a.wrapping_div(*b)),
                _ => Datum::Null,
            }
        }
    };
}

macro_rules! float_arith_kernel {
    ($name:ident, $op:tt) => {
        fn $name(l: &Datum, r: &Datum) -> Datum {
            match (l, r) {
                (Datum::Double(a), Datum::Double(b)) => Datum::Double(a $op b),
                _ => Datum::Null,
            }
        }
    };
}

macro_rules! cmp_kernel {
    ($name:ident, $variant:ident, $op:tt) => {
        fn $name(l: &Datum, r: &Datum) -> Datum {
            match (l, r) {
                (Datum::$variant(a), Datum::$variant(b)) => Datum::Bool(a $op b),
                _ => Datum::Null,
            }
        }
    };
}

int_arith_kernel!(add_i32, Int32, wrapping_add);
int_arith_kernel!(sub_i32, Int32, wrapping_sub);
int_arith_kernel!(mul_i32, Int32, wrapping_mul);
int_div_kernel!(div_i32, Int32);
cmp_kernel!(eq_i32, Int32, ==);
cmp_kernel!(neq_i32, Int32, !=);
cmp_kernel!(lt_i32, Int32, <);
cmp_kernel!(leq_i32, Int32, <=);
cmp_kernel!(gt_i32, Int32, >);
cmp_kernel!(geq_i32, Int32, >=);

int_arith_kernel!(add_i64, Int64, wrapping_add);
int_arith_kernel!(sub_i64, Int64, wrapping_sub);
int_arith_kernel!(mul_i64, Int64, wrapping_mul);
int_div_kernel!(div_i64, Int64);
cmp_kernel!(eq_i64, Int64, ==);
cmp_kernel!(neq_i64, Int64, !=);
cmp_kernel!(lt_i64, Int64, <);
cmp_kernel!(leq_i64, Int64, <=);
cmp_kernel!(gt_i64, Int64, >);
cmp_kernel!(geq_i64, Int64, >=);

float_arith_kernel!(add_f64, +);
float_arith_kernel!(sub_f64, -);
float_arith_kernel!(mul_f64, *);
float_arith_kernel!(div_f64, /);
cmp_kernel!(eq_f64, Double, ==);
cmp_kernel!(neq_f64, Double, !=);
cmp_kernel!(lt_f64, Double, <);
cmp_kernel!(leq_f64, Double, <=);
cmp_kernel!(gt_f64, Double, >);
cmp_kernel!(geq_f64, Double, >=);

fn and_bool(l: &Datum, r: &Datum) -> Datum {
    match (l, r) {
        (Datum::Bool(a), Datum::Bool(b)) => Datum::Bool(*a && *b),
        _ => Datum::Null,
    }
}

fn or_bool(l: &Datum, r: &Datum) -> Datum {
    match (l, r) {
        (Datum::Bool(a), Datum::Bool(b)) => Datum::Bool(*a || *b),
        _ => Datum::Null,
    }
}

fn table() -> &'static HashMap<OpSig, BinOpImpl> {
    static TABLE: OnceLock<HashMap<OpSig, BinOpImpl>> = OnceLock::new();
    TABLE.get_or_init(|| {
        use BinOp::*;
        use DataType::{Bool, Double, Int32, Int64};

        let entries: &[(BinOp, DataType, DataType, BinFn)] = &[
            (Add, Int32, Int32, add_i32),
            (Sub, Int32, Int32, sub_i32),
            (Mul, Int32, Int32, mul_i32),
            (Div, Int32, Int32, div_i32),
            (Equal, Int32, Bool, eq_i32),
            (Neq, Int32, Bool, neq_i32),
            (Less, Int32, Bool, lt_i32),
            (Leq, Int32, Bool, leq_i32),
            (Great, Int32, Bool, gt_i32),
            (Geq, Int32, Bool, geq_i32),
            (Add, Int64, Int64, add_i64),
            (Sub, Int64, Int64, sub_i64),
            (Mul, Int64, Int64, mul_i64),
            (Div, Int64, Int64, div_i64),
            (Equal, Int64, Bool, eq_i64),
            (Neq, Int64, Bool, neq_i64),
            (Less, Int64, Bool, lt_i64),
            (Leq, Int64, Bool, leq_i64),
            (Great, Int64, Bool, gt_i64),
            (Geq, Int64, Bool, geq_i64),
            (Add, Double, Double, add_f64),
            (Sub, Double, Double, sub_f64),
            (Mul, Double, Double, mul_f64),
            (Div, Double, Double, div_f64),
            (Equal, Double, Bool, eq_f64),
            (Neq, Double, Bool, neq_f64),
            (Less, Double, Bool, lt_f64),
            (Leq, Double, Bool, leq_f64),
            (Great, Double, Bool, gt_f64),
            (Geq, Double, Bool, geq_f64),
            (And, Bool, Bool, and_bool),
            (Or, Bool, Bool, or_bool),
        ];

        let mut map = HashMap::with_capacity(entries.len());
        for &(op, operand, result, func) in entries {
            map.insert(OpSig(op, operand, operand), BinOpImpl { result, func });
        }
        map
    })
}

/// Looks up the implementation for `(op, left, right)`; `None` means the
/// engine has no kernel for the combination.
pub fn lookup(op: BinOp, left: DataType, right: DataType) -> Option<BinOpImpl> {
    table().get(&OpSig(op, left, right)).copied()
}
