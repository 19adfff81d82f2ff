// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Evaluator and scan throughput: the per-row cost of a compiled filter is
//! what the slot design exists for.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use andb_catalog::{Catalog, Datum, Row, row};
use andb_ir::{BinOp, Expr};
use andb_runtime::{ExecContext, ExprEval, PhysicNode};
use andb_semantic::Binder;

fn bound(mut expr: Expr) -> Expr {
    let catalog = Catalog::new();
    Binder::new(&catalog).bind_expr(&mut expr).unwrap();
    expr
}

fn arith_expr() -> Expr {
    // (c0 - c1) + (c2 * 3)
    bound(Expr::binary(
        BinOp::Add,
        Expr::binary(BinOp::Sub, Expr::col_ordinal(0), Expr::col_ordinal(1)),
        Expr::binary(
            BinOp::Mul,
            Expr::col_ordinal(2),
            Expr::constant(Datum::Int32(3)),
        ),
    ))
}

fn bench_exec(c: &mut Criterion) {
    let expr = arith_expr();
    let r: Row = row![6, 7, 8];
    let mut eval = ExprEval::new();
    eval.open(&expr).unwrap();

    c.bench_function("eval_exec_row", |b| {
        b.iter(|| black_box(eval.exec_ref(Some(black_box(&r)))))
    });
}

fn bench_open_close(c: &mut Criterion) {
    let expr = arith_expr();
    c.bench_function("eval_open_close", |b| {
        b.iter(|| {
            let mut eval = ExprEval::new();
            eval.open(black_box(&expr)).unwrap();
            eval.close();
        })
    });
}

fn bench_filtered_scan(c: &mut Criterion) {
    let mut catalog = Catalog::new();
    catalog.init();
    let filter = bound(Expr::binary(
        BinOp::Leq,
        Expr::col_ordinal(0),
        Expr::constant(Datum::Int32(1)),
    ));

    c.bench_function("scan_filtered", |b| {
        b.iter(|| {
            let ctx = ExecContext::new(&catalog);
            let mut plan = PhysicNode::scan("a", Some(filter.clone()));
            plan.open(&ctx).unwrap();
            let mut count = 0usize;
            plan.exec(&ctx, &mut |r| {
                if r.is_some() {
                    count += 1;
                }
            })
            .unwrap();
            plan.close();
            black_box(count)
        })
    });
}

criterion_group!(benches, bench_exec, bench_open_close, bench_filtered_scan);
criterion_main!(benches);
