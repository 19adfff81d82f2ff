// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Allocation discipline: between one `open` and `close`, `exec` performs
//! no heap allocation. Runs alone in its own binary with a counting
//! allocator so nothing else disturbs the counter.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};

use andb_catalog::{Catalog, Datum, row};
use andb_ir::{BinOp, Expr};
use andb_runtime::ExprEval;
use andb_semantic::Binder;

struct CountingAllocator;

static ALLOCATIONS: AtomicUsize = AtomicUsize::new(0);

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        ALLOCATIONS.fetch_add(1, Ordering::SeqCst);
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }
}

#[global_allocator]
static ALLOCATOR: CountingAllocator = CountingAllocator;

#[test]
fn test_exec_allocates_nothing() {
    let catalog = Catalog::new();
    let mut expr = Expr::binary(
        BinOp::Add,
        Expr::binary(
            BinOp::Sub,
            Expr::col_ordinal(0),
            Expr::col_ordinal(1),
        ),
        Expr::binary(
            BinOp::Mul,
            Expr::col_ordinal(2),
            Expr::constant(Datum::Int32(3)),
        ),
    );
    Binder::new(&catalog).bind_expr(&mut expr).unwrap();

    let r = row![6, 7, 8];
    let mut eval = ExprEval::new();
    eval.open(&expr).unwrap();

    // warm up once, then measure
    assert_eq!(eval.exec(Some(&r)), Datum::Int32(23));
    let before = ALLOCATIONS.load(Ordering::SeqCst);
    for _ in 0..1000 {
        let value = eval.exec_ref(Some(&r));
        assert!(matches!(value, Datum::Int32(23)));
    }
    let after = ALLOCATIONS.load(Ordering::SeqCst);
    eval.close();

    assert_eq!(after, before, "exec must not touch the heap");
}
