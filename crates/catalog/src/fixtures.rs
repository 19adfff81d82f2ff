// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Built-in test fixtures
//!
//! Deterministic seed schema used by the test suites and the interactive
//! driver:
//!
//! - thirty optimizer-test tables `t0..t29`, one Integer column `i` each;
//! - four built-in tables `a`, `b`, `c`, `d` with four Integer columns
//!   (`a1..a4`, `b1..b4`, ...; column `n` has ordinal `n-1`);
//! - fixed rows for `a`, `b`, `c` (three rows each) and `d` (four rows,
//!   with Nulls in `d3`).

use crate::datum::Datum;
use crate::metadata::{ColumnDef, SqlType};
use crate::row;
use crate::row::Row;
use crate::systable::Catalog;

const BUILTIN_TABLE_NAMES: [&str; 4] = ["a", "b", "c", "d"];

/// Creates `t0..t29`, each with a single Integer column `i`.
pub fn create_optimizer_test_tables(catalog: &mut Catalog) {
    for i in 0..30 {
        let tname = format!("t{i}");
        let cols = vec![ColumnDef::new("i", SqlType::Integer, 0)];
        // fixture names are fresh by construction
        let _ = catalog.create_table(&tname, cols, None);
    }
}

/// Creates `a`, `b`, `c`, `d`, each with four Integer columns named after
/// the table (`a1..a4` and so on).
pub fn create_builtin_test_tables(catalog: &mut Catalog) {
    for tname in BUILTIN_TABLE_NAMES {
        let cols = (1..=4)
            .map(|n| ColumnDef::new(format!("{tname}{n}"), SqlType::Integer, n - 1))
            .collect();
        let _ = catalog.create_table(tname, cols, None);
    }
}

/// Seeds the fixed rows of `a`, `b`, `c` and `d`.
pub fn populate_builtin_test_tables(catalog: &mut Catalog) {
    let abc_rows: Vec<Row> = vec![row![0, 1, 2, 3], row![1, 2, 3, 4], row![2, 3, 4, 5]];
    for tname in &BUILTIN_TABLE_NAMES[..3] {
        catalog.populate_table(tname, &abc_rows);
    }

    let d_rows: Vec<Row> = vec![
        row![0, 1, 2, 3],
        row![1, 2, Datum::Null, 4],
        row![2, 2, Datum::Null, 5],
        row![3, 3, 5, 6],
    ];
    catalog.populate_table("d", &d_rows);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_catalog() -> Catalog {
        let mut cat = Catalog::new();
        cat.init();
        cat
    }

    #[test]
    fn test_optimizer_tables_exist() {
        let cat = fixture_catalog();
        for i in 0..30 {
            let t = cat.try_table(&format!("t{i}")).unwrap();
            assert_eq!(t.column_count(), 1);
            assert!(t.column("i").is_some());
        }
        assert!(cat.try_table("t30").is_none());
    }

    #[test]
    fn test_builtin_tables_shape() {
        let cat = fixture_catalog();
        for name in BUILTIN_TABLE_NAMES {
            let t = cat.try_table(name).unwrap();
            assert_eq!(t.column_count(), 4);
            // column n has ordinal n-1
            for n in 1..=4 {
                let col = t.column(&format!("{name}{n}")).unwrap();
                assert_eq!(col.ordinal, n - 1);
                assert_eq!(col.sql_type, SqlType::Integer);
            }
        }
    }

    #[test]
    fn test_row_population() {
        let cat = fixture_catalog();
        for name in ["a", "b", "c"] {
            let heap = &cat.try_table(name).unwrap().distributions[0].heap;
            assert_eq!(heap.len(), 3);
            assert_eq!(heap[0], row![0, 1, 2, 3]);
            assert_eq!(heap[2], row![2, 3, 4, 5]);
        }

        let heap = &cat.try_table("d").unwrap().distributions[0].heap;
        assert_eq!(heap.len(), 4);
        assert_eq!(heap[1], row![1, 2, Datum::Null, 4]);
        assert_eq!(heap[3], row![3, 3, 5, 6]);
    }

    #[test]
    fn test_every_row_matches_table_arity() {
        let cat = fixture_catalog();
        for name in BUILTIN_TABLE_NAMES {
            let t = cat.try_table(name).unwrap();
            for r in &t.distributions[0].heap {
                assert_eq!(r.len(), t.column_count());
            }
        }
    }
}
