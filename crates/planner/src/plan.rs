// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Plan construction
//!
//! Turns a bound [`SelectStmt`] into a logical tree. Every FROM entry
//! becomes a scan; two or more entries fold left into a join tree (their
//! join conditions would arrive with WHERE processing — which is exactly
//! why the binder refuses the shape for now). A WHERE predicate attaches to
//! a scan root; any other root refuses it.

use andb_ir::{SelectStmt, TableRef};
use tracing::debug;

use crate::error::{PlanError, PlanResult};
use crate::logic::LogicNode;

/// Builds the logical plan for a bound statement. `None` when there is
/// nothing to scan (empty FROM).
pub fn create_plan(stmt: &SelectStmt) -> PlanResult<Option<LogicNode>> {
    let Some(mut root) = transform_from_clause(stmt)? else {
        return Ok(None);
    };

    if let Some(predicate) = &stmt.where_clause {
        if !root.is_scan() {
            return Err(PlanError::NotImplemented(
                "WHERE is not implemented for non table scans".to_string(),
            ));
        }
        root.add_filter(predicate.clone());
    }

    debug!(shape = root.kind.name(), depth = root.depth(), "plan built");
    Ok(Some(root))
}

fn transform_one_from(tref: &TableRef, targetcnt: i32) -> PlanResult<LogicNode> {
    match tref {
        TableRef::Base(base) => Ok(LogicNode::scan(base.clone(), targetcnt)),
        TableRef::Query(_) => Err(PlanError::NotImplemented(
            "derived tables are not planned".to_string(),
        )),
    }
}

/// Pairs FROM items up as a left-folded join tree; a single item is a bare
/// scan.
fn transform_from_clause(stmt: &SelectStmt) -> PlanResult<Option<LogicNode>> {
    let targetcnt = stmt.selection.len() as i32;
    match stmt.from.len() {
        0 => Ok(None),
        1 => Ok(Some(transform_one_from(&stmt.from[0], targetcnt)?)),
        _ => {
            let mut left: Option<LogicNode> = None;
            let mut right: Option<LogicNode> = None;
            for tref in &stmt.from {
                let scan = transform_one_from(tref, targetcnt)?;
                if left.is_none() {
                    left = Some(scan);
                } else {
                    right = Some(match right.take() {
                        None => scan,
                        Some(prev) => LogicNode::join(scan, prev),
                    });
                }
            }
            // both sides populated since from.len() >= 2
            Ok(Some(LogicNode::join(
                left.expect("first FROM item"),
                right.expect("second FROM item"),
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::LogicKind;
    use andb_ir::{BaseTableRef, BinOp, Expr};
    use andb_catalog::Datum;

    fn stmt_over(tables: &[&str]) -> SelectStmt {
        SelectStmt {
            from: tables
                .iter()
                .map(|t| TableRef::Base(BaseTableRef::new(*t)))
                .collect(),
            selection: vec![Expr::col_ordinal(0)],
            where_clause: None,
        }
    }

    #[test]
    fn test_empty_from_has_no_plan() {
        let plan = create_plan(&stmt_over(&[])).unwrap();
        assert!(plan.is_none());
    }

    #[test]
    fn test_single_table_is_a_scan() {
        let plan = create_plan(&stmt_over(&["a"])).unwrap().unwrap();
        assert!(plan.is_scan());
        assert_eq!(plan.depth(), 1);
    }

    #[test]
    fn test_where_attaches_to_scan() {
        let mut stmt = stmt_over(&["a"]);
        stmt.where_clause = Some(Expr::binary(
            BinOp::Leq,
            Expr::col_ordinal(0),
            Expr::constant(Datum::Int32(1)),
        ));
        let plan = create_plan(&stmt).unwrap().unwrap();
        match &plan.kind {
            LogicKind::Scan { filter, .. } => assert!(filter.is_some()),
            other => panic!("expected scan, got {other:?}"),
        }
    }

    #[test]
    fn test_two_tables_fold_into_a_join() {
        let plan = create_plan(&stmt_over(&["a", "b"])).unwrap().unwrap();
        match &plan.kind {
            LogicKind::Join => {}
            other => panic!("expected join, got {other:?}"),
        }
        assert_eq!(plan.depth(), 2);
    }

    #[test]
    fn test_three_tables_fold_left() {
        use andb_ir::TreeNode;
        let plan = create_plan(&stmt_over(&["a", "b", "c"])).unwrap().unwrap();
        // Join(scan a, Join(scan c, scan b)) — the original's fold order
        assert!(matches!(plan.kind, LogicKind::Join));
        let right = &plan.children()[1];
        assert!(matches!(right.kind, LogicKind::Join));
        match &right.children()[0].kind {
            LogicKind::Scan { tableref, .. } => assert_eq!(tableref.tab_name, "c"),
            other => panic!("expected scan, got {other:?}"),
        }
    }

    #[test]
    fn test_where_on_join_root_is_refused() {
        let mut stmt = stmt_over(&["a", "b"]);
        stmt.where_clause = Some(Expr::constant(Datum::Bool(true)));
        let err = create_plan(&stmt).unwrap_err();
        assert!(matches!(err, PlanError::NotImplemented(_)));
    }
}
