// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Optimizer
//!
//! Only the direct lowering exists: every logical node becomes its physical
//! counterpart, kind by kind, preserving the tree shape. The option ladder
//! is declared for the day substitution rules arrive.

use andb_ir::TreeNode;
use andb_planner::{LogicKind, LogicNode};
use tracing::debug;

use crate::physic::PhysicNode;

/// Optimization effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptimizeOption {
    /// Directly convert to a physical plan.
    O0,
    /// Minimal effort, substitution rules only.
    O1,
    /// Full effort.
    #[default]
    O2,
    /// Customized; see other parameters.
    Ocustomized,
}

/// Lowers a logical plan to an executable physical plan.
pub fn optimize(logic: &LogicNode, _option: OptimizeOption) -> PhysicNode {
    let physic = direct_logic_to_physic(logic);
    debug!(shape = physic.name(), depth = physic.depth(), "plan lowered");
    physic
}

fn direct_logic_to_physic(logic: &LogicNode) -> PhysicNode {
    let children = logic.children();
    match &logic.kind {
        LogicKind::Scan {
            tableref, filter, ..
        } => PhysicNode::scan(tableref.tab_name.clone(), filter.clone()),
        LogicKind::Join => PhysicNode::hash_join(
            direct_logic_to_physic(&children[0]),
            direct_logic_to_physic(&children[1]),
        ),
        LogicKind::Agg => PhysicNode::agg(direct_logic_to_physic(&children[0])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use andb_ir::BaseTableRef;

    fn scan(name: &str) -> LogicNode {
        LogicNode::scan(BaseTableRef::new(name), 3)
    }

    #[test]
    fn test_lowering_preserves_shape_and_depth() {
        let logic = LogicNode::agg(LogicNode::join(scan("a"), scan("b")));
        let physic = optimize(&logic, OptimizeOption::O0);

        assert_eq!(physic.name(), "PhysicAgg");
        assert_eq!(physic.depth(), logic.depth());
        let join = &physic.children()[0];
        assert_eq!(join.name(), "PhysicHashJoin");
        assert_eq!(join.children()[0].name(), "PhysicScan");
        assert_eq!(join.children()[1].name(), "PhysicScan");
    }

    #[test]
    fn test_explain_indents_by_depth() {
        let logic = LogicNode::agg(LogicNode::join(scan("a"), scan("b")));
        let physic = optimize(&logic, OptimizeOption::default());
        assert_eq!(
            physic.explain(),
            "PhysicAgg\n  PhysicHashJoin\n    PhysicScan\n    PhysicScan\n"
        );
    }
}
