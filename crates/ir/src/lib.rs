// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # andb - IR Layer
//!
//! This crate defines the tree-shaped intermediate representation the engine
//! is built around:
//!
//! - [`TreeNode`]: the shared N-ary node abstraction — traversal, structural
//!   hash/equality, clone — implemented by expression, logical-plan and
//!   physical-plan nodes alike
//! - [`Expr`] / [`ExprKind`] / [`BinOp`]: scalar expression trees
//! - [`SelectStmt`] / [`TableRef`]: the statement AST the parser produces
//!   and the binder annotates
//!
//! Trees are strict parent-owns-children structures with no back-edges;
//! parents are implicit via the traversal API.

pub mod expr;
pub mod node;
pub mod stmt;

// Re-exports
pub use expr::{BinFn, BinOp, Expr, ExprKind};
pub use node::{Arity, HASH_MIX, TreeNode};
pub use stmt::{
    BaseTableRef, ColumnDefinition, CreateTableStmt, DropTableStmt, ImportFormat, ImportStmt,
    InsertStmt, QueryRef, SelectStmt, ShowKind, ShowStmt, Statement, TableRef,
};
