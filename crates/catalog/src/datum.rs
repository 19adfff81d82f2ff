// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Datum
//!
//! A [`Datum`] is the tagged union of every value the engine can hold,
//! including a distinct Null marker. [`DataType`] is the parallel tag enum;
//! the variant order is the tag order and must not change — expression
//! typing and operator dispatch key on it.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Type tag of a [`Datum`], in tag order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// The distinct "no value" marker.
    Null,
    Bool,
    Int32,
    Int64,
    /// Owned text.
    String,
    /// IEEE-754 binary64.
    Double,
    /// Reserved opaque handle; never evaluated by the core.
    UserType,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Null => "null",
            DataType::Bool => "bool",
            DataType::Int32 => "int32",
            DataType::Int64 => "int64",
            DataType::String => "string",
            DataType::Double => "double",
            DataType::UserType => "usertype",
        };
        f.write_str(name)
    }
}

/// A single typed SQL value.
///
/// Equality is by (tag, value). The default value is `Null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Datum {
    #[default]
    Null,
    Bool(bool),
    Int32(i32),
    Int64(i64),
    String(String),
    Double(f64),
    /// Reserved opaque handle; carried, never evaluated.
    UserType(usize),
}

impl Datum {
    /// The tag of this value.
    pub fn data_type(&self) -> DataType {
        match self {
            Datum::Null => DataType::Null,
            Datum::Bool(_) => DataType::Bool,
            Datum::Int32(_) => DataType::Int32,
            Datum::Int64(_) => DataType::Int64,
            Datum::String(_) => DataType::String,
            Datum::Double(_) => DataType::Double,
            Datum::UserType(_) => DataType::UserType,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Datum::Null)
    }

    pub fn set_null(&mut self) {
        *self = Datum::Null;
    }

    /// The Int32 payload, if this datum carries one.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Datum::Int32(v) => Some(*v),
            _ => None,
        }
    }

    /// The Bool payload, if this datum carries one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Datum::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// True exactly for `Bool(true)`; filters treat anything else as reject.
    pub fn is_true(&self) -> bool {
        matches!(self, Datum::Bool(true))
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Null => f.write_str("<null>"),
            Datum::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Datum::Int32(v) => write!(f, "{v}"),
            Datum::Int64(v) => write!(f, "{v}"),
            Datum::String(s) => f.write_str(s),
            Datum::Double(v) => write!(f, "{v}"),
            Datum::UserType(h) => write!(f, "usertype:{h}"),
        }
    }
}

// Doubles hash by bit pattern so structural expression hashing stays stable.
impl Hash for Datum {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data_type().hash(state);
        match self {
            Datum::Null => {}
            Datum::Bool(b) => b.hash(state),
            Datum::Int32(v) => v.hash(state),
            Datum::Int64(v) => v.hash(state),
            Datum::String(s) => s.hash(state),
            Datum::Double(v) => v.to_bits().hash(state),
            Datum::UserType(h) => h.hash(state),
        }
    }
}

impl From<bool> for Datum {
    fn from(v: bool) -> Self {
        Datum::Bool(v)
    }
}

impl From<i32> for Datum {
    fn from(v: i32) -> Self {
        Datum::Int32(v)
    }
}

impl From<i64> for Datum {
    fn from(v: i64) -> Self {
        Datum::Int64(v)
    }
}

impl From<f64> for Datum {
    fn from(v: f64) -> Self {
        Datum::Double(v)
    }
}

impl From<String> for Datum {
    fn from(v: String) -> Self {
        Datum::String(v)
    }
}

impl From<&str> for Datum {
    fn from(v: &str) -> Self {
        Datum::String(v.to_string())
    }
}
