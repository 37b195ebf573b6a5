//! Value representations for generated data.
//!
//! `GeneratedValue` is what a generator yields and what emitters render;
//! `Pattern` is the mode-dependent parameter handed to a generator.

use crate::types::DbType;
use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Textual rendering of date values, with fractional seconds only when present.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// A single generated column value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeneratedValue {
    /// 64-bit signed integer
    Integer(i64),

    /// 64-bit floating point
    Real(f64),

    /// Date and time without timezone
    Date(NaiveDateTime),

    /// String value
    String(String),
}

impl GeneratedValue {
    /// Column type this value belongs to.
    pub fn db_type(&self) -> DbType {
        match self {
            Self::Integer(_) => DbType::Integer,
            Self::Real(_) => DbType::Real,
            Self::Date(_) => DbType::Date,
            Self::String(_) => DbType::String,
        }
    }

    /// Short name of the value kind, used in type-mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Date(_) => "date",
            Self::String(_) => "string",
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get this value as a float. Integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Real(v) => Some(*v),
            Self::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Date(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Length of the rendered value in characters.
    pub fn char_len(&self) -> usize {
        match self {
            Self::String(s) => s.chars().count(),
            other => other.to_string().chars().count(),
        }
    }
}

impl fmt::Display for GeneratedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{}", v.format(DATE_FORMAT)),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<i64> for GeneratedValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for GeneratedValue {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<NaiveDateTime> for GeneratedValue {
    fn from(v: NaiveDateTime) -> Self {
        Self::Date(v)
    }
}

impl From<String> for GeneratedValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for GeneratedValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

/// Mode-dependent parameter passed to a generator.
///
/// Integer and Real generators read it as a step, bound or modulus; the Date
/// generator needs a duration step; the String generator reads it as a
/// length, pool size or word count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pattern {
    Integer(i64),
    Real(f64),
    Duration(TimeDelta),
    Count(usize),
}

impl Pattern {
    /// Short name of the pattern kind, used in type-mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Pattern::Integer(_) => "integer",
            Pattern::Real(_) => "real",
            Pattern::Duration(_) => "duration",
            Pattern::Count(_) => "count",
        }
    }
}

impl From<i64> for Pattern {
    fn from(v: i64) -> Self {
        Pattern::Integer(v)
    }
}

impl From<f64> for Pattern {
    fn from(v: f64) -> Self {
        Pattern::Real(v)
    }
}

impl From<TimeDelta> for Pattern {
    fn from(v: TimeDelta) -> Self {
        Pattern::Duration(v)
    }
}

impl From<usize> for Pattern {
    fn from(v: usize) -> Self {
        Pattern::Count(v)
    }
}
