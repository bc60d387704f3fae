//! Flat parameter values carried by a parsed directive.

use serde::{Deserialize, Serialize};

/// A single directive parameter value.
///
/// Directive parameters are always flat primitives -- strings, numbers,
/// or booleans. Nested containers are ruled out by construction: there
/// is no variant that could hold one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A quoted string value.
    Str(String),
    /// A numeric value (unsigned or decimal in the grammar, stored as f64).
    Num(f64),
    /// A `true` / `false` literal.
    Bool(bool),
}

impl ParamValue {
    /// Returns the string content if this is a [`ParamValue::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric content if this is a [`ParamValue::Num`].
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Self::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean content if this is a [`ParamValue::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        Self::Num(n)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}
