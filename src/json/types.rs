//! Strict JSON value types.
//!
//! A [`JsonValue`] can only hold what strict JSON can express. Obtaining one
//! from a request argument goes through [`super::validate`], so holding a
//! `JsonValue` is proof the value is cacheable.
//!
//! # Invariants
//!
//! - Numbers are finite doubles; `-0` is stored as `0`; integers are
//!   admitted only when the double is exact
//! - Object keys are ordered (BTreeMap, code-point order)
//! - Structural equality is exact: `Int(1)` and `Float(1.0)` arguments both
//!   become `Number(1)` and compare equal

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::number::{exact_f64, format_number};

/// A finite double-precision JSON number.
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct Number(f64);

impl Number {
    /// Wrap a double, returning None for NaN and the infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        // Folds -0.0 into 0.0
        Some(Number(value + 0.0))
    }

    /// Wrap an integer, returning None if it has no exact double.
    pub fn from_i64(value: i64) -> Option<Self> {
        exact_f64(value).map(Number)
    }

    /// The underlying double.
    pub fn as_f64(self) -> f64 {
        self.0
    }
}

// NaN is unrepresentable, so equality is reflexive.
impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_number(*self))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_number(*self))
    }
}

/// A strict JSON value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum JsonValue {
    /// JSON null literal
    #[default]
    Null,
    /// JSON boolean (true/false)
    Bool(bool),
    /// Finite JSON number
    Number(Number),
    /// JSON string
    String(String),
    /// JSON array of values
    Array(Vec<JsonValue>),
    /// JSON object with ordered keys
    Object(BTreeMap<String, JsonValue>),
}
