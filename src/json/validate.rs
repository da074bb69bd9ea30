//! Strict JSON validation of request arguments.
//!
//! Validation is a typed conversion: an [`ArgValue`] either converts into a
//! [`JsonValue`] or fails with the reason and location of the first value
//! strict JSON cannot express. Every node is visited, so a callable buried
//! in nested arrays is rejected just like one at the top level.
//!
//! # Rejections
//!
//! - E100..E105: absent, callable, symbol, big integer, non-finite number,
//!   integer with no exact double representation
//! - E110..E114: structural limits (see [`Limits`])
//! - E120: composite that contains one of its own ancestors
//! - E130: composite whose lock is poisoned

use std::collections::{BTreeMap, HashSet};
use std::fmt::Write;
use std::sync::Arc;

use super::jcs::write_string;
use super::limits::Limits;
use super::types::{JsonValue, Number};
use crate::error::{ErrorCode, KeyResult};
use crate::value::{ArgValue, SharedArray, SharedObject};

/// One step of the path from the root to the value being visited.
#[derive(Debug, Clone)]
enum Segment {
    Key(String),
    Index(usize),
}

/// Single-use converter from [`ArgValue`] to [`JsonValue`].
pub struct Validator {
    limits: Limits,
    depth: u64,
    nodes: u64,
    path: Vec<Segment>,
    /// Identities of the composites currently being visited.
    ancestors: HashSet<usize>,
}

impl Validator {
    /// Create a validator with the given limits.
    pub fn new(limits: Limits) -> Self {
        Self {
            limits,
            depth: 0,
            nodes: 0,
            path: Vec::new(),
            ancestors: HashSet::new(),
        }
    }

    /// Convert a request argument, consuming the validator.
    pub fn convert(mut self, value: &ArgValue) -> KeyResult<JsonValue> {
        self.visit(value)
    }

    /// Render the current location as a JSON path.
    fn path_string(&self) -> String {
        let mut out = String::from("$");
        for segment in &self.path {
            match segment {
                Segment::Index(i) => {
                    let _ = write!(out, "[{}]", i);
                }
                Segment::Key(k) if is_identifier(k) => {
                    out.push('.');
                    out.push_str(k);
                }
                Segment::Key(k) => {
                    out.push('[');
                    write_string(k, &mut out);
                    out.push(']');
                }
            }
        }
        out
    }

    fn visit(&mut self, value: &ArgValue) -> KeyResult<JsonValue> {
        self.nodes += 1;
        if self.nodes > self.limits.max_nodes {
            return Err(ErrorCode::E114_TooManyNodes(
                self.nodes,
                self.limits.max_nodes,
            ));
        }

        match value {
            ArgValue::Null => Ok(JsonValue::Null),
            ArgValue::Bool(b) => Ok(JsonValue::Bool(*b)),
            ArgValue::Int(i) => Number::from_i64(*i)
                .map(JsonValue::Number)
                .ok_or_else(|| ErrorCode::E105_InexactInteger(self.path_string(), *i)),
            ArgValue::Float(f) => Number::from_f64(*f)
                .map(JsonValue::Number)
                .ok_or_else(|| ErrorCode::E104_NonFiniteNumber(self.path_string())),
            ArgValue::String(s) => {
                self.check_string(s)?;
                Ok(JsonValue::String(s.clone()))
            }
            ArgValue::Array(items) => self.visit_array(items),
            ArgValue::Object(map) => self.visit_object(map),
            ArgValue::Undefined => Err(ErrorCode::E100_AbsentValue(self.path_string())),
            ArgValue::Function(_) => Err(ErrorCode::E101_Callable(self.path_string())),
            ArgValue::Symbol(_) => Err(ErrorCode::E102_Symbol(self.path_string())),
            ArgValue::BigInt(_) => Err(ErrorCode::E103_BigInt(self.path_string())),
        }
    }

    fn check_string(&self, s: &str) -> KeyResult<()> {
        let len = s.len() as u64;
        if len > self.limits.max_string_length {
            return Err(ErrorCode::E111_StringTooLong(
                len,
                self.limits.max_string_length,
            ));
        }
        Ok(())
    }

    /// Enter a composite: cycle check first, then the depth limit.
    fn enter(&mut self, id: usize) -> KeyResult<()> {
        if self.ancestors.contains(&id) {
            return Err(ErrorCode::E120_CyclicStructure(self.path_string()));
        }

        self.depth += 1;
        if self.depth > self.limits.max_nesting_depth {
            return Err(ErrorCode::E110_NestingTooDeep(
                self.depth,
                self.limits.max_nesting_depth,
            ));
        }

        self.ancestors.insert(id);
        Ok(())
    }

    fn leave(&mut self, id: usize) {
        self.ancestors.remove(&id);
        self.depth -= 1;
    }

    fn visit_array(&mut self, items: &SharedArray) -> KeyResult<JsonValue> {
        let id = Arc::as_ptr(items) as usize;
        self.enter(id)?;

        // Snapshot and release the lock before descending; oversized
        // arrays are rejected before anything is copied
        let snapshot: Vec<ArgValue> = {
            let guard = items
                .read()
                .map_err(|_| ErrorCode::E130_PoisonedValue(self.path_string()))?;
            let len = guard.len() as u64;
            if len > self.limits.max_array_length {
                return Err(ErrorCode::E113_ArrayTooLong(
                    len,
                    self.limits.max_array_length,
                ));
            }
            guard.clone()
        };

        let mut arr = Vec::with_capacity(snapshot.len());
        for (index, item) in snapshot.iter().enumerate() {
            self.path.push(Segment::Index(index));
            arr.push(self.visit(item)?);
            self.path.pop();
        }

        self.leave(id);
        Ok(JsonValue::Array(arr))
    }

    fn visit_object(&mut self, map: &SharedObject) -> KeyResult<JsonValue> {
        let id = Arc::as_ptr(map) as usize;
        self.enter(id)?;

        let snapshot: Vec<(String, ArgValue)> = {
            let guard = map
                .read()
                .map_err(|_| ErrorCode::E130_PoisonedValue(self.path_string()))?;
            let count = guard.len() as u64;
            if count > self.limits.max_object_fields {
                return Err(ErrorCode::E112_TooManyFields(
                    count,
                    self.limits.max_object_fields,
                ));
            }
            guard.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
        };

        let mut obj = BTreeMap::new();
        for (key, item) in snapshot {
            self.check_string(&key)?;
            self.path.push(Segment::Key(key.clone()));
            let value = self.visit(&item)?;
            self.path.pop();
            obj.insert(key, value);
        }

        self.leave(id);
        Ok(JsonValue::Object(obj))
    }
}

/// Keys that can be shown as `.key` in a path.
fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Convert a request argument into a strict JSON value.
pub fn to_json_value(value: &ArgValue, limits: Limits) -> KeyResult<JsonValue> {
    Validator::new(limits).convert(value)
}

/// Check a request argument, reporting why it is rejected.
pub fn check(value: &ArgValue, limits: Limits) -> KeyResult<()> {
    to_json_value(value, limits).map(|_| ())
}

/// Returns true if the argument is strict JSON within the default limits.
pub fn validate(value: &ArgValue) -> bool {
    check(value, Limits::default()).is_ok()
}
