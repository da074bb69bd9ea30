//! Dynamic request-argument values.
//!
//! Request handlers receive arguments as loosely typed values: they may carry
//! absent markers, callables, symbols, big integers or non-finite floats, and
//! their arrays and objects are shared references that can form cycles.
//! [`ArgValue`] models exactly that. Nothing here is guaranteed to be JSON;
//! [`crate::json::validate`] decides that.

use std::sync::{Arc, RwLock};

use indexmap::IndexMap;

use crate::json::number::exact_f64;

/// Shared, mutable array contents.
pub type SharedArray = Arc<RwLock<Vec<ArgValue>>>;

/// Shared, mutable object contents in insertion order.
pub type SharedObject = Arc<RwLock<IndexMap<String, ArgValue>>>;

/// A request argument as handed over by the calling service.
///
/// Cloning an `Array` or `Object` shares the underlying composite, so a value
/// can be inserted into itself to build a cycle.
#[derive(Debug, Clone, Default)]
pub enum ArgValue {
    /// Absent/missing value
    #[default]
    Undefined,
    /// Explicit null
    Null,
    /// Boolean
    Bool(bool),
    /// Machine integer
    Int(i64),
    /// Double-precision float (may be non-finite)
    Float(f64),
    /// Arbitrary-precision integer as decimal digits
    BigInt(String),
    /// UTF-8 string
    String(String),
    /// Opaque symbol with optional description
    Symbol(Option<String>),
    /// Callable, identified by name
    Function(String),
    /// Shared array
    Array(SharedArray),
    /// Shared object
    Object(SharedObject),
}

impl ArgValue {
    /// Build a fresh array.
    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator<Item = ArgValue>,
    {
        ArgValue::Array(Arc::new(RwLock::new(items.into_iter().collect())))
    }

    /// Build a fresh object; later duplicates of a key overwrite earlier ones.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ArgValue)>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v))
            .collect::<IndexMap<String, ArgValue>>();
        ArgValue::Object(Arc::new(RwLock::new(map)))
    }

    /// Append to an array in place.
    ///
    /// Returns false if this is not an array or its lock is poisoned.
    pub fn push(&self, value: ArgValue) -> bool {
        match self {
            ArgValue::Array(items) => match items.write() {
                Ok(mut guard) => {
                    guard.push(value);
                    true
                }
                Err(_) => false,
            },
            _ => false,
        }
    }

    /// Insert into an object in place, replacing any existing entry.
    ///
    /// Returns false if this is not an object or its lock is poisoned.
    pub fn insert(&self, key: impl Into<String>, value: ArgValue) -> bool {
        match self {
            ArgValue::Object(map) => match map.write() {
                Ok(mut guard) => {
                    guard.insert(key.into(), value);
                    true
                }
                Err(_) => false,
            },
            _ => false,
        }
    }
}

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        ArgValue::Bool(b)
    }
}

impl From<i32> for ArgValue {
    fn from(n: i32) -> Self {
        ArgValue::Int(i64::from(n))
    }
}

impl From<i64> for ArgValue {
    fn from(n: i64) -> Self {
        ArgValue::Int(n)
    }
}

impl From<f64> for ArgValue {
    fn from(f: f64) -> Self {
        ArgValue::Float(f)
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::String(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::String(s)
    }
}

impl From<Vec<ArgValue>> for ArgValue {
    fn from(items: Vec<ArgValue>) -> Self {
        ArgValue::array(items)
    }
}

impl From<serde_json::Value> for ArgValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ArgValue::Null,
            serde_json::Value::Bool(b) => ArgValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) if exact_f64(i).is_some() => ArgValue::Int(i),
                // A JSON number token denotes its nearest double, like `0.1`
                _ => ArgValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => ArgValue::String(s),
            serde_json::Value::Array(items) => {
                ArgValue::array(items.into_iter().map(ArgValue::from))
            }
            serde_json::Value::Object(map) => {
                ArgValue::object(map.into_iter().map(|(k, v)| (k, ArgValue::from(v))))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_preserves_insertion_order() {
        let value = ArgValue::object([("b", ArgValue::Int(2)), ("a", ArgValue::Int(1))]);
        match value {
            ArgValue::Object(map) => {
                let keys: Vec<String> = map.read().unwrap().keys().cloned().collect();
                assert_eq!(keys, vec!["b".to_string(), "a".to_string()]);
            }
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn test_clone_shares_composite() {
        let arr = ArgValue::array(Vec::new());
        let alias = arr.clone();
        assert!(alias.push(ArgValue::Null));
        match arr {
            ArgValue::Array(items) => assert_eq!(items.read().unwrap().len(), 1),
            other => panic!("expected array, got {:?}", other),
        }
    }

    #[test]
    fn test_push_and_insert_on_wrong_kind() {
        assert!(!ArgValue::Null.push(ArgValue::Null));
        assert!(!ArgValue::array(Vec::new()).insert("k", ArgValue::Null));
        assert!(ArgValue::object(Vec::<(String, ArgValue)>::new()).insert("k", ArgValue::Null));
    }

    #[test]
    fn test_from_serde_json() {
        let value = ArgValue::from(json!({"n": 1, "f": 1.5, "big": u64::MAX, "s": "x"}));
        let ArgValue::Object(map) = value else {
            panic!("expected object");
        };
        let map = map.read().unwrap();
        assert!(matches!(map.get("n"), Some(ArgValue::Int(1))));
        assert!(matches!(map.get("f"), Some(ArgValue::Float(f)) if *f == 1.5));
        assert!(matches!(map.get("big"), Some(ArgValue::Float(f)) if *f == 18446744073709551615u64 as f64));
        assert!(matches!(map.get("s"), Some(ArgValue::String(s)) if s == "x"));
    }

    #[test]
    fn test_arg_value_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ArgValue>();
    }
}
