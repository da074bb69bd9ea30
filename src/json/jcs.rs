//! Canonical JSON serialization (RFC 8785 style).
//!
//! Produces the single canonical text of a [`JsonValue`]: object keys in
//! code-point order, no insignificant whitespace, numbers via
//! [`format_number`], strings escaped only where JSON requires it.
//!
//! # Rules
//!
//! - Objects: `{"k":v,...}`, keys ascending by Unicode code point
//! - Arrays: `[v,...]` in original order
//! - Strings: `"` and `\` escaped, control characters escaped, everything
//!   else (including non-ASCII) emitted literally
//! - Numbers: ECMAScript shortest round-trip form, `-0` as `0`

use std::collections::BTreeMap;
use std::fmt::Write;

use super::number::format_number;
use super::types::JsonValue;
use crate::error::{ErrorCode, KeyResult};

/// Serialize a JsonValue to its canonical text.
///
/// `max_depth` bounds array/object nesting the same way the validator does,
/// so a value assembled by hand cannot exhaust the stack.
pub fn canonicalize(value: &JsonValue, max_depth: u64) -> KeyResult<String> {
    let mut output = String::new();
    serialize_value(value, 0, max_depth, &mut output)?;
    Ok(output)
}

/// Serialize a JsonValue to the output string.
fn serialize_value(
    value: &JsonValue,
    depth: u64,
    max_depth: u64,
    output: &mut String,
) -> KeyResult<()> {
    match value {
        JsonValue::Null => output.push_str("null"),
        JsonValue::Bool(true) => output.push_str("true"),
        JsonValue::Bool(false) => output.push_str("false"),
        JsonValue::Number(n) => output.push_str(&format_number(*n)),
        JsonValue::String(s) => write_string(s, output),
        JsonValue::Array(arr) => serialize_array(arr, depth + 1, max_depth, output)?,
        JsonValue::Object(obj) => serialize_object(obj, depth + 1, max_depth, output)?,
    }
    Ok(())
}

fn check_depth(depth: u64, max_depth: u64) -> KeyResult<()> {
    if depth > max_depth {
        return Err(ErrorCode::E110_NestingTooDeep(depth, max_depth));
    }
    Ok(())
}

/// Write a string with JSON escaping.
pub(crate) fn write_string(s: &str, output: &mut String) {
    output.push('"');
    for ch in s.chars() {
        match ch {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\x08' => output.push_str("\\b"),
            '\x0C' => output.push_str("\\f"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            c if c < '\x20' => {
                // Other control characters as \u00xx
                let _ = write!(output, "\\u{:04x}", c as u32);
            }
            c => output.push(c),
        }
    }
    output.push('"');
}

/// Serialize an array.
fn serialize_array(
    arr: &[JsonValue],
    depth: u64,
    max_depth: u64,
    output: &mut String,
) -> KeyResult<()> {
    check_depth(depth, max_depth)?;
    output.push('[');
    for (i, value) in arr.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        serialize_value(value, depth, max_depth, output)?;
    }
    output.push(']');
    Ok(())
}

/// Serialize an object with keys in code-point order.
fn serialize_object(
    obj: &BTreeMap<String, JsonValue>,
    depth: u64,
    max_depth: u64,
    output: &mut String,
) -> KeyResult<()> {
    check_depth(depth, max_depth)?;

    output.push('{');

    // BTreeMap<String, _> iterates in byte order, which for UTF-8 is
    // code-point order
    for (i, (key, v)) in obj.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        write_string(key, output);
        output.push(':');
        serialize_value(v, depth, max_depth, output)?;
    }

    output.push('}');
    Ok(())
}
