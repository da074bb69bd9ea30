//! Structural limits for request arguments.
//!
//! Limits bound the work done on a single argument so adversarial input
//! (deep nesting, huge fan-out) is rejected instead of exhausting the stack
//! or stalling a request thread. They decide acceptance only; they never
//! change the canonical form of an accepted value.
//!
//! # Rejections
//!
//! - E110_NestingTooDeep: Maximum nesting depth
//! - E111_StringTooLong: Maximum string (and key) length
//! - E112_TooManyFields: Maximum object fields
//! - E113_ArrayTooLong: Maximum array length
//! - E114_TooManyNodes: Maximum total number of values

/// Structural limits applied while validating a request argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum nesting depth for arrays/objects (E110)
    pub max_nesting_depth: u64,
    /// Maximum string or key length in bytes (E111)
    pub max_string_length: u64,
    /// Maximum number of fields in an object (E112)
    pub max_object_fields: u64,
    /// Maximum number of elements in an array (E113)
    pub max_array_length: u64,
    /// Maximum number of values in the whole argument (E114)
    pub max_nodes: u64,
}

impl Limits {
    /// Default limits for request arguments.
    pub const fn request_args() -> Self {
        Self {
            max_nesting_depth: 64,         // 64 levels
            max_string_length: 1024 * 1024, // 1 MiB
            max_object_fields: 10_000,     // 10,000 fields
            max_array_length: 100_000,     // 100,000 elements
            max_nodes: 100_000,            // 100,000 values
        }
    }

    /// Lenient limits for offline tooling (e.g., key inspection).
    pub const fn lenient() -> Self {
        Self {
            max_nesting_depth: 512,
            max_string_length: 16 * 1024 * 1024,
            max_object_fields: 1_000_000,
            max_array_length: 1_000_000,
            max_nodes: 10_000_000,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::request_args()
    }
}
