//! Rejection codes for cache-key derivation.
//!
//! Every reason a request argument cannot be turned into a key has a stable
//! numeric code and name, so callers and logs can tell a legitimately
//! non-JSON argument apart from a misbehaving upstream.
//!
//! Codes are grouped by [`ErrorCategory`]:
//!
//! - 100-109: value is outside strict JSON
//! - 110-119: structural limit exceeded
//! - 120-129: cyclic structure
//! - 130-139: value could not be read

use thiserror::Error;

/// Coarse classification of a rejection.
///
/// At the adapter boundary all three collapse into "not cacheable"; the
/// distinction is kept for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The value (or a nested value) has no strict JSON representation.
    NotJsonValue,
    /// The value exceeds a configured structural limit.
    StructuralLimitExceeded,
    /// A composite value references one of its own ancestors.
    CyclicStructure,
}

/// A rejection raised while validating or canonicalizing a request argument.
///
/// Path parameters are JSON paths (`$`, `$.a[2]`) to the offending element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[allow(non_camel_case_types)]
pub enum ErrorCode {
    /// Absent/undefined marker (code 100)
    #[error("E100_AbsentValue({0})")]
    E100_AbsentValue(/* path */ String),

    /// Callable value (code 101)
    #[error("E101_Callable({0})")]
    E101_Callable(/* path */ String),

    /// Symbolic identifier (code 102)
    #[error("E102_Symbol({0})")]
    E102_Symbol(/* path */ String),

    /// Arbitrary-precision integer (code 103)
    #[error("E103_BigInt({0})")]
    E103_BigInt(/* path */ String),

    /// NaN or an infinity (code 104)
    #[error("E104_NonFiniteNumber({0})")]
    E104_NonFiniteNumber(/* path */ String),

    /// Integer with no exact double representation (code 105)
    #[error("E105_InexactInteger({0}, {1})")]
    E105_InexactInteger(/* path */ String, /* value */ i64),

    /// Nesting deeper than allowed (code 110)
    #[error("E110_NestingTooDeep({0}, {1})")]
    E110_NestingTooDeep(/* depth */ u64, /* limit */ u64),

    /// String or key longer than allowed (code 111)
    #[error("E111_StringTooLong({0}, {1})")]
    E111_StringTooLong(/* length */ u64, /* limit */ u64),

    /// Object with too many fields (code 112)
    #[error("E112_TooManyFields({0}, {1})")]
    E112_TooManyFields(/* count */ u64, /* limit */ u64),

    /// Array with too many elements (code 113)
    #[error("E113_ArrayTooLong({0}, {1})")]
    E113_ArrayTooLong(/* length */ u64, /* limit */ u64),

    /// Too many values in total (code 114)
    #[error("E114_TooManyNodes({0}, {1})")]
    E114_TooManyNodes(/* count */ u64, /* limit */ u64),

    /// Reference cycle (code 120)
    #[error("E120_CyclicStructure({0})")]
    E120_CyclicStructure(/* path */ String),

    /// Composite whose lock was poisoned by a panicking writer (code 130)
    #[error("E130_PoisonedValue({0})")]
    E130_PoisonedValue(/* path */ String),
}

impl ErrorCode {
    /// Get the numeric error code.
    pub fn code(&self) -> u32 {
        match self {
            ErrorCode::E100_AbsentValue(_) => 100,
            ErrorCode::E101_Callable(_) => 101,
            ErrorCode::E102_Symbol(_) => 102,
            ErrorCode::E103_BigInt(_) => 103,
            ErrorCode::E104_NonFiniteNumber(_) => 104,
            ErrorCode::E105_InexactInteger(_, _) => 105,
            ErrorCode::E110_NestingTooDeep(_, _) => 110,
            ErrorCode::E111_StringTooLong(_, _) => 111,
            ErrorCode::E112_TooManyFields(_, _) => 112,
            ErrorCode::E113_ArrayTooLong(_, _) => 113,
            ErrorCode::E114_TooManyNodes(_, _) => 114,
            ErrorCode::E120_CyclicStructure(_) => 120,
            ErrorCode::E130_PoisonedValue(_) => 130,
        }
    }

    /// Get the error name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::E100_AbsentValue(_) => "E100_AbsentValue",
            ErrorCode::E101_Callable(_) => "E101_Callable",
            ErrorCode::E102_Symbol(_) => "E102_Symbol",
            ErrorCode::E103_BigInt(_) => "E103_BigInt",
            ErrorCode::E104_NonFiniteNumber(_) => "E104_NonFiniteNumber",
            ErrorCode::E105_InexactInteger(_, _) => "E105_InexactInteger",
            ErrorCode::E110_NestingTooDeep(_, _) => "E110_NestingTooDeep",
            ErrorCode::E111_StringTooLong(_, _) => "E111_StringTooLong",
            ErrorCode::E112_TooManyFields(_, _) => "E112_TooManyFields",
            ErrorCode::E113_ArrayTooLong(_, _) => "E113_ArrayTooLong",
            ErrorCode::E114_TooManyNodes(_, _) => "E114_TooManyNodes",
            ErrorCode::E120_CyclicStructure(_) => "E120_CyclicStructure",
            ErrorCode::E130_PoisonedValue(_) => "E130_PoisonedValue",
        }
    }

    /// Classify the rejection.
    ///
    /// A poisoned composite cannot be read at all, so it is reported as a
    /// non-JSON value rather than a limit or cycle.
    pub fn category(&self) -> ErrorCategory {
        match self.code() {
            110..=119 => ErrorCategory::StructuralLimitExceeded,
            120..=129 => ErrorCategory::CyclicStructure,
            _ => ErrorCategory::NotJsonValue,
        }
    }
}

/// Result type for key derivation operations.
pub type KeyResult<T> = Result<T, ErrorCode>;
