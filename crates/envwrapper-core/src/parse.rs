//! Coercion of raw configuration strings
//!
//! The accessor only ever hands these functions already-trimmed values. They
//! are public so hosts reading values from elsewhere get identical rules.

use thiserror::Error;

/// Why a raw value could not be coerced
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseValueError {
    #[error("Value is empty")]
    Empty,

    #[error("Invalid boolean: {0}")]
    InvalidBool(String),

    #[error("Invalid integer: {0}")]
    InvalidInt(String),
}

/// Parse a boolean literal
///
/// `1`, `t`, `true` are true and `0`, `f`, `false` are false, compared
/// ASCII case-insensitively. Surrounding whitespace is not accepted.
///
/// ```
/// use envwrapper_core::parse::parse_bool;
///
/// assert_eq!(parse_bool("TRUE"), Ok(true));
/// assert_eq!(parse_bool("f"), Ok(false));
/// assert!(parse_bool("yes").is_err());
/// ```
pub fn parse_bool(value: &str) -> Result<bool, ParseValueError> {
    if value.is_empty() {
        return Err(ParseValueError::Empty);
    }
    match value.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Ok(true),
        "0" | "f" | "false" => Ok(false),
        _ => Err(ParseValueError::InvalidBool(value.to_string())),
    }
}

/// Parse a base-10 signed 64-bit integer with an optional sign
pub fn parse_int(value: &str) -> Result<i64, ParseValueError> {
    if value.is_empty() {
        return Err(ParseValueError::Empty);
    }
    value
        .parse::<i64>()
        .map_err(|_| ParseValueError::InvalidInt(value.to_string()))
}

/// Split `value` on the literal `separator`, trimming every part and dropping
/// the ones left empty
///
/// An empty separator does not split: the trimmed value is the only part.
pub fn split_list(value: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        let whole = value.trim();
        return if whole.is_empty() {
            Vec::new()
        } else {
            vec![whole.to_string()]
        };
    }

    value
        .split(separator)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
