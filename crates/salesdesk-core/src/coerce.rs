//! # Numeric Coercion
//!
//! Parse-or-zero conversion applied wherever raw text enters the order model.
//!
//! ## Coercion Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Coercion Happens                             │
//! │                                                                         │
//! │  User types "3"  ──────┐                                               │
//! │                        │                                                │
//! │  JSON 3 / "3" / null ──┼──► parse_or_zero ──► OrderLine.quantity: f64  │
//! │                        │                                                │
//! │  User types "abc" ─────┘         ("abc" → 0.0, never an error)         │
//! │                                                                         │
//! │  Inside the model every number is already an f64.                      │
//! │  Nothing downstream re-parses text.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Prefix Parsing
//! Input is read the way a form field is read: leading whitespace is skipped
//! and the longest leading decimal literal is taken, so `"12kg"` is `12` and
//! `"  .5"` is `0.5`. No literal at all, or a non-finite result, gives `0`.
//!
//! ## Usage
//! ```rust
//! use salesdesk_core::coerce::{parse_int_or_zero, parse_or_zero};
//!
//! assert_eq!(parse_or_zero("10.50"), 10.5);
//! assert_eq!(parse_or_zero("abc"), 0.0);
//! assert_eq!(parse_int_or_zero("2.9"), 2);
//! ```

use serde::{Deserialize, Deserializer};
use serde_json::Value;

// =============================================================================
// Text Coercion
// =============================================================================

/// Parses the leading decimal number of `raw`, or returns `0.0`.
///
/// ## Accepted Grammar
/// `[+-]? (digits ('.' digits?)? | '.' digits) ([eE] [+-]? digits)?`
///
/// ## Example
/// ```rust
/// use salesdesk_core::coerce::parse_or_zero;
///
/// assert_eq!(parse_or_zero("3"), 3.0);
/// assert_eq!(parse_or_zero(" -2.5e1 units"), -25.0);
/// assert_eq!(parse_or_zero(""), 0.0);
/// assert_eq!(parse_or_zero("1e999"), 0.0); // overflows to infinity
/// ```
pub fn parse_or_zero(raw: &str) -> f64 {
    let trimmed = raw.trim_start();
    let len = decimal_prefix_len(trimmed);
    if len == 0 {
        return 0.0;
    }

    match trimmed[..len].parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Parses the leading integer of `raw`, or returns `0`.
///
/// Anything after the integer digits (a decimal point, units) is ignored,
/// so `"2.9"` is `2` and `"-7 boxes"` is `-7`.
pub fn parse_int_or_zero(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let bytes = trimmed.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return 0;
    }

    trimmed[..end].parse::<i64>().unwrap_or(0)
}

/// Truncates a coerced quantity toward zero for the submission payload.
///
/// Values outside the `i64` range saturate.
#[inline]
pub fn truncate_quantity(quantity: f64) -> i64 {
    if quantity.is_finite() {
        quantity.trunc() as i64
    } else {
        0
    }
}

/// Returns the byte length of the longest leading decimal literal.
fn decimal_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i = 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        let mut j = i + 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        frac_digits = j - (i + 1);
        if int_digits > 0 || frac_digits > 0 {
            i = j;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    // Exponent only counts when at least one digit follows it
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}

// =============================================================================
// Lenient JSON Decoding
// =============================================================================
// The order store is not strict about types: prices may arrive as numbers
// or strings, optional text as null, ids as numbers. These deserializers
// funnel every shape through the same coercion rules.

/// Deserializes a number, numeric string, bool or null into an `f64`.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Some(Value::String(s)) => parse_or_zero(&s),
        _ => 0.0,
    })
}

/// Deserializes a string, number or null into a `String` (null → empty).
pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// Deserializes an optional identifier that may be a number or a string.
pub fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
