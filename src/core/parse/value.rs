use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar extracted from a kernel report or captured command output.
///
/// Report text is untyped, so every extracted field goes through the same
/// coercion rule: numeric-looking text becomes an integer, anything else is
/// kept verbatim as trimmed text. The `Float` variant carries fractional
/// scalars that callers compute themselves (per-core frequencies and the
/// like); coercion never produces it, because a fractional token in a report
/// must survive unchanged rather than be rounded through a lossy parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Coerces raw report text into a scalar.
    ///
    /// The input is trimmed first. Text shaped like an optionally-signed
    /// decimal integer becomes `Integer`; everything else (including
    /// overflowing digit runs) is preserved as `Text`. Nothing is ever
    /// dropped silently.
    pub fn coerce(raw: &str) -> Value {
        let trimmed = raw.trim();
        if looks_like_integer(trimmed) {
            if let Ok(n) = trimmed.parse::<i64>() {
                return Value::Integer(n);
            }
        }
        Value::Text(trimmed.to_string())
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

/// True for an optional leading minus sign followed by one or more ASCII
/// digits. Deliberately stricter than `i64::from_str`, which also accepts a
/// leading plus sign.
fn looks_like_integer(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
