//! Dynamically typed values taken from text.
//!
//! A command-line argument is an integer if it parses as one, else a real if
//! it parses as one, else plain text.  The text variant borrows from its
//! source, so coercion never copies.

use std::fmt;

use crate::arg::FormatArg;
use crate::spec::FormatSpec;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Int(i64),
    Float(f64),
    Str(&'a str),
}

impl<'a> Value<'a> {
    /// Surrounding whitespace is ignored for the numeric forms only.
    pub fn parse(src: &'a str) -> Self {
        let trimmed = src.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            Value::Int(n)
        } else if let Some(x) = parse_real(trimmed) {
            Value::Float(x)
        } else {
            Value::Str(src)
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Float(_) => "real",
            Value::Str(_) => "string",
        }
    }
}

/// `f64::from_str` also accepts `inf`, `nan` and `infinity`; those stay text.
fn parse_real(s: &str) -> Option<f64> {
    if !s.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl FormatArg for Value<'_> {
    fn write_arg(&self, out: &mut dyn fmt::Write, spec: &FormatSpec) -> fmt::Result {
        match self {
            Value::Int(n) => n.write_arg(out, spec),
            Value::Float(x) => x.write_arg(out, spec),
            Value::Str(s) => s.write_arg(out, spec),
        }
    }
}

impl From<i64> for Value<'_> {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value<'_> {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::Str(s)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
