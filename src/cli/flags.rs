//! Dynamic `--flag value` parsing with value type inference

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

const FLAG_PREFIX: &str = "--";

/// Flag name to inferred value, sorted by name
pub type FlagMap = BTreeMap<String, FlagValue>;

/// A flag value after type inference
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlagValue {
    Integer(i64),
    Boolean(bool),
    Float(f64),
    /// Decoded JSON array or object; numbers inside are always floats
    Json(Value),
    String(String),
}

impl FlagValue {
    /// Infer the type of a raw flag value.
    ///
    /// Tried in order: integer, boolean (`t`, `true`, `True`, `TRUE` and the
    /// `false` counterparts), float, JSON array/object, and finally the raw
    /// string unchanged.
    pub fn infer(raw: &str) -> Self {
        if let Ok(int) = raw.parse::<i64>() {
            return Self::Integer(int);
        }

        match raw {
            "t" | "T" | "true" | "True" | "TRUE" => return Self::Boolean(true),
            "f" | "F" | "false" | "False" | "FALSE" => return Self::Boolean(false),
            _ => {}
        }

        if let Ok(float) = raw.parse::<f64>() {
            if float.is_finite() {
                return Self::Float(float);
            }
        }

        let trimmed = raw.trim();
        if trimmed.starts_with('[') || trimmed.starts_with('{') {
            if let Ok(json) = serde_json::from_str::<Value>(trimmed) {
                return Self::Json(numbers_as_floats(json));
            }
        }

        Self::String(raw.to_string())
    }
}

/// Plain rendering used for query parameters.
///
/// Arrays print as `[a b]` and objects as `map[k:v]`, not as JSON.
impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(int) => write!(f, "{}", int),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Float(float) => write!(f, "{}", float),
            Self::Json(value) => write_plain(f, value),
            Self::String(s) => f.write_str(s),
        }
    }
}

fn write_plain(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{}", b),
        Value::Number(n) => match n.as_f64() {
            Some(float) => write!(f, "{}", float),
            None => write!(f, "{}", n),
        },
        Value::String(s) => f.write_str(s),
        Value::Array(items) => {
            f.write_str("[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write_plain(f, item)?;
            }
            f.write_str("]")
        }
        Value::Object(map) => {
            f.write_str("map[")?;
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}:", key)?;
                write_plain(f, item)?;
            }
            f.write_str("]")
        }
    }
}

fn numbers_as_floats(value: Value) -> Value {
    match value {
        Value::Number(n) => n.as_f64().map(Value::from).unwrap_or(Value::Number(n)),
        Value::Array(items) => Value::Array(items.into_iter().map(numbers_as_floats).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, item)| (key, numbers_as_floats(item)))
                .collect(),
        ),
        other => other,
    }
}

/// Parse the tokens following the resource path into a [`FlagMap`].
///
/// `--key=value` and `--key value` are both accepted; a flag followed by
/// another flag (or nothing) gets an empty value. Tokens that are not
/// flags are skipped.
pub fn parse_flags<S: AsRef<str>>(tokens: &[S]) -> FlagMap {
    let mut flags = FlagMap::new();
    let mut tokens = tokens.iter().map(AsRef::as_ref).peekable();

    while let Some(token) = tokens.next() {
        let Some(flag) = token.strip_prefix(FLAG_PREFIX) else {
            continue;
        };

        let (key, raw) = match flag.split_once('=') {
            Some((key, raw)) => (key, raw),
            None => {
                let raw = tokens
                    .next_if(|next| !next.starts_with(FLAG_PREFIX))
                    .unwrap_or("");
                (flag, raw)
            }
        };

        flags.insert(key.to_string(), FlagValue::infer(raw));
    }

    flags
}
