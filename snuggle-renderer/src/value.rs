//! Context values — the tagged union bound into templates at render time.
//!
//! The source data for a render is an open-ended key/value structure;
//! modeling each value as an explicit variant pins down the exact
//! truthiness and stringification rules the renderer guarantees.

use std::collections::BTreeMap;

/// One entry of a list-valued context key (a post or category row).
/// Items are flat mappings; their fields override the outer context
/// inside a loop body.
pub type Item = BTreeMap<String, Value>;

/// A single context value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    Str(String),
    Num(f64),
    Bool(bool),
    List(Vec<Item>),
    #[default]
    Absent,
}

impl Value {
    /// The truthiness policy for conditional blocks.
    ///
    /// Falsy: absent, `false`, `0` (including `0.0` and NaN), the empty
    /// string, the empty list. Everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Absent => false,
            Value::Bool(b) => *b,
            Value::Num(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
        }
    }

    /// Canonical string form used by variable substitution, before any
    /// HTML escaping. Absent values and lists render empty — a list has
    /// no scalar form and substituting one is a template mistake that
    /// must degrade silently.
    pub fn render_string(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Num(n) => format_number(*n),
            Value::Bool(b) => b.to_string(),
            Value::List(_) => String::new(),
            Value::Absent => String::new(),
        }
    }

    /// Convert a JSON value into a context value.
    ///
    /// `null` maps to [`Value::Absent`]. Arrays keep only their object
    /// entries (scalar entries have no item shape and are skipped).
    /// Objects outside arrays are unsupported and map to absent.
    pub fn from_json(value: &serde_json::Value) -> Value {
        match value {
            serde_json::Value::Null => Value::Absent,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Num(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::Str(s.clone()),
            serde_json::Value::Array(entries) => Value::List(
                entries
                    .iter()
                    .filter_map(|entry| entry.as_object())
                    .map(|fields| {
                        fields
                            .iter()
                            .map(|(k, v)| (k.clone(), Value::from_json(v)))
                            .collect()
                    })
                    .collect(),
            ),
            serde_json::Value::Object(_) => Value::Absent,
        }
    }
}

/// Integral finite numbers print without a fractional part.
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= i64::MAX as f64 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Num(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Num(f64::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Num(n as f64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Num(n as f64)
    }
}

impl From<Vec<Item>> for Value {
    fn from(items: Vec<Item>) -> Self {
        Value::List(items)
    }
}

impl From<Option<String>> for Value {
    fn from(opt: Option<String>) -> Self {
        match opt {
            Some(s) => Value::Str(s),
            None => Value::Absent,
        }
    }
}
