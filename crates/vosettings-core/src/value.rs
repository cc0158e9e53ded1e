//! Dynamically-typed setting values.
//!
//! A [`SettingValue`] is the scalar held by every setting: whatever a
//! control reports as its current value. Conversions between the variants
//! are lenient and never fail, so callers can read any value as the type
//! they expect and get a sensible zero value on mismatch.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Flat name-to-value map used for exporting and importing settings.
///
/// Keys are sorted by name; consumers must not rely on any other order.
pub type VariantMap = BTreeMap<String, SettingValue>;

/// A scalar setting value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum SettingValue {
    /// No value (an unset or unreadable property)
    #[default]
    Invalid,
    /// Boolean value (check boxes, radio buttons)
    Bool(bool),
    /// Integer value (spin boxes, indices)
    Int(i64),
    /// Floating point value (double spin boxes)
    Double(f64),
    /// Text value (line edits, font names)
    String(String),
}

impl SettingValue {
    /// Whether this value holds anything at all
    pub fn is_valid(&self) -> bool {
        !matches!(self, SettingValue::Invalid)
    }

    /// Read the value as a boolean.
    ///
    /// Numbers are true when non-zero. Strings are true unless they are
    /// empty, `"0"` or `"false"` (case-insensitive).
    pub fn to_bool(&self) -> bool {
        match self {
            SettingValue::Invalid => false,
            SettingValue::Bool(b) => *b,
            SettingValue::Int(i) => *i != 0,
            SettingValue::Double(d) => *d != 0.0,
            SettingValue::String(s) => {
                let s = s.trim();
                !(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false"))
            }
        }
    }

    /// Read the value as an integer. Doubles round to the nearest integer.
    pub fn to_int(&self) -> i64 {
        match self {
            SettingValue::Invalid => 0,
            SettingValue::Bool(b) => i64::from(*b),
            SettingValue::Int(i) => *i,
            SettingValue::Double(d) => d.round() as i64,
            SettingValue::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().map(|d| d.round() as i64))
                    .unwrap_or(0)
            }
        }
    }

    /// Read the value as a double
    pub fn to_double(&self) -> f64 {
        match self {
            SettingValue::Invalid => 0.0,
            SettingValue::Bool(b) => f64::from(u8::from(*b)),
            SettingValue::Int(i) => *i as f64,
            SettingValue::Double(d) => *d,
            SettingValue::String(s) => s.trim().parse().unwrap_or(0.0),
        }
    }

    /// Read the value as text.
    ///
    /// Doubles use the shortest form that round-trips (`1`, `0.75`).
    pub fn to_text(&self) -> String {
        match self {
            SettingValue::Invalid => String::new(),
            SettingValue::Bool(b) => b.to_string(),
            SettingValue::Int(i) => i.to_string(),
            SettingValue::Double(d) => d.to_string(),
            SettingValue::String(s) => s.clone(),
        }
    }

    /// Short name of the variant, used in logs
    pub fn type_name(&self) -> &'static str {
        match self {
            SettingValue::Invalid => "Invalid",
            SettingValue::Bool(_) => "Bool",
            SettingValue::Int(_) => "Int",
            SettingValue::Double(_) => "Double",
            SettingValue::String(_) => "String",
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Int(value)
    }
}

impl From<i32> for SettingValue {
    fn from(value: i32) -> Self {
        SettingValue::Int(i64::from(value))
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Double(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::String(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::String(value)
    }
}
