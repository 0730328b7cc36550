//! Field values as seen by conditions and the lookup wire
//!
//! A master field can hold anything a form control produces: text,
//! numbers, booleans, dates, multi-select lists. Conditions never compare
//! raw values; both sides go through [`format_value`] first.

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use std::collections::BTreeMap;

/// A value read from (or compared against) a form field
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value at all, e.g. the field does not exist
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    /// Calendar date in the local calendar
    Date(NaiveDate),
    /// Composite value such as a multi-select
    List(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Convert a decoded JSON value
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert back to JSON; dates become `YYYY-MM-DD` strings
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Undefined | Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Date(d) => serde_json::Value::String(format_date(d)),
            Value::List(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
            Value::Object(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }

    /// True for `Null`, `Undefined` and the empty string.
    ///
    /// `0`, `false` and empty lists are values, not emptiness.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => true,
            Value::Str(s) => s.is_empty(),
            _ => false,
        }
    }

    /// String form sent as the `value` field of a lookup request
    pub fn to_form_string(&self) -> String {
        match format_value(self) {
            Value::Undefined | Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Str(s) => s,
            Value::List(items) => items
                .iter()
                .map(Value::to_form_string)
                .collect::<Vec<_>>()
                .join(","),
            other => stringify(&other),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Normalize a value for comparison.
///
/// Dates become `YYYY-MM-DD`, lists are mapped element-wise, booleans,
/// `Null` and `Undefined` pass through, everything else is stringified.
pub fn format_value(value: &Value) -> Value {
    match value {
        Value::Date(d) => Value::Str(format_date(d)),
        Value::List(items) => Value::List(items.iter().map(format_value).collect()),
        Value::Bool(_) | Value::Null | Value::Undefined => value.clone(),
        other => Value::Str(stringify(other)),
    }
}

fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Number text as a browser prints it: plain decimals in
/// `[1e-6, 1e21)`, exponent form (`1e+21`, `1.5e-7`) outside.
fn format_number(n: f64) -> String {
    if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let text = format!("{n:e}");
        match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        }
    } else {
        n.to_string()
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(*n),
        Value::Str(s) => s.clone(),
        Value::Date(d) => format_date(d),
        Value::List(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_json().to_string(),
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
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
        Value::Number(n)
    }
}

// Integers past 2^53 round to the nearest representable f64.
macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

value_from_int!(i32, i64, u32, u64, usize);

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

/// Takes the calendar date in the local time zone, whatever zone `dt`
/// carries.
impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(dt: DateTime<Tz>) -> Self {
        Value::Date(dt.with_timezone(&Local).date_naive())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::from_json(json)
    }
}
