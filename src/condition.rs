//! Conditions deciding whether a dependency's action applies
//!
//! On the wire a condition is a JSON array `[kind, ...args]`:
//!
//! ```text
//! ["any"]
//! ["notEmpty"]
//! ["exact", "3"]
//! ["memberOf", ["1", false, "3"]]
//! ```

use crate::value::{format_value, Value};
use serde::de::{self, Deserializer};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

/// Predicate over a master field's value
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Always met, even for empty values
    Any,
    /// Met when the normalized value equals the target
    Exact(Value),
    /// Met when the normalized value is one of the targets
    MemberOf(Vec<Value>),
    /// Met unless the value is null, undefined or the empty string
    NotEmpty,
    /// A kind this engine does not know; never met. Arguments are kept
    /// as they arrived so the condition serializes back unchanged.
    Unknown {
        kind: String,
        args: Vec<serde_json::Value>,
    },
}

impl Condition {
    /// Exact condition with its target normalized up front
    pub fn exact(target: impl Into<Value>) -> Self {
        Condition::Exact(format_value(&target.into()))
    }

    /// Membership condition with every target normalized up front
    pub fn member_of<I, V>(targets: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Condition::MemberOf(
            targets
                .into_iter()
                .map(|v| format_value(&v.into()))
                .collect(),
        )
    }

    /// Wire name of the condition kind
    pub fn kind(&self) -> &str {
        match self {
            Condition::Any => "any",
            Condition::Exact(_) => "exact",
            Condition::MemberOf(_) => "memberOf",
            Condition::NotEmpty => "notEmpty",
            Condition::Unknown { kind, .. } => kind,
        }
    }

    /// Check the condition against a master value
    pub fn met(&self, value: &Value) -> bool {
        evaluate(self, value)
    }
}

/// Decide whether `value` satisfies `condition`.
///
/// Pure and deterministic. An unknown condition kind is logged and
/// reported as not met.
pub fn evaluate(condition: &Condition, value: &Value) -> bool {
    match condition {
        Condition::Any => true,
        Condition::NotEmpty => !value.is_blank(),
        Condition::Exact(target) => format_value(value) == format_value(target),
        // Only the checked value is normalized; targets arrive normalized.
        Condition::MemberOf(targets) => targets.contains(&format_value(value)),
        Condition::Unknown { kind, .. } => {
            tracing::error!("Unknown dependency condition: {kind}");
            false
        }
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let args = match self {
            Condition::Exact(target) => vec![format_value(target).to_json()],
            Condition::MemberOf(targets) => vec![serde_json::Value::Array(
                targets.iter().map(|v| format_value(v).to_json()).collect(),
            )],
            Condition::Unknown { args, .. } => args.clone(),
            Condition::Any | Condition::NotEmpty => Vec::new(),
        };
        let mut seq = serializer.serialize_seq(Some(1 + args.len()))?;
        seq.serialize_element(self.kind())?;
        for arg in &args {
            seq.serialize_element(arg)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
        let mut parts = raw.into_iter();
        let kind = match parts.next() {
            Some(serde_json::Value::String(kind)) => kind,
            Some(other) => {
                return Err(de::Error::custom(format!(
                    "condition kind must be a string, got {other}"
                )))
            }
            None => return Err(de::Error::custom("condition must not be empty")),
        };
        let arg = parts.next();

        match kind.as_str() {
            "any" => Ok(Condition::Any),
            "notEmpty" => Ok(Condition::NotEmpty),
            "exact" => {
                let arg = arg.ok_or_else(|| de::Error::custom("exact condition needs a value"))?;
                Ok(Condition::Exact(Value::from_json(arg)))
            }
            "memberOf" => match arg {
                Some(serde_json::Value::Array(items)) => Ok(Condition::MemberOf(
                    items.into_iter().map(Value::from_json).collect(),
                )),
                Some(other) => Err(de::Error::custom(format!(
                    "memberOf condition needs a list, got {other}"
                ))),
                None => Err(de::Error::custom("memberOf condition needs a list")),
            },
            _ => Ok(Condition::Unknown {
                args: arg.into_iter().chain(parts).collect(),
                kind,
            }),
        }
    }
}
