//! Dynamic values for condition evaluation.
//!
//! Conditions address resources by dotted paths (`tags.owner`, `metadata.sku.tier`). Paths
//! resolve to a [`Value`]; any segment that does not exist resolves the whole path to
//! [`Value::Null`].
//!
//! Enum fields (`provider`, `status`, `severity`) are plain strings here. Write
//! `status == idle`; a trailing segment such as `status.value` resolves to null.

use resguard_types::Resource;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    /// Integers and floats share one representation, so `1 == 1.0`.
    Number(f64),
    Str(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Numeric coercion used by ordering comparisons.
    ///
    /// Booleans coerce to 1/0 and strings are parsed after trimming. Null, lists and maps
    /// do not coerce.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Str(s) => s.trim().parse::<f64>().ok(),
            Value::Null | Value::List(_) | Value::Map(_) => None,
        }
    }

    fn get(&self, key: &str) -> Value {
        match self {
            Value::Map(m) => m.get(key).cloned().unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }
}

impl From<&JsonValue> for Value {
    fn from(v: &JsonValue) -> Self {
        match v {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            JsonValue::String(s) => Value::Str(s.clone()),
            JsonValue::Array(items) => Value::List(items.iter().map(Value::from).collect()),
            JsonValue::Object(map) => Value::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

fn opt_str(s: &Option<String>) -> Value {
    // Absent optional text fields read as empty strings, not null.
    Value::Str(s.clone().unwrap_or_default())
}

fn field(resource: &Resource, name: &str) -> Value {
    match name {
        "provider" => Value::from(resource.provider.as_str()),
        "resource_type" => Value::from(resource.resource_type.as_str()),
        "resource_id" => Value::from(resource.resource_id.as_str()),
        "name" => Value::from(resource.name.as_str()),
        "region" => Value::from(resource.region.as_str()),
        "account_id" | "subscription_or_account" => Value::from(resource.account_id.as_str()),
        "account_name" | "subscription_name" => Value::from(resource.account_name.as_str()),
        "resource_group" => opt_str(&resource.resource_group),
        "status" => Value::from(resource.status.as_str()),
        "severity" => Value::from(resource.severity().as_str()),
        "size_gb" => Value::Number(resource.size_gb),
        "estimated_monthly_cost" => Value::Number(resource.estimated_monthly_cost()),
        "age_days" => Value::Number(f64::from(resource.age_days)),
        "created_time" => opt_str(&resource.created_time),
        "last_used_time" => opt_str(&resource.last_used_time),
        "source_resource_id" => opt_str(&resource.source_resource_id),
        "tags" => Value::Map(
            resource
                .tags
                .iter()
                .map(|(k, v)| (k.clone(), Value::Str(v.clone())))
                .collect(),
        ),
        "metadata" => Value::Map(
            resource
                .metadata
                .iter()
                .map(|(k, v)| (k.clone(), Value::from(v)))
                .collect(),
        ),
        "dependent_resource_ids" | "dependent_resources" => Value::List(
            resource
                .dependent_resource_ids
                .iter()
                .map(|id| Value::Str(id.clone()))
                .collect(),
        ),
        _ => Value::Null,
    }
}

/// Resolve a condition's left operand against a resource.
///
/// `orphaned`, `idle` and `zombie` are shorthands for `status == <name>` and resolve to a
/// boolean. Anything else is a dotted field path.
pub fn resolve_path(resource: &Resource, path: &str) -> Value {
    match path {
        "orphaned" | "idle" | "zombie" => {
            return Value::Bool(resource.status.as_str() == path);
        }
        _ => {}
    }

    let mut segments = path.split('.');
    let Some(first) = segments.next() else {
        return Value::Null;
    };

    let mut current = field(resource, first);
    for segment in segments {
        if current == Value::Null {
            break;
        }
        current = current.get(segment);
    }
    current
}
