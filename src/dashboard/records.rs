//! User records as returned by the API and the helpers that pull them out of
//! the loosely shaped response bodies.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

/// One user entry. The client enforces no schema: every field the server sent
/// is kept, in the order the server sent it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Returns the value of `key`, treating JSON `null` as absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| !value.is_null())
    }

    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.get("id")
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Value> for Record {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(other),
        }
    }
}

/// Extracts the user list from a `GET /users` body: the `users` array, else the
/// `data` array, else the body itself when it is an array, else nothing.
#[must_use]
pub fn extract_list(body: Value) -> Vec<Record> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut fields) => match (fields.remove("users"), fields.remove("data")) {
            (Some(Value::Array(items)), _) | (_, Some(Value::Array(items))) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| match Record::try_from(item) {
            Ok(record) => Some(record),
            Err(other) => {
                warn!("skipping non-object entry in user list: {}", other);
                None
            }
        })
        .collect()
}

/// Extracts a single user from a `GET /users/{id}` body: the `user` field when
/// it holds something, else the body itself. Only a non-empty object counts as
/// a record.
#[must_use]
pub fn extract_single(body: Value) -> Option<Record> {
    let candidate = match body {
        Value::Object(mut fields) if fields.get("user").is_some_and(is_truthy) => {
            fields.remove("user").unwrap_or(Value::Null)
        }
        other => other,
    };

    Record::try_from(candidate)
        .ok()
        .filter(|record| !record.is_empty())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Display text of a field value: strings verbatim, null as empty, everything
/// else in its compact JSON spelling.
#[must_use]
pub fn value_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
