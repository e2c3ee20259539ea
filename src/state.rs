//! The state store abstraction and an in-memory implementation.
//!
//! The marshalling engine only ever talks to state through three small traits:
//! [`StateReader`] for existence-aware reads, [`StateWriter`] for writes and
//! [`StateDiff`] for change detection. [`MemoryState`] implements all three and
//! keeps the prior revision around so changes can be reported.

use crate::error::StateError;
use crate::schema::{AttributeType, Schema};
use crate::validation::validate_attribute_value;
use crate::value::{Value, ValueSet};
use std::collections::BTreeMap;

/// Existence-aware reads.
pub trait StateReader {
    /// The value for `key`, or `None` when no value (explicit or defaulted) exists.
    fn get_ok_exists(&self, key: &str) -> Option<Value>;
}

/// Attribute writes.
pub trait StateWriter {
    /// Set `key` to `value`. Setting [`Value::Null`] clears the key.
    fn set(&mut self, key: &str, value: Value) -> Result<(), StateError>;
}

/// Change detection against the previous revision.
pub trait StateDiff {
    /// Whether any of `keys` changed since the previous revision.
    fn has_changes(&self, keys: &[&str]) -> bool;
}

/// A full state handle as seen by a resource operation.
pub trait ResourceData: StateReader + StateWriter + StateDiff + Send {
    /// The resource ID, empty when the resource does not exist.
    fn id(&self) -> String;

    /// Set the resource ID. An empty ID removes the resource from state.
    fn set_id(&mut self, id: &str);
}

impl StateReader for BTreeMap<String, Value> {
    fn get_ok_exists(&self, key: &str) -> Option<Value> {
        self.get(key).filter(|v| !v.is_null()).cloned()
    }
}

/// An in-memory state store with one prior revision.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryState {
    id: String,
    schema: Option<Schema>,
    prior: BTreeMap<String, Value>,
    current: BTreeMap<String, Value>,
}

impl MemoryState {
    /// Create an empty store with no schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a persisted revision from a JSON object.
    ///
    /// A string `"id"` member becomes the resource ID; null members are dropped.
    pub fn from_json(json: serde_json::Value) -> Result<Self, StateError> {
        let serde_json::Value::Object(mut obj) = json else {
            return Err(StateError::InvalidValue {
                summary: "Expected object".to_string(),
                detail: "state must be a JSON object".to_string(),
            });
        };

        let id = match obj.remove("id") {
            Some(serde_json::Value::String(id)) => id,
            _ => String::new(),
        };
        let values: BTreeMap<String, Value> = obj
            .into_iter()
            .map(|(k, v)| (k, Value::from_json(v)))
            .filter(|(_, v)| !v.is_null())
            .collect();

        Ok(Self {
            id,
            schema: None,
            prior: values.clone(),
            current: values,
        })
    }

    /// Bind a schema. Existing values are conformed to it, and later writes are
    /// checked against it.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        for values in [&mut self.prior, &mut self.current] {
            for (key, value) in values.iter_mut() {
                if let Some(attr) = schema.attribute(key) {
                    *value = conform(&attr.attr_type, std::mem::take(value));
                }
            }
        }
        self.schema = Some(schema);
        self
    }

    /// Seed a value into both revisions, bypassing schema checks.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        self.prior.insert(key.clone(), value.clone());
        self.current.insert(key, value);
        self
    }

    /// Seed the resource ID.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// The bound schema, if any.
    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    /// The current value of `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.current.get(key)
    }

    /// All current values.
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.current
    }

    /// Commit the current revision, so no key reports a change.
    pub fn apply(&mut self) {
        self.prior = self.current.clone();
    }

    /// Whether the resource has been removed (its ID is empty).
    pub fn is_gone(&self) -> bool {
        self.id.is_empty()
    }

    /// Persist the current revision as a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        let mut obj: serde_json::Map<String, serde_json::Value> = self
            .current
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        if !self.id.is_empty() {
            obj.insert("id".to_string(), serde_json::Value::String(self.id.clone()));
        }
        serde_json::Value::Object(obj)
    }

    fn default_for(&self, key: &str) -> Option<Value> {
        let attr = self.schema.as_ref()?.attribute(key)?;
        let default = attr.default.clone()?;
        Some(conform(&attr.attr_type, Value::from_json(default)))
    }
}

impl StateReader for MemoryState {
    fn get_ok_exists(&self, key: &str) -> Option<Value> {
        match self.current.get(key) {
            Some(value) if !value.is_null() => Some(value.clone()),
            _ => self.default_for(key),
        }
    }
}

impl StateWriter for MemoryState {
    fn set(&mut self, key: &str, value: Value) -> Result<(), StateError> {
        let value = match &self.schema {
            Some(schema) => {
                let attr = schema
                    .attribute(key)
                    .ok_or_else(|| StateError::UnknownAttribute(key.to_string()))?;
                let value = conform(&attr.attr_type, value);
                if !value.is_null() {
                    let diagnostics = validate_attribute_value(attr, &value, key);
                    if let Some(first) = diagnostics.into_iter().next() {
                        return Err(StateError::InvalidValue {
                            summary: first.summary,
                            detail: first.detail.unwrap_or_default(),
                        });
                    }
                }
                value
            },
            None => value,
        };

        if value.is_null() {
            self.current.remove(key);
        } else {
            self.current.insert(key.to_string(), value);
        }
        Ok(())
    }
}

impl StateDiff for MemoryState {
    fn has_changes(&self, keys: &[&str]) -> bool {
        keys.iter()
            .any(|key| self.current.get(*key) != self.prior.get(*key))
    }
}

impl ResourceData for MemoryState {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}

/// Reshape `value` so collections match the attribute type: lists bound for
/// set attributes become sets, recursively through lists, maps and objects.
fn conform(attr_type: &AttributeType, value: Value) -> Value {
    match (attr_type, value) {
        (AttributeType::Set(elem), Value::List(items)) => {
            Value::Set(items.into_iter().map(|v| conform(elem, v)).collect::<ValueSet>())
        },
        (AttributeType::Set(elem), Value::Set(set)) => {
            Value::Set(set.into_list().into_iter().map(|v| conform(elem, v)).collect())
        },
        (AttributeType::List(elem), Value::List(items)) => {
            Value::List(items.into_iter().map(|v| conform(elem, v)).collect())
        },
        (AttributeType::Map(elem), Value::Map(entries)) => Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k, conform(elem, v)))
                .collect(),
        ),
        (AttributeType::Object(fields), Value::Map(entries)) => Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| {
                    let v = match fields.get(&k) {
                        Some(field_type) => conform(field_type, v),
                        None => v,
                    };
                    (k, v)
                })
                .collect(),
        ),
        (_, value) => value,
    }
}
