//! Schema validation helpers.
//!
//! This module validates attribute values against a [`Schema`]. It is used by
//! [`MemoryState`](crate::state::MemoryState) to refuse ill-typed writes, and
//! by providers to check configuration before processing it.
//!
//! # Example
//!
//! ```
//! use typed_provider_sdk::schema::{Schema, Attribute};
//! use typed_provider_sdk::validation::validate_json;
//! use serde_json::json;
//!
//! let schema = Schema::v0()
//!     .with_attribute("name", Attribute::required_string())
//!     .with_attribute("count", Attribute::optional_int64());
//!
//! // Valid input
//! let diagnostics = validate_json(&schema, &json!({"name": "test", "count": 42}));
//! assert!(diagnostics.is_empty());
//!
//! // Invalid input - wrong type for count
//! let diagnostics = validate_json(&schema, &json!({"name": "test", "count": "many"}));
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].attribute, Some("count".to_string()));
//! ```

use crate::model::join_path;
use crate::schema::{Attribute, AttributeType, Diagnostic, Schema};
use crate::value::Value;
use std::collections::{BTreeMap, HashMap};

/// Validate attribute values against a schema.
///
/// Returns a list of diagnostics for any validation errors found.
/// An empty list means the values are valid.
///
/// # Validation Rules
///
/// - Required attributes must be present and non-null
/// - Optional attributes may be absent or null
/// - Computed-only attributes are skipped (provider sets these)
/// - Attribute types must match the schema
/// - Collections must respect `min_items`/`max_items`
pub fn validate(schema: &Schema, values: &BTreeMap<String, Value>) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let mut names: Vec<&String> = schema.attributes.keys().collect();
    names.sort();
    for name in names {
        let attr = &schema.attributes[name];
        if attr.flags.is_computed_only() {
            continue;
        }
        match values.get(name.as_str()) {
            None | Some(Value::Null) => {
                if attr.flags.required {
                    diagnostics.push(
                        Diagnostic::error(format!("Missing required attribute '{}'", name))
                            .with_detail("This attribute is required and must be provided")
                            .with_attribute(name.as_str()),
                    );
                }
            },
            Some(value) => {
                diagnostics.extend(validate_attribute_value(attr, value, name));
            },
        }
    }

    diagnostics
}

/// Validate a JSON object against a schema.
pub fn validate_json(schema: &Schema, json: &serde_json::Value) -> Vec<Diagnostic> {
    match Value::from_json(json.clone()) {
        Value::Map(values) => validate(schema, &values),
        other => vec![Diagnostic::error("Expected object")
            .with_detail(format!("Got {}", other.type_name()))],
    }
}

/// Validate values against a schema, returning Ok if valid or Err with diagnostics.
///
/// This is a convenience wrapper around [`validate`] that returns a Result.
pub fn validate_result(
    schema: &Schema,
    values: &BTreeMap<String, Value>,
) -> Result<(), Vec<Diagnostic>> {
    let diagnostics = validate(schema, values);
    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(diagnostics)
    }
}

/// Check if values are valid against a schema.
///
/// Use [`validate`] to get detailed error information.
pub fn is_valid(schema: &Schema, values: &BTreeMap<String, Value>) -> bool {
    validate(schema, values).is_empty()
}

/// Validate one non-null value for an attribute, including item-count limits.
pub fn validate_attribute_value(attr: &Attribute, value: &Value, path: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    validate_value_into(&attr.attr_type, value, path, &mut diagnostics);

    let len = match value {
        Value::List(items) => Some(items.len()),
        Value::Set(items) => Some(items.len()),
        Value::Map(entries) if !matches!(attr.attr_type, AttributeType::Object(_)) => {
            Some(entries.len())
        },
        _ => None,
    };
    if let Some(len) = len {
        check_item_count(attr, len, path, &mut diagnostics);
    }

    diagnostics
}

fn check_item_count(attr: &Attribute, len: usize, path: &str, diagnostics: &mut Vec<Diagnostic>) {
    if len < attr.min_items as usize {
        diagnostics.push(
            Diagnostic::error(format!(
                "Attribute '{}' requires at least {} item(s), got {}",
                path, attr.min_items, len
            ))
            .with_attribute(path),
        );
    }
    // max_items of 0 means unlimited
    if attr.max_items > 0 && len > attr.max_items as usize {
        diagnostics.push(
            Diagnostic::error(format!(
                "Attribute '{}' allows at most {} item(s), got {}",
                path, attr.max_items, len
            ))
            .with_attribute(path),
        );
    }
}

/// Validate a value against an attribute type.
pub fn validate_value(attr_type: &AttributeType, value: &Value, path: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    validate_value_into(attr_type, value, path, &mut diagnostics);
    diagnostics
}

fn validate_value_into(
    attr_type: &AttributeType,
    value: &Value,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match (attr_type, value) {
        (AttributeType::String, Value::String(_))
        | (AttributeType::Int64, Value::Int(_))
        | (AttributeType::Float64, Value::Int(_) | Value::Float(_))
        | (AttributeType::Bool, Value::Bool(_)) => {},
        (AttributeType::List(element_type), Value::List(items))
        | (AttributeType::Set(element_type), Value::List(items)) => {
            for (i, elem) in items.iter().enumerate() {
                let elem_path = format!("{}.{}", path, i);
                validate_value_into(element_type, elem, &elem_path, diagnostics);
            }
        },
        (AttributeType::Set(element_type), Value::Set(items)) => {
            for (i, elem) in items.iter().enumerate() {
                let elem_path = format!("{}.{}", path, i);
                validate_value_into(element_type, elem, &elem_path, diagnostics);
            }
        },
        (AttributeType::Map(value_type), Value::Map(entries)) => {
            for (key, val) in entries {
                let key_path = format!("{}.{}", path, key);
                validate_value_into(value_type, val, &key_path, diagnostics);
            }
        },
        (AttributeType::Object(attrs), Value::Map(entries)) => {
            validate_object(attrs, entries, path, diagnostics);
        },
        // Null members of collections and objects mean "unset"
        (_, Value::Null) => {},
        (expected, got) => diagnostics.push(type_error(path, type_label(expected), got)),
    }
}

fn validate_object(
    attrs: &HashMap<String, AttributeType>,
    entries: &BTreeMap<String, Value>,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut names: Vec<&String> = attrs.keys().collect();
    names.sort();
    for name in names {
        // Object attributes carry no required/optional flags, so presence is not enforced
        if let Some(value) = entries.get(name.as_str()) {
            validate_value_into(&attrs[name], value, &join_path(path, name), diagnostics);
        }
    }
}

fn type_label(attr_type: &AttributeType) -> &'static str {
    match attr_type {
        AttributeType::String => "string",
        AttributeType::Int64 => "int64",
        AttributeType::Float64 => "float64",
        AttributeType::Bool => "bool",
        AttributeType::List(_) => "list",
        AttributeType::Set(_) => "set",
        AttributeType::Map(_) => "map",
        AttributeType::Object(_) => "object",
    }
}

fn type_error(path: &str, expected: &str, got: &Value) -> Diagnostic {
    Diagnostic::error(format!("Invalid type for attribute '{}'", path))
        .with_detail(format!("Expected {}, got {}", expected, got.type_name()))
        .with_attribute(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Attribute, AttributeFlags, Schema};
    use serde_json::json;

    fn values(json: serde_json::Value) -> BTreeMap<String, Value> {
        match Value::from_json(json) {
            Value::Map(values) => values,
            other => panic!("expected object, got {}", other.type_name()),
        }
    }

    #[test]
    fn test_validate_required_string() {
        let schema = Schema::v0().with_attribute("name", Attribute::required_string());

        // Valid
        assert!(validate(&schema, &values(json!({"name": "test"}))).is_empty());

        // Missing required
        let diagnostics = validate(&schema, &values(json!({})));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute, Some("name".to_string()));

        // Null value
        let diagnostics = validate(&schema, &values(json!({"name": null})));
        assert_eq!(diagnostics.len(), 1);

        // Wrong type
        let diagnostics = validate(&schema, &values(json!({"name": 123})));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].summary.contains("Invalid type"));
        assert_eq!(
            diagnostics[0].detail.as_deref(),
            Some("Expected string, got int")
        );
    }

    #[test]
    fn test_validate_optional_attribute() {
        let schema = Schema::v0().with_attribute("count", Attribute::optional_int64());

        assert!(validate(&schema, &values(json!({"count": 42}))).is_empty());
        assert!(validate(&schema, &values(json!({}))).is_empty());
        assert!(validate(&schema, &values(json!({"count": null}))).is_empty());
    }

    #[test]
    fn test_validate_computed_attribute_skipped() {
        let schema = Schema::v0().with_attribute("id", Attribute::computed_string());

        // Computed attributes are never checked, even with a wrong type
        assert!(validate(&schema, &values(json!({"id": 12}))).is_empty());
        assert!(validate(&schema, &values(json!({}))).is_empty());
    }

    #[test]
    fn test_validate_int64_and_float64() {
        let schema = Schema::v0()
            .with_attribute("count", Attribute::optional_int64())
            .with_attribute("ratio", Attribute::optional_float64());

        assert!(validate(&schema, &values(json!({"count": 1, "ratio": 0.5}))).is_empty());
        // Integers widen to floats
        assert!(validate(&schema, &values(json!({"ratio": 2}))).is_empty());

        let diagnostics = validate(&schema, &values(json!({"count": 1.5})));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute, Some("count".to_string()));
    }

    #[test]
    fn test_validate_bool() {
        let schema = Schema::v0().with_attribute("enabled", Attribute::required_bool());

        assert!(validate(&schema, &values(json!({"enabled": false}))).is_empty());
        assert_eq!(validate(&schema, &values(json!({"enabled": "yes"}))).len(), 1);
    }

    #[test]
    fn test_validate_list() {
        let schema = Schema::v0()
            .with_attribute("tags", Attribute::optional_list(AttributeType::String));

        assert!(validate(&schema, &values(json!({"tags": ["a", "b"]}))).is_empty());

        // Wrong element type
        let diagnostics = validate(&schema, &values(json!({"tags": ["a", 1]})));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute, Some("tags.1".to_string()));

        // Not a list
        let diagnostics = validate(&schema, &values(json!({"tags": "a"})));
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_validate_set_accepts_list_and_set() {
        let schema = Schema::v0()
            .with_attribute("zones", Attribute::optional_set(AttributeType::String));

        assert!(validate(&schema, &values(json!({"zones": ["1"]}))).is_empty());

        let mut set_values = BTreeMap::new();
        set_values.insert(
            "zones".to_string(),
            Value::Set(vec![Value::from("1"), Value::from(2)].into_iter().collect()),
        );
        let diagnostics = validate(&schema, &set_values);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute, Some("zones.1".to_string()));
    }

    #[test]
    fn test_validate_map() {
        let schema = Schema::v0()
            .with_attribute("labels", Attribute::optional_map(AttributeType::String));

        assert!(validate(&schema, &values(json!({"labels": {"env": "prod"}}))).is_empty());

        let diagnostics = validate(&schema, &values(json!({"labels": {"env": 1}})));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute, Some("labels.env".to_string()));
    }

    #[test]
    fn test_validate_item_limits() {
        let schema = Schema::v0().with_attribute(
            "rules",
            Attribute::optional_list(AttributeType::String)
                .with_min_items(1)
                .with_max_items(2),
        );

        assert!(validate(&schema, &values(json!({"rules": ["a"]}))).is_empty());

        let diagnostics = validate(&schema, &values(json!({"rules": []})));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].summary.contains("at least 1"));

        let diagnostics = validate(&schema, &values(json!({"rules": ["a", "b", "c"]})));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].summary.contains("at most 2"));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_item_count_beyond_u32_is_not_truncated() {
        let attr = Attribute::optional_list(AttributeType::String).with_max_items(2);
        let mut diagnostics = Vec::new();

        check_item_count(&attr, u32::MAX as usize + 2, "rules", &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].summary.contains("at most 2"));
        assert!(diagnostics[0].summary.contains("4294967297"));
    }

    #[test]
    fn test_validate_object_type() {
        let schema = Schema::v0().with_attribute(
            "config",
            Attribute::new(
                AttributeType::object([
                    ("host", AttributeType::String),
                    ("port", AttributeType::Int64),
                ]),
                AttributeFlags::optional(),
            ),
        );

        assert!(validate(
            &schema,
            &values(json!({"config": {"host": "localhost", "port": 8080}}))
        )
        .is_empty());

        // Missing members are allowed
        assert!(validate(&schema, &values(json!({"config": {"host": "localhost"}}))).is_empty());

        let diagnostics = validate(&schema, &values(json!({"config": {"port": "80"}})));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute, Some("config.port".to_string()));
    }

    #[test]
    fn test_validate_multiple_errors_in_name_order() {
        let schema = Schema::v0()
            .with_attribute("name", Attribute::required_string())
            .with_attribute("count", Attribute::required_int64())
            .with_attribute("enabled", Attribute::required_bool());

        let diagnostics = validate(&schema, &values(json!({})));
        let attrs: Vec<_> = diagnostics
            .iter()
            .filter_map(|d| d.attribute.clone())
            .collect();
        assert_eq!(attrs, vec!["count", "enabled", "name"]);
    }

    #[test]
    fn test_is_valid_helper() {
        let schema = Schema::v0().with_attribute("name", Attribute::required_string());

        assert!(is_valid(&schema, &values(json!({"name": "test"}))));
        assert!(!is_valid(&schema, &values(json!({}))));
    }

    #[test]
    fn test_validate_result_helper() {
        let schema = Schema::v0().with_attribute("name", Attribute::required_string());

        assert!(validate_result(&schema, &values(json!({"name": "test"}))).is_ok());

        let err = validate_result(&schema, &values(json!({}))).unwrap_err();
        assert_eq!(err.len(), 1);
    }

    #[test]
    fn test_validate_json_root_not_object() {
        let schema = Schema::v0().with_attribute("name", Attribute::required_string());

        let diagnostics = validate_json(&schema, &json!("not an object"));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].summary.contains("Expected object"));
    }

    #[test]
    fn test_validate_value_direct() {
        let ty = AttributeType::list(AttributeType::map(AttributeType::Bool));
        let value = Value::from_json(json!([{"a": true}, {"b": "no"}]));

        let diagnostics = validate_value(&ty, &value, "flags");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute, Some("flags.1.b".to_string()));
    }
}
