//! Populating tagged models from resource state.
//!
//! Each tagged field is looked up by its attribute key. Absent keys (and
//! [`Value::Null`]) leave the field at its initial value. Present values are
//! dispatched on their *runtime* shape: scalars are assigned directly, sets
//! are read as lists, lists are decoded element-by-element against the
//! *declared* element type, and maps are copied into the declared map type.
//!
//! A value the field cannot hold (a string where an integer is declared, an
//! integer too large for `i32`) aborts the decode with an error naming the
//! field. The one exception is a map entry whose value does not fit the
//! declared value type: that map field is left untouched, the skip is logged
//! through the [`Logger`], and it is returned as a warning diagnostic so a
//! partially-populated model is never silent.

use crate::error::ModelError;
use crate::logging::Logger;
use crate::model::{DecodeContext, Fault, Kind, Model};
use crate::schema::Diagnostic;
use crate::state::StateReader;
use crate::value::Value;

/// Populate `model` from `state`, returning a warning for every skipped field.
pub fn decode<M: Model, S: StateReader + ?Sized>(
    model: &mut M,
    state: &S,
    logger: &dyn Logger,
) -> Result<Vec<Diagnostic>, ModelError> {
    let mut warnings = Vec::new();
    decode_fields(model, state, &mut DecodeContext::new(&mut warnings))?;

    for warning in &warnings {
        logger.warn(&format!(
            "skipped {}: {}",
            warning.attribute.as_deref().unwrap_or_default(),
            warning.detail.as_deref().unwrap_or_default()
        ));
    }
    Ok(warnings)
}

/// Decode a nested model from a map value.
#[doc(hidden)]
pub fn decode_element<M: Model>(
    value: Value,
    cx: &mut DecodeContext<'_>,
) -> Result<M, ModelError> {
    match value {
        Value::Map(entries) => {
            let mut element = M::default();
            decode_fields(&mut element, &entries, cx)?;
            Ok(element)
        },
        other => Err(ModelError::TypeMismatch {
            path: cx.path().to_string(),
            expected: Kind::Object,
            found: other.type_name(),
        }),
    }
}

fn decode_fields<M: Model, S: StateReader + ?Sized>(
    model: &mut M,
    state: &S,
    cx: &mut DecodeContext<'_>,
) -> Result<(), ModelError> {
    for field in M::fields() {
        let Some(key) = field.tag() else {
            continue;
        };
        let Some(value) = state.get_ok_exists(key) else {
            continue;
        };

        let mut field_cx = cx.child(key);
        let result = match value {
            Value::Null => Ok(()),
            Value::Set(set) => field.assign_sequence(model, set.into_list(), &mut field_cx),
            Value::List(items) => field.assign_sequence(model, items, &mut field_cx),
            Value::Map(entries) => field.assign_map(model, entries, &mut field_cx),
            scalar => field.assign_scalar(model, scalar, &mut field_cx),
        };

        match result {
            Ok(()) => {},
            Err(Fault::Soft(reason)) => field_cx.warn(reason),
            Err(Fault::Hard(err)) => return Err(err.in_field(field.name())),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NullLogger;
    use crate::state::MemoryState;
    use crate::testing::RecordingLogger;
    use crate::typed_model;
    use crate::value::ValueSet;
    use serde_json::json;
    use std::collections::HashMap;

    typed_model! {
        #[derive(Debug, Default, Clone, PartialEq)]
        struct Basic {
            #[tag("string")]
            string: String,
            #[tag("number")]
            number: i64,
            #[tag("small")]
            small: i32,
            #[tag("price")]
            price: f64,
            #[tag("enabled")]
            enabled: bool,
            #[tag("list_of_strings")]
            list_of_strings: Vec<String>,
            #[tag("labels")]
            labels: HashMap<String, String>,
        }
    }

    typed_model! {
        #[derive(Debug, Default, Clone, PartialEq)]
        struct Optional {
            #[tag("zones")]
            zones: Option<Vec<String>>,
            #[tag("tags")]
            tags: Option<HashMap<String, String>>,
        }
    }

    typed_model! {
        #[derive(Debug, Default, Clone, PartialEq)]
        struct First {
            #[tag("first")]
            first: Vec<Second>,
        }
    }

    typed_model! {
        #[derive(Debug, Default, Clone, PartialEq)]
        struct Second {
            #[tag("value")]
            value: String,
            #[tag("second")]
            second: Vec<Third>,
        }
    }

    typed_model! {
        #[derive(Debug, Default, Clone, PartialEq)]
        struct Third {
            #[tag("value")]
            value: String,
            #[tag("third")]
            third: Vec<Leaf>,
        }
    }

    typed_model! {
        #[derive(Debug, Default, Clone, PartialEq)]
        struct Leaf {
            #[tag("value")]
            value: String,
        }
    }

    typed_model! {
        #[derive(Debug, Default, Clone, PartialEq)]
        struct Matrix {
            #[tag("rows")]
            rows: Vec<Vec<String>>,
        }
    }

    fn state(json: serde_json::Value) -> MemoryState {
        MemoryState::from_json(json).unwrap()
    }

    #[test]
    fn test_decode_scalars_and_collections() {
        let state = state(json!({
            "string": "world",
            "number": 42,
            "small": 7,
            "price": 1.25,
            "enabled": true,
            "list_of_strings": ["hello", "there"],
            "labels": {"env": "prod"}
        }));

        let mut model = Basic::default();
        let warnings = decode(&mut model, &state, &NullLogger).unwrap();

        assert!(warnings.is_empty());
        assert_eq!(model.string, "world");
        assert_eq!(model.number, 42);
        assert_eq!(model.small, 7);
        assert_eq!(model.price, 1.25);
        assert!(model.enabled);
        assert_eq!(model.list_of_strings, vec!["hello", "there"]);
        assert_eq!(model.labels["env"], "prod");
    }

    #[test]
    fn test_decode_skips_absent_keys() {
        let state = state(json!({"string": "only"}));

        let mut model = Basic {
            number: 9,
            ..Default::default()
        };
        decode(&mut model, &state, &NullLogger).unwrap();

        assert_eq!(model.string, "only");
        assert_eq!(model.number, 9);
        assert!(model.list_of_strings.is_empty());
    }

    #[test]
    fn test_decode_unset_versus_empty() {
        let mut unset = Optional::default();
        decode(&mut unset, &state(json!({})), &NullLogger).unwrap();
        assert!(unset.zones.is_none());
        assert!(unset.tags.is_none());

        let mut empty = Optional::default();
        decode(&mut empty, &state(json!({"zones": [], "tags": {}})), &NullLogger).unwrap();
        assert_eq!(empty.zones, Some(vec![]));
        assert_eq!(empty.tags, Some(HashMap::new()));
    }

    #[test]
    fn test_decode_null_is_absent() {
        let mut reader = std::collections::BTreeMap::new();
        reader.insert("zones".to_string(), Value::Null);

        let mut model = Optional::default();
        decode(&mut model, &reader, &NullLogger).unwrap();
        assert!(model.zones.is_none());
    }

    #[test]
    fn test_decode_set_into_sequence() {
        let set: ValueSet = vec![Value::from("1"), Value::from("2")].into_iter().collect();
        let state = MemoryState::new().with_value("zones", Value::Set(set));

        let mut model = Optional::default();
        decode(&mut model, &state, &NullLogger).unwrap();

        let mut zones = model.zones.unwrap();
        zones.sort();
        assert_eq!(zones, vec!["1", "2"]);
    }

    #[test]
    fn test_decode_three_levels_of_nesting() {
        let state = state(json!({
            "first": [{
                "value": "a",
                "second": [{
                    "value": "b",
                    "third": [{"value": "c"}]
                }]
            }]
        }));

        let mut model = First::default();
        decode(&mut model, &state, &NullLogger).unwrap();

        assert_eq!(model.first[0].value, "a");
        assert_eq!(model.first[0].second[0].value, "b");
        assert_eq!(model.first[0].second[0].third[0].value, "c");
    }

    #[test]
    fn test_decode_preserves_element_order() {
        let state = state(json!({
            "first": [{"value": "x"}, {"value": "y"}, {"value": "z"}]
        }));

        let mut model = First::default();
        decode(&mut model, &state, &NullLogger).unwrap();

        let values: Vec<_> = model.first.iter().map(|f| f.value.as_str()).collect();
        assert_eq!(values, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_decode_skips_null_nested_elements() {
        let state = state(json!({"first": [null, {"value": "kept"}]}));

        let mut model = First::default();
        decode(&mut model, &state, &NullLogger).unwrap();

        assert_eq!(model.first.len(), 1);
        assert_eq!(model.first[0].value, "kept");
    }

    #[test]
    fn test_decode_scalar_mismatch_is_hard() {
        let state = state(json!({"string": "kept", "number": "forty-two"}));
        let logger = RecordingLogger::new();

        let mut model = Basic::default();
        let err = decode(&mut model, &state, &logger).unwrap_err();

        assert!(matches!(err, ModelError::Field { field: "number", .. }));
        assert_eq!(
            err.to_string(),
            "decoding field \"number\": attribute \"number\": expected int, got string"
        );
        assert!(logger.warnings().is_empty());
    }

    #[test]
    fn test_decode_bool_mismatch_is_hard() {
        let state = state(json!({"enabled": "yes"}));

        let mut model = Basic::default();
        let err = decode(&mut model, &state, &NullLogger).unwrap_err();
        assert!(matches!(err, ModelError::Field { field: "enabled", .. }));
    }

    #[test]
    fn test_decode_list_into_scalar_is_hard() {
        let state = state(json!({"string": ["a"]}));

        let mut model = Basic::default();
        let err = decode(&mut model, &state, &NullLogger).unwrap_err();
        assert_eq!(
            err.to_string(),
            "decoding field \"string\": attribute \"string\": expected string, got list"
        );
    }

    #[test]
    fn test_decode_nested_mismatch_reports_full_path() {
        let state = state(json!({"first": [{"value": 12}]}));

        let mut model = First::default();
        let err = decode(&mut model, &state, &NullLogger).unwrap_err();

        assert!(matches!(err, ModelError::Field { field: "first", .. }));
        assert_eq!(
            err.to_string(),
            "decoding field \"first\": decoding field \"value\": attribute \"first.0.value\": expected string, got int"
        );
    }

    #[test]
    fn test_decode_sequence_element_mismatch_is_hard() {
        let state = state(json!({"list_of_strings": ["a", 2]}));

        let mut model = Basic::default();
        let err = decode(&mut model, &state, &NullLogger).unwrap_err();

        assert_eq!(
            err.to_string(),
            "decoding field \"list_of_strings\": attribute \"list_of_strings.1\": expected string, got int"
        );
    }

    #[test]
    fn test_decode_nested_element_must_be_object() {
        let state = state(json!({"first": ["not-an-object"]}));

        let mut model = First::default();
        let err = decode(&mut model, &state, &NullLogger).unwrap_err();
        assert!(matches!(err, ModelError::Field { field: "first", .. }));
    }

    #[test]
    fn test_decode_map_value_mismatch_is_soft() {
        let state = state(json!({"string": "kept", "labels": {"env": "prod", "count": 3}}));
        let logger = RecordingLogger::new();

        let mut model = Basic::default();
        let warnings = decode(&mut model, &state, &logger).unwrap();

        assert_eq!(model.string, "kept");
        assert!(model.labels.is_empty());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].attribute, Some("labels".to_string()));
        assert_eq!(logger.warnings().len(), 1);
        assert!(logger.warnings()[0].contains("labels"));
    }

    #[test]
    fn test_decode_out_of_range_i32_is_hard() {
        let state = state(json!({"small": 5_000_000_000i64}));

        let mut model = Basic::default();
        let err = decode(&mut model, &state, &NullLogger).unwrap_err();

        assert!(matches!(err, ModelError::Field { field: "small", .. }));
        assert!(err.to_string().contains("out of range for i32"));
    }

    #[test]
    fn test_decode_float_accepts_integer() {
        let state = state(json!({"price": 3}));

        let mut model = Basic::default();
        decode(&mut model, &state, &NullLogger).unwrap();
        assert_eq!(model.price, 3.0);
    }

    #[test]
    fn test_decode_list_of_lists_is_unsupported() {
        let state = state(json!({"rows": [["a"]]}));

        let mut model = Matrix::default();
        let err = decode(&mut model, &state, &NullLogger).unwrap_err();
        assert!(err.to_string().contains("unsupported kind list of list of string"));
    }
}
