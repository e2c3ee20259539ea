//! Flattening tagged models into resource state.
//!
//! Encoding dispatches on each field's *declared* type. Integers widen to
//! 64 bits, floats to `f64`, and sequences of scalars are emitted as lists.
//! A configured-but-empty sequence is emitted as an empty list, while an
//! unset `Option` collection is emitted as [`Value::Null`], so the two stay
//! distinguishable after a round trip. Sequences of nested models become lists
//! of maps, each produced by encoding the element recursively, and maps of
//! nested models become maps of maps. Maps of sequences are rejected.

use crate::error::ModelError;
use crate::logging::Logger;
use crate::model::Model;
use crate::state::StateWriter;
use crate::value::Value;
use std::collections::BTreeMap;

/// Flatten `model` into a map of attribute key to value.
///
/// Untagged fields are skipped.
pub fn marshal<M: Model>(model: &M) -> Result<BTreeMap<String, Value>, ModelError> {
    Ok(marshal_fields(model)?.into_iter().collect())
}

// Tagged fields in declaration order.
fn marshal_fields<M: Model>(model: &M) -> Result<Vec<(String, Value)>, ModelError> {
    let mut output = Vec::new();
    for field in M::fields() {
        let Some(key) = field.tag() else {
            continue;
        };
        let value = field.encode(model, key)?;
        output.push((key.to_string(), value));
    }
    Ok(output)
}

/// Flatten `model` and write every attribute into `state`.
///
/// Attributes are written in field declaration order. Stops at the first
/// write the store rejects; earlier writes are kept.
pub fn encode<M: Model, S: StateWriter + ?Sized>(
    model: &M,
    state: &mut S,
    logger: &dyn Logger,
) -> Result<(), ModelError> {
    let values = marshal_fields(model)?;
    for (key, value) in values {
        logger.debug(&format!("setting {:?} ({})", key, value.type_name()));
        if let Err(source) = state.set(&key, value) {
            return Err(ModelError::StateWrite { key, source });
        }
    }
    Ok(())
}
