//! Change detection for individual model fields.

use crate::error::ModelError;
use crate::model::Model;
use crate::state::StateDiff;

/// Report whether the attribute backing `field_name` changed in `state`.
///
/// `field_name` is the Rust field name, not the attribute key. A field without
/// an attribute tag never reports a change.
///
/// # Errors
///
/// Returns [`ModelError::UnknownField`] if `M` has no field called `field_name`.
pub fn has_changes<M: Model, S: StateDiff + ?Sized>(
    _model: &M,
    field_name: &str,
    state: &S,
) -> Result<bool, ModelError> {
    let field = M::fields()
        .into_iter()
        .find(|f| f.name() == field_name)
        .ok_or_else(|| ModelError::UnknownField {
            field: field_name.to_string(),
            model: M::type_name(),
        })?;

    Ok(match field.tag() {
        Some(key) => state.has_changes(&[key]),
        None => false,
    })
}
