//! Container (list/set/tuple-like) fields.
//!
//! Registered as a value-storing argument accepting one or more tokens.
//! Coercion is identity: element-level typing is delegated to the caller's
//! validation layer, which re-validates the raw list of strings against
//! the field's element type.

use crate::coerce::identity;
use crate::errors::SchemaError;
use crate::naming::{describe, flag_name};
use crate::registry::{Action, Registration};
use crate::schema::Field;

use super::Built;

pub(crate) fn build(field: &Field) -> Result<Built, SchemaError> {
    let (flag, key) = flag_name(field, false, Some(&field.name))?;

    let registration = Registration {
        flag,
        action: Action::StoreMany,
        dest: key.clone(),
        metavar: Some(key.to_uppercase()),
        default: field.default.clone(),
        required: field.required,
        help: describe(field),
    };

    Ok((registration, key, identity()))
}
