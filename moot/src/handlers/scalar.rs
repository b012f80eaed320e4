//! Generic scalar fields: the fallback for everything no other handler
//! claims. A plain single-value string argument; coercion from string to
//! the target scalar type is delegated to the caller's validation layer.

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
        action: Action::Store,
        dest: key.clone(),
        metavar: Some(key.to_uppercase()),
        default: field.default.clone(),
        required: field.required,
        help: describe(field),
    };

    Ok((registration, key, identity()))
}
