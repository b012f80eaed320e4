//! Boolean fields.
//!
//! A boolean field takes one of three registration shapes: a required
//! boolean becomes a three-way `--x` / `--no-x` switch; an optional boolean
//! defaulting true becomes a plain `--no-x` flag that stores false; any
//! other optional boolean becomes a plain `--x` flag that stores true.

use crate::coerce::identity;
use crate::errors::SchemaError;
use crate::naming::{describe, flag_name};
use crate::registry::{Action, Registration};
use crate::schema::Field;
use crate::value::Value;

use super::Built;

pub(crate) fn build(field: &Field) -> Result<Built, SchemaError> {
    let is_inverted = !field.required && field.default.as_ref().is_some_and(Value::is_truthy);

    let action = if field.required {
        Action::BoolSwitch
    } else if is_inverted {
        Action::StoreFalse
    } else {
        Action::StoreTrue
    };

    // Plain flags carry the implied default, so that an omitted flag still
    // produces a proper boolean in the raw results.
    let default = match action {
        Action::StoreFalse => Some(Value::Bool(true)),
        Action::StoreTrue => Some(Value::Bool(false)),
        _ => None,
    };

    let (flag, key) = flag_name(field, is_inverted, Some(&field.name))?;

    let registration = Registration {
        flag,
        action,
        dest: key.clone(),
        metavar: None,
        default,
        required: field.required,
        help: describe(field),
    };

    // The stored value is already a proper boolean.
    Ok((registration, key, identity()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;

    fn bool_field() -> Field {
        Field::new("cache", FieldType::Bool)
    }

    #[test]
    fn required_boolean_is_a_switch() {
        let (registration, key, _) = build(&bool_field()).unwrap();

        assert_eq!(registration.action, Action::BoolSwitch);
        assert_eq!(registration.flag, "--cache");
        assert!(registration.required);
        assert_eq!(registration.default, None);
        assert_eq!(key, "cache");
    }

    #[test]
    fn default_true_inverts_the_flag() {
        let (registration, key, _) = build(&bool_field().default(true)).unwrap();

        assert_eq!(registration.action, Action::StoreFalse);
        assert_eq!(registration.flag, "--no-cache");
        assert_eq!(registration.dest, "cache");
        assert_eq!(registration.default, Some(Value::Bool(true)));
        assert_eq!(key, "cache");
    }

    #[test]
    fn default_false_stays_plain() {
        let (registration, _, _) = build(&bool_field().default(false)).unwrap();

        assert_eq!(registration.action, Action::StoreTrue);
        assert_eq!(registration.flag, "--cache");
        assert_eq!(registration.default, Some(Value::Bool(false)));
    }

    #[test]
    fn optional_without_default_stays_plain() {
        let (registration, _, _) = build(&bool_field().optional()).unwrap();

        assert_eq!(registration.action, Action::StoreTrue);
        assert_eq!(registration.flag, "--cache");
    }

    #[test]
    fn coercion_is_identity() {
        let (_, _, coercion) = build(&bool_field()).unwrap();

        assert_eq!(coercion(Value::Bool(true)).unwrap(), Value::Bool(true));
    }
}
