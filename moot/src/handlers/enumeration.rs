//! Enumeration fields.
//!
//! An enumeration with more than one member is an ordinary value-storing
//! argument whose raw string is resolved back to a member through a
//! name-to-member table built at registration time. A singleton enumeration
//! on an optional field collapses to a flag: passing it stores the sole
//! member directly, or clears the field to null when the flag is inverted
//! (the field already defaults to the member and allows none).

use std::collections::BTreeMap;

use joinery::JoinableIterator;

use crate::coerce::identity;
use crate::errors::{CoercionError, SchemaError};
use crate::naming::{describe, flag_name};
use crate::registry::{Action, Registration};
use crate::schema::{Field, FieldType};
use crate::value::Value;

use super::Built;

pub(crate) fn build(field: &Field) -> Result<Built, SchemaError> {
    let members: &[String] = match &field.ty {
        FieldType::Enumeration(members) => members,
        _ => &[],
    };

    let is_flag = members.len() == 1 && !field.required;
    let is_inverted = is_flag && field.default.is_some() && field.allow_none;

    let metavar = format!("{{{}}}", members.iter().join_with(", "));

    let action = if is_flag {
        Action::StoreConst(if is_inverted {
            Value::Null
        } else {
            Value::Str(members[0].clone())
        })
    } else {
        Action::Store
    };

    let (flag, key) = flag_name(field, is_inverted, Some(&field.name))?;

    let registration = Registration {
        flag,
        action,
        dest: key.clone(),
        metavar: Some(metavar),
        default: field.default.clone(),
        required: field.required,
        help: describe(field),
    };

    let coercion: crate::coerce::Coercion = if is_flag {
        // The stored constant is already the member (or null), not a string.
        identity()
    } else {
        // Name-to-member table, for O(1) resolution of the raw string. A
        // runtime enumeration's member *is* its name, so the table's job is
        // membership validation.
        let table: BTreeMap<String, Value> = members
            .iter()
            .map(|member| (member.clone(), Value::Str(member.clone())))
            .collect();
        let choices: Vec<String> = members.to_vec();

        Box::new(move |value| match value {
            Value::Str(name) => {
                table
                    .get(&name)
                    .cloned()
                    .ok_or_else(|| CoercionError::UnknownChoice {
                        value: name,
                        choices: choices.clone(),
                    })
            }
            other => Ok(other),
        })
    };

    Ok((registration, key, coercion))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color() -> Field {
        Field::new(
            "color",
            FieldType::Enumeration(vec!["red".into(), "green".into(), "blue".into()]),
        )
    }

    fn singleton() -> Field {
        Field::new("mode", FieldType::Enumeration(vec!["fast".into()]))
    }

    #[test]
    fn multi_member_is_a_value_argument() {
        let (registration, key, coercion) = build(&color()).unwrap();

        assert_eq!(registration.action, Action::Store);
        assert_eq!(registration.metavar.as_deref(), Some("{red, green, blue}"));
        assert!(registration.required);
        assert_eq!(key, "color");

        assert_eq!(
            coercion(Value::Str("green".into())).unwrap(),
            Value::Str("green".into())
        );
        assert!(matches!(
            coercion(Value::Str("purple".into())),
            Err(CoercionError::UnknownChoice { .. })
        ));
    }

    #[test]
    fn singleton_optional_collapses_to_flag() {
        let (registration, _, _) = build(&singleton().optional()).unwrap();

        assert_eq!(
            registration.action,
            Action::StoreConst(Value::Str("fast".into()))
        );
        assert_eq!(registration.flag, "--mode");
    }

    #[test]
    fn singleton_required_stays_a_value_argument() {
        let (registration, _, _) = build(&singleton()).unwrap();

        assert_eq!(registration.action, Action::Store);
    }

    #[test]
    fn defaulted_none_allowing_singleton_inverts() {
        let field = singleton().default(Value::Str("fast".into())).allow_none();

        let (registration, _, coercion) = build(&field).unwrap();

        assert_eq!(registration.flag, "--no-mode");
        assert_eq!(registration.action, Action::StoreConst(Value::Null));
        assert_eq!(registration.default, Some(Value::Str("fast".into())));

        // Stored constants pass through untouched.
        assert_eq!(coercion(Value::Null).unwrap(), Value::Null);
    }
}
