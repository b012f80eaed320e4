//! Literal choice-set fields.
//!
//! Structurally a twin of the enumeration handler, but the choices are
//! literal values that may be of mixed primitive type, so the resolution
//! table maps each choice's rendered text back to the typed value: `"2"`
//! on the command line yields the integer `2`, not the string.

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
    let choices: &[Value] = match &field.ty {
        FieldType::Literal(choices) => choices,
        _ => &[],
    };

    let is_flag = choices.len() == 1 && !field.required;
    let is_inverted = is_flag && field.default.is_some() && field.allow_none;

    let metavar = format!("{{{}}}", choices.iter().join_with(", "));

    let action = if is_flag {
        Action::StoreConst(if is_inverted {
            Value::Null
        } else {
            choices[0].clone()
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
        // The stored constant is already the typed choice (or null).
        identity()
    } else {
        // Rendered-text-to-value table, for O(1) resolution of the raw
        // string back into the typed choice.
        let table: BTreeMap<String, Value> = choices
            .iter()
            .map(|choice| (choice.to_string(), choice.clone()))
            .collect();
        let rendered: Vec<String> = table.keys().cloned().collect();

        Box::new(move |value| match value {
            Value::Str(text) => {
                table
                    .get(&text)
                    .cloned()
                    .ok_or_else(|| CoercionError::UnknownChoice {
                        value: text,
                        choices: rendered.clone(),
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

    fn numeric() -> Field {
        Field::new(
            "level",
            FieldType::Literal(vec![Value::Int(1), Value::Int(2), Value::Int(3)]),
        )
    }

    #[test]
    fn raw_text_resolves_to_typed_choice() {
        let (registration, _, coercion) = build(&numeric()).unwrap();

        assert_eq!(registration.metavar.as_deref(), Some("{1, 2, 3}"));
        assert_eq!(coercion(Value::Str("2".into())).unwrap(), Value::Int(2));
        assert!(matches!(
            coercion(Value::Str("9".into())),
            Err(CoercionError::UnknownChoice { .. })
        ));
    }

    #[test]
    fn mixed_type_choices_resolve_by_rendered_text() {
        let field = Field::new(
            "mode",
            FieldType::Literal(vec![Value::Str("auto".into()), Value::Int(0)]),
        );

        let (_, _, coercion) = build(&field).unwrap();

        assert_eq!(
            coercion(Value::Str("auto".into())).unwrap(),
            Value::Str("auto".into())
        );
        assert_eq!(coercion(Value::Str("0".into())).unwrap(), Value::Int(0));
    }

    #[test]
    fn singleton_optional_collapses_to_flag() {
        let field = Field::new("fast", FieldType::Literal(vec![Value::Bool(true)])).optional();

        let (registration, _, _) = build(&field).unwrap();

        assert_eq!(registration.action, Action::StoreConst(Value::Bool(true)));
        assert_eq!(registration.flag, "--fast");
    }

    #[test]
    fn inverted_singleton_stores_null() {
        let field = Field::new("fast", FieldType::Literal(vec![Value::Bool(true)]))
            .default(true)
            .allow_none();

        let (registration, _, _) = build(&field).unwrap();

        assert_eq!(registration.flag, "--no-fast");
        assert_eq!(registration.action, Action::StoreConst(Value::Null));
    }
}
