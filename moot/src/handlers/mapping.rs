//! Mapping fields.
//!
//! Registered as a single-value string argument whose raw value is literal
//! text for a data structure, such as `{"a": 1}`. Coercion parses that
//! text through the literal grammar in [`Value::from_literal`]; no code is
//! ever executed.

use crate::errors::SchemaError;
use crate::naming::{describe, flag_name};
use crate::registry::{Action, Registration};
use crate::schema::Field;
use crate::value::Value;

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

    let coercion: crate::coerce::Coercion = Box::new(|value| match value {
        Value::Str(text) => Value::from_literal(&text),
        // Defaults are already structured.
        other => Ok(other),
    });

    Ok((registration, key, coercion))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::errors::CoercionError;
    use crate::schema::FieldType;

    #[test]
    fn parses_literal_text() {
        let field = Field::new("options", FieldType::Mapping);

        let (registration, _, coercion) = build(&field).unwrap();

        assert_eq!(registration.action, Action::Store);
        assert_eq!(registration.metavar.as_deref(), Some("OPTIONS"));

        let coerced = coercion(Value::Str(r#"{"a": 1}"#.into())).unwrap();
        assert_eq!(
            coerced,
            Value::Map(BTreeMap::from([("a".to_owned(), Value::Int(1))]))
        );
    }

    #[test]
    fn malformed_literal_is_an_error() {
        let field = Field::new("options", FieldType::Mapping);
        let (_, _, coercion) = build(&field).unwrap();

        assert!(matches!(
            coercion(Value::Str("{oops".into())),
            Err(CoercionError::InvalidLiteral { .. })
        ));
    }
}
