//! Nested-model fields, parsed as named subcommands.
//!
//! A nested model contributes no flag and no coercion of its own: it
//! registers a subcommand scope (named after the alias or the field name)
//! and recursively registers the nested record's fields inside it. The
//! returned child coercion map mirrors that nesting. Recursion depth is
//! bounded only by the schema's nesting depth.

use crate::coerce::CoercionMap;
use crate::errors::SchemaError;
use crate::registry::Registry;
use crate::schema::{Field, FieldType};

use super::build_arguments;

pub(crate) fn build<R: Registry>(
    field: &Field,
    registry: &mut R,
) -> Result<(String, CoercionMap), SchemaError> {
    let key = field.lookup_key().to_owned();

    let FieldType::Model(nested) = &field.ty else {
        return Ok((key, CoercionMap::default()));
    };

    let child = registry.command(&key, field.description.as_deref());
    let coercions = build_arguments(nested, child)?;

    Ok((key, coercions))
}

#[cfg(test)]
mod tests {
    use super::super::testing::Recording;
    use super::*;
    use crate::schema::Schema;

    #[test]
    fn alias_names_the_subcommand() {
        let nested = Schema::new("database").field(Field::new("url", FieldType::Str));
        let field = Field::new("database_settings", FieldType::Model(nested))
            .alias("db")
            .description("database settings");

        let mut registry = Recording::default();
        let (key, coercions) = build(&field, &mut registry).unwrap();

        assert_eq!(key, "db");
        assert_eq!(
            registry.commands,
            vec![("db".to_owned(), Some("database settings".to_owned()))]
        );
        assert!(coercions.get("url").is_some());
    }

    #[test]
    fn deep_nesting_recurses() {
        let inner = Schema::new("inner").field(Field::new("leaf", FieldType::Str));
        let outer = Schema::new("outer").field(Field::new("inner", FieldType::Model(inner)));
        let field = Field::new("outer", FieldType::Model(outer));

        let mut registry = Recording::default();
        let (_, coercions) = build(&field, &mut registry).unwrap();

        assert!(coercions.child("inner").is_some());
        assert!(coercions.child("inner").unwrap().get("leaf").is_some());
    }
}
