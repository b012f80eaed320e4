/*!
The per-category field handlers and the dispatch loop.

Each handler knows how to compute a field's flag spelling (including
whether it is a negated `--no-` variant), its registration parameters, and
the coercion function that converts the raw parsed value back into the
field's native type. The dispatch loop walks a schema's fields in
declaration order, classifies each one, and invokes the matching handler.
*/

pub mod boolean;
pub mod command;
pub mod container;
pub mod enumeration;
pub mod literal;
pub mod mapping;
pub mod scalar;

use tracing::debug;

use crate::classify::{Category, classify};
use crate::coerce::{Coercion, CoercionMap};
use crate::errors::SchemaError;
use crate::registry::{Registration, Registry};
use crate::schema::{Field, Schema};

/// A handler's output for one non-command field: the registration request,
/// the lookup key, and the coercion function stored under that key.
pub(crate) type Built = (Registration, String, Coercion);

/**
Register every field of `schema` with the collaborator and collect the
coercion functions, keyed by lookup key.

Every field produces exactly zero or one registration and zero or one
coercion: nested-model fields produce neither, recursing into a named
subcommand scope instead, and their coercions land in a child map under
the subcommand's name.
*/
pub fn build_arguments<R: Registry>(
    schema: &Schema,
    registry: &mut R,
) -> Result<CoercionMap, SchemaError> {
    let mut coercions = CoercionMap::default();

    for field in &schema.fields {
        let category = classify(field);
        debug!(field = %field.name, ?category, "dispatching field");

        let (registration, key, coercion) = match category {
            Category::Command => {
                let (key, child) = command::build(field, registry)?;
                coercions.insert_child(key, child);
                continue;
            }
            Category::Boolean => boolean::build(field)?,
            Category::Container => container::build(field)?,
            Category::Enumeration => enumeration::build(field)?,
            Category::Literal => literal::build(field)?,
            Category::Mapping => mapping::build(field)?,
            Category::Scalar => scalar::build(field)?,
        };

        registry.register(registration)?;
        coercions.insert(key, coercion);
    }

    Ok(coercions)
}
