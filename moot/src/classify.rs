/*!
The field classifier: given one schema field, decide which handler category
it belongs to, using only the field's declared type.
*/

use crate::schema::{Field, FieldType};

/// The handler categories. Each category corresponds to one module in
/// [`handlers`][crate::handlers].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Boolean,
    /// A nested model, parsed as a subcommand.
    Command,
    Container,
    Enumeration,
    Literal,
    Mapping,
    /// The fallback for everything else.
    Scalar,
}

/**
Classify a field by its declared type.

The arms run boolean first, then nested model, container, enumeration,
literal, and mapping, with scalar as the fallback. With a closed
[`FieldType`] the arms can't overlap, so the order is documentation rather
than a correctness requirement; in particular `Str`, `Bytes`, and `Mapping`
are distinct variants instead of being carved out of the container check.

Pure and idempotent: classifying the same field twice always yields the
same category.
*/
#[must_use]
pub fn classify(field: &Field) -> Category {
    match field.ty {
        FieldType::Bool => Category::Boolean,
        FieldType::Model(_) => Category::Command,
        FieldType::Collection(_) => Category::Container,
        FieldType::Enumeration(_) => Category::Enumeration,
        FieldType::Literal(_) => Category::Literal,
        FieldType::Mapping => Category::Mapping,
        FieldType::Str | FieldType::Bytes | FieldType::Scalar => Category::Scalar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

    #[test]
    fn categories() {
        let cases = [
            (FieldType::Bool, Category::Boolean),
            (FieldType::Model(Schema::new("sub")), Category::Command),
            (
                FieldType::Collection(Box::new(FieldType::Str)),
                Category::Container,
            ),
            (
                FieldType::Enumeration(vec!["a".into(), "b".into()]),
                Category::Enumeration,
            ),
            (FieldType::Literal(vec![1i64.into()]), Category::Literal),
            (FieldType::Mapping, Category::Mapping),
            (FieldType::Str, Category::Scalar),
            (FieldType::Bytes, Category::Scalar),
            (FieldType::Scalar, Category::Scalar),
        ];

        for (ty, expected) in cases {
            let field = Field::new("x", ty);
            assert_eq!(classify(&field), expected);
        }
    }

    /// Text and mappings are iterable values, but must never classify as
    /// containers.
    #[test]
    fn iterable_scalars_are_not_containers() {
        assert_ne!(
            classify(&Field::new("s", FieldType::Str)),
            Category::Container
        );
        assert_ne!(
            classify(&Field::new("m", FieldType::Mapping)),
            Category::Container
        );
    }

    #[test]
    fn classification_is_idempotent() {
        let field = Field::new("flag", FieldType::Bool).default(true);

        let first = classify(&field);
        let second = classify(&field);

        assert_eq!(first, second);
    }
}
