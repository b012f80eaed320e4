/*!
The declarative data-model schema: a typed record definition with named,
typed, optionally-defaulted fields, potentially nested.

A [`Schema`] is built once and is read-only during parsing. Field types are
a closed set of tagged variants ([`FieldType`]); the dispatch engine in
[`classify`][crate::classify] decides which argument-handling strategy each
variant gets.
*/

use crate::value::Value;

/// One attribute of the input record type. Immutable once the schema is
/// defined.
#[derive(Debug, Clone)]
pub struct Field {
    /// The field's identifier, used as the fallback argument name.
    pub name: String,

    /// Optional external display name. When present it overrides `name`
    /// everywhere: flag spelling, dest key, and subcommand name.
    pub alias: Option<String>,

    /// The field's declared type.
    pub ty: FieldType,

    /// Whether the field must be supplied on the command line.
    pub required: bool,

    /// The value used when the field is absent. Setting a default makes the
    /// field optional.
    pub default: Option<Value>,

    /// Whether an explicit "no value" ([`Value::Null`]) is acceptable for
    /// this field. Participates in choice-flag inversion.
    pub allow_none: bool,

    /// Human-readable help text.
    pub description: Option<String>,
}

impl Field {
    /// A new required field with no default, alias, or description.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            alias: None,
            ty,
            required: true,
            default: None,
            allow_none: false,
            description: None,
        }
    }

    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Mark the field optional without giving it a default.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Give the field a default value. A defaulted field is optional.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self.required = false;
        self
    }

    #[must_use]
    pub fn allow_none(mut self) -> Self {
        self.allow_none = true;
        self
    }

    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// The key under which this field's raw value is stored and later
    /// retrieved: the alias when present, the name otherwise.
    #[must_use]
    pub fn lookup_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/**
The closed set of field types.

Because the type is a tagged variant set, `Str`, `Bytes`, and `Mapping` are
structurally distinct from `Collection` rather than being excluded from it
by runtime predicates checked in a particular order.
*/
#[derive(Debug, Clone)]
pub enum FieldType {
    Bool,

    /// A text scalar. Distinct from `Collection` even though text is
    /// iterable in many type systems.
    Str,

    /// A byte-string scalar, same caveat as `Str`.
    Bytes,

    /// Any other scalar (integers, floats, paths, …). Coercion from string
    /// is delegated to the caller's validation layer.
    Scalar,

    /// A closed enumeration; the member names, in declaration order.
    Enumeration(Vec<String>),

    /// A closed set of literal values, possibly of mixed primitive type.
    Literal(Vec<Value>),

    /// A list/set/tuple-like container of the given element type.
    Collection(Box<FieldType>),

    /// A key-value mapping, supplied on the command line as literal text.
    Mapping,

    /// A nested record, parsed as a named subcommand.
    Model(Schema),
}

/// A typed record definition: the input to
/// [`build_arguments`][crate::handlers::build_arguments].
#[derive(Debug, Clone)]
pub struct Schema {
    /// The record's name; used as the program name of the scope it defines.
    pub name: String,

    pub description: Option<String>,

    /// Fields in declaration order. Registration iterates them in order.
    pub fields: Vec<Field>,
}

impl Schema {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }
}
