/*!
The collaborator seam: the registration parameters handlers emit, and the
[`Registry`] trait that any argument-parsing backend can implement to
receive them.
*/

use crate::errors::SchemaError;
use crate::value::Value;

/// What a registered argument does when it appears on the command line.
/// These mirror the action kinds of a conventional registration-style
/// argument parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Store a single value; a repeat overwrites (last one wins).
    Store,

    /// Store one or more values; repeats append.
    StoreMany,

    /// A flag that stores `true` when present.
    StoreTrue,

    /// A flag that stores `false` when present.
    StoreFalse,

    /// A flag that stores a fixed constant when present, taking no value.
    StoreConst(Value),

    /// A three-way boolean: both `--x` and `--no-x` are accepted, storing
    /// `true` and `false` respectively.
    BoolSwitch,
}

/// One argument definition, emitted by a handler and consumed by a
/// [`Registry`]. Not persisted beyond registration.
#[derive(Debug, Clone)]
pub struct Registration {
    /// The canonical flag spelling, including the leading `--` (and the
    /// `no-` prefix for inverted flags). For [`Action::BoolSwitch`] this is
    /// the positive spelling; the backend derives the negative one.
    pub flag: String,

    pub action: Action,

    /// The key under which the parsed value is stored in the raw result
    /// tree. Must match the lookup key of the field's coercion function.
    pub dest: String,

    pub metavar: Option<String>,

    /// Filled into the raw result when the argument never appears.
    pub default: Option<Value>,

    pub required: bool,

    pub help: Option<String>,
}

/**
An argument-registration backend.

[`build_arguments`][crate::handlers::build_arguments] emits every field's
[`Registration`] through this trait, and recurses into a named child scope
for every nested-model field. The built-in [`Parser`][crate::parser::Parser]
implements it; so can any adapter over an external argument-parsing
library that accepts (flag, action, dest, metavar, default, required, help)
tuples.
*/
pub trait Registry {
    /// Add one argument definition to this scope. Later parsing populates
    /// `dest` in the raw result tree.
    fn register(&mut self, registration: Registration) -> Result<(), SchemaError>;

    /// Create (or retrieve) the named subcommand scope, so that a nested
    /// model's fields can be registered inside it.
    fn command(&mut self, name: &str, help: Option<&str>) -> &mut Self;
}
