/*!
Runtime schema-driven command-line parsing; moot turns a typed record schema
into command-line arguments, and parsed command-line input back into
structured data.

Where a derive-style parser fixes the argument set at compile time, `moot`
works from a [`Schema`] value built at runtime: each [`Field`] declares a
name, a type, and optional default/alias/description metadata. The core of
the crate is a type-dispatch engine: [`classify`] decides which handler a
field belongs to (boolean, enumeration, literal choice set, container,
mapping, nested model, or generic scalar), and that handler computes the
flag spelling (including `--no-` inversion), the registration parameters,
and a coercion function that converts the raw parsed value back into the
field's native type.

Registration happens through the [`Registry`] trait, so any argument
parsing backend that can accept (flag, action, dest, metavar, default,
required, help) tuples can serve as the collaborator. The built-in
[`Parser`] is such a backend: it tokenizes argv with [`moot_argv`],
resolves subcommands into nested result scopes, fills defaults, enforces
required options, and renders plain-text help.

The typical round trip:

1. [`build_arguments`] walks the schema, registers every field, and
   returns a [`CoercionMap`] keyed by each field's lookup key.
2. The collaborator parses argv into a raw [`Value`] tree.
3. [`coerce_and_structure`] reassembles any flat `a/b/c` keys into nesting
   and applies the coercions, yielding the final structured [`Value`].
*/

pub mod assemble;
pub mod classify;
pub mod coerce;
pub mod errors;
pub mod handlers;
pub mod naming;
pub mod parser;
mod printers;
pub mod registry;
pub mod schema;
pub mod value;

pub use assemble::assemble;
pub use classify::{Category, classify};
pub use coerce::{Coercion, CoercionMap, coerce_and_structure};
pub use errors::{
    AssembleError, CoerceFailures, CoercionError, ParseError, SchemaError, StructureError,
};
pub use handlers::build_arguments;
pub use parser::Parser;
pub use registry::{Action, Registration, Registry};
pub use schema::{Field, FieldType, Schema};
pub use value::Value;

/// Separator recognized in flat dest keys that encode nesting, such as
/// `server/host`. See [`assemble`].
pub const PATH_SEPARATOR: char = '/';
