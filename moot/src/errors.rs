/*!
Error types for the various stages of a parse: schema registration,
tokenized argument handling, flat-key reassembly, and value coercion.

Every error is local to one field's processing; a failure in one field
never corrupts the state of its siblings. There are no retries anywhere;
the whole pipeline is a one-shot synchronous transform.
*/

use std::fmt;

use thiserror::Error;

/// A schema could not be registered with the collaborator parser. These are
/// precondition violations in the schema itself, surfaced immediately.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A field has neither an alias nor a fallback name; an argument name
    /// cannot be derived from any source.
    #[error("field {field:?} has no alias and no fallback name")]
    Unnamed { field: String },

    /// Two fields resolved to the same dest key in one registration scope.
    #[error("duplicate dest key {dest:?}")]
    DuplicateDest { dest: String },

    /// Two fields resolved to the same flag spelling in one registration
    /// scope.
    #[error("duplicate flag --{spelling}")]
    DuplicateFlag { spelling: String },
}

/// A coercion function rejected the raw value it was given.
#[derive(Debug, Error)]
pub enum CoercionError {
    /// The mapping handler's raw string was not a valid literal data
    /// structure.
    #[error("{text:?} is not a valid literal value")]
    InvalidLiteral {
        text: String,
        #[source]
        source: serde_json::Error,
    },

    /// The raw string did not name any member of a closed choice set.
    #[error("{value:?} is not one of {choices:?}")]
    UnknownChoice { value: String, choices: Vec<String> },
}

/// Flat-key reassembly found two keys that disagree about the shape of the
/// tree. See [`assemble`][crate::assemble::assemble].
#[derive(Debug, Error)]
pub enum AssembleError {
    /// One key wants `path` to be a leaf while another wants it to be a
    /// subtree (or two paths produced the same leaf twice).
    #[error("key path {path:?} collides with an existing entry")]
    Collision { path: String },
}

/**
Every coercion failure from one invocation of
[`coerce_and_structure`][crate::coerce::coerce_and_structure].

Coercions are applied independently per field, so a malformed value in one
field doesn't prevent its siblings from coercing; all failures are
collected here, keyed by the `/`-joined path of the offending field.
*/
#[derive(Debug, Error)]
pub struct CoerceFailures {
    pub failures: Vec<(String, CoercionError)>,
}

impl fmt::Display for CoerceFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} field(s) failed coercion:", self.failures.len())?;

        for (path, error) in &self.failures {
            write!(f, " [{path}: {error}]")?;
        }

        Ok(())
    }
}

/// Errors from the full raw-tree-to-structured-result conversion: either
/// the reassembly step or the coercion step failed.
#[derive(Debug, Error)]
pub enum StructureError {
    #[error(transparent)]
    Assemble(#[from] AssembleError),

    #[error(transparent)]
    Coerce(#[from] CoerceFailures),
}

/// Errors from the built-in runtime [`Parser`][crate::parser::Parser].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unrecognized option --{option}")]
    UnknownOption { option: String },

    #[error("unrecognized option -{option}")]
    UnknownShort { option: char },

    #[error("option --{option} requires an argument")]
    NeedsArgument { option: String },

    #[error("option --{option} doesn't take an argument")]
    UnexpectedArgument { option: String },

    #[error("unexpected positional argument {argument:?}")]
    UnexpectedPositional { argument: String },

    #[error("unrecognized command {name:?} (expected one of {expected:?})")]
    UnknownSubcommand { name: String, expected: Vec<String> },

    #[error("required option {flag} was omitted")]
    Required { flag: String },

    #[error("argument contained invalid UTF-8")]
    InvalidUtf8,

    /// `--help` or `-h` was given. Carries the rendered help text for the
    /// innermost command scope that was reached.
    #[error("help was requested")]
    HelpRequested { help: String },
}
