/*!
Shared naming rules: the canonical flag spelling for a field, the lookup
key used later to retrieve and coerce its value, and the standardized help
description.
*/

use tracing::trace;

use crate::errors::SchemaError;
use crate::schema::Field;
use crate::value::Value;

/**
Compute the flag spelling and lookup key for a field.

The flag is `--` followed by the alias (when present) or the fallback name,
with underscores replaced by hyphens; when `invert` is true the prefix is
`--no-` instead. The lookup key is the alias when present, the fallback
otherwise, with underscores kept.

Fails with [`SchemaError::Unnamed`] when the field has no alias and no
fallback was supplied; a field must have a name from at least one source.
This rule never inspects the field's type.
*/
pub fn flag_name(
    field: &Field,
    invert: bool,
    fallback: Option<&str>,
) -> Result<(String, String), SchemaError> {
    let base = field
        .alias
        .as_deref()
        .or(fallback)
        .ok_or_else(|| SchemaError::Unnamed {
            field: field.name.clone(),
        })?;

    let prefix = if invert { "--no-" } else { "--" };
    let flag = format!("{prefix}{}", base.replace('_', "-"));
    let key = base.to_owned();

    trace!(%flag, %key, invert, "computed argument name");

    Ok((flag, key))
}

/**
The standardized help description for a field: the declared description,
followed by a `(default: <value>)` suffix when the field has a default.
Parts are joined with a single space; absent parts are skipped entirely.
*/
#[must_use]
pub fn describe(field: &Field) -> Option<String> {
    let default = field
        .default
        .as_ref()
        .map(|value| format!("(default: {value})"));

    match (field.description.as_deref(), default) {
        (None, None) => None,
        (Some(text), None) => Some(text.to_owned()),
        (None, Some(suffix)) => Some(suffix),
        (Some(text), Some(suffix)) => Some(format!("{text} {suffix}")),
    }
}
