/*!
Coercion functions and their application to the raw result tree.

Each handler returns a pure function from raw parsed value to final typed
value, keyed by the field's lookup key. The keys must exactly match the
dest keys the collaborator parser uses, or coercion silently fails to
apply; that silence is deliberate, because a field whose subcommand was
never selected is simply absent from the results.
*/

use std::collections::BTreeMap;

use crate::assemble::assemble;
use crate::errors::{CoerceFailures, CoercionError, StructureError};
use crate::value::Value;

/// A pure function from raw parsed value to final typed value. Lives for
/// one parse invocation.
pub type Coercion = Box<dyn Fn(Value) -> Result<Value, CoercionError>>;

/// The identity coercion, for handlers whose raw value is already in its
/// final shape.
pub(crate) fn identity() -> Coercion {
    Box::new(Ok)
}

/**
The coercion functions collected from one schema, keyed by lookup key.

Nested-model fields don't contribute a coercion of their own; instead they
own a named child map, mirroring the tree shape of the results themselves.
*/
#[derive(Default)]
pub struct CoercionMap {
    entries: BTreeMap<String, Coercion>,
    children: BTreeMap<String, CoercionMap>,
}

impl CoercionMap {
    pub fn insert(&mut self, key: impl Into<String>, coercion: Coercion) {
        self.entries.insert(key.into(), coercion);
    }

    pub fn insert_child(&mut self, key: impl Into<String>, child: CoercionMap) {
        self.children.insert(key.into(), child);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Coercion> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn child(&self, key: &str) -> Option<&CoercionMap> {
        self.children.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.children.is_empty()
    }
}

/**
Convert a raw result tree into the final structured result.

First the tree is [`assemble`]d, reinterpreting any flat `a/b/c` keys as
nesting; then every coercion in `coercions` is applied to the value stored
under its key. Keys with no matching coercion pass through unchanged, and
coercions whose key is absent from the tree are skipped without error.

Coercions are applied independently: one field's failure never prevents a
sibling's coercion from running. If any field fails, all failures are
returned together as [`CoerceFailures`].
*/
pub fn coerce_and_structure(
    raw: Value,
    coercions: &CoercionMap,
) -> Result<Value, StructureError> {
    let assembled = assemble(raw)?;

    let tree = match assembled {
        Value::Map(entries) => entries,
        other => return Ok(other),
    };

    let mut failures = Vec::new();
    let structured = apply(coercions, tree, "", &mut failures);

    if failures.is_empty() {
        Ok(Value::Map(structured))
    } else {
        Err(CoerceFailures { failures }.into())
    }
}

fn apply(
    coercions: &CoercionMap,
    tree: BTreeMap<String, Value>,
    prefix: &str,
    failures: &mut Vec<(String, CoercionError)>,
) -> BTreeMap<String, Value> {
    tree.into_iter()
        .map(|(key, value)| {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}/{key}")
            };

            let value = match (coercions.child(&key), value) {
                (Some(child), Value::Map(nested)) => {
                    Value::Map(apply(child, nested, &path, failures))
                }
                (_, value) => match coercions.get(&key) {
                    None => value,
                    Some(coercion) => match coercion(value.clone()) {
                        Ok(coerced) => coerced,
                        Err(error) => {
                            // Keep the raw value so siblings stay intact in
                            // the partial result.
                            failures.push((path, error));
                            value
                        }
                    },
                },
            };

            (key, value)
        })
        .collect()
}
