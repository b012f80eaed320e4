/*!
Reassembly of flat result namespaces into nested trees.

The built-in parser produces properly nested results on its own, but a
collaborator working with a flat namespace can encode nesting in its dest
keys with a `/` separator: a key `a/b/c` means "the value belongs at nested
path `a` → `b` → `c`". [`assemble`] reinterprets such keys, creating
intermediate maps as needed, so that arbitrarily deep nesting survives a
flat collaborator.
*/

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::PATH_SEPARATOR;
use crate::errors::AssembleError;
use crate::value::Value;

/**
Recursively walk a raw result tree, turning flat `/`-separated keys into
nesting. Already-nested substructures are recursed into as-is.

Two keys that disagree about the shape of the tree (one wants `a` to be a
leaf, the other wants `a/b`) are rejected with
[`AssembleError::Collision`] rather than silently overwriting either.
*/
pub fn assemble(raw: Value) -> Result<Value, AssembleError> {
    match raw {
        Value::Map(entries) => assemble_map(entries).map(Value::Map),
        other => Ok(other),
    }
}

fn assemble_map(
    entries: BTreeMap<String, Value>,
) -> Result<BTreeMap<String, Value>, AssembleError> {
    let mut out = BTreeMap::new();

    for (key, value) in entries {
        let value = match value {
            Value::Map(nested) => Value::Map(assemble_map(nested)?),
            other => other,
        };

        match key.split_once(PATH_SEPARATOR) {
            None => match out.entry(key.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
                Entry::Occupied(_) => return Err(AssembleError::Collision { path: key }),
            },
            Some(_) => insert_path(&mut out, &key, value)?,
        }
    }

    Ok(out)
}

/// Insert `value` at the nested position named by the `/`-separated `path`,
/// creating intermediate maps as needed.
fn insert_path(
    out: &mut BTreeMap<String, Value>,
    path: &str,
    value: Value,
) -> Result<(), AssembleError> {
    let collision = || AssembleError::Collision {
        path: path.to_owned(),
    };

    let mut segments = path.split(PATH_SEPARATOR);
    let mut leaf = segments.next_back().unwrap_or(path);

    // A trailing separator would produce an empty leaf segment; treat the
    // separator as literal in that case.
    if leaf.is_empty() {
        leaf = path;
    }

    let mut current = out;
    for segment in segments {
        let slot = current
            .entry(segment.to_owned())
            .or_insert_with(|| Value::Map(BTreeMap::new()));

        current = match slot {
            Value::Map(nested) => nested,
            // An intermediate node already holds a leaf value.
            _ => return Err(collision()),
        };
    }

    match current.entry(leaf.to_owned()) {
        Entry::Vacant(slot) => {
            slot.insert(value);
            Ok(())
        }
        Entry::Occupied(_) => Err(collision()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: impl IntoIterator<Item = (&'static str, Value)>) -> Value {
        Value::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.to_owned(), value))
                .collect(),
        )
    }

    #[test]
    fn flat_keys_become_nesting() {
        let raw = map([
            ("server/host", Value::Str("localhost".into())),
            ("server/port", Value::Str("8080".into())),
        ]);

        let assembled = assemble(raw).unwrap();

        assert_eq!(
            assembled,
            map([(
                "server",
                map([
                    ("host", Value::Str("localhost".into())),
                    ("port", Value::Str("8080".into())),
                ]),
            )])
        );
    }

    #[test]
    fn deep_paths_create_intermediates() {
        let assembled = assemble(map([("a/b/c", Value::Int(1))])).unwrap();

        assert_eq!(assembled, map([("a", map([("b", map([("c", Value::Int(1))]))]))]));
    }

    #[test]
    fn nested_substructures_recurse_as_is() {
        let raw = map([(
            "outer",
            map([("inner/leaf", Value::Int(1)), ("plain", Value::Int(2))]),
        )]);

        let assembled = assemble(raw).unwrap();

        assert_eq!(
            assembled,
            map([(
                "outer",
                map([("inner", map([("leaf", Value::Int(1))])), ("plain", Value::Int(2))]),
            )])
        );
    }

    #[test]
    fn leaf_and_subtree_collide() {
        // "a" as a leaf vs "a/b" as a subtree: rejected, not overwritten.
        let raw = map([("a", Value::Int(1)), ("a/b", Value::Int(2))]);

        assert!(matches!(
            assemble(raw),
            Err(AssembleError::Collision { .. })
        ));

        // A flat path whose leaf already exists inside a nested substructure
        // collides the same way.
        let raw = map([
            ("a", map([("b", Value::Int(1))])),
            ("a/b", Value::Int(2)),
        ]);

        assert!(matches!(
            assemble(raw),
            Err(AssembleError::Collision { .. })
        ));
    }

    #[test]
    fn flat_paths_merge_into_disjoint_subtrees() {
        let raw = map([
            ("a", map([("b", Value::Int(1))])),
            ("a/c", Value::Int(2)),
        ]);

        let assembled = assemble(raw).unwrap();

        assert_eq!(
            assembled,
            map([("a", map([("b", Value::Int(1)), ("c", Value::Int(2))]))])
        );
    }

    #[test]
    fn non_map_roots_pass_through() {
        assert_eq!(assemble(Value::Int(3)).unwrap(), Value::Int(3));
    }
}
