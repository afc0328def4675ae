//! Nested-path reads and writes into a JSON document.
//!
//! Reads return `None` for anything absent, which callers must treat as
//! distinct from a present `Value::Null`. Writes require every
//! intermediate node to already exist; missing structure is a contract
//! error, never silently created.

use crate::error::{value_type_name, StateError, StateResult};
use crate::{Path, Seg};
use serde_json::Value;

/// Get a reference to the value at `path`, or `None` if any node along
/// the way (or the leaf itself) is absent.
///
/// The empty path returns the root.
///
/// # Examples
///
/// ```
/// use drydock_state::{get_at_path, path, Path};
/// use serde_json::json;
///
/// let doc = json!({"features": [{"id": "1"}]});
/// assert_eq!(get_at_path(&doc, &path!("features", 0, "id")), Some(&json!("1")));
/// assert_eq!(get_at_path(&doc, &path!("features", 3)), None);
/// assert_eq!(get_at_path(&doc, &Path::root()), Some(&doc));
/// ```
pub fn get_at_path<'a>(root: &'a Value, path: &Path) -> Option<&'a Value> {
    let mut current = root;
    for seg in path.iter() {
        current = match seg {
            Seg::Key(key) => current.get(key)?,
            Seg::Index(idx) => current.get(idx)?,
        };
    }
    Some(current)
}

/// Set the value at `path`, mutating the document in place.
///
/// The empty path swaps the root's contents while preserving the root
/// container itself: an object root keeps its map but has its entries
/// replaced by the new value's entries. Non-empty paths require every
/// intermediate node to exist and have the right shape; only a leaf
/// *key* on an existing object may be newly created. Array writes never
/// extend the array.
pub fn set_at_path(root: &mut Value, path: &Path, value: Value) -> StateResult<()> {
    if path.is_empty() {
        swap_root_contents(root, value);
        return Ok(());
    }
    set_inner(root, path, 0, value)
}

/// Replace the root's contents without replacing the container.
fn swap_root_contents(root: &mut Value, value: Value) {
    match (root, value) {
        (Value::Object(existing), Value::Object(incoming)) => {
            existing.clear();
            existing.extend(incoming);
        }
        (slot, incoming) => *slot = incoming,
    }
}

fn set_inner(current: &mut Value, full: &Path, depth: usize, value: Value) -> StateResult<()> {
    let is_last = depth + 1 == full.len();
    match &full.segments()[depth] {
        Seg::Key(key) => {
            if !current.is_object() {
                return Err(StateError::type_mismatch(
                    full.prefix(depth),
                    "object",
                    value_type_name(current),
                ));
            }
            let obj = current.as_object_mut().unwrap();

            if is_last {
                obj.insert(key.clone(), value);
                Ok(())
            } else {
                match obj.get_mut(key) {
                    Some(child) => set_inner(child, full, depth + 1, value),
                    None => Err(StateError::path_traversal(
                        full.clone(),
                        full.prefix(depth + 1),
                    )),
                }
            }
        }
        Seg::Index(idx) => {
            if !current.is_array() {
                return Err(StateError::type_mismatch(
                    full.prefix(depth),
                    "array",
                    value_type_name(current),
                ));
            }
            let arr = current.as_array_mut().unwrap();

            if *idx >= arr.len() {
                return Err(StateError::index_out_of_bounds(
                    full.prefix(depth),
                    *idx,
                    arr.len(),
                ));
            }

            if is_last {
                arr[*idx] = value;
                Ok(())
            } else {
                set_inner(&mut arr[*idx], full, depth + 1, value)
            }
        }
    }
}
