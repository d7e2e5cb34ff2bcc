use std::cmp::Ordering;

use serde::Deserialize as _;
use serde_json::{Map, Value};

use crate::Message;

/// Local mirror of the subscribed subtree.
///
/// The server streams changes as `(path, data)` pairs relative to the
/// subscription root. Applying them here lets every change be turned into
/// a complete snapshot. Empty objects and nulls never stay in the tree.
#[derive(Debug, Default)]
pub struct Tree {
    root: Value,
}

impl Tree {
    /// Replaces the node at `path` with `data`; `null` deletes it.
    pub fn put(&mut self, path: &str, data: Value) {
        let segments = segments(path).collect::<Vec<_>>();
        set(&mut self.root, &segments, normalize(data));
    }

    /// Replaces each child of the node at `path` that `data` names.
    pub fn patch(&mut self, path: &str, data: Value) {
        let Value::Object(children) = data else {
            self.put(path, data);
            return;
        };

        let base = segments(path).collect::<Vec<_>>();
        for (key, value) in children {
            let mut segments = base.clone();
            segments.push(&key);
            set(&mut self.root, &segments, normalize(value));
        }
    }

    /// Decodes the root's children in key order, skipping any that are not messages.
    pub fn messages(&self) -> Vec<Message> {
        let Value::Object(children) = &self.root else {
            return Vec::new();
        };

        let mut children = children.iter().collect::<Vec<_>>();
        children.sort_by(|(left, _), (right, _)| compare_keys(left, right));

        children
            .into_iter()
            .filter_map(|(key, value)| match Message::deserialize(value) {
                Ok(msg) => Some(msg),
                Err(err) => {
                    tracing::debug!(%key, %err, "skipping a child that is not a message");
                    None
                }
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_null()
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn set(node: &mut Value, path: &[&str], data: Value) {
    let Some((head, rest)) = path.split_first() else {
        *node = data;
        return;
    };

    if !node.is_object() {
        if data.is_null() {
            return;
        }
        *node = Value::Object(Map::new());
    }

    let Value::Object(children) = &mut *node else {
        return;
    };

    let child = children.entry(*head).or_insert(Value::Null);
    set(child, rest, data);
    if child.is_null() {
        children.remove(*head);
    }

    if children.is_empty() {
        *node = Value::Null;
    }
}

fn normalize(value: Value) -> Value {
    match value {
        Value::Object(children) => {
            let children = children
                .into_iter()
                .map(|(k, v)| (k, normalize(v)))
                .filter(|(_, v)| !v.is_null())
                .collect::<Map<_, _>>();
            if children.is_empty() {
                Value::Null
            } else {
                Value::Object(children)
            }
        }
        value => value,
    }
}

// keys that read as 32-bit integers sort first, numerically, shorter first on a tie;
// the rest sort as strings
fn compare_keys(left: &str, right: &str) -> Ordering {
    match (integer_key(left), integer_key(right)) {
        (Some(l), Some(r)) => l.cmp(&r).then_with(|| left.len().cmp(&right.len())),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => left.cmp(right),
    }
}

// an optional '-' followed only by digits, within i32
fn integer_key(key: &str) -> Option<i32> {
    let digits = key.strip_prefix('-').unwrap_or(key);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tests;
