//! Deep merge of JSON pages
//!
//! Combines successive page payloads into one document:
//!
//! | target | overlay | result                                   |
//! |--------|---------|------------------------------------------|
//! | array  | array   | target elements, then overlay elements   |
//! | object | object  | key union, shared keys merged recursively |
//! | other  | other   | overlay replaces target                  |
//!
//! The merge is not commutative. Always pass what was accumulated so far as
//! `target` and the newest page as `overlay`.

use serde_json::map::Entry;
use serde_json::Value;

/// Merge `overlay` into `target`, consuming both
pub fn merge(target: Value, overlay: Value) -> Value {
    match (target, overlay) {
        (Value::Array(mut target), Value::Array(overlay)) => {
            target.extend(overlay);
            Value::Array(target)
        }
        (Value::Object(mut target), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match target.entry(key) {
                    Entry::Occupied(mut existing) => {
                        let merged = merge(existing.get_mut().take(), value);
                        existing.insert(merged);
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(value);
                    }
                }
            }
            Value::Object(target)
        }
        (_, overlay) => overlay,
    }
}

/// Borrowing variant of [`merge`]
pub fn merged(target: &Value, overlay: &Value) -> Value {
    merge(target.clone(), overlay.clone())
}
