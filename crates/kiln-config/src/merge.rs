//! Deep merge of JSON configuration trees.
//!
//! Objects merge key by key, arrays concatenate (base entries first) and any
//! other value in the update replaces the value in the target.

use serde_json::Value;

/// Merge `overrides` on top of `base`, returning a new tree.
///
/// ```
/// use kiln_config::merge;
/// use serde_json::json;
///
/// let merged = merge(
///     &json!({ "output": { "path": "dist" }, "plugins": ["a"] }),
///     &json!({ "output": { "filename": "[name].js" }, "plugins": ["b"] }),
/// );
/// assert_eq!(
///     merged,
///     json!({
///         "output": { "path": "dist", "filename": "[name].js" },
///         "plugins": ["a", "b"]
///     })
/// );
/// ```
pub fn merge(base: &Value, overrides: &Value) -> Value {
    let mut target = base.clone();
    merge_values(&mut target, overrides);
    target
}

/// In-place form of [`merge`].
pub fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (Value::Array(target_items), Value::Array(update_items)) => {
            target_items.extend(update_items.iter().cloned());
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}
