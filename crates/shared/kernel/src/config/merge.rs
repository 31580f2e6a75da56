//! JSON merge helpers for layered configuration.

use serde_json::Value;

/// Merges `overlay` into `base`.
///
/// Objects merge key by key, recursively. Anything else (scalars, arrays, `null`)
/// replaces the base value outright; arrays are never merged element-wise.
pub fn merge_values(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base_slot, overlay_value) => {
            *base_slot = overlay_value.clone();
        }
    }
}

/// Owned variant of [`merge_values`].
#[must_use]
pub fn merged(mut base: Value, overlay: &Value) -> Value {
    merge_values(&mut base, overlay);
    base
}
