//! Recursive merge of JSON documents

use serde_json::Value;

/// Merge `source` into `target`.
///
/// Objects merge key by key, recursively. Any other value in `source`
/// (scalars, arrays, null) replaces what `target` holds at that position.
pub fn deep_merge(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(dst), Value::Object(src)) => {
            for (key, value) in src {
                match dst.get_mut(key) {
                    Some(existing) if existing.is_object() && value.is_object() => {
                        deep_merge(existing, value);
                    }
                    _ => {
                        dst.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, source) => *target = source.clone(),
    }
}
