//! Recursive deny-list sanitizer.
//!
//! Strips a fixed set of sensitive key names (physical delivery address and
//! internal order/hash identifiers) from arbitrarily nested JSON before
//! anything is persisted. A value under a denied key is dropped entirely,
//! not masked.

use serde_json::Value;
use tracing::debug;

/// Keys that must never survive into a persisted snapshot.
pub const DENY_LISTED_KEYS: &[&str] = &[
    "deliveryAddress",
    "orderId",
    "hashId",
    "directionUrl",
    "addressString",
];

/// Remove every deny-listed key from `value`, at any nesting depth, in both
/// objects and arrays. Returns the number of keys removed. Idempotent.
pub fn sanitize_value(value: &mut Value) -> usize {
    let mut removed = 0;
    strip(value, &mut removed);
    removed
}

/// Convenience wrapper taking ownership.
pub fn sanitized(mut value: Value) -> Value {
    let removed = sanitize_value(&mut value);
    if removed > 0 {
        debug!(removed, "sanitizer dropped deny-listed fields");
    }
    value
}

fn strip(value: &mut Value, removed: &mut usize) {
    match value {
        Value::Object(map) => {
            let before = map.len();
            map.retain(|key, _| !DENY_LISTED_KEYS.contains(&key.as_str()));
            *removed += before - map.len();
            for child in map.values_mut() {
                strip(child, removed);
            }
        }
        Value::Array(items) => {
            for child in items.iter_mut() {
                strip(child, removed);
            }
        }
        _ => {}
    }
}
