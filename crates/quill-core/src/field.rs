//! Structured key-value fields attached to log records.
//!
//! Fields come in two layers: *persistent* fields bound to a logger
//! instance, and *call-site* fields supplied with a single record. Both
//! are plain [`FieldMap`]s; [`merge`] combines them with call-site
//! precedence.

use std::collections::BTreeMap;

pub use serde_json::Value;

/// Map of field names to JSON-typed values.
///
/// A `BTreeMap` keeps iteration sorted by key, so rendered output is
/// deterministic regardless of insertion order.
pub type FieldMap = BTreeMap<String, Value>;

/// Merge call-site fields over persistent fields.
///
/// Call-site entries win on key collision; neither input map is mutated
/// beyond consuming `call_site`.
#[must_use]
pub fn merge(persistent: &FieldMap, call_site: FieldMap) -> FieldMap {
    if call_site.is_empty() {
        return persistent.clone();
    }
    let mut merged = persistent.clone();
    // extend replaces existing entries, which is exactly the precedence rule
    merged.extend(call_site);
    merged
}

/// Build a [`FieldMap`] from `key => value` pairs.
///
/// Values may be anything `serde_json::json!` accepts: literals,
/// serializable expressions, or nested JSON.
///
/// # Example
///
/// ```
/// use quill_core::fields;
///
/// let fields = fields! {
///     "user_id" => 1234,
///     "session" => "abc1234",
///     "active" => true,
/// };
/// assert_eq!(fields.len(), 3);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::FieldMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::FieldMap::new();
        $(
            map.insert(::std::string::String::from($key), $crate::json!($value));
        )+
        map
    }};
}
