//! Safe navigation over the cards payload.
//!
//! Every accessor treats a missing key, a `null`, or a value of the wrong
//! type as absent, so a descent chain never fails part-way.

use serde_json::Value;

static NULL: Value = Value::Null;

/// `value[key]`, or `null` when `value` is not an object or lacks `key`.
pub(crate) fn child<'a>(value: &'a Value, key: &str) -> &'a Value {
    value.get(key).unwrap_or(&NULL)
}

/// Follows `keys` one object level at a time.
pub(crate) fn path<'a>(value: &'a Value, keys: &[&str]) -> &'a Value {
    keys.iter().fold(value, |node, key| child(node, key))
}

/// String at `keys`, if that is what is there.
pub(crate) fn text_at<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    path(value, keys).as_str()
}

/// Array at `keys`; empty when absent or not an array.
pub(crate) fn list_at<'a>(value: &'a Value, keys: &[&str]) -> &'a [Value] {
    path(value, keys)
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Non-empty object at `keys`.
pub(crate) fn object_at<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let node = path(value, keys);
    node.as_object()
        .is_some_and(|map| !map.is_empty())
        .then_some(node)
}
