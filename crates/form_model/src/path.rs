//! Safe field-path resolution over untyped client records
//!
//! Field paths use dot/bracket syntax, e.g. `employmentDetails[0].occupation`.
//! Every traversal step is optional: absent keys, out-of-range indices, and
//! malformed segments all resolve to `None` instead of an error.

use serde_json::Value;

/// Resolve a dotted/bracketed field path against a nested record.
///
/// Returns `None` as soon as any segment cannot be followed: the current
/// value is not an object, the key is absent, the bracketed index is
/// malformed, or the index is out of range. Never panics for any input.
///
/// # Example
///
/// ```
/// use form_model::resolve;
/// use serde_json::json;
///
/// let record = json!({ "employmentDetails": [{ "occupation": "Engineer" }] });
/// let value = resolve(&record, "employmentDetails[0].occupation");
/// assert_eq!(value.and_then(|v| v.as_str()), Some("Engineer"));
/// assert!(resolve(&record, "a.b[2].c").is_none());
/// ```
pub fn resolve<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for segment in path.split('.') {
        current = if segment.contains('[') && segment.contains(']') {
            let (key, index) = parse_indexed(segment)?;
            current.as_object()?.get(key)?.as_array()?.get(index)?
        } else {
            current.as_object()?.get(segment)?
        };
    }
    Some(current)
}

/// Split an indexed segment like `items[2]` into `("items", 2)`.
///
/// Returns `None` when the brackets are misordered or the index is not a
/// non-negative integer; the caller treats that as an absent value.
fn parse_indexed(segment: &str) -> Option<(&str, usize)> {
    let open = segment.find('[')?;
    let close = segment.find(']')?;
    if close < open {
        return None;
    }
    let index = segment[open + 1..close].parse::<usize>().ok()?;
    Some((&segment[..open], index))
}
