//! Client record helpers
//!
//! A client record is arbitrarily nested, loosely typed JSON assembled by the
//! calling layer from profile and business sub-resources. No shape is assumed
//! beyond what field paths reference.

use serde_json::{Map, Value};

/// A client data record. Arbitrary nesting, optionally absent everywhere.
pub type ClientRecord = Value;

/// Keys never listed when auto-detecting a section's fields.
const EXCLUDED_KEYS: [&str; 3] = ["id", "createdAt", "updatedAt"];

/// The client's first name, if present and non-empty.
pub fn first_name(record: &Value) -> Option<&str> {
    record
        .get("firstName")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

/// The client's full display name: first and last name joined, trimmed.
///
/// Missing parts are simply omitted; a record with neither name yields an
/// empty string.
pub fn full_name(record: &Value) -> String {
    let first = record.get("firstName").and_then(Value::as_str).unwrap_or("");
    let last = record.get("lastName").and_then(Value::as_str).unwrap_or("");
    let mut name = String::with_capacity(first.len() + last.len() + 1);
    name.push_str(first.trim());
    if !name.is_empty() && !last.trim().is_empty() {
        name.push(' ');
    }
    name.push_str(last.trim());
    name
}

/// Locate a section's sub-object inside a record, if it exists and is an
/// object.
pub fn sub_object<'a>(record: &'a Value, key: &str) -> Option<&'a Map<String, Value>> {
    record.get(key).and_then(Value::as_object)
}

/// List a sub-object's own keys as auto-detected field names.
///
/// Keys prefixed with `_` and the bookkeeping literals `id`, `createdAt`,
/// and `updatedAt` are excluded.
pub fn auto_detect_keys(map: &Map<String, Value>) -> Vec<String> {
    map.keys()
        .filter(|key| !key.starts_with('_') && !EXCLUDED_KEYS.contains(&key.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_name_present() {
        let record = json!({ "firstName": "Anna", "lastName": "Schmidt" });
        assert_eq!(first_name(&record), Some("Anna"));
    }

    #[test]
    fn test_first_name_absent_or_blank() {
        assert_eq!(first_name(&json!({})), None);
        assert_eq!(first_name(&json!({ "firstName": "" })), None);
        assert_eq!(first_name(&json!({ "firstName": "   " })), None);
        assert_eq!(first_name(&json!({ "firstName": 42 })), None);
    }

    #[test]
    fn test_full_name_joins_parts() {
        let record = json!({ "firstName": "Anna", "lastName": "Schmidt" });
        assert_eq!(full_name(&record), "Anna Schmidt");
    }

    #[test]
    fn test_full_name_partial() {
        assert_eq!(full_name(&json!({ "firstName": "Anna" })), "Anna");
        assert_eq!(full_name(&json!({ "lastName": "Schmidt" })), "Schmidt");
        assert_eq!(full_name(&json!({})), "");
    }

    #[test]
    fn test_sub_object_lookup() {
        let record = json!({ "personal": { "city": "Berlin" }, "score": 7 });
        assert!(sub_object(&record, "personal").is_some());
        assert!(sub_object(&record, "score").is_none());
        assert!(sub_object(&record, "missing").is_none());
    }

    #[test]
    fn test_auto_detect_keys_filters_bookkeeping() {
        let record = json!({
            "personal": {
                "id": "abc",
                "createdAt": "2024-01-01",
                "updatedAt": "2024-02-01",
                "_internal": true,
                "city": "Berlin",
                "maritalStatus": "married"
            }
        });
        let map = sub_object(&record, "personal").unwrap();
        let keys = auto_detect_keys(map);
        assert_eq!(keys, vec!["city".to_string(), "maritalStatus".to_string()]);
    }
}
