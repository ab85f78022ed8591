//! Projections over a parsed Brainstem response.
//!
//! A successful collection response looks like
//!
//! ```json
//! {
//!   "count": 2,
//!   "meta": { "count": 2, "page_count": 1, "page_number": 1, "page_size": 20 },
//!   "results": [{ "key": "widgets", "id": "3" }, { "key": "widgets", "id": "7" }],
//!   "widgets": { "3": { "id": "3" }, "7": { "id": "7" } }
//! }
//! ```
//!
//! and an error response as `{ "errors": [{ "type": "...", "message": "..." }] }`.
//! These functions never fail; missing fields come back as `None`, `null` or
//! empty collections.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::object::omit;

/// Top-level keys that are not side-loaded records.
const NON_RESULT_KEYS: [&str; 3] = ["count", "meta", "results"];

static NULL: Value = Value::Null;

/// Pagination block of a collection response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub count: u64,
    pub page_count: u64,
    pub page_number: u64,
    pub page_size: u64,
}

/// Total number of matching records.
pub fn count(json: &Value) -> Option<u64> {
    json.get("meta")?.get("count")?.as_u64()
}

/// Total number of pages available.
pub fn pages(json: &Value) -> Option<u64> {
    json.get("meta")?.get("page_count")?.as_u64()
}

pub fn meta(json: &Value) -> Option<Meta> {
    Meta::deserialize(json.get("meta")?).ok()
}

/// `message` of every entry in `errors`, in order.
pub fn errors(json: &Value) -> Vec<&Value> {
    field_of_each(json, "errors", "message")
}

/// `id` of every entry in `results`, in order.
pub fn ids(json: &Value) -> Vec<&Value> {
    field_of_each(json, "results", "id")
}

/// Everything except `count`, `meta` and `results`: the side-loaded record
/// maps, keyed by resource type.
pub fn objects(json: &Value) -> Map<String, Value> {
    omit(json.as_object(), &NON_RESULT_KEYS)
}

/// The side-loaded record for each entry in `results`, in result order.
///
/// References whose record is missing are skipped.
pub fn records(json: &Value) -> Vec<&Value> {
    let Some(results) = json.get("results").and_then(Value::as_array) else {
        return Vec::new();
    };
    results
        .iter()
        .filter_map(|result| {
            let key = result.get("key")?.as_str()?;
            let id = match result.get("id")? {
                Value::String(id) => id.clone(),
                other => other.to_string(),
            };
            json.get(key)?.get(id.as_str())
        })
        .collect()
}

fn field_of_each<'a>(json: &'a Value, list: &str, field: &str) -> Vec<&'a Value> {
    json.get(list)
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(|entry| entry.get(field).unwrap_or(&NULL)).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn count_reads_meta() {
        let json = json!({
            "meta": {"count": 3, "page_number": 1, "page_count": 1, "page_size": 20},
            "results": [
                {"key": "widgets", "id": "3"},
                {"key": "widgets", "id": "666"},
                {"key": "widgets", "id": "1001"},
            ],
        });
        assert_eq!(count(&json), Some(3));
    }

    #[test]
    fn pages_reads_page_count() {
        let json = json!({
            "meta": {"count": 14, "page_number": 1, "page_count": 2, "page_size": 20},
            "results": [],
        });
        assert_eq!(pages(&json), Some(2));
        assert_eq!(
            meta(&json),
            Some(Meta { count: 14, page_count: 2, page_number: 1, page_size: 20 })
        );
    }

    #[test]
    fn missing_meta_is_none() {
        let json = json!({"results": []});
        assert_eq!(count(&json), None);
        assert_eq!(pages(&json), None);
        assert_eq!(meta(&json), None);
    }

    #[test]
    fn errors_extracts_messages_in_order() {
        let json = json!({
            "errors": [
                {"type": "system", "message": "Your account has been canceled"},
                {"type": "oauth", "message": "Invalid OAuth 2 Request"},
            ],
        });
        assert_eq!(
            errors(&json),
            [&json!("Your account has been canceled"), &json!("Invalid OAuth 2 Request")]
        );
    }

    #[test]
    fn ids_extracts_ids_in_order() {
        let json = json!({
            "count": 3,
            "results": [
                {"key": "widgets", "id": "3"},
                {"key": "widgets", "id": "666"},
                {"key": "widgets", "id": "1001"},
            ],
        });
        assert_eq!(ids(&json), [&json!("3"), &json!("666"), &json!("1001")]);
    }

    #[test]
    fn entries_without_the_field_yield_null() {
        let json = json!({"results": [{"key": "widgets"}, {"id": 4}]});
        assert_eq!(ids(&json), [&Value::Null, &json!(4)]);
        assert!(errors(&json).is_empty());
    }

    #[test]
    fn objects_keeps_only_side_loads() {
        let json = json!({
            "count": 2,
            "meta": {"count": 2, "page_number": 1, "page_count": 1, "page_size": 20},
            "results": [{"key": "foos", "id": "2"}, {"key": "foos", "id": "10"}],
            "foos": {"1": {"id": "1", "name": "a"}, "2": {"id": "2", "name": "b"}},
            "bars": {
                "3": {"id": "3", "name": "c"},
                "4": {"id": "4", "name": "d"},
                "5": {"id": "5", "name": "e"},
            },
            "baz": {"6": {"id": "6", "name": "f"}, "7": {"id": "7", "name": "g"}},
        });
        let objects = objects(&json);
        assert_eq!(objects.keys().collect::<Vec<_>>(), ["foos", "bars", "baz"]);
        assert_eq!(objects["foos"], json["foos"]);
        assert_eq!(objects["bars"], json["bars"]);
        assert_eq!(objects["baz"], json["baz"]);
    }

    #[test]
    fn objects_of_non_object_is_empty() {
        assert!(objects(&json!("uh oh!")).is_empty());
    }

    #[test]
    fn records_resolves_results_against_side_loads() {
        let json = json!({
            "results": [
                {"key": "foos", "id": "2"},
                {"key": "bars", "id": 3},
                {"key": "foos", "id": "99"},
            ],
            "foos": {"2": {"id": "2", "name": "b"}},
            "bars": {"3": {"id": "3", "name": "c"}},
        });
        assert_eq!(
            records(&json),
            [&json!({"id": "2", "name": "b"}), &json!({"id": "3", "name": "c"})]
        );
    }
}
