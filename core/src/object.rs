//! Shallow key filters over JSON objects.
//!
//! All three functions copy the selected entries into a fresh map in the
//! source's insertion order. Values are cloned as-is; nested structures are
//! not inspected.

use serde_json::{Map, Value};

/// Predicate that keeps every entry.
pub fn keep_all(_value: &Value, _key: &str) -> bool {
    true
}

/// Keep the entries for which `predicate(value, key)` returns `true`.
///
/// A missing `object` yields an empty map.
pub fn pick_by<F>(object: Option<&Map<String, Value>>, mut predicate: F) -> Map<String, Value>
where
    F: FnMut(&Value, &str) -> bool,
{
    let mut picked = Map::new();
    let Some(object) = object else {
        return picked;
    };
    for (key, value) in object {
        if predicate(value, key) {
            picked.insert(key.clone(), value.clone());
        }
    }
    picked
}

/// Drop entries whose value is `null`. `false`, `0` and `""` are kept.
pub fn compact(object: Option<&Map<String, Value>>) -> Map<String, Value> {
    pick_by(object, |value, _| !value.is_null())
}

/// Drop exactly the listed keys.
pub fn omit(object: Option<&Map<String, Value>>, keys: &[&str]) -> Map<String, Value> {
    pick_by(object, |_, key| !keys.contains(&key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn pick_by_keeps_matching_entries() {
        let source = map(json!({"a": 2, "b": 4, "c": 6, "d": 8, "fizzbuzz": 10, "f": 12}));
        let picked = pick_by(Some(&source), |value, key| {
            value.as_i64().is_some_and(|n| n < 6) || key == "fizzbuzz"
        });
        assert_eq!(Value::Object(picked), json!({"a": 2, "b": 4, "fizzbuzz": 10}));
    }

    #[test]
    fn pick_by_empty_and_missing_object() {
        assert!(pick_by(Some(&Map::new()), keep_all).is_empty());
        assert!(pick_by(None, |_, _| true).is_empty());
    }

    #[test]
    fn pick_by_default_predicate_copies_everything() {
        let source = map(json!({"a": 2}));
        assert_eq!(pick_by(Some(&source), keep_all), source);
    }

    #[test]
    fn pick_by_preserves_source_order() {
        let source = map(json!({"z": 1, "a": 2, "m": 3}));
        let keys: Vec<_> = pick_by(Some(&source), keep_all).keys().cloned().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn compact_drops_only_null() {
        let source = map(json!({
            "a": 0, "b": 1, "c": null, "d": 2, "f": false, "g": 3, "h": ""
        }));
        assert_eq!(
            Value::Object(compact(Some(&source))),
            json!({"a": 0, "b": 1, "d": 2, "f": false, "g": 3, "h": ""})
        );
    }

    #[test]
    fn compact_without_nulls_is_identity() {
        let source = map(json!({"a": 1, "b": 2}));
        assert_eq!(compact(Some(&source)), source);
    }

    #[test]
    fn compact_empty_and_missing() {
        assert!(compact(Some(&Map::new())).is_empty());
        assert!(compact(None).is_empty());
    }

    #[test]
    fn omit_removes_listed_keys() {
        let source = map(json!({"a": 0, "b": 1, "d": 2, "e": 3, "f": 4}));
        assert_eq!(
            Value::Object(omit(Some(&source), &["b", "d", "f"])),
            json!({"a": 0, "e": 3})
        );
    }

    #[test]
    fn omit_without_keys_is_identity() {
        let source = map(json!({"a": 1, "b": 2}));
        assert_eq!(omit(Some(&source), &[]), source);
    }

    #[test]
    fn omit_empty_and_missing() {
        assert!(omit(Some(&Map::new()), &[]).is_empty());
        assert!(omit(None, &[]).is_empty());
    }

    #[test]
    fn nested_values_pass_through_untouched() {
        let source = map(json!({"keep": {"inner": null, "list": [1, null]}, "drop": null}));
        assert_eq!(
            Value::Object(compact(Some(&source))),
            json!({"keep": {"inner": null, "list": [1, null]}})
        );
    }
}
