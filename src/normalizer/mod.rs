//! Converts raw storefront payloads into domain records.
//!
//! Third-party payloads are read through the optional-path accessors below:
//! a missing segment anywhere along a path yields `None` (or an empty
//! default), never a panic and never phantom structure.

pub mod appstore;
pub mod playstore;

use serde_json::Value;

/// Follow object keys from `value`.
pub fn json_at<'v>(value: &'v Value, keys: &[&str]) -> Option<&'v Value> {
    keys.iter().try_fold(value, |current, key| current.get(*key))
}

/// Follow array positions from `value`.
pub fn json_index<'v>(value: &'v Value, indices: &[usize]) -> Option<&'v Value> {
    indices
        .iter()
        .try_fold(value, |current, index| current.get(*index))
}

/// Read a `{"label": "..."}` wrapped string at `keys`, empty when absent.
pub fn label_at(value: &Value, keys: &[&str]) -> String {
    json_at(value, keys)
        .and_then(|v| v.get("label"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// String at `keys`, empty when absent.
pub fn str_at(value: &Value, keys: &[&str]) -> String {
    json_at(value, keys)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// A value that may be either a single object or a list of them.
pub fn one_or_many(value: Option<&Value>) -> Vec<&Value> {
    match value {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![other],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_at_present() {
        let value = json!({"author": {"name": {"label": "alice"}}});
        assert_eq!(
            json_at(&value, &["author", "name", "label"]),
            Some(&json!("alice"))
        );
    }

    #[test]
    fn test_json_at_missing_segment() {
        let value = json!({"author": {}});
        assert!(json_at(&value, &["author", "name", "label"]).is_none());
        assert!(json_at(&json!("scalar"), &["a"]).is_none());
    }

    #[test]
    fn test_json_at_empty_path_is_identity() {
        let value = json!({"a": 1});
        assert_eq!(json_at(&value, &[]), Some(&value));
    }

    #[test]
    fn test_json_index() {
        let value = json!([null, [1, ["x", "y"]]]);
        assert_eq!(json_index(&value, &[1, 1, 1]), Some(&json!("y")));
        assert!(json_index(&value, &[0, 0]).is_none());
        assert!(json_index(&value, &[5]).is_none());
    }

    #[test]
    fn test_label_at_defaults_to_empty() {
        let value = json!({"title": {"label": "Great"}, "content": {}});
        assert_eq!(label_at(&value, &["title"]), "Great");
        assert_eq!(label_at(&value, &["content"]), "");
        assert_eq!(label_at(&value, &["missing", "deep"]), "");
    }

    #[test]
    fn test_one_or_many() {
        let list = json!([1, 2]);
        assert_eq!(one_or_many(Some(&list)).len(), 2);

        let single = json!({"a": 1});
        assert_eq!(one_or_many(Some(&single)).len(), 1);

        assert!(one_or_many(None).is_empty());
        assert!(one_or_many(Some(&Value::Null)).is_empty());
    }
}
