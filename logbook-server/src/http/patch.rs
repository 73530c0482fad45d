//! PATCH synthesis via RFC 7386 JSON merge patch
//!
//! Resources that expose both GET and PUT get PATCH for free: the current
//! representation is merged with the patch document and pushed through the
//! full-replace path. No per-resource patch logic exists.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::ApiError;

/// Merge `patch` into `target` per RFC 7386.
///
/// Object members are merged recursively, `null` removes a member, and
/// any non-object patch replaces the target wholesale.
pub fn merge(target: &mut Value, patch: &Value) {
    let Value::Object(patch) = patch else {
        *target = patch.clone();
        return;
    };

    if !target.is_object() {
        *target = Value::Object(serde_json::Map::new());
    }

    if let Value::Object(map) = target {
        for (key, value) in patch {
            if value.is_null() {
                map.remove(key);
            } else {
                merge(map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
    }
}

/// Apply a merge patch to `current` and decode the result back into `T`.
///
/// A patch that produces a document `T` no longer accepts is a client
/// error, not a server one.
pub fn apply<T>(current: &T, patch: &Value) -> Result<T, ApiError>
where
    T: Serialize + DeserializeOwned,
{
    let mut doc = serde_json::to_value(current).map_err(|e| ApiError::Internal {
        message: format!("failed to serialize current representation: {e}"),
    })?;

    merge(&mut doc, patch);

    serde_json::from_value(doc).map_err(|e| ApiError::BadRequest {
        message: format!("patch produced an invalid document: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn replaces_scalar_members() {
        let mut doc = json!({"name": "train", "cost": 12.5});
        merge(&mut doc, &json!({"cost": 14.0}));
        assert_eq!(doc, json!({"name": "train", "cost": 14.0}));
    }

    #[test]
    fn null_removes_members() {
        let mut doc = json!({"name": "train", "note": "window seat"});
        merge(&mut doc, &json!({"note": null}));
        assert_eq!(doc, json!({"name": "train"}));
    }

    #[test]
    fn merges_nested_objects() {
        let mut doc = json!({"a": {"b": 1, "c": 2}});
        merge(&mut doc, &json!({"a": {"b": 9}}));
        assert_eq!(doc, json!({"a": {"b": 9, "c": 2}}));
    }

    #[test]
    fn non_object_patch_replaces_wholesale() {
        let mut doc = json!({"a": 1});
        merge(&mut doc, &json!([1, 2, 3]));
        assert_eq!(doc, json!([1, 2, 3]));
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Item {
        name: String,
        qty: u32,
    }

    #[test]
    fn apply_updates_typed_value() {
        let current = Item {
            name: "tickets".into(),
            qty: 2,
        };
        let patched: Item = apply(&current, &json!({"qty": 3})).unwrap();
        assert_eq!(
            patched,
            Item {
                name: "tickets".into(),
                qty: 3
            }
        );
    }

    #[test]
    fn apply_rejects_patch_that_breaks_the_shape() {
        let current = Item {
            name: "tickets".into(),
            qty: 2,
        };
        let err = apply::<Item>(&current, &json!({"qty": "three"})).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest { .. }));
    }

    #[test]
    fn apply_rejects_member_removal_required_by_the_shape() {
        let current = Item {
            name: "tickets".into(),
            qty: 2,
        };
        let err = apply::<Item>(&current, &json!({"name": null})).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest { .. }));
    }
}
