//! Typed decoding of card and atom payloads.
//!
//! Renderers declare a `serde` struct for the payload shape they understand and
//! decode into it with [`decode`]. Required fields are checked first so that the
//! resulting [`RenderError::MissingField`] names the exact field, including
//! nested ones (`metadata.url`).

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::RenderError;

/// Decode `payload` into `T` after checking that every `required` field is
/// present and not `null`.
///
/// Field paths are dot separated: `"metadata.url"` looks up
/// `payload["metadata"]["url"]`.
///
/// # Errors
///
/// - [`RenderError::NotAnObject`] if the payload is not a JSON object.
/// - [`RenderError::MissingField`] for the first required field that is absent.
/// - [`RenderError::InvalidPayload`] if decoding into `T` fails.
pub fn decode<T: DeserializeOwned>(payload: &Value, required: &[&str]) -> Result<T, RenderError> {
    if !payload.is_object() {
        return Err(RenderError::NotAnObject);
    }
    if let Some(missing) = required.iter().find(|path| lookup(payload, path).is_none()) {
        return Err(RenderError::MissingField((*missing).to_string()));
    }
    Ok(T::deserialize(payload)?)
}

/// Look up a dotted field path, treating `null` as absent.
#[must_use]
pub fn lookup<'a>(payload: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(payload, |value, key| value.get(key))
        .filter(|value| !value.is_null())
}

/// Collapse an empty optional string to `None`.
///
/// Optional attributes are omitted from output both when they are absent from
/// the payload and when they are present but empty.
#[must_use]
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Meta {
        url: String,
        title: Option<String>,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Bookmark {
        metadata: Meta,
    }

    #[test]
    fn test_decode_nested_required_fields() {
        let payload = json!({"metadata": {"url": "https://example.com", "title": null}});
        let decoded: Bookmark = decode(&payload, &["metadata.url"]).unwrap();
        assert_eq!(decoded.metadata.url, "https://example.com");
        assert_eq!(decoded.metadata.title, None);
    }

    #[rstest::rstest]
    #[case::absent(json!({"metadata": {}}))]
    #[case::null(json!({"metadata": {"url": null}}))]
    #[case::no_parent(json!({}))]
    fn test_decode_reports_missing_field(#[case] payload: Value) {
        let err = decode::<Bookmark>(&payload, &["metadata.url"]).unwrap_err();
        assert!(matches!(err, RenderError::MissingField(ref f) if f == "metadata.url"));
    }

    #[rstest::rstest]
    #[case::null(Value::Null)]
    #[case::array(json!([1, 2]))]
    #[case::string(json!("markdown"))]
    fn test_decode_rejects_non_objects(#[case] payload: Value) {
        let err = decode::<Bookmark>(&payload, &[]).unwrap_err();
        assert!(matches!(err, RenderError::NotAnObject));
    }

    #[test]
    fn test_decode_wrong_type() {
        let payload = json!({"metadata": {"url": 42}});
        let err = decode::<Bookmark>(&payload, &["metadata.url"]).unwrap_err();
        assert!(matches!(err, RenderError::InvalidPayload(_)));
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("x")), Some("x"));
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(None), None);
    }
}
