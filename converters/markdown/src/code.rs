use mobiledoc_converters_core::{RenderError, decode, non_empty};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct CodePayload {
    code: String,
    #[serde(default)]
    language: Option<String>,
}

/// `code`: a fenced code block, tagged with the language when there is one.
pub(crate) fn code(payload: &Value) -> Result<String, RenderError> {
    let payload: CodePayload = decode(payload, &["code"])?;
    let language = non_empty(payload.language.as_deref()).unwrap_or_default();
    Ok(format!("```{language}\n{}\n```\n", payload.code))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[rstest::rstest]
    #[case::no_language(json!({"code": "ls -la"}), "```\nls -la\n```\n")]
    #[case::null_language(json!({"code": "ls -la", "language": null}), "```\nls -la\n```\n")]
    #[case::empty_language(json!({"code": "ls", "language": ""}), "```\nls\n```\n")]
    #[case::language(
        json!({"code": "fn main() {}", "language": "rust"}),
        "```rust\nfn main() {}\n```\n"
    )]
    fn test_code_fence(#[case] payload: Value, #[case] expected: &str) {
        assert_eq!(code(&payload).unwrap(), expected);
    }

    #[test]
    fn test_code_missing() {
        let err = code(&json!({"language": "go"})).unwrap_err();
        assert!(matches!(err, RenderError::MissingField(ref f) if f == "code"));
    }

    #[test]
    fn test_code_wrong_type() {
        let err = code(&json!({"code": 42})).unwrap_err();
        assert!(matches!(err, RenderError::InvalidPayload(_)));
    }
}
