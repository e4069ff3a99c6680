use mobiledoc_converters_core::RenderError;
use serde_json::Value;

/// `soft-break` and `soft-return`: a line break inside a paragraph.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn line_break(_value: &str, _payload: &Value) -> Result<String, RenderError> {
    Ok("\n".to_string())
}
