//! Cards whose payload is already text in the target format.

use mobiledoc_converters_core::{RenderError, decode};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct MarkdownPayload {
    markdown: String,
}

#[derive(Deserialize)]
struct HtmlPayload {
    html: String,
}

/// `markdown` (and legacy `card-markdown`): the Markdown source plus a newline.
pub(crate) fn markdown(payload: &Value) -> Result<String, RenderError> {
    let payload: MarkdownPayload = decode(payload, &["markdown"])?;
    Ok(format!("{}\n", payload.markdown))
}

/// `html` and `embed`: the HTML source, verbatim.
pub(crate) fn html(payload: &Value) -> Result<String, RenderError> {
    let payload: HtmlPayload = decode(payload, &["html"])?;
    Ok(payload.html)
}

/// `hr`: a thematic break, whatever the payload.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn horizontal_rule(_payload: &Value) -> Result<String, RenderError> {
    Ok("---\n".to_string())
}
