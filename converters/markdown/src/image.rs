use mobiledoc_converters_core::{
    CardRenderer, RenderError, SharedPathNormalizer, decode, non_empty,
};
use serde::Deserialize;
use serde_json::Value;

use crate::shortcode::Shortcode;

#[derive(Deserialize)]
struct ImagePayload {
    src: String,
    #[serde(default)]
    caption: Option<String>,
    #[serde(default)]
    alt: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    href: Option<String>,
}

/// `image`: Hugo's built-in `figure` shortcode.
///
/// Also used for legacy image sections, which only carry a `src`.
pub(crate) struct Image {
    normalizer: SharedPathNormalizer,
}

impl Image {
    pub(crate) fn new(normalizer: SharedPathNormalizer) -> Self {
        Self { normalizer }
    }
}

impl CardRenderer for Image {
    fn render(&self, payload: &Value) -> Result<String, RenderError> {
        let payload: ImagePayload = decode(payload, &["src"])?;
        let figure = Shortcode::new("figure")
            .param("src", &self.normalizer.normalize(&payload.src))
            .optional_param("link", non_empty(payload.href.as_deref()))
            .optional_param("alt", non_empty(payload.alt.as_deref()))
            .optional_param("title", non_empty(payload.title.as_deref()))
            .optional_param("caption", non_empty(payload.caption.as_deref()))
            .build();
        Ok(format!("{figure}\n"))
    }
}
