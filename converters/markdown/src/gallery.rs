//! `gallery` card: payload decoding shared by every dialect, and the raw HTML
//! rendering used by default.
//!
//! The HTML variant lays images out in rows of [`ROW_SIZE`]. Only images that
//! decode count towards a row, so a skipped entry never leaves a hole.

use std::fmt::Write as _;

use mobiledoc_converters_core::{
    CardRenderer, PathNormalizer, RenderError, SharedPathNormalizer, decode, non_empty,
};
use serde::Deserialize;
use serde_json::Value;

use crate::shortcode::escape_attribute;

/// Images per row in the HTML layout.
pub const ROW_SIZE: usize = 3;

/// One well-formed gallery entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GalleryImage {
    /// Image source, already normalized once returned by [`GalleryContent::decode`].
    pub src: String,
    /// Width in pixels (Ghost stores it as a float).
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Alternative text.
    #[serde(default)]
    pub alt: Option<String>,
    /// Title attribute.
    #[serde(default)]
    pub title: Option<String>,
}

impl GalleryImage {
    /// Width rendered as a whole number (`5184.0` becomes `5184`).
    #[must_use]
    pub fn width_px(&self) -> String {
        format!("{:.0}", self.width)
    }

    /// Height rendered as a whole number.
    #[must_use]
    pub fn height_px(&self) -> String {
        format!("{:.0}", self.height)
    }
}

#[derive(Deserialize)]
struct GalleryPayload {
    images: Vec<Value>,
    #[serde(default)]
    caption: Option<String>,
}

/// Decoded gallery: the well-formed images in input order and the caption.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryContent {
    /// Images that decoded successfully, sources normalized.
    pub images: Vec<GalleryImage>,
    /// Caption, if present and not empty.
    pub caption: Option<String>,
}

impl GalleryContent {
    /// Decode a gallery payload.
    ///
    /// Entries that are not image objects with `src`, `width` and `height` are
    /// skipped with a warning; the rest keep their order.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if the payload is not an object or has no
    /// `images` list.
    pub fn decode(payload: &Value, normalizer: &dyn PathNormalizer) -> Result<Self, RenderError> {
        let payload: GalleryPayload = decode(payload, &["images"])?;
        let images = payload
            .images
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                match decode::<GalleryImage>(entry, &["src", "width", "height"]) {
                    Ok(image) => Some(GalleryImage {
                        src: normalizer.normalize(&image.src),
                        ..image
                    }),
                    Err(e) => {
                        tracing::warn!(index, error = %e, "skipping malformed gallery image");
                        None
                    }
                }
            })
            .collect();
        Ok(Self {
            images,
            caption: non_empty(payload.caption.as_deref()).map(ToString::to_string),
        })
    }
}

/// Raw HTML gallery.
pub(crate) struct Gallery {
    normalizer: SharedPathNormalizer,
}

impl Gallery {
    pub(crate) fn new(normalizer: SharedPathNormalizer) -> Self {
        Self { normalizer }
    }
}

impl CardRenderer for Gallery {
    fn render(&self, payload: &Value) -> Result<String, RenderError> {
        let gallery = GalleryContent::decode(payload, self.normalizer.as_ref())?;

        let mut html = String::from("<figure>\n  <div>\n    <div>\n");
        for (i, image) in gallery.images.iter().enumerate() {
            if i > 0 && i % ROW_SIZE == 0 {
                html.push_str("    </div>\n    <div>\n");
            }
            let _ = write!(
                html,
                "      <div><img src=\"{}\" width=\"{}\" height=\"{}\"",
                escape_attribute(&image.src),
                image.width_px(),
                image.height_px(),
            );
            if let Some(alt) = non_empty(image.alt.as_deref()) {
                let _ = write!(html, " alt=\"{}\"", escape_attribute(alt));
            }
            if let Some(title) = non_empty(image.title.as_deref()) {
                let _ = write!(html, " title=\"{}\"", escape_attribute(title));
            }
            html.push_str("/></div>\n");
        }
        html.push_str("    </div>\n  </div>\n");

        // Ghost captions are HTML already
        if let Some(caption) = &gallery.caption {
            let _ = write!(html, "  <figcaption>\n    {caption}\n  </figcaption>\n");
        }
        html.push_str("</figure>\n");
        Ok(html)
    }
}
