//! `bookmark` card: link preview with title, description and optional
//! publisher details.

use std::fmt::Write as _;

use mobiledoc_converters_core::{
    CardRenderer, PathNormalizer, RenderError, SharedPathNormalizer, decode, non_empty,
};
use serde::Deserialize;
use serde_json::Value;

use crate::shortcode::{escape_attribute, escape_text};

#[derive(Deserialize)]
struct BookmarkPayload {
    metadata: Metadata,
    #[serde(default)]
    caption: Option<String>,
}

#[derive(Deserialize)]
struct Metadata {
    url: String,
    title: String,
    description: String,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    publisher: Option<String>,
}

/// Decoded bookmark. Optional fields are `None` both when absent and when empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkContent {
    /// Bookmarked URL.
    pub url: String,
    /// Page title.
    pub title: String,
    /// Page description.
    pub description: String,
    /// Preview image, normalized.
    pub thumbnail: Option<String>,
    /// Site icon, normalized.
    pub icon: Option<String>,
    /// Article author.
    pub author: Option<String>,
    /// Site name.
    pub publisher: Option<String>,
    /// Card caption (HTML).
    pub caption: Option<String>,
}

/// Paths checked before decoding, in the order they are reported.
const REQUIRED: &[&str] = &["metadata.url", "metadata.title", "metadata.description"];

impl BookmarkContent {
    /// Decode a bookmark payload.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingField`] naming the first of `metadata.url`,
    /// `metadata.title` or `metadata.description` that is absent, or another
    /// [`RenderError`] if the payload has the wrong shape.
    pub fn decode(payload: &Value, normalizer: &dyn PathNormalizer) -> Result<Self, RenderError> {
        let BookmarkPayload { metadata, caption } = decode(payload, REQUIRED)?;
        let present = |value: Option<String>| value.filter(|v| !v.is_empty());
        Ok(Self {
            url: metadata.url,
            title: metadata.title,
            description: metadata.description,
            thumbnail: present(metadata.thumbnail).map(|path| normalizer.normalize(&path)),
            icon: present(metadata.icon).map(|path| normalizer.normalize(&path)),
            author: present(metadata.author),
            publisher: present(metadata.publisher),
            caption: non_empty(caption.as_deref()).map(ToString::to_string),
        })
    }
}

/// Raw HTML bookmark card.
pub(crate) struct Bookmark {
    normalizer: SharedPathNormalizer,
}

impl Bookmark {
    pub(crate) fn new(normalizer: SharedPathNormalizer) -> Self {
        Self { normalizer }
    }
}

impl CardRenderer for Bookmark {
    fn render(&self, payload: &Value) -> Result<String, RenderError> {
        let bookmark = BookmarkContent::decode(payload, self.normalizer.as_ref())?;

        let mut html = String::from("<figure>\n");
        let _ = writeln!(html, "  <a href=\"{}\">", escape_attribute(&bookmark.url));
        html.push_str("    <div>\n");
        let _ = writeln!(html, "      <div>{}</div>", escape_text(&bookmark.title));
        let _ = writeln!(html, "      <div>{}</div>", escape_text(&bookmark.description));

        if bookmark.icon.is_some() || bookmark.author.is_some() || bookmark.publisher.is_some() {
            html.push_str("      <div>\n");
            if let Some(icon) = &bookmark.icon {
                let _ = writeln!(html, "        <img src=\"{}\">", escape_attribute(icon));
            }
            if let Some(author) = &bookmark.author {
                let _ = writeln!(html, "        <span>{}</span>", escape_text(author));
            }
            if let Some(publisher) = &bookmark.publisher {
                let _ = writeln!(html, "        <span>{}</span>", escape_text(publisher));
            }
            html.push_str("      </div>\n");
        }
        html.push_str("    </div>\n");

        if let Some(thumbnail) = &bookmark.thumbnail {
            let _ = writeln!(
                html,
                "    <div><img src=\"{}\"></div>",
                escape_attribute(thumbnail)
            );
        }
        html.push_str("  </a>\n");

        if let Some(caption) = &bookmark.caption {
            let _ = writeln!(html, "  <figcaption>{caption}</figcaption>");
        }
        html.push_str("</figure>\n");
        Ok(html)
    }
}
