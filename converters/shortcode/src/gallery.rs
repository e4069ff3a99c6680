use mobiledoc_converters_core::{CardRenderer, RenderError, SharedPathNormalizer, non_empty};
use mobiledoc_converters_markdown::{
    gallery::GalleryContent,
    shortcode::{Shortcode, closing},
};
use serde_json::Value;

/// `gallery` as a `gallery` shortcode wrapping one `galleryImg` per image.
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

        let mut output = Shortcode::new("gallery")
            .optional_param("caption", gallery.caption.as_deref())
            .build();
        output.push('\n');
        for image in &gallery.images {
            let tag = Shortcode::new("galleryImg")
                .param("src", &image.src)
                .param("width", &image.width_px())
                .param("height", &image.height_px())
                .optional_param("alt", non_empty(image.alt.as_deref()))
                .optional_param("title", non_empty(image.title.as_deref()))
                .build();
            output.push_str(&tag);
            output.push('\n');
        }
        output.push_str(&closing("gallery"));
        output.push('\n');
        Ok(output)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use mobiledoc_converters_core::StripContentPrefix;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn gallery() -> Gallery {
        Gallery::new(Arc::new(StripContentPrefix::default()))
    }

    #[test]
    fn test_gallery_shortcode() {
        let payload = json!({
            "images": [
                {"src": "/content/images/a.jpg", "width": 5184.0, "height": 3456.0, "alt": "A"},
                {"src": "/content/images/b.jpg", "width": 3000, "height": 2000, "title": "B \"quoted\""}
            ],
            "caption": "Holiday <em>2019</em>"
        });
        let expected = r#"{{< gallery caption="Holiday <em>2019</em>" >}}
{{< galleryImg src="/images/a.jpg" width="5184" height="3456" alt="A" >}}
{{< galleryImg src="/images/b.jpg" width="3000" height="2000" title="B \"quoted\"" >}}
{{< /gallery >}}
"#;
        assert_eq!(gallery().render(&payload).unwrap(), expected);
    }

    #[test]
    fn test_gallery_shortcode_skips_malformed_entries() {
        let payload = json!({"images": [
            {"src": "a.jpg", "width": 1, "height": 1},
            {"src": "b.jpg"},
            42,
            {"src": "c.jpg", "width": 1, "height": 1}
        ]});
        let output = gallery().render(&payload).unwrap();
        assert_eq!(output.matches("galleryImg").count(), 2);
        let a = output.find("a.jpg").unwrap();
        let c = output.find("c.jpg").unwrap();
        assert!(a < c);
        assert!(!output.contains("b.jpg"));
    }

    #[test]
    fn test_gallery_shortcode_requires_images() {
        let err = gallery().render(&json!({"caption": "c"})).unwrap_err();
        assert!(matches!(err, RenderError::MissingField(ref f) if f == "images"));
    }
}
