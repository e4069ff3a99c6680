use mobiledoc_converters_core::{CardRenderer, RenderError, SharedPathNormalizer};
use mobiledoc_converters_markdown::{bookmark::BookmarkContent, shortcode::Shortcode};
use serde_json::Value;

/// `bookmark` as a single `bookmark` shortcode call.
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
        tracing::trace!(url = %bookmark.url, "rendering bookmark shortcode");
        let tag = Shortcode::new("bookmark")
            .param("url", &bookmark.url)
            .param("title", &bookmark.title)
            .param("description", &bookmark.description)
            .optional_param("icon", bookmark.icon.as_deref())
            .optional_param("author", bookmark.author.as_deref())
            .optional_param("publisher", bookmark.publisher.as_deref())
            .optional_param("thumbnail", bookmark.thumbnail.as_deref())
            .optional_param("caption", bookmark.caption.as_deref())
            .build();
        Ok(format!("{tag}\n"))
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

    fn bookmark() -> Bookmark {
        Bookmark::new(Arc::new(StripContentPrefix::default()))
    }

    #[test]
    fn test_bookmark_shortcode_full() {
        let payload = json!({
            "metadata": {
                "url": "https://gohugo.io/",
                "title": "The world's fastest framework",
                "description": "Say \"hi\" to Hugo",
                "thumbnail": "/content/images/og.png",
                "icon": "https://gohugo.io/favicon.ico",
                "author": "spf13",
                "publisher": "Hugo"
            },
            "caption": "Go <a href=\"https://gohugo.io\">there</a>"
        });
        let expected = concat!(
            r#"{{< bookmark url="https://gohugo.io/" title="The world's fastest framework""#,
            r#" description="Say \"hi\" to Hugo" icon="https://gohugo.io/favicon.ico""#,
            r#" author="spf13" publisher="Hugo" thumbnail="/images/og.png""#,
            r#" caption="Go <a href=\"https://gohugo.io\">there</a>" >}}"#,
            "\n"
        );
        assert_eq!(bookmark().render(&payload).unwrap(), expected);
    }

    #[test]
    fn test_bookmark_shortcode_omits_missing_and_empty() {
        let payload = json!({
            "metadata": {
                "url": "https://example.com",
                "title": "Example",
                "description": "",
                "icon": "",
                "author": null
            }
        });
        assert_eq!(
            bookmark().render(&payload).unwrap(),
            "{{< bookmark url=\"https://example.com\" title=\"Example\" description=\"\" >}}\n"
        );
    }

    #[rstest::rstest]
    #[case(json!({"metadata": {"title": "t", "description": "d"}}), "metadata.url")]
    #[case(json!({"metadata": {"url": "u", "description": "d"}}), "metadata.title")]
    #[case(json!({"metadata": {"url": "u", "title": "t"}}), "metadata.description")]
    fn test_bookmark_shortcode_required(#[case] payload: Value, #[case] field: &str) {
        let err = bookmark().render(&payload).unwrap_err();
        assert!(matches!(err, RenderError::MissingField(ref f) if f == field));
    }
}
