//! Ghost posts as Hugo content files.

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use clap::ValueEnum;
use mobiledoc_converters_core::PathNormalizer;
use mobiledoc_converters_markdown::Processor;
use serde::Serialize;
use serde_json::Value;

use crate::{
    Error,
    export::{Export, Id, RawPost},
    time::TimeParser,
};

/// Front matter syntax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum FrontMatterFormat {
    /// `+++` delimited TOML
    #[default]
    Toml,
    /// `---` delimited YAML
    Yaml,
}

/// Where a post body comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Body {
    /// Markdown, as written in Ghost's legacy editor.
    Markdown(String),
    /// Mobiledoc, rendered when the post is written.
    Mobiledoc(String),
    /// Plain text fallback.
    Plain(String),
}

impl Body {
    /// Markdown wins over mobiledoc, which wins over plain text. Empty sources
    /// are skipped.
    fn select(post: &RawPost) -> Self {
        fn present(s: Option<&str>) -> Option<&str> {
            s.filter(|s| !s.trim().is_empty())
        }
        if let Some(markdown) = present(post.markdown.as_deref()) {
            Body::Markdown(markdown.to_string())
        } else if let Some(mobiledoc) = present(post.mobiledoc.as_deref()) {
            Body::Mobiledoc(mobiledoc.to_string())
        } else {
            Body::Plain(post.plaintext.clone().unwrap_or_default())
        }
    }

    fn render(&self, processor: &Processor) -> String {
        match self {
            Body::Markdown(text) | Body::Plain(text) => text.clone(),
            Body::Mobiledoc(source) => processor.convert(source),
        }
    }
}

/// A post with its references to users and tags resolved.
#[derive(Debug, Clone)]
pub(crate) struct Post {
    pub(crate) id: Option<Id>,
    pub(crate) title: String,
    pub(crate) slug: String,
    pub(crate) body: Body,
    pub(crate) date: Option<DateTime<FixedOffset>>,
    pub(crate) draft: bool,
    pub(crate) page: bool,
    pub(crate) description: Option<String>,
    pub(crate) image: Option<String>,
    pub(crate) author: Option<String>,
    pub(crate) tags: Vec<String>,
    pub(crate) summary: Option<String>,
}

impl Post {
    /// Resolve a raw export row.
    ///
    /// Drafts are dated by creation, everything else by publication.
    pub(crate) fn from_export(raw: &RawPost, export: &Export, times: &TimeParser) -> Self {
        let draft = raw
            .status
            .as_deref()
            .is_some_and(|status| status.eq_ignore_ascii_case("draft"));
        let page = raw
            .kind
            .as_deref()
            .is_some_and(|kind| kind.eq_ignore_ascii_case("page"))
            || is_truthy(&raw.page);
        let date = if draft {
            times.parse(&raw.created_at)
        } else {
            times.parse(&raw.published_at)
        };
        if date.is_none() {
            tracing::debug!(slug = %raw.slug, "post has no usable date");
        }
        let non_empty = |s: &Option<String>| s.clone().filter(|s| !s.is_empty());

        Self {
            id: raw.id.clone(),
            title: raw.title.clone(),
            slug: raw.slug.clone(),
            body: Body::select(raw),
            date,
            draft,
            page,
            description: non_empty(&raw.meta_description),
            image: non_empty(&raw.image).or_else(|| non_empty(&raw.feature_image)),
            author: export.author(raw).map(ToString::to_string),
            tags: export.tags(raw),
            summary: non_empty(&raw.custom_excerpt),
        }
    }

    /// Path of the content file, relative to the site root: pages go directly
    /// under `content/`, posts under `content/post/`.
    pub(crate) fn relative_path(&self) -> Result<PathBuf, Error> {
        let slug = self.slug.trim();
        if slug.is_empty() || slug.contains(['/', '\\']) || slug == "." || slug == ".." {
            return Err(Error::InvalidSlug {
                slug: self.slug.clone(),
            });
        }
        let dir = if self.page {
            Path::new("content").to_path_buf()
        } else {
            Path::new("content").join("post")
        };
        Ok(dir.join(format!("{slug}.md")))
    }

    /// The full content file: front matter, a blank line, then the body.
    pub(crate) fn to_content(
        &self,
        format: FrontMatterFormat,
        processor: &Processor,
        normalizer: &dyn PathNormalizer,
    ) -> Result<String, Error> {
        let front_matter = self.front_matter(normalizer);
        let mut content = match format {
            FrontMatterFormat::Toml => format!("+++\n{}+++\n", toml::to_string(&front_matter)?),
            FrontMatterFormat::Yaml => {
                format!("---\n{}---\n", serde_yaml::to_string(&front_matter)?)
            }
        };
        content.push('\n');
        content.push_str(&self.body.render(processor));
        Ok(content)
    }

    fn front_matter(&self, normalizer: &dyn PathNormalizer) -> FrontMatter<'_> {
        FrontMatter {
            date: self.date.map(|date| date.to_rfc3339()),
            title: &self.title,
            draft: self.draft,
            slug: &self.slug,
            description: self.description.as_deref(),
            image: self.image.as_deref().map(|image| normalizer.normalize(image)),
            tags: &self.tags,
            categories: &self.tags,
            author: self.author.as_deref(),
            summary: self.summary.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct FrontMatter<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<String>,
    title: &'a str,
    draft: bool,
    slug: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    tags: &'a [String],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    categories: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a str>,
}

/// Ghost's `page` column: `true`/`false` or `1`/`0` depending on the database.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64().is_some_and(|n| n != 0),
        Value::String(s) => matches!(s.as_str(), "1" | "true"),
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use mobiledoc_converters_core::StripContentPrefix;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::time::Location;

    fn export(post: Value) -> Export {
        Export::from_value(json!({"data": {
            "posts": [post],
            "users": [{"id": "u1", "name": "Ada Lovelace"}],
            "tags": [{"id": "t1", "name": "rust"}, {"id": "t2", "name": "#hugo"}],
            "posts_tags": [
                {"post_id": "p1", "tag_id": "t1", "sort_order": 0},
                {"post_id": "p1", "tag_id": "t2", "sort_order": 1}
            ]
        }}))
        .unwrap()
    }

    fn resolve(post: Value) -> Post {
        let export = export(post);
        let times = TimeParser::new(Location::Utc, None);
        Post::from_export(&export.data.posts[0], &export, &times)
    }

    fn processor() -> Processor {
        Processor::new(Arc::new(StripContentPrefix::default()))
    }

    fn published() -> Value {
        json!({
            "id": "p1",
            "title": "Hello World",
            "slug": "hello-world",
            "mobiledoc": r#"{"cards":[["markdown",{"markdown":"Hi there"}]],"sections":[[10,0]]}"#,
            "markdown": null,
            "plaintext": "Hi there",
            "feature_image": "/content/images/2019/01/cover.jpg",
            "type": "post",
            "status": "published",
            "meta_description": "A greeting",
            "author_id": "u1",
            "created_at": "2019-01-09T10:00:00.000Z",
            "published_at": "2019-01-10T21:43:21.000Z",
            "custom_excerpt": ""
        })
    }

    #[test]
    fn test_published_post_toml() {
        let post = resolve(published());
        let content = post
            .to_content(FrontMatterFormat::Toml, &processor(), &StripContentPrefix::default())
            .unwrap();
        let expected = r#"+++
date = "2019-01-10T21:43:21+00:00"
title = "Hello World"
draft = false
slug = "hello-world"
description = "A greeting"
image = "/images/2019/01/cover.jpg"
tags = ["rust", "hugo"]
categories = ["rust", "hugo"]
author = "Ada Lovelace"
+++

Hi there
"#;
        assert_eq!(content, expected);
        assert_eq!(
            post.relative_path().unwrap(),
            Path::new("content").join("post").join("hello-world.md")
        );
    }

    #[test]
    fn test_draft_uses_created_date_yaml() {
        let mut raw = published();
        raw["status"] = json!("draft");
        raw["published_at"] = Value::Null;
        raw["author_id"] = json!("nobody");
        raw["id"] = json!("p2");
        raw["custom_excerpt"] = json!("Short");
        let post = resolve(raw);
        assert!(post.draft);
        let content = post
            .to_content(FrontMatterFormat::Yaml, &processor(), &StripContentPrefix::default())
            .unwrap();
        let yaml = content
            .strip_prefix("---\n")
            .and_then(|rest| rest.strip_suffix("---\n\nHi there\n"))
            .unwrap();
        let front_matter: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(front_matter["date"].as_str(), Some("2019-01-09T10:00:00+00:00"));
        assert_eq!(front_matter["title"].as_str(), Some("Hello World"));
        assert_eq!(front_matter["draft"].as_bool(), Some(true));
        assert_eq!(front_matter["image"].as_str(), Some("/images/2019/01/cover.jpg"));
        assert_eq!(front_matter["summary"].as_str(), Some("Short"));
        assert!(front_matter.get("author").is_none());
        assert!(front_matter.get("tags").is_none());
    }

    #[rstest::rstest]
    #[case::type_page(json!({"slug": "about", "type": "page"}), true)]
    #[case::legacy_bool(json!({"slug": "about", "page": true}), true)]
    #[case::legacy_int(json!({"slug": "about", "page": 1}), true)]
    #[case::legacy_zero(json!({"slug": "about", "page": 0}), false)]
    #[case::post(json!({"slug": "about", "type": "post"}), false)]
    fn test_page_detection(#[case] raw: Value, #[case] page: bool) {
        let post = resolve(raw);
        assert_eq!(post.page, page);
        let expected = if page {
            Path::new("content").join("about.md")
        } else {
            Path::new("content").join("post").join("about.md")
        };
        assert_eq!(post.relative_path().unwrap(), expected);
    }

    #[rstest::rstest]
    #[case::markdown(json!({"markdown": "# md", "mobiledoc": "{}", "plaintext": "p"}), Body::Markdown("# md".into()))]
    #[case::mobiledoc(json!({"markdown": "", "mobiledoc": "{\"sections\":[]}", "plaintext": "p"}), Body::Mobiledoc("{\"sections\":[]}".into()))]
    #[case::plain(json!({"markdown": null, "plaintext": "p"}), Body::Plain("p".into()))]
    #[case::nothing(json!({}), Body::Plain(String::new()))]
    fn test_body_selection(#[case] raw: Value, #[case] expected: Body) {
        let raw: RawPost = serde_json::from_value(raw).unwrap();
        assert_eq!(Body::select(&raw), expected);
    }

    #[rstest::rstest]
    #[case("")]
    #[case("..")]
    #[case("a/b")]
    fn test_invalid_slug(#[case] slug: &str) {
        let post = resolve(json!({"slug": slug}));
        assert!(matches!(post.relative_path(), Err(Error::InvalidSlug { .. })));
    }

    #[test]
    fn test_minimal_front_matter_omits_empty_values() {
        let post = resolve(json!({"slug": "bare", "title": "Bare"}));
        let content = post
            .to_content(FrontMatterFormat::Toml, &processor(), &StripContentPrefix::default())
            .unwrap();
        assert_eq!(
            content,
            "+++\ntitle = \"Bare\"\ndraft = false\nslug = \"bare\"\n+++\n\n"
        );
    }
}
