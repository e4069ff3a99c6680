//! Ghost export decoding.
//!
//! Ghost writes its export either wrapped in a `db` list (`{"db": [{"meta": …,
//! "data": …}]}`) or as a single bare entry (`{"meta": …, "data": …}`). Ids are
//! integers in exports from Ghost 0.x and 24 character hex strings since 1.0.

use std::{collections::HashMap, fmt, io::Read};

use serde::Deserialize;
use serde_json::Value;

use crate::Error;

/// A Ghost row id, numeric or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub(crate) enum Id {
    Number(i64),
    Text(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Number(n) => write!(f, "{n}"),
            Id::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Meta {
    #[serde(default)]
    pub(crate) exported_on: Option<i64>,
    #[serde(default)]
    pub(crate) version: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct User {
    pub(crate) id: Id,
    #[serde(default)]
    pub(crate) name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Tag {
    pub(crate) id: Id,
    #[serde(default)]
    pub(crate) name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostTag {
    pub(crate) post_id: Id,
    pub(crate) tag_id: Id,
    #[serde(default)]
    pub(crate) sort_order: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostAuthor {
    pub(crate) post_id: Id,
    pub(crate) author_id: Id,
    #[serde(default)]
    pub(crate) sort_order: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Setting {
    pub(crate) key: String,
    #[serde(default)]
    pub(crate) value: Value,
}

/// A post row as exported. Timestamps are kept raw (epoch milliseconds or a
/// string, depending on the Ghost version) and parsed later.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawPost {
    pub(crate) id: Option<Id>,
    pub(crate) title: String,
    pub(crate) slug: String,
    pub(crate) markdown: Option<String>,
    pub(crate) mobiledoc: Option<String>,
    pub(crate) plaintext: Option<String>,
    pub(crate) image: Option<String>,
    pub(crate) feature_image: Option<String>,
    #[serde(rename = "type")]
    pub(crate) kind: Option<String>,
    pub(crate) page: Value,
    pub(crate) status: Option<String>,
    pub(crate) meta_description: Option<String>,
    pub(crate) custom_excerpt: Option<String>,
    pub(crate) author_id: Option<Id>,
    pub(crate) published_at: Value,
    pub(crate) created_at: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Data {
    pub(crate) posts: Vec<RawPost>,
    pub(crate) users: Vec<User>,
    pub(crate) tags: Vec<Tag>,
    pub(crate) posts_tags: Vec<PostTag>,
    pub(crate) posts_authors: Vec<PostAuthor>,
    pub(crate) settings: Vec<Setting>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Export {
    pub(crate) meta: Meta,
    pub(crate) data: Data,
}

impl Export {
    /// Decode an export, wrapped or not.
    ///
    /// Only the first `db` entry of a wrapped export is used.
    pub(crate) fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    pub(crate) fn from_value(mut value: Value) -> Result<Self, Error> {
        let entry = match value.get_mut("db") {
            Some(Value::Array(entries)) => {
                if entries.len() > 1 {
                    tracing::warn!(
                        entries = entries.len(),
                        "export has several database entries, using the first"
                    );
                }
                entries.drain(..).next().ok_or(Error::EmptyExport)?
            }
            Some(_) | None => value,
        };
        Ok(Export::deserialize(entry)?)
    }

    /// Settings with a string value, by key.
    pub(crate) fn settings(&self) -> HashMap<&str, &str> {
        self.data
            .settings
            .iter()
            .filter_map(|setting| Some((setting.key.as_str(), setting.value.as_str()?)))
            .collect()
    }

    /// Name of the post's author.
    ///
    /// `posts_authors` (Ghost 1.22+) takes precedence over the legacy
    /// `author_id` column; the primary author has the lowest `sort_order`.
    pub(crate) fn author(&self, post: &RawPost) -> Option<&str> {
        let primary = post.id.as_ref().and_then(|id| {
            self.data
                .posts_authors
                .iter()
                .filter(|pa| &pa.post_id == id)
                .min_by_key(|pa| pa.sort_order)
                .map(|pa| &pa.author_id)
        });
        let author_id = primary.or(post.author_id.as_ref())?;
        self.data
            .users
            .iter()
            .find(|user| &user.id == author_id)
            .map(|user| user.name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Tag names of a post in `sort_order`, with Ghost's leading `#` (internal
    /// tags) stripped.
    pub(crate) fn tags(&self, post: &RawPost) -> Vec<String> {
        let Some(id) = &post.id else {
            return Vec::new();
        };
        let mut links: Vec<&PostTag> = self
            .data
            .posts_tags
            .iter()
            .filter(|pt| &pt.post_id == id)
            .collect();
        links.sort_by_key(|pt| pt.sort_order);
        links
            .into_iter()
            .filter_map(|pt| self.data.tags.iter().find(|tag| tag.id == pt.tag_id))
            .map(|tag| tag.name.trim_start_matches('#').to_string())
            .filter(|name| !name.is_empty())
            .collect()
    }
}
