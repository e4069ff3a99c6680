use std::path::PathBuf;

use miette::Diagnostic;

/// Errors that stop the migration, or the writing of a single post.
#[derive(Debug, Diagnostic, thiserror::Error)]
pub(crate) enum Error {
    #[error("I/O error on {}: {source}", .path.display())]
    #[diagnostic(code(ghost2hugo::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid Ghost export: {0}")]
    #[diagnostic(
        code(ghost2hugo::export),
        help("pass the JSON file produced by Ghost's Settings > Labs > Export")
    )]
    Export(#[from] serde_json::Error),

    #[error("the Ghost export contains no database entries")]
    #[diagnostic(code(ghost2hugo::export))]
    EmptyExport,

    #[error("target path {} exists but is not a directory", .0.display())]
    #[diagnostic(code(ghost2hugo::site))]
    NotADirectory(PathBuf),

    #[error("target path {} exists and is not empty", .0.display())]
    #[diagnostic(
        code(ghost2hugo::site),
        help("choose another --hugo directory, or pass --force to write into it anyway")
    )]
    NotEmpty(PathBuf),

    #[error("post {slug:?} has no slug-safe file name")]
    #[diagnostic(code(ghost2hugo::post))]
    InvalidSlug { slug: String },

    #[error("unable to serialize TOML front matter: {0}")]
    #[diagnostic(code(ghost2hugo::front_matter))]
    Toml(#[from] toml::ser::Error),

    #[error("unable to serialize YAML front matter: {0}")]
    #[diagnostic(code(ghost2hugo::front_matter))]
    Yaml(#[from] serde_yaml::Error),

    #[cfg(feature = "network")]
    #[error("failed to download {url}: {source}")]
    #[diagnostic(code(ghost2hugo::download))]
    Download {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[cfg(feature = "network")]
    #[error("invalid URL {url:?}: {source}")]
    #[diagnostic(code(ghost2hugo::download), help("--url must be the blog's absolute address"))]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[cfg(feature = "network")]
    #[error("no file name in image URL {url}")]
    #[diagnostic(code(ghost2hugo::download))]
    NoFileName { url: String },

    #[error("failed to write {count} post(s)")]
    #[diagnostic(code(ghost2hugo::convert), help("see the errors logged above for each post"))]
    PostsFailed { count: usize },
}

impl Error {
    pub(crate) fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
