//! Path normalization capability used by renderers that emit image sources.

use std::sync::Arc;

/// Rewrites an image or asset path found in a payload into the path it should
/// have in the generated site.
///
/// Renderers receive a normalizer when they are constructed; they never reach
/// for process-wide state to resolve paths.
pub trait PathNormalizer: Send + Sync {
    /// Return the normalized form of `path`.
    fn normalize(&self, path: &str) -> String;
}

impl<F> PathNormalizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn normalize(&self, path: &str) -> String {
        self(path)
    }
}

/// Shared handle to a normalizer, cloned into every renderer that needs one.
pub type SharedPathNormalizer = Arc<dyn PathNormalizer>;

/// Ghost's content folder prefix. Hugo serves the same files from the site root.
pub const CONTENT_PREFIX: &str = "/content";

/// Strips a leading content-folder prefix (`/content` by default).
///
/// `/content/images/a.jpg` becomes `/images/a.jpg`; any other path is returned
/// unchanged.
#[derive(Debug, Clone)]
pub struct StripContentPrefix {
    prefix: String,
}

impl StripContentPrefix {
    /// Create a normalizer stripping a custom prefix.
    #[must_use]
    pub fn new<S: Into<String>>(prefix: S) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for StripContentPrefix {
    fn default() -> Self {
        Self::new(CONTENT_PREFIX)
    }
}

impl PathNormalizer for StripContentPrefix {
    fn normalize(&self, path: &str) -> String {
        path.strip_prefix(self.prefix.as_str())
            .unwrap_or(path)
            .to_string()
    }
}

/// Normalizer that returns every path unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl PathNormalizer for Identity {
    fn normalize(&self, path: &str) -> String {
        path.to_string()
    }
}
