/// Structural errors that prevent a mobiledoc document from being read at all.
///
/// Anything below the document level (a malformed section, a card entry that is
/// not a `[name, payload]` pair, a dangling index) is recovered while parsing or
/// rendering and never surfaces here.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("empty mobiledoc source")]
    Empty,

    #[error("invalid mobiledoc JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("mobiledoc is missing the top-level `sections` list")]
    MissingSections,
}

impl Error {
    /// Get advice for this error if available.
    #[must_use]
    pub fn advice(&self) -> Option<&'static str> {
        match self {
            Self::MissingSections => Some(
                "Only mobiledoc 0.3 documents are supported; they carry `atoms`, `cards`, `markups` and `sections` lists",
            ),
            Self::Empty | Self::Json(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(Error::Empty.to_string(), "empty mobiledoc source");
        assert_eq!(
            Error::MissingSections.to_string(),
            "mobiledoc is missing the top-level `sections` list"
        );
    }

    #[test]
    fn test_error_advice() {
        assert!(Error::MissingSections.advice().is_some());
        assert!(Error::Empty.advice().is_none());
    }
}
