//! Recoverable renderer errors.

/// Why a renderer could not produce output for a payload.
///
/// None of these abort a render pass: the walker logs the error, names the
/// card or atom it came from, and contributes an empty fragment instead.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The payload is not a JSON object (e.g. `null` or an array).
    #[error("payload is not an object")]
    NotAnObject,

    /// A required field is absent or `null`. Nested fields use dotted paths
    /// such as `metadata.url`.
    #[error("missing required field `{0}`")]
    MissingField(String),

    /// The payload has every required field but does not decode into the
    /// renderer's payload type (e.g. a number where a string is expected).
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}
