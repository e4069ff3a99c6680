//! Core renderer infrastructure for mobiledoc converters.
//!
//! This crate provides what every output dialect shares:
//!
//! - [`CardRenderer`] / [`AtomRenderer`] - traits implemented by individual renderers
//! - [`CardRegistry`] / [`AtomRegistry`] - name to renderer mappings (last
//!   registration wins)
//! - [`render`] - the document walker that drives the registries
//! - [`decode`] - typed, field-checked payload decoding
//! - [`PathNormalizer`] - injected capability for rewriting image paths
//!
//! A dialect crate builds a card registry and an atom registry, then hands them
//! to [`render`] for every document.
//!
//! # Example
//!
//! ```
//! use mobiledoc_converters_core::{AtomRegistry, CardRegistry, RenderError, render};
//! use serde_json::Value;
//!
//! fn hr(_: &Value) -> Result<String, RenderError> {
//!     Ok("---\n".to_string())
//! }
//!
//! let mut cards = CardRegistry::new();
//! cards.register("hr", hr);
//!
//! let body = render(
//!     r#"{"cards":[["hr",{}]],"sections":[[10,0]]}"#,
//!     &cards,
//!     &AtomRegistry::new(),
//! );
//! assert_eq!(body, "---\n");
//! ```

mod error;
pub mod inline;
mod path;
mod payload;
mod registry;
mod walker;

pub use error::RenderError;
pub use path::{CONTENT_PREFIX, Identity, PathNormalizer, SharedPathNormalizer, StripContentPrefix};
pub use payload::{decode, lookup, non_empty};
pub use registry::{AtomRegistry, AtomRenderer, CardRegistry, CardRenderer, Registry};
pub use walker::{render, render_atom, render_card, render_document};
