//! Renderer traits and the card/atom registries.
//!
//! Cards and atoms live in independent namespaces: a name may be registered as
//! a card and not as an atom, or the other way around.
//!
//! # Example
//!
//! ```
//! use mobiledoc_converters_core::{AtomRegistry, CardRegistry, RenderError, render};
//! use serde_json::Value;
//!
//! fn rule(_: &Value) -> Result<String, RenderError> {
//!     Ok("---\n".to_string())
//! }
//!
//! fn stars(_: &Value) -> Result<String, RenderError> {
//!     Ok("***\n".to_string())
//! }
//!
//! fn line_break(_: &str, _: &Value) -> Result<String, RenderError> {
//!     Ok("\n".to_string())
//! }
//!
//! let mut cards = CardRegistry::new();
//! cards.register("hr", rule);
//! cards.register("hr", stars);
//!
//! let mut atoms = AtomRegistry::new();
//! atoms.register("soft-return", line_break);
//! assert!(cards.get("soft-return").is_none());
//!
//! let source = r#"{
//!     "atoms": [["soft-return", "", {}]],
//!     "cards": [["hr", {}]],
//!     "sections": [[1, "p", [[0, [], 0, "a"], [1, [], 0, 0], [0, [], 0, "b"]]], [10, 0]]
//! }"#;
//! assert_eq!(render(source, &cards, &atoms), "a\nb\n\n***\n");
//! ```

use std::{collections::HashMap, fmt, sync::Arc};

use serde_json::Value;

use crate::RenderError;

/// Renders a card payload into an output fragment.
///
/// Any `Fn(&Value) -> Result<String, RenderError>` closure is a card renderer.
pub trait CardRenderer: Send + Sync {
    /// Render the card.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if the payload does not have the shape this
    /// renderer expects. The walker logs it and renders nothing for the card.
    fn render(&self, payload: &Value) -> Result<String, RenderError>;
}

impl<F> CardRenderer for F
where
    F: Fn(&Value) -> Result<String, RenderError> + Send + Sync,
{
    fn render(&self, payload: &Value) -> Result<String, RenderError> {
        self(payload)
    }
}

/// Renders an atom (its short text value and payload) into an output fragment.
///
/// Any `Fn(&str, &Value) -> Result<String, RenderError>` closure is an atom
/// renderer.
pub trait AtomRenderer: Send + Sync {
    /// Render the atom.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if the payload does not have the shape this
    /// renderer expects. The walker logs it and renders nothing for the atom.
    fn render(&self, value: &str, payload: &Value) -> Result<String, RenderError>;
}

impl<F> AtomRenderer for F
where
    F: Fn(&str, &Value) -> Result<String, RenderError> + Send + Sync,
{
    fn render(&self, value: &str, payload: &Value) -> Result<String, RenderError> {
        self(value, payload)
    }
}

/// Mapping from type name to renderer.
///
/// Registration has overwrite semantics: the last renderer registered for a
/// name wins. Cloning a registry is cheap (renderers are shared), which lets a
/// dialect start from a base catalog and override a few names.
pub struct Registry<R: ?Sized> {
    renderers: HashMap<String, Arc<R>>,
}

/// Registry of card renderers.
pub type CardRegistry = Registry<dyn CardRenderer>;

/// Registry of atom renderers.
pub type AtomRegistry = Registry<dyn AtomRenderer>;

impl<R: ?Sized> Registry<R> {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Register an already shared renderer under `name`, replacing any
    /// previous registration.
    pub fn register_shared<S: Into<String>>(&mut self, name: S, renderer: Arc<R>) {
        let name = name.into();
        if self.renderers.insert(name.clone(), renderer).is_some() {
            tracing::trace!(%name, "replaced renderer");
        }
    }

    /// Get the renderer registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&R> {
        self.renderers.get(name).map(|renderer| &**renderer)
    }

    /// Check if a renderer is registered under `name`.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.renderers.contains_key(name)
    }

    /// List all registered names (sorted).
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.renderers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered renderers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    /// Whether no renderer is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

impl Registry<dyn CardRenderer> {
    /// Register a card renderer under `name`, replacing any previous registration.
    pub fn register<S, C>(&mut self, name: S, renderer: C)
    where
        S: Into<String>,
        C: CardRenderer + 'static,
    {
        self.register_shared(name, Arc::new(renderer));
    }
}

impl Registry<dyn AtomRenderer> {
    /// Register an atom renderer under `name`, replacing any previous registration.
    pub fn register<S, A>(&mut self, name: S, renderer: A)
    where
        S: Into<String>,
        A: AtomRenderer + 'static,
    {
        self.register_shared(name, Arc::new(renderer));
    }
}

impl<R: ?Sized> Default for Registry<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ?Sized> Clone for Registry<R> {
    fn clone(&self) -> Self {
        Self {
            renderers: self.renderers.clone(),
        }
    }
}

impl<R: ?Sized> fmt::Debug for Registry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn constant(output: &'static str) -> impl Fn(&Value) -> Result<String, RenderError> {
        move |_: &Value| Ok(output.to_string())
    }

    #[test]
    fn test_registry_creation() {
        let registry = CardRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = CardRegistry::new();
        registry.register("hr", constant("---\n"));

        assert!(registry.has("hr"));
        let renderer = registry.get("hr").unwrap();
        assert_eq!(renderer.render(&Value::Null).unwrap(), "---\n");
    }

    #[test]
    fn test_registry_get_nonexistent() {
        let registry = CardRegistry::new();
        assert!(registry.get("nonexistent").is_none());
        assert!(!registry.has("nonexistent"));
    }

    #[test]
    fn test_registry_last_registration_wins() {
        let mut registry = CardRegistry::new();
        registry.register("image", constant("first"));
        registry.register("image", constant("second"));

        assert_eq!(registry.len(), 1);
        let output = registry.get("image").unwrap().render(&json!({})).unwrap();
        assert_eq!(output, "second");
    }

    #[test]
    fn test_registry_clone_is_independent() {
        let mut base = CardRegistry::new();
        base.register("image", constant("base"));

        let mut dialect = base.clone();
        dialect.register("image", constant("dialect"));
        dialect.register("gallery", constant("gallery"));

        assert_eq!(base.get("image").unwrap().render(&json!({})).unwrap(), "base");
        assert!(!base.has("gallery"));
        assert_eq!(
            dialect.get("image").unwrap().render(&json!({})).unwrap(),
            "dialect"
        );
    }

    fn newline(_value: &str, _payload: &Value) -> Result<String, RenderError> {
        Ok("\n".to_string())
    }

    #[test]
    fn test_registry_names_sorted() {
        let mut registry = AtomRegistry::new();
        registry.register("soft-return", newline);
        registry.register("soft-break", newline);
        assert_eq!(registry.names(), vec!["soft-break", "soft-return"]);
    }

    #[test]
    fn test_card_and_atom_namespaces_are_independent() {
        let mut cards = CardRegistry::new();
        let atoms = AtomRegistry::new();
        cards.register("soft-return", constant("card"));
        assert!(cards.has("soft-return"));
        assert!(!atoms.has("soft-return"));
    }
}
