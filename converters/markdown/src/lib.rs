//! Default card and atom renderers for converting Ghost mobiledoc to Hugo
//! Markdown.
//!
//! [`card_registry`] and [`atom_registry`] build the default catalog; a
//! [`Processor`] bundles both and renders documents with them.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use mobiledoc_converters_core::StripContentPrefix;
//! use mobiledoc_converters_markdown::Processor;
//!
//! let processor = Processor::new(Arc::new(StripContentPrefix::default()));
//! let body = processor.convert(
//!     r#"{"cards":[["image",{"src":"/content/images/a.jpg"}]],"sections":[[10,0]]}"#,
//! );
//! assert_eq!(body, "{{< figure src=\"/images/a.jpg\" >}}\n");
//! ```
//!
//! # Cards
//!
//! | Name | Output |
//! |---|---|
//! | `markdown`, `card-markdown` | the Markdown source, newline terminated |
//! | `html`, `embed` | the HTML source, verbatim |
//! | `hr` | `---` |
//! | `code` | fenced code block, tagged with `language` |
//! | `image` | `figure` shortcode |
//! | `gallery` | raw HTML figure, images in rows of three |
//! | `bookmark` | raw HTML figure linking to the bookmarked page |
//!
//! Both `soft-break` and `soft-return` atoms render as a newline.
//!
//! A payload with the wrong shape renders as nothing; the walker logs which
//! field was missing or invalid.

use std::sync::Arc;

use mobiledoc_converters_core::{
    AtomRegistry, CardRegistry, SharedPathNormalizer, render,
};

mod atoms;
pub mod bookmark;
mod code;
pub mod gallery;
mod image;
pub mod shortcode;
mod text;

/// Build the default card catalog.
///
/// `normalizer` rewrites every image path emitted by the `image`, `gallery` and
/// `bookmark` renderers.
#[must_use]
pub fn card_registry(normalizer: &SharedPathNormalizer) -> CardRegistry {
    let mut cards = CardRegistry::new();
    cards.register("markdown", text::markdown);
    cards.register("card-markdown", text::markdown);
    cards.register("html", text::html);
    cards.register("embed", text::html);
    cards.register("hr", text::horizontal_rule);
    cards.register("code", code::code);
    cards.register("image", image::Image::new(Arc::clone(normalizer)));
    cards.register("gallery", gallery::Gallery::new(Arc::clone(normalizer)));
    cards.register("bookmark", bookmark::Bookmark::new(Arc::clone(normalizer)));
    cards
}

/// Build the default atom catalog.
#[must_use]
pub fn atom_registry() -> AtomRegistry {
    let mut registry = AtomRegistry::new();
    registry.register("soft-break", atoms::line_break);
    registry.register("soft-return", atoms::line_break);
    registry
}

/// A card registry and an atom registry, ready to render documents.
///
/// Cloning is cheap and the processor is `Send + Sync`, so one instance can be
/// shared by every worker rendering posts.
#[derive(Clone, Debug)]
pub struct Processor {
    cards: CardRegistry,
    atoms: AtomRegistry,
}

impl Processor {
    /// Create a processor with the default catalog.
    #[must_use]
    pub fn new(normalizer: SharedPathNormalizer) -> Self {
        Self::from_registries(card_registry(&normalizer), atom_registry())
    }

    /// Create a processor from explicitly built registries.
    #[must_use]
    pub fn from_registries(cards: CardRegistry, atoms: AtomRegistry) -> Self {
        Self { cards, atoms }
    }

    /// Card registry in use.
    #[must_use]
    pub fn cards(&self) -> &CardRegistry {
        &self.cards
    }

    /// Atom registry in use.
    #[must_use]
    pub fn atoms(&self) -> &AtomRegistry {
        &self.atoms
    }

    /// Render raw mobiledoc source. Unrenderable input yields an empty string.
    #[must_use]
    pub fn convert(&self, source: &str) -> String {
        render(source, &self.cards, &self.atoms)
    }
}

#[cfg(test)]
mod tests {
    use mobiledoc_converters_core::StripContentPrefix;
    use pretty_assertions::assert_eq;

    use super::*;

    fn processor() -> Processor {
        Processor::new(Arc::new(StripContentPrefix::default()))
    }

    #[test]
    fn test_default_catalog() {
        let processor = processor();
        assert_eq!(
            processor.cards().names(),
            vec![
                "bookmark",
                "card-markdown",
                "code",
                "embed",
                "gallery",
                "hr",
                "html",
                "image",
                "markdown"
            ]
        );
        assert_eq!(processor.atoms().names(), vec!["soft-break", "soft-return"]);
    }

    #[test]
    fn test_round_trip_document() {
        let source = r#"{
            "version": "0.3.1",
            "atoms": [["soft-return", "", {}]],
            "cards": [["markdown", {"markdown": "**bold**"}]],
            "markups": [],
            "sections": [
                [1, "p", [[0, [], 0, "intro "]]],
                [10, 0],
                [1, "p", [[1, [], 0, 0], [0, [], 0, "outro"]]]
            ]
        }"#;
        assert_eq!(
            processor().convert(source),
            "intro \n\n**bold**\n\noutro\n\n"
        );
    }

    #[test]
    fn test_legacy_image_section_uses_figure() {
        let source = r#"{"sections": [[2, "/content/images/legacy.png"]]}"#;
        assert_eq!(
            processor().convert(source),
            "{{< figure src=\"/images/legacy.png\" >}}\n"
        );
    }

    #[test]
    fn test_custom_normalizer_reaches_every_image_renderer() {
        let normalizer: SharedPathNormalizer = Arc::new(|path: &str| format!("cdn:{path}"));
        let processor = Processor::new(normalizer);
        let source = r#"{
            "cards": [
                ["image", {"src": "a.jpg"}],
                ["gallery", {"images": [{"src": "b.jpg", "width": 1, "height": 1}]}],
                ["bookmark", {"metadata": {"url": "u", "title": "t", "description": "d", "icon": "c.ico"}}]
            ],
            "sections": [[10, 0], [10, 1], [10, 2]]
        }"#;
        let output = processor.convert(source);
        assert!(output.contains(r#"src="cdn:a.jpg""#));
        assert!(output.contains(r#"src="cdn:b.jpg""#));
        assert!(output.contains(r#"src="cdn:c.ico""#));
    }
}
