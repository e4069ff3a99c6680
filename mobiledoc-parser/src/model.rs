//! Mobiledoc document model.
//!
//! Cards, atoms and markups are stored in the order they appear in the source so
//! that sections and markers can keep referring to them by index.

use serde::Serialize;
use serde_json::Value;

/// Section type identifier for markup sections (`[1, tag, markers]`).
pub const MARKUP_SECTION: u64 = 1;
/// Section type identifier for image sections (`[2, src]`).
pub const IMAGE_SECTION: u64 = 2;
/// Section type identifier for list sections (`[3, tag, items]`).
pub const LIST_SECTION: u64 = 3;
/// Section type identifier for card sections (`[10, card_index]`).
pub const CARD_SECTION: u64 = 10;

/// Marker type identifier for literal text runs.
pub const TEXT_MARKER: u64 = 0;
/// Marker type identifier for atom references.
pub const ATOM_MARKER: u64 = 1;

/// A parsed mobiledoc document.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Document {
    pub version: Option<String>,
    pub markups: Vec<Markup>,
    pub atoms: Vec<Atom>,
    pub cards: Vec<Card>,
    pub sections: Vec<Section>,
}

impl Document {
    /// Look up a card by index.
    #[must_use]
    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Look up an atom by index.
    #[must_use]
    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Look up a markup by index.
    #[must_use]
    pub fn markup(&self, index: usize) -> Option<&Markup> {
        self.markups.get(index)
    }
}

/// Inline formatting definition, e.g. `["strong"]` or `["a", ["href", "https://…"]]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Markup {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
}

impl Markup {
    /// Get an attribute value by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// An inline rich-content unit: `[name, value, payload]`.
///
/// A malformed entry keeps its slot with an empty name, which no renderer is
/// registered for.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Atom {
    pub name: String,
    pub value: String,
    pub payload: Value,
}

/// A block-level embedded content unit: `[name, payload]`.
///
/// A malformed entry keeps its slot with an empty name, which no renderer is
/// registered for.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Card {
    pub name: String,
    pub payload: Value,
}

/// A top-level section of the document body.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Section {
    /// Paragraph-like section (`p`, `h1`..`h6`, `blockquote`, `aside`, ...).
    Markup { tag: String, markers: Vec<Marker> },
    /// Legacy image section carrying only a source.
    Image { src: String },
    /// Ordered (`ol`) or unordered (`ul`) list; one marker run per item.
    List { tag: String, items: Vec<Vec<Marker>> },
    /// Reference to an entry of [`Document::cards`].
    Card { index: usize },
}

/// A run of inline content inside a markup or list section.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Marker {
    pub kind: MarkerKind,
    /// Indexes into [`Document::markups`] opened before this marker.
    pub open_markups: Vec<usize>,
    /// Number of currently open markups closed after this marker.
    pub closed_markups: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// Literal text.
    Text(String),
    /// Reference to an entry of [`Document::atoms`].
    Atom(usize),
}
