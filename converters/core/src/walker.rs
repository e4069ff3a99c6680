//! Document walker: turns a mobiledoc document into one output string.
//!
//! Sections are rendered strictly in document order:
//!
//! - markup sections render their markers, then a paragraph break (`\n\n`).
//!   `h1`..`h6` get a `#` prefix and `blockquote`/`aside` a `> ` prefix;
//! - list sections render one `- ` (or `N. `) line per item, then `\n`;
//! - legacy image sections are dispatched to the `image` card renderer with a
//!   `{"src": …}` payload;
//! - card sections append the card renderer output verbatim.
//!
//! Nothing here is fatal. Unparseable input renders as an empty string, and a
//! dangling index, an unregistered type name or a renderer error contributes
//! an empty fragment while the walk carries on.

use mobiledoc_parser::{Document, Marker, MarkerKind, Markup, Section};
use serde_json::{Value, json};
use tracing::instrument;

use crate::{AtomRegistry, CardRegistry, inline};

/// Render raw mobiledoc source with the given registries.
///
/// Empty or structurally malformed source renders as an empty string.
#[must_use]
#[instrument(level = "debug", skip_all)]
pub fn render(source: &str, cards: &CardRegistry, atoms: &AtomRegistry) -> String {
    match mobiledoc_parser::parse(source) {
        Ok(doc) => render_document(&doc, cards, atoms),
        Err(mobiledoc_parser::Error::Empty) => {
            tracing::debug!("empty mobiledoc, nothing to render");
            String::new()
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                advice = e.advice(),
                "unable to parse mobiledoc, rendering empty body"
            );
            String::new()
        }
    }
}

/// Render an already parsed document with the given registries.
#[must_use]
pub fn render_document(doc: &Document, cards: &CardRegistry, atoms: &AtomRegistry) -> String {
    let mut walker = Walker::new(doc, cards, atoms);
    for section in &doc.sections {
        walker.visit_section(section);
    }
    walker.output
}

/// Dispatch a single card to its registered renderer.
///
/// Returns an empty string if no renderer is registered for `name` or if the
/// renderer rejects the payload.
#[must_use]
pub fn render_card(cards: &CardRegistry, name: &str, payload: &Value) -> String {
    let Some(renderer) = cards.get(name) else {
        tracing::debug!(card = name, "no renderer registered for card, skipping");
        return String::new();
    };
    renderer.render(payload).unwrap_or_else(|e| {
        tracing::warn!(card = name, error = %e, "malformed card payload, skipping");
        String::new()
    })
}

/// Dispatch a single atom to its registered renderer.
///
/// Returns an empty string if no renderer is registered for `name` or if the
/// renderer rejects the payload.
#[must_use]
pub fn render_atom(atoms: &AtomRegistry, name: &str, value: &str, payload: &Value) -> String {
    let Some(renderer) = atoms.get(name) else {
        tracing::debug!(atom = name, "no renderer registered for atom, skipping");
        return String::new();
    };
    renderer.render(value, payload).unwrap_or_else(|e| {
        tracing::warn!(atom = name, error = %e, "malformed atom payload, skipping");
        String::new()
    })
}

struct Walker<'a> {
    doc: &'a Document,
    cards: &'a CardRegistry,
    atoms: &'a AtomRegistry,
    output: String,
}

impl<'a> Walker<'a> {
    fn new(doc: &'a Document, cards: &'a CardRegistry, atoms: &'a AtomRegistry) -> Self {
        Self {
            doc,
            cards,
            atoms,
            output: String::new(),
        }
    }

    fn visit_section(&mut self, section: &Section) {
        match section {
            Section::Markup { tag, markers } => self.visit_markup_section(tag, markers),
            Section::List { tag, items } => self.visit_list_section(tag, items),
            Section::Image { src } => {
                let fragment = render_card(self.cards, "image", &json!({ "src": src }));
                self.output.push_str(&fragment);
            }
            Section::Card { index } => self.visit_card(*index),
        }
    }

    fn visit_markup_section(&mut self, tag: &str, markers: &[Marker]) {
        let text = self.render_markers(markers);
        match tag {
            "blockquote" | "aside" => {
                self.output.push_str("> ");
                self.output.push_str(&text.replace('\n', "\n> "));
            }
            _ => {
                if let Some(level) = heading_level(tag) {
                    self.output.push_str(&"#".repeat(level));
                    self.output.push(' ');
                }
                self.output.push_str(&text);
            }
        }
        self.output.push_str("\n\n");
    }

    fn visit_list_section(&mut self, tag: &str, items: &[Vec<Marker>]) {
        for (i, item) in items.iter().enumerate() {
            if tag == "ol" {
                self.output.push_str(&format!("{}. ", i + 1));
            } else {
                self.output.push_str("- ");
            }
            let text = self.render_markers(item);
            self.output.push_str(&text);
            self.output.push('\n');
        }
        self.output.push('\n');
    }

    fn visit_card(&mut self, index: usize) {
        let Some(card) = self.doc.card(index) else {
            tracing::warn!(index, "card reference out of range, skipping");
            return;
        };
        let fragment = render_card(self.cards, &card.name, &card.payload);
        self.output.push_str(&fragment);
    }

    fn visit_atom(&self, index: usize) -> String {
        let Some(atom) = self.doc.atom(index) else {
            tracing::warn!(index, "atom reference out of range, skipping");
            return String::new();
        };
        render_atom(self.atoms, &atom.name, &atom.value, &atom.payload)
    }

    /// Render a run of markers, opening and closing markups as it goes.
    fn render_markers(&self, markers: &[Marker]) -> String {
        let mut text = String::new();
        let mut open: Vec<Option<&Markup>> = Vec::new();

        for marker in markers {
            for &index in &marker.open_markups {
                let markup = self.doc.markup(index);
                match markup {
                    Some(markup) => text.push_str(inline::open(markup)),
                    None => tracing::warn!(index, "markup reference out of range, ignoring"),
                }
                open.push(markup);
            }

            match &marker.kind {
                MarkerKind::Text(value) => text.push_str(value),
                MarkerKind::Atom(index) => text.push_str(&self.visit_atom(*index)),
            }

            let closed = marker.closed_markups.min(open.len());
            for _ in 0..closed {
                if let Some(Some(markup)) = open.pop() {
                    text.push_str(&inline::close(markup));
                }
            }
        }

        // Close anything left open by a truncated document
        while let Some(markup) = open.pop() {
            if let Some(markup) = markup {
                text.push_str(&inline::close(markup));
            }
        }
        text
    }
}

fn heading_level(tag: &str) -> Option<usize> {
    tag.strip_prefix('h')
        .and_then(|level| level.parse::<usize>().ok())
        .filter(|level| (1..=6).contains(level))
}
