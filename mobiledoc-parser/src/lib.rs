//! Lenient parser for [mobiledoc](https://github.com/bustle/mobiledoc-kit) 0.3 documents.
//!
//! Only the structure needed to render a document is extracted: the ordered lists
//! of markups, atoms, cards and sections. The parser never rejects a document
//! because of a single bad entry:
//!
//! - a card, atom or markup entry with the wrong shape keeps its slot (so later
//!   indices still resolve) but carries an empty name;
//! - a section or marker with an unknown type id or the wrong shape is dropped
//!   with a warning.
//!
//! Only an empty source, invalid JSON, or a missing top-level `sections` list is
//! reported as an [`Error`].
//!
//! # Example
//!
//! ```
//! let doc = mobiledoc_parser::parse(
//!     r#"{"version":"0.3.1","cards":[["hr",{}]],"sections":[[10,0]]}"#,
//! )?;
//! assert_eq!(doc.cards[0].name, "hr");
//! # Ok::<(), mobiledoc_parser::Error>(())
//! ```

use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

mod error;
mod model;

pub use error::Error;
pub use model::{
    ATOM_MARKER, Atom, CARD_SECTION, Card, Document, IMAGE_SECTION, LIST_SECTION, MARKUP_SECTION,
    Marker, MarkerKind, Markup, Section, TEXT_MARKER,
};

/// Top-level container as it appears on the wire.
#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    markups: Vec<Value>,
    #[serde(default)]
    atoms: Vec<Value>,
    #[serde(default)]
    cards: Vec<Value>,
    #[serde(default)]
    sections: Option<Vec<Value>>,
}

/// Parse a mobiledoc document from its JSON source.
///
/// # Errors
///
/// Returns an error if the source is empty, is not valid JSON, or has no
/// top-level `sections` list.
#[instrument(level = "trace", skip(source))]
pub fn parse(source: &str) -> Result<Document, Error> {
    if source.trim().is_empty() {
        return Err(Error::Empty);
    }
    let raw: RawDocument = serde_json::from_str(source)?;
    from_raw(raw)
}

fn from_raw(raw: RawDocument) -> Result<Document, Error> {
    let sections = raw.sections.ok_or(Error::MissingSections)?;

    let doc = Document {
        version: raw.version,
        markups: raw.markups.iter().map(decode_markup).collect(),
        atoms: raw.atoms.iter().map(decode_atom).collect(),
        cards: raw.cards.iter().map(decode_card).collect(),
        sections: sections.iter().filter_map(decode_section).collect(),
    };
    tracing::trace!(
        cards = doc.cards.len(),
        atoms = doc.atoms.len(),
        sections = doc.sections.len(),
        "parsed mobiledoc"
    );
    Ok(doc)
}

fn to_index(value: &Value) -> Option<usize> {
    value.as_u64().and_then(|n| usize::try_from(n).ok())
}

fn decode_markup(value: &Value) -> Markup {
    let Some(entry) = value.as_array() else {
        tracing::warn!(?value, "markup entry is not an array");
        return Markup::default();
    };
    let tag = entry
        .first()
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_lowercase();

    // Attributes are a flat list: [name, value, name, value, ...]
    let attributes = entry
        .get(1)
        .and_then(Value::as_array)
        .map(|flat| {
            flat.chunks(2)
                .filter_map(|pair| match pair {
                    [Value::String(key), Value::String(value)] => {
                        Some((key.clone(), value.clone()))
                    }
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    Markup { tag, attributes }
}

fn decode_atom(value: &Value) -> Atom {
    let Some(entry) = value.as_array() else {
        tracing::warn!(?value, "atom entry is not an array");
        return Atom::default();
    };
    let Some(name) = entry.first().and_then(Value::as_str) else {
        tracing::warn!(?value, "atom entry has no name");
        return Atom::default();
    };
    Atom {
        name: name.to_string(),
        value: entry
            .get(1)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        payload: entry.get(2).cloned().unwrap_or(Value::Null),
    }
}

fn decode_card(value: &Value) -> Card {
    let Some(entry) = value.as_array() else {
        tracing::warn!(?value, "card entry is not an array");
        return Card::default();
    };
    let Some(name) = entry.first().and_then(Value::as_str) else {
        tracing::warn!(?value, "card entry has no name");
        return Card::default();
    };
    Card {
        name: name.to_string(),
        payload: entry.get(1).cloned().unwrap_or(Value::Null),
    }
}

fn decode_section(value: &Value) -> Option<Section> {
    let Some(entry) = value.as_array() else {
        tracing::warn!(?value, "section is not an array, skipping");
        return None;
    };
    let section = match entry.first().and_then(Value::as_u64) {
        Some(MARKUP_SECTION) => {
            let tag = entry.get(1).and_then(Value::as_str)?.to_lowercase();
            let markers = decode_markers(entry.get(2));
            Some(Section::Markup { tag, markers })
        }
        Some(IMAGE_SECTION) => {
            let src = entry.get(1).and_then(Value::as_str)?.to_string();
            Some(Section::Image { src })
        }
        Some(LIST_SECTION) => {
            let tag = entry.get(1).and_then(Value::as_str)?.to_lowercase();
            let items = entry
                .get(2)
                .and_then(Value::as_array)
                .map(|items| items.iter().map(|item| decode_markers(Some(item))).collect())
                .unwrap_or_default();
            Some(Section::List { tag, items })
        }
        Some(CARD_SECTION) => entry
            .get(1)
            .and_then(to_index)
            .map(|index| Section::Card { index }),
        Some(_) | None => None,
    };
    if section.is_none() {
        tracing::warn!(?value, "unsupported or malformed section, skipping");
    }
    section
}

fn decode_markers(value: Option<&Value>) -> Vec<Marker> {
    value
        .and_then(Value::as_array)
        .map(|markers| markers.iter().filter_map(decode_marker).collect())
        .unwrap_or_default()
}

fn decode_marker(value: &Value) -> Option<Marker> {
    let entry = value.as_array()?;
    let open_markups = entry
        .get(1)
        .and_then(Value::as_array)
        .map(|open| open.iter().filter_map(to_index).collect())
        .unwrap_or_default();
    let closed_markups = entry.get(2).and_then(to_index).unwrap_or(0);

    let kind = match entry.first().and_then(Value::as_u64) {
        Some(TEXT_MARKER) => entry
            .get(3)
            .and_then(Value::as_str)
            .map(|text| MarkerKind::Text(text.to_string())),
        Some(ATOM_MARKER) => entry.get(3).and_then(to_index).map(MarkerKind::Atom),
        Some(_) | None => None,
    };
    let Some(kind) = kind else {
        tracing::warn!(?value, "malformed marker, skipping");
        return None;
    };

    Some(Marker {
        kind,
        open_markups,
        closed_markups,
    })
}
