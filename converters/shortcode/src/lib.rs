//! Hugo shortcode dialect.
//!
//! Same catalog as [`mobiledoc_converters_markdown`], except that `gallery` and
//! `bookmark` cards become calls to site-local shortcodes:
//!
//! ```text
//! {{< gallery caption="Holiday" >}}
//! {{< galleryImg src="/images/a.jpg" width="5184" height="3456" >}}
//! {{< /gallery >}}
//!
//! {{< bookmark url="https://gohugo.io/" title="Hugo" description="…" >}}
//! ```
//!
//! The site needs the matching templates under `layouts/shortcodes`; they are
//! available as [`TEMPLATES`].

use std::sync::Arc;

use mobiledoc_converters_core::{CardRegistry, SharedPathNormalizer};
use mobiledoc_converters_markdown::{Processor, atom_registry};

mod bookmark;
mod gallery;

/// `layouts/shortcodes/bookmark.html`.
pub const BOOKMARK_TEMPLATE: &str = include_str!("../templates/bookmark.html");

/// `layouts/shortcodes/gallery.html`.
pub const GALLERY_TEMPLATE: &str = include_str!("../templates/gallery.html");

/// `layouts/shortcodes/galleryImg.html`.
pub const GALLERY_IMAGE_TEMPLATE: &str = include_str!("../templates/galleryImg.html");

/// Shortcode templates as `(file name, contents)` pairs.
pub const TEMPLATES: &[(&str, &str)] = &[
    ("bookmark.html", BOOKMARK_TEMPLATE),
    ("gallery.html", GALLERY_TEMPLATE),
    ("galleryImg.html", GALLERY_IMAGE_TEMPLATE),
];

/// Build the shortcode card catalog: the Markdown catalog with `gallery` and
/// `bookmark` overridden.
#[must_use]
pub fn card_registry(normalizer: &SharedPathNormalizer) -> CardRegistry {
    let mut cards = mobiledoc_converters_markdown::card_registry(normalizer);
    cards.register("gallery", gallery::Gallery::new(Arc::clone(normalizer)));
    cards.register("bookmark", bookmark::Bookmark::new(Arc::clone(normalizer)));
    cards
}

/// A [`Processor`] using the shortcode catalog.
#[must_use]
pub fn processor(normalizer: &SharedPathNormalizer) -> Processor {
    Processor::from_registries(card_registry(normalizer), atom_registry())
}
