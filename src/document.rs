//! Source document: a parsed HTML tree with the small lookup surface the
//! extractor needs.
//!
//! Lookups never fail. An unknown selector or a missing element yields
//! `None`/an empty list so extraction can fall back to defaults.

use scraper::{ElementRef, Html, Selector};
use std::path::Path;

use crate::Result;

/// A parsed source page
pub struct SourceDocument {
    html: Html,
}

impl SourceDocument {
    /// Parse a complete HTML document.
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// Read and parse an HTML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Ok(Self::parse(&source))
    }

    /// First element in document order matching `css`.
    pub fn select_first(&self, css: &str) -> Option<ElementRef<'_>> {
        let sel = selector(css)?;
        let found = self.html.select(&sel).next();
        found
    }

    /// All elements matching `css`, in document order.
    pub fn select_all(&self, css: &str) -> Vec<ElementRef<'_>> {
        let Some(sel) = selector(css) else {
            return Vec::new();
        };
        let found = self.html.select(&sel).collect();
        found
    }

    /// Whether an element with the given id exists (the trigger control).
    pub fn has_control(&self, id: &str) -> bool {
        self.select_all("[id]")
            .iter()
            .any(|el| el.value().id() == Some(id))
    }
}

impl std::fmt::Debug for SourceDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceDocument").finish_non_exhaustive()
    }
}

fn selector(css: &str) -> Option<Selector> {
    let parsed = Selector::parse(css).ok();
    if parsed.is_none() {
        log::debug!("ignoring invalid selector {:?}", css);
    }
    parsed
}

/// First descendant of `el` matching `css`.
pub(crate) fn first_within<'a>(el: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let sel = selector(css)?;
    let found = el.select(&sel).next();
    found
}

/// All descendants of `el` matching `css`, in document order.
pub(crate) fn all_within<'a>(el: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    let Some(sel) = selector(css) else {
        return Vec::new();
    };
    let found = el.select(&sel).collect();
    found
}

/// Concatenated text content of an element and its descendants.
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>()
}

/// Text content of the first descendant matching `css`, or an empty string.
pub(crate) fn text_within(el: ElementRef<'_>, css: &str) -> String {
    first_within(el, css).map(text_of).unwrap_or_default()
}
