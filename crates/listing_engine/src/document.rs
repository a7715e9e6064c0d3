use scraper::{ElementRef, Html, Selector};

/// Parsed, read-only representation of one HTML page.
///
/// Owned transiently by a single extraction call and discarded afterwards.
pub struct Document {
    tree: Html,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        Self {
            tree: Html::parse_document(html),
        }
    }

    /// All elements matching a CSS selector, in document order.
    ///
    /// An invalid selector yields no elements; lookups never fail.
    pub fn select_all(&self, css: &str) -> Vec<ElementRef<'_>> {
        match Selector::parse(css) {
            Ok(selector) => self.tree.select(&selector).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn select_first(&self, css: &str) -> Option<ElementRef<'_>> {
        match Selector::parse(css) {
            Ok(selector) => self.tree.select(&selector).next(),
            Err(_) => None,
        }
    }

    /// Trimmed, non-empty text fragments of the whole page in document order.
    pub fn text_fragments(&self) -> Vec<String> {
        self.tree
            .root_element()
            .text()
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    }

    /// The page's text as one whitespace-joined string.
    pub fn full_text(&self) -> String {
        self.text_fragments().join(" ")
    }
}

/// An element's text with fragments trimmed and joined by single spaces.
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
