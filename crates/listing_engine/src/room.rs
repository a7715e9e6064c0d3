use scraper::{ElementRef, Selector};
use serde_json::{json, Value};

use crate::amenities::extract_amenities;
use crate::document::{element_text, Document};
use crate::fetch::{FetchError, Fetcher};
use crate::ratings::extract_ratings;
use crate::types::{Highlight, HostDetails, ImageRef, PriceInfo};

const HIGHLIGHT_HINTS: [&str; 3] = ["superhost", "top", "great location"];
const CURRENCY_SYMBOLS: [char; 5] = ['$', '€', '£', '₹', '¥'];
const PRICE_SNIPPET_CHARS: usize = 20;

/// Fetch one listing page and parse every field into a raw record.
///
/// Fails only when the fetcher exhausts its retry budget; each field parser
/// degrades to null/empty on unexpected markup instead of erroring.
pub async fn scrape_room(fetcher: &dyn Fetcher, url: &str) -> Result<Value, FetchError> {
    let html = fetcher.fetch(url).await?;
    Ok(parse_room(url, &html))
}

/// Parse a fetched page into the unvalidated raw record.
pub fn parse_room(url: &str, html: &str) -> Value {
    let doc = Document::parse(html);
    json!({
        "url": url,
        "propertyType": property_type(&doc),
        "personCapacity": person_capacity(&doc),
        "rating": extract_ratings(&doc),
        "amenities": extract_amenities(&doc),
        "highlights": highlights(&doc),
        "images": images(&doc),
        "hostDetails": host_details(&doc),
        "price": price(&doc),
    })
}

/// Text before the first "-" in the page title, else the first h1/h2 text.
fn property_type(doc: &Document) -> Option<String> {
    if let Some(title) = doc.select_first("title") {
        let text = element_text(title);
        if let Some((head, _)) = text.split_once('-') {
            let head = head.trim();
            if !head.is_empty() {
                return Some(head.to_string());
            }
        }
    }
    doc.select_first("h1, h2")
        .map(element_text)
        .filter(|text| !text.is_empty())
}

/// First numeric token directly followed by a token containing "guest".
fn person_capacity(doc: &Document) -> Option<u64> {
    let text = doc.full_text();
    let tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.windows(2).find_map(|pair| {
        if !pair[0].bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if !pair[1].to_lowercase().contains("guest") {
            return None;
        }
        pair[0].parse::<u64>().ok()
    })
}

/// Lines of page text mentioning a highlight keyword, split on the first ":".
fn highlights(doc: &Document) -> Vec<Highlight> {
    let mut found = Vec::new();
    for fragment in doc.text_fragments() {
        for line in fragment.lines() {
            let line = line.trim();
            let lower = line.to_lowercase();
            if !HIGHLIGHT_HINTS.iter().any(|hint| lower.contains(hint)) {
                continue;
            }
            let (title, subtitle) = match line.split_once(':') {
                Some((title, subtitle)) => (title.trim(), subtitle.trim()),
                None => (line, ""),
            };
            found.push(Highlight {
                title: title.to_string(),
                subtitle: subtitle.to_string(),
            });
        }
    }
    found
}

/// Every image with a source attribute; lazy-loaded sources count too.
fn images(doc: &Document) -> Vec<ImageRef> {
    doc.select_all("img")
        .into_iter()
        .filter_map(|img| {
            let src = [img.value().attr("src"), img.value().attr("data-src")]
                .into_iter()
                .flatten()
                .find(|src| !src.is_empty())?;
            let caption = img.value().attr("alt").unwrap_or("");
            Some(ImageRef {
                url: src.to_string(),
                caption: caption.to_string(),
            })
        })
        .collect()
}

/// Host name and description from a "Hosted by ..." heading's container.
fn host_details(doc: &Document) -> HostDetails {
    let heading = doc
        .select_all("h2, h3")
        .into_iter()
        .find(|heading| element_text(*heading).to_lowercase().contains("hosted by"));

    let mut name = None;
    let mut description = None;
    if let Some(container) = heading.and_then(|h| h.parent()).and_then(ElementRef::wrap) {
        let text = element_text(container);
        if let Some((_, after)) = text.split_once("Hosted by") {
            name = after.split_whitespace().next().map(ToOwned::to_owned);
        }
        if let Ok(selector) = Selector::parse("p") {
            description = container.select(&selector).next().map(element_text);
        }
    }
    HostDetails { name, description }
}

/// First currency symbol whose following characters parse as an amount.
fn price(doc: &Document) -> Option<PriceInfo> {
    let text = doc.full_text();
    for symbol in CURRENCY_SYMBOLS {
        let Some(at) = text.find(symbol) else {
            continue;
        };
        let snippet: String = text[at..].chars().take(PRICE_SNIPPET_CHARS).collect();
        let digits: String = snippet
            .chars()
            .skip(1)
            .take_while(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
            .collect();
        let Ok(amount) = digits.replace(',', "").parse::<f64>() else {
            continue;
        };
        return Some(PriceInfo {
            currency_symbol: Some(symbol.to_string()),
            amount,
            raw: Some(snippet.trim().to_string()),
        });
    }
    None
}
