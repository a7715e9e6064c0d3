use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Selector};

use crate::document::{element_text, Document};
use crate::types::{AmenityGroup, AmenityItem};

const SECTION_HINTS: [&str; 2] = ["amenities", "what this place offers"];
const UNAVAILABLE_HINTS: [&str; 3] = ["not available", "unavailable", "not included"];

/// Extract grouped amenity lists from a listing page.
///
/// Best-effort: returns an empty vec when no amenity markup is recognized.
pub fn extract_amenities(doc: &Document) -> Vec<AmenityGroup> {
    let mut groups: Vec<AmenityGroup> = Vec::new();
    for section in find_amenity_sections(doc) {
        let values = parse_amenity_list(section);
        if values.is_empty() {
            continue;
        }
        let title = group_title(section);
        // Groups sharing a title merge, keeping encounter order.
        match groups.iter_mut().find(|group| group.title == title) {
            Some(existing) => existing.values.extend(values),
            None => groups.push(AmenityGroup { title, values }),
        }
    }
    groups
}

fn find_amenity_sections<'a>(doc: &'a Document) -> Vec<ElementRef<'a>> {
    let mut sections: Vec<ElementRef<'a>> = Vec::new();
    for heading in doc.select_all("h2, h3") {
        let text = element_text(heading).to_lowercase();
        if !SECTION_HINTS.iter().any(|hint| text.contains(hint)) {
            continue;
        }
        if let Some(section) = enclosing_section(heading) {
            if !sections.iter().any(|known| known.id() == section.id()) {
                sections.push(section);
            }
        }
    }
    if sections.is_empty() {
        // Fallback: any section mentioning amenities somewhere in its text.
        for section in doc.select_all("section") {
            if element_text(section).to_lowercase().contains("amenities") {
                sections.push(section);
            }
        }
    }
    sections
}

/// Nearest `<section>` ancestor of a heading, or its direct parent.
fn enclosing_section(heading: ElementRef<'_>) -> Option<ElementRef<'_>> {
    heading
        .ancestors()
        .find_map(as_section)
        .or_else(|| heading.parent().and_then(ElementRef::wrap))
}

fn as_section(node: NodeRef<'_, Node>) -> Option<ElementRef<'_>> {
    let element = ElementRef::wrap(node)?;
    if element.value().name().eq_ignore_ascii_case("section") {
        Some(element)
    } else {
        None
    }
}

fn group_title(section: ElementRef<'_>) -> String {
    let heading = ["h2", "h3", "h4"].iter().find_map(|tag| {
        let selector = Selector::parse(tag).ok()?;
        section.select(&selector).next()
    });
    heading
        .map(element_text)
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| "Amenities".to_string())
}

fn parse_amenity_list(section: ElementRef<'_>) -> Vec<AmenityItem> {
    let Ok(selector) = Selector::parse("li") else {
        return Vec::new();
    };
    section
        .select(&selector)
        .filter_map(|item| {
            let title = element_text(item);
            if title.is_empty() {
                return None;
            }
            let lower = title.to_lowercase();
            let unavailable = UNAVAILABLE_HINTS.iter().any(|hint| lower.contains(hint));
            Some(AmenityItem {
                title,
                available: !unavailable,
            })
        })
        .collect()
}
