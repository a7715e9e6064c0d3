use serde::{Deserialize, Serialize};

/// Fixed-shape record of a page's rating signals.
///
/// Every field is optional: a signal that cannot be located in the page text
/// stays `None` instead of failing the extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub accuracy: Option<f64>,
    pub checking: Option<f64>,
    pub cleanliness: Option<f64>,
    pub communication: Option<f64>,
    pub location: Option<f64>,
    pub value: Option<f64>,
    /// Mirrors the page's headline rating when one was found.
    pub guest_satisfaction: Option<f64>,
    pub reviews_count: Option<u64>,
}

/// One amenity entry inside a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmenityItem {
    pub title: String,
    pub available: bool,
}

/// A titled group of amenities ("Bathroom", "Kitchen", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmenityGroup {
    pub title: String,
    pub values: Vec<AmenityItem>,
}

/// A callout line such as "Superhost: recognized for hospitality".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub title: String,
    /// Empty when the source line had no ":" separator.
    pub subtitle: String,
}

/// One listing photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    pub caption: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostDetails {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Parsed price tag. The record is absent entirely when no numeric amount
/// could be parsed from the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceInfo {
    pub currency_symbol: Option<String>,
    pub amount: f64,
    /// The matched text as it appeared on the page.
    pub raw: Option<String>,
}

/// Canonical output record: every field type-checked and defaulted.
///
/// This is the only shape ever persisted or transmitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPayload {
    pub url: Option<String>,
    pub property_type: Option<String>,
    pub person_capacity: Option<u64>,
    pub rating: RatingSummary,
    pub amenities: Vec<AmenityGroup>,
    pub highlights: Vec<Highlight>,
    pub images: Vec<ImageRef>,
    pub host_details: HostDetails,
    pub price: Option<PriceInfo>,
}
