//! Total normalization of raw records into the canonical payload.
//!
//! Every rule here is a pure coercion with a documented default; malformed
//! input of any shape produces a well-formed payload, never an error.

use engine_logging::engine_debug;
use serde_json::Value;

use crate::types::{
    AmenityGroup, AmenityItem, Highlight, HostDetails, ImageRef, PriceInfo, RatingSummary,
    RoomPayload,
};

/// Coerce an arbitrarily-shaped raw record into the canonical payload.
pub fn normalize_payload(raw: &Value) -> RoomPayload {
    RoomPayload {
        url: clean_string(raw.get("url")),
        property_type: clean_string(raw.get("propertyType")),
        person_capacity: coerce_int(raw.get("personCapacity")),
        rating: normalize_rating(raw.get("rating")),
        amenities: normalize_amenities(raw.get("amenities")),
        highlights: normalize_highlights(raw.get("highlights")),
        images: normalize_images(raw.get("images")),
        host_details: normalize_host(raw.get("hostDetails")),
        price: normalize_price(raw.get("price")),
    }
}

/// Coerced, trimmed string; `None` when missing, null, or blank.
fn clean_string(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::Null => return None,
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// JSON numbers and numeric strings coerce to float; anything else is `None`.
fn coerce_float(value: Option<&Value>) -> Option<f64> {
    let value = value?;
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    if parsed.is_none() && !value.is_null() {
        engine_debug!("unable to coerce {value} to float");
    }
    parsed
}

/// Non-negative integer coercion; floats truncate, anything else is `None`.
fn coerce_int(value: Option<&Value>) -> Option<u64> {
    let value = value?;
    let parsed = match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    };
    if parsed.is_none() && !value.is_null() {
        engine_debug!("unable to coerce {value} to integer");
    }
    parsed
}

fn normalize_rating(value: Option<&Value>) -> RatingSummary {
    let raw = value.and_then(Value::as_object);
    let field = |name: &str| coerce_float(raw.and_then(|map| map.get(name)));
    RatingSummary {
        accuracy: field("accuracy"),
        checking: field("checking"),
        cleanliness: field("cleanliness"),
        communication: field("communication"),
        location: field("location"),
        value: field("value"),
        guest_satisfaction: field("guestSatisfaction"),
        reviews_count: coerce_int(raw.and_then(|map| map.get("reviewsCount"))),
    }
}

fn normalize_amenities(value: Option<&Value>) -> Vec<AmenityGroup> {
    let Some(groups) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    let mut normalized = Vec::new();
    for group in groups {
        let Some(group) = group.as_object() else {
            continue;
        };
        let Some(entries) = group.get("values").and_then(Value::as_array) else {
            continue;
        };
        let values: Vec<AmenityItem> = entries
            .iter()
            .filter_map(|entry| {
                let entry = entry.as_object()?;
                let title = clean_string(entry.get("title"))?;
                let available = entry
                    .get("available")
                    .and_then(Value::as_bool)
                    .unwrap_or(true);
                Some(AmenityItem { title, available })
            })
            .collect();
        if values.is_empty() {
            continue;
        }
        let title =
            clean_string(group.get("title")).unwrap_or_else(|| "Amenities".to_string());
        normalized.push(AmenityGroup { title, values });
    }
    normalized
}

fn normalize_highlights(value: Option<&Value>) -> Vec<Highlight> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let entry = entry.as_object()?;
            let title = clean_string(entry.get("title")).unwrap_or_default();
            let subtitle = clean_string(entry.get("subtitle")).unwrap_or_default();
            if title.is_empty() && subtitle.is_empty() {
                return None;
            }
            Some(Highlight { title, subtitle })
        })
        .collect()
}

fn normalize_images(value: Option<&Value>) -> Vec<ImageRef> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let entry = entry.as_object()?;
            let url = clean_string(entry.get("url"))?;
            let caption = clean_string(entry.get("caption")).unwrap_or_default();
            Some(ImageRef { url, caption })
        })
        .collect()
}

fn normalize_host(value: Option<&Value>) -> HostDetails {
    let raw = value.and_then(Value::as_object);
    HostDetails {
        name: clean_string(raw.and_then(|map| map.get("name"))),
        description: clean_string(raw.and_then(|map| map.get("description"))),
    }
}

/// The whole price is dropped unless a numeric amount survives coercion.
fn normalize_price(value: Option<&Value>) -> Option<PriceInfo> {
    let raw = value?.as_object()?;
    let amount = coerce_float(raw.get("amount"))?;
    Some(PriceInfo {
        currency_symbol: clean_string(raw.get("currencySymbol")),
        amount,
        raw: clean_string(raw.get("raw")),
    })
}
