use engine_logging::engine_debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::{element_text, Document};
use crate::types::RatingSummary;

/// A rating like "4.97" or "4.9": one digit, a decimal point, 1-2 digits.
static DECIMAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d\.\d{1,2}").expect("decimal pattern"));
/// An integer directly followed by a "review(s)" token.
static REVIEWS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s+review").expect("reviews pattern"));

/// Extract the page's rating signals into a fixed-shape record.
///
/// All fields are present in the result; any one of them is `None` when the
/// page held no parseable value for it. The headline rating doubles as the
/// guest satisfaction score.
pub fn extract_ratings(doc: &Document) -> RatingSummary {
    let text = doc.full_text();
    let overall = first_decimal(&text);
    let reviews_count = REVIEWS_RE
        .captures(&text)
        .and_then(|caps| caps[1].parse::<u64>().ok());

    let rows: Vec<String> = doc
        .select_all("div, li")
        .into_iter()
        .map(element_text)
        .collect();
    // The first row naming a field claims it; later rows are ignored.
    let subrating = |field: &str| -> Option<f64> {
        let row = rows.iter().find(|row| row.to_lowercase().contains(field))?;
        let value = first_decimal(row);
        if value.is_none() {
            engine_debug!("no parseable {field} rating in {row:?}");
        }
        value
    };

    RatingSummary {
        accuracy: subrating("accuracy"),
        checking: subrating("checking"),
        cleanliness: subrating("cleanliness"),
        communication: subrating("communication"),
        location: subrating("location"),
        value: subrating("value"),
        guest_satisfaction: overall,
        reviews_count,
    }
}

fn first_decimal(text: &str) -> Option<f64> {
    DECIMAL_RE
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}
