use listing_engine::{
    normalize_payload, AmenityGroup, AmenityItem, HostDetails, RatingSummary, RoomPayload,
};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn any_input_shape_produces_a_well_formed_payload() {
    let cases = [
        json!(null),
        json!([]),
        json!("not even an object"),
        json!(42),
        json!({
            "rating": "five stars",
            "amenities": {"title": "Bathroom"},
            "highlights": "Superhost",
            "images": [[]],
            "hostDetails": [],
            "price": {"amount": "soon"},
            "personCapacity": {"n": 4},
        }),
    ];
    for raw in &cases {
        let payload = normalize_payload(raw);
        assert_eq!(payload.url, None);
        assert_eq!(payload.person_capacity, None);
        assert_eq!(payload.rating, RatingSummary::default());
        assert_eq!(payload.amenities, vec![]);
        assert_eq!(payload.highlights, vec![]);
        assert_eq!(payload.images, vec![]);
        assert_eq!(payload.host_details, HostDetails::default());
        assert_eq!(payload.price, None);
    }
}

#[test]
fn normalizing_a_normalized_payload_is_a_noop() {
    let raw = json!({
        "url": "https://example.com/rooms/1",
        "propertyType": "Entire loft",
        "personCapacity": 2,
        "rating": {
            "accuracy": 4.9,
            "checking": null,
            "cleanliness": "4.8",
            "communication": 5.0,
            "location": 4.7,
            "value": 4.6,
            "guestSatisfaction": 4.9,
            "reviewsCount": "12",
        },
        "amenities": [{"title": "", "values": [{"title": "Wifi"}]}],
        "highlights": [{"title": "Superhost", "subtitle": ""}],
        "images": [{"url": "https://img.example/1.jpg"}],
        "hostDetails": {"name": "Maria", "description": ""},
        "price": {"currencySymbol": "$", "amount": "120", "raw": "$120 per night"},
    });
    let once = normalize_payload(&raw);
    let round = serde_json::to_value(&once).expect("payload serializes");
    let twice = normalize_payload(&round);
    assert_eq!(once, twice);
}

#[test]
fn amenity_groups_keep_only_valid_entries() {
    let raw = json!({"amenities": [
        {"title": "Bathroom", "values": [
            {"title": "Hair dryer"},
            {"title": "   "},
            "junk",
            {"available": false},
        ]},
        "not a group",
        {"title": "Empty", "values": []},
        {"title": "Kitchen"},
    ]});
    assert_eq!(
        normalize_payload(&raw).amenities,
        vec![AmenityGroup {
            title: "Bathroom".to_string(),
            values: vec![AmenityItem {
                title: "Hair dryer".to_string(),
                available: true,
            }],
        }]
    );
}

#[test]
fn amenity_defaults_title_and_availability() {
    let raw = json!({"amenities": [
        {"title": "  ", "values": [
            {"title": "Pool (not available)", "available": false},
            {"title": "Wifi"},
        ]},
    ]});
    let amenities = normalize_payload(&raw).amenities;
    assert_eq!(amenities[0].title, "Amenities");
    assert_eq!(amenities[0].values[0].available, false);
    assert_eq!(amenities[0].values[1].available, true);
}

#[test]
fn highlights_drop_entries_with_nothing_in_them() {
    let raw = json!({"highlights": [
        {"title": "", "subtitle": ""},
        {"subtitle": "kept"},
        "junk",
    ]});
    let highlights = normalize_payload(&raw).highlights;
    assert_eq!(highlights.len(), 1);
    assert_eq!(highlights[0].title, "");
    assert_eq!(highlights[0].subtitle, "kept");
}

#[test]
fn images_require_a_url_and_default_the_caption() {
    let raw = json!({"images": [
        {"caption": "no url"},
        {"url": ""},
        {"url": "https://img.example/1.jpg", "caption": null},
    ]});
    let images = normalize_payload(&raw).images;
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].url, "https://img.example/1.jpg");
    assert_eq!(images[0].caption, "");
}

#[test]
fn numeric_coercions_accept_strings_and_truncate_floats() {
    let raw = json!({
        "personCapacity": "4",
        "rating": {"guestSatisfaction": "4.97", "reviewsCount": 36.9},
    });
    let payload = normalize_payload(&raw);
    assert_eq!(payload.person_capacity, Some(4));
    assert_eq!(payload.rating.guest_satisfaction, Some(4.97));
    assert_eq!(payload.rating.reviews_count, Some(36));

    let raw = json!({"personCapacity": 4.7});
    assert_eq!(normalize_payload(&raw).person_capacity, Some(4));

    let raw = json!({"personCapacity": true});
    assert_eq!(normalize_payload(&raw).person_capacity, None);

    let raw = json!({"personCapacity": "many"});
    assert_eq!(normalize_payload(&raw).person_capacity, None);
}

#[test]
fn host_empty_strings_become_null() {
    let raw = json!({"hostDetails": {"name": "", "description": "  "}});
    assert_eq!(normalize_payload(&raw).host_details, HostDetails::default());
}

#[test]
fn price_is_dropped_wholesale_without_an_amount() {
    let raw = json!({"price": {"currencySymbol": "$", "raw": "$?? per night"}});
    assert_eq!(normalize_payload(&raw).price, None);

    let raw = json!({"price": {"currencySymbol": "", "amount": 100}});
    let price = normalize_payload(&raw).price.expect("amount parses");
    assert_eq!(price.currency_symbol, None);
    assert_eq!(price.amount, 100.0);
    assert_eq!(price.raw, None);
}

#[test]
fn default_payload_round_trips_through_serialization() {
    let payload = RoomPayload::default();
    let round = serde_json::to_value(&payload).expect("payload serializes");
    assert_eq!(normalize_payload(&round), payload);
}
