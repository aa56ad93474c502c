use chrono::{TimeZone, Utc};
use nyumba_types::{
    AgentId, CountryCode, GeoPoint, Listing, ListingId, ListingStatus, Price, PropertyKind,
};

fn make_listing(id: &str) -> Listing {
    Listing {
        id: ListingId::new(id),
        title: "2BR apartment in Cocody".into(),
        description: "Close to the university".into(),
        kind: PropertyKind::Apartment,
        status: ListingStatus::Active,
        country: CountryCode::parse("CI").unwrap(),
        city: "Abidjan".into(),
        price: Price::new(25_000_000, "XOF"),
        bedrooms: Some(2),
        bathrooms: Some(1),
        area_sqm: Some(78),
        photos: vec!["https://img.example/1.jpg".into()],
        agent: AgentId::new("agt_1"),
        location: Some(GeoPoint::new(5.359, -3.996)),
        sponsored: false,
        created_at: Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 6, 2, 9, 0, 0).unwrap(),
    }
}

// ── ListingStatus ─────────────────────────────────────────────────

#[test]
fn status_is_active() {
    assert!(ListingStatus::Active.is_active());
    assert!(!ListingStatus::Pending.is_active());
    assert!(!ListingStatus::Sold.is_active());
    assert!(!ListingStatus::Rented.is_active());
    assert!(!ListingStatus::Inactive.is_active());
}

#[test]
fn status_serde_snake_case() {
    assert_eq!(
        serde_json::to_string(&ListingStatus::Active).unwrap(),
        r#""active""#
    );
    let parsed: ListingStatus = serde_json::from_str(r#""sold""#).unwrap();
    assert_eq!(parsed, ListingStatus::Sold);
}

#[test]
fn unknown_status_folds_to_inactive() {
    let parsed: ListingStatus = serde_json::from_str(r#""archived_by_admin""#).unwrap();
    assert_eq!(parsed, ListingStatus::Inactive);
}

#[test]
fn status_display() {
    assert_eq!(ListingStatus::Rented.to_string(), "rented");
}

// ── PropertyKind ──────────────────────────────────────────────────

#[test]
fn kind_serde_snake_case() {
    assert_eq!(
        serde_json::to_string(&PropertyKind::Villa).unwrap(),
        r#""villa""#
    );
    let parsed: PropertyKind = serde_json::from_str(r#""land""#).unwrap();
    assert_eq!(parsed, PropertyKind::Land);
}

// ── Listing ───────────────────────────────────────────────────────

#[test]
fn listing_serde_roundtrip() {
    let listing = make_listing("lst_1");
    let json = serde_json::to_string(&listing).unwrap();
    let parsed: Listing = serde_json::from_str(&json).unwrap();
    assert_eq!(listing, parsed);
}

#[test]
fn listing_optional_fields_default() {
    // Land parcels omit room counts, photos, and coordinates entirely.
    let json = r#"{
        "id": "lst_land",
        "title": "Titled plot, 600 sqm",
        "kind": "land",
        "status": "active",
        "country": "SN",
        "city": "Dakar",
        "price": { "amount": 15000000, "currency": "XOF" },
        "agent": "agt_2",
        "created_at": "2024-05-01T08:00:00Z",
        "updated_at": "2024-05-01T08:00:00Z"
    }"#;

    let listing: Listing = serde_json::from_str(json).unwrap();
    assert_eq!(listing.bedrooms, None);
    assert_eq!(listing.bathrooms, None);
    assert_eq!(listing.area_sqm, None);
    assert!(listing.photos.is_empty());
    assert_eq!(listing.location, None);
    assert!(!listing.sponsored);
    assert_eq!(listing.description, "");
}

#[test]
fn listing_rejects_bad_country() {
    let json = r#"{
        "id": "lst_x",
        "title": "t",
        "kind": "house",
        "status": "active",
        "country": "XYZ",
        "city": "c",
        "price": { "amount": 1, "currency": "XOF" },
        "agent": "a",
        "created_at": "2024-05-01T08:00:00Z",
        "updated_at": "2024-05-01T08:00:00Z"
    }"#;
    assert!(serde_json::from_str::<Listing>(json).is_err());
}

#[test]
fn price_keeps_minor_units_exact() {
    let price = Price::new(1_234_567, "NGN");
    let json = serde_json::to_string(&price).unwrap();
    let parsed: Price = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.amount, 1_234_567);
    assert_eq!(parsed.currency, "NGN");
}
