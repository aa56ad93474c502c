use chrono::{TimeZone, Utc};
use nyumba_feed::{FilterContext, Instruction, route};
use nyumba_types::{
    AgentId, CountryCode, Listing, ListingEvent, ListingId, ListingStatus, Price, PropertyKind,
};

fn listing(id: &str, country: &str, status: ListingStatus) -> Listing {
    Listing {
        id: ListingId::new(id),
        title: "4BR villa".into(),
        description: String::new(),
        kind: PropertyKind::Villa,
        status,
        country: CountryCode::parse(country).unwrap(),
        city: "Dakar".into(),
        price: Price::new(95_000_000, "XOF"),
        bedrooms: Some(4),
        bathrooms: Some(3),
        area_sqm: Some(220),
        photos: Vec::new(),
        agent: AgentId::new("agt_1"),
        location: None,
        sponsored: false,
        created_at: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
    }
}

fn ci_active() -> FilterContext {
    FilterContext::active(CountryCode::parse("CI").unwrap())
}

// ── matching events become upserts ────────────────────────────────

#[test]
fn matching_insert_routes_to_upsert() {
    let l = listing("lst_1", "CI", ListingStatus::Active);
    let routed = route(ListingEvent::insert(l.clone()), &ci_active());
    assert_eq!(routed, Some(Instruction::Upsert(Box::new(l))));
}

#[test]
fn matching_update_routes_to_upsert() {
    let l = listing("lst_2", "CI", ListingStatus::Active);
    let routed = route(ListingEvent::update(l.clone()), &ci_active());
    assert_eq!(routed, Some(Instruction::Upsert(Box::new(l))));
}

// ── updates leaving the filter become removals ────────────────────

#[test]
fn update_to_non_active_routes_to_remove() {
    // A visible listing gets marked sold: the event no longer matches
    // the filter, so the view must evict it.
    let l = listing("lst_3", "CI", ListingStatus::Sold);
    let routed = route(ListingEvent::update(l), &ci_active());
    assert_eq!(routed, Some(Instruction::Remove(ListingId::new("lst_3"))));
}

#[test]
fn update_deactivated_in_place_routes_to_remove() {
    // Status flipped to inactive while the country still matches.
    let l = listing("lst_9", "CI", ListingStatus::Inactive);
    let routed = route(ListingEvent::update(l), &ci_active());
    assert_eq!(routed, Some(Instruction::Remove(ListingId::new("lst_9"))));
}

#[test]
fn update_moved_to_other_country_routes_to_remove() {
    let l = listing("lst_4", "SN", ListingStatus::Active);
    let routed = route(ListingEvent::update(l), &ci_active());
    assert_eq!(routed, Some(Instruction::Remove(ListingId::new("lst_4"))));
}

// ── non-matching inserts are dropped ──────────────────────────────

#[test]
fn insert_outside_filter_is_dropped() {
    // Never visible, so there is nothing to evict either.
    let l = listing("lst_5", "SN", ListingStatus::Active);
    assert_eq!(route(ListingEvent::insert(l), &ci_active()), None);
}

#[test]
fn insert_with_wrong_status_is_dropped() {
    let l = listing("lst_6", "CI", ListingStatus::Pending);
    assert_eq!(route(ListingEvent::insert(l), &ci_active()), None);
}

// ── deletes always remove ─────────────────────────────────────────

#[test]
fn delete_routes_to_remove() {
    let routed = route(ListingEvent::delete(ListingId::new("lst_7")), &ci_active());
    assert_eq!(routed, Some(Instruction::Remove(ListingId::new("lst_7"))));
}

#[test]
fn delete_removes_regardless_of_last_known_state() {
    // The delete event carries no payload, so the router cannot and
    // must not consult country or status; any id routes to Remove.
    let contexts = [
        FilterContext::active(CountryCode::parse("CI").unwrap()),
        FilterContext::active(CountryCode::parse("NG").unwrap()),
        FilterContext {
            country: CountryCode::parse("KE").unwrap(),
            require_status: ListingStatus::Sold,
        },
    ];
    for context in contexts {
        let routed = route(ListingEvent::delete(ListingId::new("lst_8")), &context);
        assert_eq!(routed, Some(Instruction::Remove(ListingId::new("lst_8"))));
    }
}

// ── filter context ────────────────────────────────────────────────

#[test]
fn context_matches_on_country_and_status() {
    let ctx = ci_active();

    assert!(ctx.matches(&listing("a", "CI", ListingStatus::Active)));
    assert!(!ctx.matches(&listing("b", "CI", ListingStatus::Inactive)));
    assert!(!ctx.matches(&listing("c", "GH", ListingStatus::Active)));
}

#[test]
fn active_constructor_requires_active_status() {
    let ctx = FilterContext::active(CountryCode::parse("TZ").unwrap());
    assert_eq!(ctx.require_status, ListingStatus::Active);
}
