use nyumba_types::{AgentId, ListingId};
use std::collections::HashSet;
use std::str::FromStr;

// ── ListingId ─────────────────────────────────────────────────────

#[test]
fn listing_id_new_and_as_str() {
    let id = ListingId::new("lst_8f3a");
    assert_eq!(id.as_str(), "lst_8f3a");
}

#[test]
fn listing_id_display() {
    let id = ListingId::new("lst_8f3a");
    assert_eq!(id.to_string(), "lst_8f3a");
}

#[test]
fn listing_id_from_str() {
    let id = ListingId::from_str("lst_1").unwrap();
    assert_eq!(id, ListingId::new("lst_1"));
}

#[test]
fn listing_id_from_str_rejects_empty() {
    assert!(ListingId::from_str("").is_err());
}

#[test]
fn listing_id_hash_and_eq() {
    let mut set = HashSet::new();
    set.insert(ListingId::new("a"));
    set.insert(ListingId::new("a"));
    set.insert(ListingId::new("b"));
    assert_eq!(set.len(), 2);
}

#[test]
fn listing_id_serde_is_transparent() {
    let id = ListingId::new("lst_42");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, r#""lst_42""#);
    let parsed: ListingId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, parsed);
}

// ── AgentId ───────────────────────────────────────────────────────

#[test]
fn agent_id_new_and_as_str() {
    let id = AgentId::new("agt_77");
    assert_eq!(id.as_str(), "agt_77");
}

#[test]
fn agent_id_display() {
    let id = AgentId::new("agt_77");
    assert_eq!(id.to_string(), "agt_77");
}

#[test]
fn agent_id_serde_is_transparent() {
    let id = AgentId::new("agt_9");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, r#""agt_9""#);
    let parsed: AgentId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, parsed);
}
