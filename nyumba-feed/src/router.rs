//! Event routing — turns a change event into a list instruction.
//!
//! Every event is re-validated against the view's filter context before
//! it touches the visible list. The decision table:
//!
//! | event           | payload matches filter | instruction |
//! |-----------------|------------------------|-------------|
//! | Insert / Update | yes                    | Upsert      |
//! | Update          | no                     | Remove      |
//! | Insert          | no                     | (dropped)   |
//! | Delete          | n/a (no payload)       | Remove      |
//!
//! The Update-to-Remove edge is what evicts rows that were updated out
//! of the filter (status flipped, country corrected) while visible.

use crate::context::FilterContext;
use nyumba_types::{ChangeKind, Listing, ListingEvent, ListingId};
use tracing::debug;

/// An instruction for the visible list.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Insert or refresh this listing at the front.
    Upsert(Box<Listing>),
    /// Remove this listing if present.
    Remove(ListingId),
}

/// Routes one change event against a filter context.
///
/// Returns `None` when the event needs no list change (an Insert that
/// never matched the filter). A Delete always routes to `Remove`: the
/// event carries no payload to re-check, and removing an absent id is
/// a no-op anyway.
#[must_use]
pub fn route(event: ListingEvent, context: &FilterContext) -> Option<Instruction> {
    match (event.kind, event.listing) {
        (ChangeKind::Delete, _) => Some(Instruction::Remove(event.id)),
        (_, Some(listing)) if context.matches(&listing) => {
            Some(Instruction::Upsert(Box::new(listing)))
        }
        (ChangeKind::Update, Some(_)) => Some(Instruction::Remove(event.id)),
        (ChangeKind::Insert, Some(_)) => {
            debug!(id = %event.id, "insert outside filter, dropped");
            None
        }
        // Insert/Update without a payload cannot be routed; the wire
        // layer rejects these before they get here.
        (kind, None) => {
            debug!(id = %event.id, %kind, "payload-less event, dropped");
            None
        }
    }
}
