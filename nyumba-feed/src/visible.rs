//! The visible listing list — a recency-ordered, id-unique sequence.
//!
//! This is the state a feed view renders. Two invariants hold at all
//! times:
//! - at most one entry per listing id
//! - order is promotion order: the most recently inserted or updated
//!   listing sits at the front
//!
//! An Update to a listing deep in the list therefore moves it to the
//! front. That resurfacing is intended behavior (freshly touched
//! listings are what browsers want to see first), not an ordering bug.

use crate::router::Instruction;
use nyumba_types::{Listing, ListingId};
use std::collections::VecDeque;

/// The set of listings a view currently shows, newest first.
#[derive(Debug, Clone, Default)]
pub struct VisibleListings {
    items: VecDeque<Listing>,
}

impl VisibleListings {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or refreshes a listing at the front.
    ///
    /// Any existing entry with the same id is removed first, wherever
    /// it sits, so the id stays unique and the row gets promoted.
    /// Always changes the list; returns true for symmetry with
    /// [`apply`](Self::apply).
    pub fn upsert(&mut self, listing: Listing) -> bool {
        self.remove(&listing.id);
        self.items.push_front(listing);
        true
    }

    /// Removes a listing by id, returning it if it was present.
    ///
    /// Removing an absent id is a no-op, not an error: Deletes are
    /// routed unconditionally, including for rows this view never
    /// showed.
    pub fn remove(&mut self, id: &ListingId) -> Option<Listing> {
        let pos = self.items.iter().position(|l| &l.id == id)?;
        self.items.remove(pos)
    }

    /// Applies a routed instruction. Returns true if the list changed.
    pub fn apply(&mut self, instruction: Instruction) -> bool {
        match instruction {
            Instruction::Upsert(listing) => self.upsert(*listing),
            Instruction::Remove(id) => self.remove(&id).is_some(),
        }
    }

    /// Replaces the contents from a bulk fetch.
    ///
    /// The fetch is expected newest-first and is installed in that
    /// order. Duplicate ids keep their first (newest) occurrence.
    pub fn seed(&mut self, listings: Vec<Listing>) {
        self.items.clear();
        for listing in listings {
            if !self.contains(&listing.id) {
                self.items.push_back(listing);
            }
        }
    }

    /// Number of visible listings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if nothing is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True if a listing with this id is visible.
    #[must_use]
    pub fn contains(&self, id: &ListingId) -> bool {
        self.items.iter().any(|l| &l.id == id)
    }

    /// The listing with this id, if visible.
    #[must_use]
    pub fn get(&self, id: &ListingId) -> Option<&Listing> {
        self.items.iter().find(|l| &l.id == id)
    }

    /// The position of a listing in display order.
    #[must_use]
    pub fn position(&self, id: &ListingId) -> Option<usize> {
        self.items.iter().position(|l| &l.id == id)
    }

    /// The newest (front) listing.
    #[must_use]
    pub fn front(&self) -> Option<&Listing> {
        self.items.front()
    }

    /// Iterates in display order, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Listing> {
        self.items.iter()
    }

    /// Copies the list out in display order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Listing> {
        self.items.iter().cloned().collect()
    }
}

impl<'a> IntoIterator for &'a VisibleListings {
    type Item = &'a Listing;
    type IntoIter = std::collections::vec_deque::Iter<'a, Listing>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
