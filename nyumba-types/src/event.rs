//! Listing change events.
//!
//! A change event describes one row-level mutation of the listings
//! table. Insert and Update carry the full row state after the change;
//! Delete carries only the id of the removed row. Events for the same
//! listing arrive in order; no ordering is guaranteed across different
//! listings.

use crate::{CountryCode, Error, Listing, ListingId, ListingStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of row-level change an event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

impl FromStr for ChangeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INSERT" => Ok(Self::Insert),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            other => Err(Error::UnknownChangeKind(other.to_owned())),
        }
    }
}

/// A change to one listing row.
///
/// For Insert and Update, `listing` is the full row state after the
/// change. For Delete it is `None` and only `id` identifies the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingEvent {
    /// What happened to the row.
    pub kind: ChangeKind,

    /// The listing the change applies to.
    pub id: ListingId,

    /// Row state after the change, absent for Delete.
    pub listing: Option<Listing>,
}

impl ListingEvent {
    /// Creates an insert event carrying the new row.
    #[must_use]
    pub fn insert(listing: Listing) -> Self {
        Self {
            kind: ChangeKind::Insert,
            id: listing.id.clone(),
            listing: Some(listing),
        }
    }

    /// Creates an update event carrying the row state after the change.
    #[must_use]
    pub fn update(listing: Listing) -> Self {
        Self {
            kind: ChangeKind::Update,
            id: listing.id.clone(),
            listing: Some(listing),
        }
    }

    /// Creates a delete event for a removed row.
    #[must_use]
    pub fn delete(id: ListingId) -> Self {
        Self {
            kind: ChangeKind::Delete,
            id,
            listing: None,
        }
    }

    /// Country of the carried row, `None` for Delete.
    #[must_use]
    pub fn country(&self) -> Option<CountryCode> {
        self.listing.as_ref().map(|l| l.country)
    }

    /// Status of the carried row, `None` for Delete.
    #[must_use]
    pub fn status(&self) -> Option<ListingStatus> {
        self.listing.as_ref().map(|l| l.status)
    }
}
