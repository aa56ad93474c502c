//! Core type definitions for the nyumba client.
//!
//! This crate defines the vocabulary shared by every other crate in the
//! workspace:
//! - Listing and agent identifiers (opaque backend row ids)
//! - ISO-3166 country codes for market scoping
//! - The listing record as the backend delivers it
//! - Row-level change events (insert, update, delete)
//!
//! Nothing here talks to the network or holds mutable state; view-side
//! behavior (filtering, reconciliation, subscriptions) lives in
//! `nyumba-feed`.

mod country;
mod event;
mod ids;
mod listing;

pub use country::CountryCode;
pub use event::{ChangeKind, ListingEvent};
pub use ids::{AgentId, ListingId};
pub use listing::{GeoPoint, Listing, ListingStatus, Price, PropertyKind};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid country code: {0:?}")]
    InvalidCountryCode(String),

    #[error("listing id must not be empty")]
    EmptyListingId,

    #[error("unknown change kind: {0:?}")]
    UnknownChangeKind(String),
}
