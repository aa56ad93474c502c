//! The listing record and its component types.
//!
//! A `Listing` is the row shape the backend stores and delivers, both in
//! bulk fetches and inside realtime change events. The client treats it
//! as immutable data; all mutation happens server-side and arrives as a
//! fresh copy of the row.

use crate::{AgentId, CountryCode, ListingId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a listing.
///
/// Only `Active` listings are shown in browse feeds. Unknown wire values
/// fold to `Inactive` so a new backend status never makes old clients
/// show rows they should not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    /// Published and browsable.
    Active,
    /// Awaiting moderation review.
    Pending,
    /// Sale concluded.
    Sold,
    /// Rental concluded.
    Rented,
    /// Withdrawn, expired, or any status this client does not know.
    #[serde(other)]
    Inactive,
}

impl ListingStatus {
    /// Returns true if the listing should appear in browse feeds.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Sold => "sold",
            Self::Rented => "rented",
            Self::Inactive => "inactive",
        };
        f.write_str(s)
    }
}

/// Category of property being listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Apartment,
    House,
    Villa,
    Land,
    Office,
    Shop,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Apartment => "apartment",
            Self::House => "house",
            Self::Villa => "villa",
            Self::Land => "land",
            Self::Office => "office",
            Self::Shop => "shop",
        };
        f.write_str(s)
    }
}

/// A price in minor units of an ISO-4217 currency.
///
/// Minor units (e.g. kobo for NGN, cents for KES; zero-decimal
/// currencies like XOF store whole francs) keep arithmetic exact;
/// formatting for display lives in `nyumba-markets`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's minor unit.
    pub amount: i64,
    /// ISO-4217 currency code, e.g. `XOF` or `NGN`.
    pub currency: String,
}

impl Price {
    /// Creates a price.
    #[must_use]
    pub fn new(amount: i64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

/// A WGS-84 coordinate for map placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A property listing as the backend delivers it.
///
/// Carried whole in Insert/Update change events and in bulk fetch
/// responses; there is no partial-diff form on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Backend-assigned row id.
    pub id: ListingId,

    /// Short headline shown in feed cards.
    pub title: String,

    /// Free-form body text.
    #[serde(default)]
    pub description: String,

    /// Property category.
    pub kind: PropertyKind,

    /// Lifecycle status; only `Active` rows belong in feeds.
    pub status: ListingStatus,

    /// Country market this listing belongs to.
    pub country: CountryCode,

    /// City or locality name, free-form.
    pub city: String,

    /// Asking price.
    pub price: Price,

    /// Bedroom count, absent for land and commercial listings.
    #[serde(default)]
    pub bedrooms: Option<u8>,

    /// Bathroom count, absent for land and commercial listings.
    #[serde(default)]
    pub bathrooms: Option<u8>,

    /// Floor or plot area in square meters.
    #[serde(default)]
    pub area_sqm: Option<u32>,

    /// Photo URLs in display order.
    #[serde(default)]
    pub photos: Vec<String>,

    /// The agent or owner who posted the listing.
    pub agent: AgentId,

    /// Map coordinate, absent until geocoded.
    #[serde(default)]
    pub location: Option<GeoPoint>,

    /// True while a paid boost is running for this listing.
    #[serde(default)]
    pub sponsored: bool,

    /// When the row was created.
    pub created_at: DateTime<Utc>,

    /// When the row was last modified.
    pub updated_at: DateTime<Utc>,
}
