//! Supported-market directory for the nyumba client.
//!
//! The marketplace launches country by country; this crate is the
//! static source of truth for which countries are live and what a
//! client needs to serve each one: currency, dial code, and where to
//! center the map before any listings have loaded.
//!
//! It also hosts the geocoding seam. Turning a free-form address into
//! a coordinate is done by an external provider behind the
//! [`Geocoder`] trait; [`CachingGeocoder`] puts a bounded TTL cache in
//! front of it so repeated lookups of the same place stay local.

mod directory;
mod geocode;

pub use directory::{
    Market, currency_for, format_price, is_supported, map_seed_for, market_for,
    supported_countries,
};
pub use geocode::{CachingGeocoder, Geocoder};

use nyumba_types::CountryCode;
use thiserror::Error;

/// Result type for market operations.
pub type MarketsResult<T> = Result<T, MarketsError>;

/// Errors that can occur in market operations.
#[derive(Debug, Error)]
pub enum MarketsError {
    /// The country is not a live market.
    #[error("unsupported country: {0}")]
    UnsupportedCountry(CountryCode),

    /// The external provider failed.
    #[error("provider error: {0}")]
    Provider(String),
}
