//! Filter context for a feed view.

use nyumba_types::{CountryCode, Listing, ListingStatus};

/// The filter a feed view is scoped to.
///
/// One context per view instance. Switching country or status means
/// opening a new session with a new context, never mutating this one
/// under a live subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterContext {
    /// Country market the view shows.
    pub country: CountryCode,
    /// Status a listing must have to be visible.
    pub require_status: ListingStatus,
}

impl FilterContext {
    /// Creates a context for active listings in a country — the filter
    /// every browse feed uses.
    #[must_use]
    pub const fn active(country: CountryCode) -> Self {
        Self {
            country,
            require_status: ListingStatus::Active,
        }
    }

    /// Returns true if the listing satisfies this filter.
    ///
    /// Applied to every incoming event even when the server already
    /// filtered the subscription. The server-side filter is treated as
    /// a bandwidth hint, not a correctness guarantee.
    #[must_use]
    pub fn matches(&self, listing: &Listing) -> bool {
        listing.country == self.country && listing.status == self.require_status
    }
}
