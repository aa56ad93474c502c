//! Listing source abstraction.
//!
//! Defines the seam between the feed and whatever backend delivers
//! listings: a bulk fetch for seeding and a realtime subscription for
//! row changes. The live client works against this trait; the concrete
//! network implementation lives in the embedding shell.
//!
//! Delivery contract required of implementations: within one
//! subscription, changes to the same listing arrive in the order they
//! happened. No ordering is guaranteed across different listings, and
//! a new subscription does not replay changes from before it opened.

use crate::context::FilterContext;
use crate::error::FeedResult;
use crate::wire::RowChange;
use async_trait::async_trait;
use nyumba_types::{CountryCode, Listing};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Unique identifier for a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Creates a new random subscription ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A live subscription to row changes.
///
/// The subscription is a disposable handle: close it (or drop it) and
/// it stops delivering, permanently. Reconnecting means asking the
/// source for a fresh subscription. This keeps teardown synchronous —
/// once `close` returns, no further change can be received through
/// this handle, so a stale handle can never feed a stale view.
pub struct Subscription {
    id: SubscriptionId,
    context: FilterContext,
    changes: mpsc::Receiver<RowChange>,
    closed: Arc<AtomicBool>,
}

impl Subscription {
    /// Creates a subscription over a change channel.
    ///
    /// The source keeps the sender and the `closed` flag; it must stop
    /// sending once the flag is set.
    #[must_use]
    pub fn new(
        context: FilterContext,
        changes: mpsc::Receiver<RowChange>,
        closed: Arc<AtomicBool>,
    ) -> Self {
        Self {
            id: SubscriptionId::new(),
            context,
            changes,
            closed,
        }
    }

    /// This subscription's ID.
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// The filter context this subscription was opened for.
    #[must_use]
    pub fn context(&self) -> &FilterContext {
        &self.context
    }

    /// Receives the next row change.
    ///
    /// Returns `None` once the subscription is closed or the source
    /// hung up. Changes already queued when `close` was called are not
    /// delivered.
    pub async fn recv(&mut self) -> Option<RowChange> {
        if self.closed.load(Ordering::SeqCst) {
            return None;
        }
        let change = self.changes.recv().await;
        if self.closed.load(Ordering::SeqCst) {
            return None;
        }
        change
    }

    /// Closes the subscription. Synchronous and idempotent.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Whether the subscription has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Returns a handle that can close this subscription from outside
    /// the task that owns it.
    #[must_use]
    pub fn close_handle(&self) -> CloseHandle {
        CloseHandle {
            closed: self.closed.clone(),
        }
    }
}

/// Closes a subscription from outside the receiving task.
#[derive(Debug, Clone)]
pub struct CloseHandle {
    closed: Arc<AtomicBool>,
}

impl CloseHandle {
    /// Closes the subscription. Synchronous and idempotent.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Whether the subscription has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("context", &self.context)
            .field("closed", &self.closed.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// A backend that can seed and stream listings.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetches the active listings for a country, newest first.
    /// Used to seed a feed session.
    async fn fetch_active(&self, country: &CountryCode) -> FeedResult<Vec<Listing>>;

    /// Opens a realtime subscription for row changes.
    ///
    /// The source may pre-filter server-side using the context, but
    /// the feed re-validates every change regardless, so delivering
    /// unfiltered changes is merely wasteful, never incorrect.
    async fn subscribe(&self, context: &FilterContext) -> FeedResult<Subscription>;
}

/// A scriptable in-memory source for testing.
pub mod mock {
    use super::*;
    use crate::error::FeedError;
    use nyumba_types::ListingId;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct Outlet {
        sender: mpsc::Sender<RowChange>,
        closed: Arc<AtomicBool>,
    }

    /// A mock listing source driven entirely from test code.
    ///
    /// Seed data is scripted per country; `push_*` fans a change out to
    /// every open subscription the way the realtime channel would.
    #[derive(Default)]
    pub struct MockSource {
        listings: Mutex<HashMap<String, Vec<Listing>>>,
        outlets: Mutex<Vec<Outlet>>,
        fail_fetch: AtomicBool,
        fail_subscribe: AtomicBool,
    }

    impl MockSource {
        /// Creates an empty mock source.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Scripts the bulk-fetch result for a country, newest first.
        pub fn seed_listings(&self, country: &CountryCode, listings: Vec<Listing>) {
            self.listings
                .lock()
                .unwrap()
                .insert(country.as_str().to_owned(), listings);
        }

        /// Makes the next `fetch_active` call fail.
        pub fn fail_next_fetch(&self) {
            self.fail_fetch.store(true, Ordering::SeqCst);
        }

        /// Makes the next `subscribe` call fail.
        pub fn fail_next_subscribe(&self) {
            self.fail_subscribe.store(true, Ordering::SeqCst);
        }

        /// Number of subscriptions that are still open.
        pub fn open_subscriptions(&self) -> usize {
            self.outlets
                .lock()
                .unwrap()
                .iter()
                .filter(|o| !o.closed.load(Ordering::SeqCst))
                .count()
        }

        /// Drops all delivery channels without closing the handles,
        /// simulating the realtime connection going away.
        pub fn hang_up(&self) {
            self.outlets.lock().unwrap().clear();
        }

        /// Pushes an insert for this listing to all open subscriptions.
        pub async fn push_insert(&self, listing: &Listing) {
            self.push_raw(RowChange::insert(row_json(listing))).await;
        }

        /// Pushes an update for this listing to all open subscriptions.
        pub async fn push_update(&self, listing: &Listing) {
            self.push_raw(RowChange::update(row_json(listing))).await;
        }

        /// Pushes a delete for this id to all open subscriptions.
        pub async fn push_delete(&self, id: &ListingId) {
            self.push_raw(RowChange::delete(id)).await;
        }

        /// Pushes an arbitrary envelope to all open subscriptions.
        pub async fn push_raw(&self, change: RowChange) {
            let senders: Vec<mpsc::Sender<RowChange>> = {
                let mut outlets = self.outlets.lock().unwrap();
                outlets.retain(|o| !o.closed.load(Ordering::SeqCst));
                outlets.iter().map(|o| o.sender.clone()).collect()
            };
            for sender in senders {
                let _ = sender.send(change.clone()).await;
            }
        }
    }

    fn row_json(listing: &Listing) -> serde_json::Value {
        serde_json::to_value(listing).unwrap_or(serde_json::Value::Null)
    }

    #[async_trait]
    impl ListingSource for MockSource {
        async fn fetch_active(&self, country: &CountryCode) -> FeedResult<Vec<Listing>> {
            if self.fail_fetch.swap(false, Ordering::SeqCst) {
                return Err(FeedError::Source("fetch unavailable".into()));
            }
            Ok(self
                .listings
                .lock()
                .unwrap()
                .get(country.as_str())
                .cloned()
                .unwrap_or_default())
        }

        async fn subscribe(&self, context: &FilterContext) -> FeedResult<Subscription> {
            if self.fail_subscribe.swap(false, Ordering::SeqCst) {
                return Err(FeedError::Source("subscribe unavailable".into()));
            }
            let (sender, receiver) = mpsc::channel(64);
            let closed = Arc::new(AtomicBool::new(false));
            self.outlets.lock().unwrap().push(Outlet {
                sender,
                closed: closed.clone(),
            });
            Ok(Subscription::new(*context, receiver, closed))
        }
    }
}
