//! Live feed orchestrator — owns the I/O around a feed session.
//!
//! [`LiveFeed`] wires a [`FeedSession`] to a [`ListingSource`]: it
//! opens the subscription, runs the bulk fetch, pumps decoded changes
//! into the session from a single task, and publishes immutable
//! [`FeedSnapshot`]s on a watch channel for the view layer to render.
//!
//! Context switches are teardown-then-rebuild: `open` closes the
//! current subscription before subscribing for the new context, and
//! every context gets a brand-new session instance. A pump left over
//! from a previous context only ever holds that previous session, and
//! its snapshots are suppressed by a generation check, so a late
//! change from a stale subscription can never leak into the new view.

use crate::context::FilterContext;
use crate::error::FeedResult;
use crate::session::{FeedConfig, FeedPhase, FeedSession};
use crate::source::{CloseHandle, ListingSource, Subscription};
use crate::wire;
use nyumba_types::Listing;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// An immutable view of the feed at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot {
    /// Monotonically increasing across the life of the `LiveFeed`,
    /// including context switches.
    pub revision: u64,
    /// Lifecycle phase of the session that produced this snapshot.
    pub phase: FeedPhase,
    /// Visible listings in display order, newest first.
    pub listings: Vec<Listing>,
}

impl Default for FeedSnapshot {
    fn default() -> Self {
        Self {
            revision: 0,
            phase: FeedPhase::Loading,
            listings: Vec::new(),
        }
    }
}

/// Publishes snapshots for one feed generation.
///
/// Holds the generation it was created for; once a newer generation
/// exists, its publishes become no-ops.
#[derive(Clone)]
struct Publisher {
    tx: Arc<watch::Sender<FeedSnapshot>>,
    revision: Arc<AtomicU64>,
    generation: u64,
    current: Arc<AtomicU64>,
}

impl Publisher {
    fn publish(&self, phase: FeedPhase, listings: Vec<Listing>) {
        if self.current.load(Ordering::SeqCst) != self.generation {
            return;
        }
        let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
        let _ = self.tx.send(FeedSnapshot {
            revision,
            phase,
            listings,
        });
    }
}

/// The feed currently wired up, if any.
struct ActiveFeed {
    context: FilterContext,
    session: Arc<Mutex<FeedSession>>,
    close: CloseHandle,
    pump: JoinHandle<()>,
}

/// Orchestrates a live listing feed over a [`ListingSource`].
pub struct LiveFeed {
    source: Arc<dyn ListingSource>,
    config: FeedConfig,
    active: Option<ActiveFeed>,
    tx: Arc<watch::Sender<FeedSnapshot>>,
    revision: Arc<AtomicU64>,
    generation: Arc<AtomicU64>,
}

impl LiveFeed {
    /// Creates a feed over a source. Nothing happens until `open`.
    #[must_use]
    pub fn new(source: Arc<dyn ListingSource>, config: FeedConfig) -> Self {
        let (tx, _rx) = watch::channel(FeedSnapshot::default());
        Self {
            source,
            config,
            active: None,
            tx: Arc::new(tx),
            revision: Arc::new(AtomicU64::new(0)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Opens the feed for a filter context.
    ///
    /// Any currently open subscription is closed first, then the new
    /// one is opened, a fresh session is seeded from the bulk fetch,
    /// and the pump starts applying realtime changes. Changes that
    /// arrive while the fetch is in flight are buffered by the session
    /// and drained after seeding.
    ///
    /// On error the feed is left closed: a failed subscribe opens
    /// nothing, and a failed fetch closes the just-opened
    /// subscription.
    pub async fn open(&mut self, context: FilterContext) -> FeedResult<()> {
        self.close();

        let subscription = self.source.subscribe(&context).await?;
        let session = Arc::new(Mutex::new(FeedSession::new(context, self.config.clone())));
        let publisher = Publisher {
            tx: self.tx.clone(),
            revision: self.revision.clone(),
            generation: self.generation.load(Ordering::SeqCst),
            current: self.generation.clone(),
        };

        publisher.publish(FeedPhase::Loading, Vec::new());

        let close = subscription.close_handle();
        let pump = tokio::spawn(pump_changes(
            subscription,
            session.clone(),
            publisher.clone(),
        ));

        self.active = Some(ActiveFeed {
            context,
            session: session.clone(),
            close,
            pump,
        });

        match self.source.fetch_active(&context.country).await {
            Ok(listings) => {
                let mut session = session.lock().await;
                let visible = session.seed(listings);
                publisher.publish(session.phase(), session.snapshot());
                info!(country = %context.country, visible, "feed open");
                Ok(())
            }
            Err(err) => {
                warn!(country = %context.country, %err, "seed fetch failed, closing feed");
                self.close();
                Err(err)
            }
        }
    }

    /// Closes the feed. Synchronous and idempotent.
    ///
    /// After this returns, no snapshot from the closed generation will
    /// be published, even if its pump is still winding down.
    pub fn close(&mut self) {
        if let Some(active) = self.active.take() {
            self.generation.fetch_add(1, Ordering::SeqCst);
            active.close.close();
            active.pump.abort();
            debug!(country = %active.context.country, "feed closed");
        }
    }

    /// Subscribes to published snapshots.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<FeedSnapshot> {
        self.tx.subscribe()
    }

    /// The most recently published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> FeedSnapshot {
        self.tx.borrow().clone()
    }

    /// Whether a feed is currently open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// The context the feed is open for, if any.
    #[must_use]
    pub fn context(&self) -> Option<FilterContext> {
        self.active.as_ref().map(|a| a.context)
    }

    /// The session's lifecycle phase, if a feed is open.
    pub async fn phase(&self) -> Option<FeedPhase> {
        match &self.active {
            Some(active) => Some(active.session.lock().await.phase()),
            None => None,
        }
    }
}

impl Drop for LiveFeed {
    fn drop(&mut self) {
        self.close();
    }
}

/// Applies decoded changes to the session until the subscription ends.
///
/// Runs as the only writer to its session once seeding is done, which
/// is what keeps session logic single-threaded. Malformed envelopes
/// are dropped here with a diagnostic; a source hangup degrades the
/// session instead of tearing it down.
async fn pump_changes(
    mut subscription: Subscription,
    session: Arc<Mutex<FeedSession>>,
    publisher: Publisher,
) {
    while let Some(change) = subscription.recv().await {
        let event = match wire::decode(change) {
            Ok(event) => event,
            Err(err) => {
                warn!(%err, "dropped malformed change");
                continue;
            }
        };

        let mut session = session.lock().await;
        if session.handle_event(event) {
            publisher.publish(session.phase(), session.snapshot());
        }
    }

    if subscription.is_closed() {
        // Deliberate teardown; the session is being discarded.
        return;
    }

    let mut session = session.lock().await;
    session.mark_degraded();
    publisher.publish(session.phase(), session.snapshot());
}
