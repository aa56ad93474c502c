//! Feed session — stateful feed logic without I/O.
//!
//! The session is a pure state machine. It consumes decoded listing
//! events and bulk-fetch results; the live client handles all I/O
//! (subscribing, fetching, pumping the channel) and calls in here from
//! one logical event loop. Nothing in this module locks or awaits.
//!
//! Lifecycle: a session starts in `Loading` while the bulk fetch is in
//! flight. Realtime events that arrive early are buffered, then drained
//! once the seed lands and the session goes `Live`. Connectivity loss
//! flips it to `Degraded`, where it keeps serving the last known state.

use crate::context::FilterContext;
use crate::router::route;
use crate::visible::VisibleListings;
use nyumba_types::{Listing, ListingEvent};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    /// Bulk fetch in flight; events are buffered.
    Loading,
    /// Seeded and applying events as they arrive.
    Live,
    /// Connectivity lost; serving the last known state.
    Degraded,
}

/// Configuration for a feed session.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Maximum events buffered while the bulk fetch is in flight.
    /// Overflow drops the oldest buffered event; the seed that follows
    /// supersedes whatever those events carried.
    pub max_pending_events: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            max_pending_events: 256,
        }
    }
}

/// The feed session — applies events against a filter context.
pub struct FeedSession {
    context: FilterContext,
    config: FeedConfig,
    phase: FeedPhase,
    visible: VisibleListings,
    /// Events that arrived before the seed, in arrival order.
    pending: VecDeque<ListingEvent>,
    events_applied: u64,
    events_dropped: u64,
}

impl FeedSession {
    /// Creates a session in `Loading` with an empty visible set.
    #[must_use]
    pub fn new(context: FilterContext, config: FeedConfig) -> Self {
        Self {
            context,
            config,
            phase: FeedPhase::Loading,
            visible: VisibleListings::new(),
            pending: VecDeque::new(),
            events_applied: 0,
            events_dropped: 0,
        }
    }

    /// Handles one decoded listing event.
    ///
    /// While `Loading`, the event is buffered for the post-seed drain
    /// and the visible set does not change. Otherwise the event is
    /// routed against the context and applied. Returns whether the
    /// visible set changed.
    pub fn handle_event(&mut self, event: ListingEvent) -> bool {
        if self.phase == FeedPhase::Loading {
            if self.pending.len() >= self.config.max_pending_events {
                if let Some(dropped) = self.pending.pop_front() {
                    warn!(id = %dropped.id, "pending buffer full, dropped oldest event");
                    self.events_dropped += 1;
                }
            }
            self.pending.push_back(event);
            return false;
        }
        self.apply(event)
    }

    /// Installs the bulk-fetch base state and goes `Live`.
    ///
    /// The fetch result is taken newest-first and installed verbatim.
    /// Buffered events are then drained in arrival order; per-listing
    /// the stream is ordered and upsert/remove are idempotent, so
    /// events that raced the fetch settle on the correct final state.
    /// Returns the resulting visible count.
    pub fn seed(&mut self, listings: Vec<Listing>) -> usize {
        self.visible.seed(listings);
        self.phase = FeedPhase::Live;

        let buffered = std::mem::take(&mut self.pending);
        let drained = buffered.len();
        for event in buffered {
            self.apply(event);
        }

        info!(
            visible = self.visible.len(),
            drained, "feed seeded, session live"
        );
        self.visible.len()
    }

    fn apply(&mut self, event: ListingEvent) -> bool {
        let id = event.id.clone();
        match route(event, &self.context) {
            Some(instruction) => {
                let changed = self.visible.apply(instruction);
                if changed {
                    self.events_applied += 1;
                    debug!(%id, visible = self.visible.len(), "event applied");
                }
                changed
            }
            None => {
                self.events_dropped += 1;
                false
            }
        }
    }

    /// Marks the session degraded after connectivity loss.
    ///
    /// The visible set is kept as-is; a degraded feed serves stale
    /// data rather than nothing.
    pub fn mark_degraded(&mut self) {
        if self.phase != FeedPhase::Degraded {
            info!("feed degraded, serving last known state");
            self.phase = FeedPhase::Degraded;
        }
    }

    /// Marks the session live again after connectivity returns.
    pub fn mark_live(&mut self) {
        if self.phase == FeedPhase::Degraded {
            info!("feed live again");
            self.phase = FeedPhase::Live;
        }
    }

    /// The visible listing set.
    #[must_use]
    pub fn visible(&self) -> &VisibleListings {
        &self.visible
    }

    /// Copies the visible set out in display order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Listing> {
        self.visible.to_vec()
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> FeedPhase {
        self.phase
    }

    /// The filter context this session was opened with.
    #[must_use]
    pub fn context(&self) -> &FilterContext {
        &self.context
    }

    /// Number of events currently buffered for the post-seed drain.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Events that changed the visible set since the session started.
    #[must_use]
    pub fn events_applied(&self) -> u64 {
        self.events_applied
    }

    /// Events dropped without touching the visible set (inserts outside
    /// the filter, pending-buffer overflow).
    #[must_use]
    pub fn events_dropped(&self) -> u64 {
        self.events_dropped
    }
}
