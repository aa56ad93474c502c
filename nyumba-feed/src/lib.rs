//! Realtime listing feed engine for the nyumba client.
//!
//! Keeps a browse view's listing list synchronized with the backend
//! without refetching: the view seeds itself from one bulk fetch, then
//! applies row-level change events as they arrive over a realtime
//! subscription.
//!
//! # Architecture
//!
//! - **Wire**: Decodes raw row-change envelopes into typed events
//! - **Context**: The country + status filter a view is scoped to
//! - **Router**: Re-validates each event against the context and turns
//!   it into an upsert or remove instruction
//! - **Visible**: The recency-ordered, id-unique list the view renders
//! - **Session**: Pure state machine tying the above together, with
//!   buffering for events that race the seed fetch
//! - **Source**: Trait seam over the backend (bulk fetch + subscribe)
//! - **Client**: The orchestrator that owns the I/O and publishes
//!   snapshots on a watch channel
//!
//! # Event flow
//!
//! 1. `LiveFeed::open` closes any previous subscription, subscribes
//!    for the new context, and starts the bulk fetch
//! 2. Changes arriving before the fetch completes are buffered
//! 3. The fetch result seeds the session, buffered changes drain
//! 4. From then on each change is decoded, routed, and applied,
//!    and every visible change publishes a fresh snapshot
//!
//! # Example
//!
//! ```no_run
//! use nyumba_feed::{FeedConfig, FilterContext, LiveFeed};
//! use nyumba_feed::source::mock::MockSource;
//! use nyumba_types::CountryCode;
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let source = Arc::new(MockSource::new());
//! let mut feed = LiveFeed::new(source, FeedConfig::default());
//!
//! let abidjan = FilterContext::active(CountryCode::parse("CI")?);
//! feed.open(abidjan).await?;
//!
//! let snapshot = feed.snapshot();
//! println!("{} listings visible", snapshot.listings.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod context;
mod error;
mod router;
mod session;
pub mod source;
mod visible;
pub mod wire;

pub use client::{FeedSnapshot, LiveFeed};
pub use context::FilterContext;
pub use error::{FeedError, FeedResult};
pub use router::{Instruction, route};
pub use session::{FeedConfig, FeedPhase, FeedSession};
pub use source::{CloseHandle, ListingSource, Subscription, SubscriptionId};
pub use visible::VisibleListings;
pub use wire::{RowChange, WireError, decode};
