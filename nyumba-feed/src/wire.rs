//! Wire format for realtime row changes.
//!
//! The backend's realtime channel delivers row changes as JSON envelopes:
//!
//! ```json
//! { "eventType": "INSERT", "new": { ...row }, "old": null }
//! { "eventType": "UPDATE", "new": { ...row }, "old": { "id": "..." } }
//! { "eventType": "DELETE", "new": null,      "old": { "id": "..." } }
//! ```
//!
//! `decode` turns an envelope into a typed [`ListingEvent`] or reports
//! exactly what was wrong with it. Malformed envelopes are dropped by
//! the caller with a diagnostic; they never reach the reconciler.

use nyumba_types::{ChangeKind, ListingEvent, ListingId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while decoding a row-change envelope.
#[derive(Debug, Error)]
pub enum WireError {
    /// The envelope's `eventType` is not INSERT, UPDATE, or DELETE.
    #[error("unknown event type: {0:?}")]
    UnknownEvent(String),

    /// The row in the envelope has no usable `id` field.
    #[error("change record has no id")]
    MissingId,

    /// INSERT/UPDATE envelope without a `new` record.
    #[error("change record missing for {0}")]
    MissingRecord(ChangeKind),

    /// The row was present but did not deserialize as a listing.
    #[error("malformed listing record: {0}")]
    Record(#[from] serde_json::Error),
}

/// A raw row-change envelope as delivered by the realtime channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowChange {
    /// `INSERT`, `UPDATE`, or `DELETE`.
    #[serde(rename = "eventType")]
    pub event_type: String,

    /// Row state after the change. Absent for DELETE.
    #[serde(default)]
    pub new: Option<Value>,

    /// Identifying fields of the row before the change. Absent for INSERT.
    #[serde(default)]
    pub old: Option<Value>,
}

impl RowChange {
    /// Builds an INSERT envelope from a row value.
    #[must_use]
    pub fn insert(row: Value) -> Self {
        Self {
            event_type: "INSERT".into(),
            new: Some(row),
            old: None,
        }
    }

    /// Builds an UPDATE envelope from a row value.
    #[must_use]
    pub fn update(row: Value) -> Self {
        Self {
            event_type: "UPDATE".into(),
            new: Some(row),
            old: None,
        }
    }

    /// Builds a DELETE envelope carrying only the old row's id.
    #[must_use]
    pub fn delete(id: &ListingId) -> Self {
        Self {
            event_type: "DELETE".into(),
            new: None,
            old: Some(serde_json::json!({ "id": id.as_str() })),
        }
    }
}

/// Decodes a row-change envelope into a typed listing event.
///
/// INSERT and UPDATE require a full row under `new`; DELETE only needs
/// an id, taken from `old` (falling back to `new` for backends that
/// populate both).
pub fn decode(change: RowChange) -> Result<ListingEvent, WireError> {
    let kind = ChangeKind::from_str(&change.event_type)
        .map_err(|_| WireError::UnknownEvent(change.event_type.clone()))?;

    match kind {
        ChangeKind::Insert | ChangeKind::Update => {
            let row = change.new.ok_or(WireError::MissingRecord(kind))?;
            // Reject id-less rows before full deserialization so the
            // diagnostic names the actual problem.
            extract_id(&row)?;
            let listing = serde_json::from_value(row)?;
            Ok(match kind {
                ChangeKind::Insert => ListingEvent::insert(listing),
                _ => ListingEvent::update(listing),
            })
        }
        ChangeKind::Delete => {
            let id = change
                .old
                .as_ref()
                .and_then(|row| extract_id(row).ok())
                .or_else(|| change.new.as_ref().and_then(|row| extract_id(row).ok()))
                .ok_or(WireError::MissingId)?;
            Ok(ListingEvent::delete(id))
        }
    }
}

fn extract_id(row: &Value) -> Result<ListingId, WireError> {
    match row.get("id").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => Ok(ListingId::new(id)),
        _ => Err(WireError::MissingId),
    }
}
