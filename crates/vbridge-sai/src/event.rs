//! Forwarding-database event notification payloads.
//!
//! The data plane reports learning results through the facade, which turns
//! each one into an [`FdbEventData`] and invokes the callback registered at
//! switch creation exactly once per event.

use std::fmt;
use std::sync::Arc;

use crate::types::ObjectId;

/// FDB event type.
///
/// This revision emits `Learned` and `Move`; `Aged` and `Flushed` are API
/// vocabulary for callers that match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FdbEvent {
    Learned,
    Aged,
    Move,
    Flushed,
}

impl fmt::Display for FdbEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FdbEvent::Learned => "LEARNED",
            FdbEvent::Aged => "AGED",
            FdbEvent::Move => "MOVE",
            FdbEvent::Flushed => "FLUSHED",
        };
        write!(f, "{}", s)
    }
}

/// How an FDB entry came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FdbEntryType {
    Dynamic,
    Static,
}

/// Attribute attached to an FDB event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FdbEntryAttr {
    /// Origin of the entry; always [`FdbEntryType::Dynamic`] in this revision.
    EntryType(FdbEntryType),
    /// Encoded bridge-port handle of the learning port.
    BridgePortId(ObjectId),
}

/// One forwarding-database event as delivered to the notification callback.
#[derive(Debug, Clone)]
pub struct FdbEventData {
    /// What happened to the entry.
    pub event: FdbEvent,
    /// The learned MAC, raw bytes in wire order.
    pub mac: [u8; 6],
    /// Encoded VLAN handle the entry is scoped to.
    pub bv_id: ObjectId,
    /// Switch identifier; null in this revision.
    pub switch_id: ObjectId,
    /// Entry-type marker and bridge-port handle.
    pub attrs: Vec<FdbEntryAttr>,
}

/// Callback invoked with a batch of FDB events.
///
/// The facade currently delivers one event per invocation, but the slice
/// signature matches the vendor contract of `(count, events)`.
pub type FdbEventCallback = Arc<dyn Fn(&[FdbEventData]) + Send + Sync>;
