//! Logical switch port identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A fixed-index logical switch port.
///
/// Ports are numbered `0..N` where `N` is fixed when the switch state is
/// constructed. The upper bound is not encoded in the type; the switch
/// state validates it, since only the aggregate knows `N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PortId(u16);

impl PortId {
    /// Creates a new port ID.
    pub const fn new(id: u16) -> Self {
        PortId(id)
    }

    /// Returns the port ID as a u16.
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns the port ID as a `usize`, for indexing port vectors.
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for PortId {
    fn from(id: u16) -> Self {
        PortId(id)
    }
}

impl From<PortId> for u16 {
    fn from(port: PortId) -> u16 {
        port.0
    }
}
