//! Common types for the vbridge userspace switch.
//!
//! This crate provides type-safe representations of the primitives shared
//! between the switch state, the management facade, and the data plane:
//!
//! - [`MacAddress`]: 48-bit Ethernet MAC addresses
//! - [`VlanId`]: 12-bit-range VLAN identifiers
//! - [`PortId`]: fixed-index logical switch ports

mod mac;
mod port;
mod vlan;

pub use mac::MacAddress;
pub use port::PortId;
pub use vlan::VlanId;

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid MAC address format: {0}")]
    InvalidMacAddress(String),

    #[error("invalid VLAN ID: {0} (must be 0-4095)")]
    InvalidVlanId(u16),
}
