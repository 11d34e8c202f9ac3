//! Build-time configuration of the bridge.
//!
//! There is no CLI surface and no configuration file; the constants here
//! are fixed when the daemon is built.

/// Number of switch ports. One raw socket is bound per port.
pub const NUM_SWITCH_PORTS: u16 = 4;

/// Prefix of the host interfaces the ports bind to (`veth0`, `veth1`, ...).
/// The interfaces must exist before the daemon starts.
pub const IF_PREFIX: &str = "veth";

/// Size of the reusable receive buffer. Frames larger than this are
/// truncated by the kernel.
pub const MAX_FRAME_LEN: usize = 2048;

/// Readiness-poll timeout in milliseconds. A timed-out poll is a no-op.
pub const POLL_TIMEOUT_MS: u16 = 1000;

/// VLAN configured by the management plane at startup.
pub const MGMT_VLAN: u16 = 73;

/// Ports the management plane adds to [`MGMT_VLAN`].
pub const MGMT_VLAN_MEMBERS: [u16; 3] = [0, 1, 3];
