//! Shared switch state for the vbridge userspace switch.
//!
//! One [`SwitchState`] aggregate owns the three tables the bridge runs on:
//! VLAN membership, the forwarding database, and the per-port PVID map. The
//! data plane learns into it while the management facade configures it, so
//! every access goes through a single readers-writer lock.

mod fdb;
mod switch_state;

pub use fdb::{FdbKey, MacLearnOutcome};
pub use switch_state::SwitchState;
