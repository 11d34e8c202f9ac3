//! vbridged - userspace VLAN-aware learning bridge.
//!
//! The daemon attaches one raw packet socket per logical port, classifies
//! received frames into a VLAN by ingress-port PVID, learns source-MAC
//! bindings into the shared switch state, and forwards by FDB lookup or
//! VLAN-scoped flood. A management thread configures VLANs through the
//! switch-abstraction facade and receives learning notifications.

pub mod config;
pub mod dataplane;
pub mod error;
pub mod frame;
pub mod mgmt;
pub mod port;

pub use dataplane::DataPlane;
pub use error::{Error, Result};
pub use port::{AfPacketSocket, FramePort};
