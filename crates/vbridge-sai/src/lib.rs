//! Vendor-style switch abstraction facade for the vbridge userspace switch.
//!
//! This crate presents the management plane's view of the bridge: a small
//! SAI-flavoured API surface that configures VLANs and port memberships in
//! the shared switch state and delivers forwarding-database events back to
//! the registered callback.
//!
//! # Architecture
//!
//! - [`types`]: Opaque object identifiers (type tag + 48-bit index)
//! - [`error`]: SAI-style status codes and structured errors
//! - [`event`]: FDB event notification payloads and the callback type
//! - [`api`]: The API router and the switch/VLAN API tables
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use vbridge_sai::{Api, ApiFamily, Sai, VlanAttr};
//! use vbridge_state::SwitchState;
//!
//! let sai = Sai::new(Arc::new(SwitchState::new(4)));
//! sai.switch_api().create_switch(&[]).unwrap();
//!
//! let Ok(Api::Vlan(vlan_api)) = sai.api_query(ApiFamily::Vlan) else {
//!     unreachable!("VLAN API is always available");
//! };
//! let handle = vlan_api.create_vlan(&[VlanAttr::VlanId(73)]).unwrap();
//! assert_eq!(handle.as_raw(), 0x0003_0000_0000_0049);
//! ```

pub mod api;
pub mod error;
pub mod event;
pub mod types;

pub use api::{Api, ApiFamily, Sai, SwitchApi, SwitchAttr, TaggingMode, VlanApi, VlanAttr,
    VlanMemberAttr};
pub use error::{SaiError, SaiResult, SaiStatus};
pub use event::{FdbEntryAttr, FdbEntryType, FdbEvent, FdbEventCallback, FdbEventData};
pub use types::{ObjectId, ObjectType};
