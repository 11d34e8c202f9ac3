//! The management API surface.
//!
//! [`Sai`] is the facade handle constructed once at process start and
//! shared by the management thread (which configures through the API
//! tables) and the data plane (which reports learning results through
//! [`Sai::notify_fdb_event`]). External callers obtain API tables through
//! [`Sai::api_query`], keyed by API family; unknown families return
//! *not supported*.

pub mod switch;
pub mod vlan;

pub use switch::{SwitchApi, SwitchAttr};
pub use vlan::{TaggingMode, VlanApi, VlanAttr, VlanMemberAttr};

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;
use vbridge_state::SwitchState;
use vbridge_types::{MacAddress, PortId, VlanId};

use crate::error::{SaiError, SaiResult};
use crate::event::{FdbEntryAttr, FdbEntryType, FdbEvent, FdbEventCallback, FdbEventData};
use crate::types::{ObjectId, ObjectType};

/// API families addressable through [`Sai::api_query`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiFamily {
    Switch,
    Port,
    Vlan,
    Fdb,
}

/// An API table resolved by [`Sai::api_query`].
pub enum Api {
    Switch(SwitchApi),
    Vlan(VlanApi),
}

impl std::fmt::Debug for Api {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Api::Switch(_) => f.write_str("Api::Switch"),
            Api::Vlan(_) => f.write_str("Api::Vlan"),
        }
    }
}

/// State shared by the facade handle and its API tables.
pub(crate) struct Shared {
    pub(crate) state: Arc<SwitchState>,
    switch: Mutex<SwitchSlot>,
}

/// The one-shot switch registration.
#[derive(Default)]
pub(crate) struct SwitchSlot {
    pub(crate) switch_id: Option<ObjectId>,
    pub(crate) fdb_event_cb: Option<FdbEventCallback>,
}

impl Shared {
    pub(crate) fn switch_slot(&self) -> MutexGuard<'_, SwitchSlot> {
        self.switch.lock().expect("switch slot lock poisoned")
    }
}

/// The switch-abstraction facade.
///
/// Cheap to clone; all clones share the same switch registration and
/// underlying switch state.
#[derive(Clone)]
pub struct Sai {
    shared: Arc<Shared>,
}

impl Sai {
    /// Creates a facade over the given switch state.
    pub fn new(state: Arc<SwitchState>) -> Self {
        Sai {
            shared: Arc::new(Shared {
                state,
                switch: Mutex::new(SwitchSlot::default()),
            }),
        }
    }

    /// Resolves the API table for `family`.
    ///
    /// Only the switch and VLAN families are implemented in this revision.
    pub fn api_query(&self, family: ApiFamily) -> SaiResult<Api> {
        match family {
            ApiFamily::Switch => Ok(Api::Switch(self.switch_api())),
            ApiFamily::Vlan => Ok(Api::Vlan(self.vlan_api())),
            other => Err(SaiError::not_supported(format!("{:?} API", other))),
        }
    }

    /// Returns the switch API table.
    pub fn switch_api(&self) -> SwitchApi {
        SwitchApi::new(self.shared.clone())
    }

    /// Returns the VLAN API table.
    pub fn vlan_api(&self) -> VlanApi {
        VlanApi::new(self.shared.clone())
    }

    /// Delivers one forwarding-database event to the registered callback.
    ///
    /// Invoked by the data plane after a learn or a move. Silently a no-op
    /// when no switch has been created or no callback was registered.
    pub fn notify_fdb_event(&self, event: FdbEvent, vlan: VlanId, mac: MacAddress, port: PortId) {
        let callback = self.shared.switch_slot().fdb_event_cb.clone();
        let Some(callback) = callback else {
            debug!(%event, %vlan, %mac, %port, "no fdb event callback registered");
            return;
        };

        let data = FdbEventData {
            event,
            mac: *mac.as_bytes(),
            bv_id: ObjectId::encode(ObjectType::Vlan, vlan.as_u16() as u64),
            switch_id: ObjectId::NULL,
            attrs: vec![
                FdbEntryAttr::EntryType(FdbEntryType::Dynamic),
                FdbEntryAttr::BridgePortId(ObjectId::encode(
                    ObjectType::BridgePort,
                    port.as_u16() as u64,
                )),
            ],
        };
        callback(std::slice::from_ref(&data));
    }
}
