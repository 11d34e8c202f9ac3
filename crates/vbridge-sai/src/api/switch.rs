//! Switch API table.

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use crate::api::Shared;
use crate::error::{SaiError, SaiResult};
use crate::event::FdbEventCallback;
use crate::types::{ObjectId, ObjectType};

/// Attributes recognized by [`SwitchApi::create_switch`].
#[derive(Clone)]
pub enum SwitchAttr {
    /// Callback to receive forwarding-database events.
    FdbEventNotify(FdbEventCallback),
}

impl fmt::Debug for SwitchAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitchAttr::FdbEventNotify(_) => f.write_str("FdbEventNotify(..)"),
        }
    }
}

/// Switch-level API table.
pub struct SwitchApi {
    shared: Arc<Shared>,
}

impl SwitchApi {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        SwitchApi { shared }
    }

    /// Creates the switch.
    ///
    /// One-shot: the first call allocates a pseudo-random switch handle,
    /// stores the FDB event callback if one was supplied, and succeeds.
    /// Every subsequent call fails and leaves the stored handle and
    /// callback untouched. Omitting the callback silently disables
    /// notifications.
    pub fn create_switch(&self, attrs: &[SwitchAttr]) -> SaiResult<ObjectId> {
        let mut slot = self.shared.switch_slot();

        if let Some(existing) = slot.switch_id {
            warn!(switch_id = %existing, "switch already created");
            return Err(SaiError::AlreadyExists { item: "switch" });
        }

        let callback = attrs.iter().find_map(|attr| match attr {
            SwitchAttr::FdbEventNotify(cb) => Some(cb.clone()),
        });

        let switch_id = ObjectId::encode(ObjectType::Switch, rand::random::<u64>());
        slot.switch_id = Some(switch_id);
        let notify = callback.is_some();
        slot.fdb_event_cb = callback;

        info!(%switch_id, notify, "switch created");
        Ok(switch_id)
    }
}
