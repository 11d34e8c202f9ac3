//! The management-plane thread.
//!
//! Configures the bridge through the switch-abstraction facade the way an
//! external controller would: query the API tables, create the switch with
//! a learning-event callback, then set up the startup VLAN and its member
//! ports. Afterwards the thread only wakes to log delivered FDB events.

use std::sync::Arc;
use std::thread;

use tracing::{error, info, warn};

use vbridge_sai::{
    Api, ApiFamily, FdbEventCallback, FdbEventData, ObjectId, ObjectType, Sai, SwitchAttr,
    TaggingMode, VlanAttr, VlanMemberAttr,
};
use vbridge_types::MacAddress;

use crate::config::{MGMT_VLAN, MGMT_VLAN_MEMBERS};

/// Management-plane thread body. Parks forever after initialization.
pub fn run(sai: Sai) {
    info!("initializing management plane");

    let Ok(Api::Switch(switch_api)) = sai.api_query(ApiFamily::Switch) else {
        error!("switch API unavailable");
        return;
    };
    let Ok(Api::Vlan(vlan_api)) = sai.api_query(ApiFamily::Vlan) else {
        error!("VLAN API unavailable");
        return;
    };

    let callback: FdbEventCallback = Arc::new(log_fdb_events);
    match switch_api.create_switch(&[SwitchAttr::FdbEventNotify(callback)]) {
        Ok(switch_id) => info!(%switch_id, "switch created"),
        Err(error) => {
            error!(%error, status = %error.status(), "switch creation failed");
            return;
        }
    }

    let vlan_handle = match vlan_api.create_vlan(&[VlanAttr::VlanId(MGMT_VLAN)]) {
        Ok(handle) => handle,
        Err(error) => {
            error!(vlan = MGMT_VLAN, %error, status = %error.status(), "vlan creation failed");
            return;
        }
    };
    info!(vlan = MGMT_VLAN, handle = %vlan_handle, "vlan created");

    for port in MGMT_VLAN_MEMBERS {
        let result = vlan_api.create_vlan_member(&[
            VlanMemberAttr::VlanId(vlan_handle),
            VlanMemberAttr::BridgePortId(ObjectId::encode(ObjectType::BridgePort, port as u64)),
            VlanMemberAttr::TaggingMode(TaggingMode::Untagged),
        ]);
        match result {
            Ok(member) => info!(port, vlan = MGMT_VLAN, %member, "vlan member added"),
            Err(error) => {
                warn!(port, vlan = MGMT_VLAN, %error, status = %error.status(),
                    "vlan member add failed")
            }
        }
    }

    info!("management plane initialization complete");

    // Nothing left to do; FDB events arrive on the notifying thread.
    loop {
        thread::park();
    }
}

/// Learning-event sink registered at switch creation.
fn log_fdb_events(events: &[FdbEventData]) {
    info!(count = events.len(), "fdb event notification");
    for event in events {
        info!(
            event = %event.event,
            mac = %MacAddress::new(event.mac),
            bv_id = %event.bv_id,
            switch = %event.switch_id,
            attrs = event.attrs.len(),
            "fdb event"
        );
    }
}
