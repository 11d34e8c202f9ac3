//! VLAN API table.

use std::sync::Arc;

use tracing::info;
use vbridge_types::{PortId, VlanId};

use crate::api::Shared;
use crate::error::{SaiError, SaiResult};
use crate::types::{ObjectId, ObjectType};

/// VLAN tagging mode of a member port.
///
/// Recorded but not acted upon: frames are carried untagged on the wire
/// and the VLAN is derived from the ingress port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaggingMode {
    Tagged,
    Untagged,
}

/// Attributes recognized by [`VlanApi::create_vlan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VlanAttr {
    /// The VLAN identifier. Mandatory.
    VlanId(u16),
}

/// Attributes recognized by [`VlanApi::create_vlan_member`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VlanMemberAttr {
    /// Encoded VLAN handle.
    VlanId(ObjectId),
    /// Encoded bridge-port handle.
    BridgePortId(ObjectId),
    /// Tagging mode of the member.
    TaggingMode(TaggingMode),
}

/// VLAN-level API table.
pub struct VlanApi {
    shared: Arc<Shared>,
}

impl VlanApi {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        VlanApi { shared }
    }

    /// Fails with `Uninitialized` until the switch has been created.
    fn require_switch(&self) -> SaiResult<()> {
        if self.shared.switch_slot().switch_id.is_none() {
            return Err(SaiError::Uninitialized);
        }
        Ok(())
    }

    /// Creates a VLAN.
    ///
    /// The switch must exist first. The attribute list must name the VLAN
    /// identifier; otherwise the call fails with a
    /// mandatory-attribute-missing error and has no effect. Returns the
    /// encoded VLAN handle.
    pub fn create_vlan(&self, attrs: &[VlanAttr]) -> SaiResult<ObjectId> {
        self.require_switch()?;

        let raw = attrs
            .iter()
            .find_map(|attr| match attr {
                VlanAttr::VlanId(v) => Some(*v),
            })
            .ok_or(SaiError::MandatoryAttributeMissing {
                attribute: "vlan_id",
            })?;

        let vlan = VlanId::new(raw).map_err(|e| SaiError::invalid_parameter(e.to_string()))?;
        self.shared.state.create_vlan(vlan);

        info!(%vlan, "vlan created");
        Ok(ObjectId::encode(ObjectType::Vlan, vlan.as_u16() as u64))
    }

    /// Adds a port to a VLAN.
    ///
    /// The switch must exist first. Consumes the VLAN handle, the
    /// bridge-port handle, and the tagging mode, reducing each handle to
    /// its low-order identifier. Membership is recorded in the switch
    /// state (which silently drops the call if the VLAN was never
    /// created). Returns the encoded VLAN-member handle.
    pub fn create_vlan_member(&self, attrs: &[VlanMemberAttr]) -> SaiResult<ObjectId> {
        self.require_switch()?;

        let mut vlan_index: u64 = 0;
        let mut port_index: u64 = 0;
        let mut tagged = false;

        for attr in attrs {
            match attr {
                VlanMemberAttr::VlanId(oid) => vlan_index = oid.index(),
                VlanMemberAttr::BridgePortId(oid) => port_index = oid.index(),
                VlanMemberAttr::TaggingMode(mode) => tagged = *mode == TaggingMode::Tagged,
            }
        }

        let vlan = VlanId::new((vlan_index & 0xFFFF) as u16)
            .map_err(|e| SaiError::invalid_parameter(e.to_string()))?;
        let port = PortId::new((port_index & 0xFFFF) as u16);

        self.shared.state.add_vlan_member(vlan, port, tagged);

        info!(%vlan, %port, tagged, "vlan member added");
        Ok(ObjectId::encode(ObjectType::VlanMember, port.index() as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Sai;
    use pretty_assertions::assert_eq;
    use vbridge_state::SwitchState;

    fn sai_with_state() -> (Sai, Arc<SwitchState>) {
        let state = Arc::new(SwitchState::new(4));
        let sai = Sai::new(state.clone());
        sai.switch_api().create_switch(&[]).unwrap();
        (sai, state)
    }

    #[test]
    fn test_vlan_calls_before_switch_creation_are_uninitialized() {
        let sai = Sai::new(Arc::new(SwitchState::new(4)));
        let api = sai.vlan_api();

        let err = api.create_vlan(&[VlanAttr::VlanId(73)]).unwrap_err();
        assert!(matches!(err, SaiError::Uninitialized));

        let err = api.create_vlan_member(&[]).unwrap_err();
        assert!(matches!(err, SaiError::Uninitialized));
    }

    #[test]
    fn test_create_vlan_returns_encoded_handle() {
        let (sai, state) = sai_with_state();
        let handle = sai.vlan_api().create_vlan(&[VlanAttr::VlanId(73)]).unwrap();

        assert_eq!(handle.as_raw(), 0x0003_0000_0000_0049);
        assert_eq!(
            state.get_vlan_members(VlanId::new(73).unwrap()),
            Some(vec![])
        );
    }

    #[test]
    fn test_create_vlan_without_id_is_mandatory_missing() {
        let (sai, state) = sai_with_state();
        let err = sai.vlan_api().create_vlan(&[]).unwrap_err();
        assert!(matches!(err, SaiError::MandatoryAttributeMissing { .. }));
        assert!(state.dump_fdb().is_empty());
    }

    #[test]
    fn test_create_vlan_out_of_range_is_invalid_parameter() {
        let (sai, _state) = sai_with_state();
        let err = sai.vlan_api().create_vlan(&[VlanAttr::VlanId(4096)]).unwrap_err();
        assert!(matches!(err, SaiError::InvalidParameter { .. }));
    }

    #[test]
    fn test_create_vlan_member_records_membership_and_pvid() {
        let (sai, state) = sai_with_state();
        let api = sai.vlan_api();

        let vlan_handle = api.create_vlan(&[VlanAttr::VlanId(73)]).unwrap();
        let member = api
            .create_vlan_member(&[
                VlanMemberAttr::VlanId(vlan_handle),
                VlanMemberAttr::BridgePortId(ObjectId::encode(ObjectType::BridgePort, 1)),
                VlanMemberAttr::TaggingMode(TaggingMode::Untagged),
            ])
            .unwrap();

        assert_eq!(member.object_type(), Some(ObjectType::VlanMember));
        assert_eq!(member.index(), 1);

        let vlan = VlanId::new(73).unwrap();
        assert_eq!(state.get_vlan_members(vlan), Some(vec![PortId::new(1)]));
        assert_eq!(state.get_port_pvid(PortId::new(1)), Some(vlan));
    }

    #[test]
    fn test_create_vlan_member_for_unknown_vlan_is_dropped() {
        let (sai, state) = sai_with_state();

        // The original contract: membership for a VLAN that was never
        // created is silently dropped, but the call still succeeds.
        let member = sai
            .vlan_api()
            .create_vlan_member(&[
                VlanMemberAttr::VlanId(ObjectId::encode(ObjectType::Vlan, 99)),
                VlanMemberAttr::BridgePortId(ObjectId::encode(ObjectType::BridgePort, 0)),
                VlanMemberAttr::TaggingMode(TaggingMode::Untagged),
            ])
            .unwrap();

        assert_eq!(member.object_type(), Some(ObjectType::VlanMember));
        assert_eq!(state.get_vlan_members(VlanId::new(99).unwrap()), None);
    }
}
