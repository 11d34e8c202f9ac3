//! The central in-memory switch model.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::RwLock;

use tracing::debug;
use vbridge_types::{MacAddress, PortId, VlanId};

use crate::fdb::{FdbKey, MacLearnOutcome};

#[derive(Debug, Default)]
struct Tables {
    /// VLAN -> member ports, in insertion order.
    vlan_members: BTreeMap<VlanId, Vec<PortId>>,
    /// (VLAN, MAC) -> egress port.
    fdb: BTreeMap<FdbKey, PortId>,
    /// Port -> PVID.
    port_pvid: BTreeMap<PortId, VlanId>,
}

/// Central in-memory model for VLAN membership, the forwarding database,
/// and port PVIDs.
///
/// The aggregate is shared between the data-plane thread (which learns and
/// looks up) and the management thread (which configures). All access is
/// mediated by one readers-writer lock; no operation holds it beyond the
/// duration of a single call.
///
/// Out-of-range ports are programming errors and panic: the callers are
/// trusted in-process components. Absence of a key is a normal return
/// value, never an error.
#[derive(Debug)]
pub struct SwitchState {
    num_ports: u16,
    tables: RwLock<Tables>,
}

impl SwitchState {
    /// Creates an empty switch state for a switch with `num_ports` ports.
    ///
    /// The port count is immutable for the lifetime of the aggregate.
    pub fn new(num_ports: u16) -> Self {
        SwitchState {
            num_ports,
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Returns the number of ports of this switch.
    pub fn num_ports(&self) -> u16 {
        self.num_ports
    }

    /// Clears all three tables.
    pub fn reset(&self) {
        let mut tables = self.write_tables();
        tables.vlan_members.clear();
        tables.fdb.clear();
        tables.port_pvid.clear();
    }

    /// Creates a VLAN with zero members if it does not already exist.
    ///
    /// Idempotent: re-creating an existing VLAN never shrinks or clears its
    /// membership.
    pub fn create_vlan(&self, vlan: VlanId) {
        let mut tables = self.write_tables();
        tables.vlan_members.entry(vlan).or_default();
    }

    /// Appends `port` to the member list of `vlan` and records the port's
    /// PVID (last writer wins).
    ///
    /// If the VLAN does not exist the call has no effect; it does not
    /// create one. The `tagged` flag is accepted but not acted upon in this
    /// revision.
    pub fn add_vlan_member(&self, vlan: VlanId, port: PortId, _tagged: bool) {
        self.assert_port(port);

        let mut tables = self.write_tables();
        if let Some(members) = tables.vlan_members.get_mut(&vlan) {
            members.push(port);
            tables.port_pvid.insert(port, vlan);
        }
    }

    /// Returns a snapshot copy of the member list of `vlan`, or `None` if
    /// the VLAN is unknown (distinct from a known-empty VLAN).
    pub fn get_vlan_members(&self, vlan: VlanId) -> Option<Vec<PortId>> {
        self.read_tables().vlan_members.get(&vlan).cloned()
    }

    /// Learns or refreshes the binding of `(vlan, mac)` to `port`.
    ///
    /// Three-way outcome: a fresh insert reports [`MacLearnOutcome::Learned`],
    /// a port change overwrites the entry and reports
    /// [`MacLearnOutcome::Moved`], and a confirming re-learn reports
    /// [`MacLearnOutcome::Unchanged`].
    pub fn learn_mac(&self, vlan: VlanId, mac: MacAddress, port: PortId) -> MacLearnOutcome {
        self.assert_port(port);

        use std::collections::btree_map::Entry;

        let key = FdbKey::new(vlan, mac);
        let mut tables = self.write_tables();
        match tables.fdb.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(port);
                debug!(%vlan, %mac, %port, "fdb entry learned");
                MacLearnOutcome::Learned
            }
            Entry::Occupied(mut entry) if *entry.get() != port => {
                let from = *entry.get();
                entry.insert(port);
                debug!(%vlan, %mac, %from, to = %port, "fdb entry moved");
                MacLearnOutcome::Moved
            }
            Entry::Occupied(_) => MacLearnOutcome::Unchanged,
        }
    }

    /// Point query of the forwarding database.
    pub fn lookup_fdb(&self, vlan: VlanId, mac: MacAddress) -> Option<PortId> {
        let key = FdbKey::new(vlan, mac);
        self.read_tables().fdb.get(&key).copied()
    }

    /// Returns a snapshot copy of the entire forwarding database.
    pub fn dump_fdb(&self) -> BTreeMap<FdbKey, PortId> {
        self.read_tables().fdb.clone()
    }

    /// Returns the PVID configured for `port`, if any.
    pub fn get_port_pvid(&self, port: PortId) -> Option<VlanId> {
        self.assert_port(port);
        self.read_tables().port_pvid.get(&port).copied()
    }

    /// Renders the forwarding database one line per entry, ordered by the
    /// composite key (VLAN major, MAC minor):
    ///
    /// ```text
    /// vlan=73 mac=02:00:00:00:00:aa port=1
    /// ```
    pub fn tostring_fdb(&self) -> String {
        let tables = self.read_tables();

        let mut out = String::with_capacity(tables.fdb.len() * 40);
        for (key, port) in &tables.fdb {
            // Writing to a String cannot fail.
            let _ = writeln!(out, "{} port={}", key, port);
        }
        out
    }

    fn assert_port(&self, port: PortId) {
        assert!(
            port.as_u16() < self.num_ports,
            "port {} out of range (switch has {} ports)",
            port,
            self.num_ports
        );
    }

    fn read_tables(&self) -> std::sync::RwLockReadGuard<'_, Tables> {
        self.tables.read().expect("switch state lock poisoned")
    }

    fn write_tables(&self) -> std::sync::RwLockWriteGuard<'_, Tables> {
        self.tables.write().expect("switch state lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const N: u16 = 4;

    fn state() -> SwitchState {
        SwitchState::new(N)
    }

    fn vlan(v: u16) -> VlanId {
        VlanId::new(v).unwrap()
    }

    fn mac(s: &str) -> MacAddress {
        s.parse().unwrap()
    }

    #[test]
    fn test_create_vlan_idempotent() {
        let st = state();
        st.create_vlan(vlan(73));
        st.add_vlan_member(vlan(73), PortId::new(0), false);
        st.add_vlan_member(vlan(73), PortId::new(1), false);

        // Re-creating must not shrink or clear the membership.
        st.create_vlan(vlan(73));
        assert_eq!(
            st.get_vlan_members(vlan(73)),
            Some(vec![PortId::new(0), PortId::new(1)])
        );
    }

    #[test]
    fn test_empty_vlan_vs_unknown_vlan() {
        let st = state();
        st.create_vlan(vlan(10));
        assert_eq!(st.get_vlan_members(vlan(10)), Some(vec![]));
        assert_eq!(st.get_vlan_members(vlan(11)), None);
    }

    #[test]
    fn test_add_member_to_unknown_vlan_is_dropped() {
        let st = state();
        st.add_vlan_member(vlan(5), PortId::new(0), false);
        assert_eq!(st.get_vlan_members(vlan(5)), None);
        // The dropped call must not record a PVID either.
        assert_eq!(st.get_port_pvid(PortId::new(0)), None);
    }

    #[test]
    fn test_member_order_and_duplicates_preserved() {
        let st = state();
        st.create_vlan(vlan(73));
        st.add_vlan_member(vlan(73), PortId::new(3), false);
        st.add_vlan_member(vlan(73), PortId::new(0), false);
        st.add_vlan_member(vlan(73), PortId::new(3), false);
        assert_eq!(
            st.get_vlan_members(vlan(73)),
            Some(vec![PortId::new(3), PortId::new(0), PortId::new(3)])
        );
    }

    #[test]
    fn test_pvid_last_writer_wins() {
        let st = state();
        st.create_vlan(vlan(10));
        st.create_vlan(vlan(20));
        st.add_vlan_member(vlan(10), PortId::new(2), false);
        st.add_vlan_member(vlan(20), PortId::new(2), true);
        assert_eq!(st.get_port_pvid(PortId::new(2)), Some(vlan(20)));
    }

    #[test]
    fn test_learning_idempotence() {
        let st = state();
        let m = mac("02:00:00:00:00:01");

        assert_eq!(
            st.learn_mac(vlan(1), m, PortId::new(0)),
            MacLearnOutcome::Learned
        );
        assert_eq!(
            st.learn_mac(vlan(1), m, PortId::new(0)),
            MacLearnOutcome::Unchanged
        );
        assert_eq!(st.lookup_fdb(vlan(1), m), Some(PortId::new(0)));
    }

    #[test]
    fn test_move_exclusivity() {
        let st = state();
        let m = mac("02:00:00:00:00:01");

        assert_eq!(
            st.learn_mac(vlan(1), m, PortId::new(0)),
            MacLearnOutcome::Learned
        );
        assert_eq!(
            st.learn_mac(vlan(1), m, PortId::new(2)),
            MacLearnOutcome::Moved
        );
        assert_eq!(st.lookup_fdb(vlan(1), m), Some(PortId::new(2)));
    }

    #[test]
    fn test_vlan_isolation() {
        let st = state();
        let m = mac("02:00:00:00:00:01");

        st.learn_mac(vlan(1), m, PortId::new(0));
        assert_eq!(st.lookup_fdb(vlan(2), m), None);

        // A move in one VLAN leaves the other VLAN's binding alone.
        st.learn_mac(vlan(2), m, PortId::new(3));
        st.learn_mac(vlan(1), m, PortId::new(1));
        assert_eq!(st.lookup_fdb(vlan(2), m), Some(PortId::new(3)));
    }

    #[test]
    fn test_dump_is_a_snapshot() {
        let st = state();
        st.learn_mac(vlan(1), mac("02:00:00:00:00:01"), PortId::new(0));
        let snapshot = st.dump_fdb();

        st.learn_mac(vlan(1), mac("02:00:00:00:00:02"), PortId::new(1));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(st.dump_fdb().len(), 2);
    }

    #[test]
    fn test_tostring_fdb_sorted_and_formatted() {
        let st = state();
        // Inserted out of order on purpose.
        st.learn_mac(vlan(73), mac("02:00:00:00:00:aa"), PortId::new(1));
        st.learn_mac(vlan(1), mac("02:00:00:00:00:02"), PortId::new(2));
        st.learn_mac(vlan(1), mac("02:00:00:00:00:01"), PortId::new(0));

        assert_eq!(
            st.tostring_fdb(),
            "vlan=1 mac=02:00:00:00:00:01 port=0\n\
             vlan=1 mac=02:00:00:00:00:02 port=2\n\
             vlan=73 mac=02:00:00:00:00:aa port=1\n"
        );
    }

    #[test]
    fn test_tostring_fdb_empty() {
        assert_eq!(state().tostring_fdb(), "");
    }

    #[test]
    fn test_reset_clears_everything() {
        let st = state();
        st.create_vlan(vlan(73));
        st.add_vlan_member(vlan(73), PortId::new(0), false);
        st.learn_mac(vlan(73), mac("02:00:00:00:00:01"), PortId::new(0));

        st.reset();
        assert_eq!(st.get_vlan_members(vlan(73)), None);
        assert_eq!(st.get_port_pvid(PortId::new(0)), None);
        assert!(st.dump_fdb().is_empty());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_learn_out_of_range_port_panics() {
        state().learn_mac(vlan(1), mac("02:00:00:00:00:01"), PortId::new(N));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_add_member_out_of_range_port_panics() {
        let st = state();
        st.create_vlan(vlan(1));
        st.add_vlan_member(vlan(1), PortId::new(99), false);
    }
}
