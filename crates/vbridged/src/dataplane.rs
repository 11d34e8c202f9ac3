//! The data-plane forwarding pipeline and its event loop.
//!
//! One thread owns all port sockets and runs [`DataPlane::run`]: poll every
//! port for readability, receive one frame at a time into a reusable
//! buffer, and push it through classify -> learn -> lookup -> forward. The
//! pipeline itself ([`DataPlane::process_frame`]) is generic over the
//! [`FramePort`] transport so tests can drive it without raw sockets.

use std::os::fd::AsFd;
use std::sync::Arc;

use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use tracing::{debug, info, warn};

use vbridge_sai::{FdbEvent, Sai};
use vbridge_state::{MacLearnOutcome, SwitchState};
use vbridge_types::{PortId, VlanId};

use crate::config::{MAX_FRAME_LEN, POLL_TIMEOUT_MS};
use crate::frame::EthernetHeader;
use crate::port::FramePort;

/// The single-threaded data plane.
pub struct DataPlane<P: FramePort> {
    ports: Vec<P>,
    state: Arc<SwitchState>,
    sai: Sai,
}

impl<P: FramePort> DataPlane<P> {
    /// Builds a data plane over an already-bound set of ports.
    ///
    /// `ports[i]` carries logical port `i`; the vector length must match
    /// the port count the switch state was built with.
    pub fn new(ports: Vec<P>, state: Arc<SwitchState>, sai: Sai) -> Self {
        assert_eq!(
            ports.len(),
            state.num_ports() as usize,
            "one socket per switch port"
        );
        DataPlane { ports, state, sai }
    }

    /// Runs one frame through the forwarding pipeline.
    ///
    /// IPv6 frames and runts are dropped silently. Everything else is
    /// classified into the ingress VLAN (PVID, falling back to the default
    /// VLAN), learned, and then either unicast to the FDB-resolved egress
    /// port or flooded within the VLAN. The ingress port never sees its
    /// own frame back: a lookup resolving to the ingress port means the
    /// destination is local and the frame is not forwarded at all.
    pub fn process_frame(&self, ingress: PortId, frame: &[u8]) {
        let Some(header) = EthernetHeader::parse(frame) else {
            return;
        };

        // IPv6 is out of scope for this revision: not logged, not learned,
        // not forwarded.
        if header.is_ipv6() {
            return;
        }

        info!(
            port = %ingress,
            dmac = %header.dst,
            smac = %header.src,
            ethertype = %format!("{:#06x}", header.ethertype),
            "rx"
        );

        let vlan = self
            .state
            .get_port_pvid(ingress)
            .unwrap_or(VlanId::DEFAULT);

        let outcome = self.state.learn_mac(vlan, header.src, ingress);
        if outcome.is_new_binding() {
            info!(%vlan, mac = %header.src, port = %ingress, "learn");
            let event = match outcome {
                MacLearnOutcome::Learned => FdbEvent::Learned,
                MacLearnOutcome::Moved => FdbEvent::Move,
                MacLearnOutcome::Unchanged => unreachable!("not a new binding"),
            };
            self.sai.notify_fdb_event(event, vlan, header.src, ingress);
        }

        match self.state.lookup_fdb(vlan, header.dst) {
            Some(egress) if egress != ingress => self.send_frame(egress, frame, &header),
            // Destination resolves back to the ingress segment.
            Some(_) => {}
            None => self.flood(vlan, ingress, frame, &header),
        }

        if outcome.is_new_binding() {
            info!("current fdb:\n{}", self.state.tostring_fdb());
        }
    }

    /// Emits the frame to every flood target of `vlan` except the ingress
    /// port: the VLAN's members in stored order if the VLAN is known, all
    /// ports in ascending order otherwise.
    fn flood(&self, vlan: VlanId, ingress: PortId, frame: &[u8], header: &EthernetHeader) {
        match self.state.get_vlan_members(vlan) {
            Some(members) => {
                for port in members {
                    if port != ingress {
                        self.send_frame(port, frame, header);
                    }
                }
            }
            None => {
                for index in 0..self.state.num_ports() {
                    let port = PortId::new(index);
                    if port != ingress {
                        self.send_frame(port, frame, header);
                    }
                }
            }
        }
    }

    /// Best-effort transmit; a failed send drops the frame.
    fn send_frame(&self, egress: PortId, frame: &[u8], header: &EthernetHeader) {
        match self.ports[egress.index()].send(frame) {
            Ok(_) => info!(
                port = %egress,
                dmac = %header.dst,
                smac = %header.src,
                ethertype = %format!("{:#06x}", header.ethertype),
                "tx"
            ),
            Err(error) => debug!(port = %egress, %error, "send failed, frame dropped"),
        }
    }
}

impl<P: FramePort + AsFd> DataPlane<P> {
    /// The data-plane event loop. Never returns.
    ///
    /// Each iteration polls all ports with a timeout, then receives and
    /// fully processes (floods included) one frame per readable port
    /// before polling again. Poll errors and per-frame receive errors are
    /// logged and the loop continues.
    pub fn run(&mut self) -> ! {
        info!(ports = self.ports.len(), "data plane running");

        let mut buf = [0u8; MAX_FRAME_LEN];
        let mut ready = vec![false; self.ports.len()];

        loop {
            ready.iter_mut().for_each(|slot| *slot = false);

            {
                let mut pfds: Vec<PollFd> = self
                    .ports
                    .iter()
                    .map(|port| PollFd::new(port.as_fd(), PollFlags::POLLIN))
                    .collect();

                match poll(&mut pfds, PollTimeout::from(POLL_TIMEOUT_MS)) {
                    Ok(0) => continue,
                    Ok(_) => {
                        for (slot, pfd) in ready.iter_mut().zip(&pfds) {
                            *slot = pfd
                                .revents()
                                .is_some_and(|revents| revents.contains(PollFlags::POLLIN));
                        }
                    }
                    Err(error) => {
                        warn!(%error, "poll failed");
                        continue;
                    }
                }
            }

            for index in 0..self.ports.len() {
                if !ready[index] {
                    continue;
                }

                let n = match self.ports[index].recv(&mut buf) {
                    Ok(n) => n,
                    Err(error) => {
                        debug!(port = index, %error, "receive failed");
                        continue;
                    }
                };
                if n == 0 {
                    continue;
                }

                self.process_frame(PortId::new(index as u16), &buf[..n]);
            }
        }
    }
}
