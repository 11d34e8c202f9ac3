//! vbridged - userspace VLAN-aware learning bridge daemon.
//!
//! Entry point: binds one raw packet socket per port, then runs the
//! management plane and the data plane on two dedicated threads.

use std::process::ExitCode;
use std::sync::Arc;
use std::thread;

use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use vbridge_sai::Sai;
use vbridge_state::SwitchState;
use vbridged::config::{IF_PREFIX, NUM_SWITCH_PORTS};
use vbridged::{AfPacketSocket, DataPlane};

/// Initializes tracing/logging subsystem
fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn main() -> ExitCode {
    init_logging();

    info!("--- Starting vbridged ---");

    let state = Arc::new(SwitchState::new(NUM_SWITCH_PORTS));
    let sai = Sai::new(state.clone());

    let mut ports = Vec::with_capacity(NUM_SWITCH_PORTS as usize);
    for port in 0..NUM_SWITCH_PORTS {
        let ifname = format!("{}{}", IF_PREFIX, port);
        match AfPacketSocket::open(&ifname) {
            Ok(socket) => {
                info!(port, %ifname, "port bound");
                ports.push(socket);
            }
            Err(error) => {
                error!(port, %ifname, %error, "port setup failed");
                return ExitCode::FAILURE;
            }
        }
    }

    let mgmt_sai = sai.clone();
    let mgmt_thread = thread::Builder::new()
        .name("mgmtplane".to_string())
        .spawn(move || vbridged::mgmt::run(mgmt_sai))
        .expect("Failed to spawn management thread");

    let dp_thread = thread::Builder::new()
        .name("dataplane".to_string())
        .spawn(move || DataPlane::new(ports, state, sai).run())
        .expect("Failed to spawn data-plane thread");

    // Neither thread returns in this revision; termination is abrupt.
    let _ = mgmt_thread.join();
    let _ = dp_thread.join();

    ExitCode::SUCCESS
}
