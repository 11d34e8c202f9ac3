//! Per-port frame transport.
//!
//! The data plane talks to its ports through the [`FramePort`] trait so the
//! forwarding pipeline stays independent of the concrete kernel interface;
//! [`AfPacketSocket`] is the Linux collaborator binding a raw packet socket
//! to a named interface.

use std::ffi::CString;
use std::io;
use std::mem;
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, FromRawFd, OwnedFd};

use crate::error::{Error, Result};

/// A bidirectional L2 frame transport for one switch port.
pub trait FramePort {
    /// Receives one frame into `buf`, returning its length.
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Sends one frame.
    fn send(&self, buf: &[u8]) -> io::Result<usize>;
}

/// A raw `AF_PACKET` socket bound to one interface.
///
/// The socket is opened with the `ETH_P_ALL` protocol wildcard so every
/// EtherType is delivered, and bound to the interface index so only that
/// interface's traffic arrives. Frames carry no link-layer metadata prefix;
/// payloads begin at the destination MAC.
#[derive(Debug)]
pub struct AfPacketSocket {
    fd: OwnedFd,
}

impl AfPacketSocket {
    /// Opens a raw packet socket and binds it to the named interface.
    ///
    /// The interface must already exist; the bridge does not create it.
    pub fn open(ifname: &str) -> Result<Self> {
        let raw = unsafe {
            libc::socket(
                libc::AF_PACKET,
                libc::SOCK_RAW,
                (libc::ETH_P_ALL as u16).to_be() as i32,
            )
        };
        if raw < 0 {
            return Err(Error::SocketSetup {
                ifname: ifname.to_string(),
                source: io::Error::last_os_error(),
            });
        }
        let fd = unsafe { OwnedFd::from_raw_fd(raw) };

        let ifindex = interface_index(ifname)?;

        let mut sll: libc::sockaddr_ll = unsafe { mem::zeroed() };
        sll.sll_family = libc::AF_PACKET as u16;
        sll.sll_protocol = (libc::ETH_P_ALL as u16).to_be();
        sll.sll_ifindex = ifindex;

        let rc = unsafe {
            libc::bind(
                fd.as_raw_fd(),
                &sll as *const libc::sockaddr_ll as *const libc::sockaddr,
                mem::size_of::<libc::sockaddr_ll>() as libc::socklen_t,
            )
        };
        if rc < 0 {
            return Err(Error::SocketSetup {
                ifname: ifname.to_string(),
                source: io::Error::last_os_error(),
            });
        }

        Ok(AfPacketSocket { fd })
    }
}

/// Resolves the kernel index of a named interface.
fn interface_index(ifname: &str) -> Result<i32> {
    let name = CString::new(ifname).map_err(|_| Error::InterfaceNotFound {
        name: ifname.to_string(),
    })?;

    let index = unsafe { libc::if_nametoindex(name.as_ptr()) };
    if index == 0 {
        return Err(Error::InterfaceNotFound {
            name: ifname.to_string(),
        });
    }
    Ok(index as i32)
}

impl FramePort for AfPacketSocket {
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = unsafe {
            libc::recv(
                self.fd.as_raw_fd(),
                buf.as_mut_ptr() as *mut libc::c_void,
                buf.len(),
                0,
            )
        };
        if n < 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(n as usize)
        }
    }

    fn send(&self, buf: &[u8]) -> io::Result<usize> {
        let n = unsafe {
            libc::send(
                self.fd.as_raw_fd(),
                buf.as_ptr() as *const libc::c_void,
                buf.len(),
                0,
            )
        };
        if n < 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(n as usize)
        }
    }
}

impl AsFd for AfPacketSocket {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.fd.as_fd()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interface_index_unknown_name() {
        let err = interface_index("no-such-interface-0").unwrap_err();
        assert!(matches!(err, Error::InterfaceNotFound { .. }));
    }

    #[test]
    fn test_interface_index_rejects_nul() {
        let err = interface_index("veth\0").unwrap_err();
        assert!(matches!(err, Error::InterfaceNotFound { .. }));
    }
}
