//! Error types for vbridged.

use thiserror::Error;

/// Bridge daemon errors.
///
/// Everything here is a fatal setup failure; per-frame I/O problems in the
/// steady state are logged and swallowed by the data plane instead.
#[derive(Error, Debug)]
pub enum Error {
    /// The named interface does not exist.
    #[error("interface not found: {name}")]
    InterfaceNotFound { name: String },

    /// Raw socket creation or bind failed.
    #[error("socket setup failed for {ifname}: {source}")]
    SocketSetup {
        ifname: String,
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for vbridged operations.
pub type Result<T> = std::result::Result<T, Error>;
