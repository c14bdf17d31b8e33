//! # Probe Target Model
//!
//! A target is one concrete request: an address, the port to connect to and
//! the path to fetch. It renders into the locator handed to the transport,
//! `http://<address>:<port><path>`.

use std::fmt;
use std::net::Ipv4Addr;

use crate::network::path::ProbePath;

/// Plaintext HTTP port every probe connects to unless overridden.
pub const HTTP_PORT: u16 = 80;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProbeTarget {
    pub address: Ipv4Addr,
    pub port: u16,
    pub path: ProbePath,
}

impl ProbeTarget {
    pub fn new(address: Ipv4Addr, port: u16, path: ProbePath) -> Self {
        Self {
            address,
            port,
            path,
        }
    }

    /// The full URL of this target.
    pub fn locator(&self) -> String {
        format!("http://{}:{}{}", self.address, self.port, self.path)
    }
}

/// Renders the short `<address><path>` form used in output lines.
impl fmt::Display for ProbeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.address, self.path)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
