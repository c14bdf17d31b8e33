use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use crate::network::target::HTTP_PORT;

/// Number of addresses generated per run.
pub const ADDRESS_COUNT: usize = 10_000;

/// Paths requested on every address, in order.
pub const PROBE_PATHS: &[&str] = &[
    "/api",
    "/public",
    "/v1",
    "/api/v1",
    "/health",
    "/status",
    "/docs",
    "/swagger",
    "/version",
];

pub const DEFAULT_LOG_FILE: &str = "log.txt";

/// Where rendered outcome lines go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    /// Append-only file, created if absent and never truncated.
    File(PathBuf),
}

impl Default for Destination {
    fn default() -> Self {
        Self::File(PathBuf::from(DEFAULT_LOG_FILE))
    }
}

/// Engine knobs for a single run.
///
/// `Default` leaves every limit off: port 80, no request deadline and no cap
/// on concurrently running probe tasks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeSettings {
    pub port: u16,
    /// Per-request deadline. Expiry is reported as an `Error` outcome.
    pub timeout: Option<Duration>,
    /// Upper bound on probe tasks in flight at once.
    pub concurrency: Option<NonZeroUsize>,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            port: HTTP_PORT,
            timeout: None,
            concurrency: None,
        }
    }
}

impl ProbeSettings {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_concurrency(mut self, limit: NonZeroUsize) -> Self {
        self.concurrency = Some(limit);
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

pub struct Config {
    pub destination: Destination,
    pub settings: ProbeSettings,
    /// 0 prints everything, 1 drops headers and progress, 2 drops the summary too.
    pub quiet: u8,
}
