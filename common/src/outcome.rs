//! # Probe Outcomes
//!
//! One [`ProbeOutcome`] is produced for every (address, path) pair that a
//! probe task attempts. The rendered line is what ends up in the log.

use std::fmt;
use std::net::Ipv4Addr;

use crate::error::ProbeError;
use crate::network::path::ProbePath;

/// Canonical "OK" status code.
pub const STATUS_OK: u16 = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Success,
    Failure,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The target answered with [`STATUS_OK`].
    Success {
        address: Ipv4Addr,
        path: ProbePath,
        status: u16,
    },
    /// The target answered with any other status.
    Failure {
        address: Ipv4Addr,
        path: ProbePath,
        status: u16,
    },
    /// No response was received.
    Error {
        address: Ipv4Addr,
        path: ProbePath,
        cause: ProbeError,
    },
}

impl ProbeOutcome {
    /// Classifies the result of a single sub-probe.
    pub fn classify(address: Ipv4Addr, path: ProbePath, result: Result<u16, ProbeError>) -> Self {
        match result {
            Ok(status) if status == STATUS_OK => Self::Success {
                address,
                path,
                status,
            },
            Ok(status) => Self::Failure {
                address,
                path,
                status,
            },
            Err(cause) => Self::Error {
                address,
                path,
                cause,
            },
        }
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Success { .. } => OutcomeKind::Success,
            Self::Failure { .. } => OutcomeKind::Failure,
            Self::Error { .. } => OutcomeKind::Error,
        }
    }

    pub fn address(&self) -> Ipv4Addr {
        match self {
            Self::Success { address, .. }
            | Self::Failure { address, .. }
            | Self::Error { address, .. } => *address,
        }
    }

    pub fn path(&self) -> &ProbePath {
        match self {
            Self::Success { path, .. } | Self::Failure { path, .. } | Self::Error { path, .. } => {
                path
            }
        }
    }

    /// The observed status code, if a response arrived.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Success { status, .. } | Self::Failure { status, .. } => Some(*status),
            Self::Error { .. } => None,
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success {
                address,
                path,
                status,
            } => write!(f, "API found at {address}{path} (status: {status})"),
            Self::Failure {
                address,
                path,
                status,
            } => write!(f, "No API at {address}{path} (status: {status})"),
            Self::Error {
                address,
                path,
                cause,
            } => write!(f, "Error connecting to {address}{path}: {cause}"),
        }
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
