//! # Apiscan Common
//!
//! Domain types shared by every crate in the workspace: the probe path list,
//! targets and outcomes, the error taxonomy, address generation and the
//! configuration knobs of a run.

pub mod config;
pub mod error;
pub mod macros;
pub mod network;
pub mod outcome;

pub use error::ProbeError;
pub use outcome::{OutcomeKind, ProbeOutcome};

#[doc(hidden)]
pub use tracing;
