//! # Apiscan Core
//!
//! The fan-out probing engine.
//!
//! * [`network::transport`]: the [`Transport`] seam and its hyper-backed implementation.
//! * [`probe`]: one task per address, walking the path list in order.
//! * [`coordinator`]: spawns the tasks, funnels their outcomes into one channel
//!   and closes it once every task has finished.
//! * [`sink`]: drains the channel into stdout or an append-only log.

pub mod coordinator;
pub mod network;
pub mod probe;
pub mod sink;

pub use coordinator::{Coordinator, ProbeStream, RunReport};
pub use network::transport::{HttpTransport, Transport};
pub use sink::{ResultSink, Tally};
