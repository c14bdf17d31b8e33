//! # Probe Task
//!
//! A probe task owns one address and walks the shared path list strictly in
//! order, emitting exactly one [`ProbeOutcome`] per path it attempts. A failed
//! path never stops the remaining ones.
//!
//! Two unwind boundaries keep a misbehaving transport from silently eating
//! outcomes: every sub-probe is wrapped on its own, and [`ProbeTask::run_supervised`]
//! back-fills `Error` outcomes for whatever a crashed task left unreported.

use std::any::Any;
use std::net::Ipv4Addr;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::sync::mpsc::Sender;
use tracing::{debug, warn};

use apiscan_common::config::ProbeSettings;
use apiscan_common::network::path::ProbePath;
use apiscan_common::network::target::ProbeTarget;
use apiscan_common::{ProbeError, ProbeOutcome};

use crate::network::transport::Transport;

/// How a supervised task ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskExit {
    /// Outcomes delivered to the sink, back-filled ones included.
    pub emitted: usize,
    /// The task body panicked and its remaining paths were reported as errors.
    pub recovered: bool,
}

pub struct ProbeTask {
    address: Ipv4Addr,
    paths: Arc<[ProbePath]>,
    transport: Arc<dyn Transport>,
    settings: Arc<ProbeSettings>,
    emitted: usize,
}

impl ProbeTask {
    pub fn new(
        address: Ipv4Addr,
        paths: Arc<[ProbePath]>,
        transport: Arc<dyn Transport>,
        settings: Arc<ProbeSettings>,
    ) -> Self {
        Self {
            address,
            paths,
            transport,
            settings,
            emitted: 0,
        }
    }

    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    /// Probes every path in order and returns how many outcomes were emitted.
    ///
    /// Stops early only when the receiving side of `sink` is gone.
    pub async fn run(&mut self, sink: &Sender<ProbeOutcome>) -> usize {
        let paths = Arc::clone(&self.paths);
        for path in paths.iter().skip(self.emitted) {
            let target = ProbeTarget::new(self.address, self.settings.port, path.clone());
            let result = probe_once(self.transport.as_ref(), &target, self.settings.timeout).await;
            debug!("{target}: {result:?}");

            let outcome = ProbeOutcome::classify(self.address, path.clone(), result);
            if sink.send(outcome).await.is_err() {
                debug!("sink closed, abandoning remaining paths of {}", self.address);
                break;
            }
            self.emitted += 1;
        }
        self.emitted
    }

    /// Runs the task behind an unwind boundary.
    ///
    /// If the body panics, every path that has not been reported yet gets an
    /// `Error` outcome carrying the panic message, so the task still accounts
    /// for its whole path list.
    pub async fn run_supervised(mut self, sink: &Sender<ProbeOutcome>) -> TaskExit {
        let body = AssertUnwindSafe(self.run(sink)).catch_unwind().await;
        let Err(panic) = body else {
            return TaskExit {
                emitted: self.emitted,
                recovered: false,
            };
        };

        let message = panic_message(panic.as_ref());
        warn!("probe task for {} panicked: {message}", self.address);

        let paths = Arc::clone(&self.paths);
        for path in paths.iter().skip(self.emitted) {
            let target = ProbeTarget::new(self.address, self.settings.port, path.clone());
            let cause = ProbeError::Panicked {
                locator: target.locator(),
                message: message.clone(),
            };
            let outcome = ProbeOutcome::classify(self.address, path.clone(), Err(cause));
            if sink.send(outcome).await.is_err() {
                break;
            }
            self.emitted += 1;
        }

        TaskExit {
            emitted: self.emitted,
            recovered: true,
        }
    }
}

/// Performs a single sub-probe, folding deadline expiry and transport panics
/// into [`ProbeError`].
async fn probe_once(
    transport: &dyn Transport,
    target: &ProbeTarget,
    timeout: Option<Duration>,
) -> Result<u16, ProbeError> {
    let request = AssertUnwindSafe(transport.get(target)).catch_unwind();

    let caught = match timeout {
        Some(deadline) => match tokio::time::timeout(deadline, request).await {
            Ok(caught) => caught,
            Err(_elapsed) => {
                return Err(ProbeError::Timeout {
                    locator: target.locator(),
                    timeout: deadline,
                });
            }
        },
        None => request.await,
    };

    caught.unwrap_or_else(|panic| {
        Err(ProbeError::Panicked {
            locator: target.locator(),
            message: panic_message(panic.as_ref()),
        })
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
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
