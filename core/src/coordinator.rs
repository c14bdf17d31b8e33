//! # Fan-Out Coordinator
//!
//! Owns the worker population of a run: one [`ProbeTask`] per generated
//! address, all feeding a single aggregation channel.
//!
//! The channel is sized for the worst-case outcome count so producers never
//! wait on the consumer. Completion is tracked with a [`JoinSet`]; the
//! supervising task holds the last sender and drops it only after every probe
//! task has been joined, which closes the channel exactly once.

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::{JoinError, JoinHandle, JoinSet};
use tracing::{debug, info};

use apiscan_common::config::ProbeSettings;
use apiscan_common::network::address::AddressSource;
use apiscan_common::network::path::ProbePath;
use apiscan_common::{ProbeOutcome, error};

use crate::network::transport::Transport;
use crate::probe::{ProbeTask, TaskExit};

/// Largest channel the coordinator will allocate up front.
const MAX_CHANNEL_CAPACITY: usize = 1 << 20;

/// Bookkeeping of a finished run, as seen by the coordinator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    pub launched: usize,
    pub completed: usize,
    /// Tasks whose body panicked and were back-filled with `Error` outcomes.
    pub recovered: usize,
    /// Tasks that never reported back. Their unreported paths are lost.
    pub crashed: usize,
    pub emitted: usize,
}

impl RunReport {
    fn record(&mut self, joined: Result<TaskExit, JoinError>) {
        match joined {
            Ok(exit) => {
                self.completed += 1;
                self.emitted += exit.emitted;
                if exit.recovered {
                    self.recovered += 1;
                }
            }
            Err(e) => {
                self.crashed += 1;
                error!("probe task crashed outside its supervision boundary: {e}");
            }
        }
    }
}

/// Receiving end of a run.
///
/// Yields outcomes in arrival order and returns `None` once every task has
/// finished and the channel is drained.
pub struct ProbeStream {
    rx: mpsc::Receiver<ProbeOutcome>,
    supervisor: JoinHandle<RunReport>,
    expected: usize,
}

impl ProbeStream {
    pub async fn recv(&mut self) -> Option<ProbeOutcome> {
        self.rx.recv().await
    }

    /// Number of outcomes a complete run produces (addresses × paths).
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Waits for the supervisor and returns its report.
    ///
    /// Outcomes still buffered are discarded; drain the stream first.
    pub async fn finish(self) -> anyhow::Result<RunReport> {
        let Self { rx, supervisor, .. } = self;
        drop(rx);
        supervisor.await.context("probe supervisor terminated abnormally")
    }
}

pub struct Coordinator {
    transport: Arc<dyn Transport>,
    paths: Arc<[ProbePath]>,
    settings: Arc<ProbeSettings>,
}

impl Coordinator {
    pub fn new(transport: Arc<dyn Transport>, paths: Arc<[ProbePath]>, settings: ProbeSettings) -> Self {
        Self {
            transport,
            paths,
            settings: Arc::new(settings),
        }
    }

    pub fn paths(&self) -> &[ProbePath] {
        &self.paths
    }

    pub fn settings(&self) -> &ProbeSettings {
        &self.settings
    }

    /// Launches `count` probe tasks, one per address drawn from `addresses`.
    ///
    /// Must be called from within a tokio runtime. Returns immediately; the
    /// tasks run in the background and report through the returned stream.
    pub fn execute<A>(&self, count: usize, addresses: A) -> ProbeStream
    where
        A: AddressSource + 'static,
    {
        let expected = count.saturating_mul(self.paths.len());
        let capacity = expected.clamp(1, MAX_CHANNEL_CAPACITY);
        let (tx, rx) = mpsc::channel(capacity);

        info!(
            "probing {count} addresses × {} paths (concurrency: {})",
            self.paths.len(),
            self.settings
                .concurrency
                .map_or_else(|| "unbounded".to_string(), |limit| limit.to_string())
        );

        let supervisor = tokio::spawn(supervise(
            count,
            addresses,
            tx,
            Arc::clone(&self.transport),
            Arc::clone(&self.paths),
            Arc::clone(&self.settings),
        ));

        ProbeStream {
            rx,
            supervisor,
            expected,
        }
    }
}

async fn supervise<A>(
    count: usize,
    mut addresses: A,
    tx: mpsc::Sender<ProbeOutcome>,
    transport: Arc<dyn Transport>,
    paths: Arc<[ProbePath]>,
    settings: Arc<ProbeSettings>,
) -> RunReport
where
    A: AddressSource,
{
    let limiter = settings
        .concurrency
        .map(|limit| Arc::new(Semaphore::new(limit.get())));
    let mut tasks: JoinSet<TaskExit> = JoinSet::new();
    let mut report = RunReport::default();

    for _ in 0..count {
        let permit = match &limiter {
            Some(limiter) => match Arc::clone(limiter).acquire_owned().await {
                Ok(permit) => Some(permit),
                Err(_) => break,
            },
            None => None,
        };

        let address = addresses.next_address();
        let task = ProbeTask::new(
            address,
            Arc::clone(&paths),
            Arc::clone(&transport),
            Arc::clone(&settings),
        );
        let tx = tx.clone();

        tasks.spawn(async move {
            let exit = task.run_supervised(&tx).await;
            drop(permit);
            exit
        });
        report.launched += 1;

        while let Some(joined) = tasks.try_join_next() {
            report.record(joined);
        }
    }

    while let Some(joined) = tasks.join_next().await {
        report.record(joined);
    }

    // Last sender: every task has been joined, so nothing can emit after this.
    drop(tx);

    debug!("{report:?}");
    info!(
        "{} of {} probe tasks finished, {} outcomes emitted",
        report.completed, report.launched, report.emitted
    );
    report
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
