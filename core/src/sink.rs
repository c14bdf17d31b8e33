//! # Result Sink
//!
//! The single consumer of a run. Every outcome is rendered to one line and
//! written in arrival order, which is whatever interleaving the concurrent
//! probe tasks produced.

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};

use anyhow::Context;

use apiscan_common::config::Destination;
use apiscan_common::{OutcomeKind, ProbeOutcome};

use crate::coordinator::ProbeStream;

/// Per-kind outcome counts of a drained run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub success: usize,
    pub failure: usize,
    pub error: usize,
}

impl Tally {
    pub fn add(&mut self, kind: OutcomeKind) {
        match kind {
            OutcomeKind::Success => self.success += 1,
            OutcomeKind::Failure => self.failure += 1,
            OutcomeKind::Error => self.error += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.success + self.failure + self.error
    }
}

pub struct ResultSink<W: Write> {
    writer: W,
}

impl ResultSink<Box<dyn Write + Send>> {
    /// Opens the configured destination.
    ///
    /// A log file is opened in append mode and created when missing; it is
    /// never truncated. Failing to open it is fatal to the run.
    pub fn open(destination: &Destination) -> anyhow::Result<Self> {
        let writer: Box<dyn Write + Send> = match destination {
            Destination::Stdout => Box::new(io::stdout()),
            Destination::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("opening log file {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
        };
        Ok(Self::new(writer))
    }
}

impl<W: Write> ResultSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn record(&mut self, outcome: &ProbeOutcome) -> io::Result<()> {
        writeln!(self.writer, "{outcome}")
    }

    /// Drains `stream` until the coordinator closes it.
    pub async fn drain(&mut self, stream: &mut ProbeStream) -> anyhow::Result<Tally> {
        self.drain_with(stream, |_| {}).await
    }

    /// Like [`drain`](Self::drain), calling `observe` after each written line.
    pub async fn drain_with<F>(&mut self, stream: &mut ProbeStream, mut observe: F) -> anyhow::Result<Tally>
    where
        F: FnMut(&ProbeOutcome),
    {
        let mut tally = Tally::default();
        while let Some(outcome) = stream.recv().await {
            self.record(&outcome).context("writing probe outcome")?;
            tally.add(outcome.kind());
            observe(&outcome);
        }
        self.writer.flush().context("flushing result sink")?;
        Ok(tally)
    }

    pub fn into_inner(self) -> W {
        self.writer
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::Coordinator;
    use crate::network::transport::Transport;
    use apiscan_common::ProbeError;
    use apiscan_common::config::ProbeSettings;
    use apiscan_common::network::address::FixedAddresses;
    use apiscan_common::network::path::path_list;
    use apiscan_common::network::target::ProbeTarget;
    use async_trait::async_trait;
    use std::net::Ipv4Addr;
    use std::path::PathBuf;
    use std::sync::Arc;

    struct StatusByPath;

    #[async_trait]
    impl Transport for StatusByPath {
        async fn get(&self, target: &ProbeTarget) -> Result<u16, ProbeError> {
            match target.path.as_str() {
                "/health" => Ok(200),
                "/docs" => Ok(403),
                _ => Err(ProbeError::transport(target.locator(), "connection refused")),
            }
        }
    }

    fn temp_log(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("apiscan-{}-{name}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);
        path
    }

    async fn run_into(sink: &mut ResultSink<impl Write>) -> Tally {
        let coordinator = Coordinator::new(
            Arc::new(StatusByPath),
            path_list(["/health", "/docs", "/api"]),
            ProbeSettings::default(),
        );
        let mut stream = coordinator.execute(1, FixedAddresses::new(vec![Ipv4Addr::new(8, 8, 4, 4)]));
        sink.drain(&mut stream).await.unwrap()
    }

    #[tokio::test]
    async fn drain_writes_one_line_per_outcome() {
        let mut sink = ResultSink::new(Vec::new());
        let tally = run_into(&mut sink).await;

        assert_eq!(tally, Tally { success: 1, failure: 1, error: 1 });
        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "API found at 8.8.4.4/health (status: 200)",
                "No API at 8.8.4.4/docs (status: 403)",
                "Error connecting to 8.8.4.4/api: Get \"http://8.8.4.4:80/api\": connection refused",
            ]
        );
    }

    #[tokio::test]
    async fn drain_with_observes_every_outcome() {
        let coordinator = Coordinator::new(
            Arc::new(StatusByPath),
            path_list(["/health", "/api"]),
            ProbeSettings::default(),
        );
        let mut stream = coordinator.execute(4, FixedAddresses::new(vec![Ipv4Addr::new(1, 1, 1, 1)]));
        let mut sink = ResultSink::new(io::sink());

        let mut observed = 0;
        let tally = sink.drain_with(&mut stream, |_| observed += 1).await.unwrap();

        assert_eq!(observed, 8);
        assert_eq!(tally.total(), 8);
    }

    #[tokio::test]
    async fn log_file_is_appended_not_truncated() {
        let path = temp_log("append");

        for _ in 0..2 {
            let mut sink = ResultSink::open(&Destination::File(path.clone())).unwrap();
            run_into(&mut sink).await;
        }

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 6);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn unopenable_log_file_is_an_error() {
        let path = std::env::temp_dir()
            .join("apiscan-missing-dir")
            .join("nested")
            .join("log.txt");
        let result = ResultSink::open(&Destination::File(path));
        assert!(result.is_err());
    }

    #[test]
    fn tally_counts_by_kind() {
        let mut tally = Tally::default();
        tally.add(OutcomeKind::Error);
        tally.add(OutcomeKind::Error);
        tally.add(OutcomeKind::Success);
        assert_eq!(tally, Tally { success: 1, failure: 0, error: 2 });
        assert_eq!(tally.total(), 3);
    }
}
