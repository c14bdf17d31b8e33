#![cfg(test)]
use std::net::Ipv4Addr;
use std::num::NonZeroUsize;
use std::sync::Arc;

use apiscan_common::config::{PROBE_PATHS, ProbeSettings};
use apiscan_common::network::address::{FixedAddresses, SeededAddresses};
use apiscan_common::network::path::path_list;
use apiscan_common::{OutcomeKind, ProbeError, ProbeOutcome};
use apiscan_core::{Coordinator, ResultSink, Tally, Transport};

use crate::utils::{PanickingTransport, RefusingTransport, SingleApiTransport};

fn coordinator(transport: Arc<dyn Transport>, paths: &[&str], settings: ProbeSettings) -> Coordinator {
    Coordinator::new(transport, path_list(paths), settings)
}

/// A thousand addresses against the full path list with every connection
/// refused: the channel must close once, after exactly 9000 outcomes.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn thousand_addresses_all_failing_close_once() -> anyhow::Result<()> {
    let coordinator = coordinator(Arc::new(RefusingTransport), PROBE_PATHS, ProbeSettings::default());

    let mut stream = coordinator.execute(1000, SeededAddresses::new(2024));
    let mut received = 0usize;
    while let Some(outcome) = stream.recv().await {
        assert_eq!(outcome.kind(), OutcomeKind::Error);
        received += 1;
    }

    assert_eq!(received, 9000);
    assert!(stream.recv().await.is_none(), "outcome arrived after close");

    let report = stream.finish().await?;
    assert_eq!(report.launched, 1000);
    assert_eq!(report.completed, 1000);
    assert_eq!(report.emitted, 9000);
    assert_eq!(report.crashed, 0);
    Ok(())
}

/// One live API on 1.2.3.4/health, every other request refused.
#[tokio::test]
async fn single_api_among_refusals() -> anyhow::Result<()> {
    let api = Ipv4Addr::new(1, 2, 3, 4);
    let transport = Arc::new(SingleApiTransport {
        address: api,
        path: "/health",
    });
    let coordinator = coordinator(transport, PROBE_PATHS, ProbeSettings::default());
    let addrs = FixedAddresses::new(vec![
        api,
        Ipv4Addr::new(5, 6, 7, 8),
        Ipv4Addr::new(9, 10, 11, 12),
        Ipv4Addr::new(13, 14, 15, 16),
        Ipv4Addr::new(17, 18, 19, 20),
    ]);

    let mut stream = coordinator.execute(5, addrs);
    let mut sink = ResultSink::new(Vec::new());
    let tally = sink.drain(&mut stream).await?;

    assert_eq!(tally, Tally { success: 1, failure: 0, error: 44 });

    let text = String::from_utf8(sink.into_inner())?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 45);

    let found: Vec<&&str> = lines.iter().filter(|line| line.starts_with("API found at")).collect();
    assert_eq!(found, vec![&"API found at 1.2.3.4/health (status: 200)"]);
    assert_eq!(lines.iter().filter(|line| line.starts_with("Error connecting to ")).count(), 44);
    assert_eq!(lines.iter().filter(|line| line.starts_with("No API at")).count(), 0);
    Ok(())
}

#[tokio::test]
async fn empty_path_list_yields_nothing() -> anyhow::Result<()> {
    let coordinator = coordinator(Arc::new(RefusingTransport), &[], ProbeSettings::default());

    let mut stream = coordinator.execute(100, SeededAddresses::new(1));
    let mut sink = ResultSink::new(Vec::new());
    let tally = sink.drain(&mut stream).await?;

    assert_eq!(tally.total(), 0);
    assert!(sink.into_inner().is_empty());
    assert_eq!(stream.finish().await?.completed, 100);
    Ok(())
}

#[tokio::test]
async fn outcome_count_is_addresses_times_paths() -> anyhow::Result<()> {
    for count in [1usize, 7, 50] {
        for paths in [&PROBE_PATHS[..1], &PROBE_PATHS[..3], PROBE_PATHS] {
            let coordinator = coordinator(Arc::new(RefusingTransport), paths, ProbeSettings::default());
            let mut stream = coordinator.execute(count, SeededAddresses::new(count as u64));
            let mut sink = ResultSink::new(std::io::sink());

            let tally = sink.drain(&mut stream).await?;
            assert_eq!(tally.total(), count * paths.len(), "{count} × {}", paths.len());
        }
    }
    Ok(())
}

/// `--concurrency 1` degrades to the sequential variant without changing results.
#[tokio::test]
async fn single_worker_matches_unbounded_run() {
    let settings = ProbeSettings::default().with_concurrency(NonZeroUsize::new(1).unwrap());
    let coordinator = coordinator(Arc::new(RefusingTransport), PROBE_PATHS, settings);

    let mut stream = coordinator.execute(20, SeededAddresses::new(77));
    let mut outcomes: Vec<ProbeOutcome> = Vec::new();
    while let Some(outcome) = stream.recv().await {
        outcomes.push(outcome);
    }

    assert_eq!(outcomes.len(), 180);
    // With one worker, addresses arrive one after another.
    for chunk in outcomes.chunks(PROBE_PATHS.len()) {
        assert!(chunk.iter().all(|outcome| outcome.address() == chunk[0].address()));
    }
}

#[tokio::test]
async fn panicking_path_is_reported_not_lost() -> anyhow::Result<()> {
    let transport = Arc::new(PanickingTransport { path: "/status" });
    let coordinator = coordinator(transport, PROBE_PATHS, ProbeSettings::default());

    let mut stream = coordinator.execute(20, SeededAddresses::new(11));
    let mut panicked = 0;
    let mut total = 0;
    while let Some(outcome) = stream.recv().await {
        total += 1;
        if let ProbeOutcome::Error { path, cause: ProbeError::Panicked { message, .. }, .. } = &outcome {
            assert_eq!(path.as_str(), "/status");
            assert_eq!(message, "handler for /status blew up");
            panicked += 1;
        } else {
            assert_eq!(outcome.kind(), OutcomeKind::Failure);
        }
    }

    assert_eq!(total, 180);
    assert_eq!(panicked, 20);
    let report = stream.finish().await?;
    assert_eq!(report.crashed, 0);
    Ok(())
}
