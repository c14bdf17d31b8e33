use std::sync::Arc;
use std::time::Instant;

use apiscan_common::config::{ADDRESS_COUNT, Config, Destination, PROBE_PATHS};
use apiscan_common::network::address::RandomAddresses;
use apiscan_common::network::path::path_list;
use apiscan_common::{success, warn};
use apiscan_core::{Coordinator, HttpTransport, ResultSink};
use tracing::info_span;

use crate::terminal::{print, progress};

/// Runs one full probing pass: open the sink, fan out, drain, summarize.
///
/// The sink is opened before any task is launched so an unusable log
/// destination aborts the run without touching the network.
pub async fn probe(cfg: &Config) -> anyhow::Result<()> {
    let mut sink = ResultSink::open(&cfg.destination)?;
    print::destination(&cfg.destination, cfg.quiet);

    let span = info_span!("probe");
    let _guard = span.enter();

    let coordinator = Coordinator::new(
        Arc::new(HttpTransport::new()),
        path_list(PROBE_PATHS),
        cfg.settings.clone(),
    );

    let start_time = Instant::now();
    let mut stream = coordinator.execute(ADDRESS_COUNT, RandomAddresses);

    let bar = progress::start(stream.expected() as u64, shows_progress(cfg));
    let tally = sink.drain_with(&mut stream, |_| bar.inc(1)).await?;
    progress::finish();

    let report = stream.finish().await?;
    if tally.success > 0 {
        success!("{} endpoints answered 200", tally.success);
    }
    if report.recovered > 0 || report.crashed > 0 {
        warn!(
            "{} probe tasks panicked ({} recovered, {} lost)",
            report.recovered + report.crashed,
            report.recovered,
            report.crashed
        );
    }

    print::summary(&tally, &report, start_time.elapsed(), cfg.quiet);
    Ok(())
}

/// The bar is drawn only when nothing else competes for the terminal.
fn shows_progress(cfg: &Config) -> bool {
    cfg.quiet == 0 && !matches!(cfg.destination, Destination::Stdout)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
