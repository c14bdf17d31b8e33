use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

static PROGRESS: OnceLock<ProgressBar> = OnceLock::new();

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// Creates the run's progress bar, counting drained outcomes up to `total`.
///
/// Only the first call creates a bar.
pub fn start(total: u64, visible: bool) -> &'static ProgressBar {
    PROGRESS.get_or_init(|| {
        if !visible {
            return ProgressBar::hidden();
        }

        let style = ProgressStyle::with_template(
            "{spinner:.blue} {bar:40.green/bright_black} {pos}/{len} outcomes {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━╸ ")
        .tick_strings(TICKS);

        let pb = ProgressBar::new(total);
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    })
}

pub fn finish() {
    if let Some(pb) = PROGRESS.get() {
        pb.finish_and_clear();
    }
}

/// Log writer that keeps tracing output from tearing through the progress bar.
pub struct ProgressWriter;

impl Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match PROGRESS.get() {
            Some(pb) if !pb.is_finished() => pb.suspend(|| io::stderr().write_all(buf))?,
            _ => io::stderr().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}
