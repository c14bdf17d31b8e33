pub mod probe;

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use apiscan_common::config::{Config, DEFAULT_LOG_FILE, Destination, ProbeSettings};

#[derive(Parser, Debug)]
#[command(name = "apiscan", version)]
#[command(about = "Probes random IPv4 addresses for exposed HTTP APIs.")]
pub struct CommandLine {
    /// Write results to standard output instead of the log file
    #[arg(long)]
    pub stdout: bool,

    /// Append results to this file
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOG_FILE)]
    pub log: PathBuf,

    /// Maximum number of addresses probed at once, 0 for no limit
    #[arg(short, long, value_name = "N", default_value_t = 512)]
    pub concurrency: usize,

    /// Per-request deadline in milliseconds, 0 to wait as long as the OS does
    #[arg(short, long, value_name = "MS", default_value_t = 5_000)]
    pub timeout: u64,

    /// Less terminal output (-q drops headers and progress, -qq the summary too)
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        let destination = if self.stdout {
            Destination::Stdout
        } else {
            Destination::File(self.log.clone())
        };

        let mut settings = ProbeSettings::default();
        if self.timeout > 0 {
            settings = settings.with_timeout(Duration::from_millis(self.timeout));
        }
        if let Some(limit) = NonZeroUsize::new(self.concurrency) {
            settings = settings.with_concurrency(limit);
        }

        Config {
            destination,
            settings,
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["apiscan"];
        argv.extend_from_slice(args);
        CommandLine::try_parse_from(argv).unwrap().to_config()
    }

    #[test]
    fn no_arguments_uses_defaults() {
        let cfg = parse(&[]);
        assert_eq!(cfg.destination, Destination::File(PathBuf::from("log.txt")));
        assert_eq!(cfg.settings.port, 80);
        assert_eq!(cfg.settings.timeout, Some(Duration::from_millis(5_000)));
        assert_eq!(cfg.settings.concurrency, NonZeroUsize::new(512));
        assert_eq!(cfg.quiet, 0);
    }

    #[test]
    fn zero_disables_limits() {
        let cfg = parse(&["--concurrency", "0", "--timeout", "0"]);
        assert!(cfg.settings.timeout.is_none());
        assert!(cfg.settings.concurrency.is_none());
    }

    #[test]
    fn stdout_overrides_log_file() {
        let cfg = parse(&["--stdout", "-qq"]);
        assert_eq!(cfg.destination, Destination::Stdout);
        assert_eq!(cfg.quiet, 2);
    }

    #[test]
    fn custom_log_path() {
        let cfg = parse(&["--log", "/tmp/scan.txt"]);
        assert_eq!(cfg.destination, Destination::File(PathBuf::from("/tmp/scan.txt")));
    }
}
