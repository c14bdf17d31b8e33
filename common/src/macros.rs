//! Logging shorthands used across the workspace.
//!
//! These forward to `tracing` with a fixed target per flavour so the terminal
//! formatter can tell a `success!` apart from a plain `tracing::info!`.

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "apiscan::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!(target: "apiscan::warn", $($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::tracing::error!(target: "apiscan::error", $($arg)*)
    };
}
