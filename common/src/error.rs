use std::time::Duration;

use thiserror::Error;

/// Why a single sub-probe produced no HTTP response.
///
/// Every variant ends up as the cause of an `Error` outcome; none of them is
/// ever propagated past the probe task.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// Connection refused, no route, DNS failure and anything else the
    /// transport reports before a status line arrives.
    #[error("Get \"{locator}\": {reason}")]
    Transport { locator: String, reason: String },

    #[error("Get \"{locator}\": no response within {}ms", .timeout.as_millis())]
    Timeout { locator: String, timeout: Duration },

    #[error("invalid locator \"{locator}\": {reason}")]
    InvalidLocator { locator: String, reason: String },

    /// The transport panicked while handling the request.
    #[error("Get \"{locator}\": probe panicked: {message}")]
    Panicked { locator: String, message: String },
}

impl ProbeError {
    pub fn transport(locator: impl Into<String>, reason: impl ToString) -> Self {
        Self::Transport {
            locator: locator.into(),
            reason: reason.to_string(),
        }
    }
}
