//! # Probe Paths
//!
//! A probe path is the sub-resource requested on every target (e.g. `/health`).
//! The ordered list of paths is fixed before a run starts and shared read-only
//! by every probe task.

use std::fmt;
use std::sync::Arc;

/// A single path suffix, always starting with `/`.
///
/// Cloning is cheap: the text lives behind an [`Arc`] so every outcome can
/// carry the path it belongs to without copying the string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProbePath(Arc<str>);

impl ProbePath {
    /// Creates a path, prefixing a `/` when the input lacks one.
    pub fn new(path: &str) -> Self {
        if path.starts_with('/') {
            Self(Arc::from(path))
        } else {
            Self(Arc::from(format!("/{path}")))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProbePath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl AsRef<str> for ProbePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProbePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds the shared, immutable path list handed to the coordinator.
pub fn path_list<I, S>(paths: I) -> Arc<[ProbePath]>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    paths
        .into_iter()
        .map(|path| ProbePath::new(path.as_ref()))
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
