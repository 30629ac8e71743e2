//! Probe input: a single email or a file of newline-separated emails.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ProbeError, ProbeResult};
use crate::types::ProbeTarget;

/// Where the emails to probe come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeSource {
    /// One email given directly.
    Single(String),
    /// A file with one email per line.
    File(PathBuf),
}

/// Turn raw lines into targets.
///
/// Lines are trimmed; blank lines are dropped. Order and duplicates are
/// preserved.
pub fn targets_from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<ProbeTarget> {
    lines.into_iter().filter_map(ProbeTarget::parse).collect()
}

/// Load the targets named by `source`.
///
/// # Errors
///
/// Returns [`ProbeError::InputNotFound`] when the file does not exist and
/// [`ProbeError::Io`] for any other read failure.
pub fn load_targets(source: &ProbeSource) -> ProbeResult<Vec<ProbeTarget>> {
    match source {
        ProbeSource::Single(email) => Ok(targets_from_lines([email.as_str()])),
        ProbeSource::File(path) => {
            let contents = read_input(path)?;
            let targets = targets_from_lines(contents.lines());
            debug!(path = %path.display(), count = targets.len(), "loaded emails");
            Ok(targets)
        }
    }
}

fn read_input(path: &Path) -> ProbeResult<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ProbeError::InputNotFound(path.to_path_buf()),
        _ => ProbeError::Io(e),
    })
}
