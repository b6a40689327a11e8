use std::path::PathBuf;

use anyhow::Context as _;

use crate::error::{ScrubError, ScrubResult};

/// Source of raw frame bytes, keyed by asset-root-relative path.
///
/// Production uses [`FsFetcher`] over the public asset directory; tests stub
/// this trait to simulate slow or failing fetches.
pub trait FrameFetcher: Send + Sync {
    fn fetch(&self, rel_path: &str) -> ScrubResult<Vec<u8>>;
}

/// Normalize and validate asset-root-relative paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects
/// absolute paths or parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> ScrubResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(ScrubError::validation("frame paths must be relative"));
    }
    if s.is_empty() {
        return Err(ScrubError::validation("frame path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(ScrubError::validation("frame paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(ScrubError::validation("frame path must contain a file name"));
    }

    Ok(out.join("/"))
}

/// Reads frames from a static asset root on the local filesystem.
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FrameFetcher for FsFetcher {
    fn fetch(&self, rel_path: &str) -> ScrubResult<Vec<u8>> {
        let rel = normalize_rel_path(rel_path)?;
        let path = self.root.join(rel);
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read frame '{}'", path.display()))?;
        Ok(bytes)
    }
}
