//! Scoped build workspaces
//!
//! Workspaces are created under an injected root directory rather than the
//! process working directory, and each one is removed when dropped, on
//! success and failure paths alike, so failed builds cannot accumulate on
//! disk.

use crate::models::error::BuildError;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the web-assets subtree inside every workspace.
pub const WEB_DIR: &str = "www";

/// Root directory under which per-build workspaces are created.
#[derive(Debug, Clone)]
pub struct WorkspaceRoot {
    base: PathBuf,
}

impl WorkspaceRoot {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Acquire a fresh workspace for one build.
    ///
    /// The caller guarantees `build_id` is unique across live builds, so
    /// concurrent invocations never share a directory.
    pub fn acquire(&self, build_id: &str) -> Result<BuildWorkspace, BuildError> {
        let dir = self.base.join(build_id);
        fs::create_dir_all(dir.join(WEB_DIR)).map_err(|e| {
            BuildError::packaging(format!("failed to create workspace {}", dir.display()), e)
        })?;

        Ok(BuildWorkspace {
            dir,
            build_id: build_id.to_string(),
        })
    }
}

/// One build's assembled project tree: `www/` plus the two manifests.
#[derive(Debug)]
pub struct BuildWorkspace {
    dir: PathBuf,
    build_id: String,
}

impl BuildWorkspace {
    pub fn build_id(&self) -> &str {
        &self.build_id
    }

    pub fn root(&self) -> &Path {
        &self.dir
    }

    pub fn web_dir(&self) -> PathBuf {
        self.dir.join(WEB_DIR)
    }
}

impl Drop for BuildWorkspace {
    fn drop(&mut self) {
        // Best-effort teardown.
        let _ = fs::remove_dir_all(&self.dir);
    }
}
