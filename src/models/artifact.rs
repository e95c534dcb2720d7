//! Build artifact reference and build-id generation

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Reference to one completed build. Immutable once produced; the archive
/// stays in the output directory until externally cleaned up.
#[derive(Debug, Clone)]
pub struct BuildArtifact {
    pub build_id: String,
    pub archive_path: PathBuf,
    /// Stable public path the archive is fetchable under.
    pub public_url: String,
}

static BUILD_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Generate a workspace/artifact id for one build.
///
/// The process-wide sequence keeps ids distinct even when rapid sequential or
/// concurrent builds for the same app id land on the same millisecond.
pub fn generate_build_id(app_id: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let sequence = BUILD_SEQUENCE.fetch_add(1, Ordering::Relaxed);

    format!("{}-{}-{}", app_id, millis, sequence)
}
