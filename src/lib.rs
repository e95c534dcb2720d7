//! Website to native-app scaffold generator
//!
//! Converts a web asset bundle (a remote URL or an uploaded site archive)
//! into a downloadable Capacitor native-shell project: resolved web assets
//! plus the package descriptor and shell configuration, packed into one ZIP
//! artifact served under a stable public path.

pub mod materializer;
pub mod models;
pub mod packager;
pub mod progress;
pub mod resolver;
pub mod workspace;

#[cfg(feature = "cli")]
pub mod dispatch;

pub use models::{AssetSource, BuildArtifact, BuildError, BuildRequest};
pub use progress::{NoProgress, ProgressSink, Stage};
pub use workspace::{BuildWorkspace, WorkspaceRoot};

use models::artifact::generate_build_id;
use std::path::Path;

/// Main entry point: run the full build pipeline for one request.
///
/// Stages run strictly in order: resolve assets, write manifests, package.
/// Takes the request by value: an uploaded archive's byte buffer is dropped
/// as soon as extraction finishes instead of living until the caller lets go
/// of the request. The workspace directory is removed when this function
/// returns, on both success and failure paths; only the produced archive
/// persists.
pub fn generate_project(
    mut request: BuildRequest,
    workspace_root: &WorkspaceRoot,
    output_dir: &Path,
    progress: &dyn ProgressSink,
) -> Result<BuildArtifact, BuildError> {
    // Reject bad requests before any workspace exists.
    request.validate()?;

    let build_id = generate_build_id(&request.app_id);
    let workspace = workspace_root.acquire(&build_id)?;

    progress.stage_started(Stage::ResolveAssets);
    resolver::resolve_assets(&mut request, &workspace)?;
    progress.stage_completed(Stage::ResolveAssets);

    progress.stage_started(Stage::WriteManifests);
    materializer::write_manifests(&request, &workspace)?;
    progress.stage_completed(Stage::WriteManifests);

    progress.stage_started(Stage::Package);
    let artifact = packager::package_workspace(&workspace, output_dir)?;
    progress.stage_completed(Stage::Package);

    Ok(artifact)
}
