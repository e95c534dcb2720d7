//! Workspace packaging into a retrievable artifact

pub mod builder;

use crate::models::artifact::BuildArtifact;
use crate::models::error::BuildError;
use crate::workspace::BuildWorkspace;
use std::fs;
use std::path::Path;

/// URL prefix the output directory is served under.
pub const DOWNLOADS_URL_PREFIX: &str = "/downloads";

/// Pack the assembled workspace into `<output_dir>/<build_id>.zip` and
/// return the artifact reference.
///
/// Output names are derived from the unique build id, so concurrent builds
/// writing into the shared output directory never interfere.
pub fn package_workspace(
    workspace: &BuildWorkspace,
    output_dir: &Path,
) -> Result<BuildArtifact, BuildError> {
    fs::create_dir_all(output_dir).map_err(|e| {
        BuildError::packaging(
            format!("failed to create output directory {}", output_dir.display()),
            e,
        )
    })?;

    let archive_name = format!("{}.zip", workspace.build_id());
    let archive_path = output_dir.join(&archive_name);
    builder::create_zip_from_directory(workspace.root(), &archive_path)?;

    Ok(BuildArtifact {
        build_id: workspace.build_id().to_string(),
        archive_path,
        public_url: format!("{}/{}", DOWNLOADS_URL_PREFIX, archive_name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::WorkspaceRoot;
    use tempfile::TempDir;

    #[test]
    fn artifact_paths_derive_from_the_build_id() {
        let temp = TempDir::new().unwrap();
        let workspace = WorkspaceRoot::new(temp.path().join("work"))
            .acquire("com.demo.app-30-0")
            .unwrap();
        fs::write(workspace.root().join("package.json"), b"{}").unwrap();

        let output = temp.path().join("downloads");
        let artifact = package_workspace(&workspace, &output).unwrap();

        assert_eq!(artifact.build_id, "com.demo.app-30-0");
        assert_eq!(artifact.public_url, "/downloads/com.demo.app-30-0.zip");
        assert_eq!(artifact.archive_path, output.join("com.demo.app-30-0.zip"));
        assert!(artifact.archive_path.is_file());
    }
}
