//! Input resolution: populate the workspace web-assets directory

pub mod archive;
pub mod html;

use crate::models::error::BuildError;
use crate::models::request::{AssetSource, BuildRequest};
use crate::workspace::BuildWorkspace;
use std::fs;

/// Populate the web directory from the request's asset source.
///
/// An uploaded archive is extracted in full and its byte buffer is taken out
/// of the request and dropped here, so the upload's storage is reclaimed the
/// moment extraction finishes. A remote URL becomes a single synthesized
/// wrapper page; with neither, the directory stays empty and downstream
/// stages still succeed.
pub fn resolve_assets(
    request: &mut BuildRequest,
    workspace: &BuildWorkspace,
) -> Result<(), BuildError> {
    match &mut request.source {
        AssetSource::Archive(bytes) => {
            let bytes = std::mem::take(bytes);
            archive::extract_site_archive(&bytes, &workspace.web_dir())
        }
        AssetSource::Url(url) => {
            let page = html::wrapper_page(
                &request.app_name,
                &html::resolve_url(url),
                &request.primary_color,
            );
            let dest = workspace.web_dir().join("index.html");
            fs::write(&dest, page).map_err(|e| {
                BuildError::packaging(format!("failed to write {}", dest.display()), e)
            })
        }
        AssetSource::None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::WorkspaceRoot;
    use std::io::{Cursor, Write};
    use tempfile::TempDir;
    use zip::write::{FileOptions, ZipWriter};

    fn workspace(temp: &TempDir, id: &str) -> BuildWorkspace {
        WorkspaceRoot::new(temp.path()).acquire(id).unwrap()
    }

    #[test]
    fn url_source_produces_exactly_one_wrapper_file() {
        let temp = TempDir::new().unwrap();
        let ws = workspace(&temp, "com.demo.app-10-0");
        let mut request = BuildRequest::new(
            "Demo App",
            "com.demo.app",
            AssetSource::Url("example.com".into()),
        );

        resolve_assets(&mut request, &ws).unwrap();

        let entries: Vec<_> = fs::read_dir(ws.web_dir()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        let page = fs::read_to_string(ws.web_dir().join("index.html")).unwrap();
        assert!(page.contains(r#"src="https://example.com""#));
    }

    #[test]
    fn empty_source_leaves_web_dir_empty() {
        let temp = TempDir::new().unwrap();
        let ws = workspace(&temp, "com.demo.app-10-1");
        let mut request = BuildRequest::new("Demo App", "com.demo.app", AssetSource::None);

        resolve_assets(&mut request, &ws).unwrap();

        assert_eq!(fs::read_dir(ws.web_dir()).unwrap().count(), 0);
    }

    #[test]
    fn archive_bytes_are_reclaimed_after_extraction() {
        let temp = TempDir::new().unwrap();
        let ws = workspace(&temp, "com.demo.app-10-2");

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("index.html", FileOptions::default())
            .unwrap();
        writer.write_all(b"<html>site</html>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let mut request =
            BuildRequest::new("Demo App", "com.demo.app", AssetSource::Archive(bytes));
        resolve_assets(&mut request, &ws).unwrap();

        assert!(ws.web_dir().join("index.html").is_file());
        match &request.source {
            AssetSource::Archive(bytes) => assert!(bytes.is_empty()),
            other => panic!("source variant changed: {:?}", other),
        }
    }
}
