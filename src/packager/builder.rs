//! Downloadable project archive builder

use crate::models::error::BuildError;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use walkdir::WalkDir;
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

fn zip_err(context: &str, err: zip::result::ZipError) -> BuildError {
    BuildError::packaging(context.to_string(), io::Error::new(io::ErrorKind::Other, err))
}

/// Pack every file under `source_dir` into a deflate ZIP at `zip_path`,
/// preserving relative paths so that extracting it yields the project tree
/// unmodified.
pub fn create_zip_from_directory(source_dir: &Path, zip_path: &Path) -> Result<(), BuildError> {
    let file = File::create(zip_path).map_err(|e| {
        BuildError::packaging(format!("failed to create archive {}", zip_path.display()), e)
    })?;
    let mut zip = ZipWriter::new(file);

    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);

    for entry in WalkDir::new(source_dir) {
        let entry = entry.map_err(|e| {
            BuildError::packaging(
                format!("failed to walk workspace {}", source_dir.display()),
                io::Error::new(io::ErrorKind::Other, e),
            )
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        // WalkDir roots every entry under source_dir, so the prefix is there.
        let relative = path
            .strip_prefix(source_dir)
            .map_err(|e| {
                BuildError::packaging(
                    format!("failed to relativize {}", path.display()),
                    io::Error::new(io::ErrorKind::Other, e),
                )
            })?;

        zip.start_file(relative.to_string_lossy().as_ref(), options)
            .map_err(|e| zip_err("failed to start archive entry", e))?;
        let content = fs::read(path).map_err(|e| {
            BuildError::packaging(format!("failed to read {}", path.display()), e)
        })?;
        zip.write_all(&content).map_err(|e| {
            BuildError::packaging(format!("failed to compress {}", path.display()), e)
        })?;
    }

    zip.finish()
        .map_err(|e| zip_err("failed to finish archive", e))?;
    Ok(())
}
