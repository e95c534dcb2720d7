//! Site archive extraction

use crate::models::error::BuildError;
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;

/// Upper bound on total uncompressed size. A hostile archive must not be
/// able to exhaust the disk.
pub const MAX_UNCOMPRESSED_BYTES: u64 = 512 * 1024 * 1024;

fn corrupt(err: zip::result::ZipError) -> BuildError {
    BuildError::ArchiveCorrupt(err.to_string())
}

/// Extract every entry of the uploaded ZIP into the web-assets directory,
/// preserving relative paths and unix permissions where stored.
pub fn extract_site_archive(bytes: &[u8], web_dir: &Path) -> Result<(), BuildError> {
    extract_with_limit(bytes, web_dir, MAX_UNCOMPRESSED_BYTES)
}

fn extract_with_limit(bytes: &[u8], web_dir: &Path, limit: u64) -> Result<(), BuildError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(corrupt)?;

    if archive.len() == 0 {
        return Err(BuildError::ArchiveCorrupt("archive has no entries".into()));
    }

    // Reject hostile paths and honestly-declared size bombs before touching
    // the disk. Declared sizes are attacker-controlled, so this is only a
    // fast path; the real bound is enforced on bytes actually decompressed.
    let mut declared: u64 = 0;
    for i in 0..archive.len() {
        let entry = archive.by_index(i).map_err(corrupt)?;
        if entry.enclosed_name().is_none() {
            return Err(BuildError::ArchiveCorrupt(format!(
                "entry {:?} escapes the extraction root",
                entry.name()
            )));
        }
        declared = declared.saturating_add(entry.size());
        if declared > limit {
            return Err(BuildError::ArchiveTooLarge { limit });
        }
    }

    let mut budget = limit;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(corrupt)?;
        // Checked above.
        let relative = match entry.enclosed_name() {
            Some(path) => path.to_path_buf(),
            None => continue,
        };
        let name = entry.name().to_string();
        let dest = web_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&dest).map_err(|e| {
                BuildError::packaging(format!("failed to create {}", dest.display()), e)
            })?;
            continue;
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                BuildError::packaging(format!("failed to create {}", parent.display()), e)
            })?;
        }

        // Cap what each entry may decompress to, independent of what its
        // headers claim. One byte over the remaining budget is enough to
        // tell overflow from an exact fit.
        let mut content = Vec::new();
        (&mut entry)
            .take(budget.saturating_add(1))
            .read_to_end(&mut content)
            .map_err(|e| {
                BuildError::ArchiveCorrupt(format!("failed to decompress {}: {}", name, e))
            })?;
        if content.len() as u64 > budget {
            return Err(BuildError::ArchiveTooLarge { limit });
        }
        budget -= content.len() as u64;

        fs::write(&dest, &content)
            .map_err(|e| BuildError::packaging(format!("failed to write {}", dest.display()), e))?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(&dest, fs::Permissions::from_mode(mode));
        }
    }

    Ok(())
}
