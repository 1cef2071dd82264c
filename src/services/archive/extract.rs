use std::fs;
use std::io;
use std::path::Path;

use super::types::ExtractedArchive;
use crate::types::{EnhanceError, EnhanceResult};

/// Unpack a ZIP export into `dest_path`, remembering each file's original time.
///
/// Entries whose names would escape `dest_path` are skipped.
pub fn extract_archive(archive_path: &Path, dest_path: &Path) -> EnhanceResult<ExtractedArchive> {
    let file = fs::File::open(archive_path).map_err(|e| EnhanceError::io(archive_path, e))?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| EnhanceError::Archive(format!("Invalid or corrupt ZIP: {e}")))?;

    let mut extracted = ExtractedArchive::default();
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| EnhanceError::Archive(format!("Failed to read entry {i}: {e}")))?;

        let entry_path = match entry.enclosed_name() {
            Some(p) => p.to_path_buf(),
            None => {
                log::warn!("Skipping unsafe entry '{}'", entry.name());
                continue;
            }
        };

        let output_path = dest_path.join(&entry_path);

        if entry.is_dir() {
            fs::create_dir_all(&output_path).map_err(|e| EnhanceError::io(&output_path, e))?;
            continue;
        }

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| EnhanceError::io(parent, e))?;
        }
        let mut outfile =
            fs::File::create(&output_path).map_err(|e| EnhanceError::io(&output_path, e))?;
        io::copy(&mut entry, &mut outfile).map_err(|e| EnhanceError::io(&output_path, e))?;

        if let Some(modified) = entry.last_modified() {
            let key = entry_path
                .components()
                .map(|c| c.as_os_str().to_string_lossy().to_string())
                .collect::<Vec<_>>()
                .join("/");
            extracted.entry_times.insert(key, modified);
        }
        extracted.files_extracted += 1;
    }

    Ok(extracted)
}
