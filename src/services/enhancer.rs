//! Whole-export conversion: unpack, rename, rewrite, repack.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::services::archive::{extract_archive, local_zip_time, ZipSink};
use crate::services::config::EnhanceOptions;
use crate::services::fs_utils::path_utils::{split_extension, split_parent, to_relative};
use crate::services::markdown::{rewrite_links, strip_title_line};
use crate::services::metadata::MetadataSource;
use crate::services::renamer::{RenameSession, DOCUMENT_EXTENSION};
use crate::types::{EnhanceError, EnhanceResult};

/// Suffix appended to the input archive's file name for the output.
pub const OUTPUT_SUFFIX: &str = ".formatted";

/// Summary of a finished conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnhanceReport {
    pub output_path: PathBuf,
    pub files_written: usize,
    pub documents_rewritten: usize,
    pub links_rewritten: usize,
    /// Entries left out: bodies that were not valid UTF-8, or output names
    /// already written by another entry.
    pub failed_documents: Vec<String>,
}

/// Take an exported `.zip` and write a prettified copy into `output_dir`.
///
/// - Removes identifiers from every folder and file name
/// - Prefixes emoji icons
/// - Moves pages with sub-pages inside their folder as `!index.md`
/// - Rewrites links inside documents (optional)
/// - Removes the title line of documents (optional)
///
/// Only failures to read the input or write the output abort the run.
pub fn enhance_export(
    source: &dyn MetadataSource,
    zip_path: &Path,
    output_dir: &Path,
    options: &EnhanceOptions,
) -> EnhanceResult<EnhanceReport> {
    let tmp = tempfile::TempDir::new().map_err(|e| EnhanceError::io(&std::env::temp_dir(), e))?;

    log::info!("Extracting '{}' temporarily...", zip_path.display());
    let extracted = extract_archive(zip_path, tmp.path())?;
    log::info!("Extracted {} files", extracted.files_extracted);

    fs::create_dir_all(output_dir).map_err(|e| EnhanceError::io(output_dir, e))?;
    let zip_name = zip_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| EnhanceError::Config(format!("'{}' has no file name", zip_path.display())))?;
    let mut sink = ZipSink::create(&output_dir.join(format!("{zip_name}{OUTPUT_SUFFIX}")))?;

    let mut session = RenameSession::new(source, tmp.path());
    let mut report = EnhanceReport::default();

    // Sorted depth-first walk: collision suffixes depend on this order.
    let walker = WalkDir::new(tmp.path())
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_default();
            EnhanceError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        let Some(rel_path) = to_relative(tmp.path(), entry.path()) else {
            continue;
        };

        log::info!("Working on '{rel_path}'");
        let resolved = session.rename_path_and_times(&rel_path);
        if sink.contains(&resolved.name) {
            log::error!("Skipping '{rel_path}': '{}' was already written", resolved.name);
            report.failed_documents.push(rel_path);
            continue;
        }
        let (_, name) = split_parent(&rel_path);
        let (_, extension) = split_extension(name);

        if extension != DOCUMENT_EXTENSION {
            log::info!(
                "Writing as '{}' with time from original export",
                resolved.name
            );
            let modified = extracted.entry_times.get(&rel_path).copied();
            sink.write_file(&resolved.name, entry.path(), modified)?;
            report.files_written += 1;
            continue;
        }

        let raw = fs::read(entry.path()).map_err(|e| EnhanceError::io(entry.path(), e))?;
        let body = match String::from_utf8(raw) {
            Ok(body) => body,
            Err(_) => {
                log::error!("{}", EnhanceError::Encoding(rel_path.clone()));
                report.failed_documents.push(rel_path);
                continue;
            }
        };

        let mut body = if options.remove_title {
            strip_title_line(&body).to_string()
        } else {
            body
        };
        if options.rewrite_paths {
            let rewrite = rewrite_links(&mut session, &rel_path, &body);
            report.links_rewritten += rewrite.rewritten;
            body = rewrite.body;
        }

        // Documents take the page's edit time; fall back to the export's time.
        let modified = resolved
            .edited_at
            .and_then(local_zip_time)
            .or_else(|| extracted.entry_times.get(&rel_path).copied());
        log::info!("Writing as '{}' with time '{:?}'", resolved.name, resolved.edited_at);
        sink.write_text(&resolved.name, &body, modified)?;
        report.files_written += 1;
        report.documents_rewritten += 1;
    }

    report.output_path = sink.finish()?;
    Ok(report)
}
