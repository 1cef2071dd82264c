use super::*;
use chrono::NaiveDate;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper: create a ZIP with fixed entry times.
fn create_test_zip(dir: &Path, name: &str, files: &[(&str, &[u8])]) -> PathBuf {
    let zip_path = dir.join(name);
    let file = fs::File::create(&zip_path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let time = zip::DateTime::from_date_and_time(2021, 1, 2, 3, 4, 6).unwrap();
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored)
        .last_modified_time(time);

    for (entry_name, content) in files {
        writer.start_file(entry_name.to_string(), options).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap();
    zip_path
}

#[test]
fn test_extract_zip_basic() {
    let dir = TempDir::new().unwrap();
    let zip_path = create_test_zip(
        dir.path(),
        "export.zip",
        &[("Page.md", b"# Page"), ("Page/image.png", b"png")],
    );
    let dest = dir.path().join("out");

    let extracted = extract_archive(&zip_path, &dest).unwrap();

    assert_eq!(extracted.files_extracted, 2);
    assert_eq!(fs::read_to_string(dest.join("Page.md")).unwrap(), "# Page");
    assert!(dest.join("Page").is_dir());
    let time = extracted.entry_times.get("Page/image.png").unwrap();
    assert_eq!((time.year(), time.month(), time.day()), (2021, 1, 2));
}

#[test]
fn test_extract_missing_archive_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = extract_archive(&dir.path().join("missing.zip"), dir.path());
    assert!(matches!(result, Err(crate::types::EnhanceError::Io { .. })));
}

#[test]
fn test_extract_corrupt_archive_is_archive_error() {
    let dir = TempDir::new().unwrap();
    let bogus = dir.path().join("bogus.zip");
    fs::write(&bogus, b"not a zip").unwrap();

    let result = extract_archive(&bogus, &dir.path().join("out"));
    assert!(matches!(result, Err(crate::types::EnhanceError::Archive(_))));
}

#[test]
fn test_sink_writes_text_and_files() {
    let dir = TempDir::new().unwrap();
    let source_file = dir.path().join("raw.png");
    fs::write(&source_file, b"\x89PNG").unwrap();
    let out_path = dir.path().join("out.zip");
    let edited = to_zip_time(
        NaiveDate::from_ymd_opt(2020, 12, 29)
            .unwrap()
            .and_hms_opt(10, 45, 30)
            .unwrap(),
    );

    let mut sink = ZipSink::create(&out_path).unwrap();
    sink.write_text("A/!index.md", "hello", edited).unwrap();
    sink.write_file("A/raw.png", &source_file, None).unwrap();
    assert!(sink.contains("A/raw.png"));
    assert!(!sink.contains("A/other.png"));
    assert_eq!(sink.finish().unwrap(), out_path);

    let mut archive = zip::ZipArchive::new(fs::File::open(&out_path).unwrap()).unwrap();
    let mut text = String::new();
    let mut entry = archive.by_name("A/!index.md").unwrap();
    entry.read_to_string(&mut text).unwrap();
    assert_eq!(text, "hello");
    let time = entry.last_modified().unwrap();
    assert_eq!(
        (time.year(), time.month(), time.day(), time.hour(), time.minute()),
        (2020, 12, 29, 10, 45)
    );
    drop(entry);

    let mut bytes = Vec::new();
    archive
        .by_name("A/raw.png")
        .unwrap()
        .read_to_end(&mut bytes)
        .unwrap();
    assert_eq!(bytes, b"\x89PNG");
}

#[test]
fn test_zip_time_range() {
    let too_old = NaiveDate::from_ymd_opt(1970, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert!(to_zip_time(too_old).is_none());

    let too_new = NaiveDate::from_ymd_opt(2498, 3, 5)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert!(to_zip_time(too_new).is_none());
}
