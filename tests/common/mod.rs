use std::collections::BTreeMap;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Time stamped on every fixture entry.
pub fn fixture_time() -> zip::DateTime {
    zip::DateTime::from_date_and_time(2021, 1, 2, 3, 4, 6).unwrap()
}

/// Create a ZIP export fixture.
pub fn create_test_zip(dir: &Path, name: &str, files: &[(&str, &[u8])]) -> PathBuf {
    let zip_path = dir.join(name);
    let file = fs::File::create(&zip_path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored)
        .last_modified_time(fixture_time());

    for (entry_name, content) in files {
        writer.start_file(entry_name.to_string(), options).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap();
    zip_path
}

/// All entries of a ZIP: name -> (bytes, modification time).
pub fn read_entries(zip_path: &Path) -> BTreeMap<String, (Vec<u8>, Option<zip::DateTime>)> {
    let mut archive = zip::ZipArchive::new(fs::File::open(zip_path).unwrap()).unwrap();
    let mut entries = BTreeMap::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).unwrap();
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).unwrap();
        entries.insert(entry.name().to_string(), (bytes, entry.last_modified()));
    }
    entries
}

pub fn text(entries: &BTreeMap<String, (Vec<u8>, Option<zip::DateTime>)>, name: &str) -> String {
    let (bytes, _) = entries
        .get(name)
        .unwrap_or_else(|| panic!("missing entry '{name}', have {:?}", entries.keys()));
    String::from_utf8(bytes.clone()).unwrap()
}
