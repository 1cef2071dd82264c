use chrono::{DateTime, Datelike, Local, NaiveDateTime, Timelike, Utc};
use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::types::{EnhanceError, EnhanceResult};

/// Output archive: entries are written at explicit paths, optionally with an
/// explicit modification time.
pub struct ZipSink {
    writer: ZipWriter<fs::File>,
    path: PathBuf,
    names: HashSet<String>,
}

impl ZipSink {
    pub fn create(path: &Path) -> EnhanceResult<Self> {
        let file = fs::File::create(path).map_err(|e| EnhanceError::io(path, e))?;
        Ok(Self {
            writer: ZipWriter::new(file),
            path: path.to_path_buf(),
            names: HashSet::new(),
        })
    }

    fn start(&mut self, entry: &str, modified: Option<zip::DateTime>) -> EnhanceResult<()> {
        let mut options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        if let Some(modified) = modified {
            options = options.last_modified_time(modified);
        }
        self.writer.start_file(entry, options)?;
        self.names.insert(entry.to_string());
        Ok(())
    }

    /// Write in-memory text as `entry`.
    pub fn write_text(
        &mut self,
        entry: &str,
        content: &str,
        modified: Option<zip::DateTime>,
    ) -> EnhanceResult<()> {
        self.start(entry, modified)?;
        self.writer
            .write_all(content.as_bytes())
            .map_err(|e| EnhanceError::io(&self.path, e))
    }

    /// Copy the bytes of `source` into the archive as `entry`.
    pub fn write_file(
        &mut self,
        entry: &str,
        source: &Path,
        modified: Option<zip::DateTime>,
    ) -> EnhanceResult<()> {
        let mut file = fs::File::open(source).map_err(|e| EnhanceError::io(source, e))?;
        self.start(entry, modified)?;
        io::copy(&mut file, &mut self.writer).map_err(|e| EnhanceError::io(source, e))?;
        Ok(())
    }

    /// Whether an entry called `entry` was already written.
    pub fn contains(&self, entry: &str) -> bool {
        self.names.contains(entry)
    }

    /// Finalize the central directory and return the archive path.
    pub fn finish(self) -> EnhanceResult<PathBuf> {
        self.writer.finish()?;
        Ok(self.path)
    }
}

/// ZIP timestamp for a wall-clock time. ZIP cannot represent years outside 1980..=2107.
pub fn to_zip_time(time: NaiveDateTime) -> Option<zip::DateTime> {
    zip::DateTime::from_date_and_time(
        u16::try_from(time.year()).ok()?,
        time.month() as u8,
        time.day() as u8,
        time.hour() as u8,
        time.minute() as u8,
        time.second() as u8,
    )
    .ok()
}

/// ZIP timestamp for an instant, in local time as ZIP tools expect.
pub fn local_zip_time(time: DateTime<Utc>) -> Option<zip::DateTime> {
    to_zip_time(time.with_timezone(&Local).naive_local())
}
