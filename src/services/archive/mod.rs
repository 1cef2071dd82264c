//! Archive container I/O: unpacking the export and writing the result.

mod extract;
mod sink;
mod types;

pub use extract::extract_archive;
pub use sink::{local_zip_time, to_zip_time, ZipSink};
pub use types::ExtractedArchive;

#[cfg(test)]
#[path = "tests/archive_tests.rs"]
mod tests;
