use std::collections::HashMap;

/// Result of unpacking an export.
#[derive(Debug, Clone, Default)]
pub struct ExtractedArchive {
    pub files_extracted: usize,
    /// Modification time of every file entry, keyed by its `/`-separated path.
    pub entry_times: HashMap<String, zip::DateTime>,
}
