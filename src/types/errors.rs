use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("I/O error at '{path}': {message}")]
    Io { path: String, message: String },
    #[error("Archive error: {0}")]
    Archive(String),
    #[error("Document '{0}' is not valid UTF-8")]
    Encoding(String),
    #[error("Config error: {0}")]
    Config(String),
}

impl EnhanceError {
    /// Wrap an I/O failure with the path it happened on.
    pub fn io(path: &Path, error: std::io::Error) -> Self {
        EnhanceError::Io {
            path: path.display().to_string(),
            message: error.to_string(),
        }
    }
}

impl From<zip::result::ZipError> for EnhanceError {
    fn from(error: zip::result::ZipError) -> Self {
        EnhanceError::Archive(error.to_string())
    }
}

pub type EnhanceResult<T> = Result<T, EnhanceError>;

/// Why a metadata lookup produced no usable page.
///
/// Never fatal to a conversion: the affected name is passed through.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("No record for identifier {0}")]
    NotFound(String),
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("Malformed record: {0}")]
    Decode(String),
    #[error("No page found around identifier {0}")]
    NoPage(String),
    #[error("Ambiguous children for identifier {id}: {count} pages")]
    Ambiguous { id: String, count: usize },
}

#[cfg(test)]
#[path = "tests/errors_tests.rs"]
mod tests;
