use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.notion.so/api/v3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_TRIES: u32 = 5;

/// What to do to each markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhanceOptions {
    /// Drop the title heading on the first line.
    pub remove_title: bool,
    /// Rewrite relative links and images to the renamed paths.
    pub rewrite_paths: bool,
}

impl Default for EnhanceOptions {
    fn default() -> Self {
        Self {
            remove_title: false,
            rewrite_paths: true,
        }
    }
}

/// Settings for the HTTP metadata source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Value of the `token_v2` session cookie.
    pub token_v2: String,
    pub base_url: String,
    pub timeout: Duration,
    /// Attempts per lookup, including the first.
    pub max_tries: u32,
}

impl ClientConfig {
    pub fn new(token_v2: impl Into<String>) -> Self {
        Self {
            token_v2: token_v2.into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_tries: DEFAULT_MAX_TRIES,
        }
    }
}
