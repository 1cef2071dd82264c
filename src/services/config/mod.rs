pub mod models;

pub use models::*;

use std::time::Duration;

pub const ENV_BASE_URL: &str = "NOTION_API_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "NOTION_TIMEOUT_SECS";
pub const ENV_MAX_TRIES: &str = "NOTION_MAX_TRIES";

impl ClientConfig {
    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`. Unparseable values are logged and ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.timeout = Duration::from_secs(secs),
                _ => log::warn!("Ignoring invalid {ENV_TIMEOUT_SECS}='{raw}'"),
            }
        }

        if let Some(raw) = lookup(ENV_MAX_TRIES) {
            match raw.trim().parse::<u32>() {
                Ok(tries) if tries > 0 => self.max_tries = tries,
                _ => log::warn!("Ignoring invalid {ENV_MAX_TRIES}='{raw}'"),
            }
        }

        self
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
