//! Markdown document rewriting.

pub mod links;

pub use links::{rewrite_links, LinkRewrite};

/// Drop the first line (the title heading the exporter injects).
pub fn strip_title_line(body: &str) -> &str {
    match body.split_once('\n') {
        Some((_, rest)) => rest,
        None => "",
    }
}

#[cfg(test)]
#[path = "tests/links_tests.rs"]
mod links_tests;
