//! Name derivation for exported path components.

pub mod identifier;
pub mod normalizer;
pub mod resolver;

pub use identifier::{extract_identifier, ExtractedName};
pub use resolver::{rewrite_name, NameRewrite};

#[cfg(test)]
#[path = "tests/identifier_tests.rs"]
mod identifier_tests;

#[cfg(test)]
#[path = "tests/normalizer_tests.rs"]
mod normalizer_tests;

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod resolver_tests;
