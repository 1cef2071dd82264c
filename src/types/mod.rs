pub mod errors;

pub use errors::{EnhanceError, EnhanceResult, LookupError};
