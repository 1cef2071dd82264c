pub mod archive;
pub mod config;
pub mod enhancer;
pub mod fs_utils;
pub mod markdown;
pub mod metadata;
pub mod naming;
pub mod renamer;
