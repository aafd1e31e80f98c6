//! Manifest sources.

mod json_file;
mod memory;

pub use json_file::JsonManifestFile;
pub use memory::InMemoryManifest;
