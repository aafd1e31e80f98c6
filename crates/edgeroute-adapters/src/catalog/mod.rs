//! Artifact catalogs: what the build actually produced.

mod declared;
mod output_dir;

pub use declared::DeclaredArtifacts;
pub use output_dir::OutputDirCatalog;
