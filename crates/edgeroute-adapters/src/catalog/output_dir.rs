//! Catalog that walks a build output directory.
//!
//! # Directory layout expected
//!
//! ```text
//! output/
//! ├── static/
//! │   ├── about.html      → /about.html
//! │   └── blog/404.html   → /blog/404.html
//! └── functions/
//!     ├── render.func/    → render
//!     └── api/
//!         └── hello.func/ → api/hello
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use edgeroute_core::{
    application::{ApplicationError, ports::ArtifactCatalog},
    domain::{BuildManifest, BuildOutputs},
    error::EdgeRouteResult,
};

const STATIC_DIR: &str = "static";
const FUNCTIONS_DIR: &str = "functions";
const FUNCTION_SUFFIX: &str = ".func";

#[derive(Debug, Clone)]
pub struct OutputDirCatalog {
    root: PathBuf,
}

impl OutputDirCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn scan_files(&self, outputs: &mut BuildOutputs) -> EdgeRouteResult<()> {
        let dir = self.root.join(STATIC_DIR);
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "No static directory");
            return Ok(());
        }

        for entry in WalkDir::new(&dir).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| scan_error(&dir, e))?;
            if !entry.file_type().is_file() {
                continue;
            }
            outputs.add_file(relative(&dir, entry.path())?);
        }
        Ok(())
    }

    fn scan_functions(&self, outputs: &mut BuildOutputs) -> EdgeRouteResult<()> {
        let dir = self.root.join(FUNCTIONS_DIR);
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "No functions directory");
            return Ok(());
        }

        let mut walker = WalkDir::new(&dir).min_depth(1).sort_by_file_name().into_iter();
        while let Some(entry) = walker.next() {
            let entry = entry.map_err(|e| scan_error(&dir, e))?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let rel = relative(&dir, entry.path())?;
            if let Some(name) = rel.strip_suffix(FUNCTION_SUFFIX) {
                outputs.add_function(name);
                // Function bundles are opaque.
                walker.skip_current_dir();
            }
        }
        Ok(())
    }
}

impl ArtifactCatalog for OutputDirCatalog {
    #[instrument(skip_all, fields(root = %self.root.display()))]
    fn inventory(&self, _manifest: &BuildManifest) -> EdgeRouteResult<BuildOutputs> {
        if !self.root.is_dir() {
            return Err(ApplicationError::ArtifactScan {
                path: self.root.clone(),
                reason: "not a directory".into(),
            }
            .into());
        }

        let mut outputs = BuildOutputs::new();
        self.scan_files(&mut outputs)?;
        self.scan_functions(&mut outputs)?;

        debug!(
            files = outputs.files().count(),
            functions = outputs.functions().count(),
            "Build output scanned"
        );
        Ok(outputs)
    }
}

/// Forward-slash path of `path` relative to `base`.
fn relative(base: &Path, path: &Path) -> EdgeRouteResult<String> {
    let rel = path.strip_prefix(base).map_err(|_| ApplicationError::ArtifactScan {
        path: path.to_path_buf(),
        reason: format!("not under {}", base.display()),
    })?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

fn scan_error(dir: &Path, e: walkdir::Error) -> edgeroute_core::error::EdgeRouteError {
    ApplicationError::ArtifactScan {
        path: e.path().map_or_else(|| dir.to_path_buf(), Path::to_path_buf),
        reason: e.to_string(),
    }
    .into()
}
