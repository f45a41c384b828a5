//! Bundled front-end: the landing page and static asset directories.

use anyhow::{Context, Result};
use axum::{body::Bytes, extract::Extension, response::Html};
use std::path::{Path, PathBuf};
use tower_http::services::ServeDir;

const INDEX_FILE: &str = "index.html";

/// Location of the asset bundle plus the landing page loaded at startup.
#[derive(Clone, Debug)]
pub struct Assets {
    root: PathBuf,
    index: Bytes,
}

impl Assets {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, index: impl Into<Bytes>) -> Self {
        Self {
            root: root.into(),
            index: index.into(),
        }
    }

    /// Load `index.html` from `root`; the remaining files are read per request.
    ///
    /// # Errors
    /// Returns an error if the landing page cannot be read.
    pub fn from_dir(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let index_path = root.join(INDEX_FILE);
        let index = std::fs::read(&index_path)
            .with_context(|| format!("Failed to read landing page {}", index_path.display()))?;
        Ok(Self::new(root, index))
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File server rooted at the bundle; request paths map directly onto it.
    #[must_use]
    pub fn service(&self) -> ServeDir {
        ServeDir::new(&self.root)
    }
}

/// Landing page, also answering every unmatched non-API path.
pub async fn home(Extension(assets): Extension<Assets>) -> Html<Bytes> {
    Html(assets.index)
}
