//! Static site scripts served from an allow-list.
//!
//! DESIGN
//! ======
//! The allow-list is the set of `*.js` file names found in the site
//! directory at startup. Requests match by exact file name only, so path
//! segments such as `..` can never reach the filesystem.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

const ASSET_EXTENSION: &str = "js";

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not allow-listed: {0}")]
    NotAllowed(String),
    #[error("failed to read asset {name}: {source}")]
    Read { name: String, source: io::Error },
}

pub struct SiteAssets {
    dir: PathBuf,
    files: HashSet<String>,
}

impl SiteAssets {
    /// An allow-list that serves nothing.
    #[must_use]
    pub fn empty(dir: &Path) -> Self {
        Self { dir: dir.to_path_buf(), files: HashSet::new() }
    }

    /// Build the allow-list from the scripts currently in `dir`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if `dir` cannot be listed.
    pub fn scan(dir: &Path) -> io::Result<Self> {
        let mut files = HashSet::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(ASSET_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                files.insert(name.to_owned());
            }
        }
        Ok(Self { dir: dir.to_path_buf(), files })
    }

    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_allowed(&self, name: &str) -> bool {
        self.files.contains(name)
    }

    /// Read an allow-listed file.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::NotAllowed`] for names outside the allow-list
    /// and [`AssetError::Read`] if the file disappeared since startup.
    pub async fn read(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        if !self.is_allowed(name) {
            return Err(AssetError::NotAllowed(name.to_owned()));
        }
        tokio::fs::read(self.dir.join(name))
            .await
            .map_err(|source| AssetError::Read { name: name.to_owned(), source })
    }
}

#[cfg(test)]
#[path = "assets_test.rs"]
mod tests;
