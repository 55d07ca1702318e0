//! Static file serving module
//!
//! Maps a URL path onto a file under the static root, loads it and picks a
//! content type from its extension.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::StaticFilesConfig;
use crate::error::HttpError;
use crate::http::{mime, Response, Status};
use crate::logger;

/// Static file resolver rooted at one directory
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
    index_file: String,
    confine_to_root: bool,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>, index_file: impl Into<String>, confine_to_root: bool) -> Self {
        Self {
            root: root.into(),
            index_file: index_file.into(),
            confine_to_root,
        }
    }

    pub fn from_config(config: &StaticFilesConfig) -> Self {
        Self::new(&config.root, &config.index_file, config.confine_to_root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory if missing; returns whether it was created
    pub fn ensure_root(&self) -> std::io::Result<bool> {
        if self.root.exists() {
            return Ok(false);
        }
        fs::create_dir_all(&self.root)?;
        Ok(true)
    }

    /// Resolve a URL path to an existing regular file
    ///
    /// Leading slashes are stripped and the rest joined under the root. A
    /// directory resolves to its index file. The path is not decoded and a
    /// query string is not removed.
    pub fn resolve(&self, url_path: &str) -> Result<PathBuf, HttpError> {
        let mut file_path = self.root.join(url_path.trim_start_matches('/'));
        if file_path.is_dir() {
            file_path = file_path.join(&self.index_file);
        }

        if !file_path.is_file() {
            return Err(HttpError::NotFound(file_path));
        }

        if self.confine_to_root {
            self.check_within_root(url_path, &file_path)?;
        }

        Ok(file_path)
    }

    /// Reject files whose canonical path lies outside the canonical root
    fn check_within_root(&self, url_path: &str, file_path: &Path) -> Result<(), HttpError> {
        let root = self.root.canonicalize().map_err(|e| {
            logger::log_warning(&format!(
                "Static directory not found or inaccessible '{}': {e}",
                self.root.display()
            ));
            HttpError::NotFound(file_path.to_path_buf())
        })?;
        let canonical = file_path
            .canonicalize()
            .map_err(|_| HttpError::NotFound(file_path.to_path_buf()))?;

        if canonical.starts_with(&root) {
            Ok(())
        } else {
            logger::log_warning(&format!(
                "Path traversal attempt blocked: {url_path} -> {}",
                canonical.display()
            ));
            Err(HttpError::OutsideRoot(canonical))
        }
    }

    /// Resolve and load a file into a 200 response
    pub fn serve(&self, url_path: &str) -> Result<Response, HttpError> {
        let file_path = self.resolve(url_path)?;
        let content = fs::read(&file_path).map_err(|source| {
            let err = HttpError::FileRead {
                path: file_path.clone(),
                source,
            };
            logger::log_error(&err.to_string());
            err
        })?;

        Ok(Response::new(
            Status::Ok,
            mime::content_type_for(&file_path),
            content,
        ))
    }
}
