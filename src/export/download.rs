use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context as _;

use crate::foundation::error::{KelsaError, KelsaResult};

/// Where generated documents are delivered.
pub trait DownloadSink: Send + Sync {
    /// Store `bytes` under `filename` and return the location it was written to.
    fn save(&self, filename: &str, bytes: &[u8]) -> KelsaResult<PathBuf>;
}

/// Writes downloads into one output directory, creating it on first use.
#[derive(Clone, Debug)]
pub struct DirectoryDownloads {
    dir: PathBuf,
}

impl DirectoryDownloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectoryDownloads {
    fn save(&self, filename: &str, bytes: &[u8]) -> KelsaResult<PathBuf> {
        check_filename(filename)?;
        let path = self.dir.join(filename);
        ensure_parent_dir(&path)?;
        std::fs::write(&path, bytes)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "download written");
        Ok(path)
    }
}

/// Records downloads in memory.
#[derive(Debug, Default)]
pub struct MemoryDownloads {
    files: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemoryDownloads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every saved `(filename, bytes)` pair, oldest first.
    pub fn files(&self) -> Vec<(String, Vec<u8>)> {
        self.files.lock().map(|f| f.clone()).unwrap_or_default()
    }

    pub fn names(&self) -> Vec<String> {
        self.files().into_iter().map(|(name, _)| name).collect()
    }

    pub fn len(&self) -> usize {
        self.files.lock().map(|f| f.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DownloadSink for MemoryDownloads {
    fn save(&self, filename: &str, bytes: &[u8]) -> KelsaResult<PathBuf> {
        check_filename(filename)?;
        self.files
            .lock()
            .map_err(|_| KelsaError::export("download registry poisoned"))?
            .push((filename.to_string(), bytes.to_vec()));
        Ok(PathBuf::from(filename))
    }
}

/// A download name is a single path component.
fn check_filename(filename: &str) -> KelsaResult<()> {
    let bad = filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains(['/', '\\'])
        || filename.contains('\0');
    if bad {
        return Err(KelsaError::export(format!(
            "invalid download filename '{filename}'"
        )));
    }
    Ok(())
}

/// Create the parent directory of `path` when it is missing.
pub fn ensure_parent_dir(path: &Path) -> KelsaResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/export/download.rs"]
mod tests;
