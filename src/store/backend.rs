use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{KelsaError, KelsaResult};

/// A string key-value persistence area.
///
/// Implementations are local and synchronous; a single writer is assumed.
pub trait KvBackend {
    fn get(&self, key: &str) -> KelsaResult<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> KelsaResult<()>;
    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> KelsaResult<()>;
}

/// In-process map backend.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    entries: BTreeMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored keys, in key order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl KvBackend for MemoryBackend {
    fn get(&self, key: &str) -> KelsaResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> KelsaResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> KelsaResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Directory backend: one `<key>.json` file per key.
#[derive(Clone, Debug)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> KelsaResult<PathBuf> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(KelsaError::validation(format!(
                "storage key '{key}' must be non-empty [A-Za-z0-9_-]"
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KvBackend for FileBackend {
    fn get(&self, key: &str) -> KelsaResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("read slot '{}'", path.display()))
                .into()),
        }
    }

    fn set(&mut self, key: &str, value: String) -> KelsaResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create session dir '{}'", self.dir.display()))?;
        std::fs::write(&path, value).with_context(|| format!("write slot '{}'", path.display()))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> KelsaResult<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("remove slot '{}'", path.display()))
                .into()),
        }
    }
}
