use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::export::assembly::PdfAssembler;
use crate::form::controller::CharLimits;
use crate::foundation::core::PageGeometry;
use crate::foundation::error::{KelsaError, KelsaResult};
use crate::store::backend::FileBackend;
use crate::store::draft::DraftStore;

const MAX_SCALE: f32 = 8.0;

/// Runtime settings, read from a JSON file or defaulted.
///
/// ```json
/// { "snapshot_scale": 2.0, "jpeg_quality": 92, "session_dir": "target/session" }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KelsaConfig {
    /// Device pixels per CSS pixel when snapshotting the letter.
    pub snapshot_scale: f32,
    /// JPEG quality of the page image embedded in the PDF.
    pub jpeg_quality: u8,
    pub page: PageGeometry,
    /// File-backed store location. The store is in-memory when unset.
    pub session_dir: Option<PathBuf>,
    /// Extra font directories for the snapshot renderer.
    pub font_dirs: Vec<PathBuf>,
    pub char_warning: usize,
    pub char_limit: usize,
}

impl Default for KelsaConfig {
    fn default() -> Self {
        let limits = CharLimits::default();
        Self {
            snapshot_scale: 2.0,
            jpeg_quality: PdfAssembler::DEFAULT_QUALITY,
            page: PageGeometry::A4,
            session_dir: None,
            font_dirs: Vec::new(),
            char_warning: limits.warning,
            char_limit: limits.limit,
        }
    }
}

impl KelsaConfig {
    pub fn from_path(path: impl AsRef<Path>) -> KelsaResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)
            .map_err(|e| KelsaError::serde(format!("config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> KelsaResult<()> {
        if !self.snapshot_scale.is_finite()
            || self.snapshot_scale <= 0.0
            || self.snapshot_scale > MAX_SCALE
        {
            return Err(KelsaError::validation(format!(
                "snapshot_scale must be in (0, {MAX_SCALE}]"
            )));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(KelsaError::validation("jpeg_quality must be in 1..=100"));
        }
        self.page.validate()?;
        if self.char_warning > self.char_limit {
            return Err(KelsaError::validation(
                "char_warning must not exceed char_limit",
            ));
        }
        Ok(())
    }

    pub fn char_limits(&self) -> CharLimits {
        CharLimits {
            warning: self.char_warning,
            limit: self.char_limit,
        }
    }

    /// Store for one page session: file-backed under `session_dir`, otherwise in memory.
    pub fn open_store(&self) -> DraftStore {
        match &self.session_dir {
            Some(dir) => DraftStore::new(Box::new(FileBackend::new(dir))),
            None => DraftStore::in_memory(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
