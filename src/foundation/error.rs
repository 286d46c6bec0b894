/// Convenience result type used across Kelsa.
pub type KelsaResult<T> = Result<T, KelsaError>;

/// Top-level error taxonomy used by the form, preview and export APIs.
#[derive(thiserror::Error, Debug)]
pub enum KelsaError {
    /// A field value or configuration value failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// The preview page was opened without a submitted letter in the final slot.
    #[error("data absent: no submitted letter found")]
    DataAbsent,

    /// A stored blob could not be decoded into a letter record.
    #[error("persistence parse error: {0}")]
    PersistenceParse(String),

    /// The snapshot, assembly or download step of an export failed.
    #[error("export error: {0}")]
    Export(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KelsaError {
    /// Build a [`KelsaError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`KelsaError::PersistenceParse`] value.
    pub fn persistence_parse(msg: impl Into<String>) -> Self {
        Self::PersistenceParse(msg.into())
    }

    /// Build a [`KelsaError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`KelsaError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether the user can recover by retrying or correcting input on the same page.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Export(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
