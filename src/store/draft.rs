use crate::foundation::error::{KelsaError, KelsaResult};
use crate::record::letter::LetterRecord;
use crate::store::backend::{KvBackend, MemoryBackend};

/// Logical persistence slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Continuously overwritten while the user types.
    Draft,
    /// Written once per successful submission, read by the preview page.
    Final,
    /// Ephemeral page-local data, cleared on unload.
    Scratch,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Draft, Slot::Final, Slot::Scratch];

    pub fn key(self) -> &'static str {
        match self {
            Slot::Draft => "kelsa_letter_draft",
            Slot::Final => "kelsa_letter_data",
            Slot::Scratch => "kelsa_letter_temp",
        }
    }
}

/// Session-scoped store for the draft and submitted letter.
///
/// Constructed once per page session over an injected backend and torn down with
/// [`DraftStore::end_session`]. Stored blobs that fail to decode read as absent.
pub struct DraftStore {
    backend: Box<dyn KvBackend>,
}

impl DraftStore {
    pub fn new(backend: Box<dyn KvBackend>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::new()))
    }

    pub fn save_draft(&mut self, record: &LetterRecord) -> KelsaResult<()> {
        self.write(Slot::Draft, record)
    }

    pub fn save_final(&mut self, record: &LetterRecord) -> KelsaResult<()> {
        self.write(Slot::Final, record)
    }

    /// Read a slot. Missing, unreadable and malformed blobs all yield `None`.
    pub fn load(&self, slot: Slot) -> Option<LetterRecord> {
        match self.try_load(slot) {
            Ok(record) => record,
            Err(err @ KelsaError::PersistenceParse(_)) => {
                tracing::warn!(slot = slot.key(), error = %err, "discarding malformed slot blob");
                None
            }
            Err(err) => {
                tracing::warn!(slot = slot.key(), error = %err, "slot read failed, treating as absent");
                None
            }
        }
    }

    /// Read a slot, reporting a blob that does not decode as [`KelsaError::PersistenceParse`].
    pub fn try_load(&self, slot: Slot) -> KelsaResult<Option<LetterRecord>> {
        let Some(blob) = self.backend.get(slot.key())? else {
            return Ok(None);
        };
        LetterRecord::from_json_str(&blob)
            .map(Some)
            .map_err(|err| KelsaError::persistence_parse(format!("slot '{}': {err}", slot.key())))
    }

    pub fn clear_slot(&mut self, slot: Slot) -> KelsaResult<()> {
        tracing::debug!(slot = slot.key(), "clear slot");
        self.backend.remove(slot.key())
    }

    /// Remove the draft, final and scratch slots.
    pub fn clear_all(&mut self) -> KelsaResult<()> {
        for slot in Slot::ALL {
            self.clear_slot(slot)?;
        }
        Ok(())
    }

    /// Clear every slot and drop the store.
    pub fn end_session(mut self) -> KelsaResult<()> {
        self.clear_all()
    }

    pub fn backend_mut(&mut self) -> &mut dyn KvBackend {
        self.backend.as_mut()
    }

    fn write(&mut self, slot: Slot, record: &LetterRecord) -> KelsaResult<()> {
        let blob = record.to_json_string()?;
        tracing::debug!(slot = slot.key(), bytes = blob.len(), "write slot");
        self.backend.set(slot.key(), blob)
    }
}

impl std::fmt::Debug for DraftStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DraftStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/draft.rs"]
mod tests;
