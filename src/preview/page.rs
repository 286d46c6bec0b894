use std::path::PathBuf;
use std::sync::Arc;

use crate::export::trigger::ExportTrigger;
use crate::form::controller::PreviewHandoff;
use crate::foundation::core::Page;
use crate::foundation::error::{KelsaError, KelsaResult};
use crate::notify::port::{ConfirmPort, NotificationKind, NotificationPort};
use crate::preview::display::{DisplayModel, project};
use crate::preview::region::Region;
use crate::preview::shortcuts::{KeyChord, KeyDisposition, PreviewAction, dispatch};
use crate::preview::zoom::Zoom;
use crate::record::letter::LetterRecord;
use crate::store::draft::{DraftStore, Slot};

const NO_DATA_MESSAGE: &str = "No letter data found. Please fill out the form first.";
const EDIT_PROMPT: &str = "Do you want to edit this letter? Any unsaved changes will be preserved.";

/// What a key press did on the preview page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyOutcome {
    pub disposition: KeyDisposition,
    /// Set when the key press navigated away.
    pub navigate: Option<Page>,
    /// Set when the key press produced a file.
    pub exported: Option<PathBuf>,
}

/// The preview page: the submitted letter projected onto the template, with zoom, edit and
/// export controls.
pub struct PreviewPage {
    record: LetterRecord,
    region: Region,
    zoom: Zoom,
    store: DraftStore,
}

impl PreviewPage {
    /// Open the preview from the final slot. Every slot is cleared afterwards, so reopening the
    /// page shows the absent-data state.
    ///
    /// Fails with [`KelsaError::DataAbsent`] when the final slot is missing or malformed; nothing
    /// is rendered in that case.
    pub fn open(mut store: DraftStore, notifier: Arc<dyn NotificationPort>) -> KelsaResult<Self> {
        let loaded = store.load(Slot::Final);
        store.clear_all()?;

        let Some(record) = loaded else {
            tracing::warn!("preview opened without a submitted letter");
            notifier.notify(NO_DATA_MESSAGE, NotificationKind::Error);
            return Err(KelsaError::DataAbsent);
        };

        let region = Region::new(project(&record));
        tracing::info!(subject = %region.display.subject, "preview opened");
        Ok(Self {
            record,
            region,
            zoom: Zoom::new(),
            store,
        })
    }

    pub fn from_handoff(
        handoff: PreviewHandoff,
        notifier: Arc<dyn NotificationPort>,
    ) -> KelsaResult<Self> {
        Self::open(handoff.into_store(), notifier)
    }

    pub fn record(&self) -> &LetterRecord {
        &self.record
    }

    pub fn display(&self) -> &DisplayModel {
        &self.region.display
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn adjust_zoom(&mut self, delta: f64) {
        self.zoom.adjust(delta);
        self.region.style.transform = self.zoom.transform();
        tracing::debug!(zoom = %self.zoom.label(), "zoom changed");
    }

    pub fn zoom_in(&mut self) {
        self.adjust_zoom(Zoom::STEP);
    }

    pub fn zoom_out(&mut self) {
        self.adjust_zoom(-Zoom::STEP);
    }

    /// Ask before returning to the form. The prompt is UX copy only: the form page starts from
    /// a cleared store either way.
    pub fn edit(&self, confirm: &dyn ConfirmPort) -> Option<Page> {
        confirm.confirm(EDIT_PROMPT).then_some(Page::Form)
    }

    /// Render the letter region into a downloadable document.
    pub fn export(&mut self, trigger: &ExportTrigger) -> KelsaResult<PathBuf> {
        trigger.export(&mut self.region)
    }

    pub fn handle_key(
        &mut self,
        chord: KeyChord,
        confirm: &dyn ConfirmPort,
        trigger: &ExportTrigger,
    ) -> KelsaResult<KeyOutcome> {
        let disposition = dispatch(chord);
        let mut outcome = KeyOutcome {
            disposition,
            navigate: None,
            exported: None,
        };

        match disposition.action {
            None => {}
            Some(PreviewAction::Export) => outcome.exported = Some(self.export(trigger)?),
            Some(PreviewAction::Edit) => outcome.navigate = self.edit(confirm),
            Some(PreviewAction::ZoomIn) => self.zoom_in(),
            Some(PreviewAction::ZoomOut) => self.zoom_out(),
        }
        Ok(outcome)
    }

    /// Leave the page. The scratch slot is dropped and the store is handed back for the next
    /// page.
    pub fn leave(mut self) -> KelsaResult<DraftStore> {
        self.store.clear_slot(Slot::Scratch)?;
        Ok(self.store)
    }
}

impl std::fmt::Debug for PreviewPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewPage")
            .field("region", &self.region)
            .field("zoom", &self.zoom)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preview/page.rs"]
mod tests;
