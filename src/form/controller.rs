use std::collections::BTreeMap;
use std::sync::Arc;

use crate::foundation::core::{Clock, iso_date};
use crate::foundation::error::{KelsaError, KelsaResult};
use crate::notify::port::{ConfirmPort, NotificationKind, NotificationPort};
use crate::record::fields::Field;
use crate::record::letter::LetterRecord;
use crate::store::draft::{DraftStore, Slot};
use crate::validate::field::{Verdict, validate_field};

const CLEAR_PROMPT: &str =
    "Are you sure you want to clear all form data? This action cannot be undone.";

/// Lifecycle of the form page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Validating,
    Submitted,
}

/// Visual validation state of one field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FieldStatus {
    #[default]
    Untouched,
    Valid,
    Error(String),
}

/// Thresholds of the letter body character counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharLimits {
    /// Counts above this show a warning.
    pub warning: usize,
    /// Counts above this are flagged as over the limit.
    pub limit: usize,
}

impl Default for CharLimits {
    fn default() -> Self {
        Self {
            warning: 1500,
            limit: 2000,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharCountLevel {
    Normal,
    Warning,
    Over,
}

/// Result of [`FormController::submit`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The final slot was written; call [`FormController::handoff`] to navigate.
    Accepted,
    /// Submission aborted; these required fields failed validation.
    Rejected { invalid: Vec<Field> },
}

/// Ownership of the session store passed from the form page to the preview page.
#[derive(Debug)]
pub struct PreviewHandoff {
    store: DraftStore,
}

impl PreviewHandoff {
    pub fn into_store(self) -> DraftStore {
        self.store
    }
}

/// Drives the letter form: per-field validation, autosave and submission.
pub struct FormController {
    store: DraftStore,
    notifier: Arc<dyn NotificationPort>,
    clock: Arc<dyn Clock>,
    values: BTreeMap<Field, String>,
    status: BTreeMap<Field, FieldStatus>,
    state: FormState,
    limits: CharLimits,
}

impl FormController {
    /// Open the form page. Every persisted slot is cleared and the letter date defaults to
    /// today.
    pub fn open(
        mut store: DraftStore,
        notifier: Arc<dyn NotificationPort>,
        clock: Arc<dyn Clock>,
    ) -> KelsaResult<Self> {
        store.clear_all()?;

        let mut values = BTreeMap::new();
        values.insert(Field::LetterDate, iso_date(clock.today()));

        tracing::debug!("form page opened");
        Ok(Self {
            store,
            notifier,
            clock,
            values,
            status: BTreeMap::new(),
            state: FormState::Editing,
            limits: CharLimits::default(),
        })
    }

    pub fn with_char_limits(mut self, limits: CharLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn status(&self, field: Field) -> &FieldStatus {
        static UNTOUCHED: FieldStatus = FieldStatus::Untouched;
        self.status.get(&field).unwrap_or(&UNTOUCHED)
    }

    pub fn store(&self) -> &DraftStore {
        &self.store
    }

    /// A keystroke in `field`. Clears that field's error and autosaves the whole form to the
    /// draft slot. Ignored once the form has been submitted.
    pub fn on_input(&mut self, field: Field, value: impl Into<String>) -> KelsaResult<()> {
        if self.state == FormState::Submitted {
            tracing::debug!(%field, "input ignored after submission");
            return Ok(());
        }

        self.values.insert(field, value.into());
        if matches!(self.status.get(&field), Some(FieldStatus::Error(_))) {
            self.status.insert(field, FieldStatus::Untouched);
        }
        self.autosave()
    }

    /// Focus left `field`: validate it and record the visual state.
    pub fn on_blur(&mut self, field: Field) -> Verdict {
        let verdict = validate_field(
            self.value(field),
            &field.constraints(),
            self.clock.today(),
        );
        let status = if verdict.valid {
            FieldStatus::Valid
        } else {
            FieldStatus::Error(verdict.message.clone())
        };
        self.status.insert(field, status);
        verdict
    }

    /// Re-validate every required field. On success the freshly collected record is written to
    /// the final slot.
    pub fn submit(&mut self) -> KelsaResult<SubmitOutcome> {
        if self.state == FormState::Submitted {
            return Ok(SubmitOutcome::Accepted);
        }

        self.state = FormState::Validating;
        let invalid: Vec<Field> = Field::required()
            .filter(|&field| !self.on_blur(field).valid)
            .collect();

        if !invalid.is_empty() {
            self.state = FormState::Editing;
            tracing::info!(invalid = invalid.len(), "submission rejected");
            self.notifier
                .notify("Please fix the errors above", NotificationKind::Error);
            return Ok(SubmitOutcome::Rejected { invalid });
        }

        let record = self.collect();
        if let Err(err) = self.store.save_final(&record) {
            self.state = FormState::Editing;
            return Err(err);
        }
        self.state = FormState::Submitted;
        tracing::info!(fields = record.len(), "letter submitted");
        Ok(SubmitOutcome::Accepted)
    }

    /// Navigate to the preview page. Only valid after an accepted submission. The draft and
    /// scratch slots are dropped; the final slot travels with the handoff.
    pub fn handoff(mut self) -> KelsaResult<PreviewHandoff> {
        if self.state != FormState::Submitted {
            return Err(KelsaError::validation(
                "form must be submitted before navigating to the preview",
            ));
        }
        self.store.clear_slot(Slot::Draft)?;
        self.store.clear_slot(Slot::Scratch)?;
        Ok(PreviewHandoff { store: self.store })
    }

    /// Reset the whole form after the user confirms. Returns whether anything was cleared.
    pub fn clear_form(&mut self, confirm: &dyn ConfirmPort) -> KelsaResult<bool> {
        if !confirm.confirm(CLEAR_PROMPT) {
            return Ok(false);
        }

        self.values.clear();
        self.values
            .insert(Field::LetterDate, iso_date(self.clock.today()));
        self.status.clear();
        self.state = FormState::Editing;
        self.store.clear_slot(Slot::Draft)?;

        self.notifier
            .notify("Form cleared successfully", NotificationKind::Success);
        Ok(true)
    }

    /// The full field set as a new record. Empty fields are included as empty strings.
    pub fn collect(&self) -> LetterRecord {
        Field::ALL
            .into_iter()
            .map(|f| (f, self.value(f).to_string()))
            .collect()
    }

    pub fn body_char_count(&self) -> usize {
        self.value(Field::LetterBody).chars().count()
    }

    pub fn body_char_level(&self) -> CharCountLevel {
        let n = self.body_char_count();
        if n > self.limits.limit {
            CharCountLevel::Over
        } else if n > self.limits.warning {
            CharCountLevel::Warning
        } else {
            CharCountLevel::Normal
        }
    }

    /// Whether the draft slot holds edits that were never submitted.
    pub fn has_unsaved_changes(&self) -> bool {
        match self.store.load(Slot::Draft) {
            Some(draft) => self.store.load(Slot::Final).as_ref() != Some(&draft),
            None => false,
        }
    }

    /// Leave the page without submitting. Every slot is cleared.
    pub fn unload(self) -> KelsaResult<()> {
        tracing::debug!("form page unloaded");
        self.store.end_session()
    }

    fn autosave(&mut self) -> KelsaResult<()> {
        let record = self.collect();
        self.store.save_draft(&record)
    }
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("state", &self.state)
            .field("values", &self.values)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/form/controller.rs"]
mod tests;
