//! Kelsa is a letter composition tool: a validated entry form with session-scoped drafts, a
//! preview of the letter on the company template, and single-page PDF export.
//!
//! The flow is one-way:
//!
//! - Fill a [`FormController`]; every keystroke autosaves the draft slot of a [`DraftStore`]
//! - [`FormController::submit`] writes the final slot, [`FormController::handoff`] moves the store
//!   to the preview
//! - [`PreviewPage::open`] projects the submitted [`LetterRecord`] onto the template
//! - [`ExportTrigger::export`] snapshots the letter region and delivers a PDF through a
//!   [`DownloadSink`]
//!
//! Alerts, confirmation prompts, storage and the clock are injected ports, so the same flow runs
//! under tests, the `kelsa` CLI, or any other front end.
#![forbid(unsafe_code)]

mod foundation;

/// Runtime configuration.
pub mod config;
/// Snapshot, PDF assembly, filenames and downloads.
pub mod export;
/// Form page controller.
pub mod form;
/// Alert and confirmation ports.
pub mod notify;
/// Preview page.
pub mod preview;
/// Letter fields and records.
pub mod record;
/// Draft/final slot persistence.
pub mod store;
/// Per-field validation rules.
pub mod validate;

pub use crate::foundation::core::{
    Affine, Clock, FixedClock, Page, PageGeometry, Rect, Size, SystemClock, Vec2, iso_date,
};
pub use crate::foundation::error::{KelsaError, KelsaResult};

pub use crate::config::KelsaConfig;
pub use crate::export::assembly::{DocumentAssembler, PdfAssembler};
pub use crate::export::download::{DirectoryDownloads, DownloadSink, MemoryDownloads};
pub use crate::export::filename::export_filename;
pub use crate::export::snapshot::{RasterImage, SnapshotService, SvgSnapshot};
pub use crate::export::trigger::ExportTrigger;
pub use crate::form::controller::{
    CharCountLevel, CharLimits, FieldStatus, FormController, FormState, PreviewHandoff,
    SubmitOutcome,
};
pub use crate::notify::port::{
    AutoConfirm, ConfirmPort, NotificationKind, NotificationPort, RecordingNotifier,
    ScriptedConfirm, TracingNotifier,
};
pub use crate::preview::display::{DisplayModel, project};
pub use crate::preview::page::{KeyOutcome, PreviewPage};
pub use crate::preview::region::{Region, RegionStyle};
pub use crate::preview::shortcuts::{KeyChord, KeyDisposition, PreviewAction};
pub use crate::preview::zoom::Zoom;
pub use crate::record::fields::Field;
pub use crate::record::letter::LetterRecord;
pub use crate::store::backend::{FileBackend, KvBackend, MemoryBackend};
pub use crate::store::draft::{DraftStore, Slot};
pub use crate::validate::field::{FieldKind, Verdict, validate_field};
