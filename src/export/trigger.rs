use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::export::assembly::DocumentAssembler;
use crate::export::download::DownloadSink;
use crate::export::filename::export_filename;
use crate::export::snapshot::SnapshotService;
use crate::foundation::core::{Clock, PageGeometry};
use crate::foundation::error::{KelsaError, KelsaResult};
use crate::notify::port::{NotificationKind, NotificationPort};
use crate::preview::region::{NeutralStyle, Region};

const SUCCESS_MESSAGE: &str = "PDF generated successfully!";
const FAILURE_MESSAGE: &str = "Failed to generate PDF. Please try again.";
const BUSY_MESSAGE: &str = "export already in progress";

/// Snapshot scale used when none is configured.
pub const DEFAULT_SCALE: f32 = 2.0;

/// Turns the preview region into a downloaded document: snapshot, assemble, save.
///
/// Exports are serialized: while one runs, further requests fail fast instead of queueing.
pub struct ExportTrigger {
    snapshot: Box<dyn SnapshotService>,
    assembler: Box<dyn DocumentAssembler>,
    downloads: Box<dyn DownloadSink>,
    notifier: Arc<dyn NotificationPort>,
    clock: Arc<dyn Clock>,
    scale: f32,
    page: PageGeometry,
    in_flight: AtomicBool,
}

impl ExportTrigger {
    pub fn new(
        snapshot: Box<dyn SnapshotService>,
        assembler: Box<dyn DocumentAssembler>,
        downloads: Box<dyn DownloadSink>,
        notifier: Arc<dyn NotificationPort>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            snapshot,
            assembler,
            downloads,
            notifier,
            clock,
            scale: DEFAULT_SCALE,
            page: PageGeometry::A4,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_page(mut self, page: PageGeometry) -> Self {
        self.page = page;
        self
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn page(&self) -> PageGeometry {
        self.page
    }

    /// Whether an export is currently running.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Export `region` to a document named after its subject and today's date.
    ///
    /// The region is snapshotted with neutral styling; its own style is back in place when this
    /// returns, on success and on failure alike.
    #[tracing::instrument(skip_all, fields(subject = %region.display.subject))]
    pub fn export(&self, region: &mut Region) -> KelsaResult<PathBuf> {
        let Some(_busy) = InFlight::acquire(&self.in_flight) else {
            tracing::warn!("export rejected: another export is running");
            self.notifier.notify(BUSY_MESSAGE, NotificationKind::Info);
            return Err(KelsaError::export(BUSY_MESSAGE));
        };

        match self.run(region) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "export finished");
                self.notifier.notify(SUCCESS_MESSAGE, NotificationKind::Success);
                Ok(path)
            }
            Err(err) => {
                tracing::error!(error = %err, "export failed");
                self.notifier.notify(FAILURE_MESSAGE, NotificationKind::Error);
                Err(match err {
                    err @ (KelsaError::Export(_) | KelsaError::Validation(_)) => err,
                    other => KelsaError::export(other.to_string()),
                })
            }
        }
    }

    fn run(&self, region: &mut Region) -> KelsaResult<PathBuf> {
        let image = {
            let neutral = NeutralStyle::apply(region);
            self.snapshot.snapshot(&neutral, self.scale)?
        };
        tracing::debug!(width = image.width(), height = image.height(), "snapshot taken");

        let bytes = self.assembler.assemble(&image, self.page)?;
        let filename = export_filename(&region.display.subject, self.clock.today());
        self.downloads.save(&filename, &bytes)
    }
}

impl std::fmt::Debug for ExportTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportTrigger")
            .field("scale", &self.scale)
            .field("page", &self.page)
            .field("busy", &self.is_busy())
            .finish_non_exhaustive()
    }
}

/// Holds the in-flight flag for the duration of one export.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/trigger.rs"]
mod tests;
