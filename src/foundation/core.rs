use chrono::NaiveDate;

use crate::foundation::error::{KelsaError, KelsaResult};

pub use kurbo::{Affine, Rect, Size, Vec2};

const MM_PER_INCH: f64 = 25.4;
const PT_PER_INCH: f64 = 72.0;
const CSS_PX_PER_INCH: f64 = 96.0;

/// The two pages of the tool. Navigation between them is one-way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    /// Letter entry form.
    Form,
    /// Rendered letter with export controls.
    Preview,
}

/// Physical page format of the generated document, in millimetres.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageGeometry {
    /// Page width x height in millimetres (portrait).
    pub size_mm: Size,
}

impl PageGeometry {
    /// ISO A4 portrait.
    pub const A4: Self = Self {
        size_mm: Size::new(210.0, 297.0),
    };

    pub fn new(width_mm: f64, height_mm: f64) -> KelsaResult<Self> {
        let geom = Self {
            size_mm: Size::new(width_mm, height_mm),
        };
        geom.validate()?;
        Ok(geom)
    }

    pub fn validate(self) -> KelsaResult<()> {
        let Size { width, height } = self.size_mm;
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(KelsaError::validation(
                "page width/height must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Page size in PDF points (1/72 inch).
    pub fn size_pt(self) -> Size {
        self.size_mm * (PT_PER_INCH / MM_PER_INCH)
    }

    /// Page size in CSS pixels (1/96 inch), rounded to whole pixels.
    pub fn size_css_px(self) -> (u32, u32) {
        let px = self.size_mm * (CSS_PX_PER_INCH / MM_PER_INCH);
        (px.width.round() as u32, px.height.round() as u32)
    }

    /// Height in points of an image drawn at full page width, preserving aspect ratio.
    pub fn full_width_image_height_pt(self, img_width: u32, img_height: u32) -> f64 {
        if img_width == 0 {
            return 0.0;
        }
        f64::from(img_height) * self.size_pt().width / f64::from(img_width)
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

/// Source of "today" for date validation, default dates and filenames.
pub trait Clock: Send + Sync {
    /// The current calendar day. Time-of-day is never consulted.
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock calendar day.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A clock pinned to one day, for tests and reproducible exports.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// ISO `YYYY-MM-DD`, the wire format of date fields.
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
