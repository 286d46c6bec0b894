use crate::foundation::core::Affine;

const MIN_TENTHS: u8 = 5;
const MAX_TENTHS: u8 = 20;
const DEFAULT_TENTHS: u8 = 10;

/// Preview scale factor in [0.5, 2.0], moved in 0.1 steps.
///
/// Held as integer tenths so repeated steps never drift.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Zoom {
    tenths: u8,
}

impl Zoom {
    pub const MIN: f64 = MIN_TENTHS as f64 / 10.0;
    pub const MAX: f64 = MAX_TENTHS as f64 / 10.0;
    pub const STEP: f64 = 0.1;

    pub fn new() -> Self {
        Self {
            tenths: DEFAULT_TENTHS,
        }
    }

    /// Nearest representable zoom, clamped.
    pub fn from_factor(factor: f64) -> Self {
        let tenths = if factor.is_finite() {
            (factor * 10.0).round().clamp(f64::from(MIN_TENTHS), f64::from(MAX_TENTHS)) as u8
        } else {
            DEFAULT_TENTHS
        };
        Self { tenths }
    }

    pub fn factor(self) -> f64 {
        f64::from(self.tenths) / 10.0
    }

    /// Shift by `delta` (rounded to whole steps), clamping at both ends.
    pub fn adjust(&mut self, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        let span = i32::from(MAX_TENTHS - MIN_TENTHS);
        let steps = ((delta / Self::STEP).round() as i32).clamp(-span, span);
        let tenths = (i32::from(self.tenths) + steps)
            .clamp(i32::from(MIN_TENTHS), i32::from(MAX_TENTHS));
        self.tenths = tenths as u8;
    }

    pub fn zoom_in(&mut self) {
        self.adjust(Self::STEP);
    }

    pub fn zoom_out(&mut self) {
        self.adjust(-Self::STEP);
    }

    pub fn percent(self) -> u32 {
        u32::from(self.tenths) * 10
    }

    /// Zoom indicator text, e.g. `120%`.
    pub fn label(self) -> String {
        format!("{}%", self.percent())
    }

    /// Presentation transform of the letter region; `None` at 100%.
    pub fn transform(self) -> Option<Affine> {
        (self.tenths != DEFAULT_TENTHS).then(|| Affine::scale(self.factor()))
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preview/zoom.rs"]
mod tests;
