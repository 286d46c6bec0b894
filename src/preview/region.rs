use std::ops::Deref;

use crate::foundation::core::{Affine, Vec2};
use crate::preview::display::DisplayModel;

/// Drop shadow under the letter page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub offset: Vec2,
    pub blur: f64,
    /// Shadow opacity in [0, 1].
    pub opacity: f64,
}

/// Presentation styling of the letter page region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionStyle {
    pub shadow: Option<Shadow>,
    /// Corner radius in CSS pixels.
    pub corner_radius: f64,
    pub transform: Option<Affine>,
}

impl RegionStyle {
    /// No shadow, square corners, identity transform.
    pub const NEUTRAL: Self = Self {
        shadow: None,
        corner_radius: 0.0,
        transform: None,
    };

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }
}

impl Default for RegionStyle {
    fn default() -> Self {
        Self {
            shadow: Some(Shadow {
                offset: Vec2::new(0.0, 10.0),
                blur: 25.0,
                opacity: 0.15,
            }),
            corner_radius: 8.0,
            transform: None,
        }
    }
}

/// The rendered letter page as shown on the preview: content plus presentation.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub display: DisplayModel,
    pub style: RegionStyle,
}

impl Region {
    pub fn new(display: DisplayModel) -> Self {
        Self {
            display,
            style: RegionStyle::default(),
        }
    }
}

/// Scoped style override: the region is neutral while the guard lives and its previous style is
/// restored when the guard drops, on every exit path.
pub struct NeutralStyle<'a> {
    region: &'a mut Region,
    saved: RegionStyle,
}

impl<'a> NeutralStyle<'a> {
    pub fn apply(region: &'a mut Region) -> Self {
        let saved = std::mem::replace(&mut region.style, RegionStyle::NEUTRAL);
        Self { region, saved }
    }
}

impl Deref for NeutralStyle<'_> {
    type Target = Region;

    fn deref(&self) -> &Region {
        self.region
    }
}

impl Drop for NeutralStyle<'_> {
    fn drop(&mut self) {
        self.region.style = self.saved;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preview/region.rs"]
mod tests;
