//! Output dimension prediction from size hints.
//!
//! Markup generators want the final width and height of a derived image
//! before any pixels exist. [`ScaleCropEffect::transform_dimensions`] runs
//! the same adjustment as [`ScaleCropEffect::apply`](crate::ScaleCropEffect::apply)
//! on the hinted source size, or marks the size unknown when it can't.

use log::debug;

use crate::adjust::Size;
use crate::effect::ScaleCropEffect;

/// Width and height of an image, either of which may be unknown.
///
/// `None` means unknown. A zero is treated the same as `None`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DimensionHints {
    #[cfg_attr(feature = "serde", serde(default))]
    pub width: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub height: Option<u32>,
}

impl DimensionHints {
    /// Known width and height.
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    /// Both dimensions unknown.
    pub const fn unknown() -> Self {
        Self {
            width: None,
            height: None,
        }
    }

    /// The size, if both dimensions are present and positive.
    pub fn size(&self) -> Option<Size> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some(Size::new(w, h)),
            _ => None,
        }
    }

    /// Whether [`size`](Self::size) is available.
    pub fn is_known(&self) -> bool {
        self.size().is_some()
    }
}

impl From<Size> for DimensionHints {
    fn from(size: Size) -> Self {
        Self::new(size.width, size.height)
    }
}

impl ScaleCropEffect {
    /// Overwrite `hints` with the size this effect would produce.
    ///
    /// The hints describe the source. If either dimension is missing or
    /// zero, or the adjustment can't be computed, both become `None`.
    pub fn transform_dimensions(&self, hints: &mut DimensionHints) {
        *hints = self.predict(*hints);
    }

    /// Size this effect would produce for a source described by `hints`.
    pub fn predict(&self, hints: DimensionHints) -> DimensionHints {
        let Some(source) = hints.size() else {
            debug!("no source dimensions, cannot predict {self} output");
            return DimensionHints::unknown();
        };
        match self.adjusted_for(source) {
            Ok(size) => size.into(),
            Err(e) => {
                debug!("cannot predict {self} output for {source}: {e}");
                DimensionHints::unknown()
            }
        }
    }
}
