//! Scale-and-crop geometry for the raster step.
//!
//! Scales the source so it covers the target on both axes, then cuts a
//! target-sized window out of the scaled image. The window position comes
//! from an [`Anchor`] such as `center-center` or `left-top`.
//!
//! # Example
//!
//! ```
//! use zencrop::{Anchor, Rect, Size, plan_scale_and_crop};
//!
//! let plan = plan_scale_and_crop(Size::new(1000, 500), Size::new(400, 300), Anchor::CENTER)
//!     .unwrap();
//!
//! // Height binds: 500 → 300 is a 0.6 scale, width becomes 600.
//! assert_eq!(plan.resize_to, Size::new(600, 300));
//! assert_eq!(plan.crop, Rect::new(100, 0, 400, 300));
//! ```

use core::fmt;
use core::str::FromStr;

use num_traits::Float;

use crate::adjust::{AdjustError, Role, Size, validate};

/// Position along one axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Align {
    /// Left or top edge.
    Start,
    /// Centered.
    #[default]
    Center,
    /// Right or bottom edge.
    End,
}

/// Which part of the scaled image the crop window keeps.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Anchor {
    /// `left`, `center` or `right`.
    pub horizontal: Align,
    /// `top`, `center` or `bottom`.
    pub vertical: Align,
}

impl Anchor {
    /// `center-center`.
    pub const CENTER: Self = Self::new(Align::Center, Align::Center);
    /// `left-top`.
    pub const TOP_LEFT: Self = Self::new(Align::Start, Align::Start);
    /// `right-bottom`.
    pub const BOTTOM_RIGHT: Self = Self::new(Align::End, Align::End);

    pub const fn new(horizontal: Align, vertical: Align) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Keyword form, `"<left|center|right>-<top|center|bottom>"`.
    pub const fn as_str(&self) -> &'static str {
        use Align::*;
        match (self.horizontal, self.vertical) {
            (Start, Start) => "left-top",
            (Start, Center) => "left-center",
            (Start, End) => "left-bottom",
            (Center, Start) => "center-top",
            (Center, Center) => "center-center",
            (Center, End) => "center-bottom",
            (End, Start) => "right-top",
            (End, Center) => "right-center",
            (End, End) => "right-bottom",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anchor keyword was not `<left|center|right>-<top|center|bottom>`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("anchor must be `<left|center|right>-<top|center|bottom>`")]
pub struct ParseAnchorError;

impl FromStr for Anchor {
    type Err = ParseAnchorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, v) = s.trim().split_once('-').ok_or(ParseAnchorError)?;
        let horizontal = match h {
            "left" => Align::Start,
            "center" => Align::Center,
            "right" => Align::End,
            _ => return Err(ParseAnchorError),
        };
        let vertical = match v {
            "top" => Align::Start,
            "center" => Align::Center,
            "bottom" => Align::End,
            _ => return Err(ParseAnchorError),
        };
        Ok(Self::new(horizontal, vertical))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Anchor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Anchor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct Keyword;

        impl serde::de::Visitor<'_> for Keyword {
            type Value = Anchor;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an anchor such as \"center-center\"")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Anchor, E> {
                v.parse::<Anchor>().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(Keyword)
    }
}

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Size of the rect.
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Whether this rect lies within `(0, 0, w, h)`.
    pub fn fits_within(&self, w: u32, h: u32) -> bool {
        self.x as u64 + self.width as u64 <= w as u64
            && self.y as u64 + self.height as u64 <= h as u64
    }

    /// Whether this rect covers all of `(0, 0, w, h)`.
    pub fn is_full(&self, w: u32, h: u32) -> bool {
        self.x == 0 && self.y == 0 && self.width == w && self.height == h
    }
}

/// What the raster collaborator should do: resize, then crop.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CropPlan {
    /// Size to scale the whole source to. Covers the target on both axes.
    pub resize_to: Size,
    /// Window of the scaled image to keep, in scaled coordinates.
    pub crop: Rect,
}

impl CropPlan {
    /// Final output size.
    pub const fn output(&self) -> Size {
        self.crop.size()
    }

    /// Whether the scale step changes the source size.
    pub fn needs_resize(&self, source: Size) -> bool {
        self.resize_to != source
    }

    /// Whether the crop step discards anything.
    pub fn needs_crop(&self) -> bool {
        !self
            .crop
            .is_full(self.resize_to.width, self.resize_to.height)
    }
}

/// Plan the scale and crop that turns `source` into exactly `target`.
///
/// Scales by `max(tw / sw, th / sh)` so the scaled image covers the target,
/// then places a target-sized window by `anchor`. This is the raw operation:
/// it upscales when asked to. Run [`adjust`](crate::adjust()) on the target
/// first to avoid that.
pub fn plan_scale_and_crop(
    source: Size,
    target: Size,
    anchor: Anchor,
) -> Result<CropPlan, AdjustError> {
    validate(Role::Source, source)?;
    validate(Role::Target, target)?;

    let (sw, sh) = (source.width as f64, source.height as f64);
    let (tw, th) = (target.width, target.height);
    let scale = Float::max(tw as f64 / sw, th as f64 / sh);
    let scaled_w = sw * scale;
    let scaled_h = sh * scale;

    // Rounding can land one pixel short of the target on the binding axis.
    let resize_to = Size::new(round_px(scaled_w).max(tw), round_px(scaled_h).max(th));
    let x = anchor_offset(anchor.horizontal, scaled_w, tw).min(resize_to.width - tw);
    let y = anchor_offset(anchor.vertical, scaled_h, th).min(resize_to.height - th);

    Ok(CropPlan {
        resize_to,
        crop: Rect::new(x, y, tw, th),
    })
}

/// Offset of a `window`-wide span inside `scaled` pixels.
fn anchor_offset(align: Align, scaled: f64, window: u32) -> u32 {
    let offset = match align {
        Align::Start => 0.0,
        Align::Center => scaled / 2.0 - window as f64 / 2.0,
        Align::End => scaled - window as f64,
    };
    round_px(Float::max(offset, 0.0))
}

/// Round half-up to whole pixels. Inputs are non-negative.
fn round_px(v: f64) -> u32 {
    Float::round(v) as u32
}
