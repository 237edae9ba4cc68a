//! Target dimension adjustment that preserves aspect ratio without upscaling.
//!
//! Given the pixel size of a source image and the size a scale-and-crop step
//! was asked to produce, computes the size it should produce instead. Pure
//! integer arithmetic: no floating point, no allocations.
//!
//! Aspect ratios are compared at two-decimal precision, rounded half-up, and
//! derived pixel values are rounded half-up. Both roundings are computed
//! exactly on integers, so `1.005` rounds to `1.01`, never to `1.00`.
//!
//! # Example
//!
//! ```
//! use zencrop::{AdjustCase, Adjustment, Size};
//!
//! // 300×100 source, 500×500 target: not enough height for a square.
//! let a = Adjustment::compute(Size::new(300, 100), Size::new(500, 500)).unwrap();
//! assert_eq!(a.size, Size::new(100, 100));
//! assert_eq!(a.case, AdjustCase::HeightBound);
//! ```

use core::fmt;

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are positive.
    pub const fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Aspect ratio rounded to two decimals.
    ///
    /// Returns `None` when the height is zero.
    pub fn aspect_ratio(&self) -> Option<AspectRatio> {
        AspectRatio::of(*self)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.width, self.height)
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

/// Width / height, rounded half-up to two decimals.
///
/// Stored as a whole number of hundredths: `4:3` is `133`, `16:9` is `178`.
/// Two ratios are equal when they round to the same hundredth, so `300:299`
/// and `1:1` compare equal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AspectRatio(u64);

impl AspectRatio {
    /// Ratio of `size`, or `None` if its height is zero.
    pub fn of(size: Size) -> Option<Self> {
        if size.height == 0 {
            return None;
        }
        let (w, h) = (size.width as u64, size.height as u64);
        // floor(100·w/h + 1/2)
        Some(Self((200 * w + h) / (2 * h)))
    }

    /// Construct from a count of hundredths.
    pub const fn from_hundredths(hundredths: u64) -> Self {
        Self(hundredths)
    }

    /// The ratio in hundredths.
    pub const fn hundredths(self) -> u64 {
        self.0
    }

    /// The ratio as a float (`133` → `1.33`).
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Whether the ratio rounded down to `0.00` and cannot be divided by.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// `round(width / ratio)`, or `None` for a zero ratio.
    pub fn height_for(self, width: u32) -> Option<u32> {
        if self.is_zero() {
            return None;
        }
        let r = self.0 as u128;
        Some(to_pixels((200 * width as u128 + r) / (2 * r)))
    }

    /// `round(height × ratio)`.
    pub fn width_for(self, height: u32) -> u32 {
        to_pixels((height as u128 * self.0 as u128 + 50) / 100)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Which adjustment rule produced the output size.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AdjustCase {
    /// Source exceeds the target on both axes; target kept as requested.
    Unchanged,
    /// Source fits inside the target and already has the target ratio.
    SourceMatches,
    /// Source width is the limit; height derived from the target ratio.
    WidthBound,
    /// Source height is the limit; width derived from the target ratio.
    HeightBound,
}

/// Adjusted target size and the rule that produced it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Adjustment {
    /// Size the scale-and-crop step should produce.
    pub size: Size,
    /// Rule that produced `size`.
    pub case: AdjustCase,
}

impl Adjustment {
    /// Adjust `target` so that scaling `source` to it never enlarges the source.
    ///
    /// Rules, first match wins:
    ///
    /// 1. source wider *and* taller than target → target unchanged
    /// 2. source no wider *and* no taller than target →
    ///    source if ratios match, else shrink the target onto the source
    ///    along whichever axis binds
    /// 3. source no wider than target → width from source, height from ratio
    /// 4. source no taller than target → height from source, width from ratio
    pub fn compute(source: Size, target: Size) -> Result<Self, AdjustError> {
        validate(Role::Source, source)?;
        validate(Role::Target, target)?;

        let Size {
            width: sw,
            height: sh,
        } = source;
        let Size {
            width: tw,
            height: th,
        } = target;
        let target_ratio =
            AspectRatio::of(target).ok_or(AdjustError::invalid(Role::Target, target))?;
        let source_ratio =
            AspectRatio::of(source).ok_or(AdjustError::invalid(Role::Source, source))?;

        let width_bound = || -> Result<Self, AdjustError> {
            let height = target_ratio
                .height_for(sw)
                .ok_or(AdjustError::DegenerateRatio {
                    width: tw,
                    height: th,
                })?;
            Ok(Self {
                size: Size::new(sw, height),
                case: AdjustCase::WidthBound,
            })
        };
        let height_bound = || Self {
            size: Size::new(target_ratio.width_for(sh), sh),
            case: AdjustCase::HeightBound,
        };

        if sw > tw && sh > th {
            Ok(Self {
                size: target,
                case: AdjustCase::Unchanged,
            })
        } else if sw <= tw && sh <= th {
            if source_ratio == target_ratio {
                Ok(Self {
                    size: source,
                    case: AdjustCase::SourceMatches,
                })
            } else if target_ratio > source_ratio {
                width_bound()
            } else {
                Ok(height_bound())
            }
        } else if sw <= tw {
            width_bound()
        } else {
            // sw > tw here, so rule 1 failing means sh <= th.
            Ok(height_bound())
        }
    }
}

/// Adjusted target size for scaling `source` toward `target` without upscaling.
///
/// See [`Adjustment::compute`] for the rules.
pub fn adjust(source: Size, target: Size) -> Result<Size, AdjustError> {
    Adjustment::compute(source, target).map(|a| a.size)
}

/// Which input a dimension error refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// The source image.
    Source,
    /// The requested output.
    Target,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Source => "source",
            Self::Target => "target",
        })
    }
}

/// Dimension adjustment error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AdjustError {
    /// Width or height is zero.
    #[error("{role} dimensions {width}x{height} must both be positive")]
    InvalidDimension { role: Role, width: u32, height: u32 },
    /// Target ratio rounds to `0.00` and would be used as a divisor.
    #[error("target {width}x{height} has an aspect ratio that rounds to 0.00")]
    DegenerateRatio { width: u32, height: u32 },
}

impl AdjustError {
    pub(crate) const fn invalid(role: Role, size: Size) -> Self {
        Self::InvalidDimension {
            role,
            width: size.width,
            height: size.height,
        }
    }
}

pub(crate) fn validate(role: Role, size: Size) -> Result<(), AdjustError> {
    if size.is_valid() {
        Ok(())
    } else {
        Err(AdjustError::invalid(role, size))
    }
}

/// Narrow to `u32`, saturating, with a floor of one pixel.
fn to_pixels(v: u128) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX).max(1)
}
