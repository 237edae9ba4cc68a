//! Scale-and-crop entry point.
//!
//! [`ScaleCropEffect`] holds a requested output size and anchor. Before it
//! hands an image to the raster collaborator it shrinks the requested size
//! with [`Adjustment::compute`], so the collaborator only ever downscales.
//! Decoding, resampling and cropping stay with the collaborator, reached
//! through the [`ScaleCrop`] trait.

use core::fmt;

use log::{debug, error};

use crate::adjust::{AdjustError, Adjustment, Role, Size, validate};
use crate::crop::{Anchor, CropPlan, plan_scale_and_crop};

/// Pixel dimensions of an image about to be transformed.
pub trait SourceImage {
    /// Width in pixels.
    fn width(&self) -> u32;
    /// Height in pixels.
    fn height(&self) -> u32;

    /// Both dimensions.
    fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

impl SourceImage for Size {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

/// Raster collaborator that scales and crops pixel data in place.
pub trait ScaleCrop<I: ?Sized> {
    /// Failure reported by the collaborator.
    type Error;

    /// Scale `image` to `plan.resize_to`, then crop it to `plan.crop`.
    fn scale_and_crop(&mut self, image: &mut I, plan: &CropPlan) -> Result<(), Self::Error>;
}

/// What [`ScaleCropEffect::apply`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Applied {
    /// Image already had the requested size; collaborator not called.
    Skipped,
    /// Collaborator ran with the adjusted target.
    Transformed {
        /// Adjusted output size.
        target: Size,
        /// Geometry passed to the collaborator.
        plan: CropPlan,
    },
}

/// Failure applying a [`ScaleCropEffect`].
#[derive(Debug, thiserror::Error)]
pub enum EffectError<E> {
    /// Image or requested dimensions are unusable.
    #[error(transparent)]
    Adjust(#[from] AdjustError),
    /// The raster collaborator failed.
    #[error("scale and crop to {target} failed")]
    Raster {
        /// Adjusted output size that was attempted.
        target: Size,
        #[source]
        source: E,
    },
}

/// Scale and crop to a requested size without upscaling.
///
/// # Example
///
/// ```
/// use zencrop::{Applied, CropPlan, ScaleCrop, ScaleCropEffect, Size};
///
/// struct Record(Vec<CropPlan>);
///
/// impl ScaleCrop<Size> for Record {
///     type Error = core::convert::Infallible;
///
///     fn scale_and_crop(&mut self, image: &mut Size, plan: &CropPlan) -> Result<(), Self::Error> {
///         self.0.push(*plan);
///         *image = plan.output();
///         Ok(())
///     }
/// }
///
/// let effect = ScaleCropEffect::new(500, 500).unwrap();
/// let mut image = Size::new(300, 100);
/// let mut raster = Record(Vec::new());
///
/// let applied = effect.apply(&mut image, &mut raster).unwrap();
/// assert!(matches!(applied, Applied::Transformed { target, .. } if target == Size::new(100, 100)));
/// assert_eq!(image, Size::new(100, 100));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "EffectConfig", into = "EffectConfig")
)]
pub struct ScaleCropEffect {
    size: Size,
    anchor: Anchor,
}

impl ScaleCropEffect {
    /// Effect producing `width`×`height`, centered.
    pub fn new(width: u32, height: u32) -> Result<Self, AdjustError> {
        let size = Size::new(width, height);
        validate(Role::Target, size)?;
        Ok(Self {
            size,
            anchor: Anchor::CENTER,
        })
    }

    /// Set the crop anchor.
    pub fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Requested output size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Crop anchor.
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Requested size adjusted for a source of the given size.
    pub fn adjusted_for(&self, source: Size) -> Result<Size, AdjustError> {
        Adjustment::compute(source, self.size).map(|a| a.size)
    }

    /// Scale and crop `image` through `raster`.
    ///
    /// Skips the collaborator when the image already has the requested size.
    /// Otherwise the requested size is adjusted to the image, and the
    /// collaborator receives the plan for the adjusted size.
    pub fn apply<I, R>(
        &self,
        image: &mut I,
        raster: &mut R,
    ) -> Result<Applied, EffectError<R::Error>>
    where
        I: SourceImage + ?Sized,
        R: ScaleCrop<I> + ?Sized,
    {
        let source = image.size();
        if source == self.size {
            debug!("source already {source}, skipping scale and crop");
            return Ok(Applied::Skipped);
        }

        let adjustment = Adjustment::compute(source, self.size)?;
        let target = adjustment.size;
        let plan = plan_scale_and_crop(source, target, self.anchor)?;
        debug!(
            "scale and crop {source} to {target} (requested {}, {:?})",
            self.size, adjustment.case
        );

        if let Err(e) = raster.scale_and_crop(image, &plan) {
            error!("scale and crop {source} to {target} failed");
            return Err(EffectError::Raster { target, source: e });
        }
        Ok(Applied::Transformed { target, plan })
    }
}

impl fmt::Display for ScaleCropEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.size)?;
        if self.anchor != Anchor::CENTER {
            write!(f, " ({})", self.anchor)?;
        }
        Ok(())
    }
}

/// Serialized form of [`ScaleCropEffect`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct EffectConfig {
    width: u32,
    height: u32,
    #[serde(default)]
    anchor: Anchor,
}

#[cfg(feature = "serde")]
impl TryFrom<EffectConfig> for ScaleCropEffect {
    type Error = AdjustError;

    fn try_from(c: EffectConfig) -> Result<Self, Self::Error> {
        Ok(Self::new(c.width, c.height)?.anchored(c.anchor))
    }
}

#[cfg(feature = "serde")]
impl From<ScaleCropEffect> for EffectConfig {
    fn from(e: ScaleCropEffect) -> Self {
        Self {
            width: e.size.width,
            height: e.size.height,
            anchor: e.anchor,
        }
    }
}
