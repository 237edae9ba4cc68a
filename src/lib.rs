//! Scale-and-crop target planning that never upscales the source.
//!
//! Pure geometry — no pixel operations, no allocations, `no_std` compatible.
//!
//! A scale-and-crop effect asks for an exact output size. When the source
//! image is too small on one or both axes, the requested size is shrunk to
//! the largest size that keeps the requested aspect ratio and fits the
//! source, so the raster step downscales and crops but never enlarges.
//!
//! ```
//! use zencrop::{ScaleCropEffect, Size, adjust};
//!
//! // Plenty of pixels: the target is used as-is.
//! assert_eq!(adjust(Size::new(1000, 1000), Size::new(500, 500)), Ok(Size::new(500, 500)));
//!
//! // Source too narrow for a square: the square shrinks to fit.
//! assert_eq!(adjust(Size::new(100, 300), Size::new(500, 500)), Ok(Size::new(100, 100)));
//!
//! // Predict the final size for markup without touching any pixels.
//! let effect = ScaleCropEffect::new(1200, 630).unwrap();
//! let mut hints = zencrop::DimensionHints::new(800, 600);
//! effect.transform_dimensions(&mut hints);
//! assert_eq!(hints.size(), Some(Size::new(800, 421)));
//! ```
//!
//! # Modules
//!
//! - [`adjust`] — Aspect ratio rounding and the no-upscale adjustment ladder
//! - [`effect`] — Scale-and-crop entry point over an external raster collaborator
//! - [`predict`] — Output dimension prediction from size hints
//! - [`crop`] — Scale factor, resize and anchored crop rectangle for the raster step

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

pub mod adjust;
pub mod crop;
pub mod effect;
pub mod predict;

pub use adjust::{AdjustCase, AdjustError, Adjustment, AspectRatio, Role, Size, adjust};
pub use crop::{Align, Anchor, CropPlan, ParseAnchorError, Rect, plan_scale_and_crop};
pub use effect::{Applied, EffectError, ScaleCrop, ScaleCropEffect, SourceImage};
pub use predict::DimensionHints;
