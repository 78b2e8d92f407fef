//! 1-bit rendering engine for monochrome e-ink displays
//!
//! This crate contains everything needed to draw a frame, independent of the
//! panel it ends up on:
//!
//! - Bit-packed canvas and stencil mask ([`canvas`])
//! - Lines, circles, rectangles and polygons ([`raster`])
//! - Ordered-dither and hatch fill patterns ([`pattern`])
//! - Cubic Bézier paths and textured brush strokes ([`bezier`], [`brush`])
//! - Stroke-based vector font ([`font`])
//! - Dirty-row tracking for partial refresh ([`dirty`])
//! - Easing, breathing and wiggle helpers ([`anim`])
//!
//! All drawing goes through the [`Surface`] trait, so any primitive can target
//! a plain canvas, a mask, or a masked canvas.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod anim;
pub mod bezier;
pub mod brush;
pub mod canvas;
pub mod dirty;
pub mod error;
pub mod font;
pub mod geometry;
pub mod pattern;
pub mod raster;

// Re-export key types
pub use anim::AnimationState;
pub use bezier::TangentHandles;
pub use brush::{BrushBitmap, BrushCache, BrushId};
pub use canvas::{Canvas, Mask, MaskedCanvas, Surface};
pub use dirty::{DirtyRegion, DirtyTracker};
pub use error::RenderError;
pub use font::{TextAlign, TextStyle};
pub use geometry::{Color, Point, PointF, Rect};
pub use pattern::Pattern;
