//! Observatory clock face for Stipple
//!
//! Composes the engine into a complete 400x300 watch face:
//!
//! - Hash noise and lumpy polygon generators ([`shapes`])
//! - Clock data, label formatting and the face renderer ([`clock`])
//! - Face layout and tuning, loadable from TOML or postcard ([`config`])
//! - Canvas, brushes and presenter bundled per display ([`face`])
//!
//! Rendering is a pure function of the clock data, the animation time and the
//! configuration, so the same inputs always produce the same frame.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod clock;
pub mod config;
pub mod face;
pub mod shapes;

// Re-export key types
pub use clock::{render_observatory_clock, ClockAnimState, ClockData};
pub use config::{ConfigError, FaceConfig};
pub use face::ObservatoryFace;
#[cfg(feature = "serde")]
pub use config::load_config;
