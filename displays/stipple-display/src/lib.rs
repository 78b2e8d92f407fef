//! Frame presentation for Stipple
//!
//! This crate sits between the rendering engine and whatever moves pixels to
//! the panel:
//!
//! - `FrameSink` trait for the display transfer (SPI driver, UART link, test
//!   recorder)
//! - `Presenter`, which keeps the last frame sent and pushes only the rows that
//!   changed since
//!
//! # Architecture
//!
//! The sink only ever sees packed rows in the canvas layout (row-major,
//! MSB-first, `ceil(width / 8)` bytes per row). Device-specific addressing and
//! framing stay inside the sink implementation.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod backend;
pub mod presenter;

// Re-export key types
pub use backend::{DisplayError, FrameSink};
pub use presenter::{PresentOutcome, Presenter};
