//! Partial-refresh presenter
//!
//! Keeps a copy of the last frame the panel received. Each call to
//! [`Presenter::present`] diffs the new frame against it and sends only the
//! dirty row ranges. The first frame, and any frame after a failed transfer,
//! goes out in full.

use alloc::vec::Vec;

use stipple_core::dirty::DirtyTracker;
use stipple_core::{debug, error, trace, warn};
use stipple_core::{RenderError, Surface};

use crate::backend::{DisplayError, FrameSink};

/// What a call to [`Presenter::present`] sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PresentOutcome {
    /// Frame identical to the last one, nothing sent
    Skipped,
    /// Whole frame sent
    Full,
    /// Only dirty rows sent
    Partial {
        /// Number of row ranges pushed
        regions: usize,
        /// Total rows pushed
        rows: usize,
    },
}

/// Dirty-row presenter for frames of one fixed size
pub struct Presenter {
    width: i32,
    height: i32,
    tracker: DirtyTracker,
    previous: Vec<u8>,
    row_stride: usize,
    needs_full: bool,
}

impl Presenter {
    /// Presenter for `width` x `height` frames
    pub fn new(width: i32, height: i32) -> Result<Self, RenderError> {
        let tracker = DirtyTracker::new(width, height)?;
        let len = tracker.frame_len();

        let mut previous = Vec::new();
        if previous.try_reserve_exact(len).is_err() {
            error!("Failed to allocate {} byte frame snapshot", len);
            return Err(RenderError::Allocation { bytes: len });
        }
        previous.resize(len, 0);

        Ok(Self {
            width,
            height,
            tracker,
            previous,
            row_stride: stipple_core::canvas::row_stride(width),
            needs_full: true,
        })
    }

    /// Presenter sized to match `surface`
    pub fn for_surface<S: Surface + ?Sized>(surface: &S) -> Result<Self, RenderError> {
        Self::new(surface.width(), surface.height())
    }

    /// Override the clean-row gap bridged when merging dirty rows
    pub fn with_min_gap(mut self, min_gap: usize) -> Self {
        self.tracker = self.tracker.with_min_gap(min_gap);
        self
    }

    /// Send the next frame in full regardless of what changed
    ///
    /// E-ink panels accumulate ghosting under repeated partial refreshes; call
    /// this periodically to clear it.
    pub fn force_full(&mut self) {
        self.needs_full = true;
    }

    /// Whether the next frame will be sent in full
    pub fn needs_full(&self) -> bool {
        self.needs_full
    }

    /// The frame the panel is believed to show
    pub fn snapshot(&self) -> &[u8] {
        &self.previous
    }

    /// Send `surface` to `sink`, pushing only what changed
    ///
    /// The snapshot is updated only after the sink accepted everything. A
    /// transfer failure leaves the panel state unknown, so the next frame is
    /// sent in full.
    pub fn present<S, K>(&mut self, surface: &S, sink: &mut K) -> Result<PresentOutcome, DisplayError>
    where
        S: Surface + ?Sized,
        K: FrameSink + ?Sized,
    {
        // Equal byte counts are not enough: 16x8 and 8x16 both pack to 16 bytes
        if surface.width() != self.width || surface.height() != self.height {
            warn!(
                "Frame is {}x{}, presenter expects {}x{}",
                surface.width(),
                surface.height(),
                self.width,
                self.height
            );
            return Err(RenderError::DimensionMismatch.into());
        }
        let frame = surface.buffer();
        if !sink.is_ready() {
            return Err(DisplayError::NotReady);
        }

        if self.needs_full {
            if let Err(err) = sink.push_full(frame) {
                warn!("Full frame transfer failed");
                return Err(err);
            }
            self.previous.copy_from_slice(frame);
            self.needs_full = false;
            debug!("Full frame sent ({} bytes)", frame.len());
            return Ok(PresentOutcome::Full);
        }

        if self.tracker.is_clean(frame, &self.previous)? {
            trace!("Frame unchanged, skipped");
            return Ok(PresentOutcome::Skipped);
        }

        let stride = self.row_stride;
        let mut rows = 0usize;
        let mut failed = None;
        let regions = self.tracker.for_each_dirty_region(frame, &self.previous, |region| {
            if failed.is_some() {
                return;
            }
            let start = region.y_start as usize * stride;
            let end = region.y_end as usize * stride;
            match sink.push_rows(region, &frame[start..end], stride) {
                Ok(()) => rows += region.rows() as usize,
                Err(err) => failed = Some(err),
            }
        })?;

        if let Some(err) = failed {
            warn!("Partial transfer failed, scheduling full refresh");
            self.needs_full = true;
            return Err(err);
        }

        self.previous.copy_from_slice(frame);
        debug!("Partial refresh: {} regions, {} rows", regions, rows);
        Ok(PresentOutcome::Partial { regions, rows })
    }
}
