//! Dirty-row tracking for partial refresh
//!
//! Compares two packed frames row by row and reports the row ranges that
//! changed. Dirty runs separated by fewer than `min_gap` clean rows are merged,
//! trading a few redundant rows for fewer display transfers.

use alloc::vec::Vec;

use crate::canvas::{row_stride, Surface};
use crate::error::{try_push, RenderError};

/// Clean rows that still get bridged into one region
pub const DEFAULT_MIN_GAP: usize = 8;

/// Half-open row range `[y_start, y_end)` that differs between two frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DirtyRegion {
    pub y_start: i32,
    pub y_end: i32,
}

impl DirtyRegion {
    pub const fn new(y_start: i32, y_end: i32) -> Self {
        Self { y_start, y_end }
    }

    /// Number of rows covered
    pub const fn rows(&self) -> i32 {
        self.y_end - self.y_start
    }

    pub const fn contains_row(&self, y: i32) -> bool {
        y >= self.y_start && y < self.y_end
    }
}

/// Row differ for frames of one fixed size
#[derive(Debug, Clone)]
pub struct DirtyTracker {
    height: i32,
    row_bytes: usize,
    min_gap: usize,
}

impl DirtyTracker {
    /// Tracker for `width` x `height` frames with the default merge gap
    pub fn new(width: i32, height: i32) -> Result<Self, RenderError> {
        if width <= 0 || height <= 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        Ok(Self {
            height,
            row_bytes: row_stride(width),
            min_gap: DEFAULT_MIN_GAP,
        })
    }

    /// Tracker sized to match `surface`
    pub fn for_surface<S: Surface + ?Sized>(surface: &S) -> Result<Self, RenderError> {
        Self::new(surface.width(), surface.height())
    }

    pub fn with_min_gap(mut self, min_gap: usize) -> Self {
        self.min_gap = min_gap;
        self
    }

    pub fn min_gap(&self) -> usize {
        self.min_gap
    }

    /// Bytes in one frame
    pub fn frame_len(&self) -> usize {
        self.row_bytes * self.height as usize
    }

    fn check(&self, current: &[u8], previous: &[u8]) -> Result<(), RenderError> {
        let len = self.frame_len();
        if current.len() != len || previous.len() != len {
            return Err(RenderError::DimensionMismatch);
        }
        Ok(())
    }

    fn row<'a>(&self, frame: &'a [u8], y: i32) -> &'a [u8] {
        let start = y as usize * self.row_bytes;
        &frame[start..start + self.row_bytes]
    }

    fn row_dirty(&self, current: &[u8], previous: &[u8], y: i32) -> bool {
        self.row(current, y) != self.row(previous, y)
    }

    /// Whether the frames are byte-for-byte identical
    pub fn is_clean(&self, current: &[u8], previous: &[u8]) -> Result<bool, RenderError> {
        self.check(current, previous)?;
        Ok(current == previous)
    }

    /// Visit every merged dirty region top to bottom, returning how many there were
    ///
    /// A clean row closes the open region unless another dirty row follows
    /// within `min_gap` rows. A region still open at the bottom closes at the
    /// frame height.
    pub fn for_each_dirty_region(
        &self,
        current: &[u8],
        previous: &[u8],
        mut visit: impl FnMut(DirtyRegion),
    ) -> Result<usize, RenderError> {
        self.check(current, previous)?;

        let mut count = 0;
        let mut dirty_start: Option<i32> = None;

        for y in 0..self.height {
            let dirty = self.row_dirty(current, previous, y);
            match dirty_start {
                None if dirty => dirty_start = Some(y),
                Some(start) if !dirty => {
                    let gap = i32::try_from(self.min_gap).unwrap_or(i32::MAX);
                    let horizon = y.saturating_add(gap).min(self.height);
                    let bridged = (y..horizon).any(|ahead| self.row_dirty(current, previous, ahead));
                    if !bridged {
                        visit(DirtyRegion::new(start, y));
                        count += 1;
                        dirty_start = None;
                    }
                }
                _ => {}
            }
        }

        if let Some(start) = dirty_start {
            visit(DirtyRegion::new(start, self.height));
            count += 1;
        }

        Ok(count)
    }

    /// Merged dirty regions, top to bottom
    pub fn compute_dirty_regions(&self, current: &[u8], previous: &[u8]) -> Result<Vec<DirtyRegion>, RenderError> {
        let mut regions = Vec::new();
        let mut failed = None;
        self.for_each_dirty_region(current, previous, |region| {
            if failed.is_none() {
                failed = try_push(&mut regions, region).err();
            }
        })?;
        match failed {
            Some(err) => Err(err),
            None => Ok(regions),
        }
    }
}

/// Dirty regions between two equal-size surfaces
pub fn diff_surfaces<A, B>(current: &A, previous: &B, min_gap: usize) -> Result<Vec<DirtyRegion>, RenderError>
where
    A: Surface + ?Sized,
    B: Surface + ?Sized,
{
    if current.width() != previous.width() || current.height() != previous.height() {
        return Err(RenderError::DimensionMismatch);
    }
    DirtyTracker::for_surface(current)?
        .with_min_gap(min_gap)
        .compute_dirty_regions(current.buffer(), previous.buffer())
}
