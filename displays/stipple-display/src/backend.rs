//! Display transfer trait
//!
//! Defines what the presenter needs from a panel driver.

use core::fmt;

use stipple_core::{DirtyRegion, RenderError};

/// Presentation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Frame buffer could not be allocated or has the wrong size
    Render(RenderError),
    /// The sink failed to move data to the panel
    Transfer,
    /// The sink is busy (e.g. panel still refreshing)
    NotReady,
}

impl From<RenderError> for DisplayError {
    fn from(err: RenderError) -> Self {
        DisplayError::Render(err)
    }
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::Render(err) => write!(f, "render error: {}", err),
            DisplayError::Transfer => write!(f, "display transfer failed"),
            DisplayError::NotReady => write!(f, "display not ready"),
        }
    }
}

/// Destination for packed frame data
///
/// Implementations handle device addressing, command framing and refresh
/// waveforms. The presenter never calls either push method unless
/// [`FrameSink::is_ready`] returned true.
pub trait FrameSink {
    /// Send rows `region.y_start..region.y_end`
    ///
    /// `rows` holds exactly those rows, `row_stride` bytes each.
    fn push_rows(&mut self, region: DirtyRegion, rows: &[u8], row_stride: usize) -> Result<(), DisplayError>;

    /// Send a whole frame and do a full refresh
    fn push_full(&mut self, buffer: &[u8]) -> Result<(), DisplayError>;

    /// Whether the sink can accept data now
    fn is_ready(&self) -> bool;
}

impl<T: FrameSink + ?Sized> FrameSink for &mut T {
    fn push_rows(&mut self, region: DirtyRegion, rows: &[u8], row_stride: usize) -> Result<(), DisplayError> {
        (**self).push_rows(region, rows, row_stride)
    }

    fn push_full(&mut self, buffer: &[u8]) -> Result<(), DisplayError> {
        (**self).push_full(buffer)
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_render_error() {
        let err: DisplayError = RenderError::DimensionMismatch.into();
        assert_eq!(err, DisplayError::Render(RenderError::DimensionMismatch));
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(DisplayError::NotReady.to_string(), "display not ready");
        assert_eq!(
            DisplayError::Render(RenderError::Allocation { bytes: 16 }).to_string(),
            "render error: failed to allocate 16 bytes"
        );
    }
}
