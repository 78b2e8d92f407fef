//! Engine error type
//!
//! Only allocation and size checks can fail. Out-of-range geometry and
//! degenerate input are handled in place (clipped, skipped or drawn as a
//! point/disc) and never surface here.

use alloc::vec::Vec;
use core::fmt;

/// Rendering engine errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderError {
    /// Pixel buffer or scratch storage could not be reserved
    Allocation {
        /// Requested size in bytes
        bytes: usize,
    },
    /// Width or height is zero or negative
    InvalidDimensions {
        /// Requested width in pixels
        width: i32,
        /// Requested height in pixels
        height: i32,
    },
    /// Two surfaces (or a surface and a raw buffer) differ in size
    DimensionMismatch,
    /// Two point lists that must pair up have different lengths
    LengthMismatch {
        /// Length of the first list
        left: usize,
        /// Length of the second list
        right: usize,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Allocation { bytes } => {
                write!(f, "failed to allocate {} bytes", bytes)
            }
            RenderError::InvalidDimensions { width, height } => {
                write!(f, "invalid surface dimensions {}x{}", width, height)
            }
            RenderError::DimensionMismatch => write!(f, "surface dimensions do not match"),
            RenderError::LengthMismatch { left, right } => {
                write!(f, "point lists differ in length: {} != {}", left, right)
            }
        }
    }
}

/// Empty vector with room for `capacity` items, or an allocation error
pub fn try_vec<T>(capacity: usize) -> Result<Vec<T>, RenderError> {
    let mut v = Vec::new();
    v.try_reserve_exact(capacity).map_err(|_| RenderError::Allocation {
        bytes: capacity.saturating_mul(core::mem::size_of::<T>()),
    })?;
    Ok(v)
}

/// Push without aborting on allocation failure
pub fn try_push<T>(v: &mut Vec<T>, item: T) -> Result<(), RenderError> {
    if v.try_reserve(1).is_err() {
        return Err(RenderError::Allocation {
            bytes: v.len().saturating_add(1).saturating_mul(core::mem::size_of::<T>()),
        });
    }
    v.push(item);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            RenderError::Allocation { bytes: 15000 }.to_string(),
            "failed to allocate 15000 bytes"
        );
        assert_eq!(
            RenderError::LengthMismatch { left: 3, right: 4 }.to_string(),
            "point lists differ in length: 3 != 4"
        );
    }
}
