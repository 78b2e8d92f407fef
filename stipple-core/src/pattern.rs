//! Ordered-dither fill patterns
//!
//! Gray levels on a 1-bit panel are approximated with a 4x4 Bayer matrix or a
//! fixed 8x8 crosshatch tile. Pattern fills walk the same geometry as the
//! solid fills in [`crate::raster`].
//!
//! Solid patterns are written with span fills: `SolidInk` paints ink and
//! `SolidPaper` erases to paper. Dithered patterns only ever set ink pixels and
//! leave the rest of the shape untouched, so they can be layered over existing
//! content.

use crate::canvas::Surface;
use crate::geometry::{Color, Point, Rect};
use crate::raster::{circle_spans, polygon_spans};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 4x4 ordered-dither matrix, values 0..16
pub const BAYER_4X4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

/// Diagonal crosshatch tile, 40 of 64 bits set
pub const CROSSHATCH_8X8: [u8; 8] = [
    0b1100_0011,
    0b1110_0111,
    0b0111_1110,
    0b0011_1100,
    0b0011_1100,
    0b0111_1110,
    0b1110_0111,
    0b1100_0011,
];

/// Fill pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Pattern {
    /// Every pixel ink
    SolidInk,
    /// ~75% ink
    Dense,
    /// ~50% ink, checkerboard
    Medium,
    /// ~25% ink
    Sparse,
    /// Every pixel paper
    SolidPaper,
    /// ~60% ink, diagonal hatch
    DenseCrosshatch,
}

impl Pattern {
    /// Bayer threshold: a pixel is ink when its matrix value is below this
    const fn threshold(self) -> u8 {
        match self {
            Pattern::SolidInk => 16,
            Pattern::Dense => 12,
            Pattern::Medium => 8,
            Pattern::Sparse => 4,
            Pattern::SolidPaper | Pattern::DenseCrosshatch => 0,
        }
    }

    /// Colour for solid patterns, `None` for dithered ones
    const fn solid(self) -> Option<Color> {
        match self {
            Pattern::SolidInk => Some(Color::Ink),
            Pattern::SolidPaper => Some(Color::Paper),
            _ => None,
        }
    }
}

/// Whether `pattern` puts ink at `(x, y)`
///
/// The result depends only on the low bits of the coordinates, so patterns tile
/// seamlessly across shapes.
pub fn pattern_test(pattern: Pattern, x: i32, y: i32) -> bool {
    match pattern {
        Pattern::SolidInk => true,
        Pattern::SolidPaper => false,
        Pattern::DenseCrosshatch => CROSSHATCH_8X8[(y & 7) as usize] & (0x80 >> (x & 7)) != 0,
        _ => BAYER_4X4[(y & 3) as usize][(x & 3) as usize] < pattern.threshold(),
    }
}

/// Apply `pattern` to `[x_start, x_end)` on row `y`
fn pattern_span<S: Surface + ?Sized>(surface: &mut S, y: i32, x_start: i32, x_end: i32, pattern: Pattern) {
    if let Some(color) = pattern.solid() {
        surface.fill_span(y, x_start, x_end, color);
        return;
    }

    if y < 0 || y >= surface.height() {
        return;
    }
    let x_start = x_start.max(0);
    let x_end = x_end.min(surface.width());
    for x in x_start..x_end {
        if pattern_test(pattern, x, y) {
            surface.set_pixel(x, y, Color::Ink);
        }
    }
}

/// Fill a rectangle with a pattern
pub fn fill_rect_pattern<S: Surface + ?Sized>(surface: &mut S, rect: Rect, pattern: Pattern) {
    let y0 = rect.top().max(0);
    let y1 = rect.bottom().min(surface.height());
    for y in y0..y1 {
        pattern_span(surface, y, rect.left(), rect.right(), pattern);
    }
}

/// Fill a disc with a pattern
pub fn fill_circle_pattern<S: Surface + ?Sized>(
    surface: &mut S,
    cx: i32,
    cy: i32,
    r: i32,
    pattern: Pattern,
) {
    circle_spans(cx, cy, r, |y, x_start, x_end| {
        pattern_span(surface, y, x_start, x_end, pattern);
    });
}

/// Fill a polygon with a pattern, even-odd rule
pub fn fill_polygon_pattern<S: Surface + ?Sized>(surface: &mut S, points: &[Point], pattern: Pattern) {
    let height = surface.height();
    polygon_spans(points, height, |y, x_start, x_end| {
        pattern_span(surface, y, x_start, x_end, pattern);
    });
}
