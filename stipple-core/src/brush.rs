//! Brush textures and the pre-rotated stamp cache
//!
//! A brush is a small 1-bit texture stamped repeatedly along a stroke. Rotating
//! it per stamp costs a sine, a cosine and a rounding per texel, so
//! [`BrushCache`] bakes every brush at [`ROTATION_STEPS`] fixed angles once.
//! At stroke time the nearest bake is looked up and its ink runs are written
//! as spans.

use core::f32::consts::TAU;

use crate::bezier::walk_stamps;
use crate::canvas::Surface;
use crate::error::RenderError;
use crate::geometry::{Color, PointF};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pre-rotated angles per brush (22.5 degree steps)
pub const ROTATION_STEPS: usize = 16;

/// Number of built-in brushes
pub const BRUSH_COUNT: usize = 5;

/// Largest rotated stamp edge in pixels
pub const MAX_STAMP_SIZE: usize = 14;

/// Widest supported texture
pub const MAX_TEXTURE_WIDTH: u8 = 16;

/// 1-bit brush texture
///
/// Each row is a bitmask whose most significant `width` bits hold the row's
/// texels, leftmost texel in the highest bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushBitmap<'a> {
    width: u8,
    rows: &'a [u16],
}

impl<'a> BrushBitmap<'a> {
    /// Wrap row data. Widths above [`MAX_TEXTURE_WIDTH`] are clamped.
    pub const fn new(width: u8, rows: &'a [u16]) -> Self {
        let width = if width > MAX_TEXTURE_WIDTH {
            MAX_TEXTURE_WIDTH
        } else {
            width
        };
        Self { width, rows }
    }

    pub const fn width(&self) -> usize {
        self.width as usize
    }

    pub const fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_ink(&self, x: usize, y: usize) -> bool {
        if x >= self.width() || y >= self.height() {
            return false;
        }
        (self.rows[y] >> (self.width() - 1 - x)) & 1 != 0
    }

    /// Coordinates of every ink texel, row by row
    pub fn ink_texels(&self) -> impl Iterator<Item = (usize, usize)> + 'a {
        let width = self.width();
        let rows = self.rows;
        (0..rows.len()).flat_map(move |y| {
            (0..width)
                .filter(move |&x| (rows[y] >> (width - 1 - x)) & 1 != 0)
                .map(move |x| (x, y))
        })
    }
}

const HEAVY_8X8: [u16; 8] = [
    0b0011_1100,
    0b0111_1110,
    0b1101_1011,
    0b1111_1111,
    0b1111_1111,
    0b1101_1011,
    0b0111_1110,
    0b0011_1100,
];

const FINE_6X6: [u16; 6] = [
    0b01_1110,
    0b11_1111,
    0b11_0011,
    0b11_0011,
    0b11_1111,
    0b01_1110,
];

const SCRATCHY_8X8: [u16; 8] = [
    0b0101_1010,
    0b1110_1110,
    0b0111_1101,
    0b1101_1110,
    0b0111_1011,
    0b1011_1110,
    0b0111_0110,
    0b0010_1100,
];

const THIN_4X4: [u16; 4] = [
    0b0110,
    0b1111,
    0b1111,
    0b0110,
];

const BLOBBY_10X10: [u16; 10] = [
    0b00_1111_1000,
    0b01_1111_1100,
    0b11_1111_1110,
    0b11_1111_1111,
    0b11_1111_1111,
    0b11_1111_1111,
    0b11_1111_1111,
    0b01_1111_1111,
    0b01_1111_1110,
    0b00_0111_1000,
];

/// Built-in brush
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BrushId {
    /// 8x8 round ball with a speckled core
    #[default]
    Heavy,
    /// 6x6 ring for delicate outlines
    Fine,
    /// 8x8 with broken, uneven edges
    Scratchy,
    /// 4x4 hairline
    Thin,
    /// 10x10 chunky blob
    Blobby,
}

impl BrushId {
    pub const ALL: [BrushId; BRUSH_COUNT] = [
        BrushId::Heavy,
        BrushId::Fine,
        BrushId::Scratchy,
        BrushId::Thin,
        BrushId::Blobby,
    ];

    /// Source texture
    pub const fn bitmap(self) -> BrushBitmap<'static> {
        match self {
            BrushId::Heavy => BrushBitmap::new(8, &HEAVY_8X8),
            BrushId::Fine => BrushBitmap::new(6, &FINE_6X6),
            BrushId::Scratchy => BrushBitmap::new(8, &SCRATCHY_8X8),
            BrushId::Thin => BrushBitmap::new(4, &THIN_4X4),
            BrushId::Blobby => BrushBitmap::new(10, &BLOBBY_10X10),
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// One brush baked at one angle
///
/// Bit `x` of `rows[y]` is the texel at `(x, y)` of the stamp box, whose top
/// left corner sits at `(offset_x, offset_y)` relative to the stamp centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RotatedStamp {
    pub width: u8,
    pub height: u8,
    pub offset_x: i8,
    pub offset_y: i8,
    pub rows: [u16; MAX_STAMP_SIZE],
}

impl RotatedStamp {
    const EMPTY: RotatedStamp = RotatedStamp {
        width: 0,
        height: 0,
        offset_x: 0,
        offset_y: 0,
        rows: [0; MAX_STAMP_SIZE],
    };

    pub fn is_ink(&self, x: usize, y: usize) -> bool {
        x < self.width as usize && y < self.height as usize && (self.rows[y] >> x) & 1 != 0
    }

    /// Number of ink pixels
    pub fn ink_count(&self) -> u32 {
        self.rows.iter().map(|r| r.count_ones()).sum()
    }

    /// Rotate `bitmap` about its centre by `angle` radians
    ///
    /// The stamp box is the bounding box of the rotated ink texels, each rounded
    /// half-up to a pixel, clamped to [`MAX_STAMP_SIZE`].
    fn bake(bitmap: &BrushBitmap<'_>, angle: f32) -> Self {
        let cos_a = libm::cosf(angle);
        let sin_a = libm::sinf(angle);
        let half_w = bitmap.width() as f32 / 2.0;
        let half_h = bitmap.height() as f32 / 2.0;

        let place = |tx: usize, ty: usize| {
            let dx = tx as f32 - half_w + 0.5;
            let dy = ty as f32 - half_h + 0.5;
            let rx = dx * cos_a - dy * sin_a;
            let ry = dx * sin_a + dy * cos_a;
            (
                libm::floorf(rx + 0.5) as i32,
                libm::floorf(ry + 0.5) as i32,
            )
        };

        let mut min = (i32::MAX, i32::MAX);
        let mut max = (i32::MIN, i32::MIN);
        for (tx, ty) in bitmap.ink_texels() {
            let (x, y) = place(tx, ty);
            min = (min.0.min(x), min.1.min(y));
            max = (max.0.max(x), max.1.max(y));
        }
        if min.0 > max.0 {
            return Self::EMPTY;
        }

        let width = (max.0 - min.0 + 1).min(MAX_STAMP_SIZE as i32);
        let height = (max.1 - min.1 + 1).min(MAX_STAMP_SIZE as i32);

        let mut stamp = RotatedStamp {
            width: width as u8,
            height: height as u8,
            offset_x: min.0 as i8,
            offset_y: min.1 as i8,
            rows: [0; MAX_STAMP_SIZE],
        };

        for (tx, ty) in bitmap.ink_texels() {
            let (x, y) = place(tx, ty);
            let (px, py) = (x - min.0, y - min.1);
            if px < width && py < height {
                stamp.rows[py as usize] |= 1 << px;
            }
        }

        stamp
    }
}

/// Every built-in brush pre-rotated at every step
///
/// Baked once and read-only afterwards, so one cache can be shared by any
/// number of renderers. Stored inline (a few KiB); box it if stack is tight.
pub struct BrushCache {
    stamps: [[RotatedStamp; ROTATION_STEPS]; BRUSH_COUNT],
}

impl BrushCache {
    /// Bake all brushes
    pub fn new() -> Self {
        let mut stamps = [[RotatedStamp::EMPTY; ROTATION_STEPS]; BRUSH_COUNT];

        for brush in BrushId::ALL {
            let bitmap = brush.bitmap();
            for (step, stamp) in stamps[brush.index()].iter_mut().enumerate() {
                let angle = step as f32 * TAU / ROTATION_STEPS as f32;
                *stamp = RotatedStamp::bake(&bitmap, angle);
            }
        }

        info!(
            "Brush cache baked: {} brushes x {} rotations",
            BRUSH_COUNT,
            ROTATION_STEPS
        );
        Self { stamps }
    }

    /// Rotation step nearest to `angle` radians, any angle accepted
    pub fn angle_to_index(angle: f32) -> usize {
        let steps = libm::round(f64::from(angle) / core::f64::consts::TAU * ROTATION_STEPS as f64);
        (steps as i64).rem_euclid(ROTATION_STEPS as i64) as usize
    }

    /// Stamp for `brush` nearest to `angle` radians
    pub fn get(&self, brush: BrushId, angle: f32) -> &RotatedStamp {
        &self.stamps[brush.index()][Self::angle_to_index(angle)]
    }
}

impl Default for BrushCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a baked stamp centred on `(cx, cy)`
///
/// Each run of ink in a stamp row becomes one span fill.
pub fn stamp_rotated<S: Surface + ?Sized>(surface: &mut S, stamp: &RotatedStamp, cx: f32, cy: f32) {
    let base_x = libm::roundf(cx) as i32 + i32::from(stamp.offset_x);
    let base_y = libm::roundf(cy) as i32 + i32::from(stamp.offset_y);

    for (y, &row) in stamp.rows.iter().take(stamp.height as usize).enumerate() {
        let mut bits = u32::from(row);
        while bits != 0 {
            let start = bits.trailing_zeros();
            let run = (bits >> start).trailing_ones();
            let x = base_x + start as i32;
            surface.fill_span(base_y + y as i32, x, x + run as i32, Color::Ink);
            bits &= !(((1u32 << run) - 1) << start);
        }
    }
}

/// Textured stroke along a smoothed path using baked stamps
///
/// Stamp positions and headings are identical to
/// [`crate::bezier::stroke_bezier_texture_ball`]; only the rotation is snapped
/// to the nearest step.
pub fn stroke_bezier_cached<S: Surface + ?Sized>(
    surface: &mut S,
    cache: &BrushCache,
    brush: BrushId,
    points: &[PointF],
    smoothness: f32,
    spacing: f32,
) -> Result<(), RenderError> {
    walk_stamps(points, smoothness, spacing, |at, angle| {
        stamp_rotated(surface, cache.get(brush, angle), at.x, at.y);
    })
}
