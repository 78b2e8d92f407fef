//! Bit-packed drawing surfaces
//!
//! One bit per pixel, rows padded to whole bytes, MSB = leftmost pixel.
//! A set bit is ink, a clear bit is paper.
//!
//! Three surfaces implement [`Surface`]:
//! - [`Canvas`]: the frame being drawn
//! - [`Mask`]: a stencil with identical layout (ink = drawing allowed)
//! - [`MaskedCanvas`]: a canvas borrowed together with a mask
//!
//! The mask relation is a scoped borrow. The canvas never owns the mask; it is
//! attached for the lifetime of a [`MaskedCanvas`] view and detached when the
//! view is dropped. While attached, the mask gates every mutating write
//! (`set_pixel`, `fill_span` and `clear`). All primitives reduce to those three
//! calls, so no drawing path can change a pixel the mask blocks.

use alloc::vec::Vec;

use crate::error::RenderError;
use crate::geometry::{Color, Point};

/// Bytes per row for a surface `width` pixels wide
pub const fn row_stride(width: i32) -> usize {
    ((width as usize) + 7) / 8
}

/// A drawable 1-bit surface
///
/// Everything that rasterizes takes `&mut S where S: Surface + ?Sized`, never a
/// concrete surface type.
pub trait Surface {
    /// Width in pixels
    fn width(&self) -> i32;

    /// Height in pixels
    fn height(&self) -> i32;

    /// Write one pixel. Out-of-range coordinates are ignored.
    fn set_pixel(&mut self, x: i32, y: i32, color: Color);

    /// Read one pixel. Out-of-range coordinates read as paper.
    fn get_pixel(&self, x: i32, y: i32) -> Color;

    /// Fill every pixel
    fn clear(&mut self, color: Color);

    /// Fill pixels `[x_start, x_end)` on row `y`, clipped to the surface
    fn fill_span(&mut self, y: i32, x_start: i32, x_end: i32, color: Color);

    /// Packed pixel data, `row_stride() * height()` bytes, row-major
    fn buffer(&self) -> &[u8];

    /// Bytes per row
    fn row_stride(&self) -> usize {
        row_stride(self.width())
    }

    /// Whether `(x, y)` lies on the surface
    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width() && y >= 0 && y < self.height()
    }

    /// [`Surface::set_pixel`] taking a point
    fn set_pixel_at(&mut self, p: Point, color: Color) {
        self.set_pixel(p.x, p.y, color);
    }

    /// [`Surface::get_pixel`] taking a point
    fn get_pixel_at(&self, p: Point) -> Color {
        self.get_pixel(p.x, p.y)
    }
}

/// Packed pixel storage shared by canvas and mask
struct Bitmap {
    width: i32,
    height: i32,
    stride: usize,
    bytes: Vec<u8>,
}

impl Bitmap {
    fn new(width: i32, height: i32) -> Result<Self, RenderError> {
        if width <= 0 || height <= 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }

        let stride = row_stride(width);
        let len = stride
            .checked_mul(height as usize)
            .ok_or(RenderError::Allocation { bytes: usize::MAX })?;

        let mut bytes = Vec::new();
        if bytes.try_reserve_exact(len).is_err() {
            error!("Failed to allocate {}x{} bitmap ({} bytes)", width, height, len);
            return Err(RenderError::Allocation { bytes: len });
        }
        bytes.resize(len, 0);

        Ok(Self {
            width,
            height,
            stride,
            bytes,
        })
    }

    fn same_size(&self, other: &Bitmap) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Byte index and bit mask for an in-range pixel
    #[inline]
    fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return None;
        }
        let idx = y as usize * self.stride + (x as usize >> 3);
        Some((idx, 0x80 >> (x & 7)))
    }

    fn get(&self, x: i32, y: i32) -> Color {
        match self.locate(x, y) {
            Some((idx, bit)) => Color::from(self.bytes[idx] & bit != 0),
            None => Color::Paper,
        }
    }

    /// Write the bits selected by `bits`, restricted to the gate byte if any
    #[inline]
    fn apply(&mut self, idx: usize, bits: u8, color: Color, gate: Option<&[u8]>) {
        let bits = match gate {
            Some(mask) => bits & mask[idx],
            None => bits,
        };
        if color.is_ink() {
            self.bytes[idx] |= bits;
        } else {
            self.bytes[idx] &= !bits;
        }
    }

    fn set(&mut self, x: i32, y: i32, color: Color, gate: Option<&[u8]>) {
        if let Some((idx, bit)) = self.locate(x, y) {
            self.apply(idx, bit, color, gate);
        }
    }

    fn clear(&mut self, color: Color, gate: Option<&[u8]>) {
        match gate {
            None => self.bytes.fill(color.fill_byte()),
            Some(_) => {
                for idx in 0..self.bytes.len() {
                    self.apply(idx, 0xFF, color, gate);
                }
            }
        }
    }

    /// Span fill with partial-byte masks at both ends and a flat fill between
    fn fill_span(&mut self, y: i32, x_start: i32, x_end: i32, color: Color, gate: Option<&[u8]>) {
        if y < 0 || y >= self.height {
            return;
        }

        let x_start = x_start.max(0);
        let x_end = x_end.min(self.width);
        if x_start >= x_end {
            return;
        }

        let row = y as usize * self.stride;
        let start_byte = (x_start >> 3) as usize;
        let end_byte = ((x_end - 1) >> 3) as usize;
        let start_bit = x_start & 7;
        let end_bit = (x_end - 1) & 7;

        if start_byte == end_byte {
            let bits = (0xFFu8 >> start_bit) & (0xFFu8 << (7 - end_bit));
            self.apply(row + start_byte, bits, color, gate);
            return;
        }

        let mut first_full = start_byte;
        let mut last_full = end_byte;

        if start_bit != 0 {
            self.apply(row + start_byte, 0xFFu8 >> start_bit, color, gate);
            first_full += 1;
        }

        if end_bit != 7 {
            self.apply(row + end_byte, 0xFFu8 << (7 - end_bit), color, gate);
            last_full -= 1;
        }

        if first_full > last_full {
            return;
        }

        let interior = row + first_full..=row + last_full;
        match gate {
            None => self.bytes[interior].fill(color.fill_byte()),
            Some(_) => {
                for idx in interior {
                    self.apply(idx, 0xFF, color, gate);
                }
            }
        }
    }
}

/// The frame being drawn
pub struct Canvas {
    bits: Bitmap,
}

impl Canvas {
    /// Allocate a canvas filled with paper
    ///
    /// Fails with [`RenderError::Allocation`] if the buffer cannot be reserved.
    pub fn new(width: i32, height: i32) -> Result<Self, RenderError> {
        let bits = Bitmap::new(width, height)?;
        info!(
            "Allocated {}x{} canvas ({} bytes)",
            width,
            height,
            bits.bytes.len()
        );
        Ok(Self { bits })
    }

    /// Total buffer size in bytes
    pub fn buffer_size(&self) -> usize {
        self.bits.bytes.len()
    }

    /// Attach a mask for the lifetime of the returned view
    ///
    /// Drawing through the view only changes pixels where the mask holds ink.
    /// The mask must have the same dimensions as the canvas.
    pub fn attach_mask<'a>(&'a mut self, mask: &'a Mask) -> Result<MaskedCanvas<'a>, RenderError> {
        if !self.bits.same_size(&mask.bits) {
            warn!("Mask size does not match canvas");
            return Err(RenderError::DimensionMismatch);
        }
        trace!("Mask attached");
        Ok(MaskedCanvas { canvas: self, mask })
    }

    /// Copy raw pixel data from an equal-size surface, ignoring any mask
    pub fn copy_from<S: Surface + ?Sized>(&mut self, other: &S) -> Result<(), RenderError> {
        if other.width() != self.bits.width || other.height() != self.bits.height {
            return Err(RenderError::DimensionMismatch);
        }
        self.bits.bytes.copy_from_slice(other.buffer());
        Ok(())
    }
}

impl Surface for Canvas {
    fn width(&self) -> i32 {
        self.bits.width
    }

    fn height(&self) -> i32 {
        self.bits.height
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.bits.set(x, y, color, None);
    }

    fn get_pixel(&self, x: i32, y: i32) -> Color {
        self.bits.get(x, y)
    }

    fn clear(&mut self, color: Color) {
        self.bits.clear(color, None);
    }

    fn fill_span(&mut self, y: i32, x_start: i32, x_end: i32, color: Color) {
        self.bits.fill_span(y, x_start, x_end, color, None);
    }

    fn buffer(&self) -> &[u8] {
        &self.bits.bytes
    }
}

/// Stencil surface: ink = drawing allowed, paper = blocked
///
/// A new mask blocks everything. Draw the allowed region in ink with the
/// ordinary primitives.
pub struct Mask {
    bits: Bitmap,
}

impl Mask {
    /// Allocate a mask that blocks every pixel
    pub fn new(width: i32, height: i32) -> Result<Self, RenderError> {
        let bits = Bitmap::new(width, height)?;
        info!(
            "Allocated {}x{} mask ({} bytes)",
            width,
            height,
            bits.bytes.len()
        );
        Ok(Self { bits })
    }

    /// Flip every pixel, turning a window into a cutout
    pub fn invert(&mut self) {
        for byte in self.bits.bytes.iter_mut() {
            *byte = !*byte;
        }
    }

    /// Whether drawing is allowed at `(x, y)`
    pub fn allows(&self, x: i32, y: i32) -> bool {
        self.bits.get(x, y).is_ink()
    }
}

impl Surface for Mask {
    fn width(&self) -> i32 {
        self.bits.width
    }

    fn height(&self) -> i32 {
        self.bits.height
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.bits.set(x, y, color, None);
    }

    fn get_pixel(&self, x: i32, y: i32) -> Color {
        self.bits.get(x, y)
    }

    fn clear(&mut self, color: Color) {
        self.bits.clear(color, None);
    }

    fn fill_span(&mut self, y: i32, x_start: i32, x_end: i32, color: Color) {
        self.bits.fill_span(y, x_start, x_end, color, None);
    }

    fn buffer(&self) -> &[u8] {
        &self.bits.bytes
    }
}

/// A canvas with a mask attached
///
/// Created by [`Canvas::attach_mask`]. Every write is ANDed with the mask at
/// byte granularity, so masked span fills keep their O(bytes) cost.
pub struct MaskedCanvas<'a> {
    canvas: &'a mut Canvas,
    mask: &'a Mask,
}

impl<'a> MaskedCanvas<'a> {
    /// The attached mask
    pub fn mask(&self) -> &'a Mask {
        self.mask
    }

    /// End masked drawing and get the canvas back
    pub fn detach_mask(self) -> &'a mut Canvas {
        trace!("Mask detached");
        self.canvas
    }
}

impl Surface for MaskedCanvas<'_> {
    fn width(&self) -> i32 {
        self.canvas.bits.width
    }

    fn height(&self) -> i32 {
        self.canvas.bits.height
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.canvas.bits.set(x, y, color, Some(&self.mask.bits.bytes));
    }

    fn get_pixel(&self, x: i32, y: i32) -> Color {
        self.canvas.bits.get(x, y)
    }

    fn clear(&mut self, color: Color) {
        self.canvas.bits.clear(color, Some(&self.mask.bits.bytes));
    }

    fn fill_span(&mut self, y: i32, x_start: i32, x_end: i32, color: Color) {
        self.canvas
            .bits
            .fill_span(y, x_start, x_end, color, Some(&self.mask.bits.bytes));
    }

    fn buffer(&self) -> &[u8] {
        &self.canvas.bits.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ink_count(s: &impl Surface) -> usize {
        let mut n = 0;
        for y in 0..s.height() {
            for x in 0..s.width() {
                if s.get_pixel(x, y).is_ink() {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn test_new_canvas_is_paper() {
        let canvas = Canvas::new(400, 300).unwrap();
        assert_eq!(canvas.buffer_size(), 50 * 300);
        assert!(canvas.buffer().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_odd_width_stride() {
        let canvas = Canvas::new(13, 2).unwrap();
        assert_eq!(canvas.row_stride(), 2);
        assert_eq!(canvas.buffer().len(), 4);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            Canvas::new(0, 10).err(),
            Some(RenderError::InvalidDimensions {
                width: 0,
                height: 10
            })
        );
        assert!(Mask::new(10, -1).is_err());
    }

    #[test]
    fn test_allocation_failure_is_reported() {
        let result = Canvas::new(i32::MAX, i32::MAX);
        assert!(matches!(result, Err(RenderError::Allocation { .. })));
    }

    #[test]
    fn test_bit_layout_msb_first() {
        let mut canvas = Canvas::new(16, 2).unwrap();
        canvas.set_pixel(0, 0, Color::Ink);
        canvas.set_pixel(9, 1, Color::Ink);
        assert_eq!(canvas.buffer(), &[0x80, 0x00, 0x00, 0x40]);
    }

    #[test]
    fn test_clear_fills_bytes() {
        let mut canvas = Canvas::new(20, 4).unwrap();
        canvas.clear(Color::Ink);
        assert!(canvas.buffer().iter().all(|&b| b == 0xFF));
        canvas.clear(Color::Paper);
        assert!(canvas.buffer().iter().all(|&b| b == 0x00));
    }

    #[test]
    fn test_span_within_single_byte() {
        let mut canvas = Canvas::new(16, 1).unwrap();
        canvas.fill_span(0, 2, 5, Color::Ink);
        assert_eq!(canvas.buffer(), &[0b0011_1000, 0x00]);
    }

    #[test]
    fn test_span_across_bytes_unaligned() {
        let mut canvas = Canvas::new(32, 1).unwrap();
        canvas.fill_span(0, 5, 27, Color::Ink);
        assert_eq!(canvas.buffer(), &[0b0000_0111, 0xFF, 0xFF, 0b1110_0000]);
    }

    #[test]
    fn test_span_paper_clears_bits() {
        let mut canvas = Canvas::new(24, 1).unwrap();
        canvas.clear(Color::Ink);
        canvas.fill_span(0, 3, 17, Color::Paper);
        assert_eq!(canvas.buffer(), &[0b1110_0000, 0x00, 0b0111_1111]);
    }

    #[test]
    fn test_span_clips_and_ignores_empty() {
        let mut canvas = Canvas::new(16, 2).unwrap();
        canvas.fill_span(0, -10, 4, Color::Ink);
        canvas.fill_span(1, 12, 100, Color::Ink);
        canvas.fill_span(1, 5, 5, Color::Ink);
        canvas.fill_span(1, 8, 2, Color::Ink);
        canvas.fill_span(2, 0, 16, Color::Ink);
        canvas.fill_span(-1, 0, 16, Color::Ink);
        assert_eq!(canvas.buffer(), &[0xF0, 0x00, 0x00, 0x0F]);
    }

    #[test]
    fn test_copy_from_requires_same_size() {
        let mut a = Canvas::new(10, 10).unwrap();
        let mut b = Canvas::new(10, 10).unwrap();
        b.set_pixel(3, 3, Color::Ink);
        a.copy_from(&b).unwrap();
        assert_eq!(a.get_pixel(3, 3), Color::Ink);

        let c = Canvas::new(11, 10).unwrap();
        assert_eq!(a.copy_from(&c), Err(RenderError::DimensionMismatch));
    }

    #[test]
    fn test_mask_invert() {
        let mut mask = Mask::new(8, 1).unwrap();
        mask.fill_span(0, 0, 4, Color::Ink);
        assert!(mask.allows(0, 0));
        assert!(!mask.allows(4, 0));
        mask.invert();
        assert!(!mask.allows(0, 0));
        assert!(mask.allows(4, 0));
    }

    #[test]
    fn test_attach_mask_size_mismatch() {
        let mut canvas = Canvas::new(16, 16).unwrap();
        let mask = Mask::new(16, 8).unwrap();
        assert_eq!(
            canvas.attach_mask(&mask).err(),
            Some(RenderError::DimensionMismatch)
        );
    }

    #[test]
    fn test_mask_gates_every_write() {
        let mut canvas = Canvas::new(24, 4).unwrap();
        let mut mask = Mask::new(24, 4).unwrap();
        // Allow only columns 4..12
        for y in 0..4 {
            mask.fill_span(y, 4, 12, Color::Ink);
        }

        {
            let mut view = canvas.attach_mask(&mask).unwrap();
            view.set_pixel(0, 0, Color::Ink);
            view.set_pixel(5, 0, Color::Ink);
            view.fill_span(1, 0, 24, Color::Ink);
            view.clear(Color::Ink);
            view.fill_span(3, 0, 24, Color::Paper);
        }

        for y in 0..4 {
            for x in 0..24 {
                let expected = (4..12).contains(&x) && y != 3;
                assert_eq!(canvas.get_pixel(x, y).is_ink(), expected, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_mask_gates_every_primitive() {
        use crate::brush::{stroke_bezier_cached, BrushCache, BrushId};
        use crate::font::{render_string, TextStyle};
        use crate::geometry::{PointF, Rect};
        use crate::pattern::{fill_rect_pattern, Pattern};
        use crate::raster::{draw_line, draw_thick_line, fill_circle, fill_polygon, fill_rect};

        let (w, h) = (64, 48);
        let mut mask = Mask::new(w, h).unwrap();
        // Allow the left half and a diagonal notch on the right
        for y in 0..h {
            mask.fill_span(y, 0, w / 2, Color::Ink);
            mask.set_pixel(w / 2 + y / 2, y, Color::Ink);
        }

        let brushes = BrushCache::new();
        let path = [
            PointF::new(4.0, 6.0),
            PointF::new(60.0, 10.0),
            PointF::new(56.0, 40.0),
            PointF::new(8.0, 42.0),
        ];
        let triangle = [Point::new(2, 2), Point::new(62, 20), Point::new(10, 46)];

        for background in [Color::Paper, Color::Ink] {
            let color = background.inverted();
            let mut canvas = Canvas::new(w, h).unwrap();
            canvas.clear(background);
            for x in (0..w).step_by(3) {
                canvas.set_pixel(x, x % h, color);
            }
            let mut before = Canvas::new(w, h).unwrap();
            before.copy_from(&canvas).unwrap();

            {
                let mut view = canvas.attach_mask(&mask).unwrap();
                draw_line(&mut view, 0, 0, w - 1, h - 1, color);
                draw_thick_line(&mut view, 0, h - 1, w - 1, 0, 5, color);
                fill_circle(&mut view, w / 2, h / 2, 14, color);
                fill_polygon(&mut view, &triangle, color);
                fill_rect(&mut view, Rect::new(28, 30, 30, 10), color);
                fill_rect_pattern(&mut view, Rect::new(0, 0, w, h / 2), Pattern::DenseCrosshatch);
                fill_rect_pattern(&mut view, Rect::new(0, h / 2, w, h / 2), Pattern::SolidPaper);
                stroke_bezier_cached(&mut view, &brushes, BrushId::Heavy, &path, 0.5, 1.0).unwrap();
                let style = TextStyle::new(12, 16).with_color(color);
                render_string(&mut view, "10:07", 2, 16, &style);
            }

            let mut changed = 0;
            for y in 0..h {
                for x in 0..w {
                    if mask.allows(x, y) {
                        if canvas.get_pixel(x, y) != before.get_pixel(x, y) {
                            changed += 1;
                        }
                    } else {
                        assert_eq!(
                            canvas.get_pixel(x, y),
                            before.get_pixel(x, y),
                            "masked pixel ({}, {}) on {:?}",
                            x,
                            y,
                            background
                        );
                    }
                }
            }
            assert!(changed > 0);
        }
    }

    #[test]
    fn test_detach_restores_unmasked_drawing() {
        let mut canvas = Canvas::new(8, 8).unwrap();
        let mask = Mask::new(8, 8).unwrap();

        let view = canvas.attach_mask(&mask).unwrap();
        let canvas = view.detach_mask();
        canvas.set_pixel(1, 1, Color::Ink);
        assert_eq!(canvas.get_pixel(1, 1), Color::Ink);
    }

    #[test]
    fn test_masked_view_reads_canvas() {
        let mut canvas = Canvas::new(8, 8).unwrap();
        canvas.set_pixel(2, 2, Color::Ink);
        let mask = Mask::new(8, 8).unwrap();
        let view = canvas.attach_mask(&mask).unwrap();
        assert_eq!(view.get_pixel(2, 2), Color::Ink);
        assert_eq!(ink_count(&view), 1);
    }

    proptest! {
        #[test]
        fn prop_pixel_roundtrip_in_bounds(x in 0i32..53, y in 0i32..17, ink: bool) {
            let mut canvas = Canvas::new(53, 17).unwrap();
            canvas.clear(Color::from(!ink));
            canvas.set_pixel(x, y, Color::from(ink));
            prop_assert_eq!(canvas.get_pixel(x, y), Color::from(ink));
        }

        #[test]
        fn prop_out_of_bounds_is_inert(x in -100i32..200, y in -100i32..200) {
            prop_assume!(!(0..53).contains(&x) || !(0..17).contains(&y));
            let mut canvas = Canvas::new(53, 17).unwrap();
            canvas.set_pixel(x, y, Color::Ink);
            prop_assert!(canvas.buffer().iter().all(|&b| b == 0));
            prop_assert_eq!(canvas.get_pixel(x, y), Color::Paper);
        }

        #[test]
        fn prop_span_sets_exactly_range(y in 0i32..5, a in 0i32..70, len in 0i32..70) {
            let b = (a + len).min(70);
            let mut canvas = Canvas::new(70, 5).unwrap();
            canvas.fill_span(y, a, b, Color::Ink);
            for py in 0..5 {
                for px in 0..70 {
                    let expected = py == y && px >= a && px < b;
                    prop_assert_eq!(canvas.get_pixel(px, py).is_ink(), expected);
                }
            }
        }
    }
}
