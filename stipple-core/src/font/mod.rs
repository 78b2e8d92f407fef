//! Stroke-based vector font
//!
//! Glyphs are polylines in a normalized 0..=100 box, scaled into whatever
//! character cell the caller asks for and drawn with thick lines. Layout is
//! proportional: each character's cell width is the base width times a
//! per-character multiplier.
//!
//! Characters without a glyph draw nothing but still take up their cell, so
//! a space (or an unsupported character) advances the pen.

mod glyphs;

pub use glyphs::glyph;

use crate::canvas::Surface;
use crate::geometry::Color;
use crate::raster::draw_thick_line;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Gap between characters in pixels
pub const DEFAULT_SPACING: i32 = 4;

/// Glyph stroke thickness in pixels
pub const DEFAULT_STROKE_WIDTH: i32 = 2;

/// Gap between lines of multiline text in pixels
pub const DEFAULT_LINE_SPACING: i32 = 8;

/// Immutable stroke list for one character
#[derive(Debug, PartialEq, Eq)]
pub struct Glyph {
    strokes: &'static [&'static [(u8, u8)]],
}

impl Glyph {
    pub const fn new(strokes: &'static [&'static [(u8, u8)]]) -> Self {
        Self { strokes }
    }

    /// Open polylines, each a list of `(x, y)` in the 0..=100 box
    pub fn strokes(&self) -> &'static [&'static [(u8, u8)]] {
        self.strokes
    }
}

/// Fraction of the base width used by `c`
pub fn width_multiplier(c: char) -> f32 {
    match c {
        ':' | '/' | ' ' | 't' | 'f' => 0.5,
        '.' | '\u{b0}' => 0.33,
        '-' => 0.67,
        'i' | 'j' => 0.4,
        'l' => 0.35,
        'r' => 0.6,
        _ => 1.0,
    }
}

/// Cell width of `c` for a base width, truncated to whole pixels
pub fn char_width(c: char, base_width: i32) -> i32 {
    (base_width as f32 * width_multiplier(c)) as i32
}

/// Horizontal anchor for a line of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TextAlign {
    /// Anchor is the left edge
    #[default]
    Left,
    /// Anchor is the centre
    Center,
    /// Anchor is the right edge
    Right,
}

/// Character cell size, spacing, stroke and colour for a run of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextStyle {
    /// Base cell width in pixels
    pub char_width: i32,
    /// Cell height in pixels (descenders extend 15% below)
    pub char_height: i32,
    /// Gap between characters
    pub spacing: i32,
    /// Stroke thickness
    pub stroke_width: i32,
    pub color: Color,
}

impl TextStyle {
    /// Ink text with default spacing and stroke width
    pub const fn new(char_width: i32, char_height: i32) -> Self {
        Self {
            char_width,
            char_height,
            spacing: DEFAULT_SPACING,
            stroke_width: DEFAULT_STROKE_WIDTH,
            color: Color::Ink,
        }
    }

    pub const fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    pub const fn with_stroke_width(mut self, stroke_width: i32) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Map a glyph coordinate into a destination cell
fn scale(v: u8, origin: i32, size: i32) -> i32 {
    origin + (i32::from(v) * size) / 100
}

/// Draw one character into the cell at `(x, y)` of the given size
pub fn render_char<S: Surface + ?Sized>(
    surface: &mut S,
    c: char,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    stroke_width: i32,
    color: Color,
) {
    let Some(glyph) = glyph(c) else {
        return;
    };

    for stroke in glyph.strokes() {
        for pair in stroke.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            draw_thick_line(
                surface,
                scale(x0, x, width),
                scale(y0, y, height),
                scale(x1, x, width),
                scale(y1, y, height),
                stroke_width,
                color,
            );
        }
    }
}

/// Draw a string with its left edge at `x`
pub fn render_string<S: Surface + ?Sized>(surface: &mut S, text: &str, x: i32, y: i32, style: &TextStyle) {
    let mut pen = x;
    for c in text.chars() {
        let width = char_width(c, style.char_width);
        render_char(
            surface,
            c,
            pen,
            y,
            width,
            style.char_height,
            style.stroke_width,
            style.color,
        );
        pen += width + style.spacing;
    }
}

/// Total advance of `text`, with spacing between characters but not after
/// the last one
pub fn string_width(text: &str, base_width: i32, spacing: i32) -> i32 {
    let mut total = 0;
    for (i, c) in text.chars().enumerate() {
        if i > 0 {
            total += spacing;
        }
        total += char_width(c, base_width);
    }
    total
}

/// Left edge of `text` anchored at `anchor_x`
pub fn layout_origin(text: &str, anchor_x: i32, align: TextAlign, style: &TextStyle) -> i32 {
    match align {
        TextAlign::Left => anchor_x,
        TextAlign::Center => anchor_x - string_width(text, style.char_width, style.spacing) / 2,
        TextAlign::Right => anchor_x - string_width(text, style.char_width, style.spacing),
    }
}

/// Draw a string centred on `center_x`
pub fn render_string_centered<S: Surface + ?Sized>(
    surface: &mut S,
    text: &str,
    center_x: i32,
    y: i32,
    style: &TextStyle,
) {
    let x = layout_origin(text, center_x, TextAlign::Center, style);
    render_string(surface, text, x, y, style);
}

/// Draw a string ending at `right_x`
pub fn render_string_right<S: Surface + ?Sized>(
    surface: &mut S,
    text: &str,
    right_x: i32,
    y: i32,
    style: &TextStyle,
) {
    let x = layout_origin(text, right_x, TextAlign::Right, style);
    render_string(surface, text, x, y, style);
}

/// Draw lines of text top to bottom, each aligned on `x`
///
/// Lines advance by the cell height plus `line_spacing`.
pub fn render_multiline<S: Surface + ?Sized>(
    surface: &mut S,
    lines: &[&str],
    x: i32,
    y: i32,
    line_spacing: i32,
    align: TextAlign,
    style: &TextStyle,
) {
    let mut line_y = y;
    for line in lines {
        let origin = layout_origin(line, x, align, style);
        render_string(surface, line, origin, line_y, style);
        line_y += style.char_height + line_spacing;
    }
}

/// Draw centred text over a thicker outline of itself
///
/// The outline is drawn first in `halo_color`, `halo` pixels wider than the
/// stroke on each side, so light text stays legible on a dark or busy fill.
pub fn render_string_centered_with_halo<S: Surface + ?Sized>(
    surface: &mut S,
    text: &str,
    center_x: i32,
    y: i32,
    style: &TextStyle,
    halo: i32,
    halo_color: Color,
) {
    let outline = style
        .with_stroke_width(style.stroke_width + 2 * halo.max(0))
        .with_color(halo_color);
    render_string_centered(surface, text, center_x, y, &outline);
    render_string_centered(surface, text, center_x, y, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use proptest::prelude::*;

    fn ink_columns(canvas: &Canvas) -> Option<(i32, i32)> {
        let mut span: Option<(i32, i32)> = None;
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                if canvas.get_pixel(x, y).is_ink() {
                    span = Some(match span {
                        Some((lo, hi)) => (lo.min(x), hi.max(x)),
                        None => (x, x),
                    });
                }
            }
        }
        span
    }

    #[test]
    fn test_glyph_coverage() {
        for c in ('0'..='9').chain('A'..='Z').chain('a'..='z') {
            assert!(glyph(c).is_some(), "missing {:?}", c);
        }
        for c in [':', '-', '.', '/', '%', '\u{b0}'] {
            assert!(glyph(c).is_some(), "missing {:?}", c);
        }
        assert!(glyph(' ').is_none());
        assert!(glyph('#').is_none());
    }

    #[test]
    fn test_glyph_coordinates_in_box() {
        for c in ('0'..='9').chain('A'..='Z').chain('a'..='z') {
            let Some(g) = glyph(c) else { continue };
            for stroke in g.strokes() {
                assert!(stroke.len() >= 2, "{:?} has a dot stroke", c);
                for &(x, y) in *stroke {
                    assert!(x <= 100, "{:?}", c);
                    assert!(y <= 115, "{:?}", c);
                }
            }
        }
    }

    #[test]
    fn test_width_multipliers() {
        assert_eq!(char_width('8', 20), 20);
        assert_eq!(char_width(':', 20), 10);
        assert_eq!(char_width('.', 20), 6);
        assert_eq!(char_width('-', 12), 8);
        assert_eq!(char_width('i', 20), 8);
        assert_eq!(char_width('m', 20), 20);
    }

    #[test]
    fn test_string_width() {
        assert_eq!(string_width("", 20, 4), 0);
        assert_eq!(string_width("1", 20, 4), 20);
        assert_eq!(string_width("12:30", 38, 5), 38 * 4 + 19 + 4 * 5);
        assert_eq!(string_width("72\u{b0}", 12, 2), 12 + 12 + 3 + 2 * 2);
    }

    #[test]
    fn test_unknown_char_advances() {
        let style = TextStyle::new(10, 20);
        let mut with_gap = Canvas::new(100, 30).unwrap();
        let mut direct = Canvas::new(100, 30).unwrap();
        render_string(&mut with_gap, "1#1", 0, 0, &style);
        render_char(&mut direct, '1', 0, 0, 10, 20, 2, Color::Ink);
        render_char(&mut direct, '1', 28, 0, 10, 20, 2, Color::Ink);
        assert_eq!(with_gap.buffer(), direct.buffer());
    }

    #[test]
    fn test_render_char_scales_into_cell() {
        let mut canvas = Canvas::new(64, 64).unwrap();
        render_char(&mut canvas, '-', 10, 10, 40, 40, 1, Color::Ink);
        // Minus runs from x=15 to x=85 at y=50 in glyph space
        assert_eq!(canvas.get_pixel(16, 30), Color::Ink);
        assert_eq!(canvas.get_pixel(44, 30), Color::Ink);
        assert_eq!(ink_columns(&canvas), Some((16, 44)));
    }

    #[test]
    fn test_right_alignment_ends_at_anchor() {
        let style = TextStyle::new(10, 16).with_stroke_width(1);
        let mut canvas = Canvas::new(100, 20).unwrap();
        render_string_right(&mut canvas, "1-1", 80, 0, &style);
        let (_, hi) = ink_columns(&canvas).unwrap();
        assert!(hi <= 80);
        assert!(hi >= 75);
    }

    #[test]
    fn test_multiline_stacks_lines() {
        let style = TextStyle::new(10, 16).with_stroke_width(1);
        let mut canvas = Canvas::new(60, 60).unwrap();
        render_multiline(&mut canvas, &["-", "-"], 30, 0, 4, TextAlign::Center, &style);
        // Minus sits at 50% of the cell height
        assert!(canvas.get_pixel(30, 8).is_ink());
        assert!(canvas.get_pixel(30, 8 + 16 + 4).is_ink());
        assert!(!canvas.get_pixel(30, 18).is_ink());
    }

    #[test]
    fn test_halo_surrounds_text() {
        let style = TextStyle::new(12, 16)
            .with_spacing(2)
            .with_stroke_width(1)
            .with_color(Color::Paper);
        let mut canvas = Canvas::new(60, 30).unwrap();
        render_string_centered_with_halo(&mut canvas, "-", 30, 5, &style, 1, Color::Ink);
        // Paper text over a 3 px ink outline
        let row = 5 + 8;
        assert_eq!(canvas.get_pixel(30, row), Color::Paper);
        assert_eq!(canvas.get_pixel(30, row - 1), Color::Ink);
        assert_eq!(canvas.get_pixel(30, row + 1), Color::Ink);
        assert_eq!(canvas.get_pixel(30, row + 2), Color::Paper);
    }

    proptest! {
        #[test]
        fn prop_string_width_sums_cells(text in "[0-9A-Za-z:./ -]{0,12}", base in 4i32..40, spacing in 0i32..8) {
            let cells: i32 = text.chars().map(|c| char_width(c, base)).sum();
            let gaps = text.chars().count().saturating_sub(1) as i32 * spacing;
            prop_assert_eq!(string_width(&text, base, spacing), cells + gaps);
        }

        #[test]
        fn prop_centered_layout_is_symmetric(text in "[0-9A-Za-z:./ -]{1,12}", center in -50i32..500, base in 4i32..40) {
            let style = TextStyle::new(base, base * 2);
            let width = string_width(&text, style.char_width, style.spacing);
            let left = layout_origin(&text, center, TextAlign::Center, &style);
            let right = left + width;
            prop_assert!(((left + right) - 2 * center).abs() <= 1);
        }
    }
}
