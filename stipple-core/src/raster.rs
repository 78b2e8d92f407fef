//! Primitive rasterizer
//!
//! Integer algorithms only: Bresenham lines, midpoint circles and scanline
//! polygons. Geometry is clipped by the surface, so callers may pass shapes
//! that straddle or miss the canvas entirely.
//!
//! Filled shapes are produced as horizontal spans. The span generators are
//! shared with [`crate::pattern`], which walks the same geometry and applies a
//! dither test instead of a solid colour.

use alloc::vec::Vec;

use crate::canvas::Surface;
use crate::geometry::{Color, Point, PointF, Rect, EPSILON};

/// Draw a 1-pixel line with Bresenham's algorithm
///
/// Endpoints are put in a canonical order first, so `a -> b` and `b -> a`
/// produce the same pixels.
pub fn draw_line<S: Surface + ?Sized>(
    surface: &mut S,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Color,
) {
    let (x0, y0, x1, y1) = if (y0, x0) <= (y1, x1) {
        (x0, y0, x1, y1)
    } else {
        (x1, y1, x0, y0)
    };

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    let mut x = x0;
    let mut y = y0;
    loop {
        surface.set_pixel(x, y, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

/// [`draw_line`] between two points
pub fn draw_line_points<S: Surface + ?Sized>(surface: &mut S, a: Point, b: Point, color: Color) {
    draw_line(surface, a.x, a.y, b.x, b.y, color);
}

/// Draw a line `width` pixels thick
///
/// The Bresenham line is repeated at 1-pixel offsets along the segment's unit
/// perpendicular, centred on the original line. A zero-length segment becomes
/// a filled disc of radius `width / 2`.
pub fn draw_thick_line<S: Surface + ?Sized>(
    surface: &mut S,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    width: i32,
    color: Color,
) {
    if width <= 1 {
        draw_line(surface, x0, y0, x1, y1, color);
        return;
    }

    let dir = PointF::new((x1 - x0) as f32, (y1 - y0) as f32);
    let len = dir.length();
    if len < EPSILON {
        fill_circle(surface, x0, y0, width / 2, color);
        return;
    }

    let perp = PointF::new(-dir.y / len, dir.x / len);
    let half = (width - 1) as f32 / 2.0;

    for i in 0..width {
        let offset = perp * (i as f32 - half);
        let o = offset.to_point();
        draw_line(surface, x0 + o.x, y0 + o.y, x1 + o.x, y1 + o.y, color);
    }
}

/// [`draw_thick_line`] between two points
pub fn draw_thick_line_points<S: Surface + ?Sized>(
    surface: &mut S,
    a: Point,
    b: Point,
    width: i32,
    color: Color,
) {
    draw_thick_line(surface, a.x, a.y, b.x, b.y, width, color);
}

/// Draw an open polyline. Fewer than two points draws nothing.
pub fn draw_polyline<S: Surface + ?Sized>(surface: &mut S, points: &[Point], color: Color) {
    for pair in points.windows(2) {
        draw_line_points(surface, pair[0], pair[1], color);
    }
}

/// Draw a closed polygon outline. Fewer than two points draws nothing.
pub fn draw_polygon<S: Surface + ?Sized>(surface: &mut S, points: &[Point], color: Color) {
    if points.len() < 2 {
        return;
    }
    draw_polyline(surface, points, color);
    draw_line_points(surface, points[points.len() - 1], points[0], color);
}

/// Fill a polygon with the even-odd rule. Fewer than three points draws nothing.
pub fn fill_polygon<S: Surface + ?Sized>(surface: &mut S, points: &[Point], color: Color) {
    let height = surface.height();
    polygon_spans(points, height, |y, x_start, x_end| {
        surface.fill_span(y, x_start, x_end, color);
    });
}

/// Draw a 1-pixel rectangle outline
pub fn draw_rect<S: Surface + ?Sized>(surface: &mut S, rect: Rect, color: Color) {
    if rect.w <= 0 || rect.h <= 0 {
        return;
    }
    let right = rect.right() - 1;
    let bottom = rect.bottom() - 1;

    surface.fill_span(rect.top(), rect.left(), rect.right(), color);
    surface.fill_span(bottom, rect.left(), rect.right(), color);
    for y in rect.top()..=bottom {
        surface.set_pixel(rect.left(), y, color);
        surface.set_pixel(right, y, color);
    }
}

/// Fill a rectangle, one span per row
pub fn fill_rect<S: Surface + ?Sized>(surface: &mut S, rect: Rect, color: Color) {
    let y0 = rect.top().max(0);
    let y1 = rect.bottom().min(surface.height());
    for y in y0..y1 {
        surface.fill_span(y, rect.left(), rect.right(), color);
    }
}

/// Draw a circle outline with the midpoint algorithm. `r <= 0` draws nothing.
pub fn draw_circle<S: Surface + ?Sized>(surface: &mut S, cx: i32, cy: i32, r: i32, color: Color) {
    midpoint_circle(r, |x, y| {
        surface.set_pixel(cx + x, cy + y, color);
        surface.set_pixel(cx - x, cy + y, color);
        surface.set_pixel(cx + x, cy - y, color);
        surface.set_pixel(cx - x, cy - y, color);
        surface.set_pixel(cx + y, cy + x, color);
        surface.set_pixel(cx - y, cy + x, color);
        surface.set_pixel(cx + y, cy - x, color);
        surface.set_pixel(cx - y, cy - x, color);
    });
}

/// [`draw_circle`] around a centre point
pub fn draw_circle_point<S: Surface + ?Sized>(surface: &mut S, center: Point, r: i32, color: Color) {
    draw_circle(surface, center.x, center.y, r, color);
}

/// Fill a disc, four spans per midpoint step. `r <= 0` draws nothing.
pub fn fill_circle<S: Surface + ?Sized>(surface: &mut S, cx: i32, cy: i32, r: i32, color: Color) {
    circle_spans(cx, cy, r, |y, x_start, x_end| {
        surface.fill_span(y, x_start, x_end, color);
    });
}

/// [`fill_circle`] around a centre point
pub fn fill_circle_point<S: Surface + ?Sized>(surface: &mut S, center: Point, r: i32, color: Color) {
    fill_circle(surface, center.x, center.y, r, color);
}

/// Walk one octant of a midpoint circle, yielding `(x, y)` with `x <= y`
fn midpoint_circle(r: i32, mut plot: impl FnMut(i32, i32)) {
    if r <= 0 {
        return;
    }

    let mut x = 0;
    let mut y = r;
    let mut d = 1 - r;

    while x <= y {
        plot(x, y);
        if d <= 0 {
            d += 2 * x + 3;
        } else {
            d += 2 * (x - y) + 5;
            y -= 1;
        }
        x += 1;
    }
}

/// Spans covering a filled disc as `(y, x_start, x_end_exclusive)`
///
/// Rows may be yielded more than once; every yield for a row is a subset of the
/// widest one, so repeated fills are idempotent.
pub(crate) fn circle_spans(cx: i32, cy: i32, r: i32, mut span: impl FnMut(i32, i32, i32)) {
    midpoint_circle(r, |x, y| {
        span(cy + y, cx - x, cx + x + 1);
        span(cy - y, cx - x, cx + x + 1);
        span(cy + x, cx - y, cx + y + 1);
        span(cy - x, cx - y, cx + y + 1);
    });
}

/// X coordinate where a non-horizontal edge crosses row `y`, if it does
///
/// Edges are half-open in y: the upper endpoint is included and the lower one
/// excluded, so a vertex shared by two edges is counted once. The intersection
/// truncates toward zero.
pub(crate) fn edge_crossing(a: Point, b: Point, y: i32) -> Option<i32> {
    if a.y == b.y {
        return None;
    }
    let (top, bottom) = if a.y < b.y { (a, b) } else { (b, a) };
    if y < top.y || y >= bottom.y {
        return None;
    }
    let num = i64::from(y - top.y) * i64::from(bottom.x - top.x);
    let x = i64::from(top.x) + num / i64::from(bottom.y - top.y);
    Some(x as i32)
}

/// Even-odd spans of a polygon as `(y, x_start, x_end_exclusive)`
///
/// Rows are limited to `[0, height)`.
pub(crate) fn polygon_spans(points: &[Point], height: i32, mut span: impl FnMut(i32, i32, i32)) {
    if points.len() < 3 {
        return;
    }

    let (min_y, max_y) = points
        .iter()
        .fold((i32::MAX, i32::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
    let min_y = min_y.max(0);
    let max_y = max_y.min(height - 1);
    if min_y > max_y {
        return;
    }

    let mut crossings: Vec<i32> = Vec::new();
    if crossings.try_reserve_exact(points.len()).is_err() {
        warn!("Polygon fill skipped: no memory for {} edges", points.len());
        return;
    }

    for y in min_y..=max_y {
        crossings.clear();
        for (i, &a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            if let Some(x) = edge_crossing(a, b, y) {
                crossings.push(x);
            }
        }
        crossings.sort_unstable();

        for pair in crossings.chunks_exact(2) {
            span(y, pair[0], pair[1]);
        }
    }
}
