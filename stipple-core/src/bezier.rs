//! Cubic Bézier paths and textured strokes
//!
//! A path is a list of points. [`auto_tangent`] gives every point a pair of
//! handles so consecutive points become a chain of smooth cubic segments.
//! Segments are then either flattened into a polyline ([`flatten_path`]) or
//! walked at fine steps and stamped with a brush texture
//! ([`stroke_bezier_texture_ball`]).

use alloc::vec::Vec;

use crate::brush::{BrushBitmap, BrushId};
use crate::canvas::Surface;
use crate::error::{try_push, try_vec, RenderError};
use crate::geometry::{Color, Point, PointF, EPSILON};
use crate::raster::draw_polyline;

/// Evaluation steps per segment when walking a stroke
pub const STEPS_PER_SEGMENT: u32 = 50;

/// Recursion limit for adaptive subdivision
///
/// A segment still not flat at this depth is emitted as a straight chord.
/// Subdivision therefore produces at most `2^16` points per segment.
pub const MAX_SUBDIVISION_DEPTH: u32 = 16;

/// Default handle scale for [`auto_tangent`]
pub const DEFAULT_SMOOTHNESS: f32 = 0.5;

/// Default flatness tolerance in pixels
pub const DEFAULT_TOLERANCE: f32 = 1.0;

/// Default distance between brush stamps in pixels
pub const DEFAULT_SPACING: f32 = 2.0;

/// Weighted form, exact at `t == 0` and `t == 1`
fn lerp_point(a: PointF, b: PointF, t: f32) -> PointF {
    let s = 1.0 - t;
    PointF::new(a.x * s + b.x * t, a.y * s + b.y * t)
}

/// Point on a cubic Bézier at `t`, by De Casteljau
///
/// Exact at the ends: `t == 0` yields `p0` and `t == 1` yields `p3`.
pub fn cubic_bezier(p0: PointF, p1: PointF, p2: PointF, p3: PointF, t: f32) -> PointF {
    let q0 = lerp_point(p0, p1, t);
    let q1 = lerp_point(p1, p2, t);
    let q2 = lerp_point(p2, p3, t);

    let r0 = lerp_point(q0, q1, t);
    let r1 = lerp_point(q1, q2, t);

    lerp_point(r0, r1, t)
}

/// Tangent of a cubic Bézier at `t`
pub fn cubic_bezier_derivative(p0: PointF, p1: PointF, p2: PointF, p3: PointF, t: f32) -> PointF {
    let d0 = (p1 - p0) * 3.0;
    let d1 = (p2 - p1) * 3.0;
    let d2 = (p3 - p2) * 3.0;

    let q0 = lerp_point(d0, d1, t);
    let q1 = lerp_point(d1, d2, t);

    lerp_point(q0, q1, t)
}

/// Control handles of one path point
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TangentHandles {
    /// Control point of the segment arriving at this point
    pub incoming: PointF,
    /// Control point of the segment leaving this point
    pub outgoing: PointF,
}

/// Smooth handles for every point of a path
///
/// Each tangent is parallel to `next - prev`, and each handle is
/// `smoothness * 0.5` times the distance to that neighbour. Path ends use
/// themselves as the missing neighbour. Where the tangent degenerates, both
/// handles collapse onto the point.
pub fn auto_tangent(points: &[PointF], smoothness: f32) -> Result<Vec<TangentHandles>, RenderError> {
    let mut handles = try_vec(points.len())?;
    let last = points.len().saturating_sub(1);

    for (i, &curr) in points.iter().enumerate() {
        let prev = points[i.saturating_sub(1)];
        let next = points[(i + 1).min(last)];

        let tangent = next - prev;
        let len = tangent.length();
        if len < EPSILON {
            handles.push(TangentHandles {
                incoming: curr,
                outgoing: curr,
            });
            continue;
        }

        let tangent = tangent * (1.0 / len);
        let in_len = (curr - prev).length() * smoothness * 0.5;
        let out_len = (next - curr).length() * smoothness * 0.5;

        handles.push(TangentHandles {
            incoming: curr - tangent * in_len,
            outgoing: curr + tangent * out_len,
        });
    }

    Ok(handles)
}

/// Largest distance of the control points from the chord
fn flatness(p0: PointF, c0: PointF, c1: PointF, p1: PointF) -> f32 {
    let chord = p1 - p0;
    let len = chord.length();

    if len < EPSILON {
        return (c0 - p0).length().max((c1 - p0).length());
    }

    let dist = |c: PointF| libm::fabsf((c.x - p0.x) * chord.y - (c.y - p0.y) * chord.x) / len;
    dist(c0).max(dist(c1))
}

/// Flatten one segment into `out`
///
/// Appends the segment's end point whenever the remaining piece is within
/// `tolerance` of its chord; the start point is the caller's. Recursion stops
/// at [`MAX_SUBDIVISION_DEPTH`].
pub fn subdivide_bezier(
    p0: PointF,
    c0: PointF,
    c1: PointF,
    p1: PointF,
    tolerance: f32,
    out: &mut Vec<Point>,
) -> Result<(), RenderError> {
    subdivide(p0, c0, c1, p1, tolerance, 0, out)
}

fn subdivide(
    p0: PointF,
    c0: PointF,
    c1: PointF,
    p1: PointF,
    tolerance: f32,
    depth: u32,
    out: &mut Vec<Point>,
) -> Result<(), RenderError> {
    if flatness(p0, c0, c1, p1) <= tolerance {
        return try_push(out, p1.to_point());
    }
    if depth >= MAX_SUBDIVISION_DEPTH {
        debug!("Subdivision depth cap reached");
        return try_push(out, p1.to_point());
    }

    let q0 = lerp_point(p0, c0, 0.5);
    let q1 = lerp_point(c0, c1, 0.5);
    let q2 = lerp_point(c1, p1, 0.5);
    let r0 = lerp_point(q0, q1, 0.5);
    let r1 = lerp_point(q1, q2, 0.5);
    let mid = lerp_point(r0, r1, 0.5);

    subdivide(p0, q0, r0, mid, tolerance, depth + 1, out)?;
    subdivide(mid, r1, q2, p1, tolerance, depth + 1, out)
}

/// Integer polyline through a smoothed path
///
/// Starts at the first point and appends the flattened segments in order.
/// An empty path yields an empty polyline.
pub fn flatten_path(points: &[PointF], smoothness: f32, tolerance: f32) -> Result<Vec<Point>, RenderError> {
    let mut polyline = try_vec(points.len())?;
    let Some(first) = points.first() else {
        return Ok(polyline);
    };
    polyline.push(first.to_point());

    let handles = auto_tangent(points, smoothness)?;
    for (i, pair) in points.windows(2).enumerate() {
        subdivide_bezier(
            pair[0],
            handles[i].outgoing,
            handles[i + 1].incoming,
            pair[1],
            tolerance,
            &mut polyline,
        )?;
    }

    Ok(polyline)
}

/// Draw a smoothed path with 1-pixel lines
///
/// A single point draws one pixel; an empty path draws nothing.
pub fn draw_bezier_curve<S: Surface + ?Sized>(
    surface: &mut S,
    points: &[PointF],
    smoothness: f32,
    tolerance: f32,
    color: Color,
) -> Result<(), RenderError> {
    if let [only] = points {
        surface.set_pixel_at(only.to_point(), color);
        return Ok(());
    }

    let polyline = flatten_path(points, smoothness, tolerance)?;
    draw_polyline(surface, &polyline, color);
    Ok(())
}

/// Stamp a texture centred on `(cx, cy)`, rotated by `angle` radians
///
/// Each ink texel is rotated about the texture centre and rounded to the
/// nearest pixel. Only ink is written.
pub fn stamp_texture<S: Surface + ?Sized>(surface: &mut S, texture: &BrushBitmap<'_>, cx: f32, cy: f32, angle: f32) {
    let cos_a = libm::cosf(angle);
    let sin_a = libm::sinf(angle);
    let half_w = texture.width() as f32 / 2.0;
    let half_h = texture.height() as f32 / 2.0;

    for (tx, ty) in texture.ink_texels() {
        let dx = tx as f32 - half_w + 0.5;
        let dy = ty as f32 - half_h + 0.5;

        let rx = dx * cos_a - dy * sin_a;
        let ry = dx * sin_a + dy * cos_a;

        let px = libm::roundf(cx + rx) as i32;
        let py = libm::roundf(cy + ry) as i32;
        surface.set_pixel(px, py, Color::Ink);
    }
}

/// Walk a smoothed path and report every stamp position and heading
///
/// The first stamp lands on the path start. After that a stamp is placed each
/// time the accumulated arc length reaches the next multiple of `spacing`.
/// Arc length is measured over [`STEPS_PER_SEGMENT`] steps per segment.
pub(crate) fn walk_stamps(
    points: &[PointF],
    smoothness: f32,
    spacing: f32,
    mut stamp: impl FnMut(PointF, f32),
) -> Result<(), RenderError> {
    if points.len() < 2 {
        return Ok(());
    }

    let handles = auto_tangent(points, smoothness)?;

    let mut travelled = 0.0f32;
    let mut next_stamp_at = 0.0f32;
    let mut first = true;

    for (i, pair) in points.windows(2).enumerate() {
        let (p0, p1) = (pair[0], pair[1]);
        let c0 = handles[i].outgoing;
        let c1 = handles[i + 1].incoming;

        let mut prev = p0;
        for step in 0..=STEPS_PER_SEGMENT {
            let t = step as f32 / STEPS_PER_SEGMENT as f32;
            let pt = cubic_bezier(p0, c0, c1, p1, t);

            travelled += (pt - prev).length();
            prev = pt;

            if first || travelled >= next_stamp_at {
                let tangent = cubic_bezier_derivative(p0, c0, c1, p1, t);
                stamp(pt, libm::atan2f(tangent.y, tangent.x));

                if first {
                    next_stamp_at = spacing;
                    first = false;
                } else {
                    next_stamp_at += spacing;
                }
            }
        }
    }

    Ok(())
}

/// Textured stroke along a smoothed path, rotating the texture live
///
/// Fewer than two points draws nothing.
pub fn stroke_bezier_texture_ball<S: Surface + ?Sized>(
    surface: &mut S,
    points: &[PointF],
    smoothness: f32,
    spacing: f32,
    texture: &BrushBitmap<'_>,
) -> Result<(), RenderError> {
    walk_stamps(points, smoothness, spacing, |at, angle| {
        stamp_texture(surface, texture, at.x, at.y, angle);
    })
}

/// [`stroke_bezier_texture_ball`] with one of the built-in brushes
pub fn stroke_bezier_brush<S: Surface + ?Sized>(
    surface: &mut S,
    points: &[PointF],
    brush: BrushId,
    smoothness: f32,
    spacing: f32,
) -> Result<(), RenderError> {
    stroke_bezier_texture_ball(surface, points, smoothness, spacing, &brush.bitmap())
}
