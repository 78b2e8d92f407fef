//! Procedural shapes
//!
//! Deterministic noise and the lumpy polygons the clock face is built from.

use alloc::vec::Vec;
use core::f32::consts::{FRAC_PI_2, TAU};

use stipple_core::error::{try_vec, RenderError};
use stipple_core::{Point, PointF};

/// Hash noise in `[-1, 1)`, stable for a given `(index, seed)`
pub fn hash_noise(index: i32, seed: u32) -> f32 {
    let mut h = seed ^ (index as u32).wrapping_mul(374_761_393);
    h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
    h ^= h >> 16;
    (h & 0xFFFF) as f32 / 32768.0 - 1.0
}

/// Regular `count`-gon with per-vertex radius noise
///
/// The first vertex points straight up and the rest follow clockwise on
/// screen. Each radius is scaled by `1 + noise * lumpiness`.
pub fn generate_hex(
    count: usize,
    center: PointF,
    radius: f32,
    lumpiness: f32,
    seed: u32,
) -> Result<Vec<PointF>, RenderError> {
    let mut points = try_vec(count)?;
    points.extend((0..count).map(|i| {
        let angle = TAU * i as f32 / count as f32 - FRAC_PI_2;
        let r = radius * (1.0 + hash_noise(i as i32, seed) * lumpiness);
        PointF::new(center.x + r * libm::cosf(angle), center.y + r * libm::sinf(angle))
    }));
    Ok(points)
}

/// Polygon vertices with the first repeated at the end, ready for stroking
///
/// An empty polygon stays empty.
pub fn polygon_to_bezier_loop(points: &[PointF]) -> Result<Vec<PointF>, RenderError> {
    let Some(&first) = points.first() else {
        return Ok(Vec::new());
    };
    let mut closed = try_vec(points.len() + 1)?;
    closed.extend_from_slice(points);
    closed.push(first);
    Ok(closed)
}

/// Round every vertex to the pixel grid
pub fn to_pixel_points(points: &[PointF]) -> Result<Vec<Point>, RenderError> {
    let mut out = try_vec(points.len())?;
    out.extend(points.iter().map(|p| p.to_point()));
    Ok(out)
}
