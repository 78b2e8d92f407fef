//! Time-parametrised animation helpers
//!
//! Everything here is a pure function of its arguments, so a frame rendered
//! at time `t` is identical no matter how many frames came before it. Time is
//! in seconds.

use alloc::vec::Vec;
use core::f32::consts::PI;

use crate::error::{try_vec, RenderError};
use crate::geometry::{Point, PointF};

const TAU: f32 = 2.0 * PI;

/// Default breathing range and period
pub const DEFAULT_BREATH_MIN: f32 = 0.95;
pub const DEFAULT_BREATH_MAX: f32 = 1.05;
pub const DEFAULT_BREATH_PERIOD: f32 = 3.0;
pub const DEFAULT_BREATH_AMPLITUDE: f32 = 2.0;

/// Easing curve signature
pub type Easing = fn(f32) -> f32;

/// Linear interpolation, exact at both ends
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

pub fn clamp01(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

// Every easing clamps `t` to [0, 1] first, so overshooting inputs hold at
// the nearest end.

/// Smoothstep, `t² (3 - 2t)`
pub fn ease_in_out(t: f32) -> f32 {
    let t = clamp01(t);
    t * t * (3.0 - 2.0 * t)
}

pub fn ease_in_out_sine(t: f32) -> f32 {
    let t = clamp01(t);
    (1.0 - libm::cosf(PI * t)) / 2.0
}

pub fn ease_in(t: f32) -> f32 {
    let t = clamp01(t);
    t * t
}

pub fn ease_out(t: f32) -> f32 {
    let t = clamp01(t);
    t * (2.0 - t)
}

/// Bouncing ease-out, four parabolic arcs of shrinking height
pub fn ease_out_bounce(t: f32) -> f32 {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;

    let t = clamp01(t);
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

/// Position within the current cycle, in `[0, 1)`
///
/// `None` for a non-positive period.
fn cycle_phase(t: f32, period: f32, offset: f32) -> Option<f32> {
    if period <= 0.0 {
        return None;
    }
    let phase = libm::fmodf(t / period + offset, 1.0);
    Some(if phase < 0.0 { phase + 1.0 } else { phase })
}

/// Sinusoidal scale oscillating between `min_scale` and `max_scale`
///
/// Starts at the midpoint and rises first. A non-positive period holds at
/// `min_scale`.
pub fn breathing_scale(t: f32, min_scale: f32, max_scale: f32, period: f32) -> f32 {
    breathing_scale_with_phase(t, min_scale, max_scale, period, 0.0)
}

/// [`breathing_scale`] shifted by `phase` cycles
///
/// Offsetting several shapes by fractions of a cycle keeps them from pulsing
/// in lockstep.
pub fn breathing_scale_with_phase(t: f32, min_scale: f32, max_scale: f32, period: f32, phase: f32) -> f32 {
    match cycle_phase(t, period, phase) {
        Some(phase) => {
            let wave = (libm::sinf(TAU * phase) + 1.0) / 2.0;
            min_scale + wave * (max_scale - min_scale)
        }
        None => min_scale,
    }
}

/// Sinusoidal offset in `[-amplitude, amplitude]`, zero for a non-positive period
pub fn breathing_offset(t: f32, amplitude: f32, period: f32) -> f32 {
    match cycle_phase(t, period, 0.0) {
        Some(phase) => amplitude * libm::sinf(TAU * phase),
        None => 0.0,
    }
}

/// 32-bit integer finalizer with good avalanche
pub const fn hash32(mut x: u32) -> u32 {
    x ^= x >> 16;
    x = x.wrapping_mul(0x85eb_ca6b);
    x ^= x >> 13;
    x = x.wrapping_mul(0xc2b2_ae35);
    x ^= x >> 16;
    x
}

/// Displacement of vertex `index` at time `t`
fn wiggle_offset(index: usize, amplitude: f32, frequency: f32, t: f32, seed: u32) -> PointF {
    let seed = seed as f32;
    let i = index as f32;
    let phase_x = seed * 1.618 + i * 2.399;
    let phase_y = seed * 2.718 + i * 3.141;
    let angle = t * frequency * TAU;
    PointF::new(
        amplitude * libm::sinf(angle + phase_x),
        amplitude * libm::cosf(angle + phase_y),
    )
}

/// Deterministic per-vertex wobble
///
/// Each vertex traces its own ellipse-like path of radius `amplitude`; the
/// same `(t, seed)` always gives the same shape.
pub fn wiggle_points(
    points: &[PointF],
    amplitude: f32,
    frequency: f32,
    t: f32,
    seed: u32,
) -> Result<Vec<PointF>, RenderError> {
    let mut out = try_vec(points.len())?;
    out.extend(
        points
            .iter()
            .enumerate()
            .map(|(i, &p)| p + wiggle_offset(i, amplitude, frequency, t, seed)),
    );
    Ok(out)
}

/// [`wiggle_points`] on integer vertices, rounded to the nearest pixel
pub fn wiggle_points_int(
    points: &[Point],
    amplitude: f32,
    frequency: f32,
    t: f32,
    seed: u32,
) -> Result<Vec<Point>, RenderError> {
    let mut out = try_vec(points.len())?;
    out.extend(points.iter().enumerate().map(|(i, &p)| {
        (PointF::from(p) + wiggle_offset(i, amplitude, frequency, t, seed)).to_point()
    }));
    Ok(out)
}

/// Morph between two shapes with matching vertex counts
///
/// `t` is eased (when an easing is given), then clamped to `[0, 1]`.
pub fn transition_points(
    from: &[PointF],
    to: &[PointF],
    t: f32,
    easing: Option<Easing>,
) -> Result<Vec<PointF>, RenderError> {
    if from.len() != to.len() {
        return Err(RenderError::LengthMismatch {
            left: from.len(),
            right: to.len(),
        });
    }

    let t = clamp01(easing.map_or(t, |ease| ease(t)));
    let mut out = try_vec(from.len())?;
    out.extend(
        from.iter()
            .zip(to)
            .map(|(a, b)| PointF::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))),
    );
    Ok(out)
}

/// Animation clock
///
/// Holds a start time and the latest time it was updated with. Every derived
/// value is a function of the elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationState {
    start: f32,
    current: f32,
}

impl AnimationState {
    pub const fn new(start: f32) -> Self {
        Self { start, current: start }
    }

    pub fn update(&mut self, now: f32) {
        self.current = now;
    }

    pub fn elapsed(&self) -> f32 {
        self.current - self.start
    }

    pub fn current_time(&self) -> f32 {
        self.current
    }

    /// Move the start to `start`
    pub fn reset(&mut self, start: f32) {
        self.start = start;
        self.current = start;
    }

    /// Restart from the latest update
    pub fn restart(&mut self) {
        self.start = self.current;
    }

    /// Linear progress through a `duration`-long transition after `delay`
    pub fn progress(&self, duration: f32, delay: f32) -> f32 {
        let t = self.elapsed() - delay;
        if t <= 0.0 {
            0.0
        } else if t >= duration {
            1.0
        } else {
            t / duration
        }
    }

    pub fn is_complete(&self, duration: f32, delay: f32) -> bool {
        self.elapsed() >= duration + delay
    }

    pub fn breathing_scale(&self, min_scale: f32, max_scale: f32, period: f32) -> f32 {
        breathing_scale(self.elapsed(), min_scale, max_scale, period)
    }

    pub fn breathing_offset(&self, amplitude: f32, period: f32) -> f32 {
        breathing_offset(self.elapsed(), amplitude, period)
    }

    pub fn wiggle_points(
        &self,
        points: &[PointF],
        amplitude: f32,
        frequency: f32,
        seed: u32,
    ) -> Result<Vec<PointF>, RenderError> {
        wiggle_points(points, amplitude, frequency, self.elapsed(), seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_lerp_endpoints_exact() {
        assert_eq!(lerp(3.7, -12.25, 0.0), 3.7);
        assert_eq!(lerp(3.7, -12.25, 1.0), -12.25);
        assert!(close(lerp(0.0, 10.0, 0.25), 2.5));
    }

    #[test]
    fn test_easing_endpoints() {
        let curves: [Easing; 6] = [ease_in_out, ease_in_out_sine, ease_in, ease_out, ease_out_bounce, clamp01];
        for ease in curves {
            assert!(close(ease(0.0), 0.0));
            assert!(close(ease(1.0), 1.0));
        }
        assert!(close(ease_in_out(0.5), 0.5));
        assert!(close(ease_in_out_sine(0.5), 0.5));
    }

    #[test]
    fn test_easing_clamps_out_of_range() {
        let curves: [Easing; 5] = [ease_in_out, ease_in_out_sine, ease_in, ease_out, ease_out_bounce];
        for ease in curves {
            assert_eq!(ease(-2.0), ease(0.0));
            assert_eq!(ease(3.0), ease(1.0));
        }

        let a = [PointF::new(0.0, 0.0)];
        let b = [PointF::new(100.0, 0.0)];
        let before = transition_points(&a, &b, -2.0, Some(ease_in_out)).unwrap()[0];
        let after = transition_points(&a, &b, 3.0, Some(ease_out)).unwrap()[0];
        assert_eq!(before.x, 0.0);
        assert_eq!(after.x, 100.0);
    }

    #[test]
    fn test_bounce_breakpoints() {
        assert!(close(ease_out_bounce(1.0 / 2.75), 7.5625 / (2.75 * 2.75)));
        assert!(close(ease_out_bounce(1.5 / 2.75), 0.75));
        assert!(close(ease_out_bounce(2.25 / 2.75), 0.9375));
    }

    #[test]
    fn test_breathing_cycle() {
        assert!(close(breathing_scale(0.0, 0.9, 1.1, 4.0), 1.0));
        assert!(close(breathing_scale(1.0, 0.9, 1.1, 4.0), 1.1));
        assert!(close(breathing_scale(3.0, 0.9, 1.1, 4.0), 0.9));
        assert!(close(breathing_scale(5.0, 0.9, 1.1, 4.0), 1.1));
        assert!(close(breathing_offset(0.75, 2.0, 3.0), 2.0));
    }

    #[test]
    fn test_breathing_phase_offset() {
        let shifted = breathing_scale_with_phase(0.0, 0.9, 1.1, 4.0, 0.25);
        assert!(close(shifted, breathing_scale(1.0, 0.9, 1.1, 4.0)));
    }

    #[test]
    fn test_breathing_zero_period_rests() {
        assert_eq!(breathing_scale(12.0, 0.95, 1.05, 0.0), 0.95);
        assert_eq!(breathing_offset(12.0, 2.0, 0.0), 0.0);
        assert_eq!(breathing_scale(12.0, 0.95, 1.05, -1.0), 0.95);
    }

    #[test]
    fn test_hash32() {
        assert_eq!(hash32(0), 0);
        assert_ne!(hash32(1), hash32(2));
        assert_eq!(hash32(12345), hash32(12345));
    }

    #[test]
    fn test_wiggle_deterministic() {
        let pts = [PointF::new(10.0, 10.0), PointF::new(50.0, 20.0), PointF::new(30.0, 40.0)];
        let a = wiggle_points(&pts, 1.5, 0.5, 2.25, 42).unwrap();
        let b = wiggle_points(&pts, 1.5, 0.5, 2.25, 42).unwrap();
        assert_eq!(a, b);
        for (p, q) in pts.iter().zip(&a) {
            assert!((*q - *p).length() <= 1.5 * core::f32::consts::SQRT_2 + 1e-4);
        }
        let c = wiggle_points(&pts, 1.5, 0.5, 2.25, 43).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_wiggle_zero_amplitude_is_identity() {
        let pts = [Point::new(3, 4), Point::new(-7, 9)];
        assert_eq!(wiggle_points_int(&pts, 0.0, 1.0, 5.0, 7).unwrap(), pts);
    }

    #[test]
    fn test_transition() {
        let a = [PointF::new(0.0, 0.0), PointF::new(10.0, 10.0)];
        let b = [PointF::new(10.0, 0.0), PointF::new(20.0, 30.0)];

        assert_eq!(transition_points(&a, &b, 0.0, None).unwrap(), a);
        assert_eq!(transition_points(&a, &b, 1.0, Some(ease_in_out)).unwrap(), b);
        assert_eq!(transition_points(&a, &b, 7.0, None).unwrap(), b);

        let mid = transition_points(&a, &b, 0.5, None).unwrap();
        assert!(close(mid[1].x, 15.0) && close(mid[1].y, 20.0));

        assert_eq!(
            transition_points(&a, &b[..1], 0.5, None),
            Err(RenderError::LengthMismatch { left: 2, right: 1 })
        );
    }

    #[test]
    fn test_animation_state() {
        let mut anim = AnimationState::new(10.0);
        anim.update(12.0);
        assert_eq!(anim.elapsed(), 2.0);
        assert_eq!(anim.current_time(), 12.0);

        assert_eq!(anim.progress(4.0, 0.0), 0.5);
        assert_eq!(anim.progress(4.0, 3.0), 0.0);
        assert_eq!(anim.progress(1.0, 0.0), 1.0);
        assert!(anim.is_complete(1.5, 0.5));
        assert!(!anim.is_complete(1.5, 0.6));

        anim.restart();
        assert_eq!(anim.elapsed(), 0.0);
        assert!(close(anim.breathing_scale(0.9, 1.1, 3.0), 1.0));

        anim.reset(0.0);
        anim.update(0.75);
        assert!(close(anim.breathing_offset(2.0, 3.0), 2.0));
    }

    proptest! {
        #[test]
        fn prop_breathing_stays_in_range(t in -1000.0f32..1000.0, period in 0.1f32..20.0) {
            let s = breathing_scale(t, 0.95, 1.05, period);
            prop_assert!(s >= 0.95 - 1e-4 && s <= 1.05 + 1e-4);
        }

        #[test]
        fn prop_eased_transition_stays_between(t in -2.0f32..3.0) {
            let a = [PointF::new(0.0, 0.0)];
            let b = [PointF::new(100.0, -50.0)];
            let p = transition_points(&a, &b, t, Some(ease_out_bounce)).unwrap()[0];
            prop_assert!(p.x >= 0.0 && p.x <= 100.0);
            prop_assert!(p.y <= 0.0 && p.y >= -50.0);
        }
    }
}
