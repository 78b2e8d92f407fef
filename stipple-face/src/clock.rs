//! Observatory clock face
//!
//! A crosshatched background with a large wobbling hexagon holding the time
//! and a row of three small drifting hexagons carrying the date, temperature
//! and humidity.

use core::f32::consts::TAU;
use core::fmt::Write;

use heapless::String;

use stipple_core::anim::{breathing_scale_with_phase, wiggle_points};
use stipple_core::brush::stroke_bezier_cached;
use stipple_core::font::{render_string_centered, render_string_centered_with_halo};
use stipple_core::pattern::fill_rect_pattern;
use stipple_core::raster::fill_polygon;
use stipple_core::{BrushCache, Color, PointF, Rect, RenderError, Surface, TextStyle};

use crate::config::{FaceConfig, SATELLITE_COUNT};
use crate::shapes::{generate_hex, polygon_to_bezier_loop, to_pixel_points};

/// Capacity of every formatted label
pub const LABEL_LEN: usize = 8;

/// Fixed-capacity label text
pub type Label = String<LABEL_LEN>;

/// Vertices per hexagon
const HEX_SIDES: usize = 6;

/// Added to the face seed for the main hexagon's wobble
const WIGGLE_SEED_OFFSET: u32 = 100;

/// Added to the face seed for the satellite shapes
const SATELLITE_SEED_OFFSET: u32 = 1000;

const DAY_ABBREVS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// Values shown on the face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockData {
    /// 0-23, shown in 12-hour form
    pub hours: u8,
    pub minutes: u8,
    /// 0 = Sunday
    pub day_of_week: u8,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    /// Degrees Fahrenheit
    pub temp_f: i8,
    /// Percent
    pub humidity: u8,
    /// Percent
    pub battery: u8,
}

/// Per-frame animation inputs
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockAnimState {
    /// Seconds since the face started
    pub elapsed: f32,
    /// Colon blink phase
    pub show_colon: bool,
}

/// 24-hour to 12-hour, 0 and 12 both map to 12
pub const fn to_12_hour(hours: u8) -> u8 {
    match hours % 12 {
        0 => 12,
        h => h,
    }
}

/// Three-letter day name, out-of-range days read as Sunday
pub fn day_abbrev(day_of_week: u8) -> &'static str {
    DAY_ABBREVS.get(day_of_week as usize).copied().unwrap_or(DAY_ABBREVS[0])
}

// Labels are at most 7 characters for any input, so writes cannot overflow.

/// `"10:07"`, with a space for the colon on the blink-off phase
pub fn format_time(hours: u8, minutes: u8, show_colon: bool) -> Label {
    let mut s = Label::new();
    let sep = if show_colon { ':' } else { ' ' };
    let _ = write!(s, "{:2}{}{:02}", to_12_hour(hours), sep, minutes);
    s
}

/// `"3/14"`
pub fn format_date(month: u8, day: u8) -> Label {
    let mut s = Label::new();
    let _ = write!(s, "{}/{}", month, day);
    s
}

/// Bare number; the face draws no unit
pub fn format_temperature(temp_f: i8) -> Label {
    let mut s = Label::new();
    let _ = write!(s, "{}", temp_f);
    s
}

/// `"45%"`
pub fn format_humidity(humidity: u8) -> Label {
    let mut s = Label::new();
    let _ = write!(s, "{}%", humidity);
    s
}

/// Slow sinusoidal drift along one axis
fn drift(elapsed: f32, phase: f32, period: f32, radius: f32) -> f32 {
    if period <= 0.0 {
        return 0.0;
    }
    radius * libm::sinf((elapsed + phase) * TAU / period)
}

/// Resting-plus-drift centre of satellite `i`
pub fn satellite_center(config: &FaceConfig, i: usize, elapsed: f32) -> PointF {
    let sat = &config.satellites;
    PointF::new(
        sat.x[i] + drift(elapsed, sat.drift_phase_x[i], sat.drift_period_x[i], sat.drift_radius),
        sat.row_y + drift(elapsed, sat.drift_phase_y[i], sat.drift_period_y[i], sat.drift_radius),
    )
}

/// Draw the whole face
///
/// Every pixel is redrawn, so the previous frame's content does not matter.
/// The result depends only on the arguments.
pub fn render_observatory_clock<S: Surface + ?Sized>(
    surface: &mut S,
    data: &ClockData,
    anim: &ClockAnimState,
    config: &FaceConfig,
    brushes: &BrushCache,
) -> Result<(), RenderError> {
    let seed = config.seed;

    surface.clear(Color::Paper);
    let bounds = Rect::new(0, 0, surface.width(), surface.height());
    fill_rect_pattern(surface, bounds, config.background);

    // Main hexagon punched out of the background
    let main = &config.main;
    let hex = generate_hex(HEX_SIDES, main.center(), main.radius, main.lumpiness, seed)?;
    let hex = wiggle_points(
        &hex,
        main.wiggle_amplitude,
        main.wiggle_frequency,
        anim.elapsed,
        seed.wrapping_add(WIGGLE_SEED_OFFSET),
    )?;
    fill_polygon(surface, &to_pixel_points(&hex)?, Color::Paper);
    let outline = polygon_to_bezier_loop(&hex)?;
    stroke_bezier_cached(surface, brushes, main.brush, &outline, main.smoothness, main.spacing)?;

    let text = &config.text;
    let time = format_time(data.hours, data.minutes, anim.show_colon);
    let time_style = TextStyle::new(text.time_width, text.time_height)
        .with_spacing(text.time_spacing)
        .with_stroke_width(text.time_stroke);
    render_string_centered(surface, &time, main.center_x as i32, text.time_y, &time_style);

    // Satellites
    let label_style = TextStyle::new(text.label_width, text.label_height)
        .with_spacing(text.label_spacing)
        .with_stroke_width(text.label_stroke)
        .with_color(Color::Paper);
    let day = day_abbrev(data.day_of_week);
    let date = format_date(data.month, data.day);
    let temp = format_temperature(data.temp_f);
    let humidity = format_humidity(data.humidity);

    let sat = &config.satellites;
    for i in 0..SATELLITE_COUNT {
        let center = satellite_center(config, i, anim.elapsed);
        let scale = breathing_scale_with_phase(
            anim.elapsed,
            sat.breath_min,
            sat.breath_max,
            sat.breath_period,
            sat.breath_phase[i],
        );
        let hex = generate_hex(
            HEX_SIDES,
            center,
            sat.radius * scale,
            sat.lumpiness,
            seed.wrapping_add(SATELLITE_SEED_OFFSET).wrapping_add(i as u32),
        )?;
        fill_polygon(surface, &to_pixel_points(&hex)?, Color::Ink);
        let outline = polygon_to_bezier_loop(&hex)?;
        stroke_bezier_cached(surface, brushes, sat.brush, &outline, sat.smoothness, sat.spacing)?;

        let cx = center.x as i32;
        let cy = center.y as i32;
        let label = |surface: &mut S, s: &str, y: i32| {
            render_string_centered_with_halo(surface, s, cx, y, &label_style, text.label_halo, Color::Ink);
        };
        match i {
            0 => {
                label(surface, day, cy - text.date_line_offset);
                label(surface, date.as_str(), cy + text.date_line_offset);
            }
            1 => label(surface, temp.as_str(), cy),
            _ => label(surface, humidity.as_str(), cy),
        }
    }

    Ok(())
}
