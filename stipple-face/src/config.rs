//! Face configuration
//!
//! Layout and tuning for the Observatory face. `Default` is the reference
//! 400x300 layout; any field left out of a TOML file keeps its default.
//!
//! Loading tries TOML text first, then a postcard blob, then falls back to
//! the defaults. Whatever is loaded is validated before use.

#[cfg(feature = "serde")]
use alloc::vec::Vec;
use core::fmt;

use stipple_core::dirty::DEFAULT_MIN_GAP;
use stipple_core::{BrushId, Pattern, PointF};
#[cfg(feature = "serde")]
use stipple_core::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current binary config layout version
pub const CONFIG_VERSION: u8 = 1;

/// Number of satellite hexagons
pub const SATELLITE_COUNT: usize = 3;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// TOML text could not be parsed
    TomlParse,
    /// TOML bytes are not valid UTF-8
    InvalidUtf8,
    /// Binary config could not be decoded
    Deserialize,
    /// Config could not be encoded
    Serialize,
    /// Binary config was written by a different layout version
    VersionMismatch,
    /// A field is out of range
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TomlParse => write!(f, "TOML parse error"),
            ConfigError::InvalidUtf8 => write!(f, "config is not valid UTF-8"),
            ConfigError::Deserialize => write!(f, "failed to decode binary config"),
            ConfigError::Serialize => write!(f, "failed to encode config"),
            ConfigError::VersionMismatch => write!(f, "config version mismatch"),
            ConfigError::Invalid(field) => write!(f, "invalid config value: {}", field),
        }
    }
}

/// Main hexagon holding the time
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MainHexConfig {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
    /// Radius noise as a fraction of `radius`
    pub lumpiness: f32,
    /// Vertex wobble in pixels
    pub wiggle_amplitude: f32,
    /// Vertex wobble in cycles per second
    pub wiggle_frequency: f32,
    pub brush: BrushId,
    pub smoothness: f32,
    pub spacing: f32,
}

impl Default for MainHexConfig {
    fn default() -> Self {
        Self {
            center_x: 200.0,
            center_y: 120.0,
            radius: 110.0,
            lumpiness: 0.05,
            wiggle_amplitude: 1.0,
            wiggle_frequency: 0.5,
            brush: BrushId::Heavy,
            smoothness: 0.4,
            spacing: 2.5,
        }
    }
}

impl MainHexConfig {
    pub fn center(&self) -> PointF {
        PointF::new(self.center_x, self.center_y)
    }
}

/// Row of three small data hexagons
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SatelliteConfig {
    pub radius: f32,
    pub lumpiness: f32,
    /// Resting centre row
    pub row_y: f32,
    /// Resting centre columns
    pub x: [f32; SATELLITE_COUNT],
    pub breath_min: f32,
    pub breath_max: f32,
    /// Seconds per breath
    pub breath_period: f32,
    /// Breathing offsets in cycles
    pub breath_phase: [f32; SATELLITE_COUNT],
    /// Maximum drift from the resting centre
    pub drift_radius: f32,
    /// Seconds per drift cycle, per axis
    pub drift_period_x: [f32; SATELLITE_COUNT],
    pub drift_period_y: [f32; SATELLITE_COUNT],
    /// Drift offsets in seconds, per axis
    pub drift_phase_x: [f32; SATELLITE_COUNT],
    pub drift_phase_y: [f32; SATELLITE_COUNT],
    pub brush: BrushId,
    pub smoothness: f32,
    pub spacing: f32,
}

impl Default for SatelliteConfig {
    fn default() -> Self {
        Self {
            radius: 38.0,
            lumpiness: 0.08,
            row_y: 255.0,
            x: [70.0, 200.0, 330.0],
            breath_min: 0.97,
            breath_max: 1.03,
            breath_period: 3.33,
            breath_phase: [0.0, 0.382, 0.618],
            drift_radius: 15.0,
            drift_period_x: [23.0, 31.0, 19.0],
            drift_period_y: [29.0, 17.0, 37.0],
            drift_phase_x: [0.0, 2.1, 4.2],
            drift_phase_y: [1.5, 3.7, 0.8],
            brush: BrushId::Fine,
            smoothness: 0.4,
            spacing: 2.0,
        }
    }
}

/// Text sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TextConfig {
    /// Top of the time text
    pub time_y: i32,
    pub time_width: i32,
    pub time_height: i32,
    pub time_spacing: i32,
    pub time_stroke: i32,
    pub label_width: i32,
    pub label_height: i32,
    pub label_spacing: i32,
    pub label_stroke: i32,
    /// Extra outline around labels, per side
    pub label_halo: i32,
    /// Distance of each date line from the satellite centre
    pub date_line_offset: i32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            time_y: 85,
            time_width: 38,
            time_height: 58,
            time_spacing: 5,
            time_stroke: 3,
            label_width: 12,
            label_height: 16,
            label_spacing: 2,
            label_stroke: 1,
            label_halo: 2,
            date_line_offset: 10,
        }
    }
}

/// Complete face configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FaceConfig {
    /// Layout version, checked when loading binary configs
    pub version: u8,
    pub width: i32,
    pub height: i32,
    /// Shape seed; the same seed always gives the same shapes
    pub seed: u32,
    pub background: Pattern,
    /// Clean rows bridged when merging dirty regions
    pub min_gap: usize,
    /// Full refresh after this many partial ones, 0 = never
    pub full_refresh_interval: u32,
    pub main: MainHexConfig,
    pub satellites: SatelliteConfig,
    pub text: TextConfig,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            width: 400,
            height: 300,
            seed: 42,
            background: Pattern::DenseCrosshatch,
            min_gap: DEFAULT_MIN_GAP,
            full_refresh_interval: 60,
            main: MainHexConfig::default(),
            satellites: SatelliteConfig::default(),
            text: TextConfig::default(),
        }
    }
}

impl FaceConfig {
    /// Check that every field is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::Invalid("display size"));
        }
        if self.main.radius <= 0.0 || self.satellites.radius <= 0.0 {
            return Err(ConfigError::Invalid("hexagon radius"));
        }
        if !(0.0..1.0).contains(&self.main.lumpiness) || !(0.0..1.0).contains(&self.satellites.lumpiness) {
            return Err(ConfigError::Invalid("lumpiness"));
        }
        if self.main.spacing <= 0.0 || self.satellites.spacing <= 0.0 {
            return Err(ConfigError::Invalid("stroke spacing"));
        }
        let sat = &self.satellites;
        if sat.breath_min > sat.breath_max || sat.breath_min <= 0.0 {
            return Err(ConfigError::Invalid("breathing range"));
        }
        if sat.breath_period < 0.0 {
            return Err(ConfigError::Invalid("breathing period"));
        }
        if sat.drift_period_x.iter().chain(&sat.drift_period_y).any(|&p| p <= 0.0) {
            return Err(ConfigError::Invalid("drift period"));
        }
        let text = &self.text;
        if [text.time_width, text.time_height, text.label_width, text.label_height]
            .iter()
            .any(|&size| size <= 0)
        {
            return Err(ConfigError::Invalid("text size"));
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl FaceConfig {
    /// Parse and validate a TOML config
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: FaceConfig = toml::from_str(text).map_err(|_| ConfigError::TomlParse)?;
        config.validate()?;
        Ok(config)
    }

    /// Decode and validate a postcard config
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: FaceConfig = postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;
        if config.version != CONFIG_VERSION {
            warn!(
                "Config version mismatch: found {}, expected {}",
                config.version, CONFIG_VERSION
            );
            return Err(ConfigError::VersionMismatch);
        }
        config.validate()?;
        Ok(config)
    }

    /// Encode for storage
    pub fn to_postcard(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(|_| ConfigError::Serialize)
    }
}

/// Load the face configuration
///
/// Tries the TOML text first, then the binary blob. Anything missing or
/// invalid falls through to the next source, ending at the defaults.
#[cfg(feature = "serde")]
pub fn load_config(toml_bytes: Option<&[u8]>, binary: Option<&[u8]>) -> FaceConfig {
    info!("Loading face configuration...");

    match toml_bytes.map(load_toml) {
        Some(Ok(config)) => {
            info!("Loaded configuration from TOML");
            log_config_summary(&config);
            return config;
        }
        Some(Err(e)) => warn!("Failed to load TOML config: {}, trying binary", e),
        None => debug!("No TOML config found, trying binary format"),
    }

    match binary.map(FaceConfig::from_postcard) {
        Some(Ok(config)) => {
            info!("Loaded configuration from binary");
            log_config_summary(&config);
            return config;
        }
        Some(Err(e)) => warn!("Failed to load binary config: {}, using defaults", e),
        None => debug!("No binary config found, using defaults"),
    }

    FaceConfig::default()
}

#[cfg(feature = "serde")]
fn load_toml(bytes: &[u8]) -> Result<FaceConfig, ConfigError> {
    debug!("Parsing {} bytes of TOML", bytes.len());
    let text = core::str::from_utf8(bytes).map_err(|_| ConfigError::InvalidUtf8)?;
    FaceConfig::from_toml(text)
}

#[cfg(feature = "serde")]
fn log_config_summary(config: &FaceConfig) {
    debug!("  display {}x{}", config.width, config.height);
    debug!("  seed {}", config.seed);
    debug!("  dirty merge gap {} rows", config.min_gap);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = FaceConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!((config.width, config.height), (400, 300));
        assert_eq!(config.main.center(), PointF::new(200.0, 120.0));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = FaceConfig::default();
        config.satellites.drift_period_y[2] = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::Invalid("drift period")));

        let mut config = FaceConfig::default();
        config.satellites.breath_min = 1.2;
        assert_eq!(config.validate(), Err(ConfigError::Invalid("breathing range")));

        let mut config = FaceConfig::default();
        config.height = 0;
        assert_eq!(config.validate(), Err(ConfigError::Invalid("display size")));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_toml_keeps_defaults() {
        let text = r#"
            seed = 7
            background = "Medium"

            [main]
            radius = 90.0
            brush = "Blobby"
        "#;
        let config = FaceConfig::from_toml(text).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.background, Pattern::Medium);
        assert_eq!(config.main.radius, 90.0);
        assert_eq!(config.main.brush, BrushId::Blobby);
        assert_eq!(config.main.center_x, 200.0);
        assert_eq!(config.satellites, SatelliteConfig::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_toml_errors() {
        assert_eq!(FaceConfig::from_toml("seed = "), Err(ConfigError::TomlParse));
        assert_eq!(
            FaceConfig::from_toml("[main]\nradius = -3.0"),
            Err(ConfigError::Invalid("hexagon radius"))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_postcard_persistence() {
        let mut config = FaceConfig::default();
        config.seed = 99;
        config.satellites.brush = BrushId::Scratchy;
        let bytes = config.to_postcard().unwrap();
        assert_eq!(FaceConfig::from_postcard(&bytes), Ok(config));
        assert_eq!(FaceConfig::from_postcard(&bytes[..3]), Err(ConfigError::Deserialize));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_postcard_version_checked() {
        let config = FaceConfig {
            version: CONFIG_VERSION + 1,
            ..Default::default()
        };
        let bytes = config.to_postcard().unwrap();
        assert_eq!(FaceConfig::from_postcard(&bytes), Err(ConfigError::VersionMismatch));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_load_config_fallbacks() {
        let binary = FaceConfig {
            seed: 5,
            ..Default::default()
        }
        .to_postcard()
        .unwrap();

        let binary = Some(binary.as_slice());

        assert_eq!(load_config(Some(b"seed = 3".as_slice()), binary).seed, 3);
        assert_eq!(load_config(Some(b"seed = oops".as_slice()), binary).seed, 5);
        assert_eq!(load_config(Some([0xFF, 0xFE].as_slice()), binary).seed, 5);
        assert_eq!(load_config(None, binary).seed, 5);
        assert_eq!(load_config(None, Some([1, 2].as_slice())), FaceConfig::default());
        assert_eq!(load_config(None, None), FaceConfig::default());
    }
}
