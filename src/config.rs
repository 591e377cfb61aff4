use derive_more::{AsRef, Deref, From, Into};
use directories::ProjectDirs;
use palette::{Srgb, Srgba};
use serde::Deserialize;
use serde_with::{DefaultOnError, DeserializeFromStr, serde_as};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::geometry::ArcSpan;

pub const DEFAULT_SWEEP_ANGLE: i32 = 180;
pub const DEFAULT_START_ANGLE: i32 = 180;
pub const DEFAULT_TRACK_WIDTH: f64 = 70.0;
pub const DEFAULT_FILL_WIDTH: f64 = 60.0;
pub const DEFAULT_OFFSET: f64 = 10.0;
pub const DEFAULT_TEXT_SIZE: f64 = 200.0;
pub const DEFAULT_THUMB_SIZE: f64 = 48.0;
pub const DEFAULT_EDGE_TOLERANCE: f64 = 5.0;
pub const DEFAULT_MAX: u32 = 100;

const ENV_PREFIX: &str = "ARCSEEK";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid hex color '{0}'")]
pub struct ColorParseError(String);

/// An opaque sRGB color written as `#rgb` or `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr, Deref, From, Into, AsRef)]
pub struct HexColor(Srgb<u8>);

impl HexColor {
    pub fn black() -> Self {
        Self(Srgb::new(0, 0, 0))
    }

    pub fn to_srgba(self) -> Srgba<f64> {
        let (r, g, b) = self.0.into_format::<f64>().into_components();
        Srgba::new(r, g, b, 1.0)
    }
}

impl FromStr for HexColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Srgb<u8>>()
            .map(Self)
            .map_err(|_| ColorParseError(s.to_string()))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.0.into_components();
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

/// Configuration exactly as read from the sources. A value that fails to
/// deserialize is dropped to `None` instead of failing the whole file.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    #[serde_as(as = "DefaultOnError")]
    pub sweep_angle: Option<i32>,
    #[serde_as(as = "DefaultOnError")]
    pub start_angle: Option<i32>,
    #[serde_as(as = "DefaultOnError")]
    pub track_width: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    pub fill_width: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    pub offset: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    pub base_color: Option<HexColor>,
    #[serde_as(as = "DefaultOnError")]
    pub fill_color: Option<HexColor>,
    #[serde_as(as = "DefaultOnError")]
    pub fill_end_color: Option<HexColor>,
    #[serde_as(as = "DefaultOnError")]
    pub text_color: Option<HexColor>,
    #[serde_as(as = "DefaultOnError")]
    pub text_size: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    pub smooth_thumb: Option<bool>,
    #[serde_as(as = "DefaultOnError")]
    pub thumb_image: Option<PathBuf>,
    #[serde_as(as = "DefaultOnError")]
    pub thumb_size: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    pub edge_tolerance: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    pub max: Option<u32>,
    #[serde_as(as = "DefaultOnError")]
    pub progress: Option<u32>,
    #[serde_as(as = "DefaultOnError")]
    pub continuous_redraw: Option<bool>,
}

/// Construction-time settings of the arc control. Every field has a
/// documented default and the values are never changed after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcConfig {
    /// Always in `(0, 360]`.
    pub sweep_angle: i32,
    /// Always in `[0, 360)`.
    pub start_angle: i32,
    pub track_width: f64,
    pub fill_width: f64,
    pub offset: f64,
    pub base_color: HexColor,
    pub fill_color: HexColor,
    /// Gradient end; the theme accent is used when unset.
    pub fill_end_color: Option<HexColor>,
    pub text_color: HexColor,
    pub text_size: f64,
    pub smooth_thumb: bool,
    /// Built-in thumb when unset.
    pub thumb_image: Option<PathBuf>,
    pub thumb_size: f64,
    pub edge_tolerance: f64,
    pub max: u32,
    pub progress: u32,
    pub continuous_redraw: bool,
}

impl Default for ArcConfig {
    fn default() -> Self {
        Self::from(RawConfig::default())
    }
}

impl From<RawConfig> for ArcConfig {
    fn from(raw: RawConfig) -> Self {
        let max = raw.max.unwrap_or(DEFAULT_MAX);

        Self {
            sweep_angle: normalize_sweep(raw.sweep_angle),
            start_angle: raw.start_angle.unwrap_or(DEFAULT_START_ANGLE).rem_euclid(360),
            track_width: non_negative_or(raw.track_width, DEFAULT_TRACK_WIDTH),
            fill_width: non_negative_or(raw.fill_width, DEFAULT_FILL_WIDTH),
            offset: non_negative_or(raw.offset, DEFAULT_OFFSET),
            base_color: raw.base_color.unwrap_or_else(HexColor::black),
            fill_color: raw.fill_color.unwrap_or_else(HexColor::black),
            fill_end_color: raw.fill_end_color,
            text_color: raw.text_color.unwrap_or_else(HexColor::black),
            text_size: non_negative_or(raw.text_size, DEFAULT_TEXT_SIZE),
            smooth_thumb: raw.smooth_thumb.unwrap_or(true),
            thumb_image: raw.thumb_image.filter(|p| !p.as_os_str().is_empty()),
            thumb_size: non_negative_or(raw.thumb_size, DEFAULT_THUMB_SIZE).max(1.0),
            edge_tolerance: non_negative_or(raw.edge_tolerance, DEFAULT_EDGE_TOLERANCE),
            max,
            progress: raw.progress.unwrap_or(0).min(max),
            continuous_redraw: raw.continuous_redraw.unwrap_or(true),
        }
    }
}

impl ArcConfig {
    pub fn span(&self) -> ArcSpan {
        ArcSpan::new(self.start_angle as f64, self.sweep_angle as f64)
    }
}

/// Sweeps wrap modulo 360, with whole turns kept as a full circle. Zero is
/// not a usable sweep and falls back to the default.
fn normalize_sweep(sweep: Option<i32>) -> i32 {
    match sweep {
        None | Some(0) => DEFAULT_SWEEP_ANGLE,
        Some(s) => match s.rem_euclid(360) {
            0 => 360,
            wrapped => wrapped,
        },
    }
}

fn non_negative_or(value: Option<f64>, default: f64) -> f64 {
    value
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(default)
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "arcseek", "arcseek").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn resolve(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<ArcConfig, ConfigError> {
    let raw: RawConfig = builder.build()?.try_deserialize()?;
    Ok(ArcConfig::from(raw))
}

/// Reads `path` (or the default config location) overlaid with `ARCSEEK_*`
/// environment variables. A missing file is not an error.
pub fn load_config(path: Option<&Path>) -> Result<ArcConfig, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => get_config_path()?,
    };

    log::debug!("Loading configuration from {}", path.display());

    resolve(
        config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true)),
    )
}

pub fn load_or_default(path: Option<&Path>) -> ArcConfig {
    match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to default configuration: {}", e);
            ArcConfig::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");
