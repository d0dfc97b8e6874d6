//! # Render Configuration
//!
//! Canvas size, palette and stroke sizes for the route plotter.
//!
//! ## 사용법
//! ```rust
//! use route_core::config::RenderConfig;
//!
//! let config = RenderConfig::default();
//! assert!(config.validate().is_ok());
//! ```
//!
//! A file can be supplied through `ROUTE_RENDER_CONFIG_PATH` (JSON or YAML,
//! picked by extension).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::{env, fs};

use crate::error::{Result, TrajectoryError};

pub const RENDER_CONFIG_PATH_ENV: &str = "ROUTE_RENDER_CONFIG_PATH";

/// `#rrggbb` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(pub u8, pub u8, pub u8);

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("expected #rrggbb color, got '{}'", value));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| format!("expected #rrggbb color, got '{}'", value))
        };
        Ok(HexColor(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl From<HexColor> for String {
    fn from(c: HexColor) -> Self {
        c.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    pub figure_background: HexColor,
    pub field_color: HexColor,
    pub endzone_color: HexColor,
    pub line_color: HexColor,
    pub ball_color: HexColor,
    /// Route stroke width in pixels
    pub route_line_width: u32,
    /// Route marker radius in pixels
    pub marker_size: u32,
    /// Arrow head length in yards
    pub arrow_head_length: f64,
    /// Arrow head half-width in yards
    pub arrow_head_width: f64,
    /// Ball landing star outer radius in yards
    pub ball_marker_radius: f64,
    pub title_font_size: u32,
    pub show_legend: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 500,
            figure_background: HexColor(0x1a, 0x1a, 0x1a),
            field_color: HexColor(0x2d, 0x50, 0x16),
            endzone_color: HexColor(0x1a, 0x3d, 0x0a),
            line_color: HexColor(0xff, 0xff, 0xff),
            ball_color: HexColor(0xff, 0xff, 0x00),
            route_line_width: 2,
            marker_size: 4,
            arrow_head_length: 1.5,
            arrow_head_width: 1.0,
            ball_marker_radius: 1.8,
            title_font_size: 22,
            show_legend: true,
        }
    }
}

impl RenderConfig {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load and validate; `.yaml`/`.yml` is YAML, anything else JSON.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let config = if is_yaml { Self::from_yaml(&content)? } else { Self::from_json(&content)? };
        config.validate()?;
        Ok(config)
    }

    /// Defaults unless `ROUTE_RENDER_CONFIG_PATH` names a file.
    pub fn from_env() -> Result<Self> {
        let Ok(path) = env::var(RENDER_CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        Self::from_path(Path::new(path)).map_err(|e| {
            TrajectoryError::Config(format!("{RENDER_CONFIG_PATH_ENV}='{path}': {e}"))
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TrajectoryError::Config(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.route_line_width == 0 {
            return Err(TrajectoryError::Config("route_line_width must be > 0".into()));
        }
        for (name, value) in [
            ("arrow_head_length", self.arrow_head_length),
            ("arrow_head_width", self.arrow_head_width),
            ("ball_marker_radius", self.ball_marker_radius),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(TrajectoryError::Config(format!("{name} must be > 0, got {value}")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_default_config_valid() {
        let cfg = RenderConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.field_color.to_string(), "#2d5016");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = RenderConfig::from_json(r##"{"width": 800, "field_color": "#003300"}"##).unwrap();
        assert_eq!(cfg.width, 800);
        assert_eq!(cfg.height, 500);
        assert_eq!(cfg.field_color, HexColor(0, 0x33, 0));
    }

    #[test]
    fn test_bad_color_rejected() {
        assert!(RenderConfig::from_json(r#"{"ball_color": "yellow"}"#).is_err());
        assert!(RenderConfig::from_yaml("line_color: '#zzzzzz'").is_err());
    }

    #[test]
    fn test_validate_rejects_zero_canvas() {
        let cfg = RenderConfig { width: 0, ..RenderConfig::default() };
        assert!(matches!(cfg.validate(), Err(TrajectoryError::Config(_))));

        let cfg = RenderConfig { arrow_head_length: -1.0, ..RenderConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_from_yaml_file() -> Result<()> {
        let mut file = Builder::new().suffix(".yaml").tempfile()?;
        writeln!(file, "height: 640\nshow_legend: false")?;

        let cfg = RenderConfig::from_path(file.path())?;
        assert_eq!(cfg.height, 640);
        assert!(!cfg.show_legend);
        Ok(())
    }
}
