/// Scene configuration: box extents, screen placement and palette
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Extents;
use crate::projection::IsoProjection;
use crate::style::Palette;

/// Tunable inputs for [`crate::scene::HeroScene`].
///
/// Every field is optional in JSON; missing fields take the values the hero
/// illustration ships with. The tilt angles are deliberately not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub size_x: f64,
    pub size_y: f64,
    pub size_z: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub inner_scale: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub palette: Palette,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            size_x: 100.0,
            size_y: 140.0,
            size_z: 100.0,
            center_x: 300.0,
            center_y: 280.0,
            inner_scale: 0.5,
            canvas_width: 600.0,
            canvas_height: 600.0,
            palette: Palette::default(),
        }
    }
}

impl SceneConfig {
    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading scene config from {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: SceneConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("size_x", self.size_x),
            ("size_y", self.size_y),
            ("size_z", self.size_z),
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        for (name, value) in [("center_x", self.center_x), ("center_y", self.center_y)] {
            if !value.is_finite() {
                return Err(Error::InvalidConfig(format!("{} must be finite", name)));
            }
        }
        if !(self.inner_scale > 0.0 && self.inner_scale <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "inner_scale must be in (0, 1], got {}",
                self.inner_scale
            )));
        }
        Ok(())
    }

    pub fn extents(&self) -> Extents {
        Extents::new(self.size_x, self.size_y, self.size_z)
    }

    pub fn projection(&self) -> IsoProjection {
        IsoProjection::new(self.center_x, self.center_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ISO_ANGLE;

    #[test]
    fn test_defaults_match_illustration() {
        let config = SceneConfig::default();
        assert_eq!(config.extents(), Extents::new(100.0, 140.0, 100.0));
        assert_eq!(config.inner_scale, 0.5);
        let projection = config.projection();
        assert_eq!(projection.center.x, 300.0);
        assert_eq!(projection.center.y, 280.0);
        assert_eq!(projection.angle_x, ISO_ANGLE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SceneConfig::from_json(r#"{ "size_y": 120, "center_x": 320.5 }"#).unwrap();
        assert_eq!(config.size_y, 120.0);
        assert_eq!(config.center_x, 320.5);
        assert_eq!(config.size_x, 100.0);
        assert_eq!(config.palette, Palette::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        for json in [
            r#"{ "size_x": 0 }"#,
            r#"{ "size_z": -5 }"#,
            r#"{ "inner_scale": 1.5 }"#,
            r#"{ "inner_scale": 0 }"#,
            r#"{ "canvas_width": -1 }"#,
        ] {
            assert!(matches!(SceneConfig::from_json(json), Err(Error::InvalidConfig(_))), "{}", json);
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(SceneConfig::from_json("{ size_x: "), Err(Error::Json(_))));
        assert!(matches!(
            SceneConfig::from_json(r#"{ "palette": { "cyan": "teal" } }"#),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = SceneConfig::default();
        let text = config.to_json().unwrap();
        assert_eq!(SceneConfig::from_json(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            SceneConfig::load("/nonexistent/isocube.json"),
            Err(Error::Io(_))
        ));
    }
}
