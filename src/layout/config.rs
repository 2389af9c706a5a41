//! Layout configuration.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Coordinate mode for the projected layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CoordinateMode {
    /// Linear top-down layout: x = pos, y = level * level_separation.
    #[default]
    Linear,
    /// Radial layout: angle from normalized pos, radius = level * level_separation.
    Radial,
}

/// Configuration for the tidy tree layout.
///
/// Deserializes from partial objects; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Minimum horizontal gap between adjacent sibling subtrees, at every level.
    pub spacing: f64,
    /// Vertical (or radial) distance between consecutive levels.
    pub level_separation: f64,
    /// Coordinate output mode.
    pub coordinate_mode: CoordinateMode,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing: 1.0,
            level_separation: 1.0,
            coordinate_mode: CoordinateMode::Linear,
        }
    }
}

impl LayoutConfig {
    /// A linear configuration with the given sibling spacing.
    pub fn with_spacing(spacing: f64) -> Self {
        Self {
            spacing,
            ..Self::default()
        }
    }

    /// Check that every numeric field is usable.
    pub fn validate(&self) -> Result<(), LayoutError> {
        validate_spacing(self.spacing)?;
        if !self.level_separation.is_finite() || self.level_separation < 0.0 {
            return Err(LayoutError::InvalidLevelSeparation(self.level_separation));
        }
        Ok(())
    }
}

pub(crate) fn validate_spacing(spacing: f64) -> Result<(), LayoutError> {
    if spacing.is_finite() && spacing > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidSpacing(spacing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LayoutConfig::default();
        assert_eq!(config.spacing, 1.0);
        assert_eq!(config.coordinate_mode, CoordinateMode::Linear);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_spacing() {
        for spacing in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = LayoutConfig::with_spacing(spacing).validate().unwrap_err();
            assert!(matches!(err, LayoutError::InvalidSpacing(_)), "{spacing} accepted");
        }
    }

    #[test]
    fn test_invalid_level_separation() {
        let config = LayoutConfig {
            level_separation: -5.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(LayoutError::InvalidLevelSeparation(-5.0))
        );
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: LayoutConfig =
            serde_json::from_str(r#"{ "spacing": 2.5, "coordinateMode": "radial" }"#).unwrap();
        assert_eq!(config.spacing, 2.5);
        assert_eq!(config.level_separation, 1.0);
        assert_eq!(config.coordinate_mode, CoordinateMode::Radial);
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let json = serde_json::to_value(LayoutConfig::with_spacing(3.0)).unwrap();
        assert_eq!(json["spacing"], 3.0);
        assert_eq!(json["levelSeparation"], 1.0);
        assert_eq!(json["coordinateMode"], "linear");
    }
}
