//! Board configuration: default dimensions, size floors and zoom limits.

use serde::{Deserialize, Serialize};

use crate::{BoardError, BoardResult};

/// Default board width in logical units.
pub const DEFAULT_BOARD_WIDTH: f32 = 1200.0;

/// Default board height in logical units.
pub const DEFAULT_BOARD_HEIGHT: f32 = 800.0;

/// Default width and height of a newly added element.
pub const DEFAULT_ELEMENT_SIZE: f32 = 200.0;

/// Elements are never resized below this width or height.
pub const MIN_ELEMENT_SIZE: f32 = 50.0;

/// Lower bound of the zoom scale.
pub const MIN_SCALE: f32 = 0.1;

/// Upper bound of the zoom scale.
pub const MAX_SCALE: f32 = 2.0;

/// Scale change per wheel tick.
pub const WHEEL_ZOOM_STEP: f32 = 0.05;

/// Scale change per zoom button press.
pub const BUTTON_ZOOM_STEP: f32 = 0.1;

/// Edge length of the resize hotspot at an element's bottom-right corner.
pub const RESIZE_HANDLE_SIZE: f32 = 24.0;

/// Paint layer used for the selected element so it is drawn above all others.
pub const SELECTED_LAYER: i32 = 999;

/// Tunable parameters for a board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    /// Initial board width.
    pub board_width: f32,
    /// Initial board height.
    pub board_height: f32,
    /// Width and height given to elements added without size overrides.
    pub default_element_size: f32,
    /// Floor applied by resize operations.
    pub min_element_size: f32,
    /// Lowest permitted scale.
    pub min_scale: f32,
    /// Highest permitted scale.
    pub max_scale: f32,
    /// Scale change per wheel tick.
    pub wheel_zoom_step: f32,
    /// Scale change per zoom-in / zoom-out press.
    pub button_zoom_step: f32,
    /// Edge length of the resize hotspot, in board units.
    pub resize_handle_size: f32,
    /// Paint layer of the selected element.
    pub selected_layer: i32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
            default_element_size: DEFAULT_ELEMENT_SIZE,
            min_element_size: MIN_ELEMENT_SIZE,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            wheel_zoom_step: WHEEL_ZOOM_STEP,
            button_zoom_step: BUTTON_ZOOM_STEP,
            resize_handle_size: RESIZE_HANDLE_SIZE,
            selected_layer: SELECTED_LAYER,
        }
    }
}

impl BoardConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Serialization`] for malformed JSON and
    /// [`BoardError::InvalidConfig`] if the values fail [`BoardConfig::validate`].
    pub fn from_json(json: &str) -> BoardResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is internally consistent.
    ///
    /// The scale range must contain 1.0 so that `reset_view` is always valid.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidConfig`] describing the first violation.
    pub fn validate(&self) -> BoardResult<()> {
        let positive = [
            ("boardWidth", self.board_width),
            ("boardHeight", self.board_height),
            ("defaultElementSize", self.default_element_size),
            ("minElementSize", self.min_element_size),
            ("minScale", self.min_scale),
            ("wheelZoomStep", self.wheel_zoom_step),
            ("buttonZoomStep", self.button_zoom_step),
            ("resizeHandleSize", self.resize_handle_size),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                tracing::warn!("Rejected board config: {name} = {value}");
                return Err(BoardError::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        if !self.max_scale.is_finite() || self.min_scale > 1.0 || self.max_scale < 1.0 {
            tracing::warn!(
                "Rejected board config: scale range {}..={}",
                self.min_scale,
                self.max_scale
            );
            return Err(BoardError::InvalidConfig(format!(
                "scale range {}..={} must contain 1.0",
                self.min_scale, self.max_scale
            )));
        }

        Ok(())
    }

    /// Clamp a scale value into the configured range.
    #[must_use]
    pub fn clamp_scale(&self, scale: f32) -> f32 {
        if scale.is_nan() {
            return self.min_scale;
        }
        scale.clamp(self.min_scale, self.max_scale)
    }

    /// Apply the minimum-size floor to a requested dimension.
    #[must_use]
    pub fn floor_size(&self, size: f32) -> f32 {
        if size.is_nan() {
            return self.min_element_size;
        }
        size.max(self.min_element_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(BoardConfig::default().validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config = BoardConfig::from_json(r#"{"boardWidth": 1600}"#).expect("parse");
        assert!((config.board_width - 1600.0).abs() < f32::EPSILON);
        assert!((config.board_height - DEFAULT_BOARD_HEIGHT).abs() < f32::EPSILON);
        assert!((config.min_element_size - MIN_ELEMENT_SIZE).abs() < f32::EPSILON);
    }

    #[test]
    fn test_from_json_rejects_negative_size() {
        let result = BoardConfig::from_json(r#"{"minElementSize": -5}"#);
        assert!(matches!(result, Err(BoardError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_json_rejects_scale_range_without_identity() {
        let result = BoardConfig::from_json(r#"{"minScale": 1.5, "maxScale": 3.0}"#);
        assert!(matches!(result, Err(BoardError::InvalidConfig(_))));
    }

    #[test]
    fn test_json_keys_are_camel_case() {
        let json = serde_json::to_value(BoardConfig::default()).expect("serialize");
        assert_eq!(json["maxScale"], 2.0);
        assert_eq!(json["selectedLayer"], 999);
        assert!(json.get("max_scale").is_none());
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let result = BoardConfig::from_json("{not json");
        assert!(matches!(result, Err(BoardError::Serialization(_))));
    }

    #[test]
    fn test_clamp_scale() {
        let config = BoardConfig::default();
        assert!((config.clamp_scale(5.0) - MAX_SCALE).abs() < f32::EPSILON);
        assert!((config.clamp_scale(-1.0) - MIN_SCALE).abs() < f32::EPSILON);
        assert!((config.clamp_scale(f32::NAN) - MIN_SCALE).abs() < f32::EPSILON);
        assert!((config.clamp_scale(1.25) - 1.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_floor_size() {
        let config = BoardConfig::default();
        assert!((config.floor_size(-300.0) - MIN_ELEMENT_SIZE).abs() < f32::EPSILON);
        assert!((config.floor_size(10.0) - MIN_ELEMENT_SIZE).abs() < f32::EPSILON);
        assert!((config.floor_size(120.0) - 120.0).abs() < f32::EPSILON);
    }
}
