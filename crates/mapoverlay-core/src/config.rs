//! Builder presets: color palettes and radius ranges per shape type.

use crate::error::ConfigError;
use crate::geo::LatLng;
use crate::shapes::{SerializableColor, ShapeKind};
use serde::{Deserialize, Serialize};

/// A bounded numeric slider: `min..=max` in increments of `step`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangePreset {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl RangePreset {
    /// Clamp into range and snap to the nearest step from `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        let snapped = self.min + ((clamped - self.min) / self.step).round() * self.step;
        snapped.min(self.max)
    }

    fn validate(&self, kind: ShapeKind) -> Result<(), ConfigError> {
        let reason = if !(self.min.is_finite() && self.max.is_finite() && self.step.is_finite()) {
            Some("bounds must be finite".to_string())
        } else if self.min <= 0.0 {
            Some(format!("min must be positive, got {}", self.min))
        } else if self.min > self.max {
            Some(format!("min {} exceeds max {}", self.min, self.max))
        } else if self.step <= 0.0 {
            Some(format!("step must be positive, got {}", self.step))
        } else if !(self.min..=self.max).contains(&self.default) {
            Some(format!("default {} outside {}..={}", self.default, self.min, self.max))
        } else {
            None
        };
        match reason {
            Some(reason) => Err(ConfigError::Range { kind, reason }),
            None => Ok(()),
        }
    }
}

/// Presets for the circle builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CirclePresets {
    pub colors: Vec<SerializableColor>,
    /// Radius slider in meters.
    pub radius: RangePreset,
}

/// Presets for the polygon builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonPresets {
    pub fill_colors: Vec<SerializableColor>,
    pub stroke_colors: Vec<SerializableColor>,
}

/// Presets for the polyline builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolylinePresets {
    pub colors: Vec<SerializableColor>,
}

/// Initial geometry of the editable circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EditableCirclePreset {
    pub center: LatLng,
    /// Meters.
    pub radius: f64,
}

/// Immutable engine configuration supplied at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub circle: CirclePresets,
    pub polygon: PolygonPresets,
    pub polyline: PolylinePresets,
    pub editable_circle: EditableCirclePreset,
}

fn palette() -> Vec<SerializableColor> {
    vec![
        SerializableColor::rgb(0xFF, 0x00, 0x00),
        SerializableColor::rgb(0x00, 0xFF, 0x00),
        SerializableColor::rgb(0x00, 0x00, 0xFF),
        SerializableColor::rgb(0xFF, 0xFF, 0x00),
        SerializableColor::rgb(0xFF, 0x00, 0xFF),
    ]
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            circle: CirclePresets {
                colors: palette(),
                radius: RangePreset {
                    min: 100.0,
                    max: 5000.0,
                    step: 100.0,
                    default: 1000.0,
                },
            },
            polygon: PolygonPresets {
                fill_colors: palette(),
                stroke_colors: vec![
                    SerializableColor::rgb(0x00, 0x00, 0x00),
                    SerializableColor::rgb(0xFF, 0xFF, 0xFF),
                    SerializableColor::rgb(0xFF, 0x00, 0x00),
                    SerializableColor::rgb(0x00, 0x00, 0xFF),
                ],
            },
            polyline: PolylinePresets { colors: palette() },
            editable_circle: EditableCirclePreset {
                center: LatLng::new(40.7128, -74.0060),
                radius: 1000.0,
            },
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config. Missing sections take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.circle.radius.validate(ShapeKind::Circle)?;
        let editable = self.editable_circle;
        if !(editable.radius.is_finite() && editable.radius > 0.0) || !editable.center.is_finite() {
            return Err(ConfigError::Range {
                kind: ShapeKind::Circle,
                reason: format!(
                    "editable circle needs a finite center and positive radius, got {}",
                    editable.radius
                ),
            });
        }
        let palettes = [
            ("circle", &self.circle.colors),
            ("polygon fill", &self.polygon.fill_colors),
            ("polygon stroke", &self.polygon.stroke_colors),
            ("polyline", &self.polyline.colors),
        ];
        for (name, colors) in palettes {
            if colors.is_empty() {
                return Err(ConfigError::EmptyPalette(name));
            }
        }
        Ok(())
    }
}
