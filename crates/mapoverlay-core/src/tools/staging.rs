//! Uncommitted authoring state.

use crate::config::EngineConfig;
use crate::geo::LatLng;
use crate::shapes::{SerializableColor, ShapeKind};
use serde::{Deserialize, Serialize};

/// Points staged for the shape being built.
///
/// A circle is placed with a single click, so it stages no points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "points", rename_all = "snake_case")]
pub enum Staging {
    Circle,
    Polygon(Vec<LatLng>),
    Polyline(Vec<LatLng>),
}

impl Staging {
    /// Empty staging for a shape type.
    pub fn new(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Circle => Staging::Circle,
            ShapeKind::Polygon => Staging::Polygon(Vec::new()),
            ShapeKind::Polyline => Staging::Polyline(Vec::new()),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Staging::Circle => ShapeKind::Circle,
            Staging::Polygon(_) => ShapeKind::Polygon,
            Staging::Polyline(_) => ShapeKind::Polyline,
        }
    }

    /// Staged points in insertion order.
    pub fn points(&self) -> &[LatLng] {
        match self {
            Staging::Circle => &[],
            Staging::Polygon(points) | Staging::Polyline(points) => points,
        }
    }

    /// Whether enough points are staged to finish.
    pub fn can_finish(&self) -> bool {
        match self {
            Staging::Circle => false,
            _ => self.points().len() >= self.kind().min_points(),
        }
    }
}

/// The colors and radius currently chosen in the builder controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Presets {
    pub circle_radius: f64,
    pub circle_color: SerializableColor,
    pub polygon_fill: SerializableColor,
    pub polygon_stroke: SerializableColor,
    pub polyline_color: SerializableColor,
}

impl Presets {
    /// Defaults: the configured default radius and the first color of each palette.
    pub fn from_config(config: &EngineConfig) -> Self {
        let first = |palette: &[SerializableColor]| {
            palette.first().copied().unwrap_or_else(SerializableColor::black)
        };
        Self {
            circle_radius: config.circle.radius.default,
            circle_color: first(&config.circle.colors),
            polygon_fill: first(&config.polygon.fill_colors),
            polygon_stroke: first(&config.polygon.stroke_colors),
            polyline_color: first(&config.polyline.colors),
        }
    }
}
