//! Shape definitions for map overlays.

mod circle;
mod editable;
mod polygon;
mod polyline;

pub use circle::{Circle, RadiusMode};
pub use editable::{DragHandle, EditableCircle};
pub(crate) use editable::check_point;
pub use polygon::Polygon;
pub use polyline::Polyline;

use crate::error::ConfigError;
use crate::geo::LatLng;
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Serializable color representation (RGBA8), stored as a `#RRGGBB[AA]` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(ConfigError::Color(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| ConfigError::Color(hex.to_string()))
        };
        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Format as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for SerializableColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for SerializableColor {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<SerializableColor> for String {
    fn from(color: SerializableColor) -> Self {
        color.to_hex()
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// The authorable shape types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Circle,
    Polygon,
    Polyline,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Circle, ShapeKind::Polygon, ShapeKind::Polyline];

    /// Minimum number of staged points needed to commit this kind.
    pub fn min_points(self) -> usize {
        match self {
            ShapeKind::Circle | ShapeKind::Polyline => 1,
            ShapeKind::Polygon => 3,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Polyline => "polyline",
        })
    }
}

/// Descriptive metadata for display-only coverage areas and named zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl ShapeInfo {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the shape type.
    fn kind(&self) -> ShapeKind;

    /// Representative position for labels and info windows.
    fn anchor(&self) -> LatLng;

    /// Whether the geometry meets the minimum for its type.
    fn is_valid(&self) -> bool;

    /// Descriptive metadata, if this is a coverage area or zone.
    fn info(&self) -> Option<&ShapeInfo>;
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Circle(Circle),
    Polygon(Polygon),
    Polyline(Polyline),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Circle(s) => s.id(),
            Shape::Polygon(s) => s.id(),
            Shape::Polyline(s) => s.id(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle(s) => s.kind(),
            Shape::Polygon(s) => s.kind(),
            Shape::Polyline(s) => s.kind(),
        }
    }

    pub fn anchor(&self) -> LatLng {
        match self {
            Shape::Circle(s) => s.anchor(),
            Shape::Polygon(s) => s.anchor(),
            Shape::Polyline(s) => s.anchor(),
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Shape::Circle(s) => s.is_valid(),
            Shape::Polygon(s) => s.is_valid(),
            Shape::Polyline(s) => s.is_valid(),
        }
    }

    pub fn info(&self) -> Option<&ShapeInfo> {
        match self {
            Shape::Circle(s) => s.info(),
            Shape::Polygon(s) => s.info(),
            Shape::Polyline(s) => s.info(),
        }
    }

    /// Get the circle if this shape is a circle.
    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            Shape::Circle(c) => Some(c),
            _ => None,
        }
    }

    /// Get the polygon if this shape is a polygon.
    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Shape::Polygon(p) => Some(p),
            _ => None,
        }
    }

    /// Get the polyline if this shape is a polyline.
    pub fn as_polyline(&self) -> Option<&Polyline> {
        match self {
            Shape::Polyline(p) => Some(p),
            _ => None,
        }
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}

impl From<Polyline> for Shape {
    fn from(polyline: Polyline) -> Self {
        Shape::Polyline(polyline)
    }
}
