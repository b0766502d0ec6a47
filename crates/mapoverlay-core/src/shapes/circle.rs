//! Circle shape.

use super::{SerializableColor, ShapeId, ShapeInfo, ShapeKind, ShapeTrait};
use crate::error::{EditError, EditResult};
use crate::geo::LatLng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a circle's radius may be changed after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadiusMode {
    /// Authored circles; radius can be edited.
    #[default]
    Mutable,
    /// Display-only coverage circles.
    Fixed,
}

/// A circle on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCircle")]
pub struct Circle {
    pub(crate) id: ShapeId,
    /// Center point.
    pub center: LatLng,
    /// Radius in meters, always > 0.
    radius: f64,
    /// Fill and stroke color.
    pub color: SerializableColor,
    #[serde(default)]
    pub radius_mode: RadiusMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<ShapeInfo>,
}

impl Circle {
    /// Create a new authored circle.
    pub fn new(center: LatLng, radius: f64, color: SerializableColor) -> EditResult<Self> {
        Self::with_id(Uuid::new_v4(), center, radius, color)
    }

    /// Create a circle with a caller-supplied ID.
    pub fn with_id(
        id: ShapeId,
        center: LatLng,
        radius: f64,
        color: SerializableColor,
    ) -> EditResult<Self> {
        check_radius(radius)?;
        Ok(Self {
            id,
            center,
            radius,
            color,
            radius_mode: RadiusMode::Mutable,
            info: None,
        })
    }

    /// Create a display-only coverage circle with a fixed radius.
    pub fn coverage(
        id: ShapeId,
        center: LatLng,
        radius: f64,
        color: SerializableColor,
        info: ShapeInfo,
    ) -> EditResult<Self> {
        let mut circle = Self::with_id(id, center, radius, color)?;
        circle.radius_mode = RadiusMode::Fixed;
        circle.info = Some(info);
        Ok(circle)
    }

    /// Radius in meters.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Change the radius. Rejects non-positive values and fixed circles.
    pub fn set_radius(&mut self, radius: f64) -> EditResult<()> {
        if self.radius_mode == RadiusMode::Fixed {
            return Err(EditError::FixedRadius);
        }
        check_radius(radius)?;
        self.radius = radius;
        Ok(())
    }

    pub fn is_coverage(&self) -> bool {
        self.radius_mode == RadiusMode::Fixed
    }
}

/// Wire form of [`Circle`], checked on the way in.
#[derive(Deserialize)]
struct RawCircle {
    id: ShapeId,
    center: LatLng,
    radius: f64,
    color: SerializableColor,
    #[serde(default)]
    radius_mode: RadiusMode,
    #[serde(default)]
    info: Option<ShapeInfo>,
}

impl TryFrom<RawCircle> for Circle {
    type Error = EditError;

    fn try_from(raw: RawCircle) -> Result<Self, Self::Error> {
        let mut circle = Self::with_id(raw.id, raw.center, raw.radius, raw.color)?;
        circle.radius_mode = raw.radius_mode;
        circle.info = raw.info;
        Ok(circle)
    }
}

/// Reject radii that are not strictly positive and finite.
pub(crate) fn check_radius(radius: f64) -> EditResult<()> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(EditError::InvalidRadius(radius))
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn anchor(&self) -> LatLng {
        self.center
    }

    fn is_valid(&self) -> bool {
        self.center.is_finite() && check_radius(self.radius).is_ok()
    }

    fn info(&self) -> Option<&ShapeInfo> {
        self.info.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> SerializableColor {
        SerializableColor::rgb(255, 0, 0)
    }

    #[test]
    fn test_circle_creation() {
        let circle = Circle::new(LatLng::new(1.0, 2.0), 500.0, red()).unwrap();
        assert!((circle.radius() - 500.0).abs() < f64::EPSILON);
        assert!(circle.is_valid());
        assert!(!circle.is_coverage());
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        assert_eq!(
            Circle::new(LatLng::new(0.0, 0.0), 0.0, red()),
            Err(EditError::InvalidRadius(0.0))
        );
        assert!(Circle::new(LatLng::new(0.0, 0.0), -5.0, red()).is_err());
        assert!(Circle::new(LatLng::new(0.0, 0.0), f64::NAN, red()).is_err());
    }

    #[test]
    fn test_set_radius_keeps_old_value_on_error() {
        let mut circle = Circle::new(LatLng::new(0.0, 0.0), 100.0, red()).unwrap();
        assert!(circle.set_radius(-1.0).is_err());
        assert!((circle.radius() - 100.0).abs() < f64::EPSILON);
        circle.set_radius(250.0).unwrap();
        assert!((circle.radius() - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_coverage_radius_is_fixed() {
        let mut circle = Circle::coverage(
            Uuid::new_v4(),
            LatLng::new(0.0, 0.0),
            2000.0,
            red(),
            ShapeInfo::new("Downtown", "Primary service area"),
        )
        .unwrap();
        assert!(circle.is_coverage());
        assert_eq!(circle.set_radius(10.0), Err(EditError::FixedRadius));
        assert_eq!(circle.info().map(|i| i.name.as_str()), Some("Downtown"));
    }

    #[test]
    fn test_deserialize_checks_radius() {
        let circle = Circle::new(LatLng::new(1.0, 2.0), 300.0, red()).unwrap();
        let json = serde_json::to_string(&circle).unwrap();
        let back: Circle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, circle);

        for bad in ["0.0", "-500.0"] {
            let json = json.replace("300.0", bad);
            assert!(json.contains(bad));
            assert!(serde_json::from_str::<Circle>(&json).is_err());
        }
    }
}
