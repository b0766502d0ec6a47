//! Polygon shape.

use super::{SerializableColor, ShapeId, ShapeInfo, ShapeKind, ShapeTrait};
use crate::geo::{LatLng, Winding, ring_winding};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A closed polygon with optional holes.
///
/// Holes are expected to wind opposite to the outer ring; this is not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub(crate) id: ShapeId,
    /// Outer ring in insertion order (implicitly closed).
    pub paths: Vec<LatLng>,
    /// Inner rings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holes: Vec<Vec<LatLng>>,
    pub fill_color: SerializableColor,
    pub stroke_color: SerializableColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<ShapeInfo>,
}

impl Polygon {
    /// Create a new polygon from its outer ring.
    pub fn new(
        paths: Vec<LatLng>,
        fill_color: SerializableColor,
        stroke_color: SerializableColor,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), paths, fill_color, stroke_color)
    }

    /// Create a polygon with a caller-supplied ID.
    pub fn with_id(
        id: ShapeId,
        paths: Vec<LatLng>,
        fill_color: SerializableColor,
        stroke_color: SerializableColor,
    ) -> Self {
        Self {
            id,
            paths,
            holes: Vec::new(),
            fill_color,
            stroke_color,
            info: None,
        }
    }

    /// Create a named, selectable zone.
    pub fn zone(
        id: ShapeId,
        paths: Vec<LatLng>,
        fill_color: SerializableColor,
        stroke_color: SerializableColor,
        info: ShapeInfo,
    ) -> Self {
        let mut polygon = Self::with_id(id, paths, fill_color, stroke_color);
        polygon.info = Some(info);
        polygon
    }

    /// Add an inner ring.
    pub fn with_hole(mut self, hole: Vec<LatLng>) -> Self {
        self.holes.push(hole);
        self
    }

    /// Number of vertices in the outer ring.
    pub fn vertex_count(&self) -> usize {
        self.paths.len()
    }

    /// Winding of the outer ring.
    pub fn winding(&self) -> Winding {
        ring_winding(&self.paths)
    }

    /// Whether every hole winds opposite to the outer ring.
    pub fn holes_wind_opposite(&self) -> bool {
        let outer = self.winding();
        self.holes.iter().all(|hole| {
            let w = ring_winding(hole);
            w != Winding::Degenerate && w != outer
        })
    }
}

impl ShapeTrait for Polygon {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Polygon
    }

    /// Vertex centroid of the outer ring.
    fn anchor(&self) -> LatLng {
        if self.paths.is_empty() {
            return LatLng::new(0.0, 0.0);
        }
        let n = self.paths.len() as f64;
        let (lat, lng) = self
            .paths
            .iter()
            .fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat, lng + p.lng));
        LatLng::new(lat / n, lng / n)
    }

    fn is_valid(&self) -> bool {
        self.paths.len() >= ShapeKind::Polygon.min_points()
    }

    fn info(&self) -> Option<&ShapeInfo> {
        self.info.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f64) -> Vec<LatLng> {
        vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, size),
            LatLng::new(size, size),
            LatLng::new(size, 0.0),
        ]
    }

    fn colors() -> (SerializableColor, SerializableColor) {
        (SerializableColor::rgb(0, 0, 255), SerializableColor::black())
    }

    #[test]
    fn test_validity_needs_three_points() {
        let (fill, stroke) = colors();
        let mut polygon = Polygon::new(square(1.0)[..2].to_vec(), fill, stroke);
        assert!(!polygon.is_valid());
        polygon.paths.push(LatLng::new(1.0, 1.0));
        assert!(polygon.is_valid());
    }

    #[test]
    fn test_anchor_is_vertex_centroid() {
        let (fill, stroke) = colors();
        let polygon = Polygon::new(square(2.0), fill, stroke);
        let anchor = polygon.anchor();
        assert!((anchor.lat - 1.0).abs() < 1e-12);
        assert!((anchor.lng - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_hole_winding_check() {
        let (fill, stroke) = colors();
        let inner: Vec<LatLng> = square(0.5)
            .into_iter()
            .map(|p| LatLng::new(p.lat + 0.25, p.lng + 0.25))
            .collect();

        let same = Polygon::new(square(2.0), fill, stroke).with_hole(inner.clone());
        assert!(!same.holes_wind_opposite());

        let mut reversed = inner;
        reversed.reverse();
        let opposite = Polygon::new(square(2.0), fill, stroke).with_hole(reversed);
        assert!(opposite.holes_wind_opposite());
    }

    #[test]
    fn test_zone_info() {
        let (fill, stroke) = colors();
        let zone = Polygon::zone(
            Uuid::new_v4(),
            square(1.0),
            fill,
            stroke,
            ShapeInfo::new("Zone A", "Delivery"),
        );
        assert_eq!(zone.info().map(|i| i.description.as_str()), Some("Delivery"));
    }
}
