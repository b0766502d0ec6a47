//! Authoritative collection of committed shapes.

use crate::shapes::{Circle, Polygon, Polyline, Shape, ShapeId, ShapeKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Committed shapes, keyed by ID, with insertion order kept per shape type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Shape>", into = "Vec<Shape>")]
pub struct ShapeStore {
    shapes: HashMap<ShapeId, Shape>,
    circles: Vec<ShapeId>,
    polygons: Vec<ShapeId>,
    polylines: Vec<ShapeId>,
}

impl ShapeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn order(&self, kind: ShapeKind) -> &Vec<ShapeId> {
        match kind {
            ShapeKind::Circle => &self.circles,
            ShapeKind::Polygon => &self.polygons,
            ShapeKind::Polyline => &self.polylines,
        }
    }

    fn order_mut(&mut self, kind: ShapeKind) -> &mut Vec<ShapeId> {
        match kind {
            ShapeKind::Circle => &mut self.circles,
            ShapeKind::Polygon => &mut self.polygons,
            ShapeKind::Polyline => &mut self.polylines,
        }
    }

    /// Add a shape. A shape with an existing ID replaces it in place; if the
    /// type changed it moves to the end of its new type's order.
    pub fn add(&mut self, shape: impl Into<Shape>) {
        let shape = shape.into();
        let id = shape.id();
        let kind = shape.kind();
        match self.shapes.insert(id, shape) {
            Some(previous) if previous.kind() == kind => {
                log::debug!("Replaced {} {}", kind, id);
            }
            Some(previous) => {
                self.order_mut(previous.kind()).retain(|&other| other != id);
                self.order_mut(kind).push(id);
                log::debug!("Replaced {} {} with {}", previous.kind(), id, kind);
            }
            None => self.order_mut(kind).push(id),
        }
    }

    /// Remove every shape of one type. Returns how many were removed.
    pub fn remove_all(&mut self, kind: ShapeKind) -> usize {
        let ids = std::mem::take(self.order_mut(kind));
        for id in &ids {
            self.shapes.remove(id);
        }
        ids.len()
    }

    /// Shapes of one type in insertion order.
    pub fn list(&self, kind: ShapeKind) -> impl Iterator<Item = &Shape> {
        self.order(kind).iter().filter_map(|id| self.shapes.get(id))
    }

    /// Get a shape by ID.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Get a mutable reference to a shape by ID.
    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    /// Circles in insertion order.
    pub fn circles(&self) -> impl Iterator<Item = &Circle> {
        self.list(ShapeKind::Circle).filter_map(Shape::as_circle)
    }

    /// Polygons in insertion order.
    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> {
        self.list(ShapeKind::Polygon).filter_map(Shape::as_polygon)
    }

    /// Polylines in insertion order.
    pub fn polylines(&self) -> impl Iterator<Item = &Polyline> {
        self.list(ShapeKind::Polyline).filter_map(Shape::as_polyline)
    }

    /// Number of shapes of one type.
    pub fn count(&self, kind: ShapeKind) -> usize {
        self.order(kind).len()
    }

    /// All shapes: circles, then polygons, then polylines.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        ShapeKind::ALL.into_iter().flat_map(move |kind| self.list(kind))
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Serialize all shapes to JSON for hand-off to a host.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Build a store from JSON produced by [`ShapeStore::to_json`].
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<Vec<Shape>> for ShapeStore {
    fn from(shapes: Vec<Shape>) -> Self {
        let mut store = Self::new();
        for shape in shapes {
            store.add(shape);
        }
        store
    }
}

impl From<ShapeStore> for Vec<Shape> {
    fn from(mut store: ShapeStore) -> Self {
        let ids: Vec<ShapeId> = ShapeKind::ALL
            .into_iter()
            .flat_map(|kind| std::mem::take(store.order_mut(kind)))
            .collect();
        ids.into_iter()
            .filter_map(|id| store.shapes.remove(&id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::LatLng;
    use crate::shapes::SerializableColor;
    use uuid::Uuid;

    fn circle_at(lat: f64) -> Circle {
        Circle::new(LatLng::new(lat, 0.0), 100.0, SerializableColor::black()).unwrap()
    }

    fn line() -> Polyline {
        Polyline::new(vec![LatLng::new(0.0, 0.0)], SerializableColor::black())
    }

    #[test]
    fn test_insertion_order() {
        let mut store = ShapeStore::new();
        let circles: Vec<Circle> = (0..3).map(|i| circle_at(i as f64)).collect();
        for c in &circles {
            store.add(c.clone());
        }
        let ids: Vec<ShapeId> = store.list(ShapeKind::Circle).map(Shape::id).collect();
        assert_eq!(ids, circles.iter().map(|c| c.id).collect::<Vec<_>>());
        assert_eq!(store.count(ShapeKind::Circle), 3);
        assert_eq!(store.count(ShapeKind::Polygon), 0);
    }

    #[test]
    fn test_duplicate_id_overwrites_in_place() {
        let mut store = ShapeStore::new();
        let first = circle_at(1.0);
        let second = circle_at(2.0);
        store.add(first.clone());
        store.add(second.clone());

        let mut replacement = circle_at(9.0);
        replacement.id = first.id;
        store.add(replacement);

        assert_eq!(store.len(), 2);
        let lats: Vec<f64> = store.circles().map(|c| c.center.lat).collect();
        assert_eq!(lats, vec![9.0, 2.0]);
    }

    #[test]
    fn test_duplicate_id_with_new_kind_moves() {
        let mut store = ShapeStore::new();
        let circle = circle_at(1.0);
        store.add(circle.clone());
        store.add(Polyline::with_id(circle.id, vec![LatLng::new(0.0, 0.0)], SerializableColor::black()));

        assert_eq!(store.count(ShapeKind::Circle), 0);
        assert_eq!(store.count(ShapeKind::Polyline), 1);
        assert_eq!(store.get(circle.id).map(Shape::kind), Some(ShapeKind::Polyline));
    }

    #[test]
    fn test_remove_all_only_touches_one_kind() {
        let mut store = ShapeStore::new();
        for i in 0..3 {
            store.add(circle_at(i as f64));
        }
        store.add(line());

        assert_eq!(store.remove_all(ShapeKind::Circle), 3);
        assert_eq!(store.list(ShapeKind::Circle).count(), 0);
        assert_eq!(store.count(ShapeKind::Polyline), 1);
        assert_eq!(store.remove_all(ShapeKind::Circle), 0);
    }

    #[test]
    fn test_get_missing() {
        let store = ShapeStore::new();
        assert!(store.get(Uuid::new_v4()).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_json_round_trip_keeps_order() {
        let mut store = ShapeStore::new();
        let a = circle_at(1.0);
        let b = circle_at(2.0);
        store.add(line());
        store.add(a.clone());
        store.add(b.clone());

        let json = store.to_json().unwrap();
        let loaded = ShapeStore::from_json(&json).unwrap();
        assert_eq!(loaded.len(), 3);
        let ids: Vec<ShapeId> = loaded.circles().map(|c| c.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[test]
    fn test_from_json_rejects_non_positive_radius() {
        let mut store = ShapeStore::new();
        store.add(Circle::new(LatLng::new(0.0, 0.0), 250.0, SerializableColor::black()).unwrap());
        let json = store.to_json().unwrap();
        assert!(ShapeStore::from_json(&json).is_ok());

        for bad in ["0.0", "-500.0"] {
            let json = json.replace("250.0", bad);
            assert!(ShapeStore::from_json(&json).is_err());
        }
    }
}
