//! Polyline shape.

use super::{SerializableColor, ShapeId, ShapeInfo, ShapeKind, ShapeTrait};
use crate::geo::LatLng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An open path of connected segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub(crate) id: ShapeId,
    /// Points in insertion order.
    pub path: Vec<LatLng>,
    pub color: SerializableColor,
}

impl Polyline {
    /// Create a new polyline.
    pub fn new(path: Vec<LatLng>, color: SerializableColor) -> Self {
        Self::with_id(Uuid::new_v4(), path, color)
    }

    /// Create a polyline with a caller-supplied ID.
    pub fn with_id(id: ShapeId, path: Vec<LatLng>, color: SerializableColor) -> Self {
        Self { id, path, color }
    }

    /// A single point draws nothing; two or more form at least one segment.
    pub fn is_complete(&self) -> bool {
        self.path.len() >= 2
    }
}

impl ShapeTrait for Polyline {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Polyline
    }

    fn anchor(&self) -> LatLng {
        self.path.first().copied().unwrap_or(LatLng::new(0.0, 0.0))
    }

    fn is_valid(&self) -> bool {
        self.path.len() >= ShapeKind::Polyline.min_points()
    }

    fn info(&self) -> Option<&ShapeInfo> {
        None
    }
}
