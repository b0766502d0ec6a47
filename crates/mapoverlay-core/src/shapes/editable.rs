//! The single editable circle and its drag handles.

use super::circle::check_radius;
use crate::error::{EditError, EditResult};
use crate::geo::{LatLng, destination, distance_m};
use serde::{Deserialize, Serialize};

/// Bearing of the resize handle from the center (due east).
const EDGE_HANDLE_BEARING: f64 = 90.0;

/// Which part of the editable circle a drag manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragHandle {
    /// Moves the center; radius unchanged.
    Center,
    /// Resizes; radius becomes the distance from center to the pointer.
    Edge,
}

/// A mutable circle that can be moved and resized when editing is enabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEditableCircle")]
pub struct EditableCircle {
    pub center: LatLng,
    radius: f64,
    editable: bool,
}

impl EditableCircle {
    /// Create a locked editable circle.
    pub fn new(center: LatLng, radius: f64) -> EditResult<Self> {
        check_radius(radius)?;
        Ok(Self {
            center,
            radius,
            editable: false,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub(crate) fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    /// Position of the resize handle.
    pub fn edge_point(&self) -> LatLng {
        destination(self.center, EDGE_HANDLE_BEARING, self.radius)
    }

    /// Find the handle under `point`, preferring the edge handle.
    pub fn hit_handle(&self, point: LatLng, tolerance_m: f64) -> Option<DragHandle> {
        if distance_m(point, self.edge_point()) <= tolerance_m {
            Some(DragHandle::Edge)
        } else if distance_m(point, self.center) <= tolerance_m {
            Some(DragHandle::Center)
        } else {
            None
        }
    }

    /// Reposition the center.
    pub fn move_to(&mut self, center: LatLng) -> EditResult<()> {
        self.check_editable()?;
        check_point(center)?;
        self.center = center;
        Ok(())
    }

    /// Set the radius to the exact distance from the center to `edge`.
    ///
    /// Returns the new radius. An edge on top of the center is rejected.
    pub fn resize_to(&mut self, edge: LatLng) -> EditResult<f64> {
        self.check_editable()?;
        check_point(edge)?;
        let radius = distance_m(self.center, edge);
        check_radius(radius)?;
        self.radius = radius;
        Ok(radius)
    }

    /// Apply a drag of `handle` to `point`.
    pub fn apply_drag(&mut self, handle: DragHandle, point: LatLng) -> EditResult<()> {
        match handle {
            DragHandle::Center => self.move_to(point),
            DragHandle::Edge => self.resize_to(point).map(|_| ()),
        }
    }

    fn check_editable(&self) -> EditResult<()> {
        if self.editable {
            Ok(())
        } else {
            Err(EditError::NotEditable)
        }
    }
}

#[derive(Deserialize)]
struct RawEditableCircle {
    center: LatLng,
    radius: f64,
    #[serde(default)]
    editable: bool,
}

impl TryFrom<RawEditableCircle> for EditableCircle {
    type Error = EditError;

    fn try_from(raw: RawEditableCircle) -> Result<Self, Self::Error> {
        let mut circle = Self::new(raw.center, raw.radius)?;
        circle.editable = raw.editable;
        Ok(circle)
    }
}

pub(crate) fn check_point(point: LatLng) -> EditResult<()> {
    if point.is_finite() {
        Ok(())
    } else {
        Err(EditError::NonFinitePoint {
            lat: point.lat,
            lng: point.lng,
        })
    }
}
