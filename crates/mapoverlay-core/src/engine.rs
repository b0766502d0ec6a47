//! The engine as seen by a hosting map page.

use crate::config::EngineConfig;
use crate::error::{ConfigError, EditResult};
use crate::geo::LatLng;
use crate::measure::{self, Measurement};
use crate::selection::SelectionRegistry;
use crate::shapes::{DragHandle, Shape, ShapeId, ShapeKind};
use crate::store::ShapeStore;
use crate::tools::{CommitReport, Mode, ModeController, PointOutcome};

/// Display data for the selected shape.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionDetails {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Anchor position formatted as `"lat, lng"`.
    pub position: String,
    pub measurement: String,
}

/// Store, authoring controller and selection wired together.
#[derive(Debug, Clone)]
pub struct MapEngine {
    pub store: ShapeStore,
    pub controller: ModeController,
    pub selection: SelectionRegistry,
}

impl MapEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            store: ShapeStore::new(),
            controller: ModeController::new(config)?,
            selection: SelectionRegistry::new(),
        })
    }

    /// Seed display-only shapes such as coverage areas and zones.
    pub fn with_shapes(mut self, shapes: impl IntoIterator<Item = Shape>) -> Self {
        for shape in shapes {
            self.store.add(shape);
        }
        self
    }

    pub fn mode(&self) -> Mode {
        self.controller.mode()
    }

    pub fn start_authoring(&mut self, kind: ShapeKind) {
        self.controller.start_authoring(kind);
    }

    /// A click on the map surface.
    pub fn click(&mut self, point: LatLng) -> EditResult<PointOutcome> {
        self.controller.add_point(&mut self.store, point)
    }

    pub fn finish(&mut self) -> EditResult<CommitReport> {
        self.controller.finish(&mut self.store)
    }

    pub fn cancel(&mut self) {
        self.controller.cancel();
    }

    pub fn clear_all(&mut self, kind: ShapeKind) -> usize {
        self.controller.clear_all(&mut self.store, kind)
    }

    pub fn drag(&mut self, handle: DragHandle, point: LatLng) -> EditResult<()> {
        self.controller.drag(handle, point)
    }

    /// Click on a shape to select it.
    pub fn select(&mut self, id: ShapeId) {
        self.selection.select(id);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// The selected shape, or `None` if nothing (or something stale) is selected.
    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selection.resolve(&self.store)
    }

    /// Display data for the selected shape.
    pub fn selection_details(&self) -> Option<SelectionDetails> {
        let shape = self.selected_shape()?;
        let info = shape.info();
        Some(SelectionDetails {
            id: shape.id(),
            kind: shape.kind(),
            name: info.map(|i| i.name.clone()),
            description: info.map(|i| i.description.clone()),
            position: measure::format_point(shape.anchor()),
            measurement: Measurement::of(shape).display(),
        })
    }

    /// Combined area of all circles, formatted for display.
    pub fn total_circle_area(&self) -> String {
        measure::format_area_km2(measure::total_area(self.store.circles()))
    }

    /// Area of the editable circle, formatted for display.
    pub fn editable_circle_area(&self) -> String {
        let radius = self.controller.editable_circle().radius();
        measure::format_area_km2(measure::circle_area(radius))
    }

    /// Whether the "clear" control for a shape type should be enabled.
    pub fn can_clear(&self, kind: ShapeKind) -> bool {
        self.store.count(kind) > 0
    }

    /// Whether the "finish" control should be enabled.
    pub fn can_finish(&self) -> bool {
        self.controller.staging().is_some_and(|s| s.can_finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, SerializableColor, ShapeInfo};
    use uuid::Uuid;

    #[test]
    fn test_coverage_selection_details() {
        let id = Uuid::new_v4();
        let coverage = Circle::coverage(
            id,
            LatLng::new(40.0, -74.0),
            1000.0,
            SerializableColor::rgb(255, 0, 0),
            ShapeInfo::new("North", "Night coverage"),
        )
        .unwrap();
        let mut engine = MapEngine::new(EngineConfig::default())
            .unwrap()
            .with_shapes([coverage.into()]);

        engine.select(id);
        let details = engine.selection_details().unwrap();
        assert_eq!(details.name.as_deref(), Some("North"));
        assert_eq!(details.position, "40.000000, -74.000000");
        assert_eq!(details.measurement, "Radius: 1km, Area: 3.14 km²");
    }

    #[test]
    fn test_controls_enablement() {
        let mut engine = MapEngine::new(EngineConfig::default()).unwrap();
        assert!(!engine.can_clear(ShapeKind::Polygon));
        assert!(!engine.can_finish());

        engine.start_authoring(ShapeKind::Polygon);
        for p in [LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0), LatLng::new(1.0, 0.0)] {
            engine.click(p).unwrap();
        }
        assert!(engine.can_finish());
        engine.finish().unwrap();
        assert!(engine.can_clear(ShapeKind::Polygon));
    }

    #[test]
    fn test_total_circle_area() {
        let mut engine = MapEngine::new(EngineConfig::default()).unwrap();
        assert_eq!(engine.total_circle_area(), "0.00 km²");
        for lat in [0.0, 0.001] {
            engine.start_authoring(ShapeKind::Circle);
            engine.click(LatLng::new(lat, 0.0)).unwrap();
        }
        assert_eq!(engine.total_circle_area(), "6.28 km²");
        assert_eq!(engine.editable_circle_area(), "3.14 km²");
    }
}
