//! Authoring modes for the circle, polygon and polyline builders.

mod staging;

pub use staging::{Presets, Staging};

use crate::config::EngineConfig;
use crate::error::{ConfigError, EditError, EditResult};
use crate::geo::LatLng;
use crate::measure::{Measurement, format_radius};
use crate::shapes::{
    Circle, DragHandle, EditableCircle, Polygon, Polyline, SerializableColor, Shape, ShapeId,
    ShapeKind, check_point,
};
use crate::store::ShapeStore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Observable state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Idle,
    /// Gathering points for a polygon or polyline.
    Collecting,
    /// Waiting for a single click to place a circle.
    Placing,
    /// Dragging the editable circle.
    Editing,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Idle => "idle",
            Mode::Collecting => "collecting points",
            Mode::Placing => "placing",
            Mode::Editing => "editing",
        })
    }
}

/// Internal session state; at most one session is active.
#[derive(Debug, Clone, Default)]
enum Session {
    #[default]
    Idle,
    Authoring(Staging),
    Dragging {
        handle: DragHandle,
        /// Geometry before the drag, restored on cancel.
        original: EditableCircle,
    },
}

/// Result of committing a shape to the store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommitReport {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub measurement: Measurement,
}

/// What happened to a position event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointOutcome {
    /// No authoring session was active.
    Ignored,
    /// Appended to the staging buffer, which now holds `count` points.
    Staged { count: usize },
    /// The point completed a shape.
    Committed(CommitReport),
}

/// Drives the authoring lifecycle and the editable circle.
#[derive(Debug, Clone)]
pub struct ModeController {
    config: EngineConfig,
    presets: Presets,
    session: Session,
    editable: EditableCircle,
}

impl ModeController {
    /// Create a controller from a validated configuration.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let presets = Presets::from_config(&config);
        let editable = EditableCircle::new(config.editable_circle.center, config.editable_circle.radius)
            .map_err(|e| ConfigError::Range {
                kind: ShapeKind::Circle,
                reason: e.to_string(),
            })?;
        Ok(Self {
            config,
            presets,
            session: Session::Idle,
            editable,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn presets(&self) -> &Presets {
        &self.presets
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        match &self.session {
            Session::Idle => Mode::Idle,
            Session::Authoring(Staging::Circle) => Mode::Placing,
            Session::Authoring(_) => Mode::Collecting,
            Session::Dragging { .. } => Mode::Editing,
        }
    }

    /// The active staging buffer, if authoring.
    pub fn staging(&self) -> Option<&Staging> {
        match &self.session {
            Session::Authoring(staging) => Some(staging),
            _ => None,
        }
    }

    /// Number of staged points (0 when not collecting).
    pub fn staged_count(&self) -> usize {
        self.staging().map_or(0, |s| s.points().len())
    }

    /// Shape type being authored, if any.
    pub fn authoring_kind(&self) -> Option<ShapeKind> {
        self.staging().map(Staging::kind)
    }

    pub fn editable_circle(&self) -> &EditableCircle {
        &self.editable
    }

    /// Begin authoring a shape type, discarding any staged points.
    ///
    /// Starting again while already authoring restarts from an empty buffer.
    /// An in-progress drag is ended first, keeping its changes.
    pub fn start_authoring(&mut self, kind: ShapeKind) {
        match &self.session {
            Session::Authoring(staging) if !staging.points().is_empty() => {
                log::debug!(
                    "Discarding {} staged {} points",
                    staging.points().len(),
                    staging.kind()
                );
            }
            Session::Dragging { .. } => self.finish_drag(),
            _ => {}
        }
        self.session = Session::Authoring(Staging::new(kind));
        log::debug!("Started authoring {} ({})", kind, self.mode());
    }

    /// Route a position event.
    ///
    /// Ignored while idle or dragging. Placing commits a circle immediately;
    /// collecting appends to the buffer.
    pub fn add_point(&mut self, store: &mut ShapeStore, point: LatLng) -> EditResult<PointOutcome> {
        let mode = self.mode();
        let Session::Authoring(staging) = &mut self.session else {
            log::trace!("Ignoring point while {}", mode);
            return Ok(PointOutcome::Ignored);
        };
        if let Err(e) = check_point(point) {
            log::warn!("Rejected point: {}", e);
            return Err(e);
        }
        match staging {
            Staging::Circle => {
                let circle = Circle::new(point, self.presets.circle_radius, self.presets.circle_color)?;
                let report = self.commit(store, circle.into());
                Ok(PointOutcome::Committed(report))
            }
            Staging::Polygon(points) | Staging::Polyline(points) => {
                points.push(point);
                Ok(PointOutcome::Staged {
                    count: points.len(),
                })
            }
        }
    }

    /// Commit the staged polygon or polyline.
    ///
    /// On failure the buffer and mode are left untouched.
    pub fn finish(&mut self, store: &mut ShapeStore) -> EditResult<CommitReport> {
        let (kind, points) = match &self.session {
            Session::Authoring(Staging::Polygon(points)) => (ShapeKind::Polygon, points),
            Session::Authoring(Staging::Polyline(points)) => (ShapeKind::Polyline, points),
            _ => return Err(self.reject("finish")),
        };

        let staged = points.len();
        let required = kind.min_points();
        if staged < required {
            let err = EditError::InsufficientPoints {
                kind,
                required,
                staged,
            };
            log::warn!("Cannot finish: {}", err);
            return Err(err);
        }

        let shape: Shape = if kind == ShapeKind::Polygon {
            Polygon::new(
                points.clone(),
                self.presets.polygon_fill,
                self.presets.polygon_stroke,
            )
            .into()
        } else {
            Polyline::new(points.clone(), self.presets.polyline_color).into()
        };
        Ok(self.commit(store, shape))
    }

    /// Discard staged points or revert an in-progress drag. Always succeeds.
    pub fn cancel(&mut self) {
        match std::mem::take(&mut self.session) {
            Session::Idle => {}
            Session::Authoring(staging) => {
                log::debug!(
                    "Cancelled {} with {} staged points",
                    staging.kind(),
                    staging.points().len()
                );
            }
            Session::Dragging { original, .. } => {
                self.editable = original;
                log::debug!("Cancelled drag, circle restored");
            }
        }
    }

    /// Remove every committed shape of one type. Mode and staging are untouched.
    pub fn clear_all(&self, store: &mut ShapeStore, kind: ShapeKind) -> usize {
        let removed = store.remove_all(kind);
        log::info!("Cleared {} {} shapes", removed, kind);
        removed
    }

    /// Unlock the editable circle for dragging.
    pub fn start_editing(&mut self) {
        self.editable.set_editable(true);
        log::debug!("Editable circle unlocked");
    }

    /// Lock the editable circle, ending any drag with its changes kept.
    pub fn stop_editing(&mut self) {
        if matches!(self.session, Session::Dragging { .. }) {
            self.finish_drag();
        }
        self.editable.set_editable(false);
        log::debug!("Editable circle locked");
    }

    /// Start dragging a handle of the editable circle.
    pub fn begin_drag(&mut self, handle: DragHandle) -> EditResult<()> {
        if !self.editable.is_editable() {
            log::warn!("Cannot drag: {}", EditError::NotEditable);
            return Err(EditError::NotEditable);
        }
        if !matches!(self.session, Session::Idle) {
            return Err(self.reject("begin a drag"));
        }
        self.session = Session::Dragging {
            handle,
            original: self.editable.clone(),
        };
        log::debug!("Dragging {:?} handle", handle);
        Ok(())
    }

    /// Move the dragged handle to `point`.
    pub fn drag_to(&mut self, point: LatLng) -> EditResult<()> {
        let Session::Dragging { handle, .. } = self.session else {
            return Err(self.reject("drag"));
        };
        self.editable.apply_drag(handle, point).inspect_err(|e| {
            log::warn!("Rejected drag: {}", e);
        })
    }

    /// Finish the drag, keeping the new geometry.
    pub fn end_drag(&mut self) -> EditResult<()> {
        if !matches!(self.session, Session::Dragging { .. }) {
            return Err(self.reject("end a drag"));
        }
        self.finish_drag();
        Ok(())
    }

    /// A complete drag gesture in one call.
    pub fn drag(&mut self, handle: DragHandle, point: LatLng) -> EditResult<()> {
        self.begin_drag(handle)?;
        match self.drag_to(point) {
            Ok(()) => self.end_drag(),
            Err(e) => {
                self.cancel();
                Err(e)
            }
        }
    }

    /// Choose the radius for the next circle. Non-positive values are
    /// rejected; others are clamped to the configured slider.
    pub fn set_circle_radius(&mut self, radius: f64) -> EditResult<f64> {
        if !(radius.is_finite() && radius > 0.0) {
            log::warn!("Rejected circle radius {}", radius);
            return Err(EditError::InvalidRadius(radius));
        }
        self.presets.circle_radius = self.config.circle.radius.clamp(radius);
        Ok(self.presets.circle_radius)
    }

    pub fn set_circle_color(&mut self, color: SerializableColor) -> EditResult<()> {
        check_palette(&self.config.circle.colors, ShapeKind::Circle, color)?;
        self.presets.circle_color = color;
        Ok(())
    }

    pub fn set_polygon_colors(
        &mut self,
        fill: SerializableColor,
        stroke: SerializableColor,
    ) -> EditResult<()> {
        check_palette(&self.config.polygon.fill_colors, ShapeKind::Polygon, fill)?;
        check_palette(&self.config.polygon.stroke_colors, ShapeKind::Polygon, stroke)?;
        self.presets.polygon_fill = fill;
        self.presets.polygon_stroke = stroke;
        Ok(())
    }

    pub fn set_polyline_color(&mut self, color: SerializableColor) -> EditResult<()> {
        check_palette(&self.config.polyline.colors, ShapeKind::Polyline, color)?;
        self.presets.polyline_color = color;
        Ok(())
    }

    /// Instructional text for the current mode.
    pub fn status_text(&self) -> String {
        match &self.session {
            Session::Idle => "Choose a shape to start drawing".to_string(),
            Session::Authoring(Staging::Circle) => format!(
                "Click on the map to place a circle (radius {})",
                format_radius(self.presets.circle_radius)
            ),
            Session::Authoring(staging) => {
                let count = staging.points().len();
                let noun = if count == 1 { "point" } else { "points" };
                let required = staging.kind().min_points();
                if count < required {
                    format!(
                        "Click on the map to add points ({count} {noun} added, {required} needed)"
                    )
                } else {
                    format!("Click on the map to add points ({count} {noun} added)")
                }
            }
            Session::Dragging { .. } => {
                "Drag the center to move the circle or the edge to resize it".to_string()
            }
        }
    }

    fn commit(&mut self, store: &mut ShapeStore, shape: Shape) -> CommitReport {
        let report = CommitReport {
            id: shape.id(),
            kind: shape.kind(),
            measurement: Measurement::of(&shape),
        };
        store.add(shape);
        self.session = Session::Idle;
        log::debug!(
            "Committed {} {}: {}",
            report.kind,
            report.id,
            report.measurement.display()
        );
        report
    }

    fn finish_drag(&mut self) {
        self.session = Session::Idle;
        log::debug!(
            "Drag ended at {} r={}",
            self.editable.center,
            format_radius(self.editable.radius())
        );
    }

    fn reject(&self, action: &'static str) -> EditError {
        let err = EditError::InvalidTransition {
            action,
            mode: self.mode(),
        };
        log::warn!("{}", err);
        err
    }
}

fn check_palette(
    palette: &[SerializableColor],
    kind: ShapeKind,
    color: SerializableColor,
) -> EditResult<()> {
    if palette.contains(&color) {
        Ok(())
    } else {
        Err(EditError::ColorNotInPalette { kind, color })
    }
}
