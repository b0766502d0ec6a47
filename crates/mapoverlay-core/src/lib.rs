//! Map Overlay Core Library
//!
//! UI-agnostic geometry editing engine behind the circle, polygon and polyline
//! builder controls: authoring modes, committed shapes, measurements and
//! selection.

pub mod config;
pub mod engine;
pub mod error;
pub mod geo;
pub mod measure;
pub mod selection;
pub mod shapes;
pub mod store;
pub mod tools;

pub use config::EngineConfig;
pub use engine::{MapEngine, SelectionDetails};
pub use error::{ConfigError, EditError, EditResult};
pub use geo::LatLng;
pub use measure::Measurement;
pub use selection::SelectionRegistry;
pub use shapes::{Circle, DragHandle, EditableCircle, Polygon, Polyline, Shape, ShapeId, ShapeKind};
pub use store::ShapeStore;
pub use tools::{CommitReport, Mode, ModeController, PointOutcome, Staging};
