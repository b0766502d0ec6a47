//! Recorded UI actions and the script that carries them.

use mapoverlay_core::shapes::SerializableColor;
use mapoverlay_core::{DragHandle, EngineConfig, LatLng, Shape, ShapeId, ShapeKind};
use serde::{Deserialize, Serialize};

/// Actions a map page can trigger on the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UiAction {
    /// A builder's "start" control.
    StartAuthoring { kind: ShapeKind },
    /// A click on the map surface.
    Click { lat: f64, lng: f64 },
    /// The "finish" control.
    Finish,
    /// The "cancel" control.
    Cancel,
    /// A builder's "clear" control.
    ClearAll { kind: ShapeKind },
    /// Radius slider.
    SetCircleRadius { radius: f64 },
    SetCircleColor { color: SerializableColor },
    SetPolygonColors {
        fill: SerializableColor,
        stroke: SerializableColor,
    },
    SetPolylineColor { color: SerializableColor },
    /// Unlock the editable circle.
    StartEditing,
    /// Lock the editable circle.
    StopEditing,
    /// A full drag gesture on one of the editable circle's handles.
    Drag { handle: DragHandle, lat: f64, lng: f64 },
    BeginDrag { handle: DragHandle },
    DragTo { lat: f64, lng: f64 },
    EndDrag,
    /// Click on a shape by id.
    Select { id: ShapeId },
    /// Click on the most recently committed shape.
    SelectLast,
    /// Click on empty map.
    ClearSelection,
}

impl UiAction {
    /// Short name used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            UiAction::StartAuthoring { .. } => "start_authoring",
            UiAction::Click { .. } => "click",
            UiAction::Finish => "finish",
            UiAction::Cancel => "cancel",
            UiAction::ClearAll { .. } => "clear_all",
            UiAction::SetCircleRadius { .. } => "set_circle_radius",
            UiAction::SetCircleColor { .. } => "set_circle_color",
            UiAction::SetPolygonColors { .. } => "set_polygon_colors",
            UiAction::SetPolylineColor { .. } => "set_polyline_color",
            UiAction::StartEditing => "start_editing",
            UiAction::StopEditing => "stop_editing",
            UiAction::Drag { .. } => "drag",
            UiAction::BeginDrag { .. } => "begin_drag",
            UiAction::DragTo { .. } => "drag_to",
            UiAction::EndDrag => "end_drag",
            UiAction::Select { .. } => "select",
            UiAction::SelectLast => "select_last",
            UiAction::ClearSelection => "clear_selection",
        }
    }

    /// The map position carried by pointer actions.
    pub fn point(&self) -> Option<LatLng> {
        match *self {
            UiAction::Click { lat, lng }
            | UiAction::Drag { lat, lng, .. }
            | UiAction::DragTo { lat, lng } => Some(LatLng::new(lat, lng)),
            _ => None,
        }
    }
}

/// A recorded session: optional config, fixed shapes shown on the map, and
/// the actions to replay in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: Option<EngineConfig>,
    #[serde(default)]
    pub shapes: Vec<Shape>,
    pub actions: Vec<UiAction>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
