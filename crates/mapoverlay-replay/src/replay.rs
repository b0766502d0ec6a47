//! Drives a `MapEngine` through a recorded script.

use crate::action::{Script, UiAction};
use mapoverlay_core::{
    CommitReport, ConfigError, EditError, LatLng, MapEngine, Mode, PointOutcome,
    SelectionDetails, ShapeId, ShapeKind,
};
use std::path::Path;
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid script: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error("Action {index} ({action}) rejected: {source}")]
    Edit {
        index: usize,
        action: &'static str,
        #[source]
        source: EditError,
    },
}

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// An action the engine refused.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub index: usize,
    pub action: &'static str,
    pub error: EditError,
}

/// What a replay did to the engine.
#[derive(Debug, Clone, Default)]
pub struct ReplayReport {
    pub applied: usize,
    pub ignored: usize,
    pub commits: Vec<CommitReport>,
    pub rejections: Vec<Rejection>,
    pub cleared: usize,
}

/// Replays scripts against an engine.
#[derive(Debug)]
pub struct Replayer {
    engine: MapEngine,
    /// Stop at the first rejected action instead of recording it.
    strict: bool,
    last_commit: Option<ShapeId>,
}

impl Replayer {
    /// Build an engine from the script's config and fixed shapes.
    pub fn new(script: &Script) -> ReplayResult<Self> {
        let config = script.config.clone().unwrap_or_default();
        let engine = MapEngine::new(config)?.with_shapes(script.shapes.iter().cloned());
        Ok(Self {
            engine,
            strict: false,
            last_commit: None,
        })
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn engine(&self) -> &MapEngine {
        &self.engine
    }

    pub fn into_engine(self) -> MapEngine {
        self.engine
    }

    /// Apply every action in order.
    pub fn run(&mut self, actions: &[UiAction]) -> ReplayResult<ReplayReport> {
        let mut report = ReplayReport::default();
        for (index, action) in actions.iter().enumerate() {
            match self.apply(action, &mut report) {
                Ok(()) => report.applied += 1,
                Err(error) => {
                    log::warn!("Action {} ({}) rejected: {}", index, action.name(), error);
                    if self.strict {
                        return Err(ReplayError::Edit {
                            index,
                            action: action.name(),
                            source: error,
                        });
                    }
                    report.rejections.push(Rejection {
                        index,
                        action: action.name(),
                        error,
                    });
                }
            }
        }
        log::info!(
            "Replayed {} actions ({} rejected, {} shapes committed)",
            actions.len(),
            report.rejections.len(),
            report.commits.len()
        );
        Ok(report)
    }

    fn apply(&mut self, action: &UiAction, report: &mut ReplayReport) -> Result<(), EditError> {
        let engine = &mut self.engine;
        match action {
            UiAction::StartAuthoring { kind } => engine.start_authoring(*kind),
            UiAction::Click { lat, lng } => {
                match engine.click(LatLng::new(*lat, *lng))? {
                    PointOutcome::Ignored => {
                        log::debug!("Click ignored in {} mode", engine.mode());
                        report.ignored += 1;
                    }
                    PointOutcome::Staged { count } => log::debug!("{} points staged", count),
                    PointOutcome::Committed(commit) => {
                        self.last_commit = Some(commit.id);
                        report.commits.push(commit);
                    }
                }
            }
            UiAction::Finish => {
                let commit = engine.finish()?;
                self.last_commit = Some(commit.id);
                report.commits.push(commit);
            }
            UiAction::Cancel => engine.cancel(),
            UiAction::ClearAll { kind } => report.cleared += engine.clear_all(*kind),
            UiAction::SetCircleRadius { radius } => {
                let applied = engine.controller.set_circle_radius(*radius)?;
                log::debug!("Circle radius preset {}m", applied);
            }
            UiAction::SetCircleColor { color } => engine.controller.set_circle_color(*color)?,
            UiAction::SetPolygonColors { fill, stroke } => {
                engine.controller.set_polygon_colors(*fill, *stroke)?
            }
            UiAction::SetPolylineColor { color } => engine.controller.set_polyline_color(*color)?,
            UiAction::StartEditing => engine.controller.start_editing(),
            UiAction::StopEditing => engine.controller.stop_editing(),
            UiAction::Drag { handle, lat, lng } => {
                engine.drag(*handle, LatLng::new(*lat, *lng))?
            }
            UiAction::BeginDrag { handle } => engine.controller.begin_drag(*handle)?,
            UiAction::DragTo { lat, lng } => engine
                .controller
                .drag_to(LatLng::new(*lat, *lng))?,
            UiAction::EndDrag => engine.controller.end_drag()?,
            UiAction::Select { id } => engine.select(*id),
            UiAction::SelectLast => match self.last_commit {
                Some(id) => engine.select(id),
                None => log::debug!("Nothing committed yet to select"),
            },
            UiAction::ClearSelection => engine.clear_selection(),
        }
        Ok(())
    }
}

/// Final engine state, ready for printing.
#[derive(Debug, Clone)]
pub struct Summary {
    pub mode: Mode,
    pub status: String,
    pub counts: Vec<(ShapeKind, usize)>,
    pub total_circle_area: String,
    pub editable_circle_area: String,
    pub selection: Option<SelectionDetails>,
}

impl Summary {
    pub fn of(engine: &MapEngine) -> Self {
        Self {
            mode: engine.mode(),
            status: engine.controller.status_text(),
            counts: ShapeKind::ALL
                .iter()
                .map(|&kind| (kind, engine.store.count(kind)))
                .collect(),
            total_circle_area: engine.total_circle_area(),
            editable_circle_area: engine.editable_circle_area(),
            selection: engine.selection_details(),
        }
    }

    /// Human-readable lines.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Mode: {}", self.mode),
            format!("Status: {}", self.status),
        ];
        for (kind, count) in &self.counts {
            lines.push(format!("{}: {}", kind, count));
        }
        lines.push(format!("Total circle area: {}", self.total_circle_area));
        lines.push(format!("Editable circle area: {}", self.editable_circle_area));
        match &self.selection {
            Some(details) => {
                let label = details.name.as_deref().unwrap_or("unnamed");
                lines.push(format!("Selected {} {} at {}", details.kind, label, details.position));
                lines.push(format!("  {}", details.measurement));
            }
            None => lines.push("Nothing selected".to_string()),
        }
        lines
    }
}

/// Load a script file and replay it.
pub fn replay_file(path: &Path, strict: bool) -> ReplayResult<(ReplayReport, Summary)> {
    let json = std::fs::read_to_string(path)?;
    let script = Script::from_json(&json)?;
    log::info!(
        "Loaded script from {:?}: {} actions, {} fixed shapes",
        path,
        script.actions.len(),
        script.shapes.len()
    );
    let mut replayer = Replayer::new(&script)?.strict(strict);
    let report = replayer.run(&script.actions)?;
    Ok((report, Summary::of(replayer.engine())))
}
