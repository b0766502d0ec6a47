//! Error types for rejected edits and invalid configuration.

use crate::shapes::{SerializableColor, ShapeKind};
use crate::tools::Mode;
use thiserror::Error;

/// A rejected transition or edit.
///
/// None of these are fatal: the engine state is unchanged when one is returned,
/// and the host is expected to surface it as an instructional message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error("{kind} needs at least {required} points, {staged} staged")]
    InsufficientPoints {
        kind: ShapeKind,
        required: usize,
        staged: usize,
    },
    #[error("Radius must be a positive finite number of meters, got {0}")]
    InvalidRadius(f64),
    #[error("Point is not finite: ({lat}, {lng})")]
    NonFinitePoint { lat: f64, lng: f64 },
    #[error("Cannot {action} while {mode}")]
    InvalidTransition { action: &'static str, mode: Mode },
    #[error("Editable circle is locked; start editing first")]
    NotEditable,
    #[error("Radius of a coverage circle is fixed")]
    FixedRadius,
    #[error("Color {color} is not in the {kind} palette")]
    ColorNotInPalette {
        kind: ShapeKind,
        color: SerializableColor,
    },
}

/// Result type for edit operations.
pub type EditResult<T> = Result<T, EditError>;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid {kind} radius range: {reason}")]
    Range { kind: ShapeKind, reason: String },
    #[error("Empty {0} palette")]
    EmptyPalette(&'static str),
    #[error("Invalid color {0:?}: expected #RRGGBB or #RRGGBBAA")]
    Color(String),
}
