//! Map Overlay Replay
//!
//! Stands in for the map page: loads a recorded session of UI actions and
//! plays it against the engine.

mod action;
mod cli;
mod replay;

pub use action::{Script, UiAction};
pub use cli::Cli;
pub use replay::{
    Rejection, ReplayError, ReplayReport, ReplayResult, Replayer, Summary, replay_file,
};
