//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mapoverlay-replay",
    about = "Replay a recorded map overlay session against the editing engine"
)]
pub struct Cli {
    /// Script file: a JSON object with `actions` and optional `config` and `shapes`.
    pub path: PathBuf,

    /// Stop at the first rejected action.
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}
