//! Sketchpad application shell.
//!
//! Plays the part of the rendering surface: replays a recorded editing script
//! against the core and writes the exported SVG.

mod script;
mod surface;

pub use script::{Script, Step, Target};
pub use surface::LogSurface;

use sketchpad_core::{Canvas, EXPORT_FILE_NAME};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading scripts and writing exports.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Usage: {0}")]
    Usage(String),
}

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

const USAGE: &str = "sketchpad <script.json> [output.svg]";

/// Read and parse a script file.
pub fn load_script(path: &Path) -> ReplayResult<Script> {
    let json = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Script::from_json(&json)
}

/// Replay `script` on a fresh canvas.
pub fn replay(script: &Script) -> Canvas<LogSurface> {
    let mut canvas = Canvas::with_surface(LogSurface::default());
    canvas.set_defaults(script.defaults.clone());
    for (index, step) in script.events.iter().enumerate() {
        log::debug!("Step {}: {:?}", index, step);
        step.apply(&mut canvas);
    }
    canvas
}

/// Write the canvas' SVG export to `path`.
pub fn export_to(canvas: &Canvas<LogSurface>, path: &Path) -> ReplayResult<()> {
    std::fs::write(path, canvas.export_svg()).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Command-line entry: `<script.json> [output.svg]`. Returns the output path.
pub fn run(args: impl IntoIterator<Item = String>) -> ReplayResult<PathBuf> {
    let mut args = args.into_iter();
    let script_path = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| ReplayError::Usage(USAGE.to_string()))?;
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
    if let Some(extra) = args.next() {
        return Err(ReplayError::Usage(format!("unexpected argument {extra:?}; {USAGE}")));
    }

    let script = load_script(&script_path)?;
    let canvas = replay(&script);
    export_to(&canvas, &output)?;
    Ok(output)
}
