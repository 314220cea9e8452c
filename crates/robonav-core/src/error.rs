//! Error types for map loading and grid construction.

use std::path::PathBuf;

use thiserror::Error;

use crate::geom::Point;

/// Errors raised while reading a map file or building a grid from it.
#[derive(Error, Debug)]
pub enum MapError {
    #[error("failed to read map file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {reason}")]
    Syntax { line: usize, reason: String },

    #[error("map file is missing the {0} line")]
    Missing(&'static str),

    #[error("grid size must be positive and at most {} cells, got {height}x{width}", crate::Grid::MAX_CELLS)]
    InvalidSize { height: i32, width: i32 },

    #[error("{what} {point} lies outside the {width}x{height} grid")]
    OutOfBounds {
        what: &'static str,
        point: Point,
        width: i32,
        height: i32,
    },

    #[error("no goal locations given")]
    NoGoals,
}

impl MapError {
    /// Whether the error means the map file itself could not be found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, MapError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

pub type Result<T> = std::result::Result<T, MapError>;
