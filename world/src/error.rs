//! Errors raised while building a session from a level template.

use maze_chase_core::CellCoord;
use thiserror::Error;

/// Reasons a [`crate::LevelConfig`] cannot be turned into a session.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConstructionError {
    /// The layout contains no cells.
    #[error("maze layout is empty")]
    EmptyLayout,
    /// A layout row differs in length from the first row.
    #[error("maze row {row} has {found} cells, expected {expected}")]
    RaggedLayout {
        /// Zero-based index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// A layout cell uses a glyph that is neither a wall nor open floor.
    #[error("unknown glyph {glyph:?} at column {column}, row {row}")]
    UnknownGlyph {
        /// Zero-based row of the glyph.
        row: usize,
        /// Zero-based column of the glyph.
        column: usize,
        /// Offending character.
        glyph: char,
    },
    /// A configured cell lies outside the maze.
    #[error("{what} at {cell} lies outside the maze")]
    OutOfBounds {
        /// Description of the configured entity.
        what: &'static str,
        /// Configured cell.
        cell: CellCoord,
    },
    /// A configured cell is a wall.
    #[error("{what} at {cell} is inside a wall")]
    BlockedCell {
        /// Description of the configured entity.
        what: &'static str,
        /// Configured cell.
        cell: CellCoord,
    },
    /// A cell was configured to hold both a dot and a power item.
    #[error("cell {cell} holds both a dot and a power item")]
    OverlappingCollectibles {
        /// Shared cell.
        cell: CellCoord,
    },
    /// More pursuers than can be given distinct ids.
    #[error("{count} pursuers exceed the id range")]
    TooManyPursuers {
        /// Configured number of pursuers.
        count: usize,
    },
    /// The session would start without lives.
    #[error("a session needs at least one life")]
    NoLives,
    /// Levels are numbered from one.
    #[error("level numbers start at 1")]
    InvalidLevel,
}
