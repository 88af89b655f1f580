#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Chase engine.
//!
//! This crate defines the value types that connect the authoritative session,
//! the pure movement and pursuit systems, and adapters. The session advances
//! one tick at a time, producing a fresh snapshot and broadcasting [`Event`]
//! values that describe what happened during the tick. Systems only ever read
//! the maze through a borrowed [`MazeView`] and answer with new agent values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Chase.";

/// Points awarded for collecting a dot.
pub const DOT_REWARD: u32 = 10;

/// Points awarded for collecting a power item.
pub const POWER_ITEM_REWARD: u32 = 50;

/// Points awarded for consuming a pursuer while power mode is active.
pub const PURSUER_BOUNTY: u32 = 200;

/// Number of ticks power mode lasts after a power item is collected.
pub const POWER_MODE_TICKS: u32 = 20;

/// Number of frames in the player's cosmetic animation cycle.
pub const PLAYER_ANIMATION_FRAMES: u8 = 4;

/// Cardinal movement directions available to every agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in the stable order used to enumerate candidate moves.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit column and row delta applied when moving one cell in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Cell reached by moving one unit in `direction`.
    ///
    /// Returns `None` when the move would leave the non-negative quadrant. The
    /// upper bounds are not known here; callers validate the result against a
    /// [`MazeView`].
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        let (column_delta, row_delta) = direction.delta();
        let column = self.column.checked_add_signed(column_delta)?;
        let row = self.row.checked_add_signed(row_delta)?;
        Some(Self::new(column, row))
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Axis-aligned rectangle expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    origin: CellCoord,
    size: CellRectSize,
}

impl CellRect {
    /// Constructs a rectangle from an origin cell and size.
    #[must_use]
    pub const fn from_origin_and_size(origin: CellCoord, size: CellRectSize) -> Self {
        Self { origin, size }
    }

    /// Reports whether the cell lies inside the rectangle.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        match (
            cell.column().checked_sub(self.origin.column()),
            cell.row().checked_sub(self.origin.row()),
        ) {
            (Some(column_offset), Some(row_offset)) => {
                column_offset < self.size.width() && row_offset < self.size.height()
            }
            _ => false,
        }
    }
}

/// Size of a [`CellRect`] measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRectSize {
    width: u32,
    height: u32,
}

impl CellRectSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width of the rectangle in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the rectangle in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }
}

/// Kind of terrain occupying a maze cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Traversable floor.
    #[default]
    Open,
    /// Impassable wall.
    Wall,
}

/// Read-only view into the dense, row-major maze grid.
#[derive(Clone, Copy, Debug)]
pub struct MazeView<'a> {
    cells: &'a [CellKind],
    columns: u32,
    rows: u32,
}

impl<'a> MazeView<'a> {
    /// Captures a new maze view backed by the provided cell slice.
    #[must_use]
    pub fn new(cells: &'a [CellKind], columns: u32, rows: u32) -> Self {
        Self {
            cells,
            columns,
            rows,
        }
    }

    /// Provides the dimensions of the underlying grid as `(columns, rows)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Returns the kind of the cell, or `None` when it lies outside the grid.
    #[must_use]
    pub fn cell_kind(&self, cell: CellCoord) -> Option<CellKind> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether an agent may occupy the cell.
    ///
    /// Cells outside the grid are never passable.
    #[must_use]
    pub fn is_passable(&self, cell: CellCoord) -> bool {
        self.cell_kind(cell) == Some(CellKind::Open)
    }

    /// Passable cell adjacent to `cell` in `direction`, if any.
    #[must_use]
    pub fn neighbor(&self, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
        cell.step(direction)
            .filter(|destination| self.is_passable(*destination))
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// State of the player-controlled agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// Grid cell currently occupied by the player.
    pub cell: CellCoord,
    /// Committed direction of travel.
    pub facing: Direction,
    /// Buffered intent applied as soon as the turn becomes legal.
    pub requested_facing: Direction,
    /// Cosmetic animation frame, advanced whenever the player moves.
    pub animation_phase: u8,
}

impl Player {
    /// Creates a player standing at `cell` with matching facing and request.
    #[must_use]
    pub const fn spawned_at(cell: CellCoord, facing: Direction) -> Self {
        Self {
            cell,
            facing,
            requested_facing: facing,
            animation_phase: 0,
        }
    }
}

/// Unique identifier assigned to a pursuer; equals its index in spawn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PursuerId(u32);

impl PursuerId {
    /// Creates a new pursuer identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Cosmetic pursuer category. Has no effect on movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// First archetype (red in the classic palette).
    A,
    /// Second archetype (pink in the classic palette).
    B,
    /// Third archetype (cyan in the classic palette).
    C,
    /// Fourth archetype (orange in the classic palette).
    D,
}

/// Behaviour mode that drives a pursuer's choice of direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PursuerMode {
    /// Minimise the Manhattan distance to the player.
    Pursue,
    /// Maximise the Manhattan distance to the player.
    Retreat,
    /// Pick uniformly among the legal moves.
    Panicked,
}

/// State of a single autonomous pursuer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pursuer {
    /// Identifier that is stable for the lifetime of the session.
    pub id: PursuerId,
    /// Grid cell currently occupied by the pursuer.
    pub cell: CellCoord,
    /// Direction the pursuer last moved in.
    pub facing: Direction,
    /// Cosmetic category.
    pub archetype: Archetype,
    /// Current behaviour mode.
    pub mode: PursuerMode,
}

/// Lifecycle status of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    /// The simulation advances on every step.
    Active,
    /// The driver suspended the simulation.
    Paused,
    /// The player ran out of lives. Terminal.
    Lost,
    /// Every collectible was gathered. Terminal.
    LevelCleared,
}

impl SessionStatus {
    /// Reports whether the status ends the session.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Lost | Self::LevelCleared)
    }
}

/// Events broadcast by the session while advancing a tick.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// Indicates that an active tick began.
    TickAdvanced {
        /// Index of the tick, starting at one for the first step.
        tick: u64,
    },
    /// Power mode ran out and every pursuer resumed pursuit.
    PowerModeExpired,
    /// The player committed a buffered turn.
    PlayerTurned {
        /// Direction the player now faces.
        facing: Direction,
    },
    /// The player advanced between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after moving.
        to: CellCoord,
    },
    /// The player collected a dot.
    DotCollected {
        /// Cell the dot occupied.
        cell: CellCoord,
    },
    /// The player collected a power item and power mode began.
    PowerItemCollected {
        /// Cell the power item occupied.
        cell: CellCoord,
    },
    /// A pursuer advanced between two cells.
    PursuerMoved {
        /// Identifier of the pursuer that moved.
        pursuer: PursuerId,
        /// Cell the pursuer occupied before moving.
        from: CellCoord,
        /// Cell the pursuer occupies after moving.
        to: CellCoord,
    },
    /// The player consumed a pursuer during power mode.
    PursuerConsumed {
        /// Identifier of the consumed pursuer.
        pursuer: PursuerId,
        /// Den cell the pursuer was returned to.
        den: CellCoord,
    },
    /// A pursuer caught the player.
    LifeLost {
        /// Lives left after the deduction.
        remaining: u32,
    },
    /// The session status changed.
    StatusChanged {
        /// Status that became active.
        status: SessionStatus,
    },
}
