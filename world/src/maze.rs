//! Immutable maze grid owned by a session.

use maze_chase_core::{CellCoord, CellKind, MazeView};
use serde::Serialize;

use crate::ConstructionError;

/// Glyph that marks an impassable cell in a textual layout.
pub const WALL_GLYPH: char = '#';

/// Dense, row-major maze grid that never changes after construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Maze {
    columns: u32,
    rows: u32,
    cells: Vec<CellKind>,
}

impl Maze {
    /// Parses a rectangular layout where `#` marks walls and `.` or a space
    /// marks open floor. Rows are indexed top to bottom.
    pub fn parse<S>(layout: &[S]) -> Result<Self, ConstructionError>
    where
        S: AsRef<str>,
    {
        let Some(first) = layout.first() else {
            return Err(ConstructionError::EmptyLayout);
        };
        let expected = first.as_ref().chars().count();
        if expected == 0 {
            return Err(ConstructionError::EmptyLayout);
        }

        let mut cells = Vec::with_capacity(expected * layout.len());
        for (row, line) in layout.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != expected {
                return Err(ConstructionError::RaggedLayout {
                    row,
                    expected,
                    found,
                });
            }

            for (column, glyph) in line.chars().enumerate() {
                let kind = match glyph {
                    WALL_GLYPH => CellKind::Wall,
                    '.' | ' ' => CellKind::Open,
                    other => {
                        return Err(ConstructionError::UnknownGlyph {
                            row,
                            column,
                            glyph: other,
                        })
                    }
                };
                cells.push(kind);
            }
        }

        let columns = u32::try_from(expected).map_err(|_| ConstructionError::EmptyLayout)?;
        let rows = u32::try_from(layout.len()).map_err(|_| ConstructionError::EmptyLayout)?;
        Ok(Self {
            columns,
            rows,
            cells,
        })
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Borrows a read-only view suitable for the movement systems.
    #[must_use]
    pub fn view(&self) -> MazeView<'_> {
        MazeView::new(&self.cells, self.columns, self.rows)
    }

    /// Enumerates every open cell in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        let columns = self.columns;
        (0..self.rows)
            .flat_map(move |row| (0..columns).map(move |column| CellCoord::new(column, row)))
            .filter(move |cell| self.view().is_passable(*cell))
    }

    pub(crate) fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }
}
