//! ASCII rendering of a session snapshot.

use maze_chase_core::{Archetype, CellCoord, CellKind, PursuerMode};
use maze_chase_world::{query, Session};

const PLAYER_GLYPH: char = '@';
const DOT_GLYPH: char = '.';
const POWER_ITEM_GLYPH: char = 'o';
const FLOOR_GLYPH: char = ' ';

/// Draws the maze with collectibles and agents, one text line per row.
///
/// Pursuers are drawn by archetype letter, lowercase while panicked. The
/// player wins over a pursuer on the same cell so it stays visible when caught.
pub(crate) fn render(session: &Session) -> String {
    let view = query::maze(session).view();
    let (columns, rows) = view.dimensions();

    let mut lines = Vec::new();
    for row in 0..rows {
        let line: String = (0..columns)
            .map(|column| {
                let cell = CellCoord::new(column, row);
                glyph_at(session, view.cell_kind(cell), cell)
            })
            .collect();
        lines.push(line);
    }
    lines.join("\n")
}

fn glyph_at(session: &Session, kind: Option<CellKind>, cell: CellCoord) -> char {
    if query::player(session).cell == cell {
        return PLAYER_GLYPH;
    }
    if let Some(pursuer) = query::pursuers(session)
        .iter()
        .find(|pursuer| pursuer.cell == cell)
    {
        let letter = match pursuer.archetype {
            Archetype::A => 'A',
            Archetype::B => 'B',
            Archetype::C => 'C',
            Archetype::D => 'D',
        };
        return if pursuer.mode == PursuerMode::Panicked {
            letter.to_ascii_lowercase()
        } else {
            letter
        };
    }
    if query::power_items(session).contains(&cell) {
        return POWER_ITEM_GLYPH;
    }
    if query::dots(session).contains(&cell) {
        return DOT_GLYPH;
    }
    match kind {
        Some(CellKind::Wall) => maze_chase_world::WALL_GLYPH,
        _ => FLOOR_GLYPH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_world::{new_session, LevelConfig};

    #[test]
    fn classic_board_shows_agents_and_items() {
        let session = new_session(&LevelConfig::classic()).expect("classic level is valid");

        let board = render(&session);
        let lines: Vec<&str> = board.lines().collect();

        assert_eq!(lines.len(), 21);
        assert!(lines.iter().all(|line| line.chars().count() == 19));
        assert_eq!(lines[0], "###################");
        assert_eq!(lines[15].chars().nth(9), Some(PLAYER_GLYPH));
        assert_eq!(lines[3].chars().nth(1), Some(POWER_ITEM_GLYPH));
        assert_eq!(lines[9].chars().nth(8), Some('A'));
        assert_eq!(lines[8].chars().nth(9), Some('D'));
        assert_eq!(lines[1].chars().nth(1), Some(DOT_GLYPH));
    }
}
