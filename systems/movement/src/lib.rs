#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic steering system that turns and advances the player.

use maze_chase_core::{MazeView, Player, PLAYER_ANIMATION_FRAMES};

/// Outcome of advancing the player by a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerStep {
    /// Player state after the tick.
    pub player: Player,
    /// Indicates whether the buffered turn was committed.
    pub turned: bool,
    /// Indicates whether the player left its cell.
    pub moved: bool,
}

/// Pure system that applies the corner-turn steering rules to the player.
#[derive(Clone, Copy, Debug, Default)]
pub struct Movement;

impl Movement {
    /// Attempts the buffered turn, then attempts to advance one cell.
    ///
    /// A turn is committed only when the cell in the requested direction is
    /// passable. A blocked advance leaves the player in place and is not
    /// remembered for later ticks.
    #[must_use]
    pub fn advance(&self, player: Player, maze: MazeView<'_>) -> PlayerStep {
        let mut next = player;
        let mut turned = false;

        if next.requested_facing != next.facing
            && maze.neighbor(next.cell, next.requested_facing).is_some()
        {
            next.facing = next.requested_facing;
            turned = true;
        }

        let moved = match maze.neighbor(next.cell, next.facing) {
            Some(destination) => {
                next.cell = destination;
                next.animation_phase =
                    (next.animation_phase % PLAYER_ANIMATION_FRAMES + 1) % PLAYER_ANIMATION_FRAMES;
                true
            }
            None => false,
        };

        PlayerStep {
            player: next,
            turned,
            moved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_core::{CellCoord, CellKind, Direction};

    fn corridor() -> Vec<CellKind> {
        use CellKind::{Open, Wall};
        vec![
            Wall, Wall, Wall, Wall, //
            Wall, Open, Open, Wall, //
            Wall, Wall, Wall, Wall,
        ]
    }

    #[test]
    fn animation_phase_wraps_after_full_cycle() {
        let cells = corridor();
        let maze = MazeView::new(&cells, 4, 3);
        let mut player = Player::spawned_at(CellCoord::new(1, 1), Direction::Right);
        player.animation_phase = PLAYER_ANIMATION_FRAMES - 1;

        let step = Movement.advance(player, maze);

        assert!(step.moved);
        assert_eq!(step.player.animation_phase, 0);
    }

    #[test]
    fn blocked_advance_keeps_animation_phase() {
        let cells = corridor();
        let maze = MazeView::new(&cells, 4, 3);
        let mut player = Player::spawned_at(CellCoord::new(2, 1), Direction::Right);
        player.animation_phase = 2;

        let step = Movement.advance(player, maze);

        assert!(!step.moved);
        assert!(!step.turned);
        assert_eq!(step.player, player);
    }
}
