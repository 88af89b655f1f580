#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pursuer policy that selects the next step for every autonomous pursuer.
//!
//! All pursuers share a single policy regardless of archetype. The mode only
//! changes how the final candidate is picked: pursuit minimises the Manhattan
//! distance to the player, retreat maximises it and panic picks uniformly at
//! random from the injected generator.

use maze_chase_core::{CellCoord, Direction, MazeView, Pursuer, PursuerMode};
use rand::Rng;

/// Pure system that moves pursuers according to their behaviour mode.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pursuit;

impl Pursuit {
    /// Selects the direction the pursuer should take this tick.
    ///
    /// Returns `None` only when the pursuer has no passable neighbour.
    pub fn choose_direction<R>(
        &self,
        pursuer: &Pursuer,
        target: CellCoord,
        maze: MazeView<'_>,
        rng: &mut R,
    ) -> Option<Direction>
    where
        R: Rng + ?Sized,
    {
        let candidates = candidate_moves(pursuer.cell, pursuer.facing, maze);
        match candidates.len() {
            0 => None,
            1 => candidates.get(0),
            count => match pursuer.mode {
                PursuerMode::Panicked => candidates.get(rng.gen_range(0..count)),
                PursuerMode::Pursue => {
                    select_by_distance(&candidates, pursuer.cell, target, maze, Preference::Closer)
                }
                PursuerMode::Retreat => {
                    select_by_distance(&candidates, pursuer.cell, target, maze, Preference::Farther)
                }
            },
        }
    }

    /// Moves the pursuer one cell using [`Pursuit::choose_direction`].
    ///
    /// An enclosed pursuer keeps its cell and facing.
    pub fn advance<R>(
        &self,
        pursuer: &Pursuer,
        target: CellCoord,
        maze: MazeView<'_>,
        rng: &mut R,
    ) -> Pursuer
    where
        R: Rng + ?Sized,
    {
        let Some(direction) = self.choose_direction(pursuer, target, maze, rng) else {
            return *pursuer;
        };
        let Some(destination) = maze.neighbor(pursuer.cell, direction) else {
            return *pursuer;
        };

        Pursuer {
            cell: destination,
            facing: direction,
            ..*pursuer
        }
    }
}

/// Legal directions for a pursuer, in the stable `Up, Down, Left, Right` order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Candidates {
    buffer: [Option<Direction>; 4],
    len: usize,
}

impl Candidates {
    /// Number of legal directions.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Reports whether the pursuer is enclosed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Direction stored at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Direction> {
        if index < self.len {
            self.buffer[index]
        } else {
            None
        }
    }

    /// Reports whether `direction` is among the candidates.
    #[must_use]
    pub fn contains(&self, direction: Direction) -> bool {
        self.iter().any(|candidate| candidate == direction)
    }

    /// Iterates the candidates in stable order.
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        self.buffer[..self.len].iter().flatten().copied()
    }

    fn push(&mut self, direction: Direction) {
        if self.len < self.buffer.len() {
            self.buffer[self.len] = Some(direction);
            self.len += 1;
        }
    }

    fn without(&self, excluded: Direction) -> Self {
        let mut filtered = Self::default();
        for direction in self.iter().filter(|direction| *direction != excluded) {
            filtered.push(direction);
        }
        filtered
    }
}

/// Computes the candidate move set for a pursuer standing on `cell`.
///
/// Reversal is excluded whenever more than one passable neighbour exists, so a
/// single remaining option is taken even if it reverses the pursuer.
#[must_use]
pub fn candidate_moves(cell: CellCoord, facing: Direction, maze: MazeView<'_>) -> Candidates {
    let mut legal = Candidates::default();
    for direction in Direction::ALL {
        if maze.neighbor(cell, direction).is_some() {
            legal.push(direction);
        }
    }

    if legal.len() > 1 {
        let forward = legal.without(facing.opposite());
        if !forward.is_empty() {
            return forward;
        }
    }

    legal
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Preference {
    Closer,
    Farther,
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    direction: Direction,
    distance: u32,
}

impl Candidate {
    fn is_better_than(self, other: Candidate, preference: Preference) -> bool {
        match preference {
            Preference::Closer => self.distance < other.distance,
            Preference::Farther => self.distance > other.distance,
        }
    }
}

fn select_by_distance(
    candidates: &Candidates,
    from: CellCoord,
    target: CellCoord,
    maze: MazeView<'_>,
    preference: Preference,
) -> Option<Direction> {
    let mut best: Option<Candidate> = None;

    for direction in candidates.iter() {
        let Some(destination) = maze.neighbor(from, direction) else {
            continue;
        };
        let candidate = Candidate {
            direction,
            distance: destination.manhattan_distance(target),
        };
        best = Some(match best {
            None => candidate,
            Some(existing) => {
                if candidate.is_better_than(existing, preference) {
                    candidate
                } else {
                    existing
                }
            }
        });
    }

    best.map(|candidate| candidate.direction)
}
