//! Level templates used to start new sessions.

use std::collections::BTreeSet;

use maze_chase_core::{Archetype, CellCoord, CellRect, CellRectSize, Direction, PursuerMode};

use crate::{maze::Maze, ConstructionError};

const CLASSIC_LAYOUT: [&str; 21] = [
    "###################",
    "#........#........#",
    "#.##.###.#.###.##.#",
    "#.................#",
    "#.##.#.#####.#.##.#",
    "#....#...#...#....#",
    "####.###.#.###.####",
    "...#.#.......#.#...",
    "####.#.##.##.#.####",
    ".......#...#.......",
    "####.#.#####.#.####",
    "...#.#.......#.#...",
    "####.#.#####.#.####",
    "#........#........#",
    "#.##.###.#.###.##.#",
    "#..#...........#..#",
    "##.#.#.#####.#.#.##",
    "#....#...#...#....#",
    "#.######.#.######.#",
    "#.................#",
    "###################",
];

const CLASSIC_LIVES: u32 = 3;

/// Spawn description for a single pursuer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PursuerSpawn {
    /// Cell the pursuer starts on.
    pub cell: CellCoord,
    /// Direction the pursuer initially faces.
    pub facing: Direction,
    /// Cosmetic category.
    pub archetype: Archetype,
    /// Behaviour mode the pursuer starts in.
    pub mode: PursuerMode,
}

/// Rule that decides where dots are placed when a session starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DotRule {
    /// Place a dot on every open cell except the excluded regions, the player
    /// spawn and the power item cells.
    Generated {
        /// Regions that never receive dots.
        excluded: Vec<CellRect>,
    },
    /// Place dots exactly on the listed cells.
    Explicit(Vec<CellCoord>),
}

/// Template from which a session is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelConfig {
    /// Maze rows from top to bottom; `#` marks walls.
    pub layout: Vec<String>,
    /// Cell the player starts on and respawns to.
    pub player_spawn: CellCoord,
    /// Facing the player starts with and respawns with.
    pub player_facing: Direction,
    /// Pursuers in the order they are updated each tick.
    pub pursuers: Vec<PursuerSpawn>,
    /// Cell consumed pursuers are returned to.
    pub den: CellCoord,
    /// Dot placement rule.
    pub dots: DotRule,
    /// Power item cells.
    pub power_items: Vec<CellCoord>,
    /// Lives the player starts with.
    pub lives: u32,
    /// Level number reported by the session.
    pub level: u32,
}

impl LevelConfig {
    /// The classic 19 by 21 level with four pursuers.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            layout: CLASSIC_LAYOUT.iter().map(|row| (*row).to_owned()).collect(),
            player_spawn: CellCoord::new(9, 15),
            player_facing: Direction::Right,
            pursuers: vec![
                PursuerSpawn {
                    cell: CellCoord::new(8, 9),
                    facing: Direction::Right,
                    archetype: Archetype::A,
                    mode: PursuerMode::Pursue,
                },
                PursuerSpawn {
                    cell: CellCoord::new(9, 9),
                    facing: Direction::Up,
                    archetype: Archetype::B,
                    mode: PursuerMode::Retreat,
                },
                PursuerSpawn {
                    cell: CellCoord::new(10, 9),
                    facing: Direction::Left,
                    archetype: Archetype::C,
                    mode: PursuerMode::Retreat,
                },
                PursuerSpawn {
                    cell: CellCoord::new(9, 8),
                    facing: Direction::Down,
                    archetype: Archetype::D,
                    mode: PursuerMode::Retreat,
                },
            ],
            den: CellCoord::new(9, 9),
            dots: DotRule::Generated {
                excluded: vec![CellRect::from_origin_and_size(
                    CellCoord::new(8, 8),
                    CellRectSize::new(3, 3),
                )],
            },
            power_items: vec![
                CellCoord::new(1, 3),
                CellCoord::new(17, 3),
                CellCoord::new(1, 17),
                CellCoord::new(17, 17),
            ],
            lives: CLASSIC_LIVES,
            level: 1,
        }
    }
}

/// Validated placement derived from a level template.
#[derive(Debug)]
pub(crate) struct Placement {
    pub(crate) pursuer_count: u32,
    pub(crate) dots: BTreeSet<CellCoord>,
    pub(crate) power_items: BTreeSet<CellCoord>,
}

/// Checks every configured cell against the maze and resolves the dot rule.
pub(crate) fn validate(
    config: &LevelConfig,
    maze: &Maze,
) -> Result<Placement, ConstructionError> {
    if config.lives == 0 {
        return Err(ConstructionError::NoLives);
    }
    if config.level == 0 {
        return Err(ConstructionError::InvalidLevel);
    }

    let pursuer_count = pursuer_count(config.pursuers.len())?;

    require_open(maze, "player spawn", config.player_spawn)?;
    require_open(maze, "den", config.den)?;
    for spawn in &config.pursuers {
        require_open(maze, "pursuer spawn", spawn.cell)?;
    }

    let mut power_items = BTreeSet::new();
    for &cell in &config.power_items {
        require_open(maze, "power item", cell)?;
        let _ = power_items.insert(cell);
    }

    let dots = match &config.dots {
        DotRule::Generated { excluded } => maze
            .open_cells()
            .filter(|cell| !excluded.iter().any(|region| region.contains(*cell)))
            .filter(|cell| *cell != config.player_spawn)
            .filter(|cell| !power_items.contains(cell))
            .collect(),
        DotRule::Explicit(cells) => {
            let mut dots = BTreeSet::new();
            for &cell in cells {
                require_open(maze, "dot", cell)?;
                if power_items.contains(&cell) {
                    return Err(ConstructionError::OverlappingCollectibles { cell });
                }
                let _ = dots.insert(cell);
            }
            dots
        }
    };

    Ok(Placement {
        pursuer_count,
        dots,
        power_items,
    })
}

/// Number of pursuers as an id range; every id must fit a `PursuerId`.
fn pursuer_count(count: usize) -> Result<u32, ConstructionError> {
    u32::try_from(count).map_err(|_| ConstructionError::TooManyPursuers { count })
}

fn require_open(
    maze: &Maze,
    what: &'static str,
    cell: CellCoord,
) -> Result<(), ConstructionError> {
    if !maze.contains(cell) {
        return Err(ConstructionError::OutOfBounds { what, cell });
    }
    if !maze.view().is_passable(cell) {
        return Err(ConstructionError::BlockedCell { what, cell });
    }
    Ok(())
}
