#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state management for Maze Chase.
//!
//! A [`Session`] is never mutated through the public API. Drivers call
//! [`step`] once per tick and receive a fresh session value, so the previous
//! snapshot can be kept around for rendering or comparison. Randomness is
//! injected by the caller, which keeps every run reproducible from its seed.

mod error;
mod level;
mod maze;

use std::{collections::BTreeSet, sync::Arc};

use log::{debug, trace};
use maze_chase_core::{
    CellCoord, Direction, Event, Player, Pursuer, PursuerId, PursuerMode, SessionStatus,
    DOT_REWARD, POWER_ITEM_REWARD, POWER_MODE_TICKS, PURSUER_BOUNTY, WELCOME_BANNER,
};
use maze_chase_system_movement::Movement;
use maze_chase_system_pursuit::Pursuit;
use rand::Rng;
use serde::Serialize;

pub use error::ConstructionError;
pub use level::{DotRule, LevelConfig, PursuerSpawn};
pub use maze::{Maze, WALL_GLYPH};

/// Snapshot of a running game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Session {
    banner: &'static str,
    maze: Arc<Maze>,
    player_spawn: CellCoord,
    player_facing: Direction,
    den: CellCoord,
    player: Player,
    pursuers: Vec<Pursuer>,
    dots: BTreeSet<CellCoord>,
    power_items: BTreeSet<CellCoord>,
    score: u32,
    lives: u32,
    level: u32,
    power_mode_active: bool,
    power_ticks_remaining: u32,
    status: SessionStatus,
    tick: u64,
}

impl Session {
    fn decay_power_mode(&mut self, out_events: &mut Vec<Event>) {
        if !self.power_mode_active {
            return;
        }

        self.power_ticks_remaining = self.power_ticks_remaining.saturating_sub(1);
        if self.power_ticks_remaining == 0 {
            self.power_mode_active = false;
            self.set_pursuer_modes(PursuerMode::Pursue);
            out_events.push(Event::PowerModeExpired);
            debug!("power mode expired on tick {}", self.tick);
        }
    }

    fn advance_player(&mut self, intent: Option<Direction>, out_events: &mut Vec<Event>) {
        if let Some(direction) = intent {
            self.player.requested_facing = direction;
        }

        let from = self.player.cell;
        let step = Movement.advance(self.player, self.maze.view());
        self.player = step.player;

        if step.turned {
            out_events.push(Event::PlayerTurned {
                facing: self.player.facing,
            });
        }
        if step.moved {
            trace!("player moved {from} -> {}", self.player.cell);
            out_events.push(Event::PlayerMoved {
                from,
                to: self.player.cell,
            });
        }
    }

    fn collect_items(&mut self, out_events: &mut Vec<Event>) {
        let cell = self.player.cell;

        if self.dots.remove(&cell) {
            self.score = self.score.saturating_add(DOT_REWARD);
            out_events.push(Event::DotCollected { cell });
        }

        if self.power_items.remove(&cell) {
            self.score = self.score.saturating_add(POWER_ITEM_REWARD);
            self.power_mode_active = true;
            self.power_ticks_remaining = POWER_MODE_TICKS;
            self.set_pursuer_modes(PursuerMode::Panicked);
            out_events.push(Event::PowerItemCollected { cell });
            debug!("power mode started at {cell} on tick {}", self.tick);
        }
    }

    fn advance_pursuers<R>(&mut self, rng: &mut R, out_events: &mut Vec<Event>)
    where
        R: Rng + ?Sized,
    {
        let view = self.maze.view();
        let target = self.player.cell;

        for pursuer in &mut self.pursuers {
            let from = pursuer.cell;
            *pursuer = Pursuit.advance(pursuer, target, view, rng);
            if pursuer.cell != from {
                trace!("pursuer {} moved {from} -> {}", pursuer.id.get(), pursuer.cell);
                out_events.push(Event::PursuerMoved {
                    pursuer: pursuer.id,
                    from,
                    to: pursuer.cell,
                });
            }
        }
    }

    fn resolve_collisions(&mut self, out_events: &mut Vec<Event>) {
        let player_cell = self.player.cell;
        let mut caught = false;

        for pursuer in &mut self.pursuers {
            if pursuer.cell != player_cell {
                continue;
            }

            if self.power_mode_active {
                self.score = self.score.saturating_add(PURSUER_BOUNTY);
                pursuer.cell = self.den;
                pursuer.mode = PursuerMode::Retreat;
                out_events.push(Event::PursuerConsumed {
                    pursuer: pursuer.id,
                    den: self.den,
                });
                debug!("pursuer {} consumed at {player_cell}", pursuer.id.get());
            } else {
                caught = true;
            }
        }

        if !caught {
            return;
        }

        self.lives = self.lives.saturating_sub(1);
        out_events.push(Event::LifeLost {
            remaining: self.lives,
        });
        debug!("player caught at {player_cell}, {} lives left", self.lives);

        if self.lives == 0 {
            self.transition(SessionStatus::Lost, out_events);
        } else {
            self.player = Player::spawned_at(self.player_spawn, self.player_facing);
        }
    }

    fn evaluate_status(&mut self, out_events: &mut Vec<Event>) {
        if self.dots.is_empty() && self.power_items.is_empty() {
            self.transition(SessionStatus::LevelCleared, out_events);
        }
    }

    fn transition(&mut self, status: SessionStatus, out_events: &mut Vec<Event>) {
        if self.status == status {
            return;
        }
        debug!("session status {:?} -> {status:?} on tick {}", self.status, self.tick);
        self.status = status;
        out_events.push(Event::StatusChanged { status });
    }

    fn set_pursuer_modes(&mut self, mode: PursuerMode) {
        for pursuer in &mut self.pursuers {
            pursuer.mode = mode;
        }
    }
}

/// Builds the opening snapshot of a session from a level template.
///
/// Every configured cell is validated up front so that no malformed template
/// can surface as a corrupt step later on.
pub fn new_session(config: &LevelConfig) -> Result<Session, ConstructionError> {
    let maze = Maze::parse(config.layout.as_slice())?;
    let placement = level::validate(config, &maze)?;

    let pursuers = (0..placement.pursuer_count)
        .zip(&config.pursuers)
        .map(|(index, spawn)| Pursuer {
            id: PursuerId::new(index),
            cell: spawn.cell,
            facing: spawn.facing,
            archetype: spawn.archetype,
            mode: spawn.mode,
        })
        .collect::<Vec<_>>();

    debug!(
        "new session: {}x{} maze, {} pursuers, {} dots, {} power items",
        maze.columns(),
        maze.rows(),
        pursuers.len(),
        placement.dots.len(),
        placement.power_items.len()
    );

    Ok(Session {
        banner: WELCOME_BANNER,
        maze: Arc::new(maze),
        player_spawn: config.player_spawn,
        player_facing: config.player_facing,
        den: config.den,
        player: Player::spawned_at(config.player_spawn, config.player_facing),
        pursuers,
        dots: placement.dots,
        power_items: placement.power_items,
        score: 0,
        lives: config.lives,
        level: config.level,
        power_mode_active: false,
        power_ticks_remaining: 0,
        status: SessionStatus::Active,
        tick: 0,
    })
}

/// Advances the session by one tick and returns the resulting snapshot.
///
/// `intent` replaces the player's buffered direction when present. Sessions
/// that are not [`SessionStatus::Active`] are returned unchanged and no events
/// are emitted. Otherwise the tick runs power-mode decay, player movement,
/// collection, pursuer movement, collision resolution and status evaluation in
/// that order, appending an [`Event`] for everything that happened.
pub fn step<R>(
    session: &Session,
    intent: Option<Direction>,
    rng: &mut R,
    out_events: &mut Vec<Event>,
) -> Session
where
    R: Rng + ?Sized,
{
    let mut next = session.clone();
    if next.status != SessionStatus::Active {
        return next;
    }

    next.tick = next.tick.saturating_add(1);
    out_events.push(Event::TickAdvanced { tick: next.tick });

    next.decay_power_mode(out_events);
    next.advance_player(intent, out_events);
    next.collect_items(out_events);
    next.advance_pursuers(rng, out_events);
    next.resolve_collisions(out_events);
    next.evaluate_status(out_events);
    next
}

/// Suspends an active session. Other statuses are returned unchanged.
#[must_use]
pub fn pause(session: &Session) -> Session {
    let mut next = session.clone();
    if next.status == SessionStatus::Active {
        next.status = SessionStatus::Paused;
    }
    next
}

/// Resumes a paused session. Other statuses are returned unchanged.
#[must_use]
pub fn resume(session: &Session) -> Session {
    let mut next = session.clone();
    if next.status == SessionStatus::Paused {
        next.status = SessionStatus::Active;
    }
    next
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use std::collections::BTreeSet;

    use super::{Maze, Session};
    use maze_chase_core::{CellCoord, Player, Pursuer, SessionStatus};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(session: &Session) -> &'static str {
        session.banner
    }

    /// Provides read-only access to the maze.
    #[must_use]
    pub fn maze(session: &Session) -> &Maze {
        &session.maze
    }

    /// Current player state.
    #[must_use]
    pub fn player(session: &Session) -> &Player {
        &session.player
    }

    /// Pursuers in update order.
    #[must_use]
    pub fn pursuers(session: &Session) -> &[Pursuer] {
        &session.pursuers
    }

    /// Cells that still hold a dot.
    #[must_use]
    pub fn dots(session: &Session) -> &BTreeSet<CellCoord> {
        &session.dots
    }

    /// Cells that still hold a power item.
    #[must_use]
    pub fn power_items(session: &Session) -> &BTreeSet<CellCoord> {
        &session.power_items
    }

    /// Cell consumed pursuers are returned to.
    #[must_use]
    pub fn den(session: &Session) -> CellCoord {
        session.den
    }

    /// Points scored so far.
    #[must_use]
    pub fn score(session: &Session) -> u32 {
        session.score
    }

    /// Lives left.
    #[must_use]
    pub fn lives(session: &Session) -> u32 {
        session.lives
    }

    /// Level number from the template.
    #[must_use]
    pub fn level(session: &Session) -> u32 {
        session.level
    }

    /// Reports whether power mode is active.
    #[must_use]
    pub fn power_mode_active(session: &Session) -> bool {
        session.power_mode_active
    }

    /// Ticks left before power mode expires; zero when inactive.
    #[must_use]
    pub fn power_ticks_remaining(session: &Session) -> u32 {
        session.power_ticks_remaining
    }

    /// Current lifecycle status.
    #[must_use]
    pub fn status(session: &Session) -> SessionStatus {
        session.status
    }

    /// Number of active ticks simulated so far.
    #[must_use]
    pub fn tick(session: &Session) -> u64 {
        session.tick
    }

    /// Reports whether the session has ended.
    #[must_use]
    pub fn is_terminal(session: &Session) -> bool {
        session.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_core::{Archetype, PursuerMode};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const LOOP: [&str; 5] = [
        "#######", //
        "#.....#", //
        "#.###.#", //
        "#.....#", //
        "#######",
    ];

    fn loop_config() -> LevelConfig {
        LevelConfig {
            layout: LOOP.iter().map(|row| (*row).to_owned()).collect(),
            player_spawn: CellCoord::new(1, 1),
            player_facing: Direction::Right,
            pursuers: vec![
                PursuerSpawn {
                    cell: CellCoord::new(5, 3),
                    facing: Direction::Left,
                    archetype: Archetype::A,
                    mode: PursuerMode::Pursue,
                },
                PursuerSpawn {
                    cell: CellCoord::new(1, 3),
                    facing: Direction::Right,
                    archetype: Archetype::B,
                    mode: PursuerMode::Retreat,
                },
            ],
            den: CellCoord::new(3, 3),
            dots: DotRule::Explicit(vec![CellCoord::new(5, 1)]),
            power_items: vec![CellCoord::new(5, 2)],
            lives: 3,
            level: 1,
        }
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(0x5eed)
    }

    #[test]
    fn power_mode_expires_on_the_tick_it_reaches_zero() {
        let mut session = new_session(&loop_config()).expect("valid level");
        session.power_mode_active = true;
        session.power_ticks_remaining = 1;
        session.set_pursuer_modes(PursuerMode::Panicked);
        let mut events = Vec::new();

        let next = step(&session, None, &mut rng(), &mut events);

        assert!(!next.power_mode_active);
        assert_eq!(next.power_ticks_remaining, 0);
        assert!(next
            .pursuers
            .iter()
            .all(|pursuer| pursuer.mode == PursuerMode::Pursue));
        assert!(events.contains(&Event::PowerModeExpired));
    }

    #[test]
    fn power_mode_decays_without_collection() {
        let mut session = new_session(&loop_config()).expect("valid level");
        session.power_mode_active = true;
        session.power_ticks_remaining = 5;
        let mut events = Vec::new();

        let next = step(&session, None, &mut rng(), &mut events);

        assert!(next.power_mode_active);
        assert_eq!(next.power_ticks_remaining, 4);
        assert!(!events.contains(&Event::PowerModeExpired));
    }

    #[test]
    fn consumed_pursuer_returns_to_den_in_retreat() {
        let mut session = new_session(&loop_config()).expect("valid level");
        session.power_mode_active = true;
        session.power_ticks_remaining = 10;
        session.set_pursuer_modes(PursuerMode::Panicked);
        // Head-on in the top corridor: the pursuer can only come toward the player.
        session.player = Player::spawned_at(CellCoord::new(2, 1), Direction::Right);
        session.pursuers[0].cell = CellCoord::new(4, 1);
        session.pursuers[0].facing = Direction::Left;
        let mut events = Vec::new();

        let next = step(&session, None, &mut rng(), &mut events);

        assert_eq!(next.player.cell, CellCoord::new(3, 1));
        assert_eq!(next.pursuers[0].cell, CellCoord::new(3, 3));
        assert_eq!(next.pursuers[0].mode, PursuerMode::Retreat);
        assert_eq!(next.score, session.score + PURSUER_BOUNTY);
        assert_eq!(next.lives, session.lives);
        assert!(events.contains(&Event::PursuerConsumed {
            pursuer: PursuerId::new(0),
            den: CellCoord::new(3, 3),
        }));
    }

    #[test]
    fn caught_player_respawns_and_pursuers_stay() {
        let mut session = new_session(&loop_config()).expect("valid level");
        session.player = Player::spawned_at(CellCoord::new(2, 1), Direction::Right);
        session.pursuers[0].cell = CellCoord::new(4, 1);
        session.pursuers[0].facing = Direction::Left;
        let mut events = Vec::new();

        let next = step(&session, None, &mut rng(), &mut events);

        assert_eq!(next.lives, 2);
        assert_eq!(next.status, SessionStatus::Active);
        assert_eq!(next.player, Player::spawned_at(CellCoord::new(1, 1), Direction::Right));
        assert_eq!(next.pursuers[0].cell, CellCoord::new(3, 1));
    }

    #[test]
    fn step_leaves_the_input_snapshot_untouched() {
        let session = new_session(&loop_config()).expect("valid level");
        let before = session.clone();
        let mut events = Vec::new();

        let _next = step(&session, Some(Direction::Down), &mut rng(), &mut events);

        assert_eq!(session, before);
    }

    #[test]
    fn terminal_sessions_do_not_advance() {
        let mut session = new_session(&loop_config()).expect("valid level");
        session.status = SessionStatus::Lost;
        let mut events = Vec::new();

        let next = step(&session, Some(Direction::Down), &mut rng(), &mut events);

        assert_eq!(next, session);
        assert!(events.is_empty());
    }
}
