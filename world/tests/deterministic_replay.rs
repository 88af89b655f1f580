use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use maze_chase_core::{Direction, Event, SessionStatus};
use maze_chase_system_analytics::Analytics;
use maze_chase_world::{self as world, new_session, query, LevelConfig, Session};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const TICKS: usize = 400;

#[test]
fn deterministic_replay_produces_identical_runs() {
    let first = replay(0x00c0_ffee, scripted_intents());
    let second = replay(0x00c0_ffee, scripted_intents());

    assert_eq!(first.session, second.session, "replay diverged between runs");
    assert_eq!(first.events, second.events, "event log diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[test]
fn analytics_score_matches_session_score() {
    let outcome = replay(7, scripted_intents());

    let mut analytics = Analytics::new();
    analytics.handle(&outcome.events);
    let report = analytics.report();

    assert_eq!(report.score_awarded, query::score(&outcome.session));
    assert_eq!(report.ticks, query::tick(&outcome.session));
    let lives_lost = 3 - query::lives(&outcome.session);
    assert_eq!(report.lives_lost, lives_lost);
    if query::status(&outcome.session) != SessionStatus::Active {
        assert_eq!(report.final_status, Some(query::status(&outcome.session)));
    }
}

struct ReplayOutcome {
    session: Session,
    events: Vec<Event>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.events.len().hash(&mut hasher);
        query::score(&self.session).hash(&mut hasher);
        query::tick(&self.session).hash(&mut hasher);
        query::player(&self.session).cell.hash(&mut hasher);
        for pursuer in query::pursuers(&self.session) {
            pursuer.cell.hash(&mut hasher);
        }
        hasher.finish()
    }
}

fn replay(seed: u64, intents: Vec<Option<Direction>>) -> ReplayOutcome {
    let mut session = new_session(&LevelConfig::classic()).expect("classic level is valid");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut log = Vec::new();

    for intent in intents {
        let mut events = Vec::new();
        session = world::step(&session, intent, &mut rng, &mut events);
        log.extend(events);
    }

    ReplayOutcome {
        session,
        events: log,
    }
}

fn scripted_intents() -> Vec<Option<Direction>> {
    const PATTERN: [Option<Direction>; 6] = [
        Some(Direction::Left),
        None,
        Some(Direction::Up),
        None,
        Some(Direction::Right),
        Some(Direction::Down),
    ];

    (0..TICKS).map(|tick| PATTERN[(tick / 7) % PATTERN.len()]).collect()
}
