//! Intent sources that stand in for a human at the keyboard.

use clap::ValueEnum;
use maze_chase_core::{CellCoord, Direction};
use maze_chase_world::{query, Session};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Stream offset that keeps the policy RNG apart from the session RNG.
const POLICY_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

/// Strategy used to produce the player's intent each tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum PolicyKind {
    /// Never requests a turn.
    Idle,
    /// Picks a random forward direction at junctions.
    Wander,
    /// Heads for the nearest remaining collectible.
    Greedy,
}

/// Stateful intent source driven by its own seeded RNG.
#[derive(Debug)]
pub(crate) struct IntentPolicy {
    kind: PolicyKind,
    rng: ChaCha8Rng,
}

impl IntentPolicy {
    /// Creates a policy whose random choices are reproducible from `seed`.
    pub(crate) fn new(kind: PolicyKind, seed: u64) -> Self {
        Self {
            kind,
            rng: ChaCha8Rng::seed_from_u64(seed ^ POLICY_STREAM),
        }
    }

    /// Chooses the intent for the upcoming tick.
    pub(crate) fn next_intent(&mut self, session: &Session) -> Option<Direction> {
        match self.kind {
            PolicyKind::Idle => None,
            PolicyKind::Wander => {
                let options = forward_options(session);
                if options.len() < 2 && options.contains(&query::player(session).facing) {
                    return None;
                }
                options.choose(&mut self.rng).copied()
            }
            PolicyKind::Greedy => greedy_direction(session),
        }
    }
}

/// Directions the player could take without reversing, or the reversal when it
/// is the only way out.
fn forward_options(session: &Session) -> Vec<Direction> {
    let view = query::maze(session).view();
    let player = query::player(session);
    let open: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|direction| view.neighbor(player.cell, *direction).is_some())
        .collect();

    if open.len() > 1 {
        open.into_iter()
            .filter(|direction| *direction != player.facing.opposite())
            .collect()
    } else {
        open
    }
}

fn greedy_direction(session: &Session) -> Option<Direction> {
    let view = query::maze(session).view();
    let player = query::player(session);

    forward_options(session)
        .into_iter()
        .filter_map(|direction| {
            view.neighbor(player.cell, direction)
                .map(|cell| (direction, nearest_collectible(session, cell)))
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(direction, _)| direction)
}

fn nearest_collectible(session: &Session, from: CellCoord) -> u32 {
    query::dots(session)
        .iter()
        .chain(query::power_items(session))
        .map(|cell| cell.manhattan_distance(from))
        .min()
        .unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_world::{new_session, LevelConfig};

    #[test]
    fn idle_policy_never_steers() {
        let session = new_session(&LevelConfig::classic()).expect("classic level is valid");
        let mut policy = IntentPolicy::new(PolicyKind::Idle, 1);

        assert_eq!(policy.next_intent(&session), None);
    }

    #[test]
    fn greedy_policy_only_requests_open_directions() {
        let session = new_session(&LevelConfig::classic()).expect("classic level is valid");
        let mut policy = IntentPolicy::new(PolicyKind::Greedy, 1);

        let intent = policy.next_intent(&session).expect("spawn has open neighbours");

        let view = query::maze(&session).view();
        assert!(view.neighbor(query::player(&session).cell, intent).is_some());
    }

    #[test]
    fn wander_policy_is_reproducible_per_seed() {
        let session = new_session(&LevelConfig::classic()).expect("classic level is valid");
        let mut first = IntentPolicy::new(PolicyKind::Wander, 42);
        let mut second = IntentPolicy::new(PolicyKind::Wander, 42);

        for _ in 0..16 {
            assert_eq!(first.next_intent(&session), second.next_intent(&session));
        }
    }
}
