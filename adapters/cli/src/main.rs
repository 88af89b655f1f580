#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives a headless Maze Chase session.

mod board;
mod policy;

use std::{thread, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use maze_chase_core::Event;
use maze_chase_system_analytics::{Analytics, SessionReport};
use maze_chase_world::{self as world, query, LevelConfig, Session};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::policy::{IntentPolicy, PolicyKind};

const DEFAULT_SEED: u64 = 0x6d61_7a65;

/// Runs the classic level at a fixed cadence with a scripted player.
#[derive(Debug, Parser)]
#[command(name = "maze-chase", version, about)]
struct Args {
    /// Seed for pursuer and policy randomness.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Maximum number of ticks to simulate.
    #[arg(long, default_value_t = 2000)]
    ticks: u64,
    /// Milliseconds to wait between ticks; zero runs as fast as possible.
    #[arg(long, default_value_t = 0)]
    tick_ms: u64,
    /// Source of player intents.
    #[arg(long, value_enum, default_value_t = PolicyKind::Greedy)]
    policy: PolicyKind,
    /// Print the board on every status change and at the end.
    #[arg(long)]
    board: bool,
    /// Print the final report as JSON.
    #[arg(long)]
    json: bool,
}

/// Entry point for the Maze Chase command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let session = world::new_session(&LevelConfig::classic())
        .context("failed to build the classic level")?;
    info!("{}", query::welcome_banner(&session));
    info!(
        "seed {:#x}, policy {:?}, up to {} ticks",
        args.seed, args.policy, args.ticks
    );

    let (session, report) = run(session, &args);

    if args.board {
        println!("{}", board::render(&session));
    }
    if args.json {
        let json =
            serde_json::to_string_pretty(&report).context("failed to encode the session report")?;
        println!("{json}");
    } else {
        print_summary(&session, &report);
    }
    Ok(())
}

fn run(mut session: Session, args: &Args) -> (Session, SessionReport) {
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut policy = IntentPolicy::new(args.policy, args.seed);
    let mut analytics = Analytics::new();
    let cadence = (args.tick_ms > 0).then(|| Duration::from_millis(args.tick_ms));

    for _ in 0..args.ticks {
        if query::is_terminal(&session) {
            break;
        }

        let intent = policy.next_intent(&session);
        let mut events = Vec::new();
        session = world::step(&session, intent, &mut rng, &mut events);
        analytics.handle(&events);

        for event in &events {
            if let Event::StatusChanged { status } = event {
                info!(
                    "tick {}: {status:?} with score {} and {} lives",
                    query::tick(&session),
                    query::score(&session),
                    query::lives(&session)
                );
                if args.board {
                    println!("{}", board::render(&session));
                }
            }
        }

        if let Some(cadence) = cadence {
            thread::sleep(cadence);
        }
    }

    (session, analytics.report().clone())
}

fn print_summary(session: &Session, report: &SessionReport) {
    println!("status:            {:?}", query::status(session));
    println!("ticks:             {}", report.ticks);
    println!("score:             {}", query::score(session));
    println!("lives:             {}", query::lives(session));
    println!("dots collected:    {}", report.dots_collected);
    println!("power items:       {}", report.power_items_collected);
    println!("pursuers consumed: {}", report.pursuers_consumed);
    println!("dots remaining:    {}", query::dots(session).len());
}
