#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic analytics system that folds session events into a report.

use maze_chase_core::{Event, SessionStatus, DOT_REWARD, POWER_ITEM_REWARD, PURSUER_BOUNTY};
use serde::Serialize;

/// Aggregate statistics describing a session so far.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SessionReport {
    /// Active ticks observed.
    pub ticks: u64,
    /// Dots collected by the player.
    pub dots_collected: u32,
    /// Power items collected by the player.
    pub power_items_collected: u32,
    /// Times power mode ran out.
    pub power_mode_expirations: u32,
    /// Pursuers consumed during power mode.
    pub pursuers_consumed: u32,
    /// Lives lost to pursuers.
    pub lives_lost: u32,
    /// Points implied by the observed events.
    pub score_awarded: u32,
    /// Most recent status announced by the session, if any.
    pub final_status: Option<SessionStatus>,
}

/// Pure analytics system that accumulates a [`SessionReport`].
#[derive(Debug, Default)]
pub struct Analytics {
    report: SessionReport,
}

impl Analytics {
    /// Creates a new analytics system with an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the report accumulated so far.
    #[must_use]
    pub fn report(&self) -> &SessionReport {
        &self.report
    }

    /// Consumes the events emitted by a single step.
    pub fn handle(&mut self, events: &[Event]) {
        let report = &mut self.report;
        for event in events {
            match event {
                Event::TickAdvanced { .. } => report.ticks = report.ticks.saturating_add(1),
                Event::DotCollected { .. } => {
                    report.dots_collected = report.dots_collected.saturating_add(1);
                    report.score_awarded = report.score_awarded.saturating_add(DOT_REWARD);
                }
                Event::PowerItemCollected { .. } => {
                    report.power_items_collected = report.power_items_collected.saturating_add(1);
                    report.score_awarded = report.score_awarded.saturating_add(POWER_ITEM_REWARD);
                }
                Event::PowerModeExpired => {
                    report.power_mode_expirations = report.power_mode_expirations.saturating_add(1);
                }
                Event::PursuerConsumed { .. } => {
                    report.pursuers_consumed = report.pursuers_consumed.saturating_add(1);
                    report.score_awarded = report.score_awarded.saturating_add(PURSUER_BOUNTY);
                }
                Event::LifeLost { .. } => {
                    report.lives_lost = report.lives_lost.saturating_add(1);
                }
                Event::StatusChanged { status } => report.final_status = Some(*status),
                Event::PlayerTurned { .. }
                | Event::PlayerMoved { .. }
                | Event::PursuerMoved { .. } => {}
            }
        }
    }
}
