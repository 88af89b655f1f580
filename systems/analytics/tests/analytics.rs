use maze_chase_core::{CellCoord, Event, PursuerId, SessionStatus};
use maze_chase_system_analytics::Analytics;

#[test]
fn rewards_accumulate_from_collection_events() {
    let mut analytics = Analytics::new();

    analytics.handle(&[
        Event::TickAdvanced { tick: 1 },
        Event::DotCollected {
            cell: CellCoord::new(2, 1),
        },
    ]);
    analytics.handle(&[
        Event::TickAdvanced { tick: 2 },
        Event::PowerItemCollected {
            cell: CellCoord::new(3, 1),
        },
        Event::PursuerConsumed {
            pursuer: PursuerId::new(1),
            den: CellCoord::new(9, 9),
        },
    ]);

    let report = analytics.report();
    assert_eq!(report.ticks, 2);
    assert_eq!(report.dots_collected, 1);
    assert_eq!(report.power_items_collected, 1);
    assert_eq!(report.pursuers_consumed, 1);
    assert_eq!(report.score_awarded, 10 + 50 + 200);
    assert_eq!(report.final_status, None);
}

#[test]
fn final_status_tracks_the_latest_transition() {
    let mut analytics = Analytics::new();

    analytics.handle(&[
        Event::TickAdvanced { tick: 7 },
        Event::LifeLost { remaining: 0 },
        Event::StatusChanged {
            status: SessionStatus::Lost,
        },
        Event::StatusChanged {
            status: SessionStatus::LevelCleared,
        },
    ]);

    let report = analytics.report();
    assert_eq!(report.lives_lost, 1);
    assert_eq!(report.final_status, Some(SessionStatus::LevelCleared));
}

#[test]
fn power_mode_expirations_are_counted() {
    let mut analytics = Analytics::new();

    analytics.handle(&[Event::TickAdvanced { tick: 21 }, Event::PowerModeExpired]);
    analytics.handle(&[]);

    let report = analytics.report();
    assert_eq!(report.ticks, 1);
    assert_eq!(report.power_mode_expirations, 1);
}
