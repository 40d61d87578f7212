//! Removal of depleted actors and the end of the session.

use frontier::{Outcome, Participant, TickInput, Timestamp};
use glam::Vec2;
use rstest::rstest;
use test_utils::LevelBuilder;

#[rstest]
fn depleted_enemies_leave_the_simulation() {
    let mut sim = LevelBuilder::new()
        .player(0, 0)
        .enemy("Coffin", 500, 0)
        .simulation();

    for ms in [1_000, 1_400, 1_800] {
        let now = Timestamp::from_millis(ms);
        sim.spawn_projectile(Vec2::new(500.0, 0.0), Vec2::Y, Participant::Player, now);
        sim.tick(now, 0.001, TickInput::default());
    }

    assert_eq!(sim.enemies().count(), 0);
    assert_eq!(sim.projectiles().count(), 0);
    assert_eq!(sim.outcome(), Outcome::Running);
}

#[rstest]
fn a_coffin_beside_the_player_ends_the_session() {
    let mut sim = LevelBuilder::new()
        .player(0, 0)
        .enemy("Coffin", 0, 30)
        .simulation();

    let mut outcome = Outcome::Running;
    for tick in 1..=200_u64 {
        outcome = sim.tick(Timestamp::from_millis(tick * 100), 0.1, TickInput::default());
        if !outcome.is_running() {
            break;
        }
    }

    assert_eq!(outcome, Outcome::PlayerDefeated);
    assert_eq!(sim.player().vitality().health(), 0);

    let ticks = sim.ticks();
    let after = sim.tick(Timestamp::from_millis(60_000), 0.1, TickInput::default());
    assert_eq!(after, Outcome::PlayerDefeated);
    assert_eq!(sim.ticks(), ticks);
}
