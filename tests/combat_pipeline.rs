//! Scenario tests for the per-tick projectile collision passes.

use frontier::config::SimulationConfig;
use frontier::geometry::Rect;
use frontier::{ActorId, GameEvent, Participant, Simulation, TickInput, Timestamp};
use glam::Vec2;
use rstest::{fixture, rstest};
use test_utils::LevelBuilder;

const SHORT_TICK: f32 = 0.001;

/// Player far to the left, a coffin at (500, 0) just outside its walk radius.
#[fixture]
fn lone_coffin() -> LevelBuilder {
    LevelBuilder::new().player(0, 0).enemy("Coffin", 500, 0)
}

fn only_enemy(sim: &Simulation) -> ActorId {
    sim.enemies().next().map(|(id, _)| id).expect("one enemy")
}

fn fire_at(sim: &mut Simulation, target: Vec2, owner: Participant) {
    sim.spawn_projectile(target, Vec2::X, owner, Timestamp::ZERO);
}

fn hits(events: &[GameEvent]) -> Vec<Participant> {
    events
        .iter()
        .filter_map(|event| match event {
            GameEvent::Hit { target } => Some(*target),
            GameEvent::Shot { .. } => None,
        })
        .collect()
}

#[rstest]
fn obstacles_absorb_projectiles_before_enemies(lone_coffin: LevelBuilder) {
    let mut sim = lone_coffin.block(480, -10, 40, 20).simulation();
    let coffin = only_enemy(&sim);
    fire_at(&mut sim, Vec2::new(500.0, 0.0), Participant::Player);

    sim.tick(Timestamp::from_millis(16), SHORT_TICK, TickInput::default());

    assert_eq!(sim.projectiles().count(), 0);
    assert_eq!(
        sim.enemy(coffin).map(|enemy| enemy.vitality().health()),
        Some(3)
    );
    assert!(hits(&sim.drain_events()).is_empty());
}

#[rstest]
fn enemies_take_one_point_per_projectile(lone_coffin: LevelBuilder) {
    let mut sim = lone_coffin.simulation();
    let coffin = only_enemy(&sim);
    fire_at(&mut sim, Vec2::new(500.0, 0.0), Participant::Player);

    sim.tick(Timestamp::from_millis(16), SHORT_TICK, TickInput::default());

    assert_eq!(sim.projectiles().count(), 0);
    assert_eq!(
        sim.enemy(coffin).map(|enemy| enemy.vitality().health()),
        Some(2)
    );
    assert_eq!(
        hits(&sim.drain_events()),
        vec![Participant::Enemy(coffin)]
    );
}

#[rstest]
fn one_projectile_hurts_every_enemy_it_touches(lone_coffin: LevelBuilder) {
    let mut sim = lone_coffin.enemy("Coffin", 510, 0).simulation();
    fire_at(&mut sim, Vec2::new(505.0, 0.0), Participant::Player);

    sim.tick(Timestamp::from_millis(16), SHORT_TICK, TickInput::default());

    let healths: Vec<i32> = sim
        .enemies()
        .map(|(_, enemy)| enemy.vitality().health())
        .collect();
    assert_eq!(healths, vec![2, 2]);
    assert_eq!(hits(&sim.drain_events()).len(), 2);
}

#[rstest]
fn enemy_projectiles_hurt_the_player(lone_coffin: LevelBuilder) {
    let mut sim = lone_coffin.simulation();
    let coffin = only_enemy(&sim);
    fire_at(&mut sim, Vec2::ZERO, Participant::Enemy(coffin));

    sim.tick(Timestamp::from_millis(16), SHORT_TICK, TickInput::default());

    assert_eq!(sim.player().vitality().health(), 4);
    assert_eq!(hits(&sim.drain_events()), vec![Participant::Player]);
}

#[rstest]
fn projectiles_in_open_ground_keep_flying(lone_coffin: LevelBuilder) {
    let mut sim = lone_coffin.simulation();
    fire_at(&mut sim, Vec2::new(250.0, 300.0), Participant::Player);

    sim.tick(Timestamp::from_millis(100), 0.1, TickInput::default());

    let centers: Vec<_> = sim
        .projectiles()
        .map(|(_, projectile)| projectile.draw_rect().center())
        .collect();
    assert_eq!(centers, vec![glam::IVec2::new(290, 300)]);
}

#[rstest]
fn projectiles_past_the_world_bounds_are_removed(lone_coffin: LevelBuilder) {
    let mut sim = lone_coffin
        .config(SimulationConfig {
            world_bounds: Some(Rect::new(-100, -100, 200, 200)),
            ..SimulationConfig::default()
        })
        .simulation();
    sim.spawn_projectile(
        Vec2::new(0.0, 60.0),
        Vec2::Y,
        Participant::Player,
        Timestamp::ZERO,
    );
    fire_at(&mut sim, Vec2::new(0.0, -60.0), Participant::Player);

    sim.tick(Timestamp::from_millis(100), 0.1, TickInput::default());

    let centers: Vec<_> = sim
        .projectiles()
        .map(|(_, projectile)| projectile.draw_rect().center())
        .collect();
    assert_eq!(centers, vec![glam::IVec2::new(40, -60)]);
}
