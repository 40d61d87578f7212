//! Behaviour-driven tests for damage and the invulnerability window.
//!
//! Hits are applied to the player of a small level; the simulation ticks in
//! between so the invulnerability timer runs exactly as it does in play.

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

use std::fmt;
use std::sync::{Arc, Mutex};

use frontier::{Outcome, Simulation, TickInput, Timestamp};
use rspec_runner::run_serial;
use test_utils::LevelBuilder;

#[derive(Clone)]
struct Arena {
    sim: Arc<Mutex<Simulation>>,
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena").finish_non_exhaustive()
    }
}

impl Arena {
    fn new() -> Self {
        Self {
            sim: Arc::new(Mutex::new(LevelBuilder::new().player(0, 0).simulation())),
        }
    }

    fn reset(&self) {
        *self.sim.lock().expect("sim lock") = LevelBuilder::new().player(0, 0).simulation();
    }

    /// Hits the player at each time, ticking the simulation up to it first.
    fn hit_at(&self, times: &[u64]) {
        let mut sim = self.sim.lock().expect("sim lock");
        for &ms in times {
            let now = Timestamp::from_millis(ms);
            sim.tick(now, 0.0, TickInput::default());
            sim.player_mut().take_damage(now);
        }
    }

    fn health(&self) -> i32 {
        self.sim.lock().expect("sim lock").player().vitality().health()
    }

    fn vulnerable(&self) -> bool {
        self.sim
            .lock()
            .expect("sim lock")
            .player()
            .vitality()
            .is_vulnerable()
    }

    fn tick_at(&self, ms: u64) -> Outcome {
        self.sim
            .lock()
            .expect("sim lock")
            .tick(Timestamp::from_millis(ms), 0.0, TickInput::default())
    }
}

#[test]
fn invulnerability_window_limits_damage() {
    run_serial(&rspec::given("a player with five health", Arena::new(), |ctx| {
        ctx.before_each(|arena| arena.reset());

        ctx.then("the player starts vulnerable at full health", |arena| {
            assert_eq!(arena.health(), 5);
            assert!(arena.vulnerable());
        });

        ctx.when("hit three times 400 ms apart", |ctx| {
            ctx.before_each(|arena| arena.hit_at(&[1_000, 1_400, 1_800]));

            ctx.then("every hit lands", |arena| {
                assert_eq!(arena.health(), 2);
            });
        });

        ctx.when("hit twice within 100 ms", |ctx| {
            ctx.before_each(|arena| arena.hit_at(&[1_000, 1_100]));

            ctx.then("only the first hit lands", |arena| {
                assert_eq!(arena.health(), 4);
                assert!(!arena.vulnerable());
            });
        });

        ctx.when("hit and left alone for exactly the window", |ctx| {
            ctx.before_each(|arena| {
                arena.hit_at(&[1_000]);
                arena.tick_at(1_300);
            });

            ctx.then("the player is still invulnerable", |arena| {
                assert!(!arena.vulnerable());
            });
        });

        ctx.when("hit and left alone for longer than the window", |ctx| {
            ctx.before_each(|arena| {
                arena.hit_at(&[1_000]);
                arena.tick_at(1_301);
            });

            ctx.then("the player is vulnerable again", |arena| {
                assert!(arena.vulnerable());
                assert_eq!(arena.health(), 4);
            });
        });

        ctx.when("hit five times with room to recover", |ctx| {
            ctx.before_each(|arena| arena.hit_at(&[1_000, 2_000, 3_000, 4_000, 5_000]));

            ctx.then("the next tick ends the session", |arena| {
                assert_eq!(arena.tick_at(5_016), Outcome::PlayerDefeated);
                assert_eq!(arena.health(), 0);
            });
        });
    }));
}
