//! Bevy plugin driving a [`Simulation`] from the app schedule.
//!
//! The simulation lives in the world as a resource. Each `Update` it ticks
//! with the current [`TickInput`], its buffered [`GameEvent`]s are triggered
//! for observers, and the [`DrawList`] resource is rebuilt for whatever
//! presents frames. Apps without a `Simulation` resource run the systems as
//! no-ops, so the plugin can be installed before a level is loaded.

use std::time::Duration;

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::debug;

use crate::actor::TickInput;
use crate::clock::Timestamp;
use crate::events::GameEvent;
use crate::render::{DrawList, Viewport};
use crate::simulation::Simulation;

/// Simulation time, advanced once per tick.
///
/// With a fixed `step` every tick advances by exactly that much; otherwise
/// the frame delta from Bevy's [`Time`] is used.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationClock {
    /// Time of the most recent tick.
    pub now: Timestamp,
    /// Fixed tick length, if any.
    pub step: Option<Duration>,
}

impl SimulationClock {
    /// Clock that advances by `step` every tick.
    #[must_use]
    pub const fn fixed(step: Duration) -> Self {
        Self {
            now: Timestamp::ZERO,
            step: Some(step),
        }
    }
}

/// Ticks the simulation and forwards its events to observers.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn tick_simulation_system(
    simulation: Option<ResMut<Simulation>>,
    input: Res<TickInput>,
    time: Option<Res<Time>>,
    mut clock: ResMut<SimulationClock>,
    mut commands: Commands,
) {
    let Some(mut simulation) = simulation else {
        return;
    };
    let delta = clock
        .step
        .or_else(|| time.map(|frame_time| frame_time.delta()))
        .unwrap_or_default();
    clock.now += delta;
    simulation.tick(clock.now, delta.as_secs_f32(), *input);
    for event in simulation.drain_events() {
        commands.trigger(event);
    }
}

/// Rebuilds the draw list from the simulation state.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn refresh_draw_list_system(
    simulation: Option<Res<Simulation>>,
    viewport: Res<Viewport>,
    clock: Res<SimulationClock>,
    mut draw_list: ResMut<DrawList>,
) {
    if let Some(simulation) = simulation {
        *draw_list = simulation.draw_list(*viewport, clock.now);
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must take On<T> by value."
)]
fn log_game_event(event: On<GameEvent>) {
    match event.event() {
        GameEvent::Hit { target } => debug!("hit: {target:?}"),
        GameEvent::Shot { shooter } => debug!("shot fired by {shooter:?}"),
    }
}

/// Installs the simulation resources, systems and event logging.
#[derive(Default)]
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TickInput>()
            .init_resource::<Viewport>()
            .init_resource::<DrawList>()
            .init_resource::<SimulationClock>()
            .add_observer(log_game_event)
            .add_systems(
                Update,
                (tick_simulation_system, refresh_draw_list_system).chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn plugin_initialises_resources() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, SimulationPlugin));
        assert!(app.world().contains_resource::<TickInput>());
        assert!(app.world().contains_resource::<Viewport>());
        assert!(app.world().contains_resource::<SimulationClock>());
        app.update();
        assert!(app
            .world()
            .get_resource::<DrawList>()
            .is_some_and(|list| list.commands.is_empty()));
    }

    #[rstest]
    fn clock_does_not_move_without_a_simulation() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, SimulationPlugin));
        app.insert_resource(SimulationClock::fixed(Duration::from_millis(16)));
        app.update();
        assert_eq!(
            app.world().resource::<SimulationClock>().now,
            Timestamp::ZERO
        );
    }
}
