//! Feedback events raised during a tick.
//!
//! The simulation buffers events in an [`EventQueue`]; the Bevy plugin
//! drains it after every tick and triggers each event for observers (sound,
//! screen shake and logging live on that side).

use bevy::prelude::Event;

use crate::actor::Participant;

/// Something the presentation layer may want to react to.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A participant lost a point of health.
    Hit {
        /// Who was hurt.
        target: Participant,
    },
    /// A participant fired a projectile.
    Shot {
        /// Who fired.
        shooter: Participant,
    },
}

/// Events buffered since the last drain, oldest first.
#[derive(Debug, Default, Clone)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    /// Appends an event.
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Removes and yields every buffered event in order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Number of buffered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
