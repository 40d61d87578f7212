//! The simulation context: registries plus the fixed-order tick.
//!
//! [`Simulation`] owns every live entity. Constructors elsewhere return plain
//! values; only the simulation inserts them and hands out [`ActorId`] and
//! [`ProjectileId`] handles. One call to [`Simulation::tick`] runs:
//!
//! 1. player control and movement,
//! 2. enemy pursuit and movement,
//! 3. projectile flight and expiry,
//! 4. projectiles fired this tick,
//! 5. the combat pipeline,
//! 6. the death check.
//!
//! Removal is always mark-then-compact, so no pass sees a half-removed
//! entity.

use std::sync::Arc;

use bevy::prelude::Resource;
use glam::{IVec2, Vec2};
use log::{debug, error, info};

use crate::actor::{
    Actor, ActorAction, ActorId, ActorKind, Control, Participant, StepContext, TickInput,
};
use crate::animation::Frame;
use crate::clock::Timestamp;
use crate::collision::{Obstacle, ObstacleSet};
use crate::combat::{resolve_projectiles, CombatReport, Combatants};
use crate::config::SimulationConfig;
use crate::events::{EventQueue, GameEvent};
use crate::kinematics::Kinematic;
use crate::level::{AssetCatalog, LevelDescription, LevelError, ObstaclePlacement};
use crate::projectile::{Expiry, Projectile, ProjectileId};
use crate::registry::Registry;
use crate::render::{DrawList, Sprite, Viewport};

/// Whether the session is still going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    /// The player is alive.
    #[default]
    Running,
    /// The player's health ran out.
    PlayerDefeated,
    /// The player could not be updated and was removed.
    PlayerFaulted,
}

impl Outcome {
    /// Whether ticks still do anything.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Live game state.
#[derive(Resource, Debug)]
pub struct Simulation {
    config: SimulationConfig,
    catalog: AssetCatalog,
    obstacles: ObstacleSet,
    player: Actor,
    enemies: Registry<ActorId, Actor>,
    projectiles: Registry<ProjectileId, Projectile>,
    events: EventQueue,
    outcome: Outcome,
    ticks: u64,
}

impl Simulation {
    /// Populates a simulation from a level description.
    ///
    /// # Errors
    ///
    /// Fails when a spawn tag is unknown, the player spawn is missing or
    /// repeated, an obstacle is malformed or an animation set is incomplete.
    pub fn from_level(level: &LevelDescription, catalog: AssetCatalog) -> Result<Self, LevelError> {
        let config = level.config;
        let obstacles = level
            .obstacles
            .iter()
            .enumerate()
            .map(|(index, placement)| build_obstacle(index, placement, &catalog))
            .collect::<Result<ObstacleSet, _>>()?;

        let mut player_spawn = None;
        let mut enemy_spawns = Vec::new();
        for spawn in &level.spawns {
            let kind: ActorKind = spawn.tag.parse()?;
            let center = IVec2::new(spawn.x, spawn.y);
            if kind.is_enemy() {
                enemy_spawns.push((kind, center));
            } else if player_spawn.replace(center).is_some() {
                return Err(LevelError::DuplicatePlayer);
            }
        }
        let center = player_spawn.ok_or(LevelError::MissingPlayer)?;
        let player = Actor::spawn(
            ActorKind::Player,
            center,
            catalog.animations(ActorKind::Player)?,
            config.invulnerability_ms,
        )?;

        let mut simulation = Self {
            config,
            catalog,
            obstacles,
            player,
            enemies: Registry::new(),
            projectiles: Registry::new(),
            events: EventQueue::default(),
            outcome: Outcome::Running,
            ticks: 0,
        };
        for (kind, center) in enemy_spawns {
            simulation.insert_enemy(kind, center)?;
        }
        info!(
            "level loaded: {} obstacles, {} enemies",
            simulation.obstacles.len(),
            simulation.enemies.len()
        );
        Ok(simulation)
    }

    /// Spawns an enemy centred on `center`.
    ///
    /// # Errors
    ///
    /// Fails with [`LevelError::NotAnEnemy`] for [`ActorKind::Player`] and
    /// when the kind's animations are missing or incomplete.
    pub fn insert_enemy(&mut self, kind: ActorKind, center: IVec2) -> Result<ActorId, LevelError> {
        if !kind.is_enemy() {
            return Err(LevelError::NotAnEnemy(kind));
        }
        let actor = Actor::spawn(
            kind,
            center,
            self.catalog.animations(kind)?,
            self.config.invulnerability_ms,
        )?;
        Ok(self.enemies.insert(actor))
    }

    /// Fires a projectile and records a [`GameEvent::Shot`].
    pub fn spawn_projectile(
        &mut self,
        origin: Vec2,
        direction: Vec2,
        owner: Participant,
        now: Timestamp,
    ) -> ProjectileId {
        let projectile = Projectile::new(
            origin,
            direction,
            self.config.projectile_speed,
            Arc::clone(self.catalog.projectile()),
            owner,
            now,
        );
        self.events.push(GameEvent::Shot { shooter: owner });
        self.projectiles.insert(projectile)
    }

    /// Advances the world by `dt` seconds ending at `now`.
    ///
    /// Does nothing once the session has ended.
    pub fn tick(&mut self, now: Timestamp, dt: f32, input: TickInput) -> Outcome {
        if !self.outcome.is_running() {
            return self.outcome;
        }
        let step = StepContext {
            now,
            dt,
            animation_speed: self.config.animation_speed,
        };
        let mut fired = Vec::new();

        match self.player.update(Control::Input(input), step, &self.obstacles) {
            Ok(Some(ActorAction::Fire { origin, direction })) => {
                fired.push((origin, direction, Participant::Player));
            }
            Ok(Some(ActorAction::Strike) | None) => {}
            Err(err) => {
                error!("player faulted: {err}");
                self.outcome = Outcome::PlayerFaulted;
                return self.outcome;
            }
        }

        let target = self.player.center();
        let mut strikes = 0_usize;
        let mut faulted = Vec::new();
        for (id, enemy) in self.enemies.iter_mut() {
            match enemy.update(Control::Pursue(target), step, &self.obstacles) {
                Ok(Some(ActorAction::Fire { origin, direction })) => {
                    fired.push((origin, direction, Participant::Enemy(id)));
                }
                Ok(Some(ActorAction::Strike)) => strikes += 1,
                Ok(None) => {}
                Err(err) => {
                    error!("enemy {id:?} faulted and was removed: {err}");
                    faulted.push(id);
                }
            }
        }
        for id in faulted {
            self.enemies.mark(id);
        }
        for _ in 0..strikes {
            if self.player.take_damage(now) {
                self.events.push(GameEvent::Hit {
                    target: Participant::Player,
                });
            }
        }

        self.advance_projectiles(now, dt);
        for (origin, direction, owner) in fired {
            self.spawn_projectile(origin, direction, owner, now);
        }

        self.resolve_combat(now);
        self.check_deaths();
        self.ticks += 1;
        self.outcome
    }

    fn advance_projectiles(&mut self, now: Timestamp, dt: f32) {
        for (_, projectile) in self.projectiles.iter_mut() {
            projectile.advance(dt, &self.obstacles);
        }
        let lifetime = self.config.projectile_lifetime_ms;
        let bounds = self.config.world_bounds;
        self.projectiles.mark_where(|id, projectile| {
            match projectile.expiry(now, lifetime, bounds) {
                Some(Expiry::OutOfBounds) => {
                    debug!("projectile {id:?} from {:?} left the world bounds", projectile.owner());
                    true
                }
                Some(Expiry::Lifetime) => true,
                None => false,
            }
        });
    }

    fn resolve_combat(&mut self, now: Timestamp) -> CombatReport {
        let report = resolve_projectiles(
            Combatants {
                projectiles: &mut self.projectiles,
                enemies: &mut self.enemies,
                player: &mut self.player,
            },
            &self.obstacles,
            now,
            &mut self.events,
        );
        self.projectiles.compact();
        report
    }

    fn check_deaths(&mut self) {
        self.enemies
            .mark_where(|_, enemy| enemy.vitality().is_depleted());
        for id in self.enemies.compact() {
            debug!("enemy {id:?} removed");
        }
        if self.player.vitality().is_depleted() {
            info!("player defeated after {} ticks", self.ticks + 1);
            self.outcome = Outcome::PlayerDefeated;
        }
    }

    /// Camera-relative draw list following the player.
    #[must_use]
    pub fn draw_list(&self, viewport: Viewport, now: Timestamp) -> DrawList {
        let obstacles = self.obstacles.iter().map(|obstacle| Sprite {
            frame: Arc::clone(obstacle.frame()),
            rect: obstacle.rect(),
            silhouette: false,
        });
        let actors = self
            .enemies
            .iter()
            .map(|(_, enemy)| enemy)
            .chain(self.outcome.is_running().then_some(&self.player))
            .filter_map(|actor| actor.visual(now).ok())
            .map(|visual| Sprite {
                frame: visual.frame,
                rect: visual.rect,
                silhouette: visual.silhouette,
            });
        let projectiles = self.projectiles.iter().map(|(_, projectile)| Sprite {
            frame: Arc::clone(projectile.frame()),
            rect: projectile.draw_rect(),
            silhouette: false,
        });
        let sprites = obstacles.chain(actors).chain(projectiles).collect();
        DrawList::compose(self.player.body().rect().center(), viewport, sprites)
    }

    /// Removes and returns the events raised since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain().collect()
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &Actor {
        &self.player
    }

    /// Mutable access to the player, for scripted scenarios.
    pub fn player_mut(&mut self) -> &mut Actor {
        &mut self.player
    }

    /// Live enemy by handle.
    #[must_use]
    pub fn enemy(&self, id: ActorId) -> Option<&Actor> {
        self.enemies.get(id)
    }

    /// Live enemies in spawn order.
    pub fn enemies(&self) -> impl Iterator<Item = (ActorId, &Actor)> + '_ {
        self.enemies.iter()
    }

    /// Live projectiles in firing order.
    pub fn projectiles(&self) -> impl Iterator<Item = (ProjectileId, &Projectile)> + '_ {
        self.projectiles.iter()
    }

    /// The static obstacles.
    #[must_use]
    pub const fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    /// Active settings.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Current session state.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Ticks run so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }
}

fn build_obstacle(
    index: usize,
    placement: &ObstaclePlacement,
    catalog: &AssetCatalog,
) -> Result<Obstacle, LevelError> {
    let top_left = IVec2::new(placement.x, placement.y);
    let frame = match &placement.sprite {
        Some(name) => catalog
            .sprite(name)
            .cloned()
            .ok_or_else(|| LevelError::UnknownSprite(name.clone()))?,
        None if placement.width == 0 || placement.height == 0 => {
            return Err(LevelError::InvalidObstacleSize {
                index,
                width: placement.width,
                height: placement.height,
            });
        }
        None => Arc::new(Frame::solid(
            format!("block/{index}"),
            placement.width,
            placement.height,
        )),
    };
    Ok(Obstacle::new(top_left, frame))
}
