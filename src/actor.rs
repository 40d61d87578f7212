//! Animated, damageable actors: the player and the enemy kinds.
//!
//! Level spawn tags map onto [`ActorKind`]; each kind carries a
//! [`Behaviour`] table that drives how it moves and attacks. The per-tick
//! order mirrors the game loop: control (input or pursuit), movement,
//! animation, then the invulnerability timer.

use std::str::FromStr;
use std::sync::Arc;

use bevy::prelude::Resource;
use glam::{IVec2, Vec2};
use log::debug;

use crate::animation::{AnimationError, AnimationSet, Animator, Facing, Frame, Stance, Status};
use crate::clock::Timestamp;
use crate::collision::ObstacleQuery;
use crate::geometry::Rect;
use crate::kinematics::{Body, Kinematic};
use crate::registry::RegistryId;
use crate::vector_math::distance_and_direction;
use crate::vulnerability::Vitality;

/// Handle of an enemy inside the simulation registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActorId(pub u64);

impl RegistryId for ActorId {
    fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Either side of a fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Participant {
    /// The player character.
    Player,
    /// An enemy actor.
    Enemy(ActorId),
}

/// How a kind deals damage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackStyle {
    /// Hits the target directly while it stays within the attack radius.
    Melee {
        /// Animation frame on which the blow lands.
        strike_frame: usize,
    },
    /// Fires a single projectile per attack.
    Ranged {
        /// Animation frame on which the projectile leaves.
        fire_frame: usize,
        /// Distance from the shooter's centre to the projectile spawn point.
        muzzle_offset: f32,
    },
}

impl AttackStyle {
    /// Attack animation frame on which the attack takes effect.
    #[must_use]
    pub const fn trigger_frame(self) -> usize {
        match self {
            Self::Melee { strike_frame } => strike_frame,
            Self::Ranged { fire_frame, .. } => fire_frame,
        }
    }
}

/// Per-kind tuning table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Behaviour {
    /// Walking speed in pixels per second.
    pub speed: f32,
    /// Starting health.
    pub health: i32,
    /// Distance at which an enemy turns to face its target.
    pub notice_radius: f32,
    /// Distance within which an enemy walks towards its target.
    pub walk_radius: f32,
    /// Distance within which an enemy starts an attack.
    pub attack_radius: f32,
    /// Attack mechanics.
    pub attack: AttackStyle,
}

/// Every kind of actor a level can spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorKind {
    /// The player character.
    Player,
    /// Melee enemy that shuffles up and strikes.
    Coffin,
    /// Slow ranged enemy.
    Cactus,
}

impl ActorKind {
    /// Every kind, player first.
    pub const ALL: [Self; 3] = [Self::Player, Self::Coffin, Self::Cactus];

    /// Behaviour table for the kind.
    #[must_use]
    pub const fn behaviour(self) -> Behaviour {
        match self {
            Self::Player => Behaviour {
                speed: 200.0,
                health: 5,
                notice_radius: 0.0,
                walk_radius: 0.0,
                attack_radius: 0.0,
                attack: AttackStyle::Ranged {
                    fire_frame: 2,
                    muzzle_offset: 80.0,
                },
            },
            Self::Coffin => Behaviour {
                speed: 150.0,
                health: 3,
                notice_radius: 550.0,
                walk_radius: 400.0,
                attack_radius: 50.0,
                attack: AttackStyle::Melee { strike_frame: 4 },
            },
            Self::Cactus => Behaviour {
                speed: 90.0,
                health: 3,
                notice_radius: 600.0,
                walk_radius: 500.0,
                attack_radius: 350.0,
                attack: AttackStyle::Ranged {
                    fire_frame: 6,
                    muzzle_offset: 150.0,
                },
            },
        }
    }

    /// Spawn tag used by level descriptions.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Player => "Player",
            Self::Coffin => "Coffin",
            Self::Cactus => "Cactus",
        }
    }

    /// Whether the kind fights against the player.
    #[must_use]
    pub const fn is_enemy(self) -> bool {
        !matches!(self, Self::Player)
    }
}

/// Error returned when a spawn tag names no known kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown actor kind `{0}`")]
pub struct UnknownKind(pub String);

impl FromStr for ActorKind {
    type Err = UnknownKind;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| UnknownKind(tag.to_owned()))
    }
}

/// Signals sampled from the input collaborator for one tick.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct TickInput {
    /// Desired walking direction; any magnitude, zero to stand still.
    pub direction: Vec2,
    /// Whether the fire action was triggered.
    pub fire: bool,
}

/// Who steers an actor this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    /// Player-sampled input.
    Input(TickInput),
    /// Chase and attack the target centred at the given point.
    Pursue(Vec2),
}

/// Timing shared by every actor update in a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepContext {
    /// Time of the tick.
    pub now: Timestamp,
    /// Seconds since the previous tick.
    pub dt: f32,
    /// Animation cursor speed in frames per second.
    pub animation_speed: f32,
}

/// Side effect requested by an actor update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActorAction {
    /// Spawn a projectile.
    Fire {
        /// Projectile centre.
        origin: Vec2,
        /// Unit direction of travel.
        direction: Vec2,
    },
    /// Deal melee damage to the pursued target.
    Strike,
}

/// What the renderer needs to draw an actor.
#[derive(Debug, Clone)]
pub struct ActorVisual {
    /// Frame to draw.
    pub frame: Arc<Frame>,
    /// World-space rectangle the frame fills.
    pub rect: Rect,
    /// Draw the frame's silhouette instead of the frame.
    pub silhouette: bool,
}

/// A player or enemy.
#[derive(Debug, Clone)]
pub struct Actor {
    kind: ActorKind,
    body: Body,
    animator: Animator,
    vitality: Vitality,
    attacking: bool,
    shot_fired: bool,
    aim: Vec2,
}

impl Actor {
    /// Spawns an actor of `kind` centred on `center`, facing down.
    ///
    /// The display size comes from the first frame of the starting status.
    ///
    /// # Errors
    ///
    /// Returns an [`AnimationError`] when `animations` does not cover every
    /// status, or when an attack sequence wraps before the kind's strike or
    /// fire frame.
    pub fn spawn(
        kind: ActorKind,
        center: IVec2,
        animations: Arc<AnimationSet>,
        invulnerability_ms: u64,
    ) -> Result<Self, AnimationError> {
        let behaviour = kind.behaviour();
        animations.reaches_attack_frame(behaviour.attack.trigger_frame())?;
        let animator = Animator::new(animations, Status::default())?;
        let frame = animator.current_frame()?;
        let body = Body::new(
            center,
            IVec2::new(frame.width(), frame.height()),
            behaviour.speed,
        );
        debug!("spawned {} at {center}", kind.tag());
        Ok(Self {
            kind,
            body,
            animator,
            vitality: Vitality::with_window(behaviour.health, invulnerability_ms),
            attacking: false,
            shot_fired: false,
            aim: Vec2::ZERO,
        })
    }

    /// Kind of the actor.
    #[must_use]
    pub const fn kind(&self) -> ActorKind {
        self.kind
    }

    /// Health and invulnerability state.
    #[must_use]
    pub const fn vitality(&self) -> &Vitality {
        &self.vitality
    }

    /// Applies one point of damage unless invulnerable.
    ///
    /// Returns whether the hit landed.
    pub fn take_damage(&mut self, now: Timestamp) -> bool {
        let landed = self.vitality.take_damage(now);
        if landed {
            debug!(
                "{} hit, health now {}",
                self.kind.tag(),
                self.vitality.health()
            );
        }
        landed
    }

    /// Current animation status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.animator.status()
    }

    /// Whether an attack animation is running.
    #[must_use]
    pub const fn is_attacking(&self) -> bool {
        self.attacking
    }

    /// Centre of the display rectangle.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.body.rect().center_f32()
    }

    /// Frame, rectangle and blink state for drawing and hit tests.
    ///
    /// # Errors
    ///
    /// Fails when the current status has no frames.
    pub fn visual(&self, now: Timestamp) -> Result<ActorVisual, AnimationError> {
        let frame = Arc::clone(self.animator.current_frame()?);
        let rect = Rect::from_center(self.body.rect().center(), frame.width(), frame.height());
        Ok(ActorVisual {
            frame,
            rect,
            silhouette: self.vitality.blink(now),
        })
    }

    /// Runs one tick: control, movement, animation, invulnerability timer.
    ///
    /// # Errors
    ///
    /// Fails when the animation for the resulting status is missing; the
    /// caller removes the actor in that case.
    pub fn update<Q: ObstacleQuery + ?Sized>(
        &mut self,
        control: Control,
        step: StepContext,
        obstacles: &Q,
    ) -> Result<Option<ActorAction>, AnimationError> {
        let target = match control {
            Control::Input(input) => {
                self.apply_input(input);
                None
            }
            Control::Pursue(target) => {
                self.pursue(target);
                Some(target)
            }
        };
        self.advance(step.dt, obstacles);
        let action = self.animate(step, target)?;
        self.vitality.refresh(step.now);
        Ok(action)
    }

    fn apply_input(&mut self, input: TickInput) {
        if !self.attacking {
            self.body.set_direction(input.direction);
            if let Some(facing) = facing_for_input(input.direction) {
                self.set_status(facing, Stance::Moving);
            }
            if input.fire {
                self.begin_attack();
                self.body.set_direction(Vec2::ZERO);
                self.aim = facing_vector(self.status().facing);
            }
        }

        let facing = self.status().facing;
        if self.body.direction() == Vec2::ZERO {
            self.set_status(facing, Stance::Idle);
        }
        if self.attacking {
            self.set_status(facing, Stance::Attack);
        }
    }

    fn pursue(&mut self, target: Vec2) {
        let behaviour = self.kind.behaviour();
        let (distance, direction) = distance_and_direction(self.center(), target);

        if distance < behaviour.notice_radius {
            if let Some(facing) = facing_towards(direction) {
                self.set_status(facing, Stance::Idle);
            }
        }

        if behaviour.attack_radius < distance && distance < behaviour.walk_radius {
            self.body.set_direction(direction);
            self.set_status(self.status().facing, Stance::Moving);
        } else {
            self.body.set_direction(Vec2::ZERO);
        }

        if distance < behaviour.attack_radius && !self.attacking {
            self.begin_attack();
        }
        if self.attacking {
            self.set_status(self.status().facing, Stance::Attack);
        }
    }

    fn animate(
        &mut self,
        step: StepContext,
        target: Option<Vec2>,
    ) -> Result<Option<ActorAction>, AnimationError> {
        let progress = self.animator.advance(step.animation_speed, step.dt)?;
        let mut action = None;
        if self.attacking {
            action = self.attack_action(progress.frame, target);
            if progress.wrapped {
                self.attacking = false;
            }
        }
        Ok(action)
    }

    fn attack_action(&mut self, frame: usize, target: Option<Vec2>) -> Option<ActorAction> {
        let behaviour = self.kind.behaviour();
        match behaviour.attack {
            AttackStyle::Melee { strike_frame } => {
                let (distance, _) = distance_and_direction(self.center(), target?);
                (frame == strike_frame && distance < behaviour.attack_radius)
                    .then_some(ActorAction::Strike)
            }
            AttackStyle::Ranged {
                fire_frame,
                muzzle_offset,
            } => {
                if frame != fire_frame || self.shot_fired {
                    return None;
                }
                let direction = match target {
                    Some(point) => distance_and_direction(self.center(), point).1,
                    None => self.aim,
                };
                self.shot_fired = true;
                Some(ActorAction::Fire {
                    origin: self.center() + direction * muzzle_offset,
                    direction,
                })
            }
        }
    }

    fn begin_attack(&mut self) {
        self.attacking = true;
        self.shot_fired = false;
        self.animator.restart();
    }

    fn set_status(&mut self, facing: Facing, stance: Stance) {
        self.animator.set_status(Status::new(facing, stance));
    }
}

impl Kinematic for Actor {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// Facing chosen by directional input; horizontal input wins.
fn facing_for_input(direction: Vec2) -> Option<Facing> {
    if direction.x > 0.0 {
        Some(Facing::Right)
    } else if direction.x < 0.0 {
        Some(Facing::Left)
    } else if direction.y < 0.0 {
        Some(Facing::Up)
    } else if direction.y > 0.0 {
        Some(Facing::Down)
    } else {
        None
    }
}

/// Facing towards a unit direction; mostly-horizontal directions face sideways.
fn facing_towards(direction: Vec2) -> Option<Facing> {
    if -0.5 < direction.y && direction.y < 0.5 {
        if direction.x < 0.0 {
            Some(Facing::Left)
        } else if direction.x > 0.0 {
            Some(Facing::Right)
        } else {
            None
        }
    } else if direction.y < 0.0 {
        Some(Facing::Up)
    } else {
        Some(Facing::Down)
    }
}

const fn facing_vector(facing: Facing) -> Vec2 {
    match facing {
        Facing::Up => Vec2::NEG_Y,
        Facing::Down => Vec2::Y,
        Facing::Left => Vec2::NEG_X,
        Facing::Right => Vec2::X,
    }
}
