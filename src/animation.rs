//! Animation frames, status keys and the per-entity frame cursor.
//!
//! Frames are produced by the asset loader and shared between every entity
//! of the same kind through `Arc`. Each frame carries its precomputed
//! [`Mask`], so hit tests never look at what is currently on screen.

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use thiserror::Error;

use crate::mask::Mask;

/// Errors raised when an animation set is missing content.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnimationError {
    /// No sequence is registered for the requested status.
    #[error("no animation registered for status `{status}`")]
    MissingStatus {
        /// Status key that was looked up.
        status: String,
    },
    /// A sequence exists but holds no frames.
    #[error("animation `{status}` has no frames")]
    EmptySequence {
        /// Status key of the empty sequence.
        status: String,
    },
    /// An attack sequence ends before the frame its attack lands on.
    #[error("animation `{status}` has {frames} frames but the attack lands on frame {trigger}")]
    AttackTooShort {
        /// Status key of the short sequence.
        status: String,
        /// Frames in the sequence.
        frames: usize,
        /// Frame the attack needs to reach.
        trigger: usize,
    },
}

/// A single visual frame and its opacity mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    name: String,
    mask: Mask,
}

impl Frame {
    /// Creates a frame from a presentation name and its mask.
    ///
    /// The name is opaque to the core; the presentation layer uses it to
    /// find the texture to draw.
    pub fn new(name: impl Into<String>, mask: Mask) -> Self {
        Self {
            name: name.into(),
            mask,
        }
    }

    /// Creates a fully opaque rectangular frame.
    pub fn solid(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self::new(name, Mask::filled(width, height))
    }

    /// Presentation name of the frame.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Opacity mask of the frame.
    #[must_use]
    pub const fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Frame width in pixels.
    #[must_use]
    pub fn width(&self) -> i32 {
        i32::try_from(self.mask.width()).unwrap_or(i32::MAX)
    }

    /// Frame height in pixels.
    #[must_use]
    pub fn height(&self) -> i32 {
        i32::try_from(self.mask.height()).unwrap_or(i32::MAX)
    }
}

/// Direction an actor is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    /// Towards the top of the screen.
    Up,
    /// Towards the bottom of the screen.
    #[default]
    Down,
    /// Towards the left of the screen.
    Left,
    /// Towards the right of the screen.
    Right,
}

impl Facing {
    /// Every facing, in key order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Status key prefix for this facing.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// What an actor is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stance {
    /// Walking; the key is the bare facing.
    #[default]
    Moving,
    /// Standing still.
    Idle,
    /// Playing an attack animation.
    Attack,
}

impl Stance {
    /// Every stance.
    pub const ALL: [Self; 3] = [Self::Moving, Self::Idle, Self::Attack];
}

/// Animation status: a facing plus a stance.
///
/// Renders as the loader's folder naming: `down`, `down_idle`,
/// `down_attack`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Status {
    /// Facing component.
    pub facing: Facing,
    /// Stance component.
    pub stance: Stance,
}

impl Status {
    /// Creates a status.
    #[must_use]
    pub const fn new(facing: Facing, stance: Stance) -> Self {
        Self { facing, stance }
    }

    /// Key used to look the status up in an [`AnimationSet`].
    ///
    /// # Examples
    ///
    /// ```
    /// use frontier::animation::{Facing, Stance, Status};
    ///
    /// assert_eq!(Status::new(Facing::Left, Stance::Moving).key(), "left");
    /// assert_eq!(Status::new(Facing::Up, Stance::Attack).key(), "up_attack");
    /// ```
    #[must_use]
    pub fn key(self) -> String {
        match self.stance {
            Stance::Moving => self.facing.as_str().to_owned(),
            Stance::Idle => format!("{}_idle", self.facing.as_str()),
            Stance::Attack => format!("{}_attack", self.facing.as_str()),
        }
    }

    /// Every status an actor can enter.
    pub fn all() -> impl Iterator<Item = Self> {
        Facing::ALL
            .into_iter()
            .flat_map(|facing| Stance::ALL.into_iter().map(move |stance| Self::new(facing, stance)))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Mapping from status key to an ordered frame sequence.
#[derive(Debug, Clone, Default)]
pub struct AnimationSet {
    sequences: HashMap<String, Vec<Arc<Frame>>>,
}

impl AnimationSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces the sequence for `status`.
    pub fn insert(&mut self, status: impl Into<String>, frames: Vec<Arc<Frame>>) {
        self.sequences.insert(status.into(), frames);
    }

    /// Builder-style variant of [`AnimationSet::insert`].
    #[must_use]
    pub fn with(mut self, status: impl Into<String>, frames: Vec<Arc<Frame>>) -> Self {
        self.insert(status, frames);
        self
    }

    /// Returns the non-empty frame sequence for `status`.
    ///
    /// # Errors
    ///
    /// Returns [`AnimationError::MissingStatus`] when no sequence is
    /// registered and [`AnimationError::EmptySequence`] when it has no
    /// frames.
    pub fn sequence(&self, status: &str) -> Result<&[Arc<Frame>], AnimationError> {
        let frames = self
            .sequences
            .get(status)
            .ok_or_else(|| AnimationError::MissingStatus {
                status: status.to_owned(),
            })?;
        if frames.is_empty() {
            return Err(AnimationError::EmptySequence {
                status: status.to_owned(),
            });
        }
        Ok(frames)
    }

    /// Checks that every status an actor can enter has frames.
    ///
    /// # Errors
    ///
    /// Returns the first [`AnimationError`] found.
    pub fn validate(&self) -> Result<(), AnimationError> {
        Status::all().try_for_each(|status| self.sequence(&status.key()).map(|_| ()))
    }

    /// Checks that every attack sequence shows frame `trigger`.
    ///
    /// # Errors
    ///
    /// Returns [`AnimationError::AttackTooShort`] for the first facing whose
    /// attack wraps before reaching `trigger`.
    pub fn reaches_attack_frame(&self, trigger: usize) -> Result<(), AnimationError> {
        Facing::ALL.into_iter().try_for_each(|facing| {
            let status = Status::new(facing, Stance::Attack).key();
            let frames = self.sequence(&status)?.len();
            if frames > trigger {
                Ok(())
            } else {
                Err(AnimationError::AttackTooShort {
                    status,
                    frames,
                    trigger,
                })
            }
        })
    }
}

/// Result of advancing an [`Animator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationStep {
    /// Whole frame reached by the cursor, before any wrap.
    pub frame: usize,
    /// Whether the cursor wrapped past the end of the sequence.
    pub wrapped: bool,
}

/// Frame cursor over the sequence of the current status.
#[derive(Debug, Clone)]
pub struct Animator {
    animations: Arc<AnimationSet>,
    status: Status,
    frame_index: f32,
}

impl Animator {
    /// Creates an animator starting at the first frame of `status`.
    ///
    /// # Errors
    ///
    /// Fails when `animations` does not cover every status.
    pub fn new(animations: Arc<AnimationSet>, status: Status) -> Result<Self, AnimationError> {
        animations.validate()?;
        Ok(Self {
            animations,
            status,
            frame_index: 0.0,
        })
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Switches status without touching the cursor.
    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// Current fractional cursor.
    #[must_use]
    pub const fn frame_index(&self) -> f32 {
        self.frame_index
    }

    /// Moves the cursor back to the first frame.
    pub fn restart(&mut self) {
        self.frame_index = 0.0;
    }

    /// Advances the cursor by `speed * dt`, wrapping modulo the sequence
    /// length.
    ///
    /// # Errors
    ///
    /// Fails when the current status has no frames.
    pub fn advance(&mut self, speed: f32, dt: f32) -> Result<AnimationStep, AnimationError> {
        let len = self.sequence_len()?;
        self.frame_index += speed * dt;
        let frame = whole_frame(self.frame_index);
        let wrapped = self.frame_index >= len;
        if wrapped {
            self.frame_index = self.frame_index.rem_euclid(len);
        }
        Ok(AnimationStep { frame, wrapped })
    }

    /// Frame currently displayed.
    ///
    /// # Errors
    ///
    /// Fails when the current status has no frames.
    pub fn current_frame(&self) -> Result<&Arc<Frame>, AnimationError> {
        let key = self.status.key();
        let frames = self.animations.sequence(&key)?;
        let index = whole_frame(self.frame_index) % frames.len();
        frames
            .get(index)
            .ok_or(AnimationError::EmptySequence { status: key })
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "Animation sequences hold a handful of frames."
    )]
    fn sequence_len(&self) -> Result<f32, AnimationError> {
        Ok(self.animations.sequence(&self.status.key())?.len() as f32)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The cursor is non-negative and bounded by the sequence length."
)]
fn whole_frame(frame_index: f32) -> usize {
    frame_index.max(0.0).floor() as usize
}
