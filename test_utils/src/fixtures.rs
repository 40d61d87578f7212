//! Solid-frame asset fixtures.

use std::sync::Arc;

use frontier::actor::ActorKind;
use frontier::animation::{AnimationSet, Frame, Status};
use frontier::level::AssetCatalog;

/// Display size of every fixture actor frame.
pub const ACTOR_SIZE: (u32, u32) = (40, 60);

/// Animation set with `frames` solid frames for every status.
///
/// # Examples
/// ```
/// use test_utils::solid_animations;
///
/// let set = solid_animations("hero", 4);
/// assert!(set.validate().is_ok());
/// assert_eq!(set.sequence("left_attack").map(<[_]>::len).ok(), Some(4));
/// ```
#[must_use]
pub fn solid_animations(prefix: &str, frames: usize) -> AnimationSet {
    let (width, height) = ACTOR_SIZE;
    Status::all().fold(AnimationSet::new(), |set, status| {
        let key = status.key();
        let sequence = (0..frames)
            .map(|i| Arc::new(Frame::solid(format!("{prefix}/{key}/{i}"), width, height)))
            .collect();
        set.with(key, sequence)
    })
}

/// Catalog with eight-frame solid animations for every kind, a solid 8x8
/// projectile and a 64x64 `fence` obstacle sprite.
#[must_use]
pub fn solid_catalog() -> AssetCatalog {
    ActorKind::ALL.into_iter().fold(
        AssetCatalog::new(Arc::new(Frame::solid("particle", 8, 8)))
            .with_sprite("fence", Frame::solid("fence", 64, 64)),
        |catalog, kind| catalog.with_animations(kind, solid_animations(kind.tag(), 8)),
    )
}
