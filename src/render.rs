//! Camera-relative, depth-sorted draw lists.
//!
//! Nothing here touches a window. The renderer turns world-space sprites into
//! screen-space [`DrawCommand`]s ordered back to front; whatever blits pixels
//! consumes the resulting [`DrawList`] as is.

use std::sync::Arc;

use bevy::prelude::Resource;
use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::animation::Frame;
use crate::constants::{SILHOUETTE_COLOUR, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::geometry::Rect;

/// Size of the visible screen area in pixels.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    /// Half the viewport, rounded towards zero.
    #[must_use]
    pub const fn half(self) -> IVec2 {
        IVec2::new(self.width / 2, self.height / 2)
    }
}

/// World-to-screen translation keeping the tracked point mid-screen.
///
/// ```
/// use frontier::render::{camera_offset, Viewport};
/// use glam::IVec2;
///
/// let offset = camera_offset(IVec2::new(700, 400), Viewport::default());
/// assert_eq!(offset, IVec2::new(60, 40));
/// ```
#[must_use]
pub const fn camera_offset(tracked_center: IVec2, viewport: Viewport) -> IVec2 {
    let half = viewport.half();
    IVec2::new(tracked_center.x - half.x, tracked_center.y - half.y)
}

/// A world-space sprite awaiting depth sorting.
#[derive(Debug, Clone)]
pub struct Sprite {
    /// Frame to draw.
    pub frame: Arc<Frame>,
    /// Display rectangle; its centre y is the depth key.
    pub rect: Rect,
    /// Draw the flat-colour silhouette instead of the frame.
    pub silhouette: bool,
}

/// One blit in screen space.
#[derive(Debug, Clone)]
pub struct DrawCommand {
    /// Frame to draw.
    pub frame: Arc<Frame>,
    /// Screen position of the frame's top-left corner.
    pub position: IVec2,
    /// Draw the flat-colour silhouette instead of the frame.
    pub silhouette: bool,
}

impl DrawCommand {
    /// Pixels to upload in place of the frame's texture while blinking.
    ///
    /// The silhouette is the frame's mask filled with [`SILHOUETTE_COLOUR`]
    /// on a transparent background, sized like the frame. `None` means the
    /// frame is drawn as is.
    #[must_use]
    pub fn silhouette_rgba(&self) -> Option<Vec<u8>> {
        self.silhouette
            .then(|| self.frame.mask().to_rgba(SILHOUETTE_COLOUR))
    }
}

/// Everything to draw this frame, back to front.
#[derive(Resource, Debug, Clone, Default)]
pub struct DrawList {
    /// Screen position of the background's top-left corner.
    pub background: IVec2,
    /// Sprite blits in painter's order.
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Builds the draw list for a camera following `tracked_center`.
    ///
    /// Sprites are sorted by the centre y of their display rectangle; equal
    /// depths keep their input order. Each frame is centred on its display
    /// rectangle's centre.
    #[must_use]
    pub fn compose(tracked_center: IVec2, viewport: Viewport, mut sprites: Vec<Sprite>) -> Self {
        let offset = camera_offset(tracked_center, viewport);
        sprites.sort_by_key(|sprite| sprite.rect.center_y());
        let commands = sprites
            .into_iter()
            .map(|sprite| {
                let drawn = Rect::from_center(
                    sprite.rect.center(),
                    sprite.frame.width(),
                    sprite.frame.height(),
                );
                DrawCommand {
                    position: drawn.top_left() - offset,
                    frame: sprite.frame,
                    silhouette: sprite.silhouette,
                }
            })
            .collect();
        Self {
            background: -offset,
            commands,
        }
    }

    /// Frame names in draw order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().map(|command| command.frame.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::Mask;
    use rstest::rstest;

    fn sprite(name: &str, center: IVec2) -> Sprite {
        Sprite {
            frame: Arc::new(Frame::solid(name, 20, 30)),
            rect: Rect::from_center(center, 20, 30),
            silhouette: false,
        }
    }

    #[rstest]
    fn silhouettes_follow_the_mask() {
        let mask = Mask::from_alpha(2, 1, &[255, 0]).expect("mask");
        let blinking = DrawCommand {
            frame: Arc::new(Frame::new("ghost", mask)),
            position: IVec2::ZERO,
            silhouette: true,
        };
        assert_eq!(
            blinking.silhouette_rgba(),
            Some(vec![255, 255, 255, 255, 0, 0, 0, 0])
        );
        let steady = DrawCommand {
            silhouette: false,
            ..blinking
        };
        assert_eq!(steady.silhouette_rgba(), None);
    }

    #[rstest]
    fn deeper_sprites_are_drawn_later() {
        let list = DrawList::compose(
            IVec2::ZERO,
            Viewport::default(),
            vec![sprite("b", IVec2::new(0, 200)), sprite("a", IVec2::new(0, 50))],
        );
        assert_eq!(list.names().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[rstest]
    fn equal_depths_keep_insertion_order() {
        let list = DrawList::compose(
            IVec2::ZERO,
            Viewport::default(),
            vec![
                sprite("first", IVec2::new(90, 10)),
                sprite("second", IVec2::new(-90, 10)),
            ],
        );
        assert_eq!(list.names().collect::<Vec<_>>(), ["first", "second"]);
    }

    #[rstest]
    #[case::tracked_sprite(IVec2::new(640, 360), IVec2::new(630, 345))]
    #[case::to_the_left(IVec2::new(540, 360), IVec2::new(530, 345))]
    fn positions_are_camera_relative(#[case] center: IVec2, #[case] expected: IVec2) {
        let list = DrawList::compose(
            IVec2::new(640, 360),
            Viewport::default(),
            vec![sprite("s", center)],
        );
        assert_eq!(list.background, IVec2::ZERO);
        assert_eq!(list.commands.first().map(|c| c.position), Some(expected));
    }
}
