//! Property tests for axis-separated collision resolution.

use std::sync::Arc;

use frontier::collision::{Obstacle, ObstacleSet};
use frontier::geometry::Rect;
use frontier::kinematics::Body;
use frontier::Frame;
use glam::{IVec2, Vec2};
use proptest::prelude::*;
use test_utils::assert_disjoint;

/// Obstacles are placed one per cell of a 4x4 grid, so layouts never overlap.
const CELL: i32 = 60;
const GRID: usize = 4;

/// Cell index, size and offset inside the cell.
type Placement = (usize, i32, i32, i32, i32);

fn layout(placements: &[Placement], clear_of: Rect) -> ObstacleSet {
    let mut used = [false; GRID * GRID];
    placements
        .iter()
        .filter_map(|&(cell, width, height, off_x, off_y)| {
            let slot = used.get_mut(cell)?;
            if std::mem::replace(slot, true) {
                return None;
            }
            let column = i32::try_from(cell % GRID).ok()?;
            let row = i32::try_from(cell / GRID).ok()?;
            let top_left = IVec2::new(
                column * CELL + off_x % (CELL - width + 1),
                row * CELL + off_y % (CELL - height + 1),
            );
            let frame = Frame::solid("block", width.unsigned_abs(), height.unsigned_abs());
            Some(Obstacle::new(top_left, Arc::new(frame)))
        })
        .filter(|obstacle| !obstacle.hitbox().overlaps(&clear_of))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_advance_never_ends_inside_an_obstacle(
        placements in prop::collection::vec(
            (0..GRID * GRID, 10i32..=50, 10i32..=50, 0i32..=50, 0i32..=50),
            1..10,
        ),
        cx in -30i32..270,
        cy in -30i32..270,
        dx in -1.0f32..1.0,
        dy in -1.0f32..1.0,
        dt in 0.0f32..0.05,
        steps in 1usize..12,
    ) {
        let mut body = Body::solid(IVec2::new(cx, cy), IVec2::new(20, 20), 200.0);
        let world = layout(&placements, body.hitbox());
        let hitboxes: Vec<Rect> = world.iter().map(Obstacle::hitbox).collect();
        for (i, a) in hitboxes.iter().enumerate() {
            for b in hitboxes.iter().skip(i + 1) {
                assert_disjoint(*a, *b);
            }
        }

        body.set_direction(Vec2::new(dx, dy));
        for _ in 0..steps {
            body.advance(dt, &world);
            for blocker in &hitboxes {
                prop_assert!(
                    !body.hitbox().overlaps(blocker),
                    "hitbox {:?} ended inside {:?}",
                    body.hitbox(),
                    blocker
                );
            }
        }
    }

    #[test]
    fn prop_rectangles_stay_centred_on_the_position(
        dx in -1.0f32..1.0,
        dy in -1.0f32..1.0,
        dt in 0.0f32..2.0,
    ) {
        let mut body = Body::new(IVec2::new(-300, -300), IVec2::new(48, 64), 200.0);
        body.set_direction(Vec2::new(dx, dy));
        body.advance(dt, &ObstacleSet::new());
        let position = body.position();
        prop_assert!((position.x - body.hitbox().center_f32().x).abs() <= 0.5);
        prop_assert!((position.y - body.hitbox().center_f32().y).abs() <= 0.5);
        prop_assert_eq!(body.rect().center(), body.hitbox().center());
    }

    #[test]
    fn prop_travel_never_exceeds_speed(
        dx in -5.0f32..5.0,
        dy in -5.0f32..5.0,
        dt in 0.0f32..1.0,
    ) {
        let mut body = Body::new(IVec2::ZERO, IVec2::new(40, 40), 150.0);
        body.set_direction(Vec2::new(dx, dy));
        body.advance(dt, &ObstacleSet::new());
        prop_assert!(body.position().length() <= 150.0 * dt + 1e-3);
    }
}
