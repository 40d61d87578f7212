//! Projectile hit detection, run once per tick after movement.
//!
//! Three passes in fixed order: obstacles absorb projectiles, then enemies
//! take hits, then the player. A projectile removed by an earlier pass is
//! invisible to the later ones. Hits are pixel-exact: two sprites collide
//! when their opacity masks intersect at their draw positions.
//!
//! Ownership does not matter. Muzzle offsets keep fresh projectiles clear
//! of the shooter, but a stray enemy shot will still hit another enemy.

use log::debug;

use crate::actor::{Actor, ActorId, ActorVisual, Participant};
use crate::animation::Frame;
use crate::clock::Timestamp;
use crate::collision::ObstacleQuery;
use crate::events::{EventQueue, GameEvent};
use crate::geometry::Rect;
use crate::projectile::{Projectile, ProjectileId};
use crate::registry::Registry;

/// Tally of one combat pass, mostly for logs and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombatReport {
    /// Projectiles stopped by obstacles.
    pub absorbed: Vec<ProjectileId>,
    /// Enemies that lost health.
    pub enemies_hit: Vec<ActorId>,
    /// Whether the player lost health.
    pub player_hit: bool,
}

/// Mutable view of everything a combat pass touches.
pub struct Combatants<'a> {
    /// Live projectiles; hits mark them for removal.
    pub projectiles: &'a mut Registry<ProjectileId, Projectile>,
    /// Live enemies.
    pub enemies: &'a mut Registry<ActorId, Actor>,
    /// The player.
    pub player: &'a mut Actor,
}

/// Whether two frames drawn at `a_rect` and `b_rect` share an opaque pixel.
#[must_use]
pub fn frames_collide(a: &Frame, a_rect: Rect, b: &Frame, b_rect: Rect) -> bool {
    a_rect.overlaps(&b_rect) && a.mask().overlaps(b.mask(), b_rect.top_left() - a_rect.top_left())
}

/// Runs the three collision passes and applies damage.
///
/// Projectiles that hit anything are marked in the registry; the caller
/// compacts it afterwards.
pub fn resolve_projectiles<Q: ObstacleQuery + ?Sized>(
    combatants: Combatants<'_>,
    obstacles: &Q,
    now: Timestamp,
    events: &mut EventQueue,
) -> CombatReport {
    let Combatants {
        projectiles,
        enemies,
        player,
    } = combatants;
    let mut report = CombatReport::default();

    projectiles.mark_where(|id, projectile| {
        let rect = projectile.draw_rect();
        let absorbed = obstacles.drawn_over(rect).any(|obstacle| {
            frames_collide(projectile.frame(), rect, obstacle.frame(), obstacle.rect())
        });
        if absorbed {
            report.absorbed.push(id);
        }
        absorbed
    });

    let targets: Vec<(ActorId, ActorVisual)> = enemies
        .iter()
        .filter_map(|(id, enemy)| enemy.visual(now).ok().map(|visual| (id, visual)))
        .collect();
    let mut struck = Vec::new();
    projectiles.mark_where(|_, projectile| {
        let rect = projectile.draw_rect();
        let before = struck.len();
        struck.extend(
            targets
                .iter()
                .filter(|(_, visual)| frames_collide(projectile.frame(), rect, &visual.frame, visual.rect))
                .map(|(id, _)| *id),
        );
        struck.len() > before
    });
    for id in struck {
        if let Some(enemy) = enemies.get_mut(id) {
            if enemy.take_damage(now) {
                report.enemies_hit.push(id);
                events.push(GameEvent::Hit {
                    target: Participant::Enemy(id),
                });
            }
        }
    }

    if let Ok(visual) = player.visual(now) {
        let mut touched = false;
        projectiles.mark_where(|_, projectile| {
            let hit = frames_collide(
                projectile.frame(),
                projectile.draw_rect(),
                &visual.frame,
                visual.rect,
            );
            touched |= hit;
            hit
        });
        if touched && player.take_damage(now) {
            report.player_hit = true;
            events.push(GameEvent::Hit {
                target: Participant::Player,
            });
        }
    }

    if report != CombatReport::default() {
        debug!(
            "combat: {} absorbed, {} enemies hit, player hit: {}",
            report.absorbed.len(),
            report.enemies_hit.len(),
            report.player_hit
        );
    }
    report
}
