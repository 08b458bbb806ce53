//! Player movement and tile collision
//!
//! Movement is resolved one axis at a time against the obstacle union
//! (every tile and enemy). The horizontal pass is all-or-nothing: a blocked
//! move stops dead with no sliding. The vertical pass snaps the player
//! flush against whatever it hit. Corners are decided by the horizontal
//! pass, which runs first.

use glam::Vec2;

use super::entity::Player;
use super::level::Level;
use super::rect::Rect;

/// First obstacle overlapping `rect`, in obstacle order
fn first_hit<'a>(rect: &Rect, obstacles: &'a [Rect]) -> Option<&'a Rect> {
    obstacles.iter().find(|o| rect.overlaps(o))
}

/// Advance the player by one tick.
///
/// `world` is the level extent. Returns whether the level was completed
/// this tick; nothing in the current rules completes a level, so this is
/// always `false`.
pub fn move_player(
    rect: &mut Rect,
    player: &mut Player,
    obstacles: &[Rect],
    world: Vec2,
    gravity: f32,
) -> bool {
    player.vel.y += gravity;

    let mut dx = player.vel.x;
    let mut dy = player.vel.y;

    // Horizontal probe (the vertical probe below starts from the unmoved x)
    if first_hit(&rect.translated(Vec2::new(dx, 0.0)), obstacles).is_some() {
        dx = 0.0;
    }

    // Vertical probe
    if let Some(hit) = first_hit(&rect.translated(Vec2::new(0.0, dy)), obstacles) {
        if player.vel.y < 0.0 {
            // Head bump
            player.vel.y = 0.0;
            dy = hit.bottom() - rect.top();
        } else {
            player.vel.y = 0.0;
            player.in_air = false;
            dy = hit.top() - rect.bottom();
        }
    }

    // Fell out of the level
    if rect.bottom() > world.y {
        player.health = 0;
    }

    // Level edges are walls
    if rect.left() + dx < 0.0 || rect.right() + dx > world.x {
        dx = 0.0;
    }

    rect.pos += Vec2::new(dx, dy);

    false
}

/// Run `move_player` for the level's current player.
///
/// Returns the level-complete signal; a level without a living player
/// never completes.
pub fn step_player(level: &mut Level) -> bool {
    let obstacles = level.obstacle_rects();
    let world = level.world_size();
    let gravity = level.tuning().gravity;

    match level.player_mut() {
        Some((rect, player)) if player.is_alive() => {
            let complete = move_player(rect, player, &obstacles, world, gravity);
            if !player.is_alive() {
                log::info!("Player fell out of the level at x={:.0}", rect.left());
            }
            complete
        }
        _ => false,
    }
}
