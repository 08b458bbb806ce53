//! Shooting, projectiles and bullet damage
//!
//! Bullets never deal damage themselves. Each soldier checks the bullet
//! registry during its own update, destroys the first bullet it overlaps
//! (ignoring its own) and takes the damage. Bullets only check tiles and the
//! level edges.

use glam::Vec2;

use super::entity::{EntityId, EntityKind};
use super::level::Level;
use super::rect::Rect;
use crate::facing_from;

/// Fire if the weapon is ready.
///
/// Consumes one round and restarts the cooldown; returns the bullet's spawn
/// centre, offset from the shooter's centre by 75% of its half-width in the
/// facing direction.
pub fn try_shoot(
    shooter: &Rect,
    direction: i8,
    ammo: &mut u32,
    cooldown: &mut u32,
    reload: u32,
) -> Option<Vec2> {
    if *cooldown != 0 || *ammo == 0 {
        return None;
    }
    *cooldown = reload;
    *ammo -= 1;
    let offset = 0.75 * (shooter.width() / 2.0) * direction as f32;
    Some(shooter.center() + Vec2::new(offset, 0.0))
}

/// First bullet overlapping `rect` that was not fired by `owner`
fn hit_by_bullet(level: &Level, rect: &Rect, owner: EntityId) -> Option<EntityId> {
    level
        .registry()
        .bullets
        .iter()
        .copied()
        .find(|&id| {
            level.entity(id).is_some_and(|e| {
                e.as_bullet().is_some_and(|b| b.owner != owner) && e.rect.overlaps(rect)
            })
        })
}

/// Player weapon cooldown, requested shots, and incoming bullet hits
pub fn update_player(level: &mut Level) {
    let Some(id) = level.player_id() else {
        return;
    };
    let reload = level.tuning().player_cooldown;
    let damage = level.tuning().bullet_damage;

    let mut shot = None;
    if let Some((rect, player)) = level.player_mut() {
        if player.shoot_cooldown > 0 {
            player.shoot_cooldown -= 1;
        }
        if std::mem::take(&mut player.shoot_requested) && player.is_alive() {
            shot = try_shoot(
                rect,
                player.direction,
                &mut player.ammo,
                &mut player.shoot_cooldown,
                reload,
            )
            .map(|center| (center, player.direction));
        }
    }
    if let Some((center, direction)) = shot {
        level.spawn_bullet(center, direction, id);
    }

    let Some(rect) = level.player().map(|(rect, _)| *rect) else {
        return;
    };
    if let Some(bullet) = hit_by_bullet(level, &rect, id) {
        level.despawn(bullet);
        if let Some((_, player)) = level.player_mut() {
            player.take_damage(damage);
            log::debug!("Player hit by bullet {bullet}, health {}", player.health);
            if !player.is_alive() {
                log::info!("Player killed");
            }
        }
    }
}

/// Enemy AI: cool down, face the player when in range and fire, then take
/// bullet hits. Enemies that reach zero health leave the level.
pub fn update_enemies(level: &mut Level) {
    let target = level.player().map(|(rect, _)| rect.center());
    let range = level.tuning().enemy_range;
    let reload = level.tuning().enemy_cooldown;
    let damage = level.tuning().bullet_damage;

    let enemies = level.registry().enemies.clone();
    for id in enemies {
        let mut shot = None;
        if let Some(entity) = level.entity_mut(id) {
            let rect = entity.rect;
            let EntityKind::Enemy(enemy) = &mut entity.kind else {
                continue;
            };

            if enemy.shoot_cooldown > 0 {
                enemy.shoot_cooldown -= 1;
            }

            if let Some(target) = target {
                let to_player = target - rect.center();
                if to_player.length() < range {
                    enemy.direction = facing_from(to_player.x, enemy.direction);
                    shot = try_shoot(
                        &rect,
                        enemy.direction,
                        &mut enemy.ammo,
                        &mut enemy.shoot_cooldown,
                        reload,
                    )
                    .map(|center| (center, enemy.direction));
                }
            }
        }
        if let Some((center, direction)) = shot {
            level.spawn_bullet(center, direction, id);
        }

        let Some(rect) = level.entity(id).map(|e| e.rect) else {
            continue;
        };
        if let Some(bullet) = hit_by_bullet(level, &rect, id) {
            level.despawn(bullet);
            let dead = match level.entity_mut(id).map(|e| &mut e.kind) {
                Some(EntityKind::Enemy(enemy)) => {
                    enemy.health = enemy.health.saturating_sub(damage);
                    !enemy.is_alive()
                }
                _ => false,
            };
            if dead {
                log::debug!("Enemy {id} killed");
                level.despawn(id);
            }
        }
    }
}

/// Move every bullet; remove those that left the level or hit a tile
pub fn update_bullets(level: &mut Level) {
    let world_width = level.world_size().x;
    let bullets = level.registry().bullets.clone();

    for id in bullets {
        let Some(entity) = level.entity_mut(id) else {
            continue;
        };
        let EntityKind::Bullet(bullet) = &entity.kind else {
            continue;
        };
        entity.rect.pos.x += bullet.x_speed;
        let rect = entity.rect;

        let off_level = rect.right() < 0.0 || rect.left() > world_width;
        let hit_tile = || {
            level
                .rects_of(&level.registry().tiles)
                .any(|(_, tile)| tile.overlaps(&rect))
        };
        if off_level || hit_tile() {
            log::debug!("Bullet {id} removed at x={:.0}", rect.left());
            level.despawn(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::TileGrid;
    use crate::tuning::Tuning;

    fn level(rows: &[&[i32]]) -> Level {
        Level::new(1, TileGrid::from_rows(rows), Tuning::default())
    }

    fn enemy_state(level: &Level) -> (u32, u32, i8) {
        let e = level.entity(level.registry().enemies[0]).unwrap().as_enemy().unwrap();
        (e.ammo, e.shoot_cooldown, e.direction)
    }

    #[test]
    fn test_try_shoot_gating() {
        let shooter = Rect::new(0.0, 0.0, 20.0, 30.0);
        let (mut ammo, mut cooldown) = (2, 3);
        assert_eq!(try_shoot(&shooter, 1, &mut ammo, &mut cooldown, 100), None);
        assert_eq!((ammo, cooldown), (2, 3));

        cooldown = 0;
        assert_eq!(
            try_shoot(&shooter, -1, &mut ammo, &mut cooldown, 100),
            Some(Vec2::new(10.0 - 7.5, 15.0))
        );
        assert_eq!((ammo, cooldown), (1, 100));

        let (mut ammo, mut cooldown) = (0, 0);
        assert_eq!(try_shoot(&shooter, 1, &mut ammo, &mut cooldown, 100), None);
        assert_eq!(cooldown, 0);
    }

    #[test]
    fn test_enemy_fires_at_player_in_range() {
        // Player three tiles left of the enemy (90 units)
        let mut level = level(&[&[15, -1, -1, 16]]);
        update_enemies(&mut level);

        let (ammo, cooldown, direction) = enemy_state(&level);
        assert_eq!(direction, -1);
        assert_eq!(ammo, 19);
        assert_eq!(cooldown, 100);
        assert_eq!(level.registry().bullets.len(), 1);

        let bullet = level.entity(level.registry().bullets[0]).unwrap();
        let b = bullet.as_bullet().unwrap();
        assert_eq!(b.x_speed, -2.0);
        assert_eq!(b.owner, level.registry().enemies[0]);
        assert_eq!(bullet.rect.center(), Vec2::new(90.0 + 10.0 - 7.5, 15.0));
    }

    #[test]
    fn test_enemy_cooldown_blocks_shot() {
        let mut level = level(&[&[15, -1, -1, 16]]);
        update_enemies(&mut level);
        for _ in 0..99 {
            update_enemies(&mut level);
        }
        // 1 + 99 ticks: cooldown still counting down
        assert_eq!(level.registry().bullets.len(), 1);
        assert_eq!(enemy_state(&level).1, 1);

        update_enemies(&mut level);
        // Cooldown hit zero this tick and the shot went out
        assert_eq!(level.registry().bullets.len(), 2);
        assert_eq!(enemy_state(&level).1, 100);
    }

    #[test]
    fn test_enemy_without_ammo_never_fires() {
        let mut level = level(&[&[15, -1, -1, 16]]);
        let id = level.registry().enemies[0];
        if let Some(EntityKind::Enemy(e)) = level.entity_mut(id).map(|e| &mut e.kind) {
            e.ammo = 0;
        }
        for _ in 0..5 {
            update_enemies(&mut level);
        }
        assert!(level.registry().bullets.is_empty());
        assert_eq!(enemy_state(&level).1, 0);
    }

    #[test]
    fn test_enemy_ignores_distant_player() {
        let mut row = vec![-1; 12];
        row[0] = 16;
        row[11] = 15;
        let mut level = level(&[&row]);
        update_enemies(&mut level);
        assert!(level.registry().bullets.is_empty());
        assert_eq!(enemy_state(&level), (20, 0, 1));
    }

    #[test]
    fn test_bullet_flies_and_leaves_level() {
        let mut level = level(&[&[15, -1, -1, -1]]);
        let owner = level.player_id().unwrap();
        let id = level.spawn_bullet(Vec2::new(118.0, 15.0), 1, owner);

        update_bullets(&mut level);
        assert_eq!(level.entity(id).unwrap().rect.center().x, 120.0);

        // Left edge passes x=120 (world width) after a few ticks
        for _ in 0..4 {
            update_bullets(&mut level);
        }
        assert!(level.entity(id).is_none());
        assert!(level.registry().bullets.is_empty());
    }

    #[test]
    fn test_bullet_leaving_left_edge() {
        let mut level = level(&[&[-1, -1, 15]]);
        let id = level.spawn_bullet(Vec2::new(-4.0, 15.0), -1, 99);
        update_bullets(&mut level);
        // Right edge now at -1
        assert!(level.entity(id).is_none());
    }

    #[test]
    fn test_bullet_removed_on_tile_contact() {
        let mut level = level(&[&[-1, -1, 3], &[15, -1, -1]]);
        let id = level.spawn_bullet(Vec2::new(70.0, 15.0), 1, 99);
        update_bullets(&mut level);
        assert!(level.entity(id).is_none());
        // Tiles are unaffected
        assert_eq!(level.registry().tiles.len(), 1);
    }

    #[test]
    fn test_player_hit_by_bullet() {
        let mut level = level(&[&[15, -1, -1]]);
        let (rect, _) = level.player().unwrap();
        let center = rect.center();
        level.spawn_bullet(center, 1, 42);
        level.spawn_bullet(center, 1, 42);

        update_player(&mut level);
        assert_eq!(level.player().unwrap().1.health, 95);
        // One bullet per tick
        assert_eq!(level.registry().bullets.len(), 1);

        update_player(&mut level);
        assert_eq!(level.player().unwrap().1.health, 90);
        assert!(level.registry().bullets.is_empty());
    }

    #[test]
    fn test_player_not_hit_by_own_bullet() {
        let mut level = level(&[&[15, -1, -1, -1, -1]]);
        if let Some((_, player)) = level.player_mut() {
            player.shoot_requested = true;
        }
        update_player(&mut level);
        assert_eq!(level.registry().bullets.len(), 1);
        let (_, player) = level.player().unwrap();
        assert_eq!(player.health, 100);
        assert_eq!(player.ammo, 19);
        assert_eq!(player.shoot_cooldown, 20);
        assert!(!player.shoot_requested);
    }

    #[test]
    fn test_enemy_killed_by_player_bullets() {
        let mut level = level(&[&[15, -1, -1, -1, -1, -1, -1, -1, -1, -1, 16]]);
        let enemy = level.registry().enemies[0];
        let player = level.player_id().unwrap();
        let center = level.entity(enemy).unwrap().rect.center();

        for _ in 0..20 {
            level.spawn_bullet(center, 1, player);
            update_enemies(&mut level);
        }
        assert!(level.entity(enemy).is_none());
        assert!(level.registry().enemies.is_empty());
        assert!(level.registry().bullets.is_empty());
    }
}
