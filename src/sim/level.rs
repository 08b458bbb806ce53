//! Level: grid-to-entity instantiation and the live entity arena
//!
//! The level owns every entity. Same-kind registries (tiles, enemies,
//! bullets) hold ids only and are kept in step with the arena: spawning
//! registers, despawning unregisters, and `reset` clears everything before
//! repopulating from the grid.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Bullet, Enemy, Entity, EntityId, EntityKind, Player, Spawn, Tile};
use super::grid::TileGrid;
use super::rect::Rect;
use crate::tuning::Tuning;

/// Same-kind membership lists (ids in spawn order)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    pub tiles: Vec<EntityId>,
    pub enemies: Vec<EntityId>,
    pub bullets: Vec<EntityId>,
}

impl Registry {
    fn clear(&mut self) {
        self.tiles.clear();
        self.enemies.clear();
        self.bullets.clear();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// 1-based level number
    pub level_no: u32,
    /// Width of the grid in tiles
    pub level_length: usize,
    grid: TileGrid,
    tuning: Tuning,
    /// Live entities (sorted by id)
    entities: Vec<Entity>,
    registry: Registry,
    /// The current player
    player: Option<EntityId>,
    next_id: EntityId,
}

impl Level {
    /// Create a level from its grid and populate it
    pub fn new(level_no: u32, grid: TileGrid, tuning: Tuning) -> Self {
        let mut level = Self {
            level_no,
            level_length: grid.cols(),
            grid,
            tuning,
            entities: Vec::new(),
            registry: Registry::default(),
            player: None,
            next_id: 1,
        };
        level.reset();
        level
    }

    /// Rebuild the entity population from the grid.
    ///
    /// Ids restart from 1, so every reset of the same grid yields the same
    /// entities with the same ids.
    pub fn reset(&mut self) {
        self.entities.clear();
        self.registry.clear();
        self.player = None;
        self.next_id = 1;
        self.level_length = self.grid.cols();

        let tile = self.tuning.tile();
        let spawns: Vec<(Vec2, Spawn)> = self
            .grid
            .cells()
            .filter(|&(_, _, code)| code >= 0)
            .filter_map(|(row, col, code)| {
                let pos = Vec2::new(col as f32 * tile, row as f32 * tile);
                Spawn::from_code(code).map(|spawn| (pos, spawn))
            })
            .collect();

        for (pos, spawn) in spawns {
            self.spawn_at(pos, spawn);
        }

        log::info!(
            "Level {} reset: {} tiles, {} enemies, {} entities, player {}",
            self.level_no,
            self.registry.tiles.len(),
            self.registry.enemies.len(),
            self.entities.len(),
            if self.player.is_some() { "present" } else { "missing" }
        );
    }

    /// Instantiate whatever a grid code spawns with its top-left at `pos`
    pub fn spawn_at(&mut self, pos: Vec2, spawn: Spawn) -> EntityId {
        let t = &self.tuning;
        let (size, kind) = match spawn {
            Spawn::Tile(code) => (Vec2::splat(t.tile()), EntityKind::Tile(Tile { code })),
            Spawn::Player => (t.player_size, EntityKind::Player(Player::new(t))),
            Spawn::Enemy => (t.enemy_size, EntityKind::Enemy(Enemy::new(t))),
            Spawn::ItemBox(item) => (t.item_box_size, EntityKind::ItemBox(item)),
        };
        self.spawn(Rect { pos, size }, kind)
    }

    /// Add an entity, registering it with its kind's registry
    pub fn spawn(&mut self, rect: Rect, kind: EntityKind) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;

        match &kind {
            EntityKind::Tile(_) => self.registry.tiles.push(id),
            EntityKind::Enemy(_) => self.registry.enemies.push(id),
            EntityKind::Bullet(_) => self.registry.bullets.push(id),
            EntityKind::Player(_) => {
                if let Some(previous) = self.player {
                    log::warn!("Level {} has more than one player spawn", self.level_no);
                    self.despawn(previous);
                }
                self.player = Some(id);
            }
            EntityKind::ItemBox(_) => {}
        }

        self.entities.push(Entity { id, rect, kind });
        id
    }

    /// Spawn a bullet centred on `center` flying in `direction`
    pub fn spawn_bullet(&mut self, center: Vec2, direction: i8, owner: EntityId) -> EntityId {
        let rect = Rect::centered(center, self.tuning.bullet_size);
        let bullet = Bullet {
            x_speed: self.tuning.bullet_speed * direction as f32,
            direction,
            owner,
        };
        let id = self.spawn(rect, EntityKind::Bullet(bullet));
        log::debug!("Bullet {id} fired by {owner} at ({:.1}, {:.1})", center.x, center.y);
        id
    }

    /// Remove an entity from the level and from its registry
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.index_of(id)?;
        let entity = self.entities.remove(index);
        match entity.kind {
            EntityKind::Tile(_) => self.registry.tiles.retain(|&t| t != id),
            EntityKind::Enemy(_) => self.registry.enemies.retain(|&e| e != id),
            EntityKind::Bullet(_) => self.registry.bullets.retain(|&b| b != id),
            EntityKind::Player(_) => self.player = None,
            EntityKind::ItemBox(_) => {}
        }
        Some(entity)
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.id).ok()
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id).map(|i| &self.entities[i])
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.index_of(id).map(move |i| &mut self.entities[i])
    }

    /// All live entities in id order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn player_id(&self) -> Option<EntityId> {
        self.player
    }

    pub fn player(&self) -> Option<(&Rect, &Player)> {
        let entity = self.entity(self.player?)?;
        entity.as_player().map(|p| (&entity.rect, p))
    }

    pub fn player_mut(&mut self) -> Option<(&mut Rect, &mut Player)> {
        let id = self.player?;
        let Entity { rect, kind, .. } = self.entity_mut(id)?;
        match kind {
            EntityKind::Player(p) => Some((rect, p)),
            _ => None,
        }
    }

    /// Level extent in world units: (length x tile, rows x tile)
    pub fn world_size(&self) -> Vec2 {
        let tile = self.tuning.tile();
        Vec2::new(
            self.level_length as f32 * tile,
            self.grid.rows() as f32 * tile,
        )
    }

    /// Bounds of every registered entity in `ids`
    pub fn rects_of<'a>(&'a self, ids: &'a [EntityId]) -> impl Iterator<Item = (EntityId, Rect)> + 'a {
        ids.iter()
            .filter_map(move |&id| self.entity(id).map(|e| (id, e.rect)))
    }

    /// The obstacle union for player movement: tiles first, then enemies
    pub fn obstacle_rects(&self) -> Vec<Rect> {
        self.rects_of(&self.registry.tiles)
            .chain(self.rects_of(&self.registry.enemies))
            .map(|(_, r)| r)
            .collect()
    }
}
