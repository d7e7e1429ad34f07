//! Live on-screen entities, one ordered sequence per kind.
//!
//! The spawner only appends here; per-frame processors discover entities by
//! reading these sequences, never through a handle returned at spawn time.

use crate::entities::{Entity, EntityKind};

#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub fireballs: Vec<Entity>,
    pub clouds: Vec<Entity>,
    pub bugs: Vec<Entity>,
}

impl Scene {
    pub fn spawn(&mut self, kind: EntityKind, x: i32, y: i32) {
        log::debug!("spawn {:?} at ({}, {})", kind, x, y);
        let entity = Entity { x, y, kind };
        self.of_kind_mut(&entity.kind).push(entity);
    }

    pub fn of_kind(&self, kind: &EntityKind) -> &[Entity] {
        match kind {
            EntityKind::Fireball => &self.fireballs,
            EntityKind::Cloud => &self.clouds,
            EntityKind::Bug => &self.bugs,
        }
    }

    pub fn of_kind_mut(&mut self, kind: &EntityKind) -> &mut Vec<Entity> {
        match kind {
            EntityKind::Fireball => &mut self.fireballs,
            EntityKind::Cloud => &mut self.clouds,
            EntityKind::Bug => &mut self.bugs,
        }
    }

    pub fn clear(&mut self) {
        self.fireballs.clear();
        self.clouds.clear();
        self.bugs.clear();
    }
}
