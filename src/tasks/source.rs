//! Task sources - the objects on the course that produce work
//!
//! A source is an opaque handle as far as the scheduler is concerned. At
//! registration time `probe` decides whether it yields a task and of which
//! kind; nothing inspects sources by type afterwards.

use ahash::AHashMap;
use crate::core::types::{SourceId, Vec2};
use crate::tasks::data::TaskData;
use crate::tasks::task::TaskKind;
use serde::{Deserialize, Serialize};

/// What kind of object a source is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    Tree,
    Crop,
    Chest,
    Enemy,
    /// Decoration with no task capability
    Scenery,
}

/// Combat health attached to a source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Restore to full at the given maximum
    pub fn init(&mut self, max: f32) {
        self.max = max;
        self.current = max;
    }

    /// Apply damage, returning the remaining health
    pub fn damage(&mut self, amount: f32) -> f32 {
        self.current = (self.current - amount.max(0.0)).max(0.0);
        self.current
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// A work-producing object on the course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub id: SourceId,
    pub kind: SourceKind,
    /// None for sources with no spatial anchor
    pub position: Option<Vec2>,
    pub health: Option<Health>,
    pub task_data: Option<TaskData>,
}

/// Capability probe: which task, if any, a source yields
pub fn probe(source: &Source) -> Option<TaskKind> {
    match source.kind {
        SourceKind::Tree => Some(TaskKind::Woodcutting),
        SourceKind::Crop => Some(TaskKind::Farming),
        SourceKind::Chest => Some(TaskKind::OpenChest),
        SourceKind::Enemy => Some(TaskKind::KillEnemy),
        SourceKind::Scenery => None,
    }
}

/// All live sources on the course
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    sources: AHashMap<SourceId, Source>,
    next_id: u32,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a source and return its handle
    pub fn spawn(
        &mut self,
        kind: SourceKind,
        position: Option<Vec2>,
        task_data: Option<TaskData>,
    ) -> SourceId {
        let id = SourceId(self.next_id);
        self.next_id += 1;
        self.sources.insert(
            id,
            Source {
                id,
                kind,
                position,
                health: None,
                task_data,
            },
        );
        id
    }

    /// Spawn an enemy with full health
    pub fn spawn_enemy(
        &mut self,
        position: Vec2,
        max_health: f32,
        task_data: Option<TaskData>,
    ) -> SourceId {
        let id = self.spawn(SourceKind::Enemy, Some(position), task_data);
        if let Some(source) = self.sources.get_mut(&id) {
            source.health = Some(Health::new(max_health));
        }
        id
    }

    /// Remove a source from the course
    pub fn despawn(&mut self, id: SourceId) -> Option<Source> {
        self.sources.remove(&id)
    }

    pub fn get(&self, id: SourceId) -> Option<&Source> {
        self.sources.get(&id)
    }

    pub fn get_mut(&mut self, id: SourceId) -> Option<&mut Source> {
        self.sources.get_mut(&id)
    }

    pub fn contains(&self, id: SourceId) -> bool {
        self.sources.contains_key(&id)
    }

    pub fn position(&self, id: SourceId) -> Option<Vec2> {
        self.sources.get(&id).and_then(|s| s.position)
    }

    pub fn health(&self, id: SourceId) -> Option<Health> {
        self.sources.get(&id).and_then(|s| s.health)
    }

    /// Damage a source with health; None when it has none or is gone
    pub fn damage(&mut self, id: SourceId, amount: f32) -> Option<Health> {
        let health = self.sources.get_mut(&id)?.health.as_mut()?;
        health.damage(amount);
        Some(*health)
    }

    /// Move a source (enemies wander)
    pub fn set_position(&mut self, id: SourceId, position: Vec2) {
        if let Some(source) = self.sources.get_mut(&id) {
            source.position = Some(position);
        }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Sources in spawn order
    pub fn iter(&self) -> impl Iterator<Item = &Source> {
        let mut sources: Vec<&Source> = self.sources.values().collect();
        sources.sort_by_key(|s| s.id);
        sources.into_iter()
    }
}
