//! Schedulable units of work
//!
//! All task variants share one flat struct; `TaskKind` selects the execution
//! strategy. A task is claimable: at most one actor works it at a time.

use crate::core::types::{ActorId, Skill, SourceId, TaskId, Vec2};
use crate::tasks::data::TaskData;
use crate::tasks::source::{probe, Health, Source, SourceRegistry};
use serde::{Deserialize, Serialize};

/// Execution strategy of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    Woodcutting,
    Farming,
    OpenChest,
    /// Progress mirrors the target's health rather than accumulated work
    KillEnemy,
}

impl TaskKind {
    pub fn name(&self) -> &'static str {
        match self {
            TaskKind::Woodcutting => "WoodcuttingTask",
            TaskKind::Farming => "FarmingTask",
            TaskKind::OpenChest => "OpenChestTask",
            TaskKind::KillEnemy => "KillEnemyTask",
        }
    }

    pub fn is_combat(&self) -> bool {
        matches!(self, TaskKind::KillEnemy)
    }
}

/// A claimable unit of work backed by a source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    source: SourceId,
    kind: TaskKind,
    data: Option<TaskData>,
    claimed_by: Option<ActorId>,
    /// 0.0..=1.0; complete at 1.0
    progress: f32,
    last_granted_xp: f32,
    starts: u32,
}

impl Task {
    pub fn new(source: SourceId, kind: TaskKind, data: Option<TaskData>) -> Self {
        Self {
            id: TaskId::for_source(source),
            source,
            kind,
            data,
            claimed_by: None,
            progress: 0.0,
            last_granted_xp: 0.0,
            starts: 0,
        }
    }

    /// Normalize a source into a task, if it has a task capability
    pub fn from_source(source: &Source) -> Option<Self> {
        probe(source).map(|kind| Self::new(source.id, kind, source.task_data.clone()))
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn source(&self) -> SourceId {
        self.source
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn data(&self) -> Option<&TaskData> {
        self.data.as_ref()
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn last_granted_xp(&self) -> f32 {
        self.last_granted_xp
    }

    /// Number of start and restart events seen
    pub fn starts(&self) -> u32 {
        self.starts
    }

    /// Display name: the task data name, or the kind name without data
    pub fn name(&self) -> &str {
        match &self.data {
            Some(data) => &data.task_name,
            None => self.kind.name(),
        }
    }

    pub fn skill(&self) -> Option<Skill> {
        self.data.as_ref().and_then(|d| d.skill)
    }

    pub fn resets_on_interrupt(&self) -> bool {
        self.data
            .as_ref()
            .map(|d| d.reset_progress_on_interrupt)
            .unwrap_or(false)
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Start or restart hook
    pub fn start_task(&mut self) {
        self.starts += 1;
        if !self.kind.is_combat() {
            self.progress = 0.0;
            self.last_granted_xp = 0.0;
        }
    }

    /// Where the actor has to be to work this task
    pub fn target(&self, sources: &SourceRegistry) -> Option<Vec2> {
        sources.position(self.source)
    }

    pub fn claimed_by(&self) -> Option<ActorId> {
        self.claimed_by
    }

    /// True when unclaimed or already claimed by `actor`
    pub fn is_claimable_by(&self, actor: ActorId) -> bool {
        self.claimed_by.map_or(true, |owner| owner == actor)
    }

    pub fn claim(&mut self, actor: ActorId) {
        self.claimed_by = Some(actor);
    }

    pub fn clear_claim(&mut self) {
        self.claimed_by = None;
    }

    /// Apply `seconds` of work. Returns true when this call completed the task.
    ///
    /// Kill tasks ignore work; they advance through `record_strike`.
    pub fn work(&mut self, seconds: f32) -> bool {
        if self.kind.is_combat() || self.is_complete() {
            return false;
        }

        let duration = self.data.as_ref().map(|d| d.task_duration).unwrap_or(1.0);
        if duration <= 0.0 {
            self.progress = 1.0;
        } else {
            self.progress = (self.progress + seconds.max(0.0) / duration).min(1.0);
        }

        if self.is_complete() {
            self.grant_xp();
            return true;
        }
        false
    }

    /// Sync kill progress with the target's health after a strike.
    /// Returns true when this strike completed the task.
    pub fn record_strike(&mut self, health: Health) -> bool {
        if !self.kind.is_combat() || self.is_complete() {
            return false;
        }

        self.progress = if health.max > 0.0 {
            (1.0 - health.current / health.max).clamp(0.0, 1.0)
        } else {
            1.0
        };
        if health.is_dead() {
            self.progress = 1.0;
        }

        if self.is_complete() {
            self.grant_xp();
            return true;
        }
        false
    }

    fn grant_xp(&mut self) {
        self.last_granted_xp = self.data.as_ref().map(|d| d.xp_for_completion).unwrap_or(0.0);
    }
}
