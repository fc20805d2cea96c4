//! Course - one run's world: sources, actors, stats and the task controller
//!
//! Courses are generated from a seed so a run can be replayed exactly.

use crate::actors::Roster;
use crate::core::config::RunConfig;
use crate::core::error::Result;
use crate::core::types::{ActorId, SourceId, Vec2};
use crate::scheduler::{TaskContext, TaskController};
use crate::stats::RunStats;
use crate::tasks::data::TaskCatalog;
use crate::tasks::source::{SourceKind, SourceRegistry};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Task data id used for each kind of source
pub fn task_data_id(kind: SourceKind) -> Option<&'static str> {
    match kind {
        SourceKind::Tree => Some("cut_tree"),
        SourceKind::Crop => Some("harvest_crop"),
        SourceKind::Chest => Some("open_chest"),
        SourceKind::Enemy => Some("kill_enemy"),
        SourceKind::Scenery => None,
    }
}

/// Everything a run needs, owned in one place
pub struct Course {
    pub config: RunConfig,
    pub catalog: TaskCatalog,
    pub sources: SourceRegistry,
    pub roster: Roster,
    pub stats: RunStats,
    pub controller: TaskController,
    pub rng: ChaCha8Rng,
    pub current_tick: u64,
    pub hero: ActorId,
    pub(crate) runtime_enemies: usize,
    pub(crate) spawn_timer: f32,
}

impl Course {
    /// An empty course with the hero and echoes placed at the start line
    pub fn new(config: RunConfig, catalog: TaskCatalog) -> Result<Self> {
        config.validate()?;

        let mut roster = Roster::new();
        let hero = roster.spawn(&config.hero.name, Vec2::default());
        if let Some(actor) = roster.get_mut(hero) {
            actor.move_speed = config.hero.move_speed;
            actor.work_rate = config.hero.work_rate;
            actor.attack_damage = config.hero.attack_damage;
            actor.interact_range = config.hero.interact_range;
        }

        for (i, echo) in config.echoes.iter().enumerate() {
            let id = roster.spawn(&echo.name, Vec2::new(0.0, (i + 1) as f32 * 0.5));
            if let Some(actor) = roster.get_mut(id) {
                actor.capable_skills = echo.skills.clone();
                actor.move_speed = echo.move_speed;
                actor.interact_range = config.hero.interact_range;
            }
        }

        let mut controller = TaskController::new(config.scheduler);
        controller.initialize(&roster);

        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            catalog,
            sources: SourceRegistry::new(),
            roster,
            stats: RunStats::new(),
            controller,
            current_tick: 0,
            hero,
            runtime_enemies: 0,
            spawn_timer: 0.0,
        })
    }

    /// A course populated from the config layout and activated
    pub fn generate(config: RunConfig, catalog: TaskCatalog) -> Result<Self> {
        let mut course = Self::new(config, catalog)?;
        course.populate()?;
        course.activate();
        Ok(course)
    }

    /// Scatter the configured sources along the course
    pub fn populate(&mut self) -> Result<()> {
        let layout = self.config.course.clone();
        let counts = [
            (SourceKind::Tree, layout.trees),
            (SourceKind::Crop, layout.crops),
            (SourceKind::Chest, layout.chests),
            (SourceKind::Enemy, layout.enemies),
        ];

        for (kind, count) in counts {
            for _ in 0..count {
                let x = self.rng.gen_range(0.0..=layout.length);
                let y = self.rng.gen_range(-layout.half_height..=layout.half_height);
                let id = self.place(kind, Vec2::new(x, y))?;
                self.controller.add_task_object(id);
            }
        }

        tracing::info!(
            "Populated course of length {} with {} sources",
            layout.length,
            self.sources.len()
        );
        Ok(())
    }

    /// Spawn a source with the catalog's task data for its kind
    pub fn place(&mut self, kind: SourceKind, position: Vec2) -> Result<SourceId> {
        let data = match task_data_id(kind) {
            Some(id) => Some(self.catalog.require(id)?.clone()),
            None => None,
        };

        let id = match kind {
            SourceKind::Enemy => {
                self.sources
                    .spawn_enemy(position, self.config.course.enemy_health, data)
            }
            _ => self.sources.spawn(kind, Some(position), data),
        };
        Ok(id)
    }

    /// Rebuild the task set and assign the hero
    pub fn activate(&mut self) {
        let mut ctx = TaskContext::new(&mut self.sources, &mut self.roster, &mut self.stats);
        self.controller.activate(&mut ctx);
    }

    /// Spawn an enemy mid-run and register it as a kill task
    pub fn spawn_runtime_enemy(&mut self, position: Vec2) -> Result<SourceId> {
        let id = self.place(SourceKind::Enemy, position)?;
        let mut ctx = TaskContext::new(&mut self.sources, &mut self.roster, &mut self.stats);
        self.controller.add_runtime_task_object(id, &mut ctx);
        self.runtime_enemies += 1;
        Ok(id)
    }

    pub fn hero_position(&self) -> Vec2 {
        self.roster
            .get(self.hero)
            .map(|a| a.position)
            .unwrap_or_default()
    }

    /// No work left and no more runtime enemies to come
    pub fn is_finished(&self) -> bool {
        let spawning = self.config.course.enemy_spawn_interval > 0.0
            && self.runtime_enemies < self.config.course.max_runtime_enemies;
        self.controller.is_empty() && !spawning
    }
}
