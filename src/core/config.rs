//! Run configuration with documented constants
//!
//! All tuning numbers for the scheduler, the hero and the generated course
//! are collected here. Every section can be overridden from a TOML file;
//! missing keys fall back to the defaults below.

use crate::core::error::{ExpeditionError, Result};
use crate::core::types::Skill;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tuning for the proximity ordering of tasks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Tasks further behind the anchor than this (along x) are skipped
    ///
    /// Negative disables the cutoff. When the cutoff would exclude every
    /// remaining task, the round is retried without it so ordering always
    /// makes progress.
    pub max_backtrack_distance: f32,

    /// Bonus per unit of backtracking subtracted from a task's distance
    ///
    /// Positive values make tasks behind the hero more attractive, so a
    /// nearby tree left behind is collected before the hero walks on.
    /// Zero or negative disables the bonus.
    pub backtrack_weight: f32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_backtrack_distance: -1.0,
            backtrack_weight: 0.0,
        }
    }
}

/// Hero movement and work rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub name: String,
    /// World units per second
    pub move_speed: f32,
    /// Seconds of task work performed per second in range
    pub work_rate: f32,
    /// Damage per second dealt to a kill target
    pub attack_damage: f32,
    /// Distance at which the hero can work on or strike a target
    pub interact_range: f32,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            name: "Hero".into(),
            move_speed: 4.0,
            work_rate: 1.0,
            attack_damage: 10.0,
            interact_range: 1.0,
        }
    }
}

/// An echo: a secondary actor restricted to a set of skills
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EchoConfig {
    pub name: String,
    pub skills: Vec<Skill>,
    #[serde(default = "default_echo_speed")]
    pub move_speed: f32,
}

fn default_echo_speed() -> f32 {
    3.0
}

/// Layout of the generated course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseConfig {
    /// Course length along x (world units)
    pub length: f32,
    /// Half-height of the course band along y
    pub half_height: f32,
    pub trees: usize,
    pub crops: usize,
    pub chests: usize,
    pub enemies: usize,
    pub enemy_health: f32,
    /// Seconds between runtime enemy spawns; zero disables spawning
    pub enemy_spawn_interval: f32,
    /// Upper bound on enemies spawned at runtime
    pub max_runtime_enemies: usize,
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            length: 60.0,
            half_height: 3.0,
            trees: 6,
            crops: 4,
            chests: 2,
            enemies: 3,
            enemy_health: 30.0,
            enemy_spawn_interval: 15.0,
            max_runtime_enemies: 3,
        }
    }
}

/// Top-level configuration for a simulated run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub scheduler: SchedulerConfig,
    pub hero: HeroConfig,
    pub echoes: Vec<EchoConfig>,
    pub course: CourseConfig,
    /// Seconds simulated per tick
    pub tick_seconds: f32,
    /// Hard stop for the host loop
    pub max_ticks: u32,
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            scheduler: SchedulerConfig::default(),
            hero: HeroConfig::default(),
            echoes: Vec::new(),
            course: CourseConfig::default(),
            tick_seconds: 0.1,
            max_ticks: 20_000,
            seed: 42,
        }
    }
}

impl RunConfig {
    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a config from a TOML string and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RunConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.tick_seconds <= 0.0 {
            return Err(ExpeditionError::InvalidConfig(format!(
                "tick_seconds ({}) must be positive",
                self.tick_seconds
            )));
        }

        if self.hero.move_speed <= 0.0 || self.hero.work_rate <= 0.0 {
            return Err(ExpeditionError::InvalidConfig(
                "hero move_speed and work_rate must be positive".into(),
            ));
        }

        if self.hero.interact_range < 0.0 {
            return Err(ExpeditionError::InvalidConfig(
                "hero interact_range must not be negative".into(),
            ));
        }

        if self.course.length <= 0.0 {
            return Err(ExpeditionError::InvalidConfig(format!(
                "course length ({}) must be positive",
                self.course.length
            )));
        }

        if self.course.half_height < 0.0 {
            return Err(ExpeditionError::InvalidConfig(
                "course half_height must not be negative".into(),
            ));
        }

        if let Some(echo) = self.echoes.iter().find(|e| e.skills.is_empty()) {
            return Err(ExpeditionError::InvalidConfig(format!(
                "echo '{}' needs at least one skill",
                echo.name
            )));
        }

        Ok(())
    }
}
