//! Task metadata - what a task is called, what it trains and what it yields
//!
//! Task data is shared by every task spawned from the same kind of source
//! (every oak tree points at the same "cut_oak" entry). It is what the stats
//! collector receives when a task completes.

use crate::core::error::{ExpeditionError, Result};
use crate::core::types::Skill;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A resource a task may drop on completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDrop {
    pub resource: String,
    pub min: u32,
    pub max: u32,
    /// Probability in [0, 1] that the drop happens at all
    #[serde(default = "always")]
    pub chance: f32,
}

fn always() -> f32 {
    1.0
}

impl ResourceDrop {
    pub fn new(resource: &str, min: u32, max: u32) -> Self {
        Self {
            resource: resource.into(),
            min,
            max,
            chance: 1.0,
        }
    }

    /// Roll the dropped amount; zero when the chance roll fails
    pub fn roll<R: Rng>(&self, rng: &mut R) -> u32 {
        if self.chance < 1.0 && rng.gen::<f32>() >= self.chance {
            return 0;
        }
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        rng.gen_range(lo..=hi)
    }
}

/// Static description of a kind of task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskData {
    /// Unique identifier, used as the stats key
    pub task_id: String,
    /// Human-readable name
    pub task_name: String,
    #[serde(default)]
    pub skill: Option<Skill>,
    #[serde(default)]
    pub xp_for_completion: f32,
    /// Seconds of work needed at work rate 1.0
    #[serde(default = "default_duration")]
    pub task_duration: f32,
    /// Restart from zero whenever the task is re-selected after an interruption
    #[serde(default)]
    pub reset_progress_on_interrupt: bool,
    #[serde(default)]
    pub resource_drops: Vec<ResourceDrop>,
}

fn default_duration() -> f32 {
    1.0
}

impl TaskData {
    pub fn new(task_id: &str, task_name: &str, skill: Option<Skill>) -> Self {
        Self {
            task_id: task_id.into(),
            task_name: task_name.into(),
            skill,
            xp_for_completion: 0.0,
            task_duration: default_duration(),
            reset_progress_on_interrupt: false,
            resource_drops: Vec::new(),
        }
    }

    pub fn with_xp(mut self, xp: f32) -> Self {
        self.xp_for_completion = xp;
        self
    }

    pub fn with_duration(mut self, seconds: f32) -> Self {
        self.task_duration = seconds;
        self
    }

    pub fn resetting(mut self) -> Self {
        self.reset_progress_on_interrupt = true;
        self
    }

    pub fn with_drop(mut self, drop: ResourceDrop) -> Self {
        self.resource_drops.push(drop);
        self
    }
}

/// Catalog of all known task data
#[derive(Debug, Clone, Default)]
pub struct TaskCatalog {
    entries: Vec<TaskData>,
}

impl TaskCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in task data for the default course
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();

        catalog.entries.push(
            TaskData::new("cut_tree", "Cut Tree", Some(Skill::Woodcutting))
                .with_xp(5.0)
                .with_duration(3.0)
                .with_drop(ResourceDrop::new("log", 1, 3)),
        );

        // Crops wilt if abandoned half-harvested
        catalog.entries.push(
            TaskData::new("harvest_crop", "Harvest Crop", Some(Skill::Farming))
                .with_xp(4.0)
                .with_duration(2.0)
                .resetting()
                .with_drop(ResourceDrop::new("wheat", 2, 4)),
        );

        catalog.entries.push(
            TaskData::new("open_chest", "Open Chest", Some(Skill::Looting))
                .with_xp(2.0)
                .with_duration(1.0)
                .with_drop(ResourceDrop::new("coin", 5, 20))
                .with_drop(ResourceDrop {
                    resource: "gem".into(),
                    min: 1,
                    max: 1,
                    chance: 0.25,
                }),
        );

        catalog.entries.push(
            TaskData::new("kill_enemy", "Kill Enemy", Some(Skill::Combat)).with_xp(10.0),
        );

        catalog
    }

    /// Add an entry; ids must be unique
    pub fn add(&mut self, data: TaskData) -> Result<()> {
        if self.get(&data.task_id).is_some() {
            return Err(ExpeditionError::DuplicateTaskData(data.task_id));
        }
        self.entries.push(data);
        Ok(())
    }

    /// Get task data by id
    pub fn get(&self, task_id: &str) -> Option<&TaskData> {
        self.entries.iter().find(|d| d.task_id == task_id)
    }

    /// Get task data by id, failing for unknown ids
    pub fn require(&self, task_id: &str) -> Result<&TaskData> {
        self.get(task_id)
            .ok_or_else(|| ExpeditionError::UnknownTaskData(task_id.into()))
    }

    pub fn all(&self) -> &[TaskData] {
        &self.entries
    }

    /// Load task data from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse task data from a TOML string (`[[tasks]]` tables)
    pub fn parse_toml(content: &str) -> Result<Self> {
        let toml_data: TomlTasks = toml::from_str(content)?;

        let mut catalog = Self::new();
        for data in toml_data.tasks {
            catalog.add(data)?;
        }
        Ok(catalog)
    }
}

/// TOML representation of a task data file
#[derive(Debug, Deserialize)]
struct TomlTasks {
    tasks: Vec<TaskData>,
}
