//! Run statistics collected from completed tasks
//!
//! The scheduler reports completions through `StatsSink` and never looks at
//! the result. `RunStats` is the collector used between runs: per task id it
//! keeps how often the task was completed, how long it took and how much
//! experience it granted.

use ahash::AHashMap;
use crate::core::error::Result;
use crate::tasks::data::TaskData;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Key used for tasks that carry no task data
pub const UNTRACKED_TASK: &str = "untracked";

/// Receiver of task completion reports
///
/// Fire-and-forget: implementations must swallow their own failures.
pub trait StatsSink {
    fn report_task_complete(&mut self, data: Option<&TaskData>, duration: f32, xp: f32);
}

/// Discards every report
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStats;

impl StatsSink for NullStats {
    fn report_task_complete(&mut self, _data: Option<&TaskData>, _duration: f32, _xp: f32) {}
}

/// Aggregated numbers for one task id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub task_name: String,
    pub total_times_completed: u32,
    pub time_spent: f32,
    pub experience_gained: f32,
}

/// Statistics of a single run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStats {
    pub run_id: Uuid,
    records: AHashMap<String, TaskRecord>,
    resources: AHashMap<String, u32>,
    pub tasks_completed: u32,
    pub total_duration: f32,
    pub total_experience: f32,
    /// Slowest completion seen: (task id, seconds)
    pub longest_task: Option<(String, f32)>,
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            records: AHashMap::new(),
            resources: AHashMap::new(),
            tasks_completed: 0,
            total_duration: 0.0,
            total_experience: 0.0,
            longest_task: None,
        }
    }

    pub fn record(&self, task_id: &str) -> Option<&TaskRecord> {
        self.records.get(task_id)
    }

    /// All records sorted by task id
    pub fn records(&self) -> Vec<(&str, &TaskRecord)> {
        let mut records: Vec<(&str, &TaskRecord)> =
            self.records.iter().map(|(k, v)| (k.as_str(), v)).collect();
        records.sort_by(|a, b| a.0.cmp(b.0));
        records
    }

    /// Credit gathered resources
    pub fn add_resource(&mut self, resource: &str, amount: u32) {
        if amount == 0 {
            return;
        }
        *self.resources.entry(resource.to_string()).or_insert(0) += amount;
    }

    pub fn resource(&self, resource: &str) -> u32 {
        self.resources.get(resource).copied().unwrap_or(0)
    }

    /// All resources sorted by name
    pub fn resources(&self) -> Vec<(&str, u32)> {
        let mut resources: Vec<(&str, u32)> =
            self.resources.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        resources.sort_by(|a, b| a.0.cmp(b.0));
        resources
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl StatsSink for RunStats {
    fn report_task_complete(&mut self, data: Option<&TaskData>, duration: f32, xp: f32) {
        let (task_id, task_name) = match data {
            Some(d) => (d.task_id.as_str(), d.task_name.as_str()),
            None => (UNTRACKED_TASK, UNTRACKED_TASK),
        };

        let record = self.records.entry(task_id.to_string()).or_insert_with(|| TaskRecord {
            task_name: task_name.to_string(),
            ..TaskRecord::default()
        });
        record.total_times_completed += 1;
        record.time_spent += duration;
        record.experience_gained += xp;

        self.tasks_completed += 1;
        self.total_duration += duration;
        self.total_experience += xp;

        let slower = self.longest_task.as_ref().map_or(true, |(_, d)| duration > *d);
        if slower {
            self.longest_task = Some((task_id.to_string(), duration));
        }
    }
}
