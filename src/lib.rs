//! Expedition - proximity task scheduling for a course-running hero

pub mod actors;
pub mod core;
pub mod scheduler;
pub mod simulation;
pub mod stats;
pub mod tasks;
