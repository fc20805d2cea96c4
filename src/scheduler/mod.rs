//! Task scheduling: proximity ordering and the task controller

pub mod controller;
pub mod proximity;

pub use controller::{Selection, TaskContext, TaskController, ALL_COMPLETE};
pub use proximity::{order_by_proximity, BacktrackRule};
