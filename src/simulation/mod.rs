pub mod course;
pub mod execute;
pub mod tick;

pub use course::{task_data_id, Course};
pub use execute::advance_actors;
pub use tick::{run_course, run_tick, SimulationEvent};
