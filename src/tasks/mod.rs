//! Tasks, their metadata and the sources that produce them

pub mod data;
pub mod source;
pub mod task;

pub use data::{ResourceDrop, TaskCatalog, TaskData};
pub use source::{probe, Health, Source, SourceKind, SourceRegistry};
pub use task::{Task, TaskKind};
