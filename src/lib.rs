pub mod core;
pub mod scheduler;
pub mod sim;

pub use crate::core::{Owner, ProcessRecord, Segment, SimError, Timeline, TimelineBuilder};
pub use scheduler::{Algorithm, Scheduler};
pub use sim::{Process, Sim, SimOutcome, simulate};
