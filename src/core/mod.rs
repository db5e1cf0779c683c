pub mod driver;
pub mod error;
pub mod observer;
pub mod state;
pub mod timeline;

pub use driver::SchedCore;
pub use error::SimError;
pub use state::{Dsq, DsqId, ProcessId, ProcessRecord, Rank, SimCtx, TaskIdx, Ticks};
pub use timeline::{Owner, Segment, Timeline, TimelineBuilder};
