pub mod driver;
pub mod loader;
pub mod process;
pub mod stats;

pub use driver::{Sim, SimOutcome, simulate};
pub use loader::{load_processes, parse_processes};
pub use process::Process;
pub use stats::{Averages, Summary};
