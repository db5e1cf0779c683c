pub mod fcfs;
pub mod mlfq;
pub mod rr;
pub mod sjf;
pub mod srtf;

use log::debug;
use std::fmt;
use std::str::FromStr;

use crate::core::{ProcessRecord, SchedCore, SimCtx, SimError, Ticks, Timeline};
pub use fcfs::FcfsScheduler;
pub use mlfq::MlfqScheduler;
pub use rr::RrScheduler;
pub use sjf::SjfScheduler;
pub use srtf::SrtfScheduler;

pub const DEFAULT_QUANTUM: Ticks = 2;
pub const DEFAULT_MLFQ_Q1: Ticks = 2;
pub const DEFAULT_MLFQ_Q2: Ticks = 4;

pub trait Scheduler {
    type Config;

    fn init(ctx: &mut SimCtx<'_>, config: Self::Config) -> Self;

    /// Makes one scheduling decision: dispatch a task, or leave the CPU idle
    /// until the next arrival. Every step must advance `ctx.now`.
    fn step(&mut self, ctx: &mut SimCtx<'_>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Fcfs,
    Sjf,
    Srtf,
    RoundRobin { quantum: Ticks },
    Mlfq { q1: Ticks, q2: Ticks },
}

impl Algorithm {
    pub fn all(quantum: Ticks, q1: Ticks, q2: Ticks) -> [Algorithm; 5] {
        [
            Algorithm::Fcfs,
            Algorithm::Sjf,
            Algorithm::Srtf,
            Algorithm::RoundRobin { quantum },
            Algorithm::Mlfq { q1, q2 },
        ]
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::Sjf => "SJF",
            Algorithm::Srtf => "SRTF",
            Algorithm::RoundRobin { .. } => "RR",
            Algorithm::Mlfq { .. } => "MLFQ",
        }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        let invalid = |reason: &str| SimError::InvalidConfig {
            policy: self.name(),
            reason: reason.to_string(),
        };

        match *self {
            Algorithm::RoundRobin { quantum: 0 } => Err(invalid("quantum must be > 0")),
            Algorithm::Mlfq { q1: 0, .. } => Err(invalid("q1 must be > 0")),
            Algorithm::Mlfq { q2: 0, .. } => Err(invalid("q2 must be > 0")),
            _ => Ok(()),
        }
    }

    pub(crate) fn run(&self, records: &mut [ProcessRecord]) -> Timeline {
        debug!("running {self}");
        match *self {
            Algorithm::Fcfs => SchedCore::<FcfsScheduler>::new(records, ()).run_to_completion(),
            Algorithm::Sjf => SchedCore::<SjfScheduler>::new(records, ()).run_to_completion(),
            Algorithm::Srtf => SchedCore::<SrtfScheduler>::new(records, ()).run_to_completion(),
            Algorithm::RoundRobin { quantum } => {
                SchedCore::<RrScheduler>::new(records, quantum).run_to_completion()
            }
            Algorithm::Mlfq { q1, q2 } => {
                SchedCore::<MlfqScheduler>::new(records, (q1, q2)).run_to_completion()
            }
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::RoundRobin { quantum } => write!(f, "RR (Q={quantum})"),
            Algorithm::Mlfq { q1, q2 } => write!(f, "MLFQ (Q1={q1}, Q2={q2})"),
            other => f.write_str(other.name()),
        }
    }
}

// RR and MLFQ take their default slices
impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(Algorithm::Fcfs),
            "sjf" => Ok(Algorithm::Sjf),
            "srtf" => Ok(Algorithm::Srtf),
            "rr" | "round_robin" | "roundrobin" => Ok(Algorithm::RoundRobin {
                quantum: DEFAULT_QUANTUM,
            }),
            "mlfq" => Ok(Algorithm::Mlfq {
                q1: DEFAULT_MLFQ_Q1,
                q2: DEFAULT_MLFQ_Q2,
            }),
            _ => Err(format!(
                "Invalid policy '{s}'. Valid: fcfs, sjf, srtf, rr, mlfq"
            )),
        }
    }
}
