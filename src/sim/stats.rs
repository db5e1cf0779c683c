use average::{Estimate, Mean};

use crate::core::{ProcessRecord, SimError, Ticks, Timeline};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Averages {
    pub waiting: f64,
    pub turnaround: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub averages: Averages,
    pub makespan: Ticks,
    pub idle_ticks: Ticks,
    pub utilization: f64,
    pub max_waiting: Ticks,
}

pub fn averages(records: &[ProcessRecord]) -> Result<Averages, SimError> {
    if records.is_empty() {
        return Err(SimError::EmptySet);
    }

    Ok(Averages {
        waiting: avg(records.iter().map(|r| r.waiting as f64)),
        turnaround: avg(records.iter().map(|r| r.turnaround as f64)),
    })
}

pub fn summarize(records: &[ProcessRecord], timeline: &Timeline) -> Result<Summary, SimError> {
    let averages = averages(records)?;
    let makespan = timeline.makespan();
    let utilization = if makespan == 0 {
        0.0
    } else {
        timeline.busy_ticks() as f64 / makespan as f64
    };

    Ok(Summary {
        averages,
        makespan,
        idle_ticks: timeline.idle_ticks(),
        utilization,
        max_waiting: records.iter().map(|r| r.waiting).max().unwrap_or(0),
    })
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().estimate()
}
