use log::{debug, warn};
use rustc_hash::FxHashSet;

use super::{
    process::Process,
    stats::{self, Summary},
};
use crate::{
    core::{ProcessRecord, SimError, Timeline},
    scheduler::Algorithm,
};

/// Records must be freshly reset; [`Sim::run`] resets them between runs.
pub fn simulate(records: &mut [ProcessRecord], algorithm: Algorithm) -> Result<Timeline, SimError> {
    algorithm.validate()?;
    if records.is_empty() {
        return Err(SimError::EmptySet);
    }
    if let Some(stale) = records.iter().find(|r| !r.is_reset()) {
        return Err(SimError::NotReset { id: stale.id });
    }
    // No schedule ends later than the last arrival plus every burst
    let last_arrival = records.iter().map(|r| r.arrival).max().unwrap_or(0);
    records
        .iter()
        .try_fold(last_arrival, |end, r| end.checked_add(r.burst))
        .ok_or(SimError::TickOverflow)?;

    records.sort_by_key(|r| (r.arrival, r.id));
    Ok(algorithm.run(records))
}

#[derive(Debug, Clone)]
pub struct SimOutcome {
    pub algorithm: Algorithm,
    pub timeline: Timeline,
    pub records: Vec<ProcessRecord>,
    pub summary: Summary,
}

#[derive(Debug, Clone)]
pub struct Sim {
    records: Vec<ProcessRecord>,
}

impl Sim {
    pub fn new(processes: impl IntoIterator<Item = Process>) -> Self {
        let mut records: Vec<ProcessRecord> = processes.into_iter().map(Into::into).collect();
        records.sort_by_key(|r| (r.arrival, r.id));

        let mut seen = FxHashSet::default();
        for r in &records {
            if !seen.insert(r.id) {
                warn!("duplicate process id {}; timeline entries will be ambiguous", r.id);
            }
        }

        Self { records }
    }

    pub fn records(&self) -> &[ProcessRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn reset(&mut self) {
        self.records.iter_mut().for_each(ProcessRecord::reset);
    }

    pub fn run(&mut self, algorithm: Algorithm) -> Result<SimOutcome, SimError> {
        self.reset();
        let timeline = simulate(&mut self.records, algorithm)?;
        let summary = stats::summarize(&self.records, &timeline)?;
        debug!(
            "{algorithm}: avg waiting {:.2}, avg turnaround {:.2}",
            summary.averages.waiting, summary.averages.turnaround
        );

        Ok(SimOutcome {
            algorithm,
            timeline,
            records: self.records.clone(),
            summary,
        })
    }

    pub fn run_all(&mut self, algorithms: &[Algorithm]) -> Result<Vec<SimOutcome>, SimError> {
        algorithms.iter().try_for_each(Algorithm::validate)?;
        algorithms.iter().map(|&a| self.run(a)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim() -> Sim {
        Sim::new([
            Process::new(3, 2, 8).unwrap(),
            Process::new(1, 0, 5).unwrap(),
            Process::new(2, 1, 3).unwrap(),
        ])
    }

    #[test]
    fn records_are_sorted_on_entry() {
        let ids: Vec<_> = sim().records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn stale_records_are_rejected() {
        let mut records = vec![ProcessRecord::new(1, 0, 2)];
        simulate(&mut records, Algorithm::Fcfs).unwrap();
        assert_eq!(
            simulate(&mut records, Algorithm::Fcfs),
            Err(SimError::NotReset { id: 1 })
        );
    }

    #[test]
    fn unsorted_records_are_sorted_before_the_run() {
        let mut records = vec![
            ProcessRecord::new(3, 2, 8),
            ProcessRecord::new(2, 1, 3),
            ProcessRecord::new(1, 0, 5),
        ];
        let timeline = simulate(&mut records, Algorithm::Fcfs).unwrap();

        let ids: Vec<_> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(records[2].completion, 16);
        assert_eq!(timeline.makespan(), 16);
    }

    #[test]
    fn horizon_past_tick_range_is_rejected() {
        let mut late = vec![ProcessRecord::new(1, u64::MAX, 1)];
        assert_eq!(simulate(&mut late, Algorithm::Sjf), Err(SimError::TickOverflow));
        assert!(late[0].is_reset());

        let mut s = Sim::new([
            Process::new(1, 3, u64::MAX - 3).unwrap(),
            Process::new(2, 4, 1).unwrap(),
        ]);
        assert_eq!(s.run(Algorithm::Fcfs).unwrap_err(), SimError::TickOverflow);

        let mut fits = vec![ProcessRecord::new(1, u64::MAX - 2, 2)];
        assert!(simulate(&mut fits, Algorithm::Srtf).is_ok());
        assert_eq!(fits[0].completion, u64::MAX);
    }

    #[test]
    fn empty_and_misconfigured_runs_are_rejected() {
        let mut empty = Sim::new(Vec::<Process>::new());
        assert_eq!(empty.run(Algorithm::Fcfs).unwrap_err(), SimError::EmptySet);

        let mut s = sim();
        assert!(matches!(
            s.run(Algorithm::RoundRobin { quantum: 0 }),
            Err(SimError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn reruns_reset_between_policies() {
        let mut s = sim();
        let first = s.run(Algorithm::Srtf).unwrap();
        let _ = s.run(Algorithm::RoundRobin { quantum: 1 }).unwrap();
        let again = s.run(Algorithm::Srtf).unwrap();

        assert_eq!(first.timeline, again.timeline);
        assert_eq!(first.records, again.records);
    }

    #[test]
    fn run_all_validates_up_front() {
        let mut s = sim();
        let algorithms = [Algorithm::Fcfs, Algorithm::Mlfq { q1: 2, q2: 0 }];
        assert!(s.run_all(&algorithms).is_err());
        // Nothing ran, so the records are still fresh.
        assert!(s.records().iter().all(ProcessRecord::is_reset));

        let outcomes = s.run_all(&Algorithm::all(2, 2, 4)).unwrap();
        assert_eq!(outcomes.len(), 5);
        assert_eq!(outcomes[0].summary.makespan, 16);
    }
}
