use keyed_priority_queue::KeyedPriorityQueue;
use log::{debug, trace};
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use std::collections::VecDeque;
use std::ops::Range;

use super::timeline::{Owner, Timeline, TimelineBuilder};

// Index into the record slice of the active run
pub type TaskIdx = usize;
pub type ProcessId = i64;
pub type Ticks = u64;
new_key_type! {
    pub struct DsqId;
}

/// Ordering key for priority DSQs: smallest `key` first, lowest record index
/// on ties.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub struct Rank {
    pub key: Ticks,
    pub index: TaskIdx,
}

impl Rank {
    pub fn new(key: Ticks, index: TaskIdx) -> Self {
        Self { key, index }
    }
}

// KeyedPriorityQueue is a max-heap, so we need to flip-flop Rank's Ord
impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.index.cmp(&self.index))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub id: ProcessId,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub remaining: Ticks,
    pub completion: Ticks,
    pub turnaround: Ticks,
    pub waiting: Ticks,
}

impl ProcessRecord {
    pub fn new(id: ProcessId, arrival: Ticks, burst: Ticks) -> Self {
        Self {
            id,
            arrival,
            burst,
            remaining: burst,
            completion: 0,
            turnaround: 0,
            waiting: 0,
        }
    }

    pub fn reset(&mut self) {
        self.remaining = self.burst;
        self.completion = 0;
        self.turnaround = 0;
        self.waiting = 0;
    }

    pub fn is_reset(&self) -> bool {
        self.remaining == self.burst
            && self.completion == 0
            && self.turnaround == 0
            && self.waiting == 0
    }

    pub fn is_completed(&self) -> bool {
        self.remaining == 0
    }

    fn finalize(&mut self, completion: Ticks) {
        debug_assert!(
            completion >= self.arrival + self.burst,
            "Process {} completed at {completion} before it could have",
            self.id
        );
        self.completion = completion;
        self.turnaround = completion - self.arrival;
        self.waiting = self.turnaround - self.burst;
    }
}

#[derive(Debug)]
pub enum Dsq {
    Fifo {
        tasks: VecDeque<TaskIdx>,
    },
    Priq {
        tasks: KeyedPriorityQueue<TaskIdx, Rank>,
    },
}

impl Dsq {
    pub fn new_fifo() -> Self {
        Self::Fifo {
            tasks: VecDeque::new(),
        }
    }

    pub fn new_priq() -> Self {
        Self::Priq {
            tasks: KeyedPriorityQueue::new(),
        }
    }

    pub fn contains(&self, task: TaskIdx) -> bool {
        match self {
            Self::Fifo { tasks } => tasks.contains(&task),
            Self::Priq { tasks } => tasks.iter().any(|t| *t.0 == task),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Fifo { tasks } => tasks.len(),
            Self::Priq { tasks } => tasks.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Records are admitted in slice order, so they must be sorted by (arrival, id)
#[derive(Debug)]
pub struct SimCtx<'a> {
    pub now: Ticks,
    pub records: &'a mut [ProcessRecord],
    pub dsqs: SlotMap<DsqId, Dsq>,
    pub task_to_dsq: FxHashMap<TaskIdx, DsqId>,
    timeline: TimelineBuilder,
    // Records below this index have been admitted
    arrival_cursor: TaskIdx,
    completed: usize,
}

impl<'a> SimCtx<'a> {
    pub(crate) fn new(records: &'a mut [ProcessRecord]) -> Self {
        debug_assert!(
            records
                .windows(2)
                .all(|w| (w[0].arrival, w[0].id) <= (w[1].arrival, w[1].id)),
            "Records must be sorted by (arrival, id)"
        );

        Self {
            now: 0,
            records,
            dsqs: SlotMap::with_key(),
            task_to_dsq: FxHashMap::default(),
            timeline: TimelineBuilder::new(),
            arrival_cursor: 0,
            completed: 0,
        }
    }

    pub fn create_dsq_fifo(&mut self) -> DsqId {
        self.dsqs.insert(Dsq::new_fifo())
    }

    pub fn create_dsq_priq(&mut self) -> DsqId {
        self.dsqs.insert(Dsq::new_priq())
    }

    fn dsq_push(&mut self, dsq_id: DsqId, task: TaskIdx, rank: Option<Rank>) {
        assert!(
            !self.task_to_dsq.contains_key(&task),
            "Task {task} already present in some DSQ"
        );
        debug_assert!(
            !self.records[task].is_completed(),
            "Completed task {task} must not be enqueued"
        );

        let dsq = self.dsqs.get_mut(dsq_id).expect("Unknown DSQ");
        match dsq {
            Dsq::Fifo { tasks } => tasks.push_back(task),
            Dsq::Priq { tasks } => {
                tasks.push(
                    task,
                    rank.expect("Attempted to push to a priority DSQ with no rank"),
                );
            }
        };

        trace!("t={} enqueue task {task} on {dsq_id:?}", self.now);
        self.task_to_dsq.insert(task, dsq_id);
    }

    pub fn dsq_push_fifo(&mut self, dsq_id: DsqId, task: TaskIdx) {
        self.dsq_push(dsq_id, task, None);
    }

    pub fn dsq_push_priq(&mut self, dsq_id: DsqId, task: TaskIdx, rank: Rank) {
        self.dsq_push(dsq_id, task, Some(rank));
    }

    pub fn dsq_pop(&mut self, dsq_id: DsqId) -> Option<TaskIdx> {
        let dsq = self.dsqs.get_mut(dsq_id)?;
        let task = match dsq {
            Dsq::Fifo { tasks } => tasks.pop_front(),
            Dsq::Priq { tasks } => tasks.pop().map(|t| t.0),
        }?;

        let removed = self.task_to_dsq.remove(&task);
        debug_assert!(removed.is_some(), "Task {task} missing DSQ membership");

        Some(task)
    }

    pub fn dsq_is_empty(&self, dsq_id: DsqId) -> bool {
        self.dsqs.get(dsq_id).is_none_or(Dsq::is_empty)
    }

    pub fn task_in_any_dsq(&self, task: TaskIdx) -> bool {
        self.task_to_dsq.contains_key(&task)
    }

    pub fn record(&self, task: TaskIdx) -> &ProcessRecord {
        &self.records[task]
    }

    pub fn admit_arrivals(&mut self) -> Range<TaskIdx> {
        let start = self.arrival_cursor;
        while self
            .records
            .get(self.arrival_cursor)
            .is_some_and(|r| r.arrival <= self.now)
        {
            self.arrival_cursor += 1;
        }
        start..self.arrival_cursor
    }

    pub fn next_arrival(&self) -> Option<Ticks> {
        self.records.get(self.arrival_cursor).map(|r| r.arrival)
    }

    pub fn idle_until(&mut self, until: Ticks) {
        if until > self.now {
            debug!("t={} idle until {until}", self.now);
            self.timeline.append(Owner::Idle, self.now, until);
            self.now = until;
        }
    }

    pub fn idle_until_next_arrival(&mut self) {
        match self.next_arrival() {
            Some(arrival) => self.idle_until(arrival),
            None => debug_assert!(
                self.all_completed(),
                "Nothing runnable and nothing left to arrive at t={}",
                self.now
            ),
        }
    }

    /// Gives `task` the CPU for `ticks`. Returns true once the task has
    /// completed, with its metrics finalized.
    pub fn run(&mut self, task: TaskIdx, ticks: Ticks) -> bool {
        debug_assert!(
            !self.task_to_dsq.contains_key(&task),
            "Running task {task} must not be enqueued"
        );

        let now = self.now;
        let record = &mut self.records[task];
        debug_assert!(
            ticks > 0 && ticks <= record.remaining,
            "Task {task} cannot run {ticks} ticks with {} remaining",
            record.remaining
        );
        debug_assert!(record.arrival <= now, "Task {task} ran before arrival");

        self.timeline
            .append(Owner::Process(record.id), now, now + ticks);
        record.remaining -= ticks;
        self.now = now + ticks;
        debug!("t={now} P{} runs {ticks}, {} left", record.id, record.remaining);

        if record.is_completed() {
            record.finalize(self.now);
            self.completed += 1;
            return true;
        }
        false
    }

    pub fn all_completed(&self) -> bool {
        self.completed == self.records.len()
    }

    pub fn into_timeline(self) -> Timeline {
        self.timeline.build()
    }

    pub fn into_parts(self) -> (&'a mut [ProcessRecord], Timeline) {
        (self.records, self.timeline.build())
    }
}
