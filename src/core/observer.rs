use super::state::{ProcessRecord, SimCtx, Ticks};
use super::timeline::Timeline;

#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
    last_now: Ticks,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SimCtx<'_>) {
        self.step += 1;

        debug_assert!(
            ctx.now > self.last_now,
            "Step {} made no progress at t={}",
            self.step,
            ctx.now
        );
        self.last_now = ctx.now;

        for (&task, &dsq_id) in &ctx.task_to_dsq {
            let record = ctx.record(task);
            debug_assert!(
                !record.is_completed(),
                "Completed task {task} still present in DSQ {dsq_id:?}"
            );
            debug_assert!(
                record.arrival <= ctx.now,
                "Task {task} enqueued before its arrival"
            );
            if let Some(dsq) = ctx.dsqs.get(dsq_id) {
                debug_assert!(
                    dsq.contains(task),
                    "task_to_dsq claims task {task} in DSQ {dsq_id:?}, but queue does not contain it"
                );
            } else {
                debug_assert!(false, "task_to_dsq references unknown DSQ {dsq_id:?}");
            }
        }
    }

    pub fn verify_run(&self, records: &[ProcessRecord], timeline: &Timeline) {
        for r in records {
            debug_assert_eq!(r.remaining, 0, "P{} did not finish", r.id);
            debug_assert_eq!(r.turnaround, r.completion - r.arrival, "P{} turnaround", r.id);
            debug_assert_eq!(r.waiting, r.turnaround - r.burst, "P{} waiting", r.id);
            debug_assert!(
                r.completion >= r.arrival + r.burst,
                "P{} completed too early",
                r.id
            );
        }

        debug_assert!(
            timeline.is_partition(),
            "Timeline is not a coalesced partition: {timeline:?}"
        );
        debug_assert_eq!(
            timeline.makespan(),
            records.iter().map(|r| r.completion).max().unwrap_or(0),
            "Makespan must equal the last completion"
        );
    }
}
