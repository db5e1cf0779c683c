use super::Scheduler;
use crate::core::{DsqId, SimCtx, Ticks};

// Arrivals during a slice queue ahead of the task whose slice expired
pub struct RrScheduler {
    global_dsq: DsqId,
    quantum: Ticks,
}

impl RrScheduler {
    fn enqueue_arrivals(&self, ctx: &mut SimCtx<'_>) {
        for task in ctx.admit_arrivals() {
            ctx.dsq_push_fifo(self.global_dsq, task);
        }
    }
}

impl Scheduler for RrScheduler {
    type Config = Ticks;

    fn init(ctx: &mut SimCtx<'_>, quantum: Ticks) -> Self {
        debug_assert!(quantum > 0, "RR quantum must be validated before init");
        let scheduler = Self {
            global_dsq: ctx.create_dsq_fifo(),
            quantum,
        };
        scheduler.enqueue_arrivals(ctx);
        scheduler
    }

    fn step(&mut self, ctx: &mut SimCtx<'_>) {
        let Some(task) = ctx.dsq_pop(self.global_dsq) else {
            ctx.idle_until_next_arrival();
            self.enqueue_arrivals(ctx);
            return;
        };

        let slice = self.quantum.min(ctx.record(task).remaining);
        let completed = ctx.run(task, slice);
        self.enqueue_arrivals(ctx);

        if !completed {
            ctx.dsq_push_fifo(self.global_dsq, task);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{Owner, ProcessRecord, Segment};
    use crate::scheduler::Algorithm;
    use crate::sim::simulate;

    #[test]
    fn two_process_rotation() {
        let mut records = vec![ProcessRecord::new(1, 0, 4), ProcessRecord::new(2, 1, 3)];
        let timeline = simulate(&mut records, Algorithm::RoundRobin { quantum: 2 }).unwrap();

        assert_eq!(
            timeline.segments(),
            &[
                Segment::new(Owner::Process(1), 0, 2),
                Segment::new(Owner::Process(2), 2, 4),
                Segment::new(Owner::Process(1), 4, 6),
                Segment::new(Owner::Process(2), 6, 7),
            ]
        );
        assert_eq!(records[0].completion, 6);
        assert_eq!(records[1].completion, 7);
    }

    #[test]
    fn arrival_at_slice_end_goes_before_requeue() {
        // P2 arrives exactly when P1's first slice ends and is queued ahead of P1.
        let mut records = vec![
            ProcessRecord::new(1, 0, 6),
            ProcessRecord::new(2, 3, 2),
            ProcessRecord::new(3, 0, 1),
        ];
        let timeline = simulate(&mut records, Algorithm::RoundRobin { quantum: 3 }).unwrap();

        let owners: Vec<_> = timeline.iter().map(|s| s.owner).collect();
        assert_eq!(
            owners,
            vec![
                Owner::Process(1),
                Owner::Process(3),
                Owner::Process(2),
                Owner::Process(1),
            ]
        );
        assert_eq!(timeline.makespan(), 9);
    }

    #[test]
    fn idle_gap_between_bursts() {
        let mut records = vec![ProcessRecord::new(1, 0, 1), ProcessRecord::new(2, 5, 3)];
        let timeline = simulate(&mut records, Algorithm::RoundRobin { quantum: 2 }).unwrap();

        assert_eq!(
            timeline.segments(),
            &[
                Segment::new(Owner::Process(1), 0, 1),
                Segment::new(Owner::Idle, 1, 5),
                Segment::new(Owner::Process(2), 5, 8),
            ]
        );
    }
}
