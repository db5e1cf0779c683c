use super::Scheduler;
use crate::core::{DsqId, SimCtx};

pub struct FcfsScheduler {
    global_dsq: DsqId,
}

impl Scheduler for FcfsScheduler {
    type Config = ();

    fn init(ctx: &mut SimCtx<'_>, _config: ()) -> Self {
        Self {
            global_dsq: ctx.create_dsq_fifo(),
        }
    }

    fn step(&mut self, ctx: &mut SimCtx<'_>) {
        for task in ctx.admit_arrivals() {
            ctx.dsq_push_fifo(self.global_dsq, task);
        }

        match ctx.dsq_pop(self.global_dsq) {
            Some(task) => {
                let burst = ctx.record(task).remaining;
                ctx.run(task, burst);
            }
            None => ctx.idle_until_next_arrival(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{Owner, ProcessRecord, Segment};
    use crate::scheduler::Algorithm;
    use crate::sim::simulate;

    #[test]
    fn three_process_scenario() {
        let mut records = vec![
            ProcessRecord::new(1, 0, 5),
            ProcessRecord::new(2, 1, 3),
            ProcessRecord::new(3, 2, 8),
        ];
        let timeline = simulate(&mut records, Algorithm::Fcfs).unwrap();

        let completions: Vec<_> = records.iter().map(|r| r.completion).collect();
        let waits: Vec<_> = records.iter().map(|r| r.waiting).collect();
        assert_eq!(completions, vec![5, 8, 16]);
        assert_eq!(waits, vec![0, 4, 6]);
        assert_eq!(timeline.len(), 3);
    }

    #[test]
    fn leading_and_interior_idle() {
        let mut records = vec![ProcessRecord::new(1, 2, 1), ProcessRecord::new(2, 6, 2)];
        let timeline = simulate(&mut records, Algorithm::Fcfs).unwrap();

        assert_eq!(
            timeline.segments(),
            &[
                Segment::new(Owner::Idle, 0, 2),
                Segment::new(Owner::Process(1), 2, 3),
                Segment::new(Owner::Idle, 3, 6),
                Segment::new(Owner::Process(2), 6, 8),
            ]
        );
    }

    #[test]
    fn simultaneous_arrivals_run_by_id() {
        let mut records = vec![ProcessRecord::new(9, 0, 1), ProcessRecord::new(4, 0, 1)];
        let timeline = simulate(&mut records, Algorithm::Fcfs).unwrap();

        assert_eq!(timeline.segments()[0].owner, Owner::Process(4));
        assert_eq!(timeline.segments()[1].owner, Owner::Process(9));
    }
}
