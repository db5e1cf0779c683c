use super::Scheduler;
use crate::core::{DsqId, Rank, SimCtx};

pub struct SjfScheduler {
    global_priq: DsqId,
}

impl Scheduler for SjfScheduler {
    type Config = ();

    fn init(ctx: &mut SimCtx<'_>, _config: ()) -> Self {
        Self {
            global_priq: ctx.create_dsq_priq(),
        }
    }

    fn step(&mut self, ctx: &mut SimCtx<'_>) {
        for task in ctx.admit_arrivals() {
            let burst = ctx.record(task).burst;
            ctx.dsq_push_priq(self.global_priq, task, Rank::new(burst, task));
        }

        match ctx.dsq_pop(self.global_priq) {
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
    fn shortest_waiting_job_goes_next() {
        let mut records = vec![
            ProcessRecord::new(1, 0, 7),
            ProcessRecord::new(2, 2, 4),
            ProcessRecord::new(3, 4, 1),
            ProcessRecord::new(4, 5, 4),
        ];
        let timeline = simulate(&mut records, Algorithm::Sjf).unwrap();

        assert_eq!(
            timeline.segments(),
            &[
                Segment::new(Owner::Process(1), 0, 7),
                Segment::new(Owner::Process(3), 7, 8),
                Segment::new(Owner::Process(2), 8, 12),
                Segment::new(Owner::Process(4), 12, 16),
            ]
        );
        let waits: Vec<_> = records.iter().map(|r| r.waiting).collect();
        assert_eq!(waits, vec![0, 6, 3, 7]);
    }

    #[test]
    fn equal_bursts_keep_input_order() {
        let mut records = vec![
            ProcessRecord::new(1, 0, 2),
            ProcessRecord::new(2, 1, 3),
            ProcessRecord::new(3, 1, 3),
        ];
        let timeline = simulate(&mut records, Algorithm::Sjf).unwrap();

        let owners: Vec<_> = timeline.iter().map(|s| s.owner).collect();
        assert_eq!(
            owners,
            vec![Owner::Process(1), Owner::Process(2), Owner::Process(3)]
        );
    }

    #[test]
    fn idles_until_first_arrival() {
        let mut records = vec![ProcessRecord::new(1, 3, 2)];
        let timeline = simulate(&mut records, Algorithm::Sjf).unwrap();

        assert_eq!(timeline.segments()[0], Segment::new(Owner::Idle, 0, 3));
        assert_eq!(records[0].completion, 5);
    }
}
