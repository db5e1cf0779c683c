use super::Scheduler;
use crate::core::{DsqId, Rank, SimCtx};

/// Preemptive shortest remaining time first.
///
/// The choice can only change when something arrives, so the winner keeps
/// the CPU until it finishes or the next arrival, whichever is sooner. Ties
/// on remaining time go to the earlier record.
pub struct SrtfScheduler {
    global_priq: DsqId,
}

impl Scheduler for SrtfScheduler {
    type Config = ();

    fn init(ctx: &mut SimCtx<'_>, _config: ()) -> Self {
        Self {
            global_priq: ctx.create_dsq_priq(),
        }
    }

    fn step(&mut self, ctx: &mut SimCtx<'_>) {
        for task in ctx.admit_arrivals() {
            let remaining = ctx.record(task).remaining;
            ctx.dsq_push_priq(self.global_priq, task, Rank::new(remaining, task));
        }

        let Some(task) = ctx.dsq_pop(self.global_priq) else {
            ctx.idle_until_next_arrival();
            return;
        };

        let remaining = ctx.record(task).remaining;
        let slice = match ctx.next_arrival() {
            Some(arrival) => remaining.min(arrival - ctx.now),
            None => remaining,
        };

        if !ctx.run(task, slice) {
            let remaining = ctx.record(task).remaining;
            ctx.dsq_push_priq(self.global_priq, task, Rank::new(remaining, task));
        }
    }
}
