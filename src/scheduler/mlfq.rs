use log::trace;

use super::Scheduler;
use crate::core::{DsqId, SimCtx, TaskIdx, Ticks};

const LEVELS: usize = 3;

/// Three-level feedback queue with strict priority between levels.
///
/// Arrivals always enter level 0. A task that uses up its slice on level 0
/// or 1 drops one level; level 2 runs to completion.
pub struct MlfqScheduler {
    levels: [DsqId; LEVELS],
    slices: [Option<Ticks>; LEVELS],
}

impl MlfqScheduler {
    fn enqueue_arrivals(&self, ctx: &mut SimCtx<'_>) {
        for task in ctx.admit_arrivals() {
            ctx.dsq_push_fifo(self.levels[0], task);
        }
    }

    fn pick_next(&self, ctx: &mut SimCtx<'_>) -> Option<(usize, TaskIdx)> {
        self.levels
            .iter()
            .enumerate()
            .find_map(|(level, &dsq)| ctx.dsq_pop(dsq).map(|task| (level, task)))
    }
}

impl Scheduler for MlfqScheduler {
    type Config = (Ticks, Ticks);

    fn init(ctx: &mut SimCtx<'_>, (q1, q2): (Ticks, Ticks)) -> Self {
        debug_assert!(q1 > 0 && q2 > 0, "MLFQ slices must be validated before init");
        let scheduler = Self {
            levels: [
                ctx.create_dsq_fifo(),
                ctx.create_dsq_fifo(),
                ctx.create_dsq_fifo(),
            ],
            slices: [Some(q1), Some(q2), None],
        };
        scheduler.enqueue_arrivals(ctx);
        scheduler
    }

    fn step(&mut self, ctx: &mut SimCtx<'_>) {
        let Some((level, task)) = self.pick_next(ctx) else {
            ctx.idle_until_next_arrival();
            self.enqueue_arrivals(ctx);
            return;
        };

        let remaining = ctx.record(task).remaining;
        let slice = self.slices[level].map_or(remaining, |q| q.min(remaining));
        let completed = ctx.run(task, slice);
        self.enqueue_arrivals(ctx);

        if !completed {
            debug_assert!(level + 1 < LEVELS, "Bottom level must run to completion");
            trace!("t={} demote task {task} to level {}", ctx.now, level + 1);
            ctx.dsq_push_fifo(self.levels[level + 1], task);
        }
    }
}
