use log::debug;

use super::{
    observer::Observer,
    state::{ProcessRecord, SimCtx},
    timeline::Timeline,
};
use crate::scheduler::Scheduler;

pub struct SchedCore<'a, S: Scheduler> {
    pub ctx: SimCtx<'a>,
    pub scheduler: S,
    observer: Observer,
}

impl<'a, S: Scheduler> SchedCore<'a, S> {
    // Records must already be reset and sorted by (arrival, id); `simulate` is
    // the only caller that guarantees both.
    pub(crate) fn new(records: &'a mut [ProcessRecord], config: S::Config) -> Self {
        let mut ctx = SimCtx::new(records);
        let scheduler = S::init(&mut ctx, config);
        Self {
            ctx,
            scheduler,
            observer: Observer::new(),
        }
    }

    pub fn step(&mut self) {
        self.scheduler.step(&mut self.ctx);
        self.observer.observe(&self.ctx);
    }

    pub fn run_to_completion(mut self) -> Timeline {
        debug!("simulating {} processes", self.ctx.records.len());

        while !self.ctx.all_completed() {
            self.step();
        }

        let Self { ctx, observer, .. } = self;
        let (records, timeline) = ctx.into_parts();
        observer.verify_run(records, &timeline);

        debug!(
            "finished after {} steps, makespan {}",
            observer.steps(),
            timeline.makespan()
        );
        timeline
    }
}
