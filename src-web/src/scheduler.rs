use std::time::Duration;

use gloo::timers::callback::Interval;
use lettergate_core::{Scheduler, TaskHandle};

/// Periodic tasks on the browser's interval timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalScheduler;

/// Owns the interval; cancelling or dropping it clears the timer.
#[derive(Debug)]
pub struct IntervalHandle(Option<Interval>);

impl TaskHandle for IntervalHandle {
    fn cancel(&mut self) {
        if let Some(interval) = self.0.take() {
            interval.cancel();
        }
    }

    fn is_active(&self) -> bool {
        self.0.is_some()
    }
}

impl Scheduler for IntervalScheduler {
    type Handle = IntervalHandle;

    fn every(&self, period: Duration, task: Box<dyn FnMut()>) -> IntervalHandle {
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        IntervalHandle(Some(Interval::new(millis, task)))
    }
}
