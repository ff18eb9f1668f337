//! Cancellable periodic tasks.
//!
//! The reveal controller's tick is a recurring task with an explicit
//! lifecycle: started when the controller starts, cancelled through its
//! handle. Hosts supply a [`Scheduler`]; the browser layer backs it with
//! interval timers, tests use [`ManualScheduler`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Handle to a running periodic task.
pub trait TaskHandle {
    /// Stop the task. Idempotent.
    fn cancel(&mut self);

    fn is_active(&self) -> bool;
}

pub trait Scheduler {
    type Handle: TaskHandle;

    /// Run `task` every `period` until the returned handle is cancelled.
    fn every(&self, period: Duration, task: Box<dyn FnMut()>) -> Self::Handle;
}

struct ManualTask {
    period: Duration,
    active: Rc<Cell<bool>>,
    run: Box<dyn FnMut()>,
}

/// Deterministic scheduler driven by explicit [`ManualScheduler::fire`]
/// calls instead of real time.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    tasks: Rc<RefCell<Vec<ManualTask>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every active task once. Returns how many ran.
    pub fn fire(&self) -> usize {
        // Take the tasks out so a callback may schedule more without a
        // double borrow.
        let mut tasks = std::mem::take(&mut *self.tasks.borrow_mut());
        tasks.retain(|t| t.active.get());
        let mut ran = 0;
        for task in tasks.iter_mut() {
            if task.active.get() {
                (task.run)();
                ran += 1;
            }
        }
        let mut slot = self.tasks.borrow_mut();
        tasks.append(&mut slot);
        *slot = tasks;
        ran
    }

    /// Number of tasks that have not been cancelled.
    pub fn active_count(&self) -> usize {
        self.tasks.borrow().iter().filter(|t| t.active.get()).count()
    }

    /// Periods of the active tasks, in scheduling order.
    pub fn periods(&self) -> Vec<Duration> {
        self.tasks
            .borrow()
            .iter()
            .filter(|t| t.active.get())
            .map(|t| t.period)
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ManualHandle {
    active: Rc<Cell<bool>>,
}

impl TaskHandle for ManualHandle {
    fn cancel(&mut self) {
        self.active.set(false);
    }

    fn is_active(&self) -> bool {
        self.active.get()
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn every(&self, period: Duration, task: Box<dyn FnMut()>) -> ManualHandle {
        let active = Rc::new(Cell::new(true));
        self.tasks.borrow_mut().push(ManualTask {
            period,
            active: active.clone(),
            run: task,
        });
        ManualHandle { active }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_tasks_stop_running() {
        let scheduler = ManualScheduler::new();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let mut handle = scheduler.every(Duration::from_secs(1), Box::new(move || c.set(c.get() + 1)));

        assert_eq!(scheduler.fire(), 1);
        assert_eq!(scheduler.fire(), 1);
        assert_eq!(count.get(), 2);

        handle.cancel();
        assert!(!handle.is_active());
        assert_eq!(scheduler.fire(), 0);
        assert_eq!(count.get(), 2);
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn cancel_is_idempotent() {
        let scheduler = ManualScheduler::new();
        let mut handle = scheduler.every(Duration::from_millis(500), Box::new(|| {}));
        assert_eq!(scheduler.periods(), vec![Duration::from_millis(500)]);
        handle.cancel();
        handle.cancel();
        assert_eq!(scheduler.active_count(), 0);
    }
}
