//! Reveal/modal controller.
//!
//! Gates triggers behind their unlock dates and shows the content of an
//! unlocked trigger in the shared overlay.
//!
//! ## Lifecycle
//!
//! ```text
//! RevealRuntime::start -> tick (immediately) -> tick every interval ... -> dispose
//! ```
//!
//! The controller itself holds no timer. [`RevealRuntime`] owns the
//! periodic task and cancels it on `dispose` or drop.

mod dispatch;
mod overlay;

pub use dispatch::{DispatchTable, Interaction, MarkupElement, Role, TriggerFlags};
pub use overlay::{Overlay, OverlayState, OverlaySurface};

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use chrono::{DateTime, Utc};

use crate::clock::Clock;
use crate::config::LettersConfig;
use crate::events::{CloseReason, Event};
use crate::gate::{GateLabels, GatedTrigger, TriggerView};
use crate::task::{Scheduler, TaskHandle};

pub struct RevealController<S, V> {
    overlay: Overlay<S>,
    triggers: Vec<GatedTrigger<V>>,
    labels: GateLabels,
    cancel_key: String,
}

impl<S: OverlaySurface, V: TriggerView> RevealController<S, V> {
    pub fn new(surface: S, triggers: Vec<GatedTrigger<V>>, cfg: &LettersConfig) -> Self {
        Self {
            overlay: Overlay::new(surface),
            triggers,
            labels: cfg.gate_labels(),
            cancel_key: cfg.cancel_key.clone(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn overlay(&self) -> &Overlay<S> {
        &self.overlay
    }

    pub fn triggers(&self) -> &[GatedTrigger<V>] {
        &self.triggers
    }

    pub fn trigger(&self, content_ref: &str) -> Option<&GatedTrigger<V>> {
        self.triggers.iter().find(|t| t.content_ref() == content_ref)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Re-evaluate every gated trigger. Returns lock transitions.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        let labels = &self.labels;
        self.triggers
            .iter_mut()
            .filter_map(|t| t.evaluate(now, labels))
            .collect()
    }

    pub fn handle(&mut self, interaction: Interaction) -> Option<Event> {
        match interaction {
            Interaction::Activate { content_ref, flags } => {
                if flags.is_inert() {
                    tracing::trace!(%content_ref, "ignoring click on inert trigger");
                    return None;
                }
                self.overlay.open(&content_ref)
            }
            Interaction::Close => self.overlay.close(CloseReason::CloseControl),
            Interaction::Cancel => {
                if !self.overlay.is_visible() {
                    return None;
                }
                self.overlay.close(CloseReason::CancelKey)
            }
        }
    }

    /// Map a keydown to the cancel interaction.
    pub fn on_key(&mut self, key: &str) -> Option<Event> {
        if key != self.cancel_key {
            return None;
        }
        self.handle(Interaction::Cancel)
    }
}

/// A started reveal controller together with its periodic tick.
pub struct RevealRuntime<S, V, H: TaskHandle> {
    controller: Rc<RefCell<RevealController<S, V>>>,
    task: H,
}

impl<S, V, H> RevealRuntime<S, V, H>
where
    S: OverlaySurface + 'static,
    V: TriggerView + 'static,
    H: TaskHandle,
{
    /// Tick once now, then every `cfg.tick_interval_ms` on `scheduler`.
    pub fn start<C, Sch>(
        controller: RevealController<S, V>,
        clock: C,
        scheduler: &Sch,
        cfg: &LettersConfig,
    ) -> Self
    where
        C: Clock + 'static,
        Sch: Scheduler<Handle = H>,
    {
        let controller = Rc::new(RefCell::new(controller));
        log_events(controller.borrow_mut().tick(clock.now()));

        let weak: Weak<RefCell<RevealController<S, V>>> = Rc::downgrade(&controller);
        let task = scheduler.every(
            cfg.tick_interval(),
            Box::new(move || {
                let Some(controller) = weak.upgrade() else {
                    return;
                };
                // A tick that lands while a handler holds the controller is
                // skipped; the next one catches up.
                let Ok(mut controller) = controller.try_borrow_mut() else {
                    return;
                };
                log_events(controller.tick(clock.now()));
            }),
        );
        tracing::debug!(
            triggers = controller.borrow().triggers().len(),
            "reveal controller started"
        );

        Self { controller, task }
    }

    pub fn controller(&self) -> &Rc<RefCell<RevealController<S, V>>> {
        &self.controller
    }

    pub fn is_running(&self) -> bool {
        self.task.is_active()
    }

    /// Stop the periodic tick. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.task.is_active() {
            self.task.cancel();
            tracing::debug!("reveal controller disposed");
        }
    }
}

impl<S, V, H: TaskHandle> Drop for RevealRuntime<S, V, H> {
    fn drop(&mut self) {
        self.task.cancel();
    }
}

fn log_events(events: Vec<Event>) {
    for event in events {
        tracing::debug!(?event, "gate transition");
    }
}
