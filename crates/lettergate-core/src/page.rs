//! Post-load visual transition on the page body.

use std::time::Duration;

use crate::config::PageConfig;
use crate::events::Event;

/// Class list of the element the transition writes to (the body).
pub trait ClassList {
    fn add_class(&mut self, class: &str);

    fn remove_class(&mut self, class: &str);

    fn set_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadTransition {
    loading_class: String,
    loaded_class: String,
    scrolled_class: String,
    scroll_threshold_px: f64,
    delay: Duration,
}

impl LoadTransition {
    pub fn from_config(cfg: &PageConfig) -> Self {
        Self {
            loading_class: cfg.loading_class.clone(),
            loaded_class: cfg.loaded_class.clone(),
            scrolled_class: cfg.scrolled_class.clone(),
            scroll_threshold_px: cfg.scroll_threshold_px,
            delay: Duration::from_millis(cfg.load_delay_ms),
        }
    }

    /// How long after the load notification [`LoadTransition::reveal`]
    /// should run.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_scrolled(&self, offset_px: f64) -> bool {
        offset_px > self.scroll_threshold_px
    }

    /// Swap the loading class for the loaded class and apply the current
    /// scroll state.
    pub fn reveal<C: ClassList>(&self, body: &mut C, offset_px: f64) -> Event {
        body.remove_class(&self.loading_class);
        body.add_class(&self.loaded_class);
        Event::PageLoaded {
            scrolled: self.on_scroll(body, offset_px),
        }
    }

    pub fn on_scroll<C: ClassList>(&self, body: &mut C, offset_px: f64) -> bool {
        let scrolled = self.is_scrolled(offset_px);
        body.set_class(&self.scrolled_class, scrolled);
        scrolled
    }
}
