//! Fullscreen toggle.
//!
//! Pure capability binding: the platform tracks whether the page is
//! fullscreen, the toggle only asks it and mirrors the answer.

use crate::config::FullscreenConfig;
use crate::events::Event;
use crate::toggle::{mirror, ToggleLabels, ToggleView};

/// The page's fullscreen capability.
pub trait FullscreenHost {
    /// Whether the platform can put the root element in fullscreen at all.
    fn is_supported(&self) -> bool;

    fn is_fullscreen(&self) -> bool;

    fn enter(&mut self);

    fn exit(&mut self);
}

#[derive(Debug)]
pub struct DisplayModeToggle<F, V> {
    host: F,
    view: V,
    labels: ToggleLabels,
    mirrored: Option<bool>,
}

/// Result of binding a toggle to a host.
#[derive(Debug)]
pub enum DisplayModeBinding<F, V> {
    Active(DisplayModeToggle<F, V>),
    /// The control was disabled with an explanatory label. Attach no
    /// listeners.
    Unsupported(V),
}

impl<F: FullscreenHost, V: ToggleView> DisplayModeToggle<F, V> {
    pub fn bind(host: F, mut view: V, cfg: &FullscreenConfig) -> DisplayModeBinding<F, V> {
        if !host.is_supported() {
            view.set_disabled(true);
            view.set_pressed(false);
            view.set_label(&cfg.unsupported_label);
            tracing::debug!("fullscreen unavailable, toggle disabled");
            return DisplayModeBinding::Unsupported(view);
        }

        let mut toggle = Self {
            host,
            view,
            labels: cfg.toggle_labels(),
            mirrored: None,
        };
        toggle.resync();
        DisplayModeBinding::Active(toggle)
    }

    pub fn is_fullscreen(&self) -> bool {
        self.host.is_fullscreen()
    }

    pub fn host(&self) -> &F {
        &self.host
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Enter fullscreen if not in it, exit otherwise. The view is updated
    /// by the change notification that follows, not here.
    pub fn click(&mut self) {
        if self.host.is_fullscreen() {
            self.host.exit();
        } else {
            self.host.enter();
        }
    }

    /// Handle a native fullscreen-change notification.
    pub fn resync(&mut self) -> Option<Event> {
        let active = self.host.is_fullscreen();
        mirror(&mut self.view, &self.labels, active);
        let previous = self.mirrored.replace(active);
        match previous {
            Some(prev) if prev != active => Some(Event::FullscreenChanged { active }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct FakeHost {
        supported: bool,
        active: bool,
        requests: Vec<&'static str>,
    }

    impl FullscreenHost for FakeHost {
        fn is_supported(&self) -> bool {
            self.supported
        }
        fn is_fullscreen(&self) -> bool {
            self.active
        }
        fn enter(&mut self) {
            self.requests.push("enter");
        }
        fn exit(&mut self) {
            self.requests.push("exit");
        }
    }

    #[derive(Debug, Default)]
    struct FakeButton {
        pressed: bool,
        label: String,
        disabled: bool,
    }

    impl ToggleView for FakeButton {
        fn set_pressed(&mut self, pressed: bool) {
            self.pressed = pressed;
        }
        fn set_label(&mut self, label: &str) {
            self.label = label.to_string();
        }
        fn set_disabled(&mut self, disabled: bool) {
            self.disabled = disabled;
        }
    }

    fn active(host: FakeHost) -> DisplayModeToggle<FakeHost, FakeButton> {
        match DisplayModeToggle::bind(host, FakeButton::default(), &FullscreenConfig::default()) {
            DisplayModeBinding::Active(t) => t,
            DisplayModeBinding::Unsupported(_) => panic!("expected active binding"),
        }
    }

    #[test]
    fn unsupported_disables_with_label() {
        let binding = DisplayModeToggle::bind(
            FakeHost::default(),
            FakeButton::default(),
            &FullscreenConfig::default(),
        );
        match binding {
            DisplayModeBinding::Unsupported(view) => {
                assert!(view.disabled);
                assert!(!view.pressed);
                assert_eq!(view.label, "Fullscreen not supported");
            }
            DisplayModeBinding::Active(_) => panic!("expected unsupported"),
        }
    }

    #[test]
    fn click_toggles_direction() {
        let mut toggle = active(FakeHost {
            supported: true,
            ..FakeHost::default()
        });
        assert_eq!(toggle.view().label, "Fullscreen");

        toggle.click();
        toggle.host.active = true;
        assert_eq!(
            toggle.resync(),
            Some(Event::FullscreenChanged { active: true })
        );
        assert_eq!(toggle.view().label, "Exit fullscreen");
        assert!(toggle.view().pressed);

        toggle.click();
        assert_eq!(toggle.host().requests, vec!["enter", "exit"]);
    }

    #[test]
    fn external_exit_is_mirrored() {
        let mut toggle = active(FakeHost {
            supported: true,
            active: true,
            ..FakeHost::default()
        });
        assert!(toggle.view().pressed);

        // Platform-level escape, no click involved.
        toggle.host.active = false;
        assert_eq!(
            toggle.resync(),
            Some(Event::FullscreenChanged { active: false })
        );
        assert_eq!(toggle.view().label, "Fullscreen");
        assert!(toggle.resync().is_none());
    }
}
