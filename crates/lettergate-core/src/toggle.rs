/// A two-state button: a pressed flag plus a text label.
///
/// Shared by the playback and display-mode toggles.
pub trait ToggleView {
    fn set_pressed(&mut self, pressed: bool);

    fn set_label(&mut self, label: &str);

    fn set_disabled(&mut self, disabled: bool);
}

/// Labels for the two states of a toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleLabels {
    /// Shown while the toggle is on (pressed).
    pub on: String,
    /// Shown while the toggle is off.
    pub off: String,
}

impl ToggleLabels {
    pub fn for_state(&self, on: bool) -> &str {
        if on {
            &self.on
        } else {
            &self.off
        }
    }
}

/// Mirror `on` onto `view`.
pub(crate) fn mirror<V: ToggleView>(view: &mut V, labels: &ToggleLabels, on: bool) {
    view.set_pressed(on);
    view.set_label(labels.for_state(on));
}
