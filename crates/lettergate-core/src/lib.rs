//! # Lettergate Core Library
//!
//! Host-independent logic for the Lettergate page enhancer: letters that
//! unlock on a date, a modal overlay to read them in, a background music
//! toggle and a fullscreen toggle. The browser layer (`lettergate-web`) is
//! a thin binding of these controllers to DOM elements; the CLI uses the
//! same library to preview a letter schedule.
//!
//! ## Architecture
//!
//! - **Gate**: unlock date parsing, countdown decomposition and the per
//!   trigger lock evaluation run on every tick
//! - **Reveal**: the shared overlay, click classification and the
//!   controller that ties them to the gated triggers
//! - **Playback / Display mode**: state mirroring for the two toggles
//! - **Page**: the post-load body class transition
//!
//! Every host capability (elements, media, fullscreen, timers, clock) sits
//! behind a trait so the rules run the same natively and in the browser.

pub mod clock;
pub mod config;
pub mod display_mode;
pub mod error;
pub mod events;
pub mod gate;
pub mod manifest;
pub mod page;
pub mod playback;
pub mod reveal;
pub mod task;
pub mod toggle;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, FullscreenConfig, LettersConfig, MusicConfig, PageConfig};
pub use display_mode::{DisplayModeBinding, DisplayModeToggle, FullscreenHost};
pub use error::{ConfigError, ScheduleError};
pub use events::{CloseReason, Event};
pub use gate::{Countdown, Gate, GateLabels, GatedTrigger, TriggerView};
pub use manifest::{LetterEntry, LetterStatus, Manifest};
pub use page::{ClassList, LoadTransition};
pub use playback::{ClickOutcome, MediaPlayer, PlayOutcome, PlaybackState, PlaybackToggle};
pub use reveal::{
    DispatchTable, Interaction, MarkupElement, Overlay, OverlayState, OverlaySurface,
    RevealController, RevealRuntime, Role, TriggerFlags,
};
pub use task::{ManualScheduler, Scheduler, TaskHandle};
pub use toggle::{ToggleLabels, ToggleView};
