//! DOM binding for the background music toggle.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use js_sys::Promise;
use lettergate_core::{ClickOutcome, MediaPlayer, MusicConfig, PlayOutcome, PlaybackToggle};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlAudioElement, HtmlElement};

use crate::dom::{element_by_id, ToggleButton};
use crate::error::{describe, BindError};

pub struct DomAudio(HtmlAudioElement);

impl MediaPlayer for DomAudio {
    /// `play()` either throws synchronously or hands back a promise that
    /// settles once playback starts or is refused.
    type Attempt = Result<Promise, JsValue>;

    fn is_paused(&self) -> bool {
        self.0.paused()
    }

    fn play(&mut self) -> Self::Attempt {
        self.0.play()
    }

    fn pause(&mut self) {
        if let Err(e) = self.0.pause() {
            tracing::warn!(error = %describe(&e), "pause failed");
        }
    }

    fn set_volume(&mut self, volume: f64) {
        self.0.set_volume(volume);
    }
}

type Toggle = PlaybackToggle<DomAudio, ToggleButton>;

pub struct MusicBinding {
    _toggle: Rc<RefCell<Toggle>>,
    _listeners: Vec<EventListener>,
}

/// Wire the music toggle. `Ok(None)` when the audio element or its control
/// is missing.
pub fn bind(document: &Document, cfg: &MusicConfig) -> Result<Option<MusicBinding>, BindError> {
    let Some(audio) = element_by_id::<HtmlAudioElement>(document, &cfg.audio_id) else {
        tracing::info!(id = %cfg.audio_id, "no audio element, music inactive");
        return Ok(None);
    };
    let Some(button) = element_by_id::<HtmlElement>(document, &cfg.toggle_id) else {
        tracing::info!(id = %cfg.toggle_id, "no music toggle, music inactive");
        return Ok(None);
    };
    let window = web_sys::window().ok_or(BindError::NoWindow)?;

    let toggle = Rc::new(RefCell::new(Toggle::new(
        DomAudio(audio.clone()),
        ToggleButton(button.clone()),
        cfg,
    )));

    let mut listeners = Vec::with_capacity(5);

    listeners.push({
        let toggle = toggle.clone();
        EventListener::new(&button, "click", move |_| {
            let outcome = toggle.borrow_mut().click();
            match outcome {
                ClickOutcome::PlayRequested(attempt) => settle_later(&toggle, attempt),
                ClickOutcome::Paused(Some(event)) => tracing::debug!(?event, "music"),
                ClickOutcome::Paused(None) => {}
            }
        })
    });

    for kind in ["play", "pause"] {
        let toggle = toggle.clone();
        listeners.push(EventListener::new(&audio, kind, move |_| {
            // A media notification can land while a click handler still
            // holds the toggle; that handler resyncs itself.
            let Ok(mut toggle) = toggle.try_borrow_mut() else {
                return;
            };
            if let Some(event) = toggle.resync() {
                tracing::debug!(?event, "music");
            }
        }));
    }

    for kind in ["pointerdown", "keydown"] {
        let toggle = toggle.clone();
        listeners.push(EventListener::once(&window, kind, move |_| {
            let attempt = toggle.borrow_mut().first_gesture();
            if let Some(attempt) = attempt {
                settle_later(&toggle, attempt);
            }
        }));
    }

    let attempt = toggle.borrow_mut().start();
    if let Some(attempt) = attempt {
        settle_later(&toggle, attempt);
    }

    Ok(Some(MusicBinding {
        _toggle: toggle,
        _listeners: listeners,
    }))
}

/// Feed the outcome of a play attempt back into the toggle once it settles.
fn settle_later(toggle: &Rc<RefCell<Toggle>>, attempt: Result<Promise, JsValue>) {
    let promise = match attempt {
        Ok(promise) => promise,
        Err(e) => {
            settle(toggle, rejected(&e));
            return;
        }
    };
    let toggle = toggle.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = match JsFuture::from(promise).await {
            Ok(_) => PlayOutcome::Started,
            Err(e) => rejected(&e),
        };
        settle(&toggle, outcome);
    });
}

fn settle(toggle: &Rc<RefCell<Toggle>>, outcome: PlayOutcome) {
    let Ok(mut toggle) = toggle.try_borrow_mut() else {
        return;
    };
    if let Some(event) = toggle.settle(outcome) {
        tracing::debug!(?event, "music");
    }
}

fn rejected(err: &JsValue) -> PlayOutcome {
    PlayOutcome::Rejected {
        reason: describe(err),
    }
}
