//! Page startup: read the config, bind each controller independently and
//! schedule the post-load body transition.

use std::cell::RefCell;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use lettergate_core::{Config, LoadTransition, PageConfig};
use web_sys::{Document, HtmlElement, Window};

use crate::dom::BodyClasses;
use crate::error::{describe, BindError};
use crate::fullscreen::{self, FullscreenBinding};
use crate::letters::{self, LettersBinding};
use crate::music::{self, MusicBinding};

const CONFIG_SCRIPT_ID: &str = "lettergate-config";

/// Everything that has to stay alive while the page is open.
struct App {
    letters: Option<LettersBinding>,
    _music: Option<MusicBinding>,
    _fullscreen: Option<FullscreenBinding>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

/// Initialize once the document is parsed.
pub fn run() -> Result<(), BindError> {
    let window = web_sys::window().ok_or(BindError::NoWindow)?;
    let document = window.document().ok_or(BindError::NoDocument)?;

    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| {
            if let Err(e) = init() {
                tracing::error!(error = %e, "lettergate failed to start");
            }
        })
        .forget();
        return Ok(());
    }
    init()
}

/// Stop the letter countdowns. Every listener stays attached.
fn stop_ticking() {
    APP.with(|slot| {
        if let Some(letters) = slot.borrow_mut().as_mut().and_then(|app| app.letters.as_mut()) {
            letters.stop_ticking();
        }
    });
}

/// Stop every controller and release its listeners. Safe to call more
/// than once.
pub fn dispose() {
    let app = APP.with(|slot| slot.borrow_mut().take());
    if let Some(app) = app {
        if let Some(letters) = app.letters {
            letters.dispose();
        }
        tracing::debug!("lettergate disposed");
    }
}

fn init() -> Result<(), BindError> {
    let window = web_sys::window().ok_or(BindError::NoWindow)?;
    let document = window.document().ok_or(BindError::NoDocument)?;
    let body = document.body().ok_or(BindError::NoBody)?;
    let cfg = read_config(&document);

    let app = App {
        letters: bind_or_log("letters", letters::bind(&document, &cfg.letters)),
        _music: bind_or_log("music", music::bind(&document, &cfg.music)),
        _fullscreen: bind_or_log("fullscreen", fullscreen::bind(&document, &cfg.fullscreen)),
    };
    APP.with(|slot| *slot.borrow_mut() = Some(app));
    EventListener::once(&window, "beforeunload", |_| stop_ticking()).forget();

    schedule_load_transition(&window, &document, body, &cfg.page);
    tracing::info!("lettergate started");
    Ok(())
}

/// Config from the inline TOML block, or defaults.
fn read_config(document: &Document) -> Config {
    let Some(script) = document.get_element_by_id(CONFIG_SCRIPT_ID) else {
        return Config::default();
    };
    let text = script.text_content().unwrap_or_default();
    match Config::from_toml_str(&text) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!(error = %e, "invalid inline config, using defaults");
            Config::default()
        }
    }
}

fn bind_or_log<T>(name: &'static str, result: Result<Option<T>, BindError>) -> Option<T> {
    match result {
        Ok(binding) => binding,
        Err(e) => {
            tracing::warn!(controller = name, error = %e, "controller not bound");
            None
        }
    }
}

fn schedule_load_transition(window: &Window, document: &Document, body: HtmlElement, cfg: &PageConfig) {
    let transition = LoadTransition::from_config(cfg);
    let owned = window.clone();

    let begin = move || {
        let millis = u32::try_from(transition.delay().as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, move || reveal(&owned, BodyClasses(body), transition)).forget();
    };

    if document.ready_state() == "complete" {
        begin();
    } else {
        EventListener::once(window, "load", move |_| begin()).forget();
    }
}

fn reveal(window: &Window, mut body: BodyClasses, transition: LoadTransition) {
    let event = transition.reveal(&mut body, scroll_offset(window));
    tracing::debug!(?event, "page");

    let target = window.clone();
    EventListener::new(window, "scroll", move |_| {
        transition.on_scroll(&mut body, scroll_offset(&target));
    })
    .forget();
}

fn scroll_offset(window: &Window) -> f64 {
    window.scroll_y().unwrap_or_else(|e| {
        tracing::trace!(error = %describe(&e), "scrollY unavailable");
        0.0
    })
}
