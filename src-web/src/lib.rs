//! Browser layer for Lettergate.
//!
//! Binds the `lettergate-core` controllers to the page's DOM. Loaded as a
//! wasm module; everything starts from [`start`].

mod bootstrap;
mod dom;
mod error;
mod fullscreen;
mod letters;
mod music;
mod scheduler;

use wasm_bindgen::prelude::*;

pub use error::BindError;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    // Without a tracing subscriber, tracing's `log` feature forwards every
    // event to the console logger.
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    console_log::init_with_level(level).map_err(|e| JsValue::from_str(&e.to_string()))?;

    bootstrap::run()?;
    Ok(())
}

/// Stop the letter countdowns and detach every listener.
#[wasm_bindgen]
pub fn dispose() {
    bootstrap::dispose();
}
