//! TOML-based configuration.
//!
//! Everything the page layer reads from or writes to the markup is named
//! here: selectors, element ids, class names and labels, plus the few
//! timing knobs (tick interval, load transition delay, scroll threshold).
//! Defaults match the stock page markup, so an empty file is a valid
//! configuration.
//!
//! The browser layer reads an optional inline
//! `<script type="application/toml" id="lettergate-config">` block; the CLI
//! reads a file given with `--config`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;
use crate::gate::GateLabels;
use crate::toggle::ToggleLabels;

/// Reveal/modal controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LettersConfig {
    /// Clickable triggers that open a letter.
    pub trigger_selector: String,
    /// Triggers evaluated by the tick.
    pub gated_selector: String,
    pub template_attr: String,
    pub unlock_attr: String,
    /// Optional status slot inside a trigger.
    pub status_selector: String,
    pub overlay_id: String,
    pub content_id: String,
    pub close_selector: String,
    pub locked_class: String,
    pub unlocked_label: String,
    pub locked_prefix: String,
    pub cancel_key: String,
    pub tick_interval_ms: u64,
}

/// Background music configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicConfig {
    #[serde(default = "default_audio_id")]
    pub audio_id: String,
    #[serde(default = "default_music_toggle_id")]
    pub toggle_id: String,
    /// 0.0 ..= 1.0
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default = "default_play_label")]
    pub play_label: String,
    #[serde(default = "default_pause_label")]
    pub pause_label: String,
    /// Also try to start playback right at startup, not only on the first
    /// gesture.
    #[serde(default = "default_true")]
    pub autoplay_on_load: bool,
}

/// Fullscreen toggle configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FullscreenConfig {
    pub toggle_id: String,
    pub enter_label: String,
    pub exit_label: String,
    pub unsupported_label: String,
}

/// Post-load transition configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default = "default_load_delay_ms")]
    pub load_delay_ms: u64,
    #[serde(default = "default_scroll_threshold_px")]
    pub scroll_threshold_px: f64,
    #[serde(default = "default_loading_class")]
    pub loading_class: String,
    #[serde(default = "default_loaded_class")]
    pub loaded_class: String,
    #[serde(default = "default_scrolled_class")]
    pub scrolled_class: String,
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub letters: LettersConfig,
    #[serde(default)]
    pub music: MusicConfig,
    #[serde(default)]
    pub fullscreen: FullscreenConfig,
    #[serde(default)]
    pub page: PageConfig,
}

// Default functions
fn default_audio_id() -> String {
    "bgMusic".into()
}
fn default_music_toggle_id() -> String {
    "musicToggle".into()
}
fn default_volume() -> f64 {
    0.35
}
fn default_play_label() -> String {
    "Play music".into()
}
fn default_pause_label() -> String {
    "Pause music".into()
}
fn default_true() -> bool {
    true
}
fn default_load_delay_ms() -> u64 {
    1000
}
fn default_scroll_threshold_px() -> f64 {
    20.0
}
fn default_loading_class() -> String {
    "not-loaded".into()
}
fn default_loaded_class() -> String {
    "loaded".into()
}
fn default_scrolled_class() -> String {
    "scrolled".into()
}

impl Default for LettersConfig {
    fn default() -> Self {
        Self {
            trigger_selector: ".envelope[data-letter-template]".into(),
            gated_selector: ".envelope[data-unlock-date]".into(),
            template_attr: "data-letter-template".into(),
            unlock_attr: "data-unlock-date".into(),
            status_selector: "[data-countdown]".into(),
            overlay_id: "letterModal".into(),
            content_id: "letterContent".into(),
            close_selector: "[data-close='true']".into(),
            locked_class: "envelope--locked".into(),
            unlocked_label: "Unlocked".into(),
            locked_prefix: "Unlocks in ".into(),
            cancel_key: "Escape".into(),
            tick_interval_ms: 1000,
        }
    }
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            audio_id: default_audio_id(),
            toggle_id: default_music_toggle_id(),
            volume: default_volume(),
            play_label: default_play_label(),
            pause_label: default_pause_label(),
            autoplay_on_load: true,
        }
    }
}

impl Default for FullscreenConfig {
    fn default() -> Self {
        Self {
            toggle_id: "fullscreenToggle".into(),
            enter_label: "Fullscreen".into(),
            exit_label: "Exit fullscreen".into(),
            unsupported_label: "Fullscreen not supported".into(),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            load_delay_ms: default_load_delay_ms(),
            scroll_threshold_px: default_scroll_threshold_px(),
            loading_class: default_loading_class(),
            loaded_class: default_loaded_class(),
            scrolled_class: default_scrolled_class(),
        }
    }
}

impl LettersConfig {
    pub fn gate_labels(&self) -> GateLabels {
        GateLabels {
            unlocked: self.unlocked_label.clone(),
            locked_prefix: self.locked_prefix.clone(),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl MusicConfig {
    pub fn toggle_labels(&self) -> ToggleLabels {
        ToggleLabels {
            on: self.pause_label.clone(),
            off: self.play_label.clone(),
        }
    }
}

impl FullscreenConfig {
    pub fn toggle_labels(&self) -> ToggleLabels {
        ToggleLabels {
            on: self.exit_label.clone(),
            off: self.enter_label.clone(),
        }
    }
}

/// The node a dotted key names inside the serialized config.
fn lookup<'a>(root: &'a mut Value, key: &str) -> Option<&'a mut Value> {
    if key.is_empty() {
        return None;
    }
    key.split('.').try_fold(root, |node, part| node.get_mut(part))
}

/// Parse `raw` as the same JSON type as the value it replaces.
fn coerce(existing: &Value, key: &str, raw: &str) -> Result<Value, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    };
    match existing {
        Value::Bool(_) => raw
            .parse::<bool>()
            .map(Value::Bool)
            .map_err(|e| invalid(e.to_string())),
        Value::Number(_) => match raw.parse::<u64>() {
            Ok(n) => Ok(Value::Number(n.into())),
            Err(_) => raw
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| invalid(format!("cannot parse '{raw}' as number"))),
        },
        Value::Object(_) => Err(invalid("cannot overwrite a whole section".into())),
        _ => Ok(Value::String(raw.into())),
    }
}

impl Config {
    /// Parse a TOML document. Missing sections and keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML, has wrongly
    /// typed values, or fails [`Config::validate`].
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Load from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Persist to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Reject values the page layer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.music.volume) {
            return Err(ConfigError::InvalidValue {
                key: "music.volume".into(),
                message: format!("{} is outside 0.0..=1.0", self.music.volume),
            });
        }
        if self.letters.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "letters.tick_interval_ms".into(),
                message: "must be greater than zero".into(),
            });
        }
        if self.letters.tick_interval_ms > u64::from(u32::MAX) {
            return Err(ConfigError::InvalidValue {
                key: "letters.tick_interval_ms".into(),
                message: "does not fit a browser timer".into(),
            });
        }
        let selectors = [
            ("letters.trigger_selector", &self.letters.trigger_selector),
            ("letters.gated_selector", &self.letters.gated_selector),
            ("letters.close_selector", &self.letters.close_selector),
            ("letters.template_attr", &self.letters.template_attr),
            ("letters.overlay_id", &self.letters.overlay_id),
            ("letters.content_id", &self.letters.content_id),
        ];
        for (key, value) in selectors {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    message: "must not be empty".into(),
                });
            }
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut json = serde_json::to_value(self).ok()?;
        match lookup(&mut json, key)? {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value does not parse as
    /// the key's type, or the result fails validation. On error `self` is
    /// left unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        let slot =
            lookup(&mut json, key).ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        *slot = coerce(slot, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Dot-separated keys of every leaf value.
    pub fn keys(&self) -> Vec<String> {
        fn walk(prefix: &str, value: &Value, out: &mut Vec<String>) {
            match value {
                Value::Object(map) => {
                    for (k, v) in map {
                        let key = if prefix.is_empty() {
                            k.clone()
                        } else {
                            format!("{prefix}.{k}")
                        };
                        walk(&key, v, out);
                    }
                }
                _ => out.push(prefix.to_string()),
            }
        }

        let mut out = Vec::new();
        if let Ok(json) = serde_json::to_value(self) {
            walk("", &json, &mut out);
        }
        out
    }
}
