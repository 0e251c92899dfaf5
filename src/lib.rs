// scam_story_core: AI Scams walkthrough Rust/WASM engine
// All narrative logic lives here; the page's JS forwards input and applies render effects.

mod choreography;
mod effects;
mod error;
mod persona;
mod scammer;
mod selection;
mod sequencer;
mod session;
mod timeline;
mod types;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub use choreography::{script_for, Cast};
pub use effects::{Axis, Class, Effect, LineTag, StyleProperty};
pub use error::StoryError;
pub use persona::{generate_victim, VictimPersona};
pub use scammer::{generate_scammer, pick_scam_tactic, ScammerPersona};
pub use selection::{ChipUpdate, SelectionState};
pub use sequencer::{Direction, Screen, Sequencer, Transition};
pub use session::Session;
pub use timeline::{Advance, Cue, Script, Timeline};
pub use types::*;

/// Initialize panic hook and console logger for the browser.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Walkthrough session exposed to JavaScript.
/// Every call returns JSON so one crossing carries a whole batch of effects.
#[wasm_bindgen]
pub struct Story {
    session: Session<SmallRng>,
}

#[wasm_bindgen]
impl Story {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<Story, JsValue> {
        Story::from_config(config_json).map_err(to_js)
    }

    /// Chip click. Returns `ChipUpdate` JSON: `{ selected, can_continue, clipboard_scale }`.
    pub fn toggle_chip(&mut self, group: &str, value: &str) -> Result<String, JsValue> {
        self.try_toggle_chip(group, value).map_err(to_js)
    }

    /// Chip keydown. Enter and Space act as a click; other keys return `null`.
    pub fn chip_key(&mut self, group: &str, value: &str, key: &str) -> Result<String, JsValue> {
        if !is_activation_key(key) {
            return Ok("null".to_string());
        }
        self.toggle_chip(group, value)
    }

    pub fn can_continue(&self) -> bool {
        self.session.can_continue()
    }

    /// Continue button. Returns the effects due immediately as a JSON array.
    pub fn confirm(&mut self, now_ms: f64) -> Result<String, JsValue> {
        let effects = self.session.confirm(Millis::from_f64(now_ms));
        to_json(&effects).map_err(to_js)
    }

    /// Wheel input. Returns the effects due immediately as a JSON array.
    pub fn wheel(&mut self, delta_y: f64, now_ms: f64) -> Result<String, JsValue> {
        let effects = self.session.wheel(delta_y, Millis::from_f64(now_ms));
        to_json(&effects).map_err(to_js)
    }

    /// Animation-frame callback. Returns the effects that came due as a JSON array.
    pub fn tick(&mut self, now_ms: f64) -> Result<String, JsValue> {
        let effects = self.session.tick(Millis::from_f64(now_ms));
        to_json(&effects).map_err(to_js)
    }

    pub fn current_screen(&self) -> u8 {
        self.session.current_screen().number()
    }

    pub fn is_transitioning(&self) -> bool {
        self.session.is_transitioning()
    }

    /// Generated victim as JSON, or `null` before the profile screen.
    pub fn victim_json(&self) -> Result<String, JsValue> {
        to_json(&self.session.victim()).map_err(to_js)
    }

    /// Generated scammer as JSON, or `null` before the match screen.
    pub fn scammer_json(&self) -> Result<String, JsValue> {
        to_json(&self.session.scammer()).map_err(to_js)
    }
}

impl Story {
    fn from_config(config_json: &str) -> Result<Story, StoryError> {
        let config: StoryConfig = serde_json::from_str(config_json)
            .map_err(|e| StoryError::InvalidConfig(e.to_string()))?;
        log::set_max_level(config.level_filter()?);

        let seed = config.seed.unwrap_or_else(host_seed);
        log::debug!("story session seeded with {}", seed);

        Ok(Story {
            session: Session::new(config, SmallRng::seed_from_u64(seed)),
        })
    }

    fn try_toggle_chip(&mut self, group: &str, value: &str) -> Result<String, StoryError> {
        let chip = Chip::parse(group, value)?;
        let update = self.session.toggle(chip);
        to_json(&update)
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, StoryError> {
    Ok(serde_json::to_string(value)?)
}

fn to_js(err: StoryError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(target_arch = "wasm32")]
fn host_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn host_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story() -> Story {
        Story::new(r#"{"seed":7}"#).expect("valid config")
    }

    #[test]
    fn story_creation_works() {
        let story = story();
        assert_eq!(story.current_screen(), 1);
        assert!(!story.can_continue());
        assert_eq!(story.victim_json().unwrap(), "null");
    }

    // JsValue::from_str is unavailable off wasm32, so failures are checked on the inner API.
    #[test]
    fn bad_config_is_rejected() {
        assert!(matches!(
            Story::from_config("{not json"),
            Err(StoryError::InvalidConfig(_))
        ));
        assert!(matches!(
            Story::from_config(r#"{"log_level":"loud"}"#),
            Err(StoryError::InvalidConfig(_))
        ));
    }

    #[test]
    fn unknown_chip_is_rejected() {
        let mut story = story();
        assert!(matches!(
            story.try_toggle_chip("age", "ancient"),
            Err(StoryError::UnknownChip { .. })
        ));
    }

    #[test]
    fn chip_round_trip_through_json() {
        let mut story = story();
        let update: serde_json::Value =
            serde_json::from_str(&story.toggle_chip("age", "45-54").unwrap()).unwrap();
        assert_eq!(update["selected"], true);
        assert_eq!(update["can_continue"], false);

        assert_eq!(story.chip_key("sex", "female", "Tab").unwrap(), "null");
        story.chip_key("sex", "female", "Enter").unwrap();
        story.chip_key("occupation", "salaried", " ").unwrap();
        let update: serde_json::Value =
            serde_json::from_str(&story.toggle_chip("have", "pan-number").unwrap()).unwrap();
        assert_eq!(update["can_continue"], true);
        assert!(story.can_continue());
    }

    #[test]
    fn full_walkthrough_over_json() {
        let mut story = story();
        for (group, value) in [
            ("age", "45-54"),
            ("sex", "female"),
            ("occupation", "salaried"),
            ("have", "mobile-number"),
        ] {
            story.toggle_chip(group, value).unwrap();
        }

        let immediate: Vec<serde_json::Value> =
            serde_json::from_str(&story.confirm(10.0).unwrap()).unwrap();
        assert!(immediate.iter().all(|e| e["op"] == "set_style"));

        let mut now = 10.0;
        for _ in 0..6 {
            now += 5_000.0;
            story.tick(now).unwrap();
            story.wheel(120.0, now).unwrap();
        }
        now += 5_000.0;
        story.tick(now).unwrap();
        assert_eq!(story.current_screen(), 7);
        assert!(!story.is_transitioning());

        let scammer: serde_json::Value = serde_json::from_str(&story.scammer_json().unwrap()).unwrap();
        let victim: serde_json::Value = serde_json::from_str(&story.victim_json().unwrap()).unwrap();
        assert_eq!(scammer["tactic"], "authority");
        assert_eq!(scammer["city"], victim["city"]);
        assert_eq!(victim["sex"], "female");
    }
}
