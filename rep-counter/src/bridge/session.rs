//! JS session object wrapping one engine
//!
//! The web app creates one `RepSession` per workout session and feeds it a
//! pose per detector frame. Poses and results cross the boundary as plain
//! JS objects through serde.

use std::time::Duration;

use wasm_bindgen::prelude::*;

use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::dispatch::RepEngine;
use crate::error::EngineError;
use crate::exercise::ExerciseType;
use crate::logging::LOG_TARGET;
use crate::pose::Pose;

/// Browser monotonic clock (`performance.now()`)
///
/// Falls back to `Date.now()` where there is no window, e.g. some workers.
struct JsClock;

impl Clock for JsClock {
    fn now(&self) -> Duration {
        let ms = web_sys::window()
            .and_then(|window| window.performance())
            .map_or_else(js_sys::Date::now, |performance| performance.now());
        Duration::from_secs_f64((ms / 1000.0).max(0.0))
    }
}

fn bridge_error(err: serde_wasm_bindgen::Error) -> JsValue {
    EngineError::Bridge(err.to_string()).into()
}

#[wasm_bindgen]
pub struct RepSession {
    engine: RepEngine,
}

#[wasm_bindgen]
impl RepSession {
    /// Session with the default configuration
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<RepSession, JsValue> {
        Self::build(EngineConfig::default())
    }

    /// Session with a (partial) config object; missing fields use defaults
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<RepSession, JsValue> {
        let config: EngineConfig = serde_wasm_bindgen::from_value(config).map_err(bridge_error)?;
        Self::build(config)
    }

    #[wasm_bindgen(js_name = setExerciseType)]
    pub fn set_exercise_type(&mut self, tag: &str) -> Result<(), JsValue> {
        let exercise: ExerciseType = tag.parse()?;
        self.engine.set_exercise_type(exercise);
        Ok(())
    }

    #[wasm_bindgen(getter, js_name = exerciseType)]
    pub fn exercise_type(&self) -> String {
        self.engine.exercise_type().to_string()
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }

    #[wasm_bindgen(js_name = resetAll)]
    pub fn reset_all(&mut self) {
        self.engine.reset_all();
    }

    /// Analyze one frame. `pose` is null/undefined when nothing was detected.
    pub fn analyze(
        &mut self,
        pose: JsValue,
        current_count: u32,
        video_height: Option<u32>,
    ) -> Result<JsValue, JsValue> {
        let pose: Pose = if pose.is_null() || pose.is_undefined() {
            Pose::default()
        } else {
            serde_wasm_bindgen::from_value(pose).map_err(bridge_error)?
        };

        let result = self.engine.analyze(&pose, current_count, video_height);
        serde_wasm_bindgen::to_value(&result).map_err(bridge_error)
    }

    /// Counter internals for the debug overlay
    pub fn snapshot(&mut self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.engine.snapshot()).map_err(bridge_error)
    }

    #[wasm_bindgen(js_name = overlayText)]
    pub fn overlay_text(&mut self) -> String {
        self.engine.snapshot().overlay_text()
    }
}

impl RepSession {
    fn build(config: EngineConfig) -> Result<RepSession, JsValue> {
        let engine = RepEngine::with_clock(config, JsClock).map_err(|err| {
            log::warn!(target: LOG_TARGET, "rejected session config: {}", err);
            JsValue::from(err)
        })?;
        Ok(RepSession { engine })
    }
}
