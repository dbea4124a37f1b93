//! Errors on the engine's control surface
//!
//! Frame analysis never fails: missing or low-confidence landmarks degrade
//! to "no count this frame". Errors only come from selecting an exercise,
//! validating configuration, or crossing the JS boundary.

use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Exercise tag not in the registry
    #[error("unknown exercise type '{tag}'")]
    UnknownExercise { tag: String },

    /// Configuration failed validation
    #[error("invalid config '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    /// Value could not be converted to or from JS
    #[error("bridge error: {0}")]
    Bridge(String),
}

impl EngineError {
    pub(crate) fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl From<EngineError> for wasm_bindgen::JsValue {
    fn from(err: EngineError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
