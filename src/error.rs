use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown attribute `{0}`")]
    UnknownAttribute(String),
    #[error("invalid consolidation interval `{0}`: expected a positive number of milliseconds")]
    InvalidInterval(String),
    #[error("invalid direction `{0}`: expected 1, -1, natural or traditional")]
    InvalidDirection(String),
    #[error("invalid input device `{0}`: expected any, touchpad or touchscreen")]
    InvalidInputDevice(String),
    #[error("invalid config json: {0}")]
    Json(String),
}

/// Failures while binding the engine to a live document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GestureError {
    #[error("no global `window` exists")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("selector `{selector}` failed: {reason}")]
    Selector { selector: String, reason: String },
    #[error("sentinel `{0}` matched no element")]
    SentinelNotFound(String),
    #[error("could not dispatch `{event}`: {reason}")]
    Dispatch { event: String, reason: String },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<GestureError> for JsValue {
    fn from(err: GestureError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Best-effort text for a thrown JS value.
pub(crate) fn describe_js(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
