//! Consolidates high-frequency wheel, ctrl+wheel pinch and native multi-touch
//! gesture events into a low-frequency stream of pan/zoom [`DeltaRecord`]s.
//!
//! [`state::GestureEngine`] is the headless core; [`dom::GestureWidget`] binds
//! it to a document and [`components::ClientGestures`] wraps that for yew.

pub mod components;
pub mod config;
pub mod dom;
pub mod error;
pub mod feedback;
pub mod model;
pub mod state;
pub mod util;

pub use config::{GestureConfig, InputDevice, ScrollDirection};
pub use error::{ConfigError, GestureError};
pub use model::{DeltaRecord, Disposition, GestureInput, GesturePhase, PointerInput, WheelInput};
pub use state::{GestureEngine, ManualScheduler, Scheduler};
