pub mod app;
pub mod client_gestures;
pub mod controls_panel;
pub mod delta_log;
pub mod stats_panel;

pub use app::App;
pub use client_gestures::{ClientGestures, ClientGesturesProps};
