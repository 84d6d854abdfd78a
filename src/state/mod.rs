pub mod accumulator;
pub mod engine;
pub mod scheduler;

pub use accumulator::GestureAccumulator;
pub use engine::{GestureEngine, Lifecycle};
pub use scheduler::{ManualScheduler, Scheduler, TimerId};
