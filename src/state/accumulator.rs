// Pan/zoom accumulation between consolidations.
use log::warn;

use crate::model::{DeltaRecord, GestureInput, GesturePhase, Transform, WheelInput};

/// Net movement since the last consolidation, plus the last absolute
/// snapshot of a native gesture so successive gesture events can be
/// turned into increments.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureAccumulator {
    pub cumulative_translate_x: f64,
    pub cumulative_translate_y: f64,
    /// Always > 0.
    pub cumulative_scale: f64,
    pub last_touch_x: f64,
    pub last_touch_y: f64,
    pub last_touch_scale: f64,
}

impl Default for GestureAccumulator {
    fn default() -> Self {
        Self {
            cumulative_translate_x: 0.0,
            cumulative_translate_y: 0.0,
            cumulative_scale: 1.0,
            last_touch_x: 0.0,
            last_touch_y: 0.0,
            last_touch_scale: 1.0,
        }
    }
}

impl GestureAccumulator {
    /// Ctrl+wheel zooms by `exp(-deltaY / 100)`, a plain wheel pans by the
    /// deltas times `direction` (±1).
    pub fn apply_wheel(&mut self, wheel: &WheelInput, direction: f64) {
        if wheel.ctrl_key {
            let next = self.cumulative_scale * (-wheel.delta_y / 100.0).exp();
            if next > 0.0 && next.is_finite() {
                self.cumulative_scale = next;
            } else {
                warn!(
                    "skipping wheel zoom step {} (deltaY {}) that leaves the scale range",
                    self.cumulative_scale, wheel.delta_y
                );
            }
            return;
        }
        if wheel.delta_x.is_finite() {
            self.cumulative_translate_x += wheel.delta_x * direction;
        }
        if wheel.delta_y.is_finite() {
            self.cumulative_translate_y += wheel.delta_y * direction;
        }
    }

    /// Gesture start only captures the snapshot; change and end fold the
    /// difference to the previous snapshot in and then advance it.
    pub fn apply_gesture(&mut self, gesture: &GestureInput) {
        if gesture.phase != GesturePhase::Start {
            if let Some(x) = gesture.screen_x {
                self.cumulative_translate_x += x - self.last_touch_x;
            }
            if let Some(y) = gesture.screen_y {
                self.cumulative_translate_y += y - self.last_touch_y;
            }
            if let Some(scale) = gesture.scale {
                let factor = 1.0 + (scale - self.last_touch_scale);
                if factor > 0.0 && factor.is_finite() {
                    self.cumulative_scale *= factor;
                } else {
                    warn!(
                        "skipping non-positive gesture scale step {} -> {}",
                        self.last_touch_scale, scale
                    );
                }
            }
        }
        if let Some(x) = gesture.screen_x {
            self.last_touch_x = x;
        }
        if let Some(y) = gesture.screen_y {
            self.last_touch_y = y;
        }
        if let Some(scale) = gesture.scale {
            self.last_touch_scale = scale;
        }
    }

    pub fn transform(&self) -> Transform {
        Transform {
            tx: self.cumulative_translate_x,
            ty: self.cumulative_translate_y,
            scale: self.cumulative_scale,
        }
    }

    pub fn is_at_rest(&self) -> bool {
        self.cumulative_translate_x == 0.0
            && self.cumulative_translate_y == 0.0
            && self.cumulative_scale == 1.0
    }

    /// Builds the record for the current totals and resets them. The touch
    /// snapshot is left alone: a gesture in progress keeps its continuity
    /// across consolidation windows.
    pub fn take_delta(&mut self) -> DeltaRecord {
        let record = DeltaRecord {
            x: self.cumulative_translate_x,
            y: self.cumulative_translate_y,
            scale_percentage: (self.cumulative_scale * 100.0).round() as u32,
        };
        self.clear();
        record
    }

    pub fn clear(&mut self) {
        self.cumulative_translate_x = 0.0;
        self.cumulative_translate_y = 0.0;
        self.cumulative_scale = 1.0;
    }
}
