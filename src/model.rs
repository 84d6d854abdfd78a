//! Core data models for the gesture widget.
//! Raw inputs coming from the host, the emitted delta record and the
//! demo board state that folds consolidated deltas back in.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

/// A wheel event as reported by the host. Trackpad pinch arrives as a wheel
/// event with the control modifier held.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelInput {
    pub delta_x: f64,
    pub delta_y: f64,
    pub ctrl_key: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Start,
    Change,
    End,
}

impl GesturePhase {
    /// Maps a DOM event type (`gesturestart`, ...) to its phase.
    pub fn from_event_type(ty: &str) -> Option<Self> {
        match ty {
            "gesturestart" => Some(Self::Start),
            "gesturechange" => Some(Self::Change),
            "gestureend" => Some(Self::End),
            _ => None,
        }
    }

    pub fn event_type(self) -> &'static str {
        match self {
            Self::Start => "gesturestart",
            Self::Change => "gesturechange",
            Self::End => "gestureend",
        }
    }
}

/// A native multi-touch gesture event. Position and scale are absolute
/// values; a field the host did not report (or reported as NaN) is `None`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureInput {
    pub phase: GesturePhase,
    pub screen_x: Option<f64>,
    pub screen_y: Option<f64>,
    pub scale: Option<f64>,
}

impl GestureInput {
    pub fn new(phase: GesturePhase, screen_x: f64, screen_y: f64, scale: f64) -> Self {
        Self {
            phase,
            screen_x: finite(screen_x),
            screen_y: finite(screen_y),
            scale: finite(scale),
        }
    }
}

pub(crate) fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
    Wheel(WheelInput),
    Gesture(GestureInput),
}

impl From<WheelInput> for PointerInput {
    fn from(w: WheelInput) -> Self {
        Self::Wheel(w)
    }
}

impl From<GestureInput> for PointerInput {
    fn from(g: GestureInput) -> Self {
        Self::Gesture(g)
    }
}

/// What the host should do with the native event after the engine saw it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// Recognized; the browser default (page scroll/zoom) must be prevented.
    Consumed,
    /// Not ours; let it pass through untouched.
    Ignored,
}

/// Net pan and zoom since the previous consolidation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeltaRecord {
    pub x: f64,
    pub y: f64,
    pub scale_percentage: u32,
}

/// The not-yet-consolidated transform shown as live feedback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub tx: f64,
    pub ty: f64,
    pub scale: f64,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        tx: 0.0,
        ty: 0.0,
        scale: 1.0,
    };

    pub fn to_css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.tx, self.ty, self.scale
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Demo host state: where the board sits after all consolidated deltas.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardState {
    pub offset_x: f64,
    pub offset_y: f64,
    /// Zoom in percent, 100 = unscaled.
    pub zoom_percent: f64,
    /// Most recent deltas first, capped at `HISTORY_LEN`.
    pub history: Vec<DeltaRecord>,
    pub received: u64,
}

impl BoardState {
    pub const HISTORY_LEN: usize = 12;
    pub const MIN_ZOOM_PERCENT: f64 = 5.0;
    pub const MAX_ZOOM_PERCENT: f64 = 2000.0;
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            zoom_percent: 100.0,
            history: Vec::new(),
            received: 0,
        }
    }
}

#[derive(Clone, Debug)]
pub enum BoardAction {
    ApplyDelta(DeltaRecord),
    Reset,
}

impl Reducible for BoardState {
    type Action = BoardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use BoardAction::*;
        let mut new = (*self).clone();
        match action {
            ApplyDelta(delta) => {
                new.offset_x += delta.x;
                new.offset_y += delta.y;
                new.zoom_percent = (new.zoom_percent * delta.scale_percentage as f64 / 100.0)
                    .clamp(Self::MIN_ZOOM_PERCENT, Self::MAX_ZOOM_PERCENT);
                new.history.insert(0, delta);
                new.history.truncate(Self::HISTORY_LEN);
                new.received = new.received.saturating_add(1);
            }
            Reset => {
                new = BoardState::default();
            }
        }
        Rc::new(new)
    }
}
