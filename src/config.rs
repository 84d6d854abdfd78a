//! Widget configuration, settable from element attributes or JSON.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_CONSOLIDATION_INTERVAL_MS: u32 = 50;

/// Sign applied to wheel pan deltas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DirectionRepr", into = "i8")]
pub enum ScrollDirection {
    #[default]
    Traditional,
    Natural,
}

impl ScrollDirection {
    pub fn sign(self) -> f64 {
        match self {
            Self::Traditional => 1.0,
            Self::Natural => -1.0,
        }
    }

    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "+1" | "traditional" => Ok(Self::Traditional),
            "-1" | "natural" => Ok(Self::Natural),
            _ => Err(ConfigError::InvalidDirection(value.to_string())),
        }
    }
}

impl From<ScrollDirection> for i8 {
    fn from(d: ScrollDirection) -> Self {
        match d {
            ScrollDirection::Traditional => 1,
            ScrollDirection::Natural => -1,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DirectionRepr {
    Sign(i64),
    Name(String),
}

impl TryFrom<DirectionRepr> for ScrollDirection {
    type Error = ConfigError;

    fn try_from(repr: DirectionRepr) -> Result<Self, Self::Error> {
        match repr {
            DirectionRepr::Sign(1) => Ok(Self::Traditional),
            DirectionRepr::Sign(-1) => Ok(Self::Natural),
            DirectionRepr::Sign(n) => Err(ConfigError::InvalidDirection(n.to_string())),
            DirectionRepr::Name(s) => Self::parse(&s),
        }
    }
}

/// Which input families the widget reacts to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputDevice {
    #[default]
    Any,
    /// Wheel events only (mouse wheel, trackpad scroll and ctrl+wheel pinch).
    Touchpad,
    /// Native multi-touch gesture events only.
    Touchscreen,
}

impl InputDevice {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "any" => Ok(Self::Any),
            "touchpad" => Ok(Self::Touchpad),
            "touchscreen" => Ok(Self::Touchscreen),
            _ => Err(ConfigError::InvalidInputDevice(value.to_string())),
        }
    }

    pub fn accepts_wheel(self) -> bool {
        !matches!(self, Self::Touchscreen)
    }

    pub fn accepts_gesture(self) -> bool {
        !matches!(self, Self::Touchpad)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GestureConfig {
    /// Quiet period before accumulated movement is emitted.
    pub consolidation_interval: u32,
    #[serde(rename = "direction-sign")]
    pub direction: ScrollDirection,
    pub input_device: InputDevice,
    /// CSS selector bounding where events are received; whole document when unset.
    #[serde(alias = "bounds")]
    pub sentinel: Option<String>,
    /// CSS selector for the elements that get the live transform.
    pub live_feedback: Option<String>,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            consolidation_interval: DEFAULT_CONSOLIDATION_INTERVAL_MS,
            direction: ScrollDirection::default(),
            input_device: InputDevice::default(),
            sentinel: None,
            live_feedback: None,
        }
    }
}

impl GestureConfig {
    pub const ATTRIBUTES: [&'static str; 5] = [
        "consolidation-interval",
        "direction-sign",
        "input-device",
        "sentinel",
        "live-feedback",
    ];

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(raw).map_err(|e| ConfigError::Json(e.to_string()))?;
        if cfg.consolidation_interval == 0 {
            return Err(ConfigError::InvalidInterval("0".into()));
        }
        Ok(cfg)
    }

    pub fn from_attributes<'a, I>(attrs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut cfg = Self::default();
        for (name, value) in attrs {
            cfg.set_attribute(name, Some(value))?;
        }
        Ok(cfg)
    }

    /// True when `other` listens on the same region and moves the same
    /// elements, so a live widget can take it without re-attaching.
    pub fn same_binding(&self, other: &Self) -> bool {
        self.sentinel == other.sentinel && self.live_feedback == other.live_feedback
    }

    /// Applies one attribute change. `None` (attribute removed) restores the default.
    /// On error the config is left untouched.
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) -> Result<(), ConfigError> {
        match name {
            "consolidation-interval" => {
                self.consolidation_interval = match value {
                    Some(v) => parse_interval(v)?,
                    None => DEFAULT_CONSOLIDATION_INTERVAL_MS,
                };
            }
            "direction-sign" => {
                self.direction = value.map(ScrollDirection::parse).transpose()?.unwrap_or_default();
            }
            "input-device" => {
                self.input_device = value.map(InputDevice::parse).transpose()?.unwrap_or_default();
            }
            "sentinel" | "bounds" => self.sentinel = non_empty(value),
            "live-feedback" => self.live_feedback = non_empty(value),
            other => return Err(ConfigError::UnknownAttribute(other.to_string())),
        }
        Ok(())
    }
}

fn parse_interval(value: &str) -> Result<u32, ConfigError> {
    let trimmed = value.trim();
    let digits = trimmed.strip_suffix("ms").unwrap_or(trimmed).trim_end();
    match digits.parse::<u32>() {
        Ok(ms) if ms > 0 => Ok(ms),
        _ => Err(ConfigError::InvalidInterval(value.to_string())),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
