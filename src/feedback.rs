//! Live (pre-consolidation) visual feedback.

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::error::{GestureError, describe_js};
use crate::model::Transform;

pub trait LiveFeedback {
    fn apply(&mut self, transform: &Transform);
}

/// Headless hosts have nothing to move.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFeedback;

impl LiveFeedback for NoFeedback {
    fn apply(&mut self, _transform: &Transform) {}
}

/// Writes the transform into `style.transform` of every target element.
#[derive(Debug, Default, Clone)]
pub struct ElementFeedback {
    targets: Vec<HtmlElement>,
}

impl ElementFeedback {
    pub fn new(targets: Vec<HtmlElement>) -> Self {
        Self { targets }
    }

    /// Every `HtmlElement` matching `selector`; non-HTML matches (e.g. SVG) are skipped.
    pub fn from_selector(document: &Document, selector: &str) -> Result<Self, GestureError> {
        let list = document
            .query_selector_all(selector)
            .map_err(|e| GestureError::Selector {
                selector: selector.to_string(),
                reason: describe_js(&e),
            })?;
        let mut targets = Vec::with_capacity(list.length() as usize);
        for i in 0..list.length() {
            if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
                targets.push(el);
            }
        }
        debug!("live feedback `{}` -> {} element(s)", selector, targets.len());
        Ok(Self { targets })
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl LiveFeedback for ElementFeedback {
    fn apply(&mut self, transform: &Transform) {
        if self.targets.is_empty() {
            return;
        }
        let css = transform.to_css();
        for el in &self.targets {
            if let Err(e) = el.style().set_property("transform", &css) {
                debug!("could not set live transform: {}", describe_js(&e));
            }
        }
    }
}
