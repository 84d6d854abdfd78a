//! Binds a [`GestureEngine`] to a live document: listeners, timer and the
//! `delta` event the host listens for.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_events::{EventListener, EventListenerOptions};
use js_sys::Reflect;
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, CustomEventInit, Event, EventTarget, HtmlElement, WheelEvent, Window};

use crate::config::GestureConfig;
use crate::error::{GestureError, describe_js};
use crate::feedback::ElementFeedback;
use crate::model::{DeltaRecord, Disposition, GestureInput, GesturePhase, WheelInput, finite};
use crate::state::{GestureEngine, Scheduler};

pub const DELTA_EVENT: &str = "delta";
pub const GESTURE_EVENTS: [&str; 3] = ["gesturestart", "gesturechange", "gestureend"];

pub type DeltaCallback = Rc<dyn Fn(DeltaRecord)>;
type BrowserEngine = GestureEngine<BrowserScheduler, ElementFeedback>;

pub fn wheel_input(event: &WheelEvent) -> WheelInput {
    WheelInput {
        delta_x: event.delta_x(),
        delta_y: event.delta_y(),
        ctrl_key: event.ctrl_key(),
    }
}

/// WebKit's `GestureEvent` has no web-sys binding, so its fields are read
/// reflectively. Missing or non-numeric fields come back as `None`.
pub fn gesture_input(event: &Event) -> Option<GestureInput> {
    let phase = GesturePhase::from_event_type(&event.type_())?;
    let field = |name: &str| {
        Reflect::get(event.as_ref(), &JsValue::from_str(name))
            .ok()
            .and_then(|v| v.as_f64())
            .and_then(finite)
    };
    Some(GestureInput {
        phase,
        screen_x: field("screenX"),
        screen_y: field("screenY"),
        scale: field("scale"),
    })
}

/// `setTimeout` driven scheduler. One closure is created per widget and
/// reused for every timer; cancellation is by id.
pub struct BrowserScheduler {
    window: Window,
    on_fire: Closure<dyn FnMut()>,
}

impl Scheduler for BrowserScheduler {
    type Handle = i32;

    fn schedule(&mut self, delay_ms: u32) -> Option<i32> {
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match self.window.set_timeout_with_callback_and_timeout_and_arguments_0(
            self.on_fire.as_ref().unchecked_ref(),
            delay,
        ) {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("could not arm consolidation timer: {}", describe_js(&e));
                None
            }
        }
    }

    fn cancel(&mut self, handle: i32) {
        self.window.clear_timeout_with_handle(handle);
    }
}

/// Hands finished records to the host: a bubbling `delta` CustomEvent on the
/// host element, then the optional Rust callback.
#[derive(Clone)]
pub struct DeltaEmitter {
    host: EventTarget,
    on_delta: Option<DeltaCallback>,
}

impl DeltaEmitter {
    pub fn new(host: EventTarget, on_delta: Option<DeltaCallback>) -> Self {
        Self { host, on_delta }
    }

    pub fn emit(&self, record: DeltaRecord) {
        if let Err(err) = self.dispatch(&record) {
            warn!("{}", err);
        }
        if let Some(cb) = &self.on_delta {
            cb(record);
        }
    }

    fn dispatch(&self, record: &DeltaRecord) -> Result<(), GestureError> {
        let fail = |reason: String| GestureError::Dispatch {
            event: DELTA_EVENT.to_string(),
            reason,
        };
        let json = serde_json::to_string(record).map_err(|e| fail(e.to_string()))?;
        let detail = js_sys::JSON::parse(&json).map_err(|e| fail(describe_js(&e)))?;
        let init = CustomEventInit::new();
        init.set_bubbles(true);
        init.set_detail(&detail);
        let event = CustomEvent::new_with_event_init_dict(DELTA_EVENT, &init)
            .map_err(|e| fail(describe_js(&e)))?;
        self.host
            .dispatch_event(&event)
            .map_err(|e| fail(describe_js(&e)))?;
        Ok(())
    }
}

/// A running engine wired into the page. Dropping it stops the engine,
/// cancels a pending consolidation and detaches every listener.
pub struct GestureWidget {
    engine: Rc<RefCell<BrowserEngine>>,
    _listeners: Vec<EventListener>,
}

impl GestureWidget {
    pub fn attach(
        host: &HtmlElement,
        config: GestureConfig,
        on_delta: Option<DeltaCallback>,
    ) -> Result<Self, GestureError> {
        let window = web_sys::window().ok_or(GestureError::NoWindow)?;
        let document = window.document().ok_or(GestureError::NoDocument)?;

        // Outside the sentinel nothing is listened to, so events pass through.
        let receiver: EventTarget = match config.sentinel.as_deref() {
            Some(selector) => document
                .query_selector(selector)
                .map_err(|e| GestureError::Selector {
                    selector: selector.to_string(),
                    reason: describe_js(&e),
                })?
                .ok_or_else(|| GestureError::SentinelNotFound(selector.to_string()))?
                .into(),
            None => document.clone().into(),
        };
        let feedback = match config.live_feedback.as_deref() {
            Some(selector) => ElementFeedback::from_selector(&document, selector)?,
            None => ElementFeedback::default(),
        };
        let emitter = DeltaEmitter::new(host.clone().into(), on_delta);

        let engine = Rc::new_cyclic(|weak: &Weak<RefCell<BrowserEngine>>| {
            let weak = weak.clone();
            let on_fire = Closure::wrap(Box::new(move || {
                // Torn down: the engine is gone and so is the emission.
                let Some(engine) = weak.upgrade() else {
                    return;
                };
                let record = engine.borrow_mut().fire();
                // Release the engine before the host sees the record.
                drop(engine);
                if let Some(record) = record {
                    emitter.emit(record);
                }
            }) as Box<dyn FnMut()>);
            RefCell::new(GestureEngine::new(
                config,
                BrowserScheduler { window, on_fire },
                feedback,
            ))
        });
        engine.borrow_mut().start();

        let mut listeners = Vec::with_capacity(1 + GESTURE_EVENTS.len());
        {
            let engine = engine.clone();
            listeners.push(EventListener::new_with_options(
                &receiver,
                "wheel",
                EventListenerOptions::enable_prevent_default(),
                move |event: &Event| {
                    let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                        return;
                    };
                    if engine.borrow_mut().handle(wheel_input(wheel)) == Disposition::Consumed {
                        event.prevent_default();
                    }
                },
            ));
        }
        for event_type in GESTURE_EVENTS {
            let engine = engine.clone();
            listeners.push(EventListener::new_with_options(
                &receiver,
                event_type,
                EventListenerOptions::enable_prevent_default(),
                move |event: &Event| {
                    let Some(input) = gesture_input(event) else {
                        return;
                    };
                    if input.screen_x.is_none() || input.screen_y.is_none() || input.scale.is_none() {
                        warn!("{} with missing fields: {:?}", event.type_(), input);
                    }
                    if engine.borrow_mut().handle(input) == Disposition::Consumed {
                        event.prevent_default();
                    }
                },
            ));
        }
        debug!(
            "gesture widget attached (sentinel: {:?}, live feedback: {})",
            engine.borrow().config().sentinel,
            engine.borrow().feedback().len()
        );

        Ok(Self {
            engine,
            _listeners: listeners,
        })
    }

    pub fn config(&self) -> GestureConfig {
        self.engine.borrow().config().clone()
    }

    /// Applies a config whose DOM binding (sentinel, live feedback) is unchanged.
    /// Callers re-attach when [`GestureConfig::same_binding`] is false.
    pub fn reconfigure(&self, config: GestureConfig) {
        self.engine.borrow_mut().reconfigure(config);
    }
}

impl Drop for GestureWidget {
    fn drop(&mut self) {
        match self.engine.try_borrow_mut() {
            Ok(mut engine) => engine.stop(),
            Err(_) => warn!("gesture widget dropped while its engine was busy"),
        }
        debug!("gesture widget detached");
    }
}
