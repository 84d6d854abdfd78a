use std::rc::Rc;

use log::{error, warn};
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::config::GestureConfig;
use crate::dom::{DeltaCallback, GestureWidget};
use crate::model::DeltaRecord;

#[derive(Properties, PartialEq, Clone)]
pub struct ClientGesturesProps {
    #[prop_or_default]
    pub config: GestureConfig,
    pub on_delta: Callback<DeltaRecord>,
    #[prop_or_default]
    pub children: Children,
}

/// Host element for a gesture widget. Attaches on mount, re-attaches when the
/// sentinel or live-feedback selector changes, reconfigures in place for
/// anything else, and tears down on unmount.
#[function_component(ClientGestures)]
pub fn client_gestures(props: &ClientGesturesProps) -> Html {
    let host_ref = use_node_ref();
    let widget = use_mut_ref(|| None::<GestureWidget>);
    let on_delta = use_mut_ref(|| props.on_delta.clone());

    // Keep the latest callback without re-attaching.
    {
        let on_delta = on_delta.clone();
        use_effect_with(props.on_delta.clone(), move |cb| {
            *on_delta.borrow_mut() = cb.clone();
            || ()
        });
    }

    {
        let host_ref = host_ref.clone();
        let widget = widget.clone();
        let on_delta = on_delta.clone();
        use_effect_with(props.config.clone(), move |config| {
            let mut slot = widget.borrow_mut();
            let rebind = slot
                .as_ref()
                .is_none_or(|w| !w.config().same_binding(config));
            if rebind {
                // Old listeners and timer go before the new ones exist.
                *slot = None;
                match host_ref.cast::<HtmlElement>() {
                    Some(host) => {
                        let forward: DeltaCallback = Rc::new(move |delta: DeltaRecord| {
                            let cb = on_delta.borrow().clone();
                            cb.emit(delta);
                        });
                        match GestureWidget::attach(&host, config.clone(), Some(forward)) {
                            Ok(w) => *slot = Some(w),
                            Err(err) => error!("client-gestures: {}", err),
                        }
                    }
                    None => warn!("client-gestures host is not mounted"),
                }
            } else if let Some(w) = slot.as_ref() {
                w.reconfigure(config.clone());
            }
            || ()
        });
    }

    {
        let widget = widget.clone();
        use_effect_with((), move |_| {
            move || {
                widget.borrow_mut().take();
            }
        });
    }

    html! {
        <div ref={host_ref} class="client-gestures" style="position:relative; width:100%; height:100%; overflow:hidden; touch-action:none;">
            { for props.children.iter() }
        </div>
    }
}
