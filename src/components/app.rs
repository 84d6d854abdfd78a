use super::{
    client_gestures::ClientGestures, controls_panel::ControlsPanel, delta_log::DeltaLog,
    stats_panel::StatsPanel,
};
use crate::config::{GestureConfig, InputDevice, ScrollDirection};
use crate::model::{BoardAction, BoardState, DeltaRecord};
use log::warn;
use yew::prelude::*;

const CONFIG_KEY: &str = "cg_gesture_config";

/// Selectors are fixed by the markup below; only the tunables are persisted.
fn with_demo_binding(cfg: GestureConfig) -> GestureConfig {
    GestureConfig {
        sentinel: Some("#viewport".to_string()),
        live_feedback: Some("#box".to_string()),
        ..cfg
    }
}

fn load_config() -> GestureConfig {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            if let Ok(Some(raw)) = store.get_item(CONFIG_KEY) {
                match GestureConfig::from_json(&raw) {
                    Ok(cfg) => return cfg,
                    Err(err) => warn!("ignoring stored gesture config: {}", err),
                }
            }
        }
    }
    GestureConfig::default()
}

#[function_component(App)]
pub fn app() -> Html {
    let board = use_reducer(BoardState::default);
    let config = use_state(|| with_demo_binding(load_config()));

    // Persist tunables
    {
        use_effect_with((*config).clone(), move |cfg| {
            let stored = GestureConfig {
                sentinel: None,
                live_feedback: None,
                ..cfg.clone()
            };
            if let Some(win) = web_sys::window() {
                if let Ok(Some(store)) = win.local_storage() {
                    if let Ok(s) = serde_json::to_string(&stored) {
                        let _ = store.set_item(CONFIG_KEY, &s);
                    }
                }
            }
            || ()
        });
    }

    let on_delta = {
        let board = board.clone();
        Callback::from(move |delta: DeltaRecord| board.dispatch(BoardAction::ApplyDelta(delta)))
    };
    let on_toggle_direction = {
        let config = config.clone();
        Callback::from(move |_| {
            let direction = match config.direction {
                ScrollDirection::Traditional => ScrollDirection::Natural,
                ScrollDirection::Natural => ScrollDirection::Traditional,
            };
            config.set(GestureConfig {
                direction,
                ..(*config).clone()
            });
        })
    };
    let on_interval = {
        let config = config.clone();
        Callback::from(move |consolidation_interval: u32| {
            config.set(GestureConfig {
                consolidation_interval,
                ..(*config).clone()
            });
        })
    };
    let on_input_device = {
        let config = config.clone();
        Callback::from(move |input_device: InputDevice| {
            config.set(GestureConfig {
                input_device,
                ..(*config).clone()
            });
        })
    };
    let on_reset_board = {
        let board = board.clone();
        Callback::from(move |_| board.dispatch(BoardAction::Reset))
    };

    let board_style = format!(
        "position:absolute; left:50%; top:50%; transform:translate({}px, {}px) scale({});",
        board.offset_x,
        board.offset_y,
        board.zoom_percent / 100.0
    );

    html! {
        <div id="root" style="position:relative; width:100vw; height:100vh; background:#0e1116; color:#c9d1d9; font-family:sans-serif;">
            <ClientGestures config={(*config).clone()} {on_delta}>
                <div id="viewport" style="position:absolute; inset:0;">
                    <div id="board" style={board_style}>
                        <div id="box" style="width:160px; height:160px; margin:-80px 0 0 -80px; background:#1f6feb; border:1px solid #58a6ff; border-radius:12px;"></div>
                    </div>
                </div>
            </ClientGestures>
            <StatsPanel
                offset_x={board.offset_x}
                offset_y={board.offset_y}
                zoom_percent={board.zoom_percent}
                received={board.received}
            />
            <ControlsPanel
                direction={config.direction}
                {on_toggle_direction}
                interval_ms={config.consolidation_interval}
                {on_interval}
                input_device={config.input_device}
                {on_input_device}
                {on_reset_board}
            />
            <DeltaLog history={board.history.clone()} />
        </div>
    }
}
