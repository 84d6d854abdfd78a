use crate::config::{InputDevice, ScrollDirection};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub direction: ScrollDirection,
    pub on_toggle_direction: Callback<()>,
    pub interval_ms: u32,
    pub on_interval: Callback<u32>,
    pub input_device: InputDevice,
    pub on_input_device: Callback<InputDevice>,
    pub on_reset_board: Callback<()>,
}

const INTERVAL_STEP_MS: u32 = 25;
const MAX_INTERVAL_MS: u32 = 1000;

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let toggle_cb = {
        let cb = props.on_toggle_direction.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let slower_cb = {
        let cb = props.on_interval.clone();
        let next = (props.interval_ms + INTERVAL_STEP_MS).min(MAX_INTERVAL_MS);
        Callback::from(move |_| cb.emit(next))
    };
    let faster_cb = {
        let cb = props.on_interval.clone();
        let next = props.interval_ms.saturating_sub(INTERVAL_STEP_MS).max(INTERVAL_STEP_MS);
        Callback::from(move |_| cb.emit(next))
    };
    let device_cb = {
        let cb = props.on_input_device.clone();
        let next = match props.input_device {
            InputDevice::Any => InputDevice::Touchpad,
            InputDevice::Touchpad => InputDevice::Touchscreen,
            InputDevice::Touchscreen => InputDevice::Any,
        };
        Callback::from(move |_| cb.emit(next))
    };
    let reset_cb = {
        let cb = props.on_reset_board.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let device_label = match props.input_device {
        InputDevice::Any => "Input: any",
        InputDevice::Touchpad => "Input: touchpad",
        InputDevice::Touchscreen => "Input: touchscreen",
    };
    html! {<div style="position:absolute; top:12px; right:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:200px; display:flex; flex-direction:column; gap:6px;">
        <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
            <input id="natural" type="checkbox" checked={props.direction == ScrollDirection::Natural} onclick={toggle_cb} />
            <span>{"Natural scrolling"}</span>
        </label>
        <div style="display:flex; align-items:center; gap:6px;">
            <button onclick={faster_cb}>{"-"}</button>
            <span style="flex:1; text-align:center; font-variant-numeric:tabular-nums;">{ format!("{} ms", props.interval_ms) }</span>
            <button onclick={slower_cb}>{"+"}</button>
        </div>
        <button onclick={device_cb}>{ device_label }</button>
        <button onclick={reset_cb}>{"Reset board"}</button>
        <div style="font-size:11px; opacity:0.7;">{"Scroll to pan, ctrl+scroll or pinch to zoom"}</div>
    </div>}
}
