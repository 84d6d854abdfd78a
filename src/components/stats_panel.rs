use crate::util::format_px;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatsPanelProps {
    pub offset_x: f64,
    pub offset_y: f64,
    pub zoom_percent: f64,
    pub received: u64,
}

#[function_component]
pub fn StatsPanel(props: &StatsPanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;"; // label | value
    let label_style = "flex:1; font-weight:500;";
    let value_style =
        "min-width:90px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    html! {
        <div style="position:absolute; top:12px; left:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:230px; display:flex; flex-direction:column; gap:10px; font-size:14px;">
            <div style={row_style}>
                <span style={format!("{} color:#58a6ff;", label_style)}>{"Offset X"}</span>
                <span style={format!("{} color:#58a6ff;", value_style)}>{ format_px(props.offset_x) }</span>
            </div>
            <div style={row_style}>
                <span style={format!("{} color:#58a6ff;", label_style)}>{"Offset Y"}</span>
                <span style={format!("{} color:#58a6ff;", value_style)}>{ format_px(props.offset_y) }</span>
            </div>
            <div style={row_style}>
                <span style={format!("{} color:#d4af37;", label_style)}>{"Zoom"}</span>
                <span style={format!("{} color:#d4af37;", value_style)}>{ format!("{:.0}%", props.zoom_percent) }</span>
            </div>
            <div style={row_style}>
                <span style={format!("{} color:#8b949e;", label_style)}>{"Deltas"}</span>
                <span style={format!("{} color:#8b949e;", value_style)}>{ props.received }</span>
            </div>
        </div>
    }
}
