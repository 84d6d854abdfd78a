use crate::model::DeltaRecord;
use crate::util::format_delta;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct DeltaLogProps {
    pub history: Vec<DeltaRecord>,
}

#[function_component]
pub fn DeltaLog(props: &DeltaLogProps) -> Html {
    html! {<div style="position:absolute; right:12px; bottom:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:170px; font-size:12px;">
        <div style="font-weight:600; margin-bottom:4px;">{"Consolidated deltas"}</div>
        { if props.history.is_empty() { html!{ <div style="color:#8b949e;">{"none yet"}</div> } } else { html!{} } }
        { for props.history.iter().map(|d| html!{ <div style="font-variant-numeric:tabular-nums;">{ format_delta(d) }</div> }) }
    </div>}
}
