use web_sys::MouseEvent;
use yew::prelude::*;

use crate::model::CrowdStatus;

#[derive(Properties, PartialEq, Clone)]
pub struct StatusLegendProps {
    pub show: bool,
    pub on_toggle: Callback<()>,
}

#[function_component(StatusLegend)]
pub fn status_legend(props: &StatusLegendProps) -> Html {
    let toggle = {
        let cb = props.on_toggle.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let swallow_mouse = Callback::from(|e: MouseEvent| e.stop_propagation());

    if !props.show {
        return html! {<div style="position:absolute; left:16px; bottom:16px; z-index:140;" onmousedown={swallow_mouse}>
            <button onclick={toggle} style="padding:6px 12px; border:none; border-radius:8px; background:rgba(255,255,255,0.9); box-shadow:0 2px 6px rgba(0,0,0,0.2); font-size:12px; cursor:pointer;">{"Legend"}</button>
        </div>};
    }

    html! {<div style="position:absolute; left:16px; bottom:16px; z-index:140; background:rgba(255,255,255,0.92); border-radius:10px; box-shadow:0 2px 8px rgba(0,0,0,0.25); padding:10px 12px; min-width:150px;"
        onmousedown={swallow_mouse}>
        <div style="display:flex; align-items:center; justify-content:space-between; margin-bottom:6px;">
            <span style="font-weight:600; font-size:13px;">{"Crowd level"}</span>
            <button onclick={toggle} style="border:none; background:none; font-size:11px; color:#6b7280; cursor:pointer;">{"Hide"}</button>
        </div>
        { for CrowdStatus::ALL.iter().map(|status| html!{
            <div style="display:flex; align-items:center; gap:8px; margin:3px 0; font-size:13px;">
                <span style={format!("color:{}; font-size:11px;", status.color())}>{"▲"}</span>
                <span>{ status.label() }</span>
            </div>
        }) }
    </div>}
}
