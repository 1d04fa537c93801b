use web_sys::{MouseEvent, TouchEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ZoomControlsProps {
    pub on_zoom_in: Callback<()>,
    pub on_zoom_out: Callback<()>,
    pub on_reset: Callback<()>,
}

#[function_component(ZoomControls)]
pub fn zoom_controls(props: &ZoomControlsProps) -> Html {
    let zi = {
        let cb = props.on_zoom_in.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let zo = {
        let cb = props.on_zoom_out.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let rs = {
        let cb = props.on_reset.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    // Button presses must not leak into the gesture surface
    let swallow_mouse = Callback::from(|e: MouseEvent| e.stop_propagation());
    let swallow_touch = Callback::from(|e: TouchEvent| e.stop_propagation());

    let button_style = "width:44px; height:44px; border:none; border-radius:999px; background:#fff; box-shadow:0 2px 6px rgba(0,0,0,0.25); font-size:18px; cursor:pointer;";
    html! {<div style="position:absolute; right:16px; bottom:96px; z-index:150; display:flex; flex-direction:column; gap:8px;"
        onmousedown={swallow_mouse} ontouchstart={swallow_touch}>
        <button onclick={zi} style={button_style} aria-label="Zoom in">{"+"}</button>
        <button onclick={zo} style={button_style} aria-label="Zoom out">{"−"}</button>
        <button onclick={rs} style={button_style} aria-label="Reset view">{"⟲"}</button>
    </div>}
}
