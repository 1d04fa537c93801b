use web_sys::{MouseEvent, TouchEvent};
use yew::prelude::*;

use crate::model::Spot;
use crate::state::TapTracker;

#[derive(Properties, PartialEq, Clone)]
pub struct CrowdMarkerProps {
    pub spot: Spot,
    /// Projected position in viewport pixels (marker tip).
    pub screen_x: f64,
    pub screen_y: f64,
    pub on_tap: Callback<Spot>,
}

/// Triangle marker colored by crowd status. Touch taps only fire when the
/// finger stayed within the tap slop between down and up, so a pan that
/// happens to start on a marker is not mistaken for a tap.
#[function_component(CrowdMarker)]
pub fn crowd_marker(props: &CrowdMarkerProps) -> Html {
    let tap = use_mut_ref(TapTracker::default);

    let onclick = {
        let spot = props.spot.clone();
        let on_tap = props.on_tap.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            e.prevent_default();
            on_tap.emit(spot.clone());
        })
    };
    let onmousedown = Callback::from(|e: MouseEvent| e.stop_propagation());
    let ontouchstart = {
        let tap = tap.clone();
        Callback::from(move |e: TouchEvent| {
            e.stop_propagation();
            if let Some(t) = e.touches().item(0) {
                tap.borrow_mut().begin(t.client_x() as f64, t.client_y() as f64);
            }
        })
    };
    let ontouchend = {
        let tap = tap.clone();
        let spot = props.spot.clone();
        let on_tap = props.on_tap.clone();
        Callback::from(move |e: TouchEvent| {
            e.stop_propagation();
            e.prevent_default();
            if let Some(t) = e.changed_touches().item(0) {
                if tap
                    .borrow_mut()
                    .finish(t.client_x() as f64, t.client_y() as f64)
                {
                    on_tap.emit(spot.clone());
                }
            } else {
                tap.borrow_mut().cancel();
            }
        })
    };

    let color = props.spot.status.color();
    let style = format!(
        "position:absolute; left:{}px; top:{}px; transform:translate(-50%, -100%); z-index:100; cursor:pointer;",
        props.screen_x, props.screen_y
    );
    html! {<div style={style} onclick={onclick} onmousedown={onmousedown} ontouchstart={ontouchstart} ontouchend={ontouchend}>
        <svg width="28" height="28" viewBox="0 0 24 24" style="display:block; filter:drop-shadow(0 2px 4px rgba(0,0,0,0.4));">
            <path d="M12 2 L22 20 L2 20 Z" fill={color} stroke="white" stroke-width="2.5" />
        </svg>
    </div>}
}
