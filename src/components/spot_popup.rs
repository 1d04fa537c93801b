use web_sys::MouseEvent;
use yew::prelude::*;

use crate::model::{CrowdStatus, Spot};
use crate::util::format_wait_time;

#[derive(Properties, PartialEq, Clone)]
pub struct SpotPopupProps {
    pub spot: Spot,
    pub on_close: Callback<()>,
}

#[function_component(SpotPopup)]
pub fn spot_popup(props: &SpotPopupProps) -> Html {
    let color = props.spot.status.color();

    let backdrop_click = {
        let cb = props.on_close.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let swallow_click = Callback::from(|e: MouseEvent| e.stop_propagation());
    let close_click = {
        let cb = props.on_close.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    html! {<div style="position:fixed; inset:0; z-index:200; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.5);" onclick={backdrop_click}>
        <div style="background:#fff; border-radius:16px; box-shadow:0 12px 40px rgba(0,0,0,0.35); width:90%; max-width:360px; overflow:hidden;" onclick={swallow_click}>
            <div style={format!("padding:14px 20px; color:#fff; background:{}; display:flex; align-items:center; justify-content:space-between;", color)}>
                <h2 style="margin:0; font-size:19px;">{ props.spot.name.clone() }</h2>
                <span style="padding:3px 10px; background:rgba(255,255,255,0.2); border-radius:999px; font-size:13px;">{ props.spot.status.label() }</span>
            </div>
            <div style="padding:14px 20px;">
                <div style="font-size:12px; color:#6b7280; margin-bottom:2px;">{"Wait time"}</div>
                <div style={format!("font-size:28px; font-weight:700; color:{};", color)}>{ format_wait_time(props.spot.wait_time_mins) }</div>
                { if let Some(desc) = &props.spot.description { html!{<>
                    <div style="font-size:12px; color:#6b7280; margin:12px 0 2px;">{"About"}</div>
                    <p style="margin:0; color:#374151; line-height:1.5;">{ desc.clone() }</p>
                </>} } else { html!{} } }
                <div style="font-size:12px; color:#6b7280; margin:12px 0 4px;">{"Crowd level"}</div>
                <div style="display:flex; gap:6px;">
                    { for CrowdStatus::ALL.iter().map(|status| {
                        let active = *status == props.spot.status;
                        let badge_style = if active {
                            format!("display:flex; align-items:center; gap:4px; padding:3px 10px; border-radius:999px; font-size:13px; color:#fff; background:{};", status.color())
                        } else {
                            "display:flex; align-items:center; gap:4px; padding:3px 10px; border-radius:999px; font-size:13px; color:#6b7280; background:#e5e7eb; opacity:0.6;".to_string()
                        };
                        html!{<span style={badge_style}>{"▲ "}{ status.label() }</span>}
                    }) }
                </div>
            </div>
            <div style="padding:12px 20px; border-top:1px solid #f3f4f6;">
                <button onclick={close_click} style="width:100%; padding:10px; border:none; border-radius:10px; background:#f3f4f6; color:#374151; font-weight:500; cursor:pointer;">{"Close"}</button>
            </div>
        </div>
    </div>}
}
