use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ScaleIndicatorProps {
    pub percent: u32,
}

#[function_component(ScaleIndicator)]
pub fn scale_indicator(props: &ScaleIndicatorProps) -> Html {
    html! {<div style="position:absolute; left:16px; bottom:96px; z-index:140; pointer-events:none; background:rgba(0,0,0,0.5); color:#fff; padding:6px 12px; border-radius:8px; font-size:13px; font-family:monospace;">
        { format!("{}%", props.percent) }
    </div>}
}
