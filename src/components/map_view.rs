use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlElement, HtmlImageElement, TouchEvent};
use yew::prelude::*;

use crate::model::Spot;
use crate::state::{MapViewport, Transform};

use super::{
    crowd_marker::CrowdMarker, scale_indicator::ScaleIndicator, status_legend::StatusLegend,
    zoom_controls::ZoomControls,
};

#[derive(Properties, PartialEq, Clone)]
pub struct MapViewProps {
    pub spots: Vec<Spot>,
    pub on_spot_tap: Callback<Spot>,
}

/// Hosts the map image inside a full-window gesture surface. The viewport
/// engine lives in a mut ref and is updated in place by the raw event
/// listeners; the committed transform is mirrored into a state handle at each
/// checkpoint so overlays re-render without the session data itself becoming
/// render state.
#[function_component(MapView)]
pub fn map_view(props: &MapViewProps) -> Html {
    let surface_ref = use_node_ref();
    let image_ref = use_node_ref();
    let engine = use_mut_ref(MapViewport::new);
    let transform = use_state(Transform::default);
    let image_ready = use_state(|| false);
    let show_legend = use_state(|| {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(Some(v)) = store.get_item("cm_setting_show_legend") {
                    return !(v == "0" || v == "false");
                }
            }
        }
        true
    });

    // Persist legend visibility
    {
        let flag = *show_legend;
        use_effect_with(flag, move |_| {
            if let Some(win) = web_sys::window() {
                if let Ok(Some(store)) = win.local_storage() {
                    let _ = store.set_item("cm_setting_show_legend", if flag { "1" } else { "0" });
                }
            }
            || ()
        });
    }

    // Mount effect: raw listeners on the gesture surface and window
    {
        let surface_ref = surface_ref.clone();
        let engine = engine.clone();
        let transform = transform.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let surface: HtmlElement = surface_ref.cast::<HtmlElement>().expect("surface");

            let commit: Rc<dyn Fn()> = {
                let engine = engine.clone();
                let transform = transform.clone();
                Rc::new(move || transform.set(engine.borrow().transform()))
            };

            // Wheel zoom anchored at the cursor
            let wheel_cb = {
                let surface = surface.clone();
                let engine = engine.clone();
                let commit = commit.clone();
                Closure::wrap(Box::new(move |e: web_sys::WheelEvent| {
                    e.prevent_default();
                    let rect = surface.get_bounding_client_rect();
                    let cx = e.client_x() as f64 - rect.left();
                    let cy = e.client_y() as f64 - rect.top();
                    engine.borrow_mut().wheel_zoom(e.delta_y(), cx, cy);
                    commit();
                }) as Box<dyn FnMut(_)>)
            };
            surface
                .add_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref())
                .unwrap();

            // Mouse drag
            let mousedown_cb = {
                let surface = surface.clone();
                let engine = engine.clone();
                let commit = commit.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    if e.button() != 0 {
                        return;
                    }
                    e.prevent_default();
                    let rect = surface.get_bounding_client_rect();
                    engine.borrow_mut().pointer_down(
                        e.client_x() as f64 - rect.left(),
                        e.client_y() as f64 - rect.top(),
                    );
                    commit();
                }) as Box<dyn FnMut(_)>)
            };
            surface
                .add_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                )
                .unwrap();

            let mousemove_cb = {
                let surface = surface.clone();
                let engine = engine.clone();
                let commit = commit.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    let rect = surface.get_bounding_client_rect();
                    engine.borrow_mut().pointer_move(
                        e.client_x() as f64 - rect.left(),
                        e.client_y() as f64 - rect.top(),
                    );
                    if engine.borrow().is_gesturing() {
                        commit();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            surface
                .add_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                )
                .unwrap();

            // Releasing outside the surface still ends the drag
            let mouseup_cb = {
                let engine = engine.clone();
                let commit = commit.clone();
                Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
                    engine.borrow_mut().release(None);
                    commit();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref())
                .unwrap();

            // Losing input capture force-resets the gesture
            let blur_cb = {
                let engine = engine.clone();
                let commit = commit.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    engine.borrow_mut().cancel();
                    commit();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("blur", blur_cb.as_ref().unchecked_ref())
                .unwrap();

            // Touch: one finger drags, two pinch
            let touch_start_cb = {
                let surface = surface.clone();
                let engine = engine.clone();
                let commit = commit.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    e.prevent_default();
                    let rect = surface.get_bounding_client_rect();
                    let touches = e.touches();
                    if touches.length() >= 2 {
                        if let (Some(t0), Some(t1)) = (touches.item(0), touches.item(1)) {
                            engine.borrow_mut().pinch_start(
                                t0.client_x() as f64 - rect.left(),
                                t0.client_y() as f64 - rect.top(),
                                t1.client_x() as f64 - rect.left(),
                                t1.client_y() as f64 - rect.top(),
                            );
                        }
                    } else if let Some(t0) = touches.item(0) {
                        engine.borrow_mut().pointer_down(
                            t0.client_x() as f64 - rect.left(),
                            t0.client_y() as f64 - rect.top(),
                        );
                    }
                    commit();
                }) as Box<dyn FnMut(_)>)
            };
            surface
                .add_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                )
                .ok();

            let touch_move_cb = {
                let surface = surface.clone();
                let engine = engine.clone();
                let commit = commit.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    e.prevent_default();
                    let rect = surface.get_bounding_client_rect();
                    let touches = e.touches();
                    if touches.length() >= 2 {
                        if let (Some(t0), Some(t1)) = (touches.item(0), touches.item(1)) {
                            engine.borrow_mut().pinch_move(
                                t0.client_x() as f64 - rect.left(),
                                t0.client_y() as f64 - rect.top(),
                                t1.client_x() as f64 - rect.left(),
                                t1.client_y() as f64 - rect.top(),
                            );
                        }
                    } else if let Some(t0) = touches.item(0) {
                        engine.borrow_mut().pointer_move(
                            t0.client_x() as f64 - rect.left(),
                            t0.client_y() as f64 - rect.top(),
                        );
                    }
                    commit();
                }) as Box<dyn FnMut(_)>)
            };
            surface
                .add_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                )
                .ok();

            // Last finger up commits the clamped transform; a pinch losing one
            // finger degrades into a drag from the remaining point
            let touch_end_cb = {
                let surface = surface.clone();
                let engine = engine.clone();
                let commit = commit.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    e.prevent_default();
                    let touches = e.touches();
                    if let Some(t0) = touches.item(0) {
                        let rect = surface.get_bounding_client_rect();
                        engine.borrow_mut().release(Some((
                            t0.client_x() as f64 - rect.left(),
                            t0.client_y() as f64 - rect.top(),
                        )));
                    } else {
                        engine.borrow_mut().release(None);
                    }
                    commit();
                }) as Box<dyn FnMut(_)>)
            };
            surface
                .add_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref())
                .ok();
            surface
                .add_event_listener_with_callback(
                    "touchcancel",
                    touch_end_cb.as_ref().unchecked_ref(),
                )
                .ok();

            // Viewport height tracks the live window size
            let resize_cb = {
                let surface = surface.clone();
                let window = window.clone();
                let engine = engine.clone();
                let commit = commit.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    let height = window
                        .inner_height()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(600.0);
                    engine
                        .borrow_mut()
                        .viewport_resized(surface.offset_width() as f64, height);
                    commit();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .unwrap();
            window
                .add_event_listener_with_callback(
                    "orientationchange",
                    resize_cb.as_ref().unchecked_ref(),
                )
                .unwrap();

            // Cleanup
            let window_clone = window.clone();
            move || {
                let _ = surface
                    .remove_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref());
                let _ = surface.remove_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                );
                let _ = surface.remove_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "mouseup",
                    mouseup_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "blur",
                    blur_cb.as_ref().unchecked_ref(),
                );
                let _ = surface.remove_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                );
                let _ = surface.remove_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                );
                let _ = surface.remove_event_listener_with_callback(
                    "touchend",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                let _ = surface.remove_event_listener_with_callback(
                    "touchcancel",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "resize",
                    resize_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "orientationchange",
                    resize_cb.as_ref().unchecked_ref(),
                );
                let _keep_alive = (
                    &wheel_cb,
                    &mousedown_cb,
                    &mousemove_cb,
                    &mouseup_cb,
                    &blur_cb,
                    &touch_start_cb,
                    &touch_move_cb,
                    &touch_end_cb,
                    &resize_cb,
                );
            }
        });
    }

    // Fit the image once its natural size is known
    let on_image_load = {
        let image_ref = image_ref.clone();
        let surface_ref = surface_ref.clone();
        let engine = engine.clone();
        let transform = transform.clone();
        let image_ready = image_ready.clone();
        Callback::from(move |_: Event| {
            if let (Some(img), Some(surface)) = (
                image_ref.cast::<HtmlImageElement>(),
                surface_ref.cast::<HtmlElement>(),
            ) {
                let height = web_sys::window()
                    .and_then(|w| w.inner_height().ok())
                    .and_then(|v| v.as_f64())
                    .unwrap_or(600.0);
                engine.borrow_mut().image_loaded(
                    img.natural_width() as f64,
                    img.natural_height() as f64,
                    height,
                    surface.offset_width() as f64,
                );
                transform.set(engine.borrow().transform());
                image_ready.set(true);
            }
        })
    };

    let zoom_in_cb: Callback<()> = {
        let engine = engine.clone();
        let transform = transform.clone();
        Callback::from(move |()| {
            engine.borrow_mut().zoom_in();
            transform.set(engine.borrow().transform());
        })
    };
    let zoom_out_cb: Callback<()> = {
        let engine = engine.clone();
        let transform = transform.clone();
        Callback::from(move |()| {
            engine.borrow_mut().zoom_out();
            transform.set(engine.borrow().transform());
        })
    };
    let reset_cb: Callback<()> = {
        let engine = engine.clone();
        let transform = transform.clone();
        Callback::from(move |()| {
            engine.borrow_mut().reset();
            transform.set(engine.borrow().transform());
        })
    };
    let toggle_legend_cb: Callback<()> = {
        let show_legend = show_legend.clone();
        Callback::from(move |()| show_legend.set(!*show_legend))
    };

    let t = *transform;
    let eng = engine.borrow();
    let dims = eng.image_dimensions();
    let viewport_height = eng.viewport_size().height;
    let gesturing = eng.is_gesturing();
    let percent = eng.scale_percent();
    let markers: Html = if *image_ready {
        props
            .spots
            .iter()
            .map(|spot| {
                let (sx, sy) = eng.project(spot.position_x, spot.position_y);
                html! { <CrowdMarker key={spot.id} spot={spot.clone()} screen_x={sx} screen_y={sy} on_tap={props.on_spot_tap.clone()} /> }
            })
            .collect()
    } else {
        html! {}
    };
    drop(eng);

    let height_css = if viewport_height > 0.0 {
        format!("{}px", viewport_height)
    } else {
        "100vh".to_string()
    };
    let container_style = format!(
        "position:relative; width:100vw; height:{}; overflow:hidden; background:#e8e4d9;",
        height_css
    );
    let surface_style = format!(
        "position:absolute; inset:0; touch-action:none; cursor:{};",
        if gesturing { "grabbing" } else { "grab" }
    );
    // No CSS transition on the image: markers are placed in screen space from
    // the same committed transform and must move in lockstep with it.
    let img_style = format!(
        "position:absolute; top:0; left:0; width:{}px; height:{}px; max-width:none; \
         transform:translate({}px, {}px) scale({}); transform-origin:top left; \
         pointer-events:none; user-select:none;",
        dims.width, dims.height, t.x, t.y, t.scale,
    );

    html! {<div style={container_style}>
        <div ref={surface_ref.clone()} style={surface_style}>
            <img ref={image_ref.clone()} src="/map.png" alt="Venue map" draggable="false" style={img_style} onload={on_image_load} />
        </div>
        { markers }
        <ZoomControls on_zoom_in={zoom_in_cb} on_zoom_out={zoom_out_cb} on_reset={reset_cb} />
        <ScaleIndicator percent={percent} />
        <StatusLegend show={*show_legend} on_toggle={toggle_legend_cb} />
    </div>}
}
