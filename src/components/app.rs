use yew::prelude::*;

use super::{map_view::MapView, spot_popup::SpotPopup};
use crate::model::{self, Spot};

#[function_component(App)]
pub fn app() -> Html {
    let spots = use_state(Vec::<Spot>::new);
    let selected = use_state(|| None::<Spot>);

    // Spot records come from the host page (or the seed set)
    {
        let spots = spots.clone();
        use_effect_with((), move |_| {
            spots.set(model::load_spots());
            || ()
        });
    }

    let on_spot_tap = {
        let selected = selected.clone();
        Callback::from(move |spot: Spot| selected.set(Some(spot)))
    };
    let on_close = {
        let selected = selected.clone();
        Callback::from(move |()| selected.set(None))
    };

    html! {<div id="root">
        <MapView spots={(*spots).clone()} on_spot_tap={on_spot_tap} />
        { if let Some(spot) = (*selected).clone() {
            html!{ <SpotPopup spot={spot} on_close={on_close} /> }
        } else {
            html!{}
        } }
    </div>}
}
