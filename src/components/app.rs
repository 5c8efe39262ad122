use super::{chooser_view::ChooserView, controls_panel::ControlsPanel};
use crate::model::ChooserConfig;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_state(ChooserConfig::default);

    let on_change = {
        let config = config.clone();
        Callback::from(move |next: ChooserConfig| {
            if *config != next {
                log::debug!("config {:?} -> {:?}", *config, next);
                config.set(next);
            }
        })
    };

    html! {
        <div id="root">
            <ChooserView config={*config} />
            <ControlsPanel config={*config} on_change={on_change} />
        </div>
    }
}
