use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::model::{parse_count, ChooserConfig, Mode};

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub config: ChooserConfig,
    pub on_change: Callback<ChooserConfig>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let count_cb = {
        let cb = props.on_change.clone();
        let config = props.config;
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            match parse_count(&input.value()) {
                Ok(count) => cb.emit(ChooserConfig { count, ..config }),
                Err(err) => {
                    log::warn!("{}; keeping {}", err, config.count);
                    input.set_value(&config.count.to_string());
                }
            }
        })
    };
    let mode_cb = {
        let cb = props.on_change.clone();
        let config = props.config;
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            match select.value().parse::<Mode>() {
                Ok(mode) => cb.emit(ChooserConfig { mode, ..config }),
                Err(err) => log::warn!("{}", err),
            }
        })
    };
    let modes = [Mode::Fingers, Mode::Groups];
    html! {<div style="position:absolute; top:12px; right:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; display:flex; gap:6px; z-index:10;">
        <input type="number" min="1" value={props.config.count.to_string()} onchange={count_cb} style="width:56px;" />
        <select onchange={mode_cb}>
            { for modes.iter().map(|m| html!{ <option value={m.label()} selected={*m == props.config.mode}>{ m.label() }</option> }) }
        </select>
    </div>}
}
