mod canvas;
mod components;
mod model;
mod render;
mod selection;
mod state;
mod util;

use components::app::App;

fn main() {
    util::init_logging(log::LevelFilter::Info);
    yew::Renderer::<App>::new().render();
}
