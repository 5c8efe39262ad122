use std::cell::RefCell;
use std::rc::Rc;
use rand::rngs::SmallRng;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, TouchEvent};
use yew::prelude::*;

use crate::canvas::{changed_ids, changed_points, CanvasSurface, IntervalScheduler};
use crate::model::ChooserConfig;
use crate::state::{Session, SessionOptions};
use crate::util::{now_ms, seeded_rng};

type WebSession = Session<CanvasSurface, IntervalScheduler, SmallRng>;
type SessionCell = Rc<RefCell<Option<WebSession>>>;

#[derive(Properties, PartialEq, Clone)]
pub struct ChooserViewProps {
    pub config: ChooserConfig,
}

#[function_component(ChooserView)]
pub fn chooser_view(props: &ChooserViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let session: SessionCell = use_mut_ref(|| None);

    // Push control changes into the session; read when the round completes.
    {
        let session = session.clone();
        use_effect_with(props.config, move |config| {
            if let Some(s) = session.borrow_mut().as_mut() {
                s.set_config(*config);
            }
            || ()
        });
    }

    {
        let canvas_ref = canvas_ref.clone();
        let session = session.clone();
        let initial_config = props.config;
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("no global `window` exists");
            let canvas: HtmlCanvasElement = canvas_ref
                .cast::<HtmlCanvasElement>()
                .expect("canvas_ref not attached to a canvas element");

            // Sized once to the viewport; later resizes are not tracked.
            let width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(800.0);
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(600.0);
            canvas.set_width(width.max(0.0) as u32);
            canvas.set_height(height.max(0.0) as u32);

            let tick_cb = {
                let weak = Rc::downgrade(&session);
                Closure::wrap(Box::new(move || {
                    let Some(cell) = weak.upgrade() else {
                        return;
                    };
                    if let Ok(mut guard) = cell.try_borrow_mut() {
                        if let Some(s) = guard.as_mut() {
                            s.tick(now_ms());
                        }
                    };
                }) as Box<dyn FnMut()>)
            };

            match CanvasSurface::new(canvas.clone(), window.device_pixel_ratio()) {
                Some(surface) => {
                    let mut s = Session::new(
                        surface,
                        IntervalScheduler::new(window.clone(), tick_cb),
                        seeded_rng(),
                        SessionOptions::default(),
                    );
                    s.set_config(initial_config);
                    *session.borrow_mut() = Some(s);
                    log::info!(
                        "chooser ready {}x{} @{}x",
                        canvas.width(),
                        canvas.height(),
                        window.device_pixel_ratio()
                    );
                }
                None => log::error!("2d canvas context unavailable; nothing will be drawn"),
            }

            let touch_start_cb = {
                let canvas_tc = canvas.clone();
                let session = session.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    e.prevent_default();
                    let points = changed_points(&e, &canvas_tc);
                    if let Some(s) = session.borrow_mut().as_mut() {
                        s.on_contact_start(&points, now_ms());
                    }
                }) as Box<dyn FnMut(_)>)
            };
            let touch_move_cb = {
                let canvas_tc = canvas.clone();
                let session = session.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    e.prevent_default();
                    let points = changed_points(&e, &canvas_tc);
                    if let Some(s) = session.borrow_mut().as_mut() {
                        s.on_contact_move(&points);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            let touch_end_cb = {
                let session = session.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    e.prevent_default();
                    let ids = changed_ids(&e);
                    if let Some(s) = session.borrow_mut().as_mut() {
                        s.on_contact_end(&ids, now_ms());
                    }
                }) as Box<dyn FnMut(_)>)
            };
            let touch_cancel_cb = {
                let session = session.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    e.prevent_default();
                    let ids = changed_ids(&e);
                    if let Some(s) = session.borrow_mut().as_mut() {
                        s.on_contact_cancel(&ids, now_ms());
                    }
                }) as Box<dyn FnMut(_)>)
            };
            let listeners: [(&str, &Closure<dyn FnMut(TouchEvent)>); 4] = [
                ("touchstart", &touch_start_cb),
                ("touchmove", &touch_move_cb),
                ("touchend", &touch_end_cb),
                ("touchcancel", &touch_cancel_cb),
            ];
            for (name, cb) in listeners {
                canvas
                    .add_event_listener_with_callback(name, cb.as_ref().unchecked_ref())
                    .ok();
            }

            // Cleanup
            move || {
                let listeners: [(&str, &Closure<dyn FnMut(TouchEvent)>); 4] = [
                    ("touchstart", &touch_start_cb),
                    ("touchmove", &touch_move_cb),
                    ("touchend", &touch_end_cb),
                    ("touchcancel", &touch_cancel_cb),
                ];
                for (name, cb) in listeners {
                    let _ = canvas
                        .remove_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
                }
                if let Some(mut s) = session.borrow_mut().take() {
                    s.shutdown();
                }
            }
        });
    }

    html! {
        <canvas ref={canvas_ref} style="display:block; position:fixed; inset:0; touch-action:none;" />
    }
}
