use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use super::{
    controls_panel::ControlsPanel, game_over_overlay::GameOverOverlay, tower_panel::TowerPanel,
};
use crate::model::{RunAction, RunState};
use crate::render::render_frame;

#[derive(Properties, PartialEq, Clone)]
pub struct RunViewProps {
    pub run_state: UseReducerHandle<RunState>,
}

#[function_component(RunView)]
pub fn run_view(props: &RunViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let run_state_ref = use_mut_ref(|| props.run_state.clone());

    // Effect: keep the loop's handle on the latest state
    {
        let run_state_ref = run_state_ref.clone();
        let current_handle = props.run_state.clone();
        use_effect_with(props.run_state.version, move |_| {
            *run_state_ref.borrow_mut() = current_handle;
            || ()
        });
    }
    // Main mount effect (frame loop, clock)
    {
        let canvas_ref = canvas_ref.clone();
        let run_state_ref = run_state_ref.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let canvas: HtmlCanvasElement = canvas_ref.cast::<HtmlCanvasElement>().expect("canvas");
            let ctx = canvas
                .get_context("2d")
                .ok()
                .flatten()
                .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok());
            if ctx.is_none() {
                log::error!("2d canvas context unavailable; nothing will be drawn");
            }
            let draw: Rc<dyn Fn()> = {
                let run_state_ref = run_state_ref.clone();
                Rc::new(move || {
                    let Some(ctx) = &ctx else { return };
                    let handle = run_state_ref.borrow();
                    render_frame(&handle.game, &mut ctx.clone());
                })
            };
            draw();
            // RAF loop: one simulation tick and one redraw per display frame
            let raf_id = Rc::new(Cell::new(None::<i32>));
            let frame_cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
            {
                let raf_id_loop = raf_id.clone();
                let frame_cell_loop = frame_cell.clone();
                let window_loop = window.clone();
                let run_state_ref = run_state_ref.clone();
                let draw = draw.clone();
                *frame_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                    let handle = run_state_ref.borrow().clone();
                    handle.dispatch(RunAction::SimTick { now_ms: js_sys::Date::now() });
                    draw();
                    if let Some(cb) = frame_cell_loop.borrow().as_ref() {
                        if let Ok(id) = window_loop.request_animation_frame(cb.as_ref().unchecked_ref()) {
                            raf_id_loop.set(Some(id));
                        }
                    }
                }) as Box<dyn FnMut()>));
            }
            if let Some(cb) = frame_cell.borrow().as_ref() {
                if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    raf_id.set(Some(id));
                }
            }
            // Seconds interval
            let second_tick = {
                let run_state_ref = run_state_ref.clone();
                Closure::wrap(Box::new(move || {
                    let handle = run_state_ref.borrow().clone();
                    handle.dispatch(RunAction::TickSecond);
                }) as Box<dyn FnMut()>)
            };
            let second_tick_id = window
                .set_interval_with_callback_and_timeout_and_arguments_0(
                    second_tick.as_ref().unchecked_ref(),
                    1000,
                )
                .ok();
            move || {
                if let Some(id) = raf_id.get() {
                    let _ = window.cancel_animation_frame(id);
                }
                if let Some(id) = second_tick_id {
                    window.clear_interval_with_handle(id);
                }
                // breaks the closure's reference to itself
                frame_cell.borrow_mut().take();
                drop(second_tick);
            }
        });
    }

    let onmousemove = {
        let run_state = props.run_state.clone();
        Callback::from(move |e: MouseEvent| {
            run_state.dispatch(RunAction::PointerMove { x: e.offset_x() as f64, y: e.offset_y() as f64 });
        })
    };
    let onclick = {
        let run_state = props.run_state.clone();
        Callback::from(move |e: MouseEvent| {
            run_state.dispatch(RunAction::Click { x: e.offset_x() as f64, y: e.offset_y() as f64 });
        })
    };
    let start_cb: Callback<()> = {
        let run_state = props.run_state.clone();
        Callback::from(move |()| run_state.dispatch(RunAction::StartRun { now_ms: js_sys::Date::now() }))
    };

    let rs = &*props.run_state;
    let canvas_cfg = &rs.game.config.canvas;
    let hovered = rs.game.towers.iter().find(|t| t.hovered).cloned();
    let show_loss = !rs.game.started && rs.last_loss.is_some();

    html! {<div style="position:relative; display:inline-block;">
        <canvas ref={canvas_ref.clone()} id="gameCanvas"
            width={canvas_cfg.width.to_string()} height={canvas_cfg.height.to_string()}
            style="display:block;" {onmousemove} {onclick}></canvas>
        <ControlsPanel started={rs.game.started} tower_cost={rs.game.economy.tower_cost} on_start={start_cb} />
        <TowerPanel tower={hovered} max_level={rs.game.config.tower.max_level} money={rs.game.economy.money} />
        <GameOverOverlay show={show_loss} last_loss={rs.last_loss} />
    </div> }
}
