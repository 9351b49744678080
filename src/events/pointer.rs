use crate::dom;
use crate::input;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;
use wormhole_core::{PointerEvent, Ray, Scene};

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<Scene>>,
    pub drag_state: Rc<RefCell<input::DragState>>,
    pub hovered: Rc<Cell<bool>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
    wire_contextmenu(&w);
}

/// Pointer position in CSS px relative to the canvas, and the canvas CSS size.
fn canvas_css(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> (f32, f32, f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    (
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let (x, y, width, height) = canvas_css(&ev, &w.canvas);
        let (delta, mode) = {
            let mut drag = w.drag_state.borrow_mut();
            (drag.update(x, y), drag.mode)
        };
        let [dx, dy] = input::drag_fraction(delta, height);
        let mut scene = w.scene.borrow_mut();
        if dx != 0.0 || dy != 0.0 {
            match mode {
                input::DragMode::Rotate => scene.orbit_rotate(dx, dy),
                input::DragMode::Pan => scene.orbit_pan(dx, dy),
            }
        }

        let Some(ndc) = input::css_to_ndc(x, y, width, height) else {
            return;
        };
        let ray = Ray::from_ndc(scene.camera().view_proj(), ndc.x, ndc.y);
        let hit = scene.pick_entry(&ray);
        if let Some(event) = input::hover_transition(w.hovered.get(), hit) {
            w.hovered.set(hit);
            scene.handle_pointer(event);
            dom::set_cursor(&w.canvas, if hit { "pointer" } else { "default" });
        }
    }) as Box<dyn FnMut(_)>);

    _ = w
        .canvas
        .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let (x, y, _, _) = canvas_css(&ev, &w.canvas);
        let modifier = ev.ctrl_key() || ev.meta_key() || ev.shift_key();
        let mode = input::drag_mode(ev.button(), modifier);
        w.drag_state.borrow_mut().begin_with(x, y, mode);
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
    }) as Box<dyn FnMut(_)>);

    _ = w
        .canvas
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        _ = w.canvas.release_pointer_capture(ev.pointer_id());
        if !w.drag_state.borrow_mut().end() {
            return;
        }
        // Touch and pen taps arrive without a preceding move.
        let (x, y, width, height) = canvas_css(&ev, &w.canvas);
        let mut scene = w.scene.borrow_mut();
        let hit = input::css_to_ndc(x, y, width, height)
            .map(|ndc| {
                let ray = Ray::from_ndc(scene.camera().view_proj(), ndc.x, ndc.y);
                scene.pick_entry(&ray)
            })
            .unwrap_or(false);
        if hit {
            log::info!("[pointer] click on entry object");
            scene.handle_pointer(PointerEvent::Click);
            w.hovered.set(false);
            dom::set_cursor(&w.canvas, "default");
        }
    }) as Box<dyn FnMut(_)>);

    _ = w
        .canvas
        .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        ev.prevent_default();
        let steps = input::wheel_steps(ev.delta_y(), ev.delta_mode());
        w.scene.borrow_mut().orbit_zoom(steps);
    }) as Box<dyn FnMut(_)>);

    _ = w
        .canvas
        .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Secondary-button drags pan; keep the browser menu out of the way.
fn wire_contextmenu(w: &InputWiring) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);

    _ = w
        .canvas
        .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
    closure.forget();
}
