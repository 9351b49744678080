use crate::dom;
use crate::overlay;
use crate::render::CanvasRenderer;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;
use wormhole_core::{JourneyEvent, Scene};

pub struct FrameContext {
    pub scene: Rc<RefCell<Scene>>,
    pub renderer: CanvasRenderer,
    pub canvas: web::HtmlCanvasElement,
    pub ctx: web::CanvasRenderingContext2d,
    pub document: web::Document,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        let mut scene = self.scene.borrow_mut();
        scene.set_aspect(dom::canvas_aspect(&self.canvas));
        let events = scene.tick(dt);
        if events.contains(&JourneyEvent::OverlayRevealed) {
            overlay::reveal(&self.document);
        }

        let mut sink = self.renderer.sink(
            &self.ctx,
            self.canvas.width() as f32,
            self.canvas.height() as f32,
        );
        scene.render(&mut sink);
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
