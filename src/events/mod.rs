mod pointer;

pub use pointer::{wire_input_handlers, InputWiring};

use crate::dom;
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use wormhole_core::Scene;

/// Leaving the page ends the session: stale timers are dropped and the
/// camera goes back to its start.
pub fn wire_teardown(scene: Rc<RefCell<Scene>>) {
    dom::add_window_listener("pagehide", move || {
        log::info!("[scene] page hidden; tearing down");
        scene.borrow_mut().teardown();
        if let Some(document) = dom::window_document() {
            overlay::hide(&document);
        }
    });
}
