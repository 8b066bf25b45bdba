use crate::constants::{RESIZE_DEBOUNCE_MS, SWIPE_SCROLL_NUDGE_PX, SWIPE_THRESHOLD_PX};
use crate::dom;
use crate::frame::{FrameLoop, TimerPump};
use crate::SharedEngine;
use glam::Vec2;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A registered DOM listener. Dropping it unregisters the callback.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn attach(
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Self {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        if let Err(e) = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        {
            log::warn!("[events] could not listen for {}: {:?}", kind, e);
        }
        Self {
            target: target.clone(),
            kind,
            closure,
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Rebuilds the field once resizing has been quiet for a while. Dropping it
/// cancels a rebuild that is still pending.
struct ResizeDebounce {
    window: web::Window,
    pending: Rc<Cell<Option<i32>>>,
    rebuild: Closure<dyn FnMut()>,
}

impl ResizeDebounce {
    fn new(w: &InputWiring) -> Self {
        let pending = Rc::new(Cell::new(None::<i32>));
        let rebuild = {
            let engine = w.engine.clone();
            let document = w.document.clone();
            let win = w.window.clone();
            let pending = pending.clone();
            Closure::wrap(Box::new(move || {
                pending.set(None);
                let mut engine = engine.borrow_mut();
                engine.resize(dom::viewport(&win));
                engine.update_particle_colors(dom::theme(&document));
            }) as Box<dyn FnMut()>)
        };
        Self {
            window: w.window.clone(),
            pending,
            rebuild,
        }
    }

    fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            self.window.clear_timeout_with_handle(id);
        }
    }

    fn schedule(&self) {
        self.cancel();
        match self.window.set_timeout_with_callback_and_timeout_and_arguments_0(
            self.rebuild.as_ref().unchecked_ref(),
            RESIZE_DEBOUNCE_MS,
        ) {
            Ok(id) => self.pending.set(Some(id)),
            Err(e) => log::warn!("[resize] setTimeout failed: {:?}", e),
        }
    }
}

impl Drop for ResizeDebounce {
    fn drop(&mut self) {
        self.cancel();
    }
}

pub struct InputWiring {
    pub window: web::Window,
    pub document: web::Document,
    pub engine: SharedEngine,
    pub frames: Rc<FrameLoop>,
    pub pump: Rc<TimerPump>,
}

fn first_touch(ev: &web::Event, changed: bool) -> Option<Vec2> {
    let ev = ev.dyn_ref::<web::TouchEvent>()?;
    let list = if changed {
        ev.changed_touches()
    } else {
        ev.touches()
    };
    let t = list.get(0)?;
    Some(Vec2::new(t.client_x() as f32, t.client_y() as f32))
}

fn mouse_pos(ev: &web::Event) -> Option<Vec2> {
    let ev = ev.dyn_ref::<web::MouseEvent>()?;
    Some(Vec2::new(ev.client_x() as f32, ev.client_y() as f32))
}

pub fn wire_input_handlers(w: &InputWiring) -> Vec<Listener> {
    let document: &web::EventTarget = w.document.as_ref();
    let window: &web::EventTarget = w.window.as_ref();
    let mut listeners = Vec::new();

    // Mouse
    {
        let engine = w.engine.clone();
        listeners.push(Listener::attach(document, "mousemove", move |ev| {
            if let Some(p) = mouse_pos(&ev) {
                engine.borrow_mut().pointer_move(p.x, p.y, dom::now_ms());
            }
        }));
    }
    {
        let engine = w.engine.clone();
        listeners.push(Listener::attach(document, "click", move |ev| {
            if let Some(p) = mouse_pos(&ev) {
                let kind = engine.borrow_mut().click(p.x, p.y, dom::now_ms());
                log::debug!("[click] ({:.0},{:.0}) -> {:?}", p.x, p.y, kind);
            }
        }));
    }

    // Touch, with the vertical swipe gesture layered on top
    let swipe_from = Rc::new(Cell::new(None::<Vec2>));
    {
        let engine = w.engine.clone();
        let swipe_from = swipe_from.clone();
        listeners.push(Listener::attach(document, "touchstart", move |ev| {
            if let Some(p) = first_touch(&ev, false) {
                swipe_from.set(Some(p));
                engine.borrow_mut().touch_start(p.x, p.y, dom::now_ms());
            }
        }));
    }
    {
        let engine = w.engine.clone();
        listeners.push(Listener::attach(document, "touchmove", move |ev| {
            if let Some(p) = first_touch(&ev, false) {
                engine.borrow_mut().touch_move(p.x, p.y, dom::now_ms());
            }
        }));
    }
    {
        let engine = w.engine.clone();
        let window = w.window.clone();
        listeners.push(Listener::attach(document, "touchend", move |ev| {
            let Some(p) = first_touch(&ev, true) else {
                return;
            };
            let now = dom::now_ms();
            let mut engine = engine.borrow_mut();
            if engine.touch_end(p.x, p.y, now) {
                return;
            }
            let Some(from) = swipe_from.take() else {
                return;
            };
            let rise = from.y - p.y;
            if rise > SWIPE_THRESHOLD_PX {
                let c = engine.viewport().center();
                engine.create_click_effect(c.x, c.y, now);
            } else if rise < -SWIPE_THRESHOLD_PX {
                let scroll_y = window.scroll_y().unwrap_or_default() as f32;
                engine.update_for_scroll(scroll_y + SWIPE_SCROLL_NUDGE_PX, now);
            }
        }));
    }

    // Scroll widens the connection reach
    {
        let engine = w.engine.clone();
        let win = w.window.clone();
        listeners.push(Listener::attach(window, "scroll", move |_| {
            let scroll_y = win.scroll_y().unwrap_or_default() as f32;
            engine.borrow_mut().update_for_scroll(scroll_y, dom::now_ms());
        }));
    }

    // Debounced rebuild on resize
    {
        let debounce = ResizeDebounce::new(w);
        listeners.push(Listener::attach(window, "resize", move |_| debounce.schedule()));
    }

    // Pause rendering in hidden tabs; timers keep running on the pump
    {
        let engine = w.engine.clone();
        let frames = w.frames.clone();
        let pump = w.pump.clone();
        let doc = w.document.clone();
        listeners.push(Listener::attach(document, "visibilitychange", move |_| {
            if doc.hidden() {
                frames.stop();
                pump.start();
                log::info!("[frame] hidden; paused");
            } else {
                pump.stop();
                engine.borrow_mut().resume(dom::now_ms());
                frames.start();
                log::info!("[frame] visible; resumed");
            }
        }));
    }

    // Page teardown
    {
        let engine = w.engine.clone();
        let frames = w.frames.clone();
        let pump = w.pump.clone();
        listeners.push(Listener::attach(window, "pagehide", move |_| {
            frames.stop();
            pump.stop();
            engine.borrow_mut().destroy();
        }));
    }
    // Restored from the back/forward cache after a teardown
    {
        let engine = w.engine.clone();
        let frames = w.frames.clone();
        let win = w.window.clone();
        let doc = w.document.clone();
        listeners.push(Listener::attach(window, "pageshow", move |_| {
            let mut eng = engine.borrow_mut();
            if !eng.particles().is_empty() {
                return;
            }
            eng.resize(dom::viewport(&win));
            eng.update_particle_colors(dom::theme(&doc));
            eng.resume(dom::now_ms());
            drop(eng);
            frames.start();
        }));
    }

    listeners
}
