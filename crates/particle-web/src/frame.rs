use crate::constants::TIMER_PUMP_MS;
use crate::dom;
use crate::SharedEngine;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// requestAnimationFrame loop driving `ParticleEngine::frame`.
pub struct FrameLoop {
    engine: SharedEngine,
    raf_id: Cell<Option<i32>>,
    tick: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl FrameLoop {
    pub fn new(engine: SharedEngine) -> Rc<Self> {
        let this = Rc::new(Self {
            engine,
            raf_id: Cell::new(None),
            tick: RefCell::new(None),
        });
        let weak: Weak<Self> = Rc::downgrade(&this);
        let closure = Closure::wrap(Box::new(move |ts: f64| {
            let Some(this) = weak.upgrade() else {
                return;
            };
            this.raf_id.set(None);
            this.engine.borrow_mut().frame(ts);
            this.request();
        }) as Box<dyn FnMut(f64)>);
        *this.tick.borrow_mut() = Some(closure);
        this
    }

    pub fn running(&self) -> bool {
        self.raf_id.get().is_some()
    }

    pub fn start(&self) {
        if !self.running() {
            self.request();
        }
    }

    pub fn stop(&self) {
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
    }

    fn request(&self) {
        let Some(w) = web::window() else {
            return;
        };
        let tick = self.tick.borrow();
        let Some(cb) = tick.as_ref() else {
            return;
        };
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => self.raf_id.set(Some(id)),
            Err(e) => log::error!("[frame] requestAnimationFrame failed: {:?}", e),
        }
    }
}

/// Fires due timers on a slow interval while the frame loop is paused, so
/// pending explosions and expiries still complete in a hidden tab.
pub struct TimerPump {
    interval_id: Cell<Option<i32>>,
    pump: Closure<dyn FnMut()>,
}

impl TimerPump {
    pub fn new(engine: SharedEngine) -> Rc<Self> {
        let pump = Closure::wrap(Box::new(move || {
            engine.borrow_mut().run_due_timers(dom::now_ms());
        }) as Box<dyn FnMut()>);
        Rc::new(Self {
            interval_id: Cell::new(None),
            pump,
        })
    }

    pub fn start(&self) {
        if self.interval_id.get().is_some() {
            return;
        }
        let Some(w) = web::window() else {
            return;
        };
        match w.set_interval_with_callback_and_timeout_and_arguments_0(
            self.pump.as_ref().unchecked_ref(),
            TIMER_PUMP_MS,
        ) {
            Ok(id) => self.interval_id.set(Some(id)),
            Err(e) => log::error!("[frame] setInterval failed: {:?}", e),
        }
    }

    pub fn stop(&self) {
        if let (Some(id), Some(w)) = (self.interval_id.take(), web::window()) {
            w.clear_interval_with_handle(id);
        }
    }
}
