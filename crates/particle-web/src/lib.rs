#![cfg(target_arch = "wasm32")]
//! Browser front-end: mounts a [`ParticleEngine`] into a DOM container and
//! feeds it animation frames, pointer/touch input, scroll, resize and
//! visibility changes.

mod constants;
mod dom;
mod events;
mod frame;
mod surface;

use crate::events::{wire_input_handlers, InputWiring, Listener};
use crate::frame::{FrameLoop, TimerPump};
use crate::surface::DomSurface;
use particle_core::{FieldConfig, ParticleEngine};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

pub(crate) type SharedEngine = Rc<RefCell<ParticleEngine<DomSurface>>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("particle-web starting");
    Ok(())
}

/// One mounted particle background. Page scripts hold on to it to forward
/// theme and scroll changes, and call `destroy` to tear it down.
#[wasm_bindgen]
pub struct ParticleBackground {
    engine: SharedEngine,
    document: web::Document,
    frames: Rc<FrameLoop>,
    pump: Rc<TimerPump>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Mount into `#particles-container`, or the element with `container_id`.
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: Option<String>) -> Result<ParticleBackground, JsValue> {
        mount(container_id.as_deref().unwrap_or(constants::CONTAINER_ID))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Re-read the page theme and repaint every particle.
    #[wasm_bindgen(js_name = updateParticleColors)]
    pub fn update_particle_colors(&self) {
        self.engine
            .borrow_mut()
            .update_particle_colors(dom::theme(&self.document));
    }

    #[wasm_bindgen(js_name = updateForScroll)]
    pub fn update_for_scroll(&self, scroll_y: f32) {
        self.engine
            .borrow_mut()
            .update_for_scroll(scroll_y, dom::now_ms());
    }

    #[wasm_bindgen(js_name = createClickEffect)]
    pub fn create_click_effect(&self, x: f32, y: f32) {
        self.engine
            .borrow_mut()
            .create_click_effect(x, y, dom::now_ms());
    }

    pub fn destroy(&mut self) {
        self.listeners.clear();
        self.frames.stop();
        self.pump.stop();
        self.engine.borrow_mut().destroy();
        log::info!("[field] destroyed");
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.frames.stop();
        self.pump.stop();
    }
}

fn mount(container_id: &str) -> anyhow::Result<ParticleBackground> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let container = dom::container(&document, container_id)?;

    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let surface = DomSurface::new(document.clone(), container);
    let mut engine = ParticleEngine::new(surface, FieldConfig::default(), seed)?;
    engine.initialize(dom::viewport(&window), dom::theme(&document));
    let engine: SharedEngine = Rc::new(RefCell::new(engine));

    let frames = FrameLoop::new(engine.clone());
    let pump = TimerPump::new(engine.clone());
    let listeners = wire_input_handlers(&InputWiring {
        window,
        document: document.clone(),
        engine: engine.clone(),
        frames: frames.clone(),
        pump: pump.clone(),
    });
    if document.hidden() {
        pump.start();
    } else {
        frames.start();
    }

    Ok(ParticleBackground {
        engine,
        document,
        frames,
        pump,
        listeners,
    })
}
