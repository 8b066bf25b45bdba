use crate::constants::{EXPLODING_CLASS, PARTICLE_CLASS};
use crate::dom::{self, set_style};
use particle_core::{Connector, EffectKind, EffectSpec, ParticlePaint, ParticleView, Surface};
use web_sys as web;

/// Absolutely positioned divs inside the background container.
pub struct DomSurface {
    document: web::Document,
    container: web::HtmlElement,
    particles: Vec<web::HtmlElement>,
}

impl DomSurface {
    pub fn new(document: web::Document, container: web::HtmlElement) -> Self {
        Self {
            document,
            container,
            particles: Vec::new(),
        }
    }

    fn attach(&self, el: &web::HtmlElement) {
        if let Err(e) = self.container.append_child(el) {
            log::warn!("[surface] append failed: {:?}", e);
        }
    }
}

impl Surface for DomSurface {
    type Handle = web::HtmlElement;

    fn mount_particles(&mut self, count: usize) {
        for el in self.particles.drain(..) {
            el.remove();
        }
        for _ in 0..count {
            let el = match dom::create_div(&self.document, PARTICLE_CLASS) {
                Ok(el) => el,
                Err(e) => {
                    log::error!("[surface] particle element: {:?}", e);
                    break;
                }
            };
            // desynchronise the CSS float keyframes
            let delay = js_sys::Math::random() * 6.0;
            set_style(&el, "animation-delay", &format!("{:.2}s", delay));
            self.attach(&el);
            self.particles.push(el);
        }
    }

    fn paint_particle(&mut self, index: usize, paint: &ParticlePaint) {
        let Some(el) = self.particles.get(index) else {
            return;
        };
        set_style(el, "width", &format!("{}px", paint.size));
        set_style(el, "height", &format!("{}px", paint.size));
        set_style(el, "background-color", &paint.fill.to_string());
        set_style(
            el,
            "box-shadow",
            &format!("0 0 {}px {}", paint.glow_radius, paint.glow),
        );
    }

    fn draw_particle(&mut self, index: usize, view: &ParticleView) {
        let Some(el) = self.particles.get(index) else {
            return;
        };
        let look = &view.look;
        set_style(el, "left", &format!("{:.2}px", view.x));
        set_style(el, "top", &format!("{:.2}px", view.y));
        let mut transform = format!("scale({})", look.scale);
        if view.float_offset != 0.0 {
            transform.push_str(&format!(" translateY({:.2}px)", view.float_offset));
        }
        set_style(el, "transform", &transform);
        set_style(
            el,
            "filter",
            &format!(
                "brightness({}) hue-rotate({}deg) contrast({})",
                look.brightness, look.hue_rotate_deg, look.contrast
            ),
        );
        _ = el
            .class_list()
            .toggle_with_force(EXPLODING_CLASS, look.exploding);
    }

    fn create_effect(&mut self, kind: EffectKind) -> Option<web::HtmlElement> {
        match dom::create_div(&self.document, kind.class_name()) {
            Ok(el) => Some(el),
            Err(e) => {
                log::error!("[surface] {:?} element: {:?}", kind, e);
                None
            }
        }
    }

    fn show_effect(&mut self, el: &web::HtmlElement, effect: &EffectSpec) {
        set_style(el, "left", &format!("{}px", effect.x));
        set_style(el, "top", &format!("{}px", effect.y));
        set_style(el, "animation-delay", &format!("{}s", effect.delay_s));
        if effect.rotation_deg != 0.0 {
            set_style(el, "transform", &format!("rotate({}deg)", effect.rotation_deg));
        }
        if let Some(tint) = effect.tint {
            set_style(el, "border-color", &tint.to_string());
        }
        self.attach(el);
    }

    fn show_connector(&mut self, el: &web::HtmlElement, c: &Connector) {
        set_style(el, "position", "absolute");
        set_style(el, "left", &format!("{:.2}px", c.x));
        set_style(el, "top", &format!("{:.2}px", c.y));
        set_style(el, "width", &format!("{:.2}px", c.length));
        set_style(el, "height", &format!("{}px", c.thickness));
        set_style(
            el,
            "background",
            &format!(
                "linear-gradient(90deg, {}, {})",
                c.start_color, c.end_color
            ),
        );
        set_style(el, "transform", &format!("rotate({}rad)", c.angle_rad));
        set_style(el, "transform-origin", "0 0");
        set_style(el, "pointer-events", "none");
        set_style(el, "box-shadow", &format!("0 0 8px {}", c.shadow));
        set_style(el, "border-radius", "2px");
        self.attach(el);
    }

    fn hide(&mut self, el: &web::HtmlElement) {
        el.remove();
    }

    fn clear(&mut self) {
        self.particles.clear();
        self.container.set_inner_html("");
    }
}
