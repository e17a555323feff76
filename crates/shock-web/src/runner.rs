use std::cell::Cell;
use std::rc::Rc;

use shock_engine::{
    PulseEvent, Rng, ShockConfig, ShockScene, ShockTimeline, Surface2D, MAX_FRAME_DT,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::canvas::CanvasSurface;
use crate::dom::{DomGlyphs, FlashOverlay};

/// Where the effect finds its elements on the page.
#[derive(Debug, Clone)]
pub struct PageElements {
    /// Element whose text is split into animated letters.
    pub text_id: String,
    /// Canvas redrawn every frame (particles, shockwave).
    pub particles_canvas_id: String,
    /// Canvas holding lightning bursts.
    pub arcs_canvas_id: String,
    /// CSS selector of the full-screen flash overlay. Optional on the page.
    pub flash_selector: String,
}

impl Default for PageElements {
    fn default() -> Self {
        Self {
            text_id: "text".to_string(),
            particles_canvas_id: "particles".to_string(),
            arcs_canvas_id: "arcs".to_string(),
            flash_selector: ".flash".to_string(),
        }
    }
}

/// A page hosting the effect. Hosts override what differs from the defaults.
pub trait Page {
    fn config(&self) -> ShockConfig {
        ShockConfig::default()
    }

    fn elements(&self) -> PageElements {
        PageElements::default()
    }
}

/// Wires a [`ShockScene`] and a [`ShockTimeline`] to the browser.
///
/// The page exports free functions via [`export_page!`](crate::export_page)
/// that drive a `thread_local!` runner, because wasm-bindgen cannot export
/// the frame loop's closure state directly.
pub struct ShockRunner {
    scene: ShockScene,
    timeline: ShockTimeline,
    main: CanvasSurface,
    arcs: CanvasSurface,
    glyphs: DomGlyphs,
    flash: Option<FlashOverlay>,
    window: Window,
    /// Viewport size reported by the last resize event, applied at the
    /// start of the next frame.
    pending_resize: Rc<Cell<Option<(f32, f32)>>>,
    on_resize: Closure<dyn FnMut()>,
    last_frame_ms: Option<f64>,
}

impl ShockRunner {
    pub fn attach(config: ShockConfig, elements: &PageElements) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let mut main = CanvasSurface::from_id(&document, &elements.particles_canvas_id)?;
        let mut arcs = CanvasSurface::from_id(&document, &elements.arcs_canvas_id)?;
        let (width, height) = viewport_size(&window)?;
        main.resize(width, height);
        arcs.resize(width, height);

        let glyphs = DomGlyphs::split(&document, &elements.text_id)?;
        let flash = FlashOverlay::find(&document, &elements.flash_selector)?;

        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64
            ^ ((js_sys::Date::now() as u64) << 20);
        let mut timeline_rng = Rng::new(seed.rotate_left(17));
        let timeline = ShockTimeline::new(config.timeline.clone(), glyphs.len(), &mut timeline_rng);
        let scene = ShockScene::new(config, main.size(), seed)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;

        let pending_resize = Rc::new(Cell::new(None));
        let on_resize = {
            let pending = pending_resize.clone();
            let window = window.clone();
            Closure::wrap(Box::new(move || match viewport_size(&window) {
                Ok(size) => pending.set(Some(size)),
                Err(err) => log::warn!("could not read viewport size: {:?}", err),
            }) as Box<dyn FnMut()>)
        };
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

        log::info!("attached to #{} with {} letters", elements.text_id, glyphs.len());
        Ok(Self {
            scene,
            timeline,
            main,
            arcs,
            glyphs,
            flash,
            window,
            pending_resize,
            on_resize,
            last_frame_ms: None,
        })
    }

    /// One animation frame at `now_ms` (the rAF timestamp).
    /// Returns whether the loop should continue.
    pub fn frame(&mut self, now_ms: f64) -> Result<bool, JsValue> {
        if !self.scene.is_running() {
            return Ok(false);
        }
        let frame_dt = match self.last_frame_ms {
            Some(prev) => ((now_ms - prev) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);

        if let Some((width, height)) = self.pending_resize.take() {
            self.scene.resize(width, height, &mut self.main, &mut self.arcs);
        }

        // Letters move first so pulses read this frame's positions.
        let pulses = self.timeline.advance(frame_dt.clamp(0.0, MAX_FRAME_DT));
        self.glyphs.apply(self.timeline.poses(), self.timeline.glow())?;
        for pulse in pulses {
            self.scene.queue_pulse(pulse);
        }
        self.scene.dispatch_pending(&self.glyphs, &mut self.arcs);

        let running = self.scene.tick(frame_dt, &mut self.main, &mut self.arcs);
        if let Some(flash) = &self.flash {
            flash.set_opacity(self.scene.flash_opacity())?;
        }

        self.main.take_fault()?;
        self.arcs.take_fault()?;
        Ok(running)
    }

    /// Queue a manual pulse for the next frame.
    pub fn pulse(&mut self) {
        self.scene.queue_pulse(PulseEvent::manual());
    }

    pub fn stop(&mut self) {
        self.scene.stop();
    }

    pub fn frames(&self) -> u64 {
        self.scene.frames()
    }
}

impl Drop for ShockRunner {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
    }
}

fn viewport_size(window: &Window) -> Result<(f32, f32), JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((width as f32, height as f32))
}
