use crate::api::config::ShockConfig;
use crate::api::error::ShockResult;
use crate::api::types::{PulseEvent, PulseReport};
use crate::renderer::surface::{Surface2D, SurfaceSize};
use crate::systems::driver::RenderDriver;
use crate::systems::effects::{Flash, LightningGenerator, ParticleField, Rng, Shockwave};
use crate::systems::glyphs::AnchorSource;
use crate::systems::pulse::{PulseCoordinator, PulseQueue, PulseTargets};

/// Composition root: owns every piece of effect state.
///
/// Two surfaces are involved. The main surface is cleared and redrawn every
/// frame (particles, shockwave); the arc surface only changes when a pulse
/// draws a burst and while that burst fades. Hosts keep both sized to the
/// same viewport, usually through [`resize`](Self::resize).
pub struct ShockScene {
    config: ShockConfig,
    field: ParticleField,
    shockwave: Shockwave,
    lightning: LightningGenerator,
    flash: Flash,
    rng: Rng,
    driver: RenderDriver,
    coordinator: PulseCoordinator,
    pending: PulseQueue,
}

impl ShockScene {
    /// Validate `config` and build a scene whose particles cover `bounds`.
    pub fn new(config: ShockConfig, bounds: SurfaceSize, seed: u64) -> ShockResult<Self> {
        config.validate()?;

        let mut rng = Rng::new(seed);
        let field = ParticleField::new(bounds, config.particles.clone(), &mut rng);
        log::info!(
            "shock scene ready: {} particles on {}x{}",
            field.len(),
            bounds.width(),
            bounds.height()
        );

        Ok(Self {
            shockwave: Shockwave::new(config.shockwave.clone()),
            lightning: LightningGenerator::new(config.lightning.clone()),
            flash: Flash::new(&config.flash),
            coordinator: PulseCoordinator::new(config.impulse),
            driver: RenderDriver::new(),
            pending: PulseQueue::new(),
            field,
            rng,
            config,
        })
    }

    /// Resize both surfaces to the viewport together.
    pub fn resize<M: Surface2D, A: Surface2D>(&mut self, width: f32, height: f32, main: &mut M, arcs: &mut A) {
        main.resize(width, height);
        arcs.resize(width, height);
        self.field.set_bounds(main.size());
        log::info!("shock scene resized to {}x{}", main.size().width(), main.size().height());
    }

    /// Run a pulse now. Ignored (returns `None`) once the scene is stopped.
    pub fn pulse<A, S>(&mut self, event: PulseEvent, anchors: &A, arcs: &mut S) -> Option<PulseReport>
    where
        A: AnchorSource + ?Sized,
        S: Surface2D,
    {
        if !self.driver.is_running() {
            return None;
        }
        let mut targets = PulseTargets {
            flash: &mut self.flash,
            field: &mut self.field,
            lightning: &mut self.lightning,
            shockwave: &mut self.shockwave,
            rng: &mut self.rng,
            arcs,
        };
        let report = self.coordinator.dispatch(event, &mut targets, anchors);
        log::debug!("pulse {:?}: {} arcs", report.source, report.arcs);
        Some(report)
    }

    /// Queue a pulse for the next [`dispatch_pending`](Self::dispatch_pending).
    pub fn queue_pulse(&mut self, event: PulseEvent) {
        self.pending.push(event);
    }

    /// Run every queued pulse, in arrival order, each to completion.
    pub fn dispatch_pending<A, S>(&mut self, anchors: &A, arcs: &mut S) -> Vec<PulseReport>
    where
        A: AnchorSource + ?Sized,
        S: Surface2D,
    {
        self.pending
            .drain()
            .into_iter()
            .filter_map(|event| self.pulse(event, anchors, arcs))
            .collect()
    }

    /// One display frame: redraw the main surface, then advance the arc fade
    /// and the flash by the frame delta. Returns false once stopped.
    pub fn tick<M: Surface2D, A: Surface2D>(&mut self, frame_dt: f32, main: &mut M, arcs: &mut A) -> bool {
        let Some(dt) = self
            .driver
            .tick(frame_dt, &mut self.field, &mut self.shockwave, &mut self.rng, main)
        else {
            return false;
        };
        self.lightning.advance_fade(dt, arcs);
        self.flash.advance(dt);
        true
    }

    /// Stop the frame loop. Pending pulses are dropped.
    pub fn stop(&mut self) {
        if self.driver.is_running() {
            self.driver.stop();
            self.pending.drain();
            log::info!("shock scene stopped after {} frames", self.driver.clock().frames());
        }
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }

    pub fn frames(&self) -> u64 {
        self.driver.clock().frames()
    }

    /// Opacity the host should give its flash overlay this frame.
    pub fn flash_opacity(&self) -> f32 {
        self.flash.opacity()
    }

    pub fn config(&self) -> &ShockConfig {
        &self.config
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn shockwave(&self) -> &Shockwave {
        &self.shockwave
    }

    pub fn lightning(&self) -> &LightningGenerator {
        &self.lightning
    }
}
