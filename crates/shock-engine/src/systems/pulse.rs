//! Pulse delivery: a queue for host-fired pulses and the coordinator that
//! fans each pulse out to the effects.

use glam::Vec2;

use crate::api::types::{PulseEvent, PulseReport};
use crate::renderer::surface::Surface2D;
use crate::systems::effects::{Flash, LightningGenerator, ParticleField, Rng, Shockwave};
use crate::systems::glyphs::AnchorSource;

/// Pulses waiting for the next dispatch.
/// Hosts push from their timers; the scene drains them between frames so a
/// pulse never interleaves with a frame tick.
#[derive(Debug, Default)]
pub struct PulseQueue {
    events: Vec<PulseEvent>,
}

impl PulseQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, event: PulseEvent) {
        self.events.push(event);
    }

    /// Take all pending pulses in arrival order and clear the queue.
    pub fn drain(&mut self) -> Vec<PulseEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

/// The four things a pulse does, one call each.
pub trait PulseSink {
    fn request_flash(&mut self);
    /// Returns the number of particles kicked.
    fn kick_particles(&mut self, magnitude: f32) -> usize;
    /// Returns the number of arcs drawn.
    fn draw_lightning(&mut self, anchors: &[Vec2]) -> usize;
    fn trigger_shockwave(&mut self);
}

/// Mutable access to everything a pulse touches.
pub struct PulseTargets<'a, S: Surface2D> {
    pub flash: &'a mut Flash,
    pub field: &'a mut ParticleField,
    pub lightning: &'a mut LightningGenerator,
    pub shockwave: &'a mut Shockwave,
    pub rng: &'a mut Rng,
    /// Surface the lightning burst is drawn on.
    pub arcs: &'a mut S,
}

impl<S: Surface2D> PulseSink for PulseTargets<'_, S> {
    fn request_flash(&mut self) {
        self.flash.request();
    }

    fn kick_particles(&mut self, magnitude: f32) -> usize {
        self.field.apply_impulse(magnitude, self.rng);
        self.field.len()
    }

    fn draw_lightning(&mut self, anchors: &[Vec2]) -> usize {
        self.lightning.render(anchors, &mut *self.arcs, self.rng)
    }

    fn trigger_shockwave(&mut self) {
        self.shockwave.trigger();
    }
}

/// Fans a pulse out to the flash, the particles, the lightning and the ring.
#[derive(Debug, Clone, Copy)]
pub struct PulseCoordinator {
    impulse: f32,
}

impl PulseCoordinator {
    pub fn new(impulse: f32) -> Self {
        Self { impulse }
    }

    /// Run all four steps of a pulse, in order: request the flash, kick the
    /// particles, draw a lightning burst between freshly read glyph anchors,
    /// restart the shockwave. Returns once all four are done; the fade and
    /// the ring carry on in later frames.
    pub fn dispatch<A, T>(&self, event: PulseEvent, targets: &mut T, anchors: &A) -> PulseReport
    where
        A: AnchorSource + ?Sized,
        T: PulseSink + ?Sized,
    {
        targets.request_flash();
        let particles = targets.kick_particles(self.impulse);

        // Layout may have moved since the last pulse.
        let points = anchors.glyph_anchors();
        let arcs = targets.draw_lightning(&points);

        targets.trigger_shockwave();

        PulseReport {
            source: event.source,
            arcs,
            particles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::{FlashConfig, LightningConfig, ParticleConfig, ShockwaveConfig};
    use crate::api::types::PulseSource;
    use crate::renderer::recording::RecordingSurface;
    use crate::renderer::surface::SurfaceSize;
    use std::cell::Cell;

    #[test]
    fn queue_push_and_drain() {
        let mut q = PulseQueue::new();
        q.push(PulseEvent::new(PulseSource::Reveal));
        q.push(PulseEvent::manual());
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events[0].source, PulseSource::Reveal);
        assert_eq!(events[1].source, PulseSource::Manual);
        assert!(q.is_empty());
    }

    /// Counts how often anchors are read, to prove they are not cached.
    struct CountingAnchors {
        reads: Cell<u32>,
    }

    impl AnchorSource for CountingAnchors {
        fn glyph_anchors(&self) -> Vec<Vec2> {
            self.reads.set(self.reads.get() + 1);
            let x = self.reads.get() as f32 * 10.0;
            vec![Vec2::new(x, 10.0), Vec2::new(x + 50.0, 10.0)]
        }
    }

    #[test]
    fn dispatch_runs_every_step() {
        let mut rng = Rng::new(5);
        let mut flash = Flash::new(&FlashConfig::default());
        let config = ParticleConfig { count: 40, ..ParticleConfig::default() };
        let mut field = ParticleField::new(SurfaceSize::new(200.0, 200.0), config, &mut rng);
        let mut lightning = LightningGenerator::new(LightningConfig { probability: 1.0, ..LightningConfig::default() });
        let mut shockwave = Shockwave::new(ShockwaveConfig::default());
        let mut arcs = RecordingSurface::new(200.0, 200.0);
        let anchors = CountingAnchors { reads: Cell::new(0) };
        let velocities: Vec<Vec2> = field.iter().map(|p| p.vel).collect();

        let coordinator = PulseCoordinator::new(3.5);
        for n in 1..=2 {
            let mut targets = PulseTargets {
                flash: &mut flash,
                field: &mut field,
                lightning: &mut lightning,
                shockwave: &mut shockwave,
                rng: &mut rng,
                arcs: &mut arcs,
            };
            let report = coordinator.dispatch(PulseEvent::new(PulseSource::Jitter(n)), &mut targets, &anchors);
            assert_eq!(report.arcs, 1);
            assert_eq!(report.particles, 40);
            assert_eq!(report.source, PulseSource::Jitter(n));
        }

        assert!(flash.is_active());
        assert!(shockwave.is_active());
        assert!(lightning.is_fading());
        assert_eq!(anchors.reads.get(), 2);
        assert!(field.iter().zip(velocities).any(|(p, v)| p.vel != v));
        // The second burst started at the moved anchor.
        assert_eq!(arcs.polylines().next().unwrap()[0], Vec2::new(20.0, 10.0));
    }

    /// Records each step, and whether the anchors had been read by then.
    struct StepLog<'a> {
        steps: Vec<&'static str>,
        anchors: &'a CountingAnchors,
        reads_at_lightning: u32,
    }

    impl PulseSink for StepLog<'_> {
        fn request_flash(&mut self) {
            self.steps.push("flash");
        }

        fn kick_particles(&mut self, _magnitude: f32) -> usize {
            self.steps.push("impulse");
            0
        }

        fn draw_lightning(&mut self, anchors: &[Vec2]) -> usize {
            self.steps.push("lightning");
            self.reads_at_lightning = self.anchors.reads.get();
            anchors.len() - 1
        }

        fn trigger_shockwave(&mut self) {
            self.steps.push("shockwave");
        }
    }

    #[test]
    fn dispatch_runs_steps_in_order() {
        let anchors = CountingAnchors { reads: Cell::new(0) };
        let mut log = StepLog { steps: Vec::new(), anchors: &anchors, reads_at_lightning: 0 };

        let report = PulseCoordinator::new(3.5).dispatch(PulseEvent::manual(), &mut log, &anchors);

        assert_eq!(log.steps, vec!["flash", "impulse", "lightning", "shockwave"]);
        // Anchors are read once, fresh, just before the burst.
        assert_eq!(log.reads_at_lightning, 1);
        assert_eq!(anchors.reads.get(), 1);
        assert_eq!(report.arcs, 1);
        assert_eq!(report.source, PulseSource::Manual);
    }
}
