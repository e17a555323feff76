//! The per-frame render loop body.

use crate::core::time::FrameClock;
use crate::renderer::surface::Surface2D;
use crate::systems::effects::{ParticleField, Rng, Shockwave};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Stopped,
}

/// Owns frame timing and runs one frame of the main surface: clear, move
/// and draw the particles, then draw and grow the shockwave. The host's
/// frame scheduler calls [`tick`](Self::tick) once per display refresh until
/// [`stop`](Self::stop).
#[derive(Debug, Clone)]
pub struct RenderDriver {
    clock: FrameClock,
    state: DriverState,
}

impl RenderDriver {
    pub fn new() -> Self {
        Self {
            clock: FrameClock::new(),
            state: DriverState::Running,
        }
    }

    /// Run one frame. Returns the clamped frame delta for timed effects, or
    /// `None` once stopped (nothing is drawn).
    pub fn tick<S: Surface2D>(
        &mut self,
        frame_dt: f32,
        field: &mut ParticleField,
        shockwave: &mut Shockwave,
        rng: &mut Rng,
        main: &mut S,
    ) -> Option<f32> {
        if self.state == DriverState::Stopped {
            return None;
        }
        let dt = self.clock.tick(frame_dt);

        // One size snapshot per frame: a resize lands before or after, never mid-frame.
        field.set_bounds(main.size());

        main.clear();
        field.advance_all(rng);
        field.draw_all(main);
        shockwave.advance_and_draw(main);

        Some(dt)
    }

    /// Stop the loop. Further ticks do nothing.
    pub fn stop(&mut self) {
        self.state = DriverState::Stopped;
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}

impl Default for RenderDriver {
    fn default() -> Self {
        Self::new()
    }
}
