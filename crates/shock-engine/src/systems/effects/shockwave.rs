//! Expanding shockwave ring.

use crate::api::config::ShockwaveConfig;
use crate::renderer::surface::{Glow, StrokeStyle, Surface2D};

/// Ring state. An idle ring keeps the radius it stopped at (past the
/// maximum once it has run); only `trigger` resets it to 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShockwaveState {
    Idle { radius: f32 },
    Expanding { radius: f32 },
}

/// A single ring centred on the surface. Triggering while it is already
/// expanding restarts it; rings never stack.
#[derive(Debug, Clone)]
pub struct Shockwave {
    config: ShockwaveConfig,
    state: ShockwaveState,
}

impl Shockwave {
    pub fn new(config: ShockwaveConfig) -> Self {
        Shockwave {
            config,
            state: ShockwaveState::Idle { radius: 0.0 },
        }
    }

    /// Start (or restart) the ring at radius 0.
    pub fn trigger(&mut self) {
        self.state = ShockwaveState::Expanding { radius: 0.0 };
    }

    /// Draw the ring at its current radius, then grow it by one step.
    /// Goes idle once the radius exceeds the maximum. No-op while idle.
    pub fn advance_and_draw<S: Surface2D>(&mut self, surface: &mut S) {
        let ShockwaveState::Expanding { radius } = self.state else {
            return;
        };

        let fade = 1.0 - radius / self.config.max_radius;
        let style = StrokeStyle {
            color: self.config.color.with_alpha(fade),
            line_width: self.config.line_width,
            glow: Some(Glow {
                blur: self.config.glow_blur,
                color: self.config.glow_color,
            }),
        };
        let center = surface.size().center();
        surface.stroke_circle(center, radius, &style);

        let next = radius + self.config.step;
        self.state = if next > self.config.max_radius {
            ShockwaveState::Idle { radius: next }
        } else {
            ShockwaveState::Expanding { radius: next }
        };
    }

    pub fn state(&self) -> ShockwaveState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, ShockwaveState::Expanding { .. })
    }

    /// Current radius. After the ring finishes this stays above the
    /// maximum until the next trigger.
    pub fn radius(&self) -> f32 {
        match self.state {
            ShockwaveState::Idle { radius } | ShockwaveState::Expanding { radius } => radius,
        }
    }
}
