//! Lightning arcs between glyph anchors.
//!
//! Arcs are drawn once per burst onto their own surface and never redrawn.
//! Afterwards only the surface opacity changes: it fades to transparent,
//! then the surface is cleared and made opaque again for the next burst.

use glam::Vec2;

use super::rng::Rng;
use crate::api::config::LightningConfig;
use crate::extensions::easing::{lerp_vec2, Easing};
use crate::extensions::tween::Tween;
use crate::renderer::surface::{Glow, StrokeStyle, Surface2D};

/// A jagged polyline from `start` to `end`.
#[derive(Debug, Clone)]
pub struct LightningArc {
    pub start: Vec2,
    pub end: Vec2,
    /// `segments + 1` points. The first and last are exactly `start` and `end`.
    pub points: Vec<Vec2>,
}

impl LightningArc {
    /// Interpolate `segments` equal steps from `start` to `end` and push every
    /// interior point by an independent offset in `[-jitter, jitter]` per axis.
    pub fn new(start: Vec2, end: Vec2, segments: usize, jitter: f32, rng: &mut Rng) -> Self {
        let segments = segments.max(1);
        let mut points = Vec::with_capacity(segments + 1);
        points.push(start);
        for i in 1..segments {
            let t = i as f32 / segments as f32;
            let offset = Vec2::new(rng.symmetric(jitter), rng.symmetric(jitter));
            points.push(lerp_vec2(start, end, t) + offset);
        }
        points.push(end);
        LightningArc { start, end, points }
    }
}

/// Draws bursts of arcs and runs the arc layer's fade-out.
#[derive(Debug, Clone)]
pub struct LightningGenerator {
    config: LightningConfig,
    fade: Option<Tween>,
}

impl LightningGenerator {
    pub fn new(config: LightningConfig) -> Self {
        LightningGenerator { config, fade: None }
    }

    fn style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.config.color,
            line_width: self.config.line_width,
            glow: Some(Glow {
                blur: self.config.glow_blur,
                color: self.config.glow_color,
            }),
        }
    }

    /// Clear the arc surface and draw a new burst. Pair `i` joins anchor `i`
    /// to anchor `i + 1` and is drawn with the configured probability; pairs
    /// past the end of `anchors` are skipped. Starts the fade-out and returns
    /// the number of arcs drawn, which may be zero.
    pub fn render<S: Surface2D>(&mut self, anchors: &[Vec2], surface: &mut S, rng: &mut Rng) -> usize {
        surface.clear();
        surface.set_opacity(1.0);

        let style = self.style();
        let mut drawn = 0;
        for i in 0..self.config.pairs {
            let (Some(&a), Some(&b)) = (anchors.get(i), anchors.get(i + 1)) else {
                break;
            };
            if !rng.chance(self.config.probability) {
                continue;
            }
            let arc = LightningArc::new(a, b, self.config.segments, self.config.jitter, rng);
            surface.stroke_polyline(&arc.points, &style);
            drawn += 1;
        }

        // A burst mid-fade restarts the fade from full opacity.
        self.fade = Some(Tween::fade_out(self.config.fade_secs, Easing::QuadOut));
        drawn
    }

    /// Advance the fade-out by `dt` seconds. When it finishes the surface is
    /// cleared and its opacity restored, leaving it ready for the next burst.
    pub fn advance_fade<S: Surface2D>(&mut self, dt: f32, surface: &mut S) {
        let Some(fade) = self.fade.as_mut() else {
            return;
        };
        let tick = fade.advance(dt);
        if tick.completed {
            surface.clear();
            surface.set_opacity(1.0);
            self.fade = None;
        } else {
            surface.set_opacity(fade.value());
        }
    }

    /// Whether arcs are currently on screen and fading.
    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }
}
