use serde::{Deserialize, Serialize};

use crate::api::error::ShockError;
use crate::renderer::color::Rgba;

/// Configuration for the whole effect, provided by the page.
/// Every field has a default, so hosts only send what they override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShockConfig {
    pub particles: ParticleConfig,
    /// Half-width of the random velocity kick each pulse gives every particle
    /// is `impulse / 2` (default: 3.5).
    pub impulse: f32,
    pub lightning: LightningConfig,
    pub shockwave: ShockwaveConfig,
    pub flash: FlashConfig,
    pub timeline: TimelineConfig,
}

/// Ambient particle field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Number of particles, fixed for the life of the field (default: 450).
    pub count: usize,
    /// Velocity components are drawn from [-drift, drift] units/frame (default: 0.15).
    pub drift: f32,
    pub size_min: f32,
    pub size_max: f32,
    pub alpha_min: f32,
    pub alpha_max: f32,
    pub color: Rgba,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 450,
            drift: 0.15,
            size_min: 0.5,
            size_max: 2.0,
            alpha_min: 0.2,
            alpha_max: 0.8,
            color: Rgba::PARTICLE,
        }
    }
}

/// Lightning bursts between glyph anchors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightningConfig {
    /// Anchor pairs (i, i + 1) considered per burst, starting at 0 (default: 10).
    pub pairs: usize,
    /// Chance each pair gets an arc (default: 0.3).
    pub probability: f32,
    /// Segments per arc; an arc has `segments + 1` points (default: 12).
    pub segments: usize,
    /// Interior points are offset by up to this many units per axis (default: 15).
    pub jitter: f32,
    pub line_width: f32,
    pub color: Rgba,
    pub glow_blur: f32,
    pub glow_color: Rgba,
    /// Seconds for the arc layer to fade out after a burst (default: 0.12).
    pub fade_secs: f32,
}

impl Default for LightningConfig {
    fn default() -> Self {
        Self {
            pairs: 10,
            probability: 0.3,
            segments: 12,
            jitter: 15.0,
            line_width: 4.0,
            color: Rgba::ARC,
            glow_blur: 20.0,
            glow_color: Rgba::ARC_GLOW,
            fade_secs: 0.12,
        }
    }
}

/// Expanding ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShockwaveConfig {
    /// The ring goes idle once its radius exceeds this (default: 600).
    pub max_radius: f32,
    /// Radius growth per frame (default: 22).
    pub step: f32,
    pub line_width: f32,
    pub color: Rgba,
    pub glow_blur: f32,
    pub glow_color: Rgba,
}

impl Default for ShockwaveConfig {
    fn default() -> Self {
        Self {
            max_radius: 600.0,
            step: 22.0,
            line_width: 6.0,
            color: Rgba::RING,
            glow_blur: 40.0,
            glow_color: Rgba::RING_GLOW,
        }
    }
}

/// Full-screen flash on each pulse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashConfig {
    /// Seconds to reach full brightness; the flash takes twice this overall (default: 0.06).
    pub half_period: f32,
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self { half_period: 0.06 }
    }
}

/// Letter choreography and pulse cues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Seconds before the reveal starts (default: 0.5).
    pub delay: f32,
    pub reveal_duration: f32,
    pub reveal_stagger: f32,
    /// Letters rise from this y offset during the reveal (default: 40).
    pub reveal_rise: f32,
    /// Letters grow from this scale during the reveal (default: 0.5).
    pub reveal_scale: f32,
    /// Back-out overshoot of the reveal ease; 3.0 peaks 25% past the rest pose.
    pub reveal_overshoot: f32,
    pub jitter_duration: f32,
    pub jitter_stagger: f32,
    /// Extra plays of the jitter group; each one fires a pulse (default: 4).
    pub jitter_repeats: u32,
    pub jitter_x: f32,
    pub jitter_y: f32,
    /// Seconds for the glow to peak; it then fades back (default: 0.3).
    pub glow_duration: f32,
    pub flicker_duration: f32,
    pub flicker_stagger: f32,
    /// Lowest opacity factor a flickering letter dips to (default: 0.6).
    pub flicker_min: f32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            delay: 0.5,
            reveal_duration: 0.6,
            reveal_stagger: 0.08,
            reveal_rise: 40.0,
            reveal_scale: 0.5,
            reveal_overshoot: 3.0,
            jitter_duration: 0.06,
            jitter_stagger: 0.02,
            jitter_repeats: 4,
            jitter_x: 10.0,
            jitter_y: 20.0,
            glow_duration: 0.3,
            flicker_duration: 0.05,
            flicker_stagger: 0.03,
            flicker_min: 0.6,
        }
    }
}

impl Default for ShockConfig {
    fn default() -> Self {
        Self {
            particles: ParticleConfig::default(),
            impulse: 3.5,
            lightning: LightningConfig::default(),
            shockwave: ShockwaveConfig::default(),
            flash: FlashConfig::default(),
            timeline: TimelineConfig::default(),
        }
    }
}

impl ShockConfig {
    /// Parse a configuration from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, ShockError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the effect's invariants.
    pub fn validate(&self) -> Result<(), ShockError> {
        let p = &self.particles;
        check(p.drift >= 0.0, "particles.drift must be >= 0")?;
        check(p.size_min > 0.0 && p.size_min <= p.size_max, "particles.size_min must be in (0, size_max]")?;
        check(
            (0.0..=1.0).contains(&p.alpha_min) && (0.0..=1.0).contains(&p.alpha_max) && p.alpha_min <= p.alpha_max,
            "particles.alpha range must lie in [0, 1] with min <= max",
        )?;
        check(self.impulse >= 0.0, "impulse must be >= 0")?;

        let l = &self.lightning;
        check(l.segments >= 1, "lightning.segments must be >= 1")?;
        check((0.0..=1.0).contains(&l.probability), "lightning.probability must be in [0, 1]")?;
        check(l.jitter >= 0.0, "lightning.jitter must be >= 0")?;
        check(l.fade_secs >= 0.0, "lightning.fade_secs must be >= 0")?;

        let s = &self.shockwave;
        check(s.max_radius > 0.0, "shockwave.max_radius must be > 0")?;
        check(s.step > 0.0, "shockwave.step must be > 0")?;

        check(self.flash.half_period >= 0.0, "flash.half_period must be >= 0")?;

        let t = &self.timeline;
        let durations = [
            t.delay,
            t.reveal_duration,
            t.reveal_stagger,
            t.jitter_duration,
            t.jitter_stagger,
            t.glow_duration,
            t.flicker_duration,
            t.flicker_stagger,
        ];
        check(durations.iter().all(|d| *d >= 0.0), "timeline durations must be >= 0")?;
        check((0.0..=1.0).contains(&t.flicker_min), "timeline.flicker_min must be in [0, 1]")?;
        check(t.reveal_overshoot >= 0.0, "timeline.reveal_overshoot must be >= 0")?;
        Ok(())
    }
}

fn check(ok: bool, message: &str) -> Result<(), ShockError> {
    if ok {
        Ok(())
    } else {
        Err(ShockError::InvalidConfig(message.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ShockConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.particles.count, 450);
        assert_eq!(config.impulse, 3.5);
        assert_eq!(config.shockwave.max_radius, 600.0);
        assert_eq!(config.shockwave.step, 22.0);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let json = r#"{
            "impulse": 2.0,
            "particles": { "count": 12 },
            "shockwave": { "step": 30.0 }
        }"#;
        let config = ShockConfig::from_json(json).unwrap();
        assert_eq!(config.impulse, 2.0);
        assert_eq!(config.particles.count, 12);
        assert_eq!(config.particles.drift, 0.15);
        assert_eq!(config.shockwave.step, 30.0);
        assert_eq!(config.shockwave.max_radius, 600.0);
        assert_eq!(config.lightning, LightningConfig::default());
    }

    #[test]
    fn empty_object_is_the_default() {
        assert_eq!(ShockConfig::from_json("{}").unwrap(), ShockConfig::default());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = ShockConfig::from_json("{ impulse: ").unwrap_err();
        assert!(matches!(err, ShockError::Config(_)));
    }

    #[test]
    fn non_terminating_shockwave_is_rejected() {
        let mut config = ShockConfig::default();
        config.shockwave.step = 0.0;
        assert!(matches!(config.validate(), Err(ShockError::InvalidConfig(_))));
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let json = r#"{ "lightning": { "probability": 1.5 } }"#;
        assert!(matches!(ShockConfig::from_json(json), Err(ShockError::InvalidConfig(_))));
    }
}
