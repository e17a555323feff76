// extensions/timeline.rs
//
// The letter choreography and the pulse cues it fires.
//
//   delay ── reveal (staggered rise, BackOut) ── jitter (group yoyo, N repeats) ── glow
//            ^ pulse                               ^ pulse on every repeat
//
// Flicker runs on every letter from the start and never ends.

use glam::Vec2;

use super::easing::{lerp, Easing};
use super::tween::{Tween, TweenLoop};
use crate::api::config::TimelineConfig;
use crate::api::types::{PulseEvent, PulseSource};
use crate::systems::effects::Rng;
use crate::systems::glyphs::GlyphPose;

/// Per-letter timing and random targets, fixed at construction.
#[derive(Debug, Clone)]
struct LetterTrack {
    /// Offset into the reveal group clock.
    reveal_start: f32,
    /// Offset into the jitter group clock (random stagger order).
    jitter_start: f32,
    jitter_target: Vec2,
    flicker: Tween,
}

/// Drives the letters and fires pulses at the choreography's cue points.
#[derive(Debug, Clone)]
pub struct ShockTimeline {
    config: TimelineConfig,
    /// Group clock for the reveal, 0 .. reveal span.
    reveal: Tween,
    /// Group clock for one jitter pass, yoyoed and repeated.
    jitter: Tween,
    glow: Tween,
    letters: Vec<LetterTrack>,
    poses: Vec<GlyphPose>,
    jitter_pulses: u32,
}

/// 0 before `start`, 1 after `start + duration`, linear in between.
fn local_progress(clock: f32, start: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return if clock >= start { 1.0 } else { 0.0 };
    }
    ((clock - start) / duration).clamp(0.0, 1.0)
}

impl ShockTimeline {
    pub fn new(config: TimelineConfig, letters: usize, rng: &mut Rng) -> Self {
        let gaps = letters.saturating_sub(1) as f32;

        let reveal_span = config.reveal_duration + config.reveal_stagger * gaps;
        let reveal = Tween::new(0.0, reveal_span, reveal_span, Easing::Linear).with_delay(config.delay);

        let jitter_span = config.jitter_duration + config.jitter_stagger * gaps;
        let jitter = Tween::new(0.0, jitter_span, jitter_span, Easing::Linear)
            .yoyo()
            .with_loop(TweenLoop::Repeat(config.jitter_repeats))
            .with_delay(config.delay + reveal_span);
        let jitter_total = jitter.total_duration().unwrap_or(0.0);

        let glow = Tween::new(0.0, 1.0, config.glow_duration, Easing::QuadOut)
            .yoyo()
            .with_loop(TweenLoop::Repeat(1))
            .with_delay(config.delay + reveal_span + jitter_total);

        let jitter_order = rng.permutation(letters);
        let flicker_order = rng.permutation(letters);
        let tracks = (0..letters)
            .map(|i| {
                let target = Vec2::new(rng.symmetric(config.jitter_x), rng.symmetric(config.jitter_y));
                let dip = rng.range(config.flicker_min, 1.0);
                LetterTrack {
                    reveal_start: config.reveal_stagger * i as f32,
                    jitter_start: config.jitter_stagger * jitter_order[i] as f32,
                    jitter_target: target,
                    flicker: Tween::new(1.0, dip, config.flicker_duration, Easing::QuadOut)
                        .yoyo()
                        .with_loop(TweenLoop::Forever)
                        .with_delay(config.flicker_stagger * flicker_order[i] as f32),
                }
            })
            .collect();

        let mut timeline = ShockTimeline {
            config,
            reveal,
            jitter,
            glow,
            letters: tracks,
            poses: vec![GlyphPose::default(); letters],
            jitter_pulses: 0,
        };
        timeline.update_poses();
        timeline
    }

    /// Advance by `dt` seconds. Returns the pulses whose cue points were
    /// crossed, in chronological order.
    pub fn advance(&mut self, dt: f32) -> Vec<PulseEvent> {
        let mut pulses = Vec::new();

        if self.reveal.advance(dt).started {
            pulses.push(PulseEvent::new(PulseSource::Reveal));
        }
        let jitter = self.jitter.advance(dt);
        for _ in 0..jitter.repeats {
            self.jitter_pulses += 1;
            pulses.push(PulseEvent::new(PulseSource::Jitter(self.jitter_pulses)));
        }
        self.glow.advance(dt);
        for letter in &mut self.letters {
            letter.flicker.advance(dt);
        }

        self.update_poses();
        pulses
    }

    fn update_poses(&mut self) {
        let c = &self.config;
        let reveal_clock = self.reveal.value();
        let jitter_clock = self.jitter.value();

        for (letter, pose) in self.letters.iter().zip(self.poses.iter_mut()) {
            let reveal_ease = Easing::BackOut { overshoot: c.reveal_overshoot };
            let r = reveal_ease.apply(local_progress(reveal_clock, letter.reveal_start, c.reveal_duration));
            let j = Easing::QuartInOut.apply(local_progress(jitter_clock, letter.jitter_start, c.jitter_duration));

            let rise = Vec2::new(0.0, lerp(c.reveal_rise, 0.0, r));
            *pose = GlyphPose {
                offset: rise + letter.jitter_target * j,
                scale: lerp(c.reveal_scale, 1.0, r),
                opacity: r.clamp(0.0, 1.0) * letter.flicker.value(),
            };
        }
    }

    /// Current pose of every letter, in text order.
    pub fn poses(&self) -> &[GlyphPose] {
        &self.poses
    }

    /// Text glow level in [0, 1].
    pub fn glow(&self) -> f32 {
        self.glow.value().clamp(0.0, 1.0)
    }

    /// Whether every cue has fired and the glow has settled. Flicker keeps going.
    pub fn is_finished(&self) -> bool {
        self.glow.is_complete()
    }

    /// Pulses the timeline fires over its whole run.
    pub fn total_pulses(&self) -> u32 {
        1 + self.config.jitter_repeats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn run(letters: usize, seconds: f32) -> (ShockTimeline, Vec<(f32, PulseEvent)>) {
        let mut rng = Rng::new(21);
        let mut timeline = ShockTimeline::new(TimelineConfig::default(), letters, &mut rng);
        let mut fired = Vec::new();
        let mut t = 0.0;
        while t < seconds {
            t += DT;
            for p in timeline.advance(DT) {
                fired.push((t, p));
            }
        }
        (timeline, fired)
    }

    #[test]
    fn letters_start_hidden_and_low() {
        let mut rng = Rng::new(1);
        let timeline = ShockTimeline::new(TimelineConfig::default(), 5, &mut rng);
        for pose in timeline.poses() {
            assert_eq!(pose.opacity, 0.0);
            assert_eq!(pose.offset, Vec2::new(0.0, 40.0));
            assert_eq!(pose.scale, 0.5);
        }
    }

    #[test]
    fn reveal_overshoots_past_the_rest_pose() {
        // Back-out with overshoot 3 peaks 25% past the target halfway
        // through each letter's reveal: scale 0.5 -> 1.125, rise 40 -> -10.
        let mut rng = Rng::new(4);
        let mut timeline = ShockTimeline::new(TimelineConfig::default(), 1, &mut rng);
        let mut peak_scale: f32 = 0.0;
        let mut peak_lift: f32 = 0.0;
        let mut t = 0.0;
        while t < 1.1 {
            t += DT;
            timeline.advance(DT);
            peak_scale = peak_scale.max(timeline.poses()[0].scale);
            peak_lift = peak_lift.min(timeline.poses()[0].offset.y);
        }
        assert!(peak_scale > 1.12 && peak_scale <= 1.125 + 1e-4, "peak scale {}", peak_scale);
        assert!(peak_lift < -9.5 && peak_lift >= -10.0 - 1e-3, "peak lift {}", peak_lift);
        assert!((timeline.poses()[0].scale - 1.0).abs() < 1e-5);
    }

    #[test]
    fn fires_reveal_then_four_jitter_pulses() {
        let (timeline, fired) = run(8, 5.0);
        let sources: Vec<_> = fired.iter().map(|(_, p)| p.source).collect();
        assert_eq!(
            sources,
            vec![
                PulseSource::Reveal,
                PulseSource::Jitter(1),
                PulseSource::Jitter(2),
                PulseSource::Jitter(3),
                PulseSource::Jitter(4),
            ]
        );
        assert_eq!(timeline.total_pulses(), 5);

        // Reveal at 0.5 s; jitter starts at 0.5 + 0.6 + 7 * 0.08 = 1.66 s with
        // a 0.06 + 7 * 0.02 = 0.2 s cycle, so repeats land at 1.86, 2.06, ...
        let expected = [0.5, 1.86, 2.06, 2.26, 2.46];
        for ((t, _), e) in fired.iter().zip(expected) {
            assert!((t - e).abs() <= DT + 1e-3, "pulse at {} expected {}", t, e);
        }
    }

    #[test]
    fn letters_settle_on_their_jitter_targets() {
        let (timeline, _) = run(6, 5.0);
        assert!(timeline.is_finished());
        assert_eq!(timeline.glow(), 0.0);
        for pose in timeline.poses() {
            assert!((pose.scale - 1.0).abs() < 1e-5);
            assert!(pose.offset.x.abs() <= 10.0 && pose.offset.y.abs() <= 20.0);
            assert!(pose.opacity >= 0.6 - 1e-4 && pose.opacity <= 1.0 + 1e-4, "opacity {}", pose.opacity);
        }
    }

    #[test]
    fn glow_peaks_after_the_jitter() {
        let mut rng = Rng::new(2);
        let mut timeline = ShockTimeline::new(TimelineConfig::default(), 8, &mut rng);
        let mut peak: f32 = 0.0;
        let mut t = 0.0;
        while t < 4.0 {
            t += DT;
            timeline.advance(DT);
            if t < 2.6 {
                assert_eq!(timeline.glow(), 0.0, "glow before the jitter ended at {}", t);
            }
            peak = peak.max(timeline.glow());
        }
        assert!(peak > 0.95, "peak = {}", peak);
    }

    #[test]
    fn zero_letters_still_fire_cues() {
        let (timeline, fired) = run(0, 5.0);
        assert!(timeline.poses().is_empty());
        assert_eq!(fired.len(), 5);
    }

    #[test]
    fn one_large_step_fires_everything_in_order() {
        let mut rng = Rng::new(3);
        let mut timeline = ShockTimeline::new(TimelineConfig::default(), 4, &mut rng);
        let fired = timeline.advance(10.0);
        assert_eq!(fired.len(), 5);
        assert_eq!(fired[0].source, PulseSource::Reveal);
        assert_eq!(fired[4].source, PulseSource::Jitter(4));
    }
}
