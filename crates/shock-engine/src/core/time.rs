/// Longest frame delta applied to timed effects, in seconds.
/// A tab that was in the background resumes without fast-forwarding.
pub const MAX_FRAME_DT: f32 = 0.1;

/// Frame clock for the render loop.
/// Motion is frame-locked (units per frame); fades and the timeline run on
/// the clamped wall-clock delta this hands out.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    /// Frames ticked so far.
    frames: u64,
    /// Seconds accumulated from clamped frame deltas.
    elapsed: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame. Returns the delta to feed timed effects:
    /// negative or non-finite deltas become 0, long ones are capped.
    pub fn tick(&mut self, frame_dt: f32) -> f32 {
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.frames += 1;
        self.elapsed += dt as f64;
        dt
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Seconds of effect time since the clock started.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_frame_exact() {
        let mut clock = FrameClock::new();
        let dt = clock.tick(1.0 / 60.0);
        assert_eq!(dt, 1.0 / 60.0);
        assert_eq!(clock.frames(), 1);
    }

    #[test]
    fn caps_long_frames() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(5.0), MAX_FRAME_DT);
        assert!((clock.elapsed() - MAX_FRAME_DT as f64).abs() < 1e-9);
    }

    #[test]
    fn rejects_negative_and_nan() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(-0.5), 0.0);
        assert_eq!(clock.tick(f32::NAN), 0.0);
        assert_eq!(clock.frames(), 2);
        assert_eq!(clock.elapsed(), 0.0);
    }
}
