// extensions/tween.rs
//
// Scalar tween: one animated value with delay, repeat and yoyo.
// Owners hold their tweens directly and advance them with the frame delta.
//
// Usage:
//   let mut fade = Tween::fade_out(0.12, Easing::QuadOut);
//   let tick = fade.advance(dt);
//   surface.set_opacity(fade.value());
//   if tick.completed { /* clean up */ }

use serde::{Deserialize, Serialize};

use super::easing::{ease, Easing};

/// How many times a tween plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TweenLoop {
    /// Play once and stop.
    #[default]
    Once,
    /// Play once, then repeat `n` more times.
    Repeat(u32),
    /// Never completes.
    Forever,
}

/// What happened during one `advance` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TweenTick {
    /// The delay elapsed during this call (fires once).
    pub started: bool,
    /// Cycle boundaries crossed during this call (each one is a repeat).
    pub repeats: u32,
    /// The final cycle ended during this call (fires once).
    pub completed: bool,
}

/// A single animated value.
#[derive(Debug, Clone)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    /// Duration of one cycle, in seconds.
    pub duration: f32,
    /// Seconds before the first cycle starts.
    pub delay: f32,
    pub easing: Easing,
    pub loop_mode: TweenLoop,
    /// Alternate direction on every repeat (ping-pong).
    pub yoyo: bool,
    /// Seconds since creation or the last restart, delay included.
    elapsed: f32,
    started: bool,
    finished: bool,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            delay: 0.0,
            easing,
            loop_mode: TweenLoop::Once,
            yoyo: false,
            elapsed: 0.0,
            started: false,
            finished: false,
        }
    }

    /// Fade out to transparent.
    pub fn fade_out(duration: f32, easing: Easing) -> Self {
        Self::new(1.0, 0.0, duration, easing)
    }

    // -- Builder methods --

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn with_loop(mut self, mode: TweenLoop) -> Self {
        self.loop_mode = mode;
        self
    }

    pub fn yoyo(mut self) -> Self {
        self.yoyo = true;
        self
    }

    /// Rewind to the start, delay included.
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
        self.started = false;
        self.finished = false;
    }

    fn cycles(&self) -> Option<u32> {
        match self.loop_mode {
            TweenLoop::Once => Some(1),
            TweenLoop::Repeat(n) => Some(n.saturating_add(1)),
            TweenLoop::Forever => None,
        }
    }

    /// Total active time across all cycles, `None` if it never ends.
    pub fn total_duration(&self) -> Option<f32> {
        self.cycles().map(|c| c as f32 * self.duration.max(0.0))
    }

    /// Completed cycle boundaries at active time `t`, capped at the cycle count.
    fn boundaries(&self, t: f32) -> u32 {
        let crossed = (t / self.duration).floor().max(0.0) as u32;
        match self.cycles() {
            Some(c) => crossed.min(c),
            None => crossed,
        }
    }

    /// Advance by `dt` seconds and report what happened.
    pub fn advance(&mut self, dt: f32) -> TweenTick {
        let mut tick = TweenTick::default();
        if self.finished {
            return tick;
        }

        let before = (self.elapsed - self.delay).max(0.0);
        self.elapsed += dt.max(0.0);
        let after = self.elapsed - self.delay;
        if after < 0.0 {
            return tick;
        }

        if !self.started {
            self.started = true;
            tick.started = true;
        }

        if self.duration <= 0.0 {
            self.finished = true;
            tick.completed = true;
            return tick;
        }

        let b0 = self.boundaries(before);
        let b1 = self.boundaries(after);
        match self.cycles() {
            Some(c) => {
                let last_repeat = c - 1;
                tick.repeats = b1.min(last_repeat).saturating_sub(b0.min(last_repeat));
                if b1 >= c {
                    self.finished = true;
                    tick.completed = true;
                }
            }
            None => {
                tick.repeats = b1.saturating_sub(b0);
                // Keep the clock small; an even number of cycles preserves yoyo direction.
                let period = self.duration * 2.0;
                if after >= period {
                    let wraps = (after / period).floor();
                    self.elapsed -= wraps * period;
                }
            }
        }

        tick
    }

    /// Eased position within the current cycle, yoyo direction applied.
    fn phase(&self) -> f32 {
        if self.duration <= 0.0 {
            return if self.started { 1.0 } else { 0.0 };
        }
        let t = (self.elapsed - self.delay).max(0.0);
        let (cycle, local) = match self.cycles() {
            Some(c) if self.finished || t >= c as f32 * self.duration => (c - 1, 1.0),
            _ => {
                let k = (t / self.duration).floor();
                (k as u32, (t - k * self.duration) / self.duration)
            }
        };
        let forward = !self.yoyo || cycle % 2 == 0;
        if forward { local } else { 1.0 - local }
    }

    /// Current value.
    pub fn value(&self) -> f32 {
        ease(self.from, self.to, self.phase(), self.easing)
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether the last cycle has ended. Never true for `Forever`.
    pub fn is_complete(&self) -> bool {
        self.finished
    }

    /// Whether the tween is past its delay and not yet complete.
    pub fn is_running(&self) -> bool {
        self.started && !self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn once_runs_to_completion() {
        let mut t = Tween::new(0.0, 100.0, 1.0, Easing::Linear);
        let tick = t.advance(0.5);
        assert!(tick.started);
        assert!(approx(t.value(), 50.0));

        let tick = t.advance(0.6);
        assert!(tick.completed);
        assert_eq!(tick.repeats, 0);
        assert!(approx(t.value(), 100.0));

        // Completion only fires once.
        assert_eq!(t.advance(1.0), TweenTick::default());
    }

    #[test]
    fn delay_holds_the_start_value() {
        let mut t = Tween::new(2.0, 4.0, 1.0, Easing::Linear).with_delay(0.5);
        let tick = t.advance(0.25);
        assert!(!tick.started);
        assert!(approx(t.value(), 2.0));
        assert!(t.advance(0.5).started);
        assert!(approx(t.value(), 2.5));
    }

    #[test]
    fn yoyo_returns_to_start() {
        // 0 -> 1 -> 0, like a camera flash.
        let mut t = Tween::new(0.0, 1.0, 0.06, Easing::Linear)
            .yoyo()
            .with_loop(TweenLoop::Repeat(1));
        t.advance(0.06);
        assert!(approx(t.value(), 1.0) || approx(t.value(), 0.0));
        t.advance(0.03);
        assert!(approx(t.value(), 0.5));
        let tick = t.advance(0.1);
        assert!(tick.completed);
        assert!(approx(t.value(), 0.0));
    }

    #[test]
    fn repeats_are_counted_per_boundary() {
        let mut t = Tween::new(0.0, 1.0, 0.1, Easing::Linear).with_loop(TweenLoop::Repeat(4));
        let mut repeats = 0;
        let mut completed = 0;
        for _ in 0..100 {
            let tick = t.advance(0.013);
            repeats += tick.repeats;
            completed += tick.completed as u32;
        }
        assert_eq!(repeats, 4);
        assert_eq!(completed, 1);
    }

    #[test]
    fn one_large_step_reports_every_repeat() {
        let mut t = Tween::new(0.0, 1.0, 0.1, Easing::Linear).with_loop(TweenLoop::Repeat(4));
        let tick = t.advance(10.0);
        assert!(tick.started);
        assert_eq!(tick.repeats, 4);
        assert!(tick.completed);
    }

    #[test]
    fn forever_never_completes_and_keeps_direction() {
        let mut t = Tween::new(1.0, 0.6, 0.05, Easing::Linear)
            .yoyo()
            .with_loop(TweenLoop::Forever);
        for _ in 0..10_000 {
            assert!(!t.advance(0.016).completed);
            let v = t.value();
            assert!((0.6 - 1e-4..=1.0 + 1e-4).contains(&v), "v = {}", v);
        }
        assert!(t.is_running());
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut t = Tween::fade_out(0.0, Easing::QuadOut);
        let tick = t.advance(0.0);
        assert!(tick.started && tick.completed);
        assert!(approx(t.value(), 0.0));
    }

    #[test]
    fn restart_rewinds() {
        let mut t = Tween::fade_out(0.12, Easing::QuadOut);
        t.advance(1.0);
        assert!(t.is_complete());
        t.restart();
        assert!(!t.is_started());
        assert!(approx(t.value(), 1.0));
    }
}
