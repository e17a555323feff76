// extensions/easing.rs
//
// Pure easing functions for tween interpolation.
// No dependencies on the effect systems, just math.

use serde::{Deserialize, Serialize};

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Easing {
    /// Constant velocity (no easing).
    Linear,
    /// Slow end. The default for fades.
    #[default]
    QuadOut,
    /// Very strong slow start and end. Used for the letter jitter.
    QuartInOut,
    /// Overshoot then settle. Used for the letter reveal.
    /// `overshoot` is the classic back constant; larger overshoots further.
    BackOut { overshoot: f32 },
}

impl Easing {
    /// Back-out with the common default overshoot of 1.70158.
    pub const BACK_OUT: Easing = Easing::BackOut { overshoot: 1.70158 };

    /// Apply the easing function to a normalized time value `t` in [0, 1].
    /// Returns the eased value, also typically in [0, 1] (but can overshoot for Back).
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        // Exact endpoints, whatever rounding the curves below pick up.
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuartInOut => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
            Easing::BackOut { overshoot } => {
                let p = t - 1.0;
                1.0 + (overshoot + 1.0) * p.powi(3) + overshoot * p.powi(2)
            }
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two Vec2 values.
#[inline]
pub fn lerp_vec2(a: glam::Vec2, b: glam::Vec2, t: f32) -> glam::Vec2 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}
