// extensions/mod.rs
//
// Timed animation helpers layered on top of the effect systems.
// Nothing in systems/ depends on the timeline; hosts opt in by creating one.

pub mod easing;
pub mod timeline;
pub mod tween;

pub use easing::{Easing, lerp, lerp_vec2, ease};
pub use timeline::ShockTimeline;
pub use tween::{Tween, TweenLoop, TweenTick};
