pub mod api;
pub mod core;
pub mod systems;
pub mod renderer;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::{
    ShockConfig, ParticleConfig, LightningConfig, ShockwaveConfig, FlashConfig, TimelineConfig,
};
pub use api::error::{ShockError, ShockResult};
pub use api::types::{PulseEvent, PulseSource, PulseReport};
pub use core::scene::ShockScene;
pub use core::time::{FrameClock, MAX_FRAME_DT};
pub use renderer::{Rgba, Surface2D, SurfaceSize, StrokeStyle, Glow, RecordingSurface, DrawCommand};
pub use systems::effects::{
    Rng, Particle, ParticleField, LightningArc, LightningGenerator, Shockwave, ShockwaveState, Flash,
};
pub use systems::driver::{RenderDriver, DriverState};
pub use systems::pulse::{PulseCoordinator, PulseQueue, PulseSink, PulseTargets};
pub use systems::glyphs::{AnchorSource, GlyphLayout, GlyphPose, PosedGlyphs};

// Extensions: timed animation on top of the effects
pub use extensions::{Easing, lerp, lerp_vec2, ease, Tween, TweenLoop, TweenTick, ShockTimeline};
