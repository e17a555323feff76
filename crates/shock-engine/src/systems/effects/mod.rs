//! Visual effects: the particle field, lightning arcs, the shockwave ring
//! and the pulse flash.
//!
//! Each effect owns its own state and draws through [`Surface2D`](crate::renderer::surface::Surface2D).
//! [`ShockScene`](crate::core::scene::ShockScene) composes them.

mod rng;
mod particle;
mod lightning;
mod shockwave;
mod flash;

// Re-export public types
pub use rng::Rng;
pub use particle::{Particle, ParticleField};
pub use lightning::{LightningArc, LightningGenerator};
pub use shockwave::{Shockwave, ShockwaveState};
pub use flash::Flash;
