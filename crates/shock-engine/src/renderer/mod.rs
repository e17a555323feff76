pub mod color;
pub mod recording;
pub mod surface;

// Re-export key types for convenient access
pub use color::Rgba;
pub use recording::{DrawCommand, RecordingSurface};
pub use surface::{Glow, StrokeStyle, Surface2D, SurfaceSize, MIN_EXTENT};
