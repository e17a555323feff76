//! The 2D drawing surface the effect paints on.
//!
//! The engine never touches a real canvas. Backends (the browser canvas in
//! `shock-web`, or [`RecordingSurface`](super::recording::RecordingSurface)
//! for headless runs) implement [`Surface2D`] and the effect systems draw
//! through it.

use glam::Vec2;

use super::color::Rgba;

/// Smallest extent a surface may report. Transient zero-sized viewports
/// (minimised windows, mid-resize layouts) are clamped to this.
pub const MIN_EXTENT: f32 = 1.0;

/// Width and height of a viewport-sized surface, never below [`MIN_EXTENT`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    width: f32,
    height: f32,
}

impl SurfaceSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: clamp_extent(width),
            height: clamp_extent(height),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Inclusive bounds check: `[0, width] x [0, height]`.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

fn clamp_extent(v: f32) -> f32 {
    // NaN fails every comparison, so it falls through to the minimum too.
    if v >= MIN_EXTENT { v } else { MIN_EXTENT }
}

/// Soft glow behind a stroke (canvas `shadowBlur` / `shadowColor`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub blur: f32,
    pub color: Rgba,
}

/// Everything a stroke needs. Passed per call, so no style leaks from one
/// draw into the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgba,
    pub line_width: f32,
    pub glow: Option<Glow>,
}

/// Immediate-mode 2D drawing surface sized to the viewport.
pub trait Surface2D {
    /// Current dimensions.
    fn size(&self) -> SurfaceSize;

    /// Resize to the viewport. Implementations clear their contents, as a
    /// canvas does when its backing store is resized.
    fn resize(&mut self, width: f32, height: f32);

    /// Clear the whole surface to transparent.
    fn clear(&mut self);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    fn stroke_polyline(&mut self, points: &[Vec2], style: &StrokeStyle);

    fn stroke_circle(&mut self, center: Vec2, radius: f32, style: &StrokeStyle);

    /// Surface-level compositing opacity in [0, 1].
    fn set_opacity(&mut self, opacity: f32);

    fn opacity(&self) -> f32;
}
