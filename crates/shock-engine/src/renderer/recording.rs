use glam::Vec2;

use super::color::Rgba;
use super::surface::{StrokeStyle, Surface2D, SurfaceSize};

/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillCircle { center: Vec2, radius: f32, color: Rgba },
    StrokePolyline { points: Vec<Vec2>, style: StrokeStyle },
    StrokeCircle { center: Vec2, radius: f32, style: StrokeStyle },
}

/// In-memory surface that records draw calls instead of rasterising them.
/// Used for headless runs and by the tests of every effect system.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: SurfaceSize,
    opacity: f32,
    /// Draw calls since the last `clear()` or `resize()`.
    pub commands: Vec<DrawCommand>,
    /// Number of `clear()` calls over the surface's lifetime.
    pub clears: u32,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: SurfaceSize::new(width, height),
            opacity: 1.0,
            commands: Vec::with_capacity(512),
            clears: 0,
        }
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    pub fn circles_filled(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .count()
    }

    pub fn polylines(&self) -> impl Iterator<Item = &[Vec2]> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::StrokePolyline { points, .. } => Some(points.as_slice()),
            _ => None,
        })
    }

    pub fn rings(&self) -> impl Iterator<Item = (Vec2, f32, &StrokeStyle)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::StrokeCircle { center, radius, style } => Some((*center, *radius, style)),
            _ => None,
        })
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        let size = SurfaceSize::default();
        Self::new(size.width(), size.height())
    }
}

impl Surface2D for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.size = SurfaceSize::new(width, height);
        self.commands.clear();
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.clears += 1;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::FillCircle { center, radius, color });
    }

    fn stroke_polyline(&mut self, points: &[Vec2], style: &StrokeStyle) {
        self.commands.push(DrawCommand::StrokePolyline {
            points: points.to_vec(),
            style: *style,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, style: &StrokeStyle) {
        self.commands.push(DrawCommand::StrokeCircle { center, radius, style: *style });
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    fn opacity(&self) -> f32 {
        self.opacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_clears() {
        let mut s = RecordingSurface::new(100.0, 100.0);
        s.fill_circle(Vec2::new(1.0, 2.0), 3.0, Rgba::PARTICLE);
        s.fill_circle(Vec2::new(4.0, 5.0), 1.0, Rgba::PARTICLE);
        assert_eq!(s.circles_filled(), 2);

        s.clear();
        assert_eq!(s.command_count(), 0);
        assert_eq!(s.clears, 1);
    }

    #[test]
    fn resize_drops_contents() {
        let mut s = RecordingSurface::new(100.0, 100.0);
        s.fill_circle(Vec2::ZERO, 1.0, Rgba::PARTICLE);
        s.resize(320.0, 0.0);
        assert_eq!(s.command_count(), 0);
        assert_eq!(s.size(), SurfaceSize::new(320.0, 1.0));
    }

    #[test]
    fn opacity_is_clamped() {
        let mut s = RecordingSurface::default();
        s.set_opacity(1.5);
        assert_eq!(s.opacity(), 1.0);
        s.set_opacity(-1.0);
        assert_eq!(s.opacity(), 0.0);
    }
}
