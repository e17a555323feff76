//! Glyph anchors: the on-screen centres of the letters, read by each
//! lightning burst.

use glam::Vec2;

/// Anything that can report the current centre of each letter, in order.
/// Called fresh on every pulse, so implementations should reflect live layout.
pub trait AnchorSource {
    fn glyph_anchors(&self) -> Vec<Vec2>;
}

impl AnchorSource for [Vec2] {
    fn glyph_anchors(&self) -> Vec<Vec2> {
        self.to_vec()
    }
}

impl AnchorSource for Vec<Vec2> {
    fn glyph_anchors(&self) -> Vec<Vec2> {
        self.clone()
    }
}

/// Per-letter transform produced by the timeline.
/// Scale is about the letter centre, so it does not move the anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPose {
    pub offset: Vec2,
    pub scale: f32,
    pub opacity: f32,
}

impl Default for GlyphPose {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            opacity: 1.0,
        }
    }
}

/// Resting letter centres, for hosts without a live layout engine.
#[derive(Debug, Clone, Default)]
pub struct GlyphLayout {
    centers: Vec<Vec2>,
}

impl GlyphLayout {
    pub fn new(centers: Vec<Vec2>) -> Self {
        Self { centers }
    }

    /// `count` letters spaced `advance` apart on one line, centred on `center`.
    pub fn row(count: usize, advance: f32, center: Vec2) -> Self {
        let mid = count.saturating_sub(1) as f32 * 0.5;
        let centers = (0..count)
            .map(|i| Vec2::new(center.x + (i as f32 - mid) * advance, center.y))
            .collect();
        Self { centers }
    }

    pub fn centers(&self) -> &[Vec2] {
        &self.centers
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// This layout with the timeline's current poses applied.
    pub fn posed<'a>(&'a self, poses: &'a [GlyphPose]) -> PosedGlyphs<'a> {
        PosedGlyphs { layout: self, poses }
    }
}

/// A layout plus poses; anchors are the resting centres moved by each pose.
#[derive(Debug, Clone, Copy)]
pub struct PosedGlyphs<'a> {
    layout: &'a GlyphLayout,
    poses: &'a [GlyphPose],
}

impl AnchorSource for PosedGlyphs<'_> {
    fn glyph_anchors(&self) -> Vec<Vec2> {
        self.layout
            .centers
            .iter()
            .enumerate()
            .map(|(i, c)| *c + self.poses.get(i).map_or(Vec2::ZERO, |p| p.offset))
            .collect()
    }
}
