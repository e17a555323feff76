//! Ambient particle field: a fixed pool of drifting points.
//!
//! Particles never die. One that leaves the surface is respawned in place
//! with a fresh random state, so the visible count stays constant.

use glam::Vec2;

use super::rng::Rng;
use crate::api::config::ParticleConfig;
use crate::renderer::surface::{Surface2D, SurfaceSize};

/// A single drifting point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in surface coordinates.
    pub pos: Vec2,
    /// Velocity in units per frame.
    pub vel: Vec2,
    /// Radius of the drawn dot.
    pub size: f32,
    /// Opacity in (0, 1].
    pub alpha: f32,
}

impl Particle {
    /// A fresh particle at a uniformly random position inside `bounds`.
    pub fn spawn(bounds: SurfaceSize, config: &ParticleConfig, rng: &mut Rng) -> Self {
        Particle {
            pos: Vec2::new(rng.range(0.0, bounds.width()), rng.range(0.0, bounds.height())),
            vel: Vec2::new(rng.symmetric(config.drift), rng.symmetric(config.drift)),
            size: rng.range(config.size_min, config.size_max),
            alpha: rng.range(config.alpha_min, config.alpha_max),
        }
    }

    /// Move by one frame of velocity. Returns false when the particle left `bounds`.
    fn step(&mut self, bounds: SurfaceSize) -> bool {
        self.pos += self.vel;
        bounds.contains(self.pos)
    }
}

/// Fixed-size pool of particles, owned by the scene.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: SurfaceSize,
    config: ParticleConfig,
}

impl ParticleField {
    /// Create a field of `config.count` particles spread over `bounds`.
    pub fn new(bounds: SurfaceSize, config: ParticleConfig, rng: &mut Rng) -> Self {
        let mut field = ParticleField {
            particles: Vec::new(),
            bounds,
            config,
        };
        field.initialize(field.config.count, rng);
        field
    }

    /// Build a field from explicit particles (replays, tests).
    pub fn from_particles(particles: Vec<Particle>, bounds: SurfaceSize, config: ParticleConfig) -> Self {
        ParticleField { particles, bounds, config }
    }

    /// Replace the pool with `count` freshly spawned particles.
    pub fn initialize(&mut self, count: usize, rng: &mut Rng) {
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles.push(Particle::spawn(self.bounds, &self.config, rng));
        }
    }

    /// Track the current surface size. Particles outside a shrunk surface
    /// are corrected by their next bounds check.
    pub fn set_bounds(&mut self, bounds: SurfaceSize) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> SurfaceSize {
        self.bounds
    }

    /// Advance every particle one frame. Any particle that ends up outside
    /// the surface is respawned before this returns.
    pub fn advance_all(&mut self, rng: &mut Rng) {
        let bounds = self.bounds;
        for p in &mut self.particles {
            if !p.step(bounds) {
                *p = Particle::spawn(bounds, &self.config, rng);
            }
        }
    }

    /// Paint every particle as a filled dot. No state changes.
    pub fn draw_all<S: Surface2D>(&self, surface: &mut S) {
        for p in &self.particles {
            surface.fill_circle(p.pos, p.size, self.config.color.with_alpha(p.alpha));
        }
    }

    /// Kick every particle by an independent random amount in
    /// `[-magnitude/2, magnitude/2]` per axis. Velocity is not clamped;
    /// fast particles simply leave the surface and respawn.
    pub fn apply_impulse(&mut self, magnitude: f32, rng: &mut Rng) {
        let half = magnitude * 0.5;
        for p in &mut self.particles {
            p.vel.x += rng.symmetric(half);
            p.vel.y += rng.symmetric(half);
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Read-only view of the pool.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::{DrawCommand, RecordingSurface};

    fn field(count: usize, w: f32, h: f32, seed: u64) -> (ParticleField, Rng) {
        let mut rng = Rng::new(seed);
        let config = ParticleConfig { count, ..ParticleConfig::default() };
        let f = ParticleField::new(SurfaceSize::new(w, h), config, &mut rng);
        (f, rng)
    }

    #[test]
    fn initialize_spawns_within_ranges() {
        let (f, _) = field(450, 800.0, 600.0, 42);
        assert_eq!(f.len(), 450);
        for p in f.iter() {
            assert!(f.bounds().contains(p.pos));
            assert!(p.vel.x.abs() <= 0.15 && p.vel.y.abs() <= 0.15);
            assert!((0.5..2.0).contains(&p.size));
            assert!((0.2..0.8).contains(&p.alpha));
        }
    }

    #[test]
    fn out_of_bounds_particle_respawns_inside() {
        let bounds = SurfaceSize::new(100.0, 100.0);
        let p = Particle { pos: Vec2::new(5.0, 5.0), vel: Vec2::new(-10.0, 0.0), size: 1.0, alpha: 0.5 };
        let mut f = ParticleField::from_particles(vec![p], bounds, ParticleConfig::default());
        let mut rng = Rng::new(1);

        f.advance_all(&mut rng);

        let p = f.iter().next().unwrap();
        assert!((0.0..=100.0).contains(&p.pos.x), "x = {}", p.pos.x);
        assert!((0.0..=100.0).contains(&p.pos.y));
        // A respawn resets the velocity to the drift range.
        assert!(p.vel.x.abs() <= 0.15);
    }

    #[test]
    fn in_bounds_particle_just_moves() {
        let bounds = SurfaceSize::new(100.0, 100.0);
        let p = Particle { pos: Vec2::new(50.0, 50.0), vel: Vec2::new(1.5, -2.0), size: 1.0, alpha: 0.5 };
        let mut f = ParticleField::from_particles(vec![p], bounds, ParticleConfig::default());
        f.advance_all(&mut Rng::new(1));
        assert_eq!(f.iter().next().unwrap().pos, Vec2::new(51.5, 48.0));
    }

    #[test]
    fn bounds_and_count_hold_under_impulses() {
        for seed in 1..20 {
            let (mut f, mut rng) = field(200, 320.0, 240.0, seed);
            for frame in 0..300 {
                if frame % 25 == 0 {
                    f.apply_impulse(3.5 * (frame as f32 / 25.0 + 1.0), &mut rng);
                }
                f.advance_all(&mut rng);
                assert_eq!(f.len(), 200);
                assert!(f.iter().all(|p| f.bounds().contains(p.pos)));
            }
        }
    }

    #[test]
    fn impulse_stays_within_half_magnitude() {
        for seed in 1..50 {
            let (mut f, mut rng) = field(100, 800.0, 600.0, seed);
            let before: Vec<Vec2> = f.iter().map(|p| p.vel).collect();
            let m = 3.5;
            f.apply_impulse(m, &mut rng);
            for (p, v0) in f.iter().zip(before) {
                let d = p.vel - v0;
                assert!(d.x.abs() <= m / 2.0 + 1e-5, "dx = {}", d.x);
                assert!(d.y.abs() <= m / 2.0 + 1e-5, "dy = {}", d.y);
            }
        }
    }

    #[test]
    fn shrinking_bounds_corrects_stragglers() {
        let (mut f, mut rng) = field(300, 1000.0, 1000.0, 9);
        f.set_bounds(SurfaceSize::new(50.0, 50.0));
        f.advance_all(&mut rng);
        assert!(f.iter().all(|p| p.pos.x <= 50.0 && p.pos.y <= 50.0));
    }

    #[test]
    fn degenerate_surface_never_produces_nan() {
        let (mut f, mut rng) = field(50, 0.0, -10.0, 5);
        for _ in 0..10 {
            f.apply_impulse(3.5, &mut rng);
            f.advance_all(&mut rng);
        }
        assert!(f.iter().all(|p| p.pos.is_finite() && f.bounds().contains(p.pos)));
    }

    #[test]
    fn draw_all_paints_one_dot_per_particle() {
        let (f, _) = field(25, 100.0, 100.0, 3);
        let mut surface = RecordingSurface::new(100.0, 100.0);
        f.draw_all(&mut surface);
        assert_eq!(surface.circles_filled(), 25);
        match &surface.commands[0] {
            DrawCommand::FillCircle { color, .. } => {
                assert_eq!((color.r, color.g, color.b), (120, 160, 255));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
