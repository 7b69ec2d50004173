use backdrop_platform::{Rgba8, ViewportSize};
use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::palette::Hsl;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Hsl,
    pub fill: Rgba8,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, color: Hsl) -> Self {
        Self {
            pos,
            vel,
            radius,
            color,
            fill: color.to_rgba8(),
        }
    }

    /// Fresh particle somewhere inside `viewport`, with every attribute drawn from `config`.
    pub fn spawn<R: Rng>(rng: &mut R, config: &SimulationConfig, viewport: ViewportSize) -> Self {
        let extent = viewport.extent();
        let pos = Vec2::new(uniform(rng, 0.0, extent.x), uniform(rng, 0.0, extent.y));
        let radius = uniform(rng, config.min_radius, config.max_radius);
        let vel = Vec2::new(
            uniform(rng, config.min_speed(), config.max_speed()),
            uniform(rng, config.min_speed(), config.max_speed()),
        );
        Self::new(pos, vel, radius, config.palette.sample(rng))
    }

    /// One tick of motion inside a `[0, extent]` box, bouncing off its walls.
    pub fn advance(&mut self, extent: Vec2) {
        self.pos += self.vel;
        reflect_axis(&mut self.pos.x, &mut self.vel.x, self.radius, extent.x);
        reflect_axis(&mut self.pos.y, &mut self.vel.y, self.radius, extent.y);
    }

    pub fn is_within(&self, extent: Vec2) -> bool {
        let min = Vec2::splat(self.radius);
        let max = extent - min;
        self.pos.cmpge(min).all() && self.pos.cmple(max).all()
    }
}

// A box narrower than the particle's diameter pins it at `radius`.
fn reflect_axis(pos: &mut f32, vel: &mut f32, radius: f32, extent: f32) {
    if *pos + radius > extent || *pos - radius < 0.0 {
        *vel = -*vel;
        *pos = pos.min(extent - radius).max(radius);
    }
}

// Empty or reversed ranges collapse to `low`. Spans too wide for f32 are interpolated instead.
fn uniform<R: Rng>(rng: &mut R, low: f32, high: f32) -> f32 {
    let span = high - low;
    if span > 0.0 && span.is_finite() {
        rng.random_range(low..high)
    } else if span > 0.0 {
        let t: f32 = rng.random();
        low * (1.0 - t) + high * t
    } else {
        low
    }
}

#[cfg(test)]
mod tests {
    use super::{uniform, Particle};
    use crate::config::SimulationConfig;
    use crate::palette::{Hsl, PaletteSelector};
    use backdrop_platform::ViewportSize;
    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grey(radius: f32, pos: Vec2, vel: Vec2) -> Particle {
        Particle::new(pos, vel, radius, Hsl::new(0.0, 0.0, 50.0))
    }

    #[test]
    fn reflects_off_the_near_wall() {
        let mut particle = grey(4.0, Vec2::new(4.0, 50.0), Vec2::new(-1.5, 0.0));
        particle.advance(Vec2::new(100.0, 100.0));
        assert_eq!(particle.vel.x, 1.5);
        assert_eq!(particle.pos.x, 4.0);
        assert_eq!(particle.pos.y, 50.0);
    }

    #[test]
    fn reflects_off_the_far_wall() {
        let mut particle = grey(5.0, Vec2::new(799.9, 300.0), Vec2::new(2.0, 0.0));
        particle.advance(Vec2::new(800.0, 600.0));
        assert_eq!(particle.vel.x, -2.0);
        assert_eq!(particle.pos.x, 795.0);
        assert_eq!(particle.vel.y, 0.0);
        assert_eq!(particle.pos.y, 300.0);
    }

    #[test]
    fn axes_bounce_independently() {
        let mut particle = grey(1.0, Vec2::new(50.0, 99.5), Vec2::new(1.0, 1.0));
        particle.advance(Vec2::new(100.0, 100.0));
        assert_eq!(particle.vel, Vec2::new(1.0, -1.0));
        assert_eq!(particle.pos, Vec2::new(51.0, 99.0));
    }

    #[test]
    fn spawned_attributes_stay_in_configured_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = SimulationConfig::new(1, 2.5, PaletteSelector::Pastel).unwrap();
        let viewport = ViewportSize::new(640, 480);
        for _ in 0..1_000 {
            let p = Particle::spawn(&mut rng, &config, viewport);
            assert!((0.0..640.0).contains(&p.pos.x));
            assert!((0.0..480.0).contains(&p.pos.y));
            assert!((0.3..7.0).contains(&p.radius));
            assert!((-2.5..2.5).contains(&p.vel.x));
            assert!((-2.5..2.5).contains(&p.vel.y));
            assert_eq!(p.fill, p.color.to_rgba8());
        }
    }

    #[test]
    fn spawning_on_an_unsized_viewport_does_not_panic() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = SimulationConfig::new(1, 1.0, PaletteSelector::Bright).unwrap();
        let p = Particle::spawn(&mut rng, &config, ViewportSize::default());
        assert_eq!(p.pos, Vec2::ZERO);
    }

    #[test]
    fn uniform_survives_spans_wider_than_f32() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let x = uniform(&mut rng, -3.0e38, 3.0e38);
            assert!(x.is_finite() && (-3.0e38..=3.0e38).contains(&x));
        }
        assert_eq!(uniform(&mut rng, 2.0, 2.0), 2.0);
        assert_eq!(uniform(&mut rng, 2.0, f32::NAN), 2.0);
    }
}
