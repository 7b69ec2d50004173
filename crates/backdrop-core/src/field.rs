//! The particle batch plus the viewport it bounces around in.

use backdrop_platform::{DrawSurface, ViewportSize};
use rand::Rng;

use crate::config::SimulationConfig;
use crate::particle::Particle;

#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    viewport: ViewportSize,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new(viewport: ViewportSize) -> Self {
        Self {
            viewport,
            particles: Vec::new(),
        }
    }

    pub fn from_particles(viewport: ViewportSize, particles: Vec<Particle>) -> Self {
        Self {
            viewport,
            particles,
        }
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Changes the bounds only. Particles left outside are pulled back on their next tick.
    pub fn set_viewport(&mut self, viewport: ViewportSize) {
        self.viewport = viewport;
    }

    /// Throws the current batch away and samples `config.particle_count` new particles.
    pub fn reseed<R: Rng>(&mut self, rng: &mut R, config: &SimulationConfig) {
        let viewport = self.viewport;
        self.particles.clear();
        self.particles.extend(
            (0..config.particle_count).map(|_| Particle::spawn(rng, config, viewport)),
        );
    }

    /// Advances every particle by one tick without drawing.
    pub fn step(&mut self) {
        let extent = self.viewport.extent();
        for particle in &mut self.particles {
            particle.advance(extent);
        }
    }

    /// Advances and draws every particle, in batch order, onto a cleared surface.
    pub fn tick(&mut self, surface: &mut dyn DrawSurface) {
        let extent = self.viewport.extent();
        surface.clear();
        for particle in &mut self.particles {
            particle.advance(extent);
            surface.fill_circle(particle.pos, particle.radius, particle.fill);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ParticleField;
    use crate::config::SimulationConfig;
    use crate::palette::{Hsl, PaletteSelector};
    use crate::particle::Particle;
    use backdrop_platform::ViewportSize;
    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn stays_in_bounds_over_many_ticks() {
        let mut rng = StdRng::seed_from_u64(99);
        let viewport = ViewportSize::new(320, 200);
        let config = SimulationConfig::new(150, 5.0, PaletteSelector::Bright).unwrap();
        let mut field = ParticleField::new(viewport);
        field.reseed(&mut rng, &config);
        for _ in 0..2_000 {
            field.step();
            for p in field.particles() {
                assert!(p.is_within(viewport.extent()), "escaped: {p:?}");
            }
        }
    }

    #[test]
    fn reseed_replaces_rather_than_appends() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut field = ParticleField::new(ViewportSize::new(100, 100));
        let fifty = SimulationConfig::new(50, 1.0, PaletteSelector::Bright).unwrap();
        let ten = SimulationConfig::new(10, 1.0, PaletteSelector::Bright).unwrap();
        field.reseed(&mut rng, &fifty);
        field.reseed(&mut rng, &ten);
        assert_eq!(field.len(), 10);
    }

    #[test]
    fn shrinking_the_viewport_does_not_move_particles_until_a_tick() {
        let p = Particle::new(
            Vec2::new(700.0, 500.0),
            Vec2::new(1.0, 1.0),
            3.0,
            Hsl::new(0.0, 0.0, 40.0),
        );
        let mut field = ParticleField::from_particles(ViewportSize::new(800, 600), vec![p]);
        field.set_viewport(ViewportSize::new(400, 300));
        assert_eq!(field.particles()[0].pos, Vec2::new(700.0, 500.0));

        field.step();
        let moved = field.particles()[0];
        assert_eq!(moved.pos, Vec2::new(397.0, 297.0));
        assert_eq!(moved.vel, Vec2::new(-1.0, -1.0));
    }
}
