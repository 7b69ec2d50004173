//! Frame-driven lifecycle around a [`ParticleField`].
//!
//! The engine never owns a thread or a timer. It asks the host for one display refresh at a
//! time and only ticks when the host delivers the exact frame it is waiting for, so a stopped
//! engine ignores any refresh the host still signals.

use backdrop_platform::{FrameHandle, Host, ResizeSubscription, ViewportSize};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace, warn};

use crate::config::{ParticleSettings, SimulationConfig};
use crate::field::ParticleField;
use crate::palette::PaletteSelector;
use crate::particle::Particle;

pub struct ParticleEngine {
    config: SimulationConfig,
    field: ParticleField,
    rng: StdRng,
    pending_frame: Option<FrameHandle>,
    resize_subscription: Option<ResizeSubscription>,
    running: bool,
    surface_lost: bool,
}

impl ParticleEngine {
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Reproducible engine for tests and snapshots.
    pub fn with_seed(config: SimulationConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SimulationConfig, rng: StdRng) -> Self {
        Self {
            config,
            field: ParticleField::default(),
            rng,
            pending_frame: None,
            resize_subscription: None,
            running: false,
            surface_lost: false,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn viewport(&self) -> ViewportSize {
        self.field.viewport()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Replaces the whole batch. A zero count or a non-positive speed leaves everything as is.
    pub fn configure(&mut self, particle_count: u32, speed: f32, palette: PaletteSelector) {
        let Some(config) = SimulationConfig::new(particle_count, speed, palette) else {
            warn!(particle_count, speed, "ignoring invalid particle configuration");
            return;
        };
        self.config = config;
        self.field.reseed(&mut self.rng, &self.config);
        info!(
            particle_count,
            speed,
            palette = %palette,
            "particle batch reinitialized"
        );
    }

    /// Swaps in a hand-built batch over the current viewport. The config is left as is.
    pub fn replace_particles(&mut self, particles: Vec<Particle>) {
        self.field = ParticleField::from_particles(self.field.viewport(), particles);
    }

    pub fn apply_settings(&mut self, settings: ParticleSettings) {
        self.configure(
            settings.number_of_particles,
            settings.speed,
            settings.color_theme,
        );
    }

    /// Sizes the surface to the window, seeds a batch and schedules the first frame.
    pub fn start(&mut self, host: &mut dyn Host) {
        if self.running {
            debug!("particle engine already running");
            return;
        }
        let window = host.window_size();
        match host.surface() {
            Some(surface) => surface.resize(window),
            None => {
                debug!("drawing surface not mounted; deferring start");
                return;
            }
        }
        self.field.set_viewport(window);
        self.field.reseed(&mut self.rng, &self.config);

        self.resize_subscription = Some(host.subscribe_resize());
        self.pending_frame = Some(host.request_frame());
        self.running = true;
        self.surface_lost = false;
        info!(
            width = window.width,
            height = window.height,
            particles = self.field.len(),
            "particle engine started"
        );
    }

    /// Cancels the pending frame and drops the resize subscription. Safe to call repeatedly.
    pub fn stop(&mut self, host: &mut dyn Host) {
        if let Some(handle) = self.pending_frame.take() {
            host.cancel_frame(handle);
        }
        if let Some(subscription) = self.resize_subscription.take() {
            host.unsubscribe_resize(subscription);
        }
        if self.running {
            self.running = false;
            info!("particle engine stopped");
        }
    }

    /// Matches the surface to the host window. Particles are neither moved nor reseeded.
    pub fn on_viewport_resize(&mut self, host: &mut dyn Host) {
        let window = host.window_size();
        if let Some(surface) = host.surface() {
            surface.resize(window);
        }
        self.field.set_viewport(window);
        debug!(width = window.width, height = window.height, "viewport resized");
    }

    /// Runs one tick if `handle` is the frame this engine asked for, then asks for the next one.
    /// Returns whether a tick ran.
    pub fn on_frame(&mut self, handle: FrameHandle, host: &mut dyn Host) -> bool {
        if self.pending_frame != Some(handle) {
            trace!(?handle, "ignoring frame not requested by this engine");
            return false;
        }
        self.pending_frame = None;

        let ticked = match host.surface() {
            Some(surface) => {
                if std::mem::take(&mut self.surface_lost) {
                    info!("drawing surface is back; resuming ticks");
                }
                self.field.tick(surface);
                true
            }
            None if self.surface_lost => {
                trace!("drawing surface still missing; skipping tick");
                false
            }
            None => {
                warn!("drawing surface went away; skipping ticks until it returns");
                self.surface_lost = true;
                false
            }
        };
        self.pending_frame = Some(host.request_frame());
        ticked
    }
}

#[cfg(test)]
mod tests {
    use super::ParticleEngine;
    use crate::config::SimulationConfig;
    use crate::palette::PaletteSelector;
    use backdrop_platform::{Rgba8, ViewportSize};
    use backdrop_soft::SoftHost;

    #[test]
    fn missing_surface_is_flagged_once_and_cleared_on_return() {
        let config = SimulationConfig::new(4, 1.0, PaletteSelector::Bright).unwrap();
        let mut engine = ParticleEngine::with_seed(config, 3);
        let mut host = SoftHost::mounted(ViewportSize::new(50, 50), Rgba8::TRANSPARENT);
        engine.start(&mut host);

        host.unmount();
        for _ in 0..3 {
            let handle = host.next_frame().unwrap();
            assert!(!engine.on_frame(handle, &mut host));
            assert!(engine.surface_lost);
        }
        assert_eq!(host.pending_frames(), 1);

        host.mount();
        let handle = host.next_frame().unwrap();
        assert!(engine.on_frame(handle, &mut host));
        assert!(!engine.surface_lost);
    }
}
