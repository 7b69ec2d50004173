//! Backdrop core engine: platform-agnostic particle field, palettes, settings and preferences.

pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod palette;
pub mod particle;
pub mod preferences;

pub use config::{
    BackdropConfig, ControlRange, ParticleSettings, RunConfig, SettingsPatch, SimulationConfig,
    WindowConfig,
};
pub use engine::ParticleEngine;
pub use error::{ConfigError, PreferenceError};
pub use field::ParticleField;
pub use palette::{Hsl, PaletteSelector};
pub use particle::Particle;
pub use preferences::{PreferenceStore, Theme};
