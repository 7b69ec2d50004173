use std::fs;
use std::path::{Path, PathBuf};

use backdrop_platform::ViewportSize;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::palette::PaletteSelector;

/// Slider bounds for a settings control: inclusive `min..=max`, values land on `min + k * step`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ControlRange {
    pub const PARTICLE_COUNT: Self = Self {
        min: 10.0,
        max: 300.0,
        step: 5.0,
    };
    pub const SPEED: Self = Self {
        min: 0.1,
        max: 5.0,
        step: 0.1,
    };

    pub fn snap(self, value: f32) -> f32 {
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).min(self.max)
    }
}

/// What the settings UI pushes down: the three user-facing knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSettings {
    pub number_of_particles: u32,
    pub speed: f32,
    pub color_theme: PaletteSelector,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            number_of_particles: 70,
            speed: 1.2,
            color_theme: PaletteSelector::Bright,
        }
    }
}

/// A single control change. Absent fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    pub number_of_particles: Option<u32>,
    pub speed: Option<f32>,
    pub color_theme: Option<PaletteSelector>,
}

impl ParticleSettings {
    /// Folds a control change into these settings, snapping numbers onto their control's range.
    pub fn merge(self, patch: SettingsPatch) -> Self {
        let number_of_particles = patch.number_of_particles.map_or(self.number_of_particles, |n| {
            ControlRange::PARTICLE_COUNT.snap(n as f32).round() as u32
        });
        let speed = match patch.speed {
            Some(speed) if speed.is_finite() => ControlRange::SPEED.snap(speed),
            _ => self.speed,
        };
        Self {
            number_of_particles,
            speed,
            color_theme: patch.color_theme.unwrap_or(self.color_theme),
        }
    }

    pub fn simulation_config(self) -> Option<SimulationConfig> {
        SimulationConfig::new(self.number_of_particles, self.speed, self.color_theme)
    }
}

/// Derived engine configuration. Only constructible from valid inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub particle_count: u32,
    pub speed: f32,
    pub palette: PaletteSelector,
    pub min_radius: f32,
    pub max_radius: f32,
}

impl SimulationConfig {
    pub const MIN_RADIUS: f32 = 0.3;
    pub const MAX_RADIUS: f32 = 7.0;

    /// Largest speed bound whose `-speed..speed` span is still a finite f32.
    pub const MAX_SPEED: f32 = f32::MAX / 2.0;

    /// `None` for a zero count or a speed bound outside `(0, MAX_SPEED]`.
    pub fn new(particle_count: u32, speed: f32, palette: PaletteSelector) -> Option<Self> {
        if particle_count == 0 || !(speed > 0.0 && speed <= Self::MAX_SPEED) {
            return None;
        }
        Some(Self {
            particle_count,
            speed,
            palette,
            min_radius: Self::MIN_RADIUS,
            max_radius: Self::MAX_RADIUS,
        })
    }

    pub fn min_speed(&self) -> f32 {
        -self.speed
    }

    pub fn max_speed(&self) -> f32 {
        self.speed
    }
}

/// `[window]`: the host window the backdrop fills. Either side may be omitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl WindowConfig {
    pub fn size(self) -> ViewportSize {
        ViewportSize::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub frames: u32,
    pub snapshot: Option<PathBuf>,
    pub resize_at: Option<u32>,
    pub resize_to: Option<ViewportSize>,
    pub patch_at: Option<u32>,
    pub patch: Option<SettingsPatch>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 240,
            snapshot: Some(PathBuf::from("backdrop.png")),
            resize_at: None,
            resize_to: None,
            patch_at: None,
            patch: None,
        }
    }
}

/// Top-level `backdrop.toml`. Every section and key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    pub particles: ParticleSettings,
    pub window: WindowConfig,
    pub run: RunConfig,
}

impl BackdropConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}
