//! Headless run loop: config in, engine ticked on the software host, snapshot out.

use std::path::PathBuf;

use backdrop_core::{BackdropConfig, ParticleEngine, ParticleSettings, PreferenceStore, Theme};
use backdrop_platform::Result;
use backdrop_soft::SoftHost;
use clap::Parser;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "backdrop", about = "Render the drifting particle backdrop without a window")]
pub struct Cli {
    /// Run configuration (TOML). Built-in defaults when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Overrides `run.frames`.
    #[arg(long)]
    pub frames: Option<u32>,
    /// Overrides `run.snapshot`.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
    /// Where the light/dark preference lives.
    #[arg(long, default_value = "backdrop-prefs.json")]
    pub prefs: PathBuf,
    /// Flip and save the page theme before rendering.
    #[arg(long)]
    pub toggle_theme: bool,
    /// Fixed RNG seed for reproducible snapshots.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub ticks: u32,
    pub particles: usize,
    pub theme: Theme,
    pub settings: ParticleSettings,
}

pub fn run(cli: Cli) -> Result<RunSummary> {
    let mut config = match &cli.config {
        Some(path) => BackdropConfig::load(path)?,
        None => BackdropConfig::default(),
    };
    if let Some(frames) = cli.frames {
        config.run.frames = frames;
    }
    if cli.snapshot.is_some() {
        config.run.snapshot = cli.snapshot.clone();
    }

    let theme = load_theme(&PreferenceStore::new(&cli.prefs), cli.toggle_theme);

    let mut settings = config.particles;
    let sim_config = match settings.simulation_config() {
        Some(sim_config) => sim_config,
        None => {
            warn!(?settings, "invalid particle settings; using defaults");
            settings = ParticleSettings::default();
            settings
                .simulation_config()
                .ok_or("default particle settings are invalid")?
        }
    };
    let mut engine = match cli.seed {
        Some(seed) => ParticleEngine::with_seed(sim_config, seed),
        None => ParticleEngine::new(sim_config),
    };

    let mut host = SoftHost::mounted(config.window.size(), theme.page_background());
    engine.start(&mut host);

    let mut ticks = 0;
    for frame in 0..config.run.frames {
        if config.run.resize_at == Some(frame) {
            if let Some(size) = config.run.resize_to {
                if host.resize_window(size) {
                    engine.on_viewport_resize(&mut host);
                }
            }
        }
        if config.run.patch_at == Some(frame) {
            if let Some(patch) = config.run.patch {
                settings = settings.merge(patch);
                engine.apply_settings(settings);
            }
        }
        let Some(handle) = host.next_frame() else {
            warn!(frame, "no frame pending; ending run early");
            break;
        };
        if engine.on_frame(handle, &mut host) {
            ticks += 1;
        }
    }
    engine.stop(&mut host);

    if let Some(path) = &config.run.snapshot {
        host.framebuffer()
            .ok_or("drawing surface was never mounted")?
            .save_png(path)?;
    }

    let summary = RunSummary {
        ticks,
        particles: engine.field().len(),
        theme,
        settings,
    };
    info!(
        ticks = summary.ticks,
        particles = summary.particles,
        theme = ?summary.theme,
        "run finished"
    );
    Ok(summary)
}

/// An unreadable preference file never aborts a run; toggling then overwrites it.
fn load_theme(store: &PreferenceStore, toggle: bool) -> Theme {
    let saved = store.load().unwrap_or_else(|err| {
        warn!("{err}; falling back to the default theme");
        Theme::default()
    });
    if !toggle {
        return saved;
    }
    let theme = saved.toggled();
    match store.save(theme) {
        Ok(()) => info!(?theme, "theme toggled"),
        Err(err) => warn!(?theme, "{err}; toggled theme not saved"),
    }
    theme
}
