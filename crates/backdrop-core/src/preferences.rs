//! The one persisted user preference: light or dark page theme.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use backdrop_platform::Rgba8;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PreferenceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Page colour the particle layer is composited over.
    pub fn page_background(self) -> Rgba8 {
        match self {
            Self::Light => Rgba8::opaque(248, 246, 242),
            Self::Dark => Rgba8::opaque(15, 17, 26),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredPreferences {
    #[serde(default)]
    theme: Theme,
}

/// JSON file holding the theme choice.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file means nothing was saved yet and yields the default theme.
    pub fn load(&self) -> Result<Theme, PreferenceError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no saved preferences at {}", self.path.display());
                return Ok(Theme::default());
            }
            Err(source) => {
                return Err(PreferenceError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let stored: StoredPreferences =
            serde_json::from_str(&text).map_err(|source| PreferenceError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        Ok(stored.theme)
    }

    pub fn save(&self, theme: Theme) -> Result<(), PreferenceError> {
        let text = serde_json::to_string_pretty(&StoredPreferences { theme })?;
        fs::write(&self.path, text).map_err(|source| PreferenceError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(?theme, "saved preferences to {}", self.path.display());
        Ok(())
    }

    /// Flips the saved theme and returns the new one.
    pub fn toggle(&self) -> Result<Theme, PreferenceError> {
        let theme = self.load()?.toggled();
        self.save(theme)?;
        Ok(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::{PreferenceStore, Theme};
    use crate::error::PreferenceError;

    #[test]
    fn missing_file_defaults_to_dark() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.load().unwrap(), Theme::Dark);
    }

    #[test]
    fn toggle_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.toggle().unwrap(), Theme::Light);
        assert_eq!(store.load().unwrap(), Theme::Light);
        assert_eq!(store.toggle().unwrap(), Theme::Dark);

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\"dark\""));
    }

    #[test]
    fn garbage_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{\"theme\": \"sepia\"}").unwrap();
        let err = PreferenceStore::new(path).load().unwrap_err();
        assert!(matches!(err, PreferenceError::Malformed { .. }));
    }

    #[test]
    fn themes_have_distinct_backgrounds() {
        assert_ne!(
            Theme::Light.page_background(),
            Theme::Dark.page_background()
        );
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
