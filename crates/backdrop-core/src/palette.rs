//! Palette selectors and the per-particle colour draw rule behind each of them.

use std::fmt;

use backdrop_platform::Rgba8;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Colour in HSL space: hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Hsl {
    pub const fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Opaque sRGB equivalent.
    pub fn to_rgba8(self) -> Rgba8 {
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);
        let h = self.hue.rem_euclid(360.0) / 60.0;

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgba8::opaque(channel(r), channel(g), channel(b))
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({:.2}, {:.2}%, {:.2}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Which random colour rule new particles use. Unknown names fall back to `Bright`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaletteSelector {
    #[default]
    Bright,
    Pastel,
    Monochrome,
}

impl PaletteSelector {
    pub const ALL: [Self; 3] = [Self::Bright, Self::Pastel, Self::Monochrome];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bright => "bright",
            Self::Pastel => "pastel",
            Self::Monochrome => "monochrome",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "pastel" => Self::Pastel,
            "monochrome" => Self::Monochrome,
            _ => Self::Bright,
        }
    }

    /// Draws one colour according to this palette's rule.
    pub fn sample<R: Rng>(self, rng: &mut R) -> Hsl {
        match self {
            Self::Pastel => Hsl::new(rng.random_range(0.0..360.0), 70.0, 80.0),
            Self::Monochrome => Hsl::new(0.0, 0.0, rng.random_range(20.0..100.0)),
            Self::Bright => Hsl::new(rng.random_range(0.0..360.0), 80.0, 65.0),
        }
    }
}

impl From<String> for PaletteSelector {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<PaletteSelector> for String {
    fn from(selector: PaletteSelector) -> Self {
        selector.as_str().to_owned()
    }
}

impl fmt::Display for PaletteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
