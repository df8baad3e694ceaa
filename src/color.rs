//! Derives icon fill colors from the background color.
//!
//! Fills share the background's hue and saturation exactly and differ only
//! in lightness, sampled from a band next to the background's own lightness.
//! A light background gets darker icons, a dark background lighter ones, and
//! a middling background is settled by a coin flip.

use palette::{FromColor, Hsl, RgbHue, Srgb};
use rand::Rng;

use crate::{Error, Result};

/// Lightness above this counts as a light background.
const LIGHT_THRESHOLD: f32 = 0.8;

/// Lightness below this counts as a dark background.
const DARK_THRESHOLD: f32 = 0.2;

/// How far the band extends away from the background's lightness.
const BAND_WIDTH: f32 = 0.2;

/// An 8-bit RGB color parsed from a CSS hex string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parses a six-digit hex color such as `#ff0000` (the `#` is optional).
    pub fn parse(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::Color(s.to_string()));
        }
        let byte = |range| u8::from_str_radix(&hex[range], 16).map_err(|_| Error::Color(s.to_string()));
        Ok(Self {
            r: byte(0..2)?,
            g: byte(2..4)?,
            b: byte(4..6)?,
        })
    }

    /// Formats as a lowercase `#rrggbb` string.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub(crate) fn to_hsl(self) -> Hsl {
        Hsl::from_color(Srgb::new(self.r, self.g, self.b).into_format::<f32>())
    }

    pub(crate) fn from_hsl(hsl: Hsl) -> Self {
        let rgb = Srgb::from_color(hsl).into_format::<u8>();
        Self {
            r: rgb.red,
            g: rgb.green,
            b: rgb.blue,
        }
    }
}

/// The lightness range fills are sampled from, always a subset of [0, 1]
///
/// The band may be degenerate (`min == max`) at the lightness extremes, in
/// which case every sample is the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightnessBand {
    pub min: f32,
    pub max: f32,
}

impl LightnessBand {
    /// Derives the band from the background color, once per run.
    ///
    /// Light backgrounds (lightness > 0.8) darken, dark backgrounds
    /// (lightness < 0.2) lighten, and anything in between is settled by a
    /// fair coin flip.
    pub fn derive<R: Rng>(background: Rgb, rng: &mut R) -> Self {
        let lightness = background.to_hsl().lightness;
        let is_light = lightness > LIGHT_THRESHOLD;
        let is_dark = lightness < DARK_THRESHOLD;
        let darken = is_light || (!is_dark && rng.random_bool(0.5));

        if darken {
            Self {
                min: (lightness - BAND_WIDTH).max(0.0),
                max: lightness,
            }
        } else {
            Self {
                min: lightness,
                max: (lightness + BAND_WIDTH).min(1.0),
            }
        }
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        rng.random_range(self.min..=self.max)
    }
}

/// A lazy, unbounded sequence of fill colors
///
/// Every item keeps the background's hue and saturation and draws a fresh
/// lightness from the band. The sequence is infinite and not restartable;
/// take only as many colors as you need.
pub struct FillColors<R: Rng> {
    hue: RgbHue<f32>,
    saturation: f32,
    band: LightnessBand,
    rng: R,
}

impl<R: Rng> FillColors<R> {
    pub fn new(background: Rgb, band: LightnessBand, rng: R) -> Self {
        let hsl = background.to_hsl();
        Self {
            hue: hsl.hue,
            saturation: hsl.saturation,
            band,
            rng,
        }
    }
}

impl<R: Rng> Iterator for FillColors<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let lightness = self.band.sample(&mut self.rng);
        let fill = Rgb::from_hsl(Hsl::new(self.hue, self.saturation, lightness));
        Some(fill.to_hex())
    }
}
