//! happybg
//!
//! Procedurally generates a decorative SVG background by scattering a Font
//! Awesome icon across a colored canvas with randomized position, rotation,
//! scale, and a lightness-varied fill derived from the background color.
//!
//! # Example
//!
//! ```no_run
//! use happybg::assets::{DirStore, FontAwesomeSource};
//! use happybg::{generate, GeneratorConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GeneratorConfig {
//!     background: "#ff0000".to_string(),
//!     icon_name: "snowflake".to_string(),
//!     ..Default::default()
//! };
//!
//! let source = FontAwesomeSource::new(DirStore::new("."));
//! let path = generate(&config, &source)?;
//! println!("{}", path.display());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

pub mod error;
pub use error::{Error, Result};

// Color Deriver: background color -> lightness band -> infinite fill sequence
pub mod color;

// Layout Generator: grid-based or free placement of icon origins
pub mod layout;

// Icon asset provider: versioned Font Awesome archive, fetched and cached
pub mod assets;

// Markup Assembler: composes the final SVG document and persists it
pub mod svg;

pub use svg::generate;

use layout::LayoutPolicy;

/// The logical drawing surface
///
/// The canvas is a fixed 16:9 coordinate space; the generated document
/// declares it as its `viewBox` and the background rectangle fills it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 900,
        }
    }
}

/// A vector icon outline plus its intrinsic dimensions
///
/// The outline is an opaque markup fragment (a `<path>` element) taken from
/// the icon archive; the dimensions come from the icon's `viewBox`.
#[derive(Debug, Clone, PartialEq)]
pub struct IconGlyph {
    pub width: f64,
    pub height: f64,
    pub outline: String,
}

/// Which point each icon group rotates about
///
/// The original scripts disagreed on this; it is a config knob here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationPivot {
    /// Rotate about the center of the icon's scaled bounding box
    #[default]
    ScaledCenter,
    /// Rotate about the group's own origin
    LocalOrigin,
}

/// Configuration for one generation run
///
/// The defaults match the original tool: 5-30 icons at 15-30% scale on a
/// 1600x900 canvas, snapped to a coarse grid.
///
/// # Examples
///
/// ```
/// let config = happybg::GeneratorConfig::default();
/// assert_eq!(config.min_icon_count, 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Background color as a six-digit hex string (e.g. `#ff0000`)
    pub background: String,
    /// Name of the Font Awesome icon to scatter (e.g. `snowflake`)
    pub icon_name: String,
    /// Smallest number of icons to place
    pub min_icon_count: u32,
    /// Largest number of icons to place
    pub max_icon_count: u32,
    /// Smallest per-icon scale factor
    pub min_scale: f64,
    /// Largest per-icon scale factor
    pub max_scale: f64,
    /// How icon origins are placed on the canvas
    pub layout: LayoutPolicy,
    /// Which point each icon rotates about
    pub pivot: RotationPivot,
    /// The drawing surface dimensions
    pub canvas: Canvas,
    /// Where to write the document; `None` generates a temporary `.svg` path
    pub out_path: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let canvas = Canvas::default();
        Self {
            background: "#ffffff".to_string(),
            icon_name: "snowflake".to_string(),
            min_icon_count: 5,
            max_icon_count: 30,
            min_scale: 0.15,
            max_scale: 0.3,
            layout: LayoutPolicy::grid_for(canvas, false),
            pivot: RotationPivot::default(),
            canvas,
            out_path: None,
        }
    }
}

impl GeneratorConfig {
    /// Checks the min/max pairs before any generation work begins.
    pub fn validate(&self) -> Result<()> {
        if self.min_icon_count > self.max_icon_count {
            return Err(Error::Config(format!(
                "min_icon_count={} should be less than or equal to max_icon_count={}",
                self.min_icon_count, self.max_icon_count
            )));
        }
        if self.min_scale > self.max_scale {
            return Err(Error::Config(format!(
                "min_scale={} should be less than or equal to max_scale={}",
                self.min_scale, self.max_scale
            )));
        }
        Ok(())
    }
}
