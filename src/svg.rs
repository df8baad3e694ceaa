//! Assembles and persists the final SVG document.
//!
//! The assembler draws the per-run icon count, asks the icon source for the
//! glyph, zips layout positions with the infinite fill sequence, and emits
//! one transformed group per instance around a background rectangle. Any
//! failure before serialization aborts the run with nothing written.

use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;

use crate::assets::IconSource;
use crate::color::{FillColors, LightnessBand, Rgb};
use crate::layout::Point;
use crate::{Canvas, Error, GeneratorConfig, IconGlyph, Result, RotationPivot};

/// One placed icon, alive only during assembly
#[derive(Debug, Clone, PartialEq)]
pub struct IconInstance {
    pub position: Point,
    /// Rotation angle in degrees, in [0, 360)
    pub rotation: f64,
    /// Uniform scale factor
    pub scale: f64,
    /// Fill color as a `#rrggbb` string
    pub fill: String,
}

impl IconInstance {
    fn to_group(&self, glyph: &IconGlyph, pivot: RotationPivot) -> String {
        let Point { x, y } = self.position;
        let scale = self.scale;
        let rotate = match pivot {
            RotationPivot::ScaledCenter => {
                let center_x = scale * glyph.width / 2.0;
                let center_y = scale * glyph.height / 2.0;
                format!("rotate({} {center_x} {center_y})", self.rotation)
            }
            RotationPivot::LocalOrigin => format!("rotate({})", self.rotation),
        };
        format!(
            r#"<g transform="translate({x} {y}) {rotate} scale({scale} {scale})" style="fill: {fill}">{outline}</g>"#,
            fill = self.fill,
            outline = glyph.outline,
        )
    }
}

/// Creates an SVG background and returns the path it was written to.
///
/// The icon count is drawn once from `[min_icon_count, max_icon_count]`;
/// the layout policy may yield fewer positions than that, in which case
/// only the available positions are used.
pub fn generate<S: IconSource>(config: &GeneratorConfig, source: &S) -> Result<PathBuf> {
    config.validate()?;
    let background = Rgb::parse(&config.background)?;

    let mut rng = rand::rng();
    let icon_count = rng.random_range(config.min_icon_count..=config.max_icon_count) as usize;
    let glyph = source.glyph(&config.icon_name)?;
    log::info!(
        "placing up to {} instances of {:?} on {}",
        icon_count,
        config.icon_name,
        config.background
    );

    let band = LightnessBand::derive(background, &mut rng);
    let positions = config.layout.positions(config.canvas, icon_count, &mut rng);
    let fills = FillColors::new(background, band, rand::rng());

    let document = render_document(
        config,
        background,
        &glyph,
        source.attribution().as_deref(),
        positions,
        fills,
        &mut rng,
    );
    persist(config.out_path.as_deref(), &document)
}

/// Serializes the whole document from already-derived inputs.
pub(crate) fn render_document<R: Rng>(
    config: &GeneratorConfig,
    background: Rgb,
    glyph: &IconGlyph,
    attribution: Option<&str>,
    positions: Vec<Point>,
    fills: impl Iterator<Item = String>,
    rng: &mut R,
) -> String {
    let Canvas { width, height } = config.canvas;
    let bg = background.to_hex();

    // The <rect> duplicates the style background so raster converters that
    // ignore style-only backgrounds still pick up the fill.
    let mut lines = vec![format!(
        r#"<svg viewBox="0 0 {width} {height}" style="background-color:{bg}" xmlns="http://www.w3.org/2000/svg">"#
    )];
    if let Some(notice) = attribution {
        lines.push(format!("<!--\n    {notice}\n-->"));
    }
    lines.push(format!(
        r#"<rect style="fill:{bg}" x="0" y="0" width="{width}" height="{height}"/>"#
    ));

    // Bounded zip: the fill sequence is infinite, so the (possibly shorter)
    // position list decides how many instances are emitted.
    for (position, fill) in positions.into_iter().zip(fills) {
        let instance = IconInstance {
            position,
            fill,
            scale: rng.random_range(config.min_scale..=config.max_scale),
            rotation: f64::from(rng.random_range(0u16..360)),
        };
        lines.push(instance.to_group(glyph, config.pivot));
    }

    lines.push("</svg>".to_string());
    lines.join("\n")
}

fn persist(out_path: Option<&Path>, document: &str) -> Result<PathBuf> {
    let path = match out_path {
        Some(path) => path.to_path_buf(),
        None => {
            let (_, path) = tempfile::Builder::new()
                .prefix("happybg-")
                .suffix(".svg")
                .tempfile()?
                .keep()
                .map_err(|e| Error::Io(e.error))?;
            path
        }
    };
    fs::write(&path, document)?;
    log::info!("wrote {}", path.display());
    Ok(path)
}
