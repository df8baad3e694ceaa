use std::path::PathBuf;

use clap::Parser;

use happybg::assets::{DirStore, FontAwesomeSource};
use happybg::layout::LayoutPolicy;
use happybg::{generate, Canvas, GeneratorConfig};

/// Create low-contrast backgrounds from Font Awesome icons.
/// Prints the path to a generated SVG file.
#[derive(Parser, Debug)]
#[command(name = "happybg", version)]
struct Args {
    /// A six-digit CSS color (e.g. #ff0000)
    #[arg(long)]
    background: String,

    /// The Font Awesome icon to use (e.g. snowflake)
    #[arg(long)]
    icon_name: String,

    /// Smallest number of icons to add
    #[arg(long, default_value_t = 5)]
    min_icon_count: u32,

    /// Largest number of icons to add
    #[arg(long, default_value_t = 30)]
    max_icon_count: u32,

    /// How small the icons can get
    #[arg(long, default_value_t = 0.15)]
    min_scale: f64,

    /// How big the icons can get
    #[arg(long, default_value_t = 0.3)]
    max_scale: f64,

    /// Keep icons out of the central region of the canvas
    // "--avoid-centre" is a consideration for British people ;-)
    #[arg(long, alias = "avoid-centre")]
    avoid_center: bool,

    /// Scatter icons freely instead of snapping them to a grid
    #[arg(long)]
    free_placement: bool,

    /// Directory the downloaded icon archive is cached in
    #[arg(long, default_value = ".")]
    cache_dir: PathBuf,

    /// Where to save the SVG (a generated temporary path by default)
    #[arg(long)]
    out_path: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();

    let args = Args::parse();
    let canvas = Canvas::default();
    let layout = if args.free_placement {
        LayoutPolicy::free()
    } else {
        LayoutPolicy::grid_for(canvas, args.avoid_center)
    };

    let config = GeneratorConfig {
        background: args.background,
        icon_name: args.icon_name,
        min_icon_count: args.min_icon_count,
        max_icon_count: args.max_icon_count,
        min_scale: args.min_scale,
        max_scale: args.max_scale,
        layout,
        canvas,
        out_path: args.out_path,
        ..Default::default()
    };

    let source = FontAwesomeSource::new(DirStore::new(args.cache_dir));
    let out_path = generate(&config, &source)?;
    println!("{}", out_path.display());
    Ok(())
}
