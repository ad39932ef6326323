//! Voctile: tile VOC-annotated images into ranked VisDrone crops.
//!
//! Voctile prepares aerial/drone object-detection datasets for training on
//! fixed-size inputs. Each source image is resized onto a grid of square
//! crops, its boxes are re-projected into every crop (keeping boxes that are
//! only slightly cut by a crop edge), and the crops with the most objects are
//! written out with VisDrone annotation files.
//!
//! # Modules
//!
//! - [`geom`]: Frame-tagged rectangles, annotations and coordinate transforms
//! - [`tiling`]: Grid enumeration, per-crop retention policy and ranking
//! - [`io`]: VOC XML reader, VisDrone writer/reader, image helpers
//! - [`pipeline`]: Dataset-level tiling over a VOC directory
//! - [`draw`]: Debug overlay of boxes on a crop
//! - [`config`]: YAML job configuration
//! - [`error`]: Error types for voctile operations

pub mod config;
pub mod draw;
pub mod error;
pub mod geom;
pub mod io;
pub mod pipeline;
pub mod tiling;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use error::VoctileError;

use config::TileConfig;
use io::images::ResizeFilter;

/// The voctile CLI application.
#[derive(Parser)]
#[command(name = "voctile")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Tile a VOC dataset into ranked VisDrone crops.
    Tile(TileArgs),
    /// Draw the boxes of a VisDrone annotation file onto its image.
    Draw(DrawArgs),
}

/// Arguments for the tile subcommand.
#[derive(clap::Args)]
struct TileArgs {
    /// VOC dataset root (containing Annotations/ and JPEGImages/).
    input: PathBuf,

    /// Output directory; images/ and annotations/ are created inside it.
    out_dir: PathBuf,

    /// YAML file with default settings for this job.
    #[arg(long, env = "VOCTILE_CONFIG")]
    config: Option<PathBuf>,

    /// Side length of each square crop in pixels.
    #[arg(long)]
    crop_size: Option<u32>,

    /// Number of crops to keep per image.
    #[arg(long)]
    top_n: Option<usize>,

    /// Number of crop columns.
    #[arg(long)]
    width_crops: Option<u32>,

    /// Number of crop rows.
    #[arg(long)]
    height_crops: Option<u32>,

    /// Interpolation filter used to resize source images.
    #[arg(long, value_enum)]
    filter: Option<ResizeFilter>,

    /// Image format of written crops ('jpg', 'jpeg' or 'png').
    #[arg(long)]
    image_ext: Option<String>,

    /// Only process this file stem (repeatable).
    #[arg(long = "stem")]
    stems: Vec<String>,

    /// Report what would be written without decoding or writing images.
    #[arg(long)]
    dry_run: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the draw subcommand.
#[derive(clap::Args)]
struct DrawArgs {
    /// Crop image.
    image: PathBuf,

    /// VisDrone annotation file for the image.
    annotations: PathBuf,

    /// Where to write the overlay image.
    output: PathBuf,
}

/// Run the voctile CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), VoctileError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Tile(args)) => run_tile(args),
        Some(Commands::Draw(args)) => run_draw(args),
        None => {
            println!("voctile {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Tile VOC-annotated images into ranked VisDrone crops.");
            println!();
            println!("Run 'voctile --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the tile subcommand.
fn run_tile(args: TileArgs) -> Result<(), VoctileError> {
    let file_config = match &args.config {
        Some(path) => TileConfig::load(path)?,
        None => TileConfig::default(),
    };
    let flags = TileConfig {
        crop_size: args.crop_size,
        top_n: args.top_n,
        width_crops: args.width_crops,
        height_crops: args.height_crops,
        filter: args.filter,
        image_extension: args.image_ext,
    };
    let settings = file_config.merged_with(flags).resolve()?;

    let options = pipeline::TileOptions {
        settings,
        stems: args.stems,
        dry_run: args.dry_run,
    };
    let report = pipeline::tile_dataset(&args.input, &args.out_dir, &options)?;

    match args.output.as_str() {
        "json" => {
            let json = report.to_json().map_err(VoctileError::ReportJson)?;
            println!("{json}");
        }
        _ => print!("{}", report),
    }

    Ok(())
}

/// Execute the draw subcommand.
fn run_draw(args: DrawArgs) -> Result<(), VoctileError> {
    let drawn = draw::render_overlay(&args.image, &args.annotations, &args.output)?;
    println!("Drew {} box(es) to {}", drawn, args.output.display());
    Ok(())
}
