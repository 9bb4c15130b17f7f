//! HTR CLI - Export joint hierarchies from scene descriptions to HTR files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use htr::export::DEFAULT_OUTPUT;
use htr::prelude::*;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("HTR_BUILD_DATE"),
    " ",
    env!("HTR_BUILD_TIME"),
    ")"
);

#[derive(Debug, Parser)]
#[command(name = "htr", version, long_version = LONG_VERSION, about = "Export animated joint hierarchies to HTR")]
struct Cli {
    /// Show debug output (-vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Export the skeleton under the root joint to an HTR file
    #[command(alias = "e")]
    Export {
        /// Scene description (JSON)
        scene: PathBuf,
        /// Root joint; defaults to the first selected object
        #[arg(short, long)]
        root: Option<String>,
        /// Output file
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
    },
    /// Show the joint hierarchy that would be exported
    #[command(alias = "t")]
    Tree {
        scene: PathBuf,
        #[arg(short, long)]
        root: Option<String>,
    },
    /// Show playback range, frame rate and units
    #[command(alias = "i")]
    Info { scene: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Export { scene, root, output } => cmd_export(&scene, root.as_deref(), &output),
        Command::Tree { scene, root } => cmd_tree(&scene, root.as_deref()),
        Command::Info { scene } => cmd_info(&scene),
    }
}

/// `RUST_LOG` wins; otherwise the level follows -q / -v / -vv.
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_scene(path: &Path) -> Result<MemoryScene> {
    debug!("Opening scene: {}", path.display());
    MemoryScene::open(path).with_context(|| format!("failed to open scene {}", path.display()))
}

/// Root given by name, or the first selected object.
fn resolve_root(scene: &MemoryScene, root: Option<&str>) -> Result<usize> {
    let exporter = Exporter::new(scene);
    let handle = match root {
        Some(name) => scene.find(name)?,
        None => exporter.selected_root()?,
    };
    Ok(handle)
}

fn cmd_export(path: &Path, root: Option<&str>, output: &Path) -> Result<()> {
    let scene = open_scene(path)?;
    let root = resolve_root(&scene, root)?;
    let summary = Exporter::new(&scene)
        .export_to_path(Some(&root), output)
        .with_context(|| format!("export to {} failed", output.display()))?;

    println!(
        "Wrote {} ({} segments, {} frames, {} bytes)",
        summary.path.display(),
        summary.num_segments,
        summary.num_frames,
        summary.bytes
    );
    Ok(())
}

fn cmd_tree(path: &Path, root: Option<&str>) -> Result<()> {
    let scene = open_scene(path)?;
    let root = resolve_root(&scene, root)?;
    let skeleton = build_root(&scene, &root)?;

    println!("Scene: {}", path.display());
    println!();
    println!("{skeleton}");
    println!();
    println!("Segments: {}", skeleton.len());
    Ok(())
}

fn cmd_info(path: &Path) -> Result<()> {
    let scene = open_scene(path)?;
    let exporter = Exporter::new(&scene);
    let (min, max) = scene.playback_frame_range();

    println!("Scene: {}", path.display());
    println!("Objects: {}", scene.num_objects());
    println!("Playback: {min} - {max}");
    match exporter.frame_range() {
        Ok(range) => println!("Frames: {}", range.len()),
        Err(e) => println!("Frames: invalid ({e})"),
    }
    match exporter.frame_rate() {
        Ok(rate) => println!("Frame rate: {} ({})", rate, scene.working_time_unit()),
        Err(e) => println!("Frame rate: invalid ({e})"),
    }
    println!("Length unit: {}", scene.working_length_unit());
    let selection: Vec<String> = scene.selection().iter().map(|h| scene.display_name(h)).collect();
    if selection.is_empty() {
        println!("Selection: (none)");
    } else {
        println!("Selection: {}", selection.join(", "));
    }
    Ok(())
}
