//! Quill CLI
//!
//! Lays out, renders and rewrites scene files from the command line.
//!
//! Build with `--features layout-trace` to trace every layout pass on stderr.

mod report;
mod scene;

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use quill_common::warning::clear_warnings;
use quill_layout::{Painter, Positioning};
use quill_render::Renderer;

use scene::Scene;

/// Quill — mixed-mode box layout from the command line
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the resolved rectangles of a scene
    quill layout demos/pinned.json

    # Same, as JSON, at a different width
    quill layout demos/pinned.json --width 600 --json

    # Render borders and backgrounds to a PNG
    quill render demos/pinned.json -o pinned.png

    # Reorder absolute children to match their positions
    quill normalize demos/pinned.json > normalized.json

    # Switch child 1 to overlapped mode without moving it
    quill lift demos/pinned.json --child 1 --mode overlapped
"#)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Width and height overrides shared by the subcommands.
#[derive(clap::Args, Debug)]
struct Viewport {
    /// Available width (defaults to the scene's, then 800)
    #[arg(long)]
    width: Option<f64>,

    /// Available height (defaults to the scene's, then unconstrained)
    #[arg(long)]
    height: Option<f64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out a scene and print every child's rectangle
    Layout {
        /// Scene file
        #[arg(value_name = "SCENE")]
        scene: PathBuf,

        #[command(flatten)]
        viewport: Viewport,

        /// Print the layout snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a scene's borders and backgrounds to an image
    Render {
        /// Scene file
        #[arg(value_name = "SCENE")]
        scene: PathBuf,

        #[command(flatten)]
        viewport: Viewport,

        /// Output image (PNG)
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Reorder absolute children to match their positions and print the scene
    Normalize {
        /// Scene file
        #[arg(value_name = "SCENE")]
        scene: PathBuf,

        #[command(flatten)]
        viewport: Viewport,
    },

    /// Change one child's positioning mode, keeping it in place
    Lift {
        /// Scene file
        #[arg(value_name = "SCENE")]
        scene: PathBuf,

        #[command(flatten)]
        viewport: Viewport,

        /// Index of the child to change
        #[arg(long)]
        child: usize,

        /// New positioning mode
        #[arg(long, value_enum)]
        mode: Mode,

        /// Print the rewritten scene as JSON instead of a report
        #[arg(long)]
        json: bool,
    },
}

/// Positioning modes as spelled on the command line.
#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    Static,
    Relative,
    Absolute,
    Fixed,
    Overlapped,
}

impl From<Mode> for Positioning {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Static => Self::Static,
            Mode::Relative => Self::Relative,
            Mode::Absolute => Self::Absolute,
            Mode::Fixed => Self::Fixed,
            Mode::Overlapped => Self::Overlapped,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    clear_warnings();

    match cli.command {
        Command::Layout { scene, viewport, json } => {
            let scene = Scene::load(&scene)?;
            let (mut container, _) = scene.build();
            let _ = container.layout(scene.available(viewport.width, viewport.height));
            if json {
                println!("{}", serde_json::to_string_pretty(container.snapshot())?);
            } else {
                report::print_layout(&container);
            }
        }
        Command::Render { scene, viewport, output } => {
            let scene = Scene::load(&scene)?;
            let (mut container, _) = scene.build();
            let available = scene.available(viewport.width, viewport.height);
            let size = container.layout(available).desired_size;
            let width = canvas_extent(if available.width.is_finite() { available.width } else { size.width });
            let height = canvas_extent(if available.height.is_finite() { available.height } else { size.height });

            let display_list = Painter::new(&container).paint();
            let mut renderer = Renderer::new(width, height)?;
            renderer.render(&display_list);
            renderer.save(&output)?;
            println!("Rendered {width}x{height} to: {}", output.display());
        }
        Command::Normalize { scene, viewport } => {
            let scene = Scene::load(&scene)?;
            let (mut container, _) = scene.build();
            let available = scene.available(viewport.width, viewport.height);
            let _ = container.layout(available);
            let moves = container.normalize()?;
            eprintln!("{moves} child(ren) moved");
            println!("{}", Scene::from_container(&container, available).to_json()?);
        }
        Command::Lift {
            scene,
            viewport,
            child,
            mode,
            json,
        } => {
            let scene = Scene::load(&scene)?;
            let (mut container, ids) = scene.build();
            let available = scene.available(viewport.width, viewport.height);
            let _ = container.layout(available);
            let Some(&id) = ids.get(child) else {
                bail!("scene has {} children; there is no child {child}", ids.len());
            };
            let transition = container
                .set_positioning(id, mode.into())
                .with_context(|| format!("failed to change child {child} to {mode:?}"))?;
            if json {
                println!("{}", Scene::from_container(&container, available).to_json()?);
            } else {
                report::print_transition(&transition);
                report::print_layout(&container);
            }
        }
    }

    Ok(())
}

/// Canvas size in whole pixels, at least 1.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn canvas_extent(value: f64) -> u32 {
    if value.is_finite() {
        value.ceil().clamp(1.0, f64::from(u32::MAX)) as u32
    } else {
        1
    }
}
