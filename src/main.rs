//! promptly - command-line driver for the bubble geometry
//!
//! # Examples
//!
//! ```bash
//! # Replay a recorded pointer script and print the resulting state
//! promptly replay drag.json
//!
//! # Where would the panel go for this anchor?
//! promptly place --anchor 1380,300,60,60 --visible 0,0,1440,900 --panel 320,260
//!
//! # Show the resolved configuration
//! promptly config
//!
//! # List the built-in prompt styles
//! promptly styles
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use promptly::config::Config;
use promptly::placement::{PlacementEngine, DEFAULT_PADDING};
use promptly::script;
use promptly::styles::StyleStore;
use promptly::types::{Rect, Size};

/// promptly - floating prompt bubble geometry
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (default: ~/.config/promptly/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output raw JSON without pretty-printing
    #[arg(long, global = true)]
    raw: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON pointer-event script
    Replay {
        /// Path to the script
        script: PathBuf,
    },

    /// Compute a companion panel position
    Place {
        /// Anchor frame as x,y,width,height
        #[arg(long, value_parser = parse_rect)]
        anchor: Rect,

        /// Visible area as x,y,width,height
        #[arg(long, value_parser = parse_rect)]
        visible: Rect,

        /// Panel size as width,height
        #[arg(long, value_parser = parse_size)]
        panel: Size,

        /// Gap between anchor and panel
        #[arg(long, default_value_t = DEFAULT_PADDING)]
        padding: f64,

        /// Inset used when clamping into the visible area
        #[arg(long, default_value_t = 0.0)]
        margin: f64,
    },

    /// Print the resolved configuration
    Config,

    /// List the built-in prompt styles
    Styles,
}

#[derive(Serialize)]
struct PlaceOutput {
    anchor_edge: promptly::Edge,
    frame: Rect,
    fits: bool,
}

fn parse_numbers<const N: usize>(s: &str) -> Result<[f64; N], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("expected {} comma-separated numbers, got {:?}", N, s));
    }
    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .parse()
            .map_err(|_| format!("invalid number {:?}", part))?;
    }
    Ok(out)
}

fn parse_rect(s: &str) -> Result<Rect, String> {
    let [x, y, w, h] = parse_numbers::<4>(s)?;
    Ok(Rect::new(x, y, w, h))
}

fn parse_size(s: &str) -> Result<Size, String> {
    let [w, h] = parse_numbers::<2>(s)?;
    Ok(Size::new(w, h))
}

fn print_json<T: Serialize>(value: &T, raw: bool) -> Result<()> {
    let out = if raw {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", out);
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };
    let bubble_config = config.bubble_config();

    match cli.command {
        Commands::Replay { script: path } => {
            let parsed = script::load_script(&path)
                .with_context(|| format!("Cannot replay {:?}", path))?;
            log::info!("Replaying {} event(s) from {:?}", parsed.events.len(), path);
            let report = script::replay(&parsed, bubble_config);
            print_json(&report, cli.raw)?;
        }
        Commands::Place {
            anchor,
            visible,
            panel,
            padding,
            margin,
        } => {
            let engine = PlacementEngine::new(padding, margin);
            let placement = engine.place_detailed(anchor, panel, visible);
            let output = PlaceOutput {
                anchor_edge: placement.anchor_edge,
                frame: placement.frame,
                fits: visible.contains_rect(&placement.frame),
            };
            print_json(&output, cli.raw)?;
        }
        Commands::Config => {
            print_json(&bubble_config, cli.raw)?;
        }
        Commands::Styles => {
            let store = StyleStore::new();
            print_json(&store.styles(), cli.raw)?;
        }
    }

    Ok(())
}
