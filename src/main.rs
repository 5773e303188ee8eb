//! # Recipebook - A Page-Flipping Recipe Notebook
//!
//! Runs the notebook headless: intents come from a script file, page flips
//! settle instantly, and the final state is printed as JSON.
//!
//! ## Quick Start
//!
//! ```bash
//! # Print the initial notebook
//! cargo run
//!
//! # Replay a session
//! cargo run -- --script session.toml -v
//! ```
//!
//! A script is a list of intents:
//!
//! ```toml
//! [[step]]
//! intent = "open"
//!
//! [[step]]
//! intent = "start_new"
//!
//! [[step]]
//! intent = "select_icon"
//! icon = "egg.png"
//!
//! [[step]]
//! intent = "place_sticker"
//! pointer = { x = 120.0, y = 200.0 }
//!
//! [[step]]
//! intent = "save"
//! title = "Omelette"
//!
//! # Steps can also be key presses, resolved through the keymap
//! [[step]]
//! key = "ctrl+w"
//! ```

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recipebook_core::{Config, HeadlessFlipbook, Intent, KeyPress, Keymap, Notebook};
use recipebook_geometry::SpreadGeometry;

/// Recipebook - a page-flipping recipe notebook
#[derive(Parser, Debug)]
#[command(name = "recipebook")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (defaults to the user config directory)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Script of intents to replay
    #[arg(short, long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Rendered spread width in pixels
    #[arg(long, value_name = "PX")]
    spread_width: Option<f64>,

    /// Rendered spread height in pixels
    #[arg(long, value_name = "PX")]
    spread_height: Option<f64>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// A replayable session.
#[derive(Debug, Default, Deserialize)]
struct Script {
    #[serde(default)]
    step: Vec<Step>,
}

/// One scripted input: a key press or an explicit intent.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Step {
    Key { key: String },
    Intent(Intent),
}

impl Step {
    /// Resolves the step to an intent. Unbound keys resolve to nothing.
    fn resolve(self, keymap: &Keymap) -> Option<Intent> {
        match self {
            Step::Intent(intent) => Some(intent),
            Step::Key { key } => {
                let intent = KeyPress::parse(&key).and_then(|press| keymap.lookup(&press));
                if intent.is_none() {
                    tracing::warn!("Key '{}' is not bound", key);
                }
                intent
            }
        }
    }
}

impl Script {
    fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid script {}", path.display()))
    }
}

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting Recipebook v{}", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load(),
    };

    let script = match &args.script {
        Some(path) => Script::load(path)?,
        None => Script::default(),
    };

    let mut notebook = Notebook::with_config(&config, HeadlessFlipbook::new());
    if let Some(spread) = spread_override(&args, notebook.spread()) {
        notebook.set_spread(spread);
    }

    let keymap = Keymap::from_config(&config);
    run_script(&mut notebook, &keymap, script);

    let snapshot = serde_json::to_string_pretty(&notebook.snapshot())?;
    println!("{}", snapshot);

    Ok(())
}

/// Applies `--spread-width` / `--spread-height`, keeping the configured inset.
fn spread_override(args: &Args, current: SpreadGeometry) -> Option<SpreadGeometry> {
    if args.spread_width.is_none() && args.spread_height.is_none() {
        return None;
    }
    Some(SpreadGeometry::new(
        args.spread_width.unwrap_or(current.width),
        args.spread_height.unwrap_or(current.height),
        current.inset,
    ))
}

/// Dispatches each step, letting every flip settle before the next.
fn run_script(notebook: &mut Notebook, keymap: &Keymap, script: Script) {
    for (n, step) in script.step.into_iter().enumerate() {
        let Some(intent) = step.resolve(keymap) else {
            continue;
        };
        let name = intent.name();
        if let Err(e) = notebook.dispatch(intent) {
            tracing::warn!("Step {} ({}) rejected: {}", n + 1, name, e);
        }
        while let Some(page) = notebook.adapter_mut().settle() {
            notebook.on_flip_settled(page);
        }
    }
}
